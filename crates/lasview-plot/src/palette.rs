//! Colors used by the renderers.

/// An sRGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("#{_0:02x}{_1:02x}{_2:02x}")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl serde::Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Rgb {
    /// Mixes the color with white; `amount` 0.0 keeps it, 1.0 gives white.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn lighten(self, amount: f64) -> Self {
        let mix = |c: u8| {
            let c = f64::from(c);
            (c + (255.0 - c) * amount.clamp(0.0, 1.0)).round() as u8
        };
        Self(mix(self.0), mix(self.1), mix(self.2))
    }
}

/// Ten-color palette distinguishable under the common forms of color blindness.
pub const COLORBLIND: [Rgb; 10] = [
    Rgb(0x01, 0x73, 0xb2),
    Rgb(0xde, 0x8f, 0x05),
    Rgb(0x02, 0x9e, 0x73),
    Rgb(0xd5, 0x5e, 0x00),
    Rgb(0xcc, 0x78, 0xbc),
    Rgb(0xca, 0x91, 0x61),
    Rgb(0xfb, 0xaf, 0xe4),
    Rgb(0x94, 0x94, 0x94),
    Rgb(0xec, 0xe1, 0x33),
    Rgb(0x56, 0xb4, 0xe9),
];

/// Outlier marker fill.
pub const OUTLIER_FILL: Rgb = Rgb(0xff, 0x00, 0x00);
/// Outlier marker edge.
pub const OUTLIER_EDGE: Rgb = Rgb(0xff, 0xff, 0xff);

/// Exactly `n` colors from [`COLORBLIND`], in palette order.
///
/// Past the tenth color the palette repeats in progressively lighter tints, so
/// no two entries are equal.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn colorblind(n: usize) -> Vec<Rgb> {
    (0..n)
        .map(|i| {
            let base = COLORBLIND[i % COLORBLIND.len()];
            let round = i / COLORBLIND.len();
            if round == 0 {
                base
            } else {
                base.lighten(round as f64 / (round as f64 + 2.0))
            }
        })
        .collect()
}
