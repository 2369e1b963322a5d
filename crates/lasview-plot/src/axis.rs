//! Axis ranges and scales.

/// Mapping from data values to axis positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    #[default]
    Linear,
    /// Base-10 logarithm. Domain is `(0, +inf)`; other values are not drawn.
    Log,
}

impl Scale {
    /// Transforms a data value into scale space, `None` outside the domain.
    #[must_use]
    pub fn transform(self, value: f64) -> Option<f64> {
        match self {
            Self::Linear => value.is_finite().then_some(value),
            Self::Log => (value.is_finite() && value > 0.0).then(|| value.log10()),
        }
    }

    #[must_use]
    pub fn inverse(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log => 10.0_f64.powf(value),
        }
    }
}

/// Pair of axis end values.
///
/// `from` is the value at the axis origin (left end of an x-axis, bottom end of
/// a y-axis) and `to` the value at the opposite end. A depth axis is stored
/// inverted (`from > to`) so that depth grows downward.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisRange {
    pub from: f64,
    pub to: f64,
}

impl AxisRange {
    #[must_use]
    pub fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    /// The same range with its ends swapped.
    #[must_use]
    pub fn inverted(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.from > self.to
    }

    #[must_use]
    pub fn lower(&self) -> f64 {
        self.from.min(self.to)
    }

    #[must_use]
    pub fn upper(&self) -> f64 {
        self.from.max(self.to)
    }
}

impl From<(f64, f64)> for AxisRange {
    fn from((from, to): (f64, f64)) -> Self {
        Self { from, to }
    }
}

/// Range and scale of one axis.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct AxisSpec {
    pub range: AxisRange,
    pub scale: Scale,
}

impl AxisSpec {
    #[must_use]
    pub fn new(range: AxisRange, scale: Scale) -> Self {
        Self { range, scale }
    }

    /// Relative position of `value` along the axis.
    ///
    /// `0.0` is `range.from` and `1.0` is `range.to`; values outside the range
    /// fall outside `[0, 1]`. `None` when the value (or a range end) is outside
    /// the scale's domain. A zero-length range puts every value at `0.5`.
    #[must_use]
    pub fn fraction(&self, value: f64) -> Option<f64> {
        let a = self.scale.transform(self.range.from)?;
        let b = self.scale.transform(self.range.to)?;
        let v = self.scale.transform(value)?;
        if (b - a).abs() < f64::EPSILON {
            return Some(0.5);
        }
        Some((v - a) / (b - a))
    }

    /// Data value at a relative axis position (inverse of [`Self::fraction`]).
    #[must_use]
    pub fn value_at(&self, fraction: f64) -> Option<f64> {
        let a = self.scale.transform(self.range.from)?;
        let b = self.scale.transform(self.range.to)?;
        Some(self.scale.inverse(a + (b - a) * fraction))
    }

    /// `count` tick values evenly spaced in scale space, from `range.from` to `range.to`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match count {
            0 => vec![],
            1 => self.value_at(0.5).into_iter().collect(),
            _ => (0..count)
                .filter_map(|i| self.value_at(i as f64 / (count - 1) as f64))
                .collect(),
        }
    }

    /// Widens the range by `margin` (a fraction of its length) on both ends,
    /// measured in scale space.
    #[must_use]
    pub fn padded(self, margin: f64) -> Self {
        let (Some(a), Some(b)) = (
            self.scale.transform(self.range.from),
            self.scale.transform(self.range.to),
        ) else {
            return self;
        };
        let pad = if (b - a).abs() < f64::EPSILON {
            0.5_f64.copysign(b - a)
        } else {
            (b - a) * margin
        };
        Self {
            range: AxisRange::new(self.scale.inverse(a - pad), self.scale.inverse(b + pad)),
            scale: self.scale,
        }
    }
}

/// Default range of values for a scale: `(min, max)` over the values inside the
/// scale's domain, or `None` when there are none.
pub(crate) fn data_range<I>(values: I, scale: Scale) -> Option<AxisRange>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| scale.transform(*v).is_some())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
        .map(AxisRange::from)
}

/// Range shown when a column has nothing drawable.
pub(crate) fn fallback_range(scale: Scale) -> AxisRange {
    match scale {
        Scale::Linear => AxisRange::new(0.0, 1.0),
        Scale::Log => AxisRange::new(1.0, 10.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_fraction() {
        let axis = AxisSpec::new(AxisRange::new(0.0, 200.0), Scale::Linear);
        assert_eq!(axis.fraction(50.0), Some(0.25));
        assert_eq!(axis.value_at(0.25), Some(50.0));
    }

    #[test]
    fn test_inverted_depth_axis_grows_downward() {
        // Origin (bottom) is the deepest value.
        let axis = AxisSpec::new(AxisRange::new(3.0, 1.0), Scale::Linear);
        assert!(axis.range.is_inverted());
        assert_eq!(axis.fraction(3.0), Some(0.0));
        assert_eq!(axis.fraction(1.0), Some(1.0));
        assert_eq!(axis.fraction(2.0), Some(0.5));
        assert_eq!(axis.ticks(3), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_log_fraction() {
        let axis = AxisSpec::new(AxisRange::new(1.0, 1000.0), Scale::Log);
        let f = axis.fraction(10.0).unwrap();
        assert!((f - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(axis.fraction(0.0), None);
        assert_eq!(axis.fraction(-5.0), None);
        let ticks = axis.ticks(4);
        assert!((ticks[1] - 10.0).abs() < 1e-9);
        assert!((ticks[3] - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_range() {
        let axis = AxisSpec::new(AxisRange::new(2.0, 2.0), Scale::Linear);
        assert_eq!(axis.fraction(2.0), Some(0.5));
        let padded = axis.padded(0.05);
        assert_eq!(padded.range, AxisRange::new(1.5, 2.5));
    }

    #[test]
    fn test_data_range_respects_domain() {
        let values = [-1.0, 0.0, 2.0, 50.0];
        assert_eq!(
            data_range(values, Scale::Linear),
            Some(AxisRange::new(-1.0, 50.0))
        );
        assert_eq!(data_range(values, Scale::Log), Some(AxisRange::new(2.0, 50.0)));
        assert_eq!(data_range([0.0], Scale::Log), None);
    }
}
