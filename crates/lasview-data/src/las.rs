//! Minimal LAS 2.0 reader.
//!
//! Reads the header sections (`~V`, `~W`, `~C`, `~P`), keeps `~O` as free text
//! and turns the `~A` data block into a [`Table`] with one column per curve.
//! Data values are read as one whitespace-separated stream and chunked by the
//! curve count, so wrapped and unwrapped files are handled alike.

use crate::table::{Column, Table, TableError};

/// Null value assumed when the `~W` section does not declare `NULL`.
pub const DEFAULT_NULL_VALUE: f64 = -999.25;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LasError {
    #[display("LAS file has no {section} section")]
    MissingSection { section: &'static str },
    #[display("line {line}: malformed header line '{text}'")]
    MalformedHeader { line: usize, text: String },
    #[display("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },
    #[display("data section has {values} values, which is not a multiple of {curves} curves")]
    RaggedData { values: usize, curves: usize },
    #[display("{_0}")]
    Table(TableError),
}

/// One `MNEM.UNIT VALUE : DESCRIPTION` header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderItem {
    pub mnemonic: String,
    pub unit: String,
    pub value: String,
    pub description: String,
}

/// A parsed LAS file.
#[derive(Debug, Clone)]
pub struct LasFile {
    pub version: Vec<HeaderItem>,
    pub well: Vec<HeaderItem>,
    pub curves: Vec<HeaderItem>,
    pub parameters: Vec<HeaderItem>,
    pub other: String,
    /// One column per curve, named after the (deduplicated) curve mnemonic.
    pub table: Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Version,
    Well,
    Curves,
    Parameters,
    Other,
    Data,
    Unknown,
}

impl Section {
    fn from_marker(line: &str) -> Self {
        match line.chars().nth(1).map(|c| c.to_ascii_uppercase()) {
            Some('V') => Self::Version,
            Some('W') => Self::Well,
            Some('C') => Self::Curves,
            Some('P') => Self::Parameters,
            Some('O') => Self::Other,
            Some('A') => Self::Data,
            _ => Self::Unknown,
        }
    }
}

impl LasFile {
    pub fn parse(text: &str) -> Result<Self, LasError> {
        let mut version = vec![];
        let mut well = vec![];
        let mut curves = vec![];
        let mut parameters = vec![];
        let mut other = String::new();
        let mut data = vec![];
        let mut seen_data = false;
        let mut section = Section::Unknown;

        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('~') {
                section = Section::from_marker(line);
                seen_data |= section == Section::Data;
                continue;
            }
            match section {
                Section::Version => version.push(parse_header_line(line_no, line)?),
                Section::Well => well.push(parse_header_line(line_no, line)?),
                Section::Curves => curves.push(parse_header_line(line_no, line)?),
                Section::Parameters => parameters.push(parse_header_line(line_no, line)?),
                Section::Other => {
                    other.push_str(line);
                    other.push('\n');
                }
                Section::Data => {
                    for token in line.split_whitespace() {
                        let value = token.parse::<f64>().map_err(|_| LasError::InvalidNumber {
                            line: line_no,
                            token: token.to_owned(),
                        })?;
                        data.push(value);
                    }
                }
                Section::Unknown => {}
            }
        }

        if curves.is_empty() {
            return Err(LasError::MissingSection { section: "~C" });
        }
        if !seen_data {
            return Err(LasError::MissingSection { section: "~A" });
        }
        if data.len() % curves.len() != 0 {
            return Err(LasError::RaggedData {
                values: data.len(),
                curves: curves.len(),
            });
        }

        let null_value = find_item(&well, "NULL")
            .and_then(|item| item.value.parse::<f64>().ok())
            .unwrap_or(DEFAULT_NULL_VALUE);
        let names = column_names(&curves);
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(c, name)| {
                let values = data
                    .iter()
                    .skip(c)
                    .step_by(curves.len())
                    .map(|&v| (!is_null(v, null_value)).then_some(v));
                Column::new(name, values)
            })
            .collect();
        let table = Table::new(columns).map_err(LasError::Table)?;

        Ok(Self {
            version,
            well,
            curves,
            parameters,
            other,
            table,
        })
    }

    /// Looks up a `~W` item by mnemonic (case-insensitive).
    #[must_use]
    pub fn well_item(&self, mnemonic: &str) -> Option<&HeaderItem> {
        find_item(&self.well, mnemonic)
    }
}

fn find_item<'a>(items: &'a [HeaderItem], mnemonic: &str) -> Option<&'a HeaderItem> {
    items
        .iter()
        .find(|item| item.mnemonic.eq_ignore_ascii_case(mnemonic))
}

fn is_null(value: f64, null_value: f64) -> bool {
    (value - null_value).abs() < 1e-9
}

fn parse_header_line(line_no: usize, line: &str) -> Result<HeaderItem, LasError> {
    let malformed = || LasError::MalformedHeader {
        line: line_no,
        text: line.to_owned(),
    };
    let (mnemonic, rest) = line.split_once('.').ok_or_else(malformed)?;
    let unit_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (unit, rest) = rest.split_at(unit_end);
    // Values may contain ':' (times, ratios), so the description starts at the last one.
    let (value, description) = rest.rsplit_once(':').unwrap_or((rest, ""));
    Ok(HeaderItem {
        mnemonic: mnemonic.trim().to_owned(),
        unit: unit.to_owned(),
        value: value.trim().to_owned(),
        description: description.trim().to_owned(),
    })
}

/// Curve mnemonics, with repeated names suffixed `:1`, `:2`, ...
fn column_names(curves: &[HeaderItem]) -> Vec<String> {
    let base = curves
        .iter()
        .map(|c| {
            if c.mnemonic.is_empty() {
                "UNKNOWN".to_owned()
            } else {
                c.mnemonic.clone()
            }
        })
        .collect::<Vec<_>>();
    base.iter()
        .enumerate()
        .map(|(i, name)| {
            let total = base.iter().filter(|n| *n == name).count();
            if total == 1 {
                name.clone()
            } else {
                let nth = base[..=i].iter().filter(|n| *n == name).count();
                format!("{name}:{nth}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
~VERSION INFORMATION
 VERS.                  2.0 :   CWLS LOG ASCII STANDARD -VERSION 2.0
 WRAP.                  NO  :   ONE LINE PER DEPTH STEP
~WELL INFORMATION BLOCK
#MNEM.UNIT       DATA TYPE    INFORMATION
 STRT.M        1670.0000 :
 STOP.M        1669.7500 :
 STEP.M          -0.1250 :
 NULL.           -999.25 :
 WELL.   ANY ET AL 12-34-12-34 :   WELL
 DATE.           13:45:00 : LOG DATE
~CURVE INFORMATION
 DEPT.M                  :   1  DEPTH
 GR  .GAPI               :   2  GAMMA RAY
 RHOB.K/M3               :   3  BULK DENSITY
~PARAMETER INFORMATION
 BHT .DEGC    35.5000    :   BOTTOM HOLE TEMPERATURE
~Other
 Note: sample data
~A  DEPTH     GR      RHOB
1670.000   123.450 -999.25
1669.875   123.450 2550.000
1669.750   -999.25 2550.000
";

    #[test]
    fn test_parse_sample() {
        let las = LasFile::parse(SAMPLE).unwrap();
        assert_eq!(las.curves.len(), 3);
        assert_eq!(las.parameters[0].mnemonic, "BHT");
        assert_eq!(las.well_item("well").unwrap().value, "ANY ET AL 12-34-12-34");
        assert_eq!(las.well_item("DATE").unwrap().value, "13:45:00");
        assert!(las.other.contains("sample data"));

        let table = &las.table;
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["DEPT", "GR", "RHOB"]);
        assert_eq!(table.index(), &[1, 2, 3]);
        assert_eq!(
            table.column("RHOB").unwrap().values(),
            &[None, Some(2550.0), Some(2550.0)]
        );
        assert_eq!(table.column("GR").unwrap().missing_count(), 1);
    }

    #[test]
    fn test_header_line_units() {
        let item = parse_header_line(1, "RHOB.K/M3    :   3  BULK DENSITY").unwrap();
        assert_eq!(item.mnemonic, "RHOB");
        assert_eq!(item.unit, "K/M3");
        assert_eq!(item.value, "");
        assert_eq!(item.description, "3  BULK DENSITY");

        let item = parse_header_line(1, "NULL.   -999.25 : NULL VALUE").unwrap();
        assert_eq!(item.unit, "");
        assert_eq!(item.value, "-999.25");
    }

    #[test]
    fn test_wrapped_data() {
        let text = "~C\nDEPT.M : depth\nGR.GAPI : gamma\n~A\n1.0\n10.0 2.0\n20.0\n";
        let las = LasFile::parse(text).unwrap();
        assert_eq!(
            las.table.column("GR").unwrap().values(),
            &[Some(10.0), Some(20.0)]
        );
    }

    #[test]
    fn test_custom_null_value() {
        let text = "~W\nNULL. -1 : null\n~C\nDEPT.M : d\n~A\n1\n-1\n";
        let las = LasFile::parse(text).unwrap();
        assert_eq!(las.table.column("DEPT").unwrap().values(), &[Some(1.0), None]);
    }

    #[test]
    fn test_duplicate_curve_names() {
        let text = "~C\nDEPT.M : d\nGR.GAPI : a\nGR.GAPI : b\n~A\n1 2 3\n";
        let las = LasFile::parse(text).unwrap();
        assert_eq!(
            las.table.column_names().collect::<Vec<_>>(),
            vec!["DEPT", "GR:1", "GR:2"]
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            LasFile::parse("~A\n1 2\n"),
            Err(LasError::MissingSection { section: "~C" })
        ));
        assert!(matches!(
            LasFile::parse("~C\nDEPT.M : d\n"),
            Err(LasError::MissingSection { section: "~A" })
        ));
        assert!(matches!(
            LasFile::parse("~C\nDEPT.M : d\nGR.G : g\n~A\n1 2 3\n"),
            Err(LasError::RaggedData { values: 3, curves: 2 })
        ));
        assert!(matches!(
            LasFile::parse("~C\nDEPT.M : d\n~A\n1 x\n"),
            Err(LasError::InvalidNumber { line: 4, .. })
        ));
    }
}
