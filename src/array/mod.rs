//! # Data Block
//!
//! The data block follows the header and stores `product(shape)` floats in column-major
//! order (first axis varying fastest). It is opened by a line such as
//!
//! ```text
//! # Begin: Data Binary 8
//! ```
//!
//! and closed by the matching `# End: Data <repr>` and `# End: Segment` lines.
//!
//! Binary blocks start with a sentinel value (see [`Numeric::SENTINEL`]) that must be
//! checked before any payload is trusted. Text blocks are whitespace separated decimal
//! values where `#` starts a comment.

mod binary;
mod text;

use crate::prelude::*;
use ndarray::ShapeBuilder;
use std::fmt;
use std::str::FromStr;

/// How the values of a data block are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Representation {
    /// whitespace separated decimal values, one stored row per line
    Text,
    /// little-endian `f32` values
    Binary4,
    /// little-endian `f64` values
    #[default]
    Binary8,
}

impl Representation {
    /// width of a binary value, `None` for text
    pub fn precision(self) -> Option<Precision> {
        match self {
            Self::Text => None,
            Self::Binary4 => Some(Precision::Float32),
            Self::Binary8 => Some(Precision::Float64),
        }
    }

    fn from_precision(precision: Precision) -> Self {
        match precision {
            Precision::Float32 => Self::Binary4,
            Precision::Float64 => Self::Binary8,
        }
    }

    /// Read the representation from a `# Begin: Data <mode> [width]` line.
    ///
    /// The mode is the fourth whitespace separated token and the binary width the fifth.
    pub(crate) fn from_marker_line(line: &str) -> Result<Self, UnsupportedRepresentation> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let unsupported = || {
            let found = tokens.get(3..).map(|rest| rest.join(" ")).unwrap_or_default();
            UnsupportedRepresentation::new(found)
        };

        match tokens.get(3) {
            Some(mode) if mode.eq_ignore_ascii_case("text") => Ok(Self::Text),
            Some(mode) if mode.eq_ignore_ascii_case("binary") => tokens
                .get(4)
                .and_then(|width| width.parse().ok())
                .and_then(Precision::from_width)
                .map(Self::from_precision)
                .ok_or_else(unsupported),
            _ => Err(unsupported()),
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Binary4 => write!(f, "Binary 4"),
            Self::Binary8 => write!(f, "Binary 8"),
        }
    }
}

impl FromStr for Representation {
    type Err = UnsupportedRepresentation;

    /// Accepts `text`, `bin4`, `bin8`, `binary4`, `binary8`, `binary 4` and `binary 8`
    /// in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .split_whitespace()
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "text" => Ok(Self::Text),
            "bin4" | "binary4" => Ok(Self::Binary4),
            "bin8" | "binary8" => Ok(Self::Binary8),
            _ => Err(UnsupportedRepresentation::new(s.to_string())),
        }
    }
}

/// Decode the data block that follows the `# Begin: Data` line.
///
/// Exactly `product(shape)` values are consumed from `reader`; the closing marker lines
/// are left unread. The result has the given `shape`, filled in column-major order.
pub fn read_data_block<R: BufRead>(
    reader: &mut R,
    representation: Representation,
    shape: &[usize],
) -> Result<ArrayD<f64>, Error> {
    let count = shape
        .iter()
        .try_fold(1usize, |count, n| count.checked_mul(*n))
        .ok_or_else(|| {
            let shape = format!("{shape:?}");
            ParseError::from(InvalidHeaderValue::new("data shape", shape, header::DATA_SIZE_LIMIT))
        })?;

    let values = match representation {
        Representation::Text => text::read_values(reader, count)?,
        Representation::Binary4 => binary::read_values::<f32, _>(reader, count)?,
        Representation::Binary8 => binary::read_values::<f64, _>(reader, count)?,
    };

    let found = values.len();
    let block = ArrayD::from_shape_vec(IxDyn(shape).f(), values)
        .map_err(|_| ParseError::from(TruncatedDataBlock::new(count, found)))?;

    Ok(block)
}

/// Split a decoded block along its leading axis, one array per stored component
pub(crate) fn split_rows(block: &ArrayD<f64>) -> Vec<ArrayD<f64>> {
    block
        .axis_iter(Axis(0))
        .map(|row| row.to_owned())
        .collect()
}

/// Encode `values` as a complete data block, including the closing marker lines.
///
/// `values` holds the stored records back to back, `record_len` floats each. In text
/// mode every record is written on its own line.
pub fn write_data_block<W: Write>(
    writer: &mut W,
    values: &[f64],
    record_len: usize,
    representation: Representation,
) -> std::io::Result<()> {
    match representation {
        Representation::Text => text::write_values(writer, values, record_len)?,
        Representation::Binary4 => binary::write_values::<f32, _>(writer, values)?,
        Representation::Binary8 => binary::write_values::<f64, _>(writer, values)?,
    }

    write!(writer, "# End: Data {}\n# End: Segment\n", representation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn representation_names() {
        for (name, expected) in [
            ("text", Representation::Text),
            ("TEXT", Representation::Text),
            ("bin4", Representation::Binary4),
            ("Binary 4", Representation::Binary4),
            ("binary8", Representation::Binary8),
            ("BIN8", Representation::Binary8),
        ] {
            assert_eq!(name.parse::<Representation>().unwrap(), expected);
        }

        let err = "bin16".parse::<Representation>().unwrap_err();
        assert_eq!(err.found, "bin16");
        assert_eq!(Representation::default(), Representation::Binary8);
        assert_eq!(Representation::Binary4.to_string(), "Binary 4");
    }

    #[test]
    fn marker_lines() {
        let parse = Representation::from_marker_line;
        assert_eq!(parse("# Begin: Data Binary 8").unwrap(), Representation::Binary8);
        assert_eq!(parse("# begin: data binary 4\r\n").unwrap(), Representation::Binary4);
        assert_eq!(parse("# Begin: data text").unwrap(), Representation::Text);

        assert_eq!(parse("# Begin: Data Binary 2").unwrap_err().found, "Binary 2");
        assert_eq!(parse("# Begin: Data Binary").unwrap_err().found, "Binary");
        assert_eq!(parse("# Begin: Data").unwrap_err().found, "");
        assert!(parse("# Begin: Data csv").is_err());
    }

    #[test]
    fn column_major_reshape() {
        let mut reader = Cursor::new("0 1 2\n3 4 5\n");
        let block = read_data_block(&mut reader, Representation::Text, &[2, 3]).unwrap();

        // first axis varies fastest
        assert_eq!(block[[0, 0]], 0.);
        assert_eq!(block[[1, 0]], 1.);
        assert_eq!(block[[0, 1]], 2.);
        assert_eq!(block[[1, 2]], 5.);

        let rows = split_rows(&block);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].iter().copied().collect::<Vec<_>>(), vec![1., 3., 5.]);
    }

    #[test]
    fn closing_markers() {
        let mut out = Vec::new();
        write_data_block(&mut out, &[1., 2.], 2, Representation::Text).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1.0 2.0\n# End: Data text\n# End: Segment\n"
        );

        let mut out = Vec::new();
        write_data_block(&mut out, &[1.], 1, Representation::Binary4).unwrap();
        assert_eq!(out.len(), 4 + 4 + "\n# End: Data Binary 4\n# End: Segment\n".len());
        assert!(out.ends_with(b"\n# End: Data Binary 4\n# End: Segment\n"));
    }

    #[test]
    fn binary_blocks_decode_after_the_sentinel() {
        let mut bytes = Vec::new();
        write_data_block(&mut bytes, &[0.5, -2., 8.], 3, Representation::Binary8).unwrap();

        let mut reader = Cursor::new(bytes);
        let block = read_data_block(&mut reader, Representation::Binary8, &[3, 1]).unwrap();
        assert_eq!(block.iter().copied().collect::<Vec<_>>(), vec![0.5, -2., 8.]);
    }

    #[test]
    fn declared_size_is_not_reserved_up_front() {
        let shape = [3, 1_000_000, 1_000_000, 1];

        let mut reader = Cursor::new("1 2 3\n# End: Data Text\n");
        let err = read_data_block(&mut reader, Representation::Text, &shape).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedDataBlock);

        let mut bytes = Vec::new();
        write_data_block(&mut bytes, &[1., 2., 3.], 3, Representation::Binary8).unwrap();
        let mut reader = Cursor::new(bytes);
        let err = read_data_block(&mut reader, Representation::Binary8, &shape).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedDataBlock);
    }

    #[test]
    fn overflowing_shape() {
        for representation in [Representation::Text, Representation::Binary4] {
            let mut reader = Cursor::new("1 2 3\n");
            let err = read_data_block(&mut reader, representation, &[usize::MAX, 2]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidHeaderValue);
        }
    }
}
