use crate::prelude::*;

/// upper bound on the values reserved up front, the header count is not trusted
const INITIAL_CAPACITY: usize = 1 << 16;

/// Read `count` whitespace separated decimal values. `#` comments out the rest of a line.
pub(super) fn read_values<R: BufRead>(reader: &mut R, count: usize) -> Result<Vec<f64>, Error> {
    let mut values = Vec::with_capacity(count.min(INITIAL_CAPACITY));
    let mut line = Vec::new();

    while values.len() < count {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Err(ParseError::from(TruncatedDataBlock::new(count, values.len())).into());
        }

        let content = match line.iter().position(|byte| *byte == b'#') {
            Some(idx) => &line[..idx],
            None => &line[..],
        };

        for token in content
            .split(|byte| byte.is_ascii_whitespace())
            .filter(|token| !token.is_empty())
        {
            if values.len() == count {
                break;
            }

            values.push(parse_token(token)?);
        }
    }

    Ok(values)
}

fn parse_token(token: &[u8]) -> Result<f64, ParseError> {
    std::str::from_utf8(token)
        .ok()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| MalformedDataValue::new(String::from_utf8_lossy(token).into_owned()).into())
}

/// one line per record, values separated by a single space
pub(super) fn write_values<W: Write>(
    writer: &mut W,
    values: &[f64],
    record_len: usize,
) -> std::io::Result<()> {
    let mut buffer = ryu::Buffer::new();

    for record in values.chunks(record_len.max(1)) {
        for (i, value) in record.iter().enumerate() {
            if i > 0 {
                writer.write_all(b" ")?;
            }
            writer.write_all(buffer.format(*value).as_bytes())?;
        }
        writer.write_all(b"\n")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn comments_and_line_breaks_are_ignored() {
        let text = "# leading comment\n1.5 2 ## trailing\n\n  -3e2\t4.\n# End: Data text\n";
        let values = read_values(&mut Cursor::new(text), 4).unwrap();
        assert_eq!(values, vec![1.5, 2., -300., 4.]);
    }

    #[test]
    fn stops_after_count_values() {
        let mut reader = Cursor::new("1 2 3\n4 5 6\n# End: Data text\n");
        let values = read_values(&mut reader, 4).unwrap();
        assert_eq!(values, vec![1., 2., 3., 4.]);
    }

    #[test]
    fn bad_token() {
        let err = read_values(&mut Cursor::new("1 two 3\n"), 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDataValue);
        assert!(err.to_string().contains("`two`"));
    }

    #[test]
    fn too_few_values() {
        let err = read_values(&mut Cursor::new("1 2\n# End: Data text\n"), 3).unwrap_err();
        match err {
            Error::Parse(ParseError::TruncatedDataBlock(truncated)) => {
                assert_eq!(truncated, TruncatedDataBlock::new(3, 2))
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn records_are_lines() {
        let mut out = Vec::new();
        write_values(&mut out, &[0., 1., 2.5, -1e-7], 2).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "0.0 1.0\n2.5 -1e-7\n");

        let values = read_values(&mut Cursor::new(text), 4).unwrap();
        assert_eq!(values, vec![0., 1., 2.5, -1e-7]);
    }
}
