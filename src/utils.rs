/// check if `line` contains `needle` ignoring ascii case. `needle` must be lowercase.
pub(crate) fn contains_ignore_case(line: &[u8], needle: &[u8]) -> bool {
    if needle.len() > line.len() {
        return false;
    }

    line.windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

/// remove a trailing `\n` or `\r\n`
pub(crate) fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// shortest representation of a float that parses back to the same value
pub(crate) fn format_float(float: f64) -> String {
    let mut buffer = ryu::Buffer::new();
    buffer.format(float).to_string()
}

#[test]
fn case_insensitive_markers() {
    assert!(contains_ignore_case(b"# Begin: Header\n", b"# begin: header"));
    assert!(contains_ignore_case(b"#  # BEGIN: DATA text", b"# begin: data"));
    assert!(!contains_ignore_case(b"# Begin:Header", b"# begin: header"));
    assert!(!contains_ignore_case(b"#", b"# begin: data"));
}

#[test]
fn floats_round_trip_through_text() {
    for float in [0.0, -0.5, 1e-9, 123456789012345.0, 0.1 + 0.2] {
        assert_eq!(format_float(float).parse::<f64>().unwrap(), float);
    }
}
