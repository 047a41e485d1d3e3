//! reading and parsing OVF 2.0 files
//!
//! A file is processed as a stream of lines up to the `# Begin: Data` marker, after which
//! the data block is decoded in one go. Only the first segment of a file is read.

pub mod error;

pub use error::ParseError;

use crate::prelude::*;
use crate::utils::{contains_ignore_case, trim_line_ending};
use log::debug;
use std::io::BufReader;
use std::path::Path;

/// read in and parse an entire OVF 2.0 file for a given path
///
/// ```no_run
/// let file = ovf2::read_ovf("relaxed.ovf").unwrap();
/// let m_x = &file.data["m_x"];
/// println!("{} {:?}", file.metadata.title, m_x.shape());
/// ```
pub fn read_ovf<P: AsRef<Path>>(path: P) -> Result<OvfData, Error> {
    let path = path.as_ref();
    debug!("reading OVF file {}", path.display());

    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);
    parse_ovf_document(reader)
}

/// Parse an OVF 2.0 document from any buffered reader.
///
/// The reader is consumed up to the end of the data block; the closing marker lines and
/// anything after them are not inspected.
pub fn parse_ovf_document<R: BufRead>(mut reader: R) -> Result<OvfData, Error> {
    let mut line = Vec::new();

    read_version_line(&mut reader, &mut line)?;
    skip_to_marker(&mut reader, &mut line, b"# begin: header", ParseError::HeaderNotFound)?;
    debug!("found the start of the header");

    let metadata = read_header(&mut reader, &mut line)?;
    debug!(
        "parsed {} header with data shape {:?}",
        metadata.mesh_type(),
        metadata.data_shape()
    );

    skip_to_marker(&mut reader, &mut line, b"# begin: data", ParseError::DataBlockNotFound)?;
    let representation =
        Representation::from_marker_line(&String::from_utf8_lossy(trim_line_ending(&line)))
            .map_err(ParseError::from)?;
    debug!("found {} data block", representation);

    let block = array::read_data_block(&mut reader, representation, &metadata.data_shape())?;
    let rows = array::split_rows(&block);
    debug!("decoded {} values", block.len());

    let (coords, values) = match &metadata.mesh {
        Mesh::Rectangular(rect) => (rect.cell_centers(&metadata.bounds), rows),
        Mesh::Irregular(_) => Irregular::split_points(rows),
    };

    let data = metadata
        .valuelabels
        .iter()
        .cloned()
        .zip(values)
        .collect::<Fields>();

    Ok(OvfData::new(data, coords, metadata, representation))
}

/// the first line must mention version 2.0
fn read_version_line<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> Result<(), Error> {
    line.clear();
    reader.read_until(b'\n', line)?;

    if !contains_ignore_case(line, b"2.0") {
        let first_line = String::from_utf8_lossy(trim_line_ending(line)).into_owned();
        return Err(ParseError::from(UnsupportedVersion::new(first_line)).into());
    }

    Ok(())
}

/// Discard lines until one containing `marker` (lowercase) is read. That line is left
/// in `line`.
fn skip_to_marker<R: BufRead>(
    reader: &mut R,
    line: &mut Vec<u8>,
    marker: &[u8],
    not_found: ParseError,
) -> Result<(), Error> {
    loop {
        line.clear();
        if reader.read_until(b'\n', line)? == 0 {
            return Err(not_found.into());
        }

        if contains_ignore_case(line, marker) {
            return Ok(());
        }
    }
}

fn read_header<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> Result<Header, Error> {
    let mut raw = header::RawHeader::default();

    loop {
        line.clear();
        if reader.read_until(b'\n', line)? == 0 {
            return Err(ParseError::HeaderUnterminated.into());
        }

        let text = String::from_utf8(trim_line_ending(line).to_vec())?;

        if raw.push_line(&text) {
            return Ok(raw.finish()?);
        }
    }
}
