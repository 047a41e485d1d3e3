use crate::prelude::*;
use log::trace;
use num_traits::AsPrimitive;
use std::io::Read;

/// Check the sentinel and read `count` little-endian values of width `T`.
pub(super) fn read_values<T: Numeric, R: BufRead>(
    reader: &mut R,
    count: usize,
) -> Result<Vec<f64>, Error> {
    check_sentinel::<T, R>(reader, count)?;

    // grows with the bytes actually present, never with the declared count
    let length = count.saturating_mul(T::SIZE);
    let mut buffer = Vec::new();
    reader.by_ref().take(length as u64).read_to_end(&mut buffer)?;

    if buffer.len() < length {
        return Err(ParseError::from(TruncatedDataBlock::new(count, buffer.len() / T::SIZE)).into());
    }

    let values = buffer
        .chunks_exact(T::SIZE)
        .map(|bytes| T::from_le_slice(bytes).as_())
        .collect();

    Ok(values)
}

fn check_sentinel<T: Numeric, R: BufRead>(reader: &mut R, count: usize) -> Result<(), Error> {
    let mut bytes = [0; 8];
    let bytes = &mut bytes[..T::SIZE];

    match reader.read_exact(bytes) {
        Ok(()) => (),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(ParseError::from(TruncatedDataBlock::new(count, 0)).into())
        }
        Err(e) => return Err(e.into()),
    }

    let found = T::from_le_slice(bytes);
    trace!("binary check value for {} byte data: {:?}", T::SIZE, found);

    if found != T::SENTINEL {
        let alignment = BinaryAlignment::new(T::SIZE, T::SENTINEL.as_(), found.as_());
        return Err(ParseError::from(alignment).into());
    }

    Ok(())
}

/// Write the sentinel of `T`, then every value narrowed to `T`, then the newline that
/// separates the payload from the closing markers.
pub(super) fn write_values<T: Numeric, W: Write>(
    writer: &mut W,
    values: &[f64],
) -> std::io::Result<()> {
    T::SENTINEL.write_le(writer)?;

    for value in values {
        T::from_f64(*value).write_le(writer)?;
    }

    writer.write_all(b"\n")
}
