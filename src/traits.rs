//! # Traits
//!
//! Floating point widths that can appear in the binary data block of an OVF file.
//! Every binary block starts with a width-specific sentinel value that readers
//! use to check byte order and width before trusting the payload.

use num_traits::{AsPrimitive, Float};
use std::fmt;
use std::io::Write;

/// The width of the floats stored in a binary data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    Float32,
    Float64,
}

impl Precision {
    /// number of bytes used by a single value
    pub const fn width(self) -> usize {
        match self {
            Self::Float32 => <f32 as Numeric>::SIZE,
            Self::Float64 => <f64 as Numeric>::SIZE,
        }
    }

    /// look up the precision for the byte width given in a `# Begin: Data Binary N` line
    pub fn from_width(width: usize) -> Option<Self> {
        match width {
            4 => Some(Self::Float32),
            8 => Some(Self::Float64),
            _ => None,
        }
    }

    /// the sentinel value for this width, widened to `f64`
    pub fn sentinel(self) -> f64 {
        match self {
            Self::Float32 => <f32 as Numeric>::SENTINEL.as_(),
            Self::Float64 => <f64 as Numeric>::SENTINEL,
        }
    }
}

/// A float that can be stored in a binary OVF data block.
///
/// All values are little-endian on disk regardless of the host.
pub trait Numeric: Float + AsPrimitive<f64> + fmt::Debug {
    /// size of the value in bytes
    const SIZE: usize;

    /// value written at the start of every binary block of this width
    const SENTINEL: Self;

    /// narrow (or copy) a `f64` into this width
    fn from_f64(value: f64) -> Self;

    /// decode a value from exactly `Self::SIZE` little-endian bytes
    fn from_le_slice(bytes: &[u8]) -> Self;

    fn write_le<W: Write>(self, writer: &mut W) -> std::io::Result<()>;
}

impl Numeric for f32 {
    const SIZE: usize = 4;
    const SENTINEL: Self = 1234567.0;

    fn from_f64(value: f64) -> Self {
        value.as_()
    }

    fn from_le_slice(bytes: &[u8]) -> Self {
        let mut arr = [0; 4];
        arr.copy_from_slice(&bytes[..4]);
        f32::from_le_bytes(arr)
    }

    fn write_le<W: Write>(self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_le_bytes())
    }
}

impl Numeric for f64 {
    const SIZE: usize = 8;
    const SENTINEL: Self = 123456789012345.0;

    fn from_f64(value: f64) -> Self {
        value
    }

    fn from_le_slice(bytes: &[u8]) -> Self {
        let mut arr = [0; 8];
        arr.copy_from_slice(&bytes[..8]);
        f64::from_le_bytes(arr)
    }

    fn write_le<W: Write>(self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_le_bytes())
    }
}
