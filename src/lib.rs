#![doc = include_str!("../README.md")]

pub mod array;
mod data;
pub mod header;
pub mod mesh;
pub mod parse;
pub mod prelude;
mod traits;
mod utils;
mod write_ovf;

pub use array::Representation;
pub use data::{Coordinates, Fields, OvfData};
pub use header::Header;
pub use mesh::{BoundingBox, Irregular, Mesh, MeshType, Rectangular};
pub use parse::{parse_ovf_document, read_ovf, ParseError};
pub use traits::{Numeric, Precision};
pub use write_ovf::{write_ovf, write_ovf_irregular, write_ovf_rectangular};
pub use write_ovf::{InvalidCoordinates, InvalidHeaderText, InvalidShape, WriteError};
pub use write_ovf::{IrregularOptions, RectangularOptions};

pub use ndarray;

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("An io error occured: `{0}`")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error("Could not convert a header line to utf8: `{0}`")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// the category of this error, independent of its detail message
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::Parse(e) => e.kind(),
            Self::Write(e) => e.kind(),
            Self::Utf8(_) => ErrorKind::Utf8,
        }
    }
}

/// Every way reading or writing a file can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Io,
    Utf8,
    UnsupportedVersion,
    HeaderNotFound,
    HeaderUnterminated,
    DataBlockNotFound,
    MissingHeaderKey,
    InvalidMeshType,
    InvalidHeaderValue,
    LabelCountMismatch,
    UnsupportedRepresentation,
    BinaryAlignment,
    TruncatedDataBlock,
    MalformedDataValue,
    InvalidShape,
    InvalidCoordinates,
    InvalidHeaderText,
    Quote,
}
