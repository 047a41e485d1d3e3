use crate::prelude::*;

/// Reasons an OVF file could not be read
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    UnsupportedVersion(#[from] UnsupportedVersion),
    #[error("reached the end of the file before finding a `# Begin: Header` line")]
    HeaderNotFound,
    #[error("reached the end of the file before finding a `# End: Header` line")]
    HeaderUnterminated,
    #[error("reached the end of the file before finding a `# Begin: Data` line")]
    DataBlockNotFound,
    #[error(transparent)]
    MissingHeaderKey(#[from] MissingHeaderKeys),
    #[error(transparent)]
    InvalidMeshType(#[from] InvalidMeshType),
    #[error(transparent)]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
    #[error(transparent)]
    LabelCountMismatch(#[from] LabelCountMismatch),
    #[error(transparent)]
    UnsupportedRepresentation(#[from] UnsupportedRepresentation),
    #[error(transparent)]
    BinaryAlignment(#[from] BinaryAlignment),
    #[error(transparent)]
    TruncatedDataBlock(#[from] TruncatedDataBlock),
    #[error(transparent)]
    MalformedDataValue(#[from] MalformedDataValue),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
            Self::HeaderNotFound => ErrorKind::HeaderNotFound,
            Self::HeaderUnterminated => ErrorKind::HeaderUnterminated,
            Self::DataBlockNotFound => ErrorKind::DataBlockNotFound,
            Self::MissingHeaderKey(_) => ErrorKind::MissingHeaderKey,
            Self::InvalidMeshType(_) => ErrorKind::InvalidMeshType,
            Self::InvalidHeaderValue(_) => ErrorKind::InvalidHeaderValue,
            Self::LabelCountMismatch(_) => ErrorKind::LabelCountMismatch,
            Self::UnsupportedRepresentation(_) => ErrorKind::UnsupportedRepresentation,
            Self::BinaryAlignment(_) => ErrorKind::BinaryAlignment,
            Self::TruncatedDataBlock(_) => ErrorKind::TruncatedDataBlock,
            Self::MalformedDataValue(_) => ErrorKind::MalformedDataValue,
        }
    }
}

#[derive(Debug, Constructor, thiserror::Error)]
#[error("the first line `{first_line}` does not declare OVF 2.0; older OVF versions are not supported")]
pub struct UnsupportedVersion {
    first_line: String,
}

/// Every mandatory key absent from the header, in the order they are checked
#[derive(Debug, Constructor, thiserror::Error)]
#[error("required header key(s) not found: {}", .keys.join(", "))]
pub struct MissingHeaderKeys {
    keys: Vec<&'static str>,
}

impl MissingHeaderKeys {
    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }
}

#[derive(Debug, Constructor, thiserror::Error)]
#[error("meshtype `{found}` is not understood, expected `rectangular` or `irregular`")]
pub struct InvalidMeshType {
    pub(crate) found: String,
}

#[derive(Debug, Constructor, thiserror::Error)]
#[error("header key `{key}` has value `{value}`, expected {expected}")]
pub struct InvalidHeaderValue {
    pub(crate) key: &'static str,
    pub(crate) value: String,
    pub(crate) expected: &'static str,
}

/// `valuelabels` / `valueunits` do not line up with `valuedim`
#[derive(Debug, Constructor, thiserror::Error, PartialEq)]
#[error("`{field}` has {found} entries but valuedim is {valuedim}")]
pub struct LabelCountMismatch {
    pub field: &'static str,
    pub valuedim: usize,
    pub found: usize,
}

#[derive(Debug, Constructor, thiserror::Error)]
#[error("data representation `{found}` is not supported, expected text, binary 4, or binary 8")]
pub struct UnsupportedRepresentation {
    pub(crate) found: String,
}

#[derive(Debug, Constructor, thiserror::Error)]
#[error(
    "binary check value for {width} byte data was {found}, expected {expected}. \
     The data block has the wrong byte order, width, or is corrupted"
)]
pub struct BinaryAlignment {
    width: usize,
    expected: f64,
    found: f64,
}

#[derive(Debug, Constructor, thiserror::Error, PartialEq)]
#[error("data block ended after {found} values, the header requires {expected}")]
pub struct TruncatedDataBlock {
    pub expected: usize,
    pub found: usize,
}

#[derive(Debug, Constructor, thiserror::Error)]
#[error("could not parse `{token}` in the text data block as a number")]
pub struct MalformedDataValue {
    token: String,
}
