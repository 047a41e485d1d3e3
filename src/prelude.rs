//! Common traits and types that are useful for working with `ovf2`
#![allow(unused_imports)]

pub use crate::array::Representation;
pub use crate::data::{Coordinates, Fields, OvfData};
pub use crate::header::Header;
pub use crate::mesh::{BoundingBox, Irregular, Mesh, MeshType, Rectangular};
pub use crate::traits::{Numeric, Precision};
pub use crate::write_ovf::{IrregularOptions, RectangularOptions};

pub(crate) use crate::parse::error::*;
pub(crate) use crate::write_ovf::WriteError;
pub(crate) use crate::{Error, ErrorKind};

pub(crate) use crate::{array, header, mesh, parse, utils};

pub(crate) use derive_more::{Constructor, Deref};

pub(crate) use ndarray::{Array2, Array3, ArrayD, Axis, IxDyn};
pub(crate) use std::io::{BufRead, Write};
