//! # Mesh Information
//!
//! An OVF segment samples its values either on a regular 3D grid (`rectangular`) or at an
//! explicit list of points (`irregular`). Both kinds share a bounding box in `meshunit`
//! units, while the keys describing the sampling itself differ per kind. [`Mesh`] keeps
//! those differences in its variants so that the header checks can match on them
//! exhaustively.
//!
//! The mesh is also responsible for producing the coordinates of every sample when a
//! file is read, see [`Rectangular::cell_centers`] and [`Irregular::split_points`].

mod irregular;
mod rectangular;

pub use irregular::Irregular;
pub use rectangular::Rectangular;

use crate::prelude::*;
use std::fmt;
use std::str::FromStr;

/// name prefix of each axis as it appears in header keys (`xmin`, `ynodes`, ...)
pub(crate) const AXES: [&str; 3] = ["x", "y", "z"];

/// The value of the `meshtype` header key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshType {
    Rectangular,
    Irregular,
}

impl MeshType {
    /// header keys that are mandatory for this mesh type only
    pub fn required_keys(self) -> &'static [&'static str] {
        match self {
            Self::Rectangular => header::RECTANGULAR_KEYS,
            Self::Irregular => header::IRREGULAR_KEYS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangular => "rectangular",
            Self::Irregular => "irregular",
        }
    }
}

impl fmt::Display for MeshType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeshType {
    type Err = InvalidMeshType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("rectangular") {
            Ok(Self::Rectangular)
        } else if s.eq_ignore_ascii_case("irregular") {
            Ok(Self::Irregular)
        } else {
            Err(InvalidMeshType::new(s.to_string()))
        }
    }
}

/// Sampling scheme of a segment along with its mesh-specific header values
#[derive(Debug, Clone, PartialEq)]
pub enum Mesh {
    Rectangular(Rectangular),
    Irregular(Irregular),
}

impl Mesh {
    pub fn mesh_type(&self) -> MeshType {
        match self {
            Self::Rectangular(_) => MeshType::Rectangular,
            Self::Irregular(_) => MeshType::Irregular,
        }
    }
}

/// Corner points of the region covered by the mesh, in `meshunit`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}
