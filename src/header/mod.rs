//! # Header
//!
//! The textual header of an OVF segment is a list of `# key: value` lines. Keys are
//! case-insensitive, `##` starts a comment anywhere on a line, and `desc` may repeat.
//!
//! [`Header`] is the typed form of that list. Which keys are mandatory depends on the
//! `meshtype`, so the mesh specific values live in [`Mesh`](crate::Mesh):
//!
//! ```text
//! # Begin: Header
//! # Title: Long file name or title goes here
//! # Desc: Optional description line 1.
//! # meshunit: nm
//! # meshtype: irregular
//! # pointcount: 5      ## Number of nodes in mesh
//! # xmin:    1.
//! ...
//! # valuedim: 2
//! # valueunits:  J/m^3  A/m
//! # valuelabels: "Zeeman energy density"  "Anisotropy field"
//! # End: Header
//! ```

mod parse;
mod write;

pub use parse::parse_header_lines;
pub(crate) use parse::RawHeader;

use crate::prelude::*;

/// expected value reported when a declared data block is larger than memory can address
pub(crate) const DATA_SIZE_LIMIT: &str = "a data block whose size fits in a usize";

/// keys that every header must contain, regardless of the mesh type
pub const REQUIRED_KEYS: &[&str] = &[
    "title",
    "meshunit",
    "meshtype",
    "xmin",
    "ymin",
    "zmin",
    "xmax",
    "ymax",
    "zmax",
    "valuedim",
    "valueunits",
    "valuelabels",
];

/// keys that are additionally required when `meshtype` is `rectangular`
pub const RECTANGULAR_KEYS: &[&str] = &[
    "xbase",
    "ybase",
    "zbase",
    "xstepsize",
    "ystepsize",
    "zstepsize",
    "xnodes",
    "ynodes",
    "znodes",
];

/// keys that are additionally required when `meshtype` is `irregular`
pub const IRREGULAR_KEYS: &[&str] = &["pointcount"];

/// The optional, repeatable description key
pub const DESC_KEY: &str = "desc";

/// whether `key` (lowercase) is part of the OVF 2.0 header vocabulary
pub fn is_recognized_key(key: &str) -> bool {
    key == DESC_KEY
        || REQUIRED_KEYS.contains(&key)
        || RECTANGULAR_KEYS.contains(&key)
        || IRREGULAR_KEYS.contains(&key)
}

/// Typed contents of an OVF 2.0 segment header
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub title: String,
    /// description lines in file order
    pub desc: Vec<String>,
    pub meshunit: String,
    pub bounds: BoundingBox,
    pub mesh: Mesh,
    /// number of components stored for every sample
    pub valuedim: usize,
    /// one unit per component
    pub valueunits: Vec<String>,
    /// one label per component, used as the key of the decoded arrays
    pub valuelabels: Vec<String>,
    /// `(key, value)` pairs that are not part of OVF 2.0. They are reported with
    /// `log::warn!` when read and never written back out.
    pub unrecognized: Vec<(String, String)>,
}

impl Header {
    pub fn mesh_type(&self) -> MeshType {
        self.mesh.mesh_type()
    }

    /// Logical shape of the data block, first axis varying fastest on disk.
    ///
    /// `(valuedim, xnodes, ynodes, znodes)` for rectangular meshes and
    /// `(3 + valuedim, pointcount)` for irregular meshes.
    pub fn data_shape(&self) -> Vec<usize> {
        match &self.mesh {
            Mesh::Rectangular(rect) => {
                let [nx, ny, nz] = rect.nodes;
                vec![self.valuedim, nx, ny, nz]
            }
            Mesh::Irregular(irregular) => {
                vec![self.valuedim.saturating_add(3), irregular.pointcount]
            }
        }
    }

    /// Number of floats stored in the data block, `None` if it does not fit in a `usize`
    pub fn data_len(&self) -> Option<usize> {
        let rows = match &self.mesh {
            Mesh::Rectangular(_) => Some(self.valuedim),
            Mesh::Irregular(_) => self.valuedim.checked_add(3),
        };

        self.data_shape()
            .iter()
            .skip(1)
            .try_fold(rows?, |len, n| len.checked_mul(*n))
    }
}

/// Expand `valueunits` to one entry per component.
///
/// A single unit applies to every component. Any count other than 1 or `valuedim`
/// is ambiguous and rejected.
pub(crate) fn broadcast_valueunits(
    units: Vec<String>,
    valuedim: usize,
) -> Result<Vec<String>, LabelCountMismatch> {
    match units.len() {
        n if n == valuedim => Ok(units),
        1 => Ok(vec![units[0].clone(); valuedim]),
        found => Err(LabelCountMismatch::new("valueunits", valuedim, found)),
    }
}

pub(crate) fn check_valuelabels(
    labels: Vec<String>,
    valuedim: usize,
) -> Result<Vec<String>, LabelCountMismatch> {
    if labels.len() == valuedim {
        Ok(labels)
    } else {
        Err(LabelCountMismatch::new("valuelabels", valuedim, labels.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_unit_is_broadcast() {
        let out = broadcast_valueunits(units(&["A/m"]), 3).unwrap();
        assert_eq!(out, units(&["A/m", "A/m", "A/m"]));
    }

    #[test]
    fn full_unit_list_is_kept() {
        let out = broadcast_valueunits(units(&["J/m^3", "A/m", "1"]), 3).unwrap();
        assert_eq!(out, units(&["J/m^3", "A/m", "1"]));
    }

    #[test]
    fn partial_unit_list_is_rejected() {
        let err = broadcast_valueunits(units(&["J/m^3", "A/m"]), 3).unwrap_err();
        assert_eq!(err, LabelCountMismatch::new("valueunits", 3, 2));

        let err = broadcast_valueunits(vec![], 2).unwrap_err();
        assert_eq!(err.found, 0);
    }

    #[test]
    fn labels_must_match_valuedim() {
        assert!(check_valuelabels(units(&["m_x", "m_y"]), 2).is_ok());
        let err = check_valuelabels(units(&["m_x"]), 2).unwrap_err();
        assert_eq!(err.field, "valuelabels");
    }

    #[test]
    fn recognized_vocabulary() {
        assert!(is_recognized_key("desc"));
        assert!(is_recognized_key("pointcount"));
        assert!(is_recognized_key("zbase"));
        assert!(!is_recognized_key("segment count"));
    }
}
