use crate::prelude::*;

/// An explicit list of `pointcount` sample locations
///
/// The coordinates are not part of the header: they are stored as the first three
/// columns of every record in the data block.
#[derive(Debug, Clone, PartialEq)]
pub struct Irregular {
    pub pointcount: usize,
}

impl Irregular {
    pub fn new(pointcount: usize) -> Self {
        Self { pointcount }
    }

    /// Bounding box around `points` (shape `(pointcount, 3)`), padded by half of
    /// `cellsize` on each side
    pub fn bounding_box(points: &Array2<f64>, cellsize: [f64; 3]) -> BoundingBox {
        let mut bounds = BoundingBox::default();

        for (i, column) in points.axis_iter(Axis(1)).enumerate() {
            let min = column.iter().copied().fold(f64::INFINITY, f64::min);
            let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            bounds.min[i] = min - 0.5 * cellsize[i];
            bounds.max[i] = max + 0.5 * cellsize[i];
        }

        bounds
    }

    /// Separate the stored `x`, `y`, `z` rows from the value rows of a decoded block.
    ///
    /// `rows` is the decoded block split along its leading axis, so it must hold
    /// `3 + valuedim` arrays.
    pub(crate) fn split_points(rows: Vec<ArrayD<f64>>) -> (Coordinates, Vec<ArrayD<f64>>) {
        let mut rows = rows.into_iter();
        let mut next = || rows.next().unwrap_or_else(|| ArrayD::zeros(IxDyn(&[0])));

        let coords = Coordinates {
            x: next(),
            y: next(),
            z: next(),
        };

        (coords, rows.collect())
    }
}
