use crate::prelude::*;
use crate::write_ovf::InvalidCoordinates;

/// A regular grid of `xnodes * ynodes * znodes` cells
///
/// `base` is the position of the first sample (the center of the first cell), not the
/// corner of the bounding box. `stepsize` is the distance between adjacent samples along
/// each axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangular {
    pub base: [f64; 3],
    pub stepsize: [f64; 3],
    pub nodes: [usize; 3],
}

impl Rectangular {
    pub fn new(base: [f64; 3], stepsize: [f64; 3], nodes: [usize; 3]) -> Self {
        Self {
            base,
            stepsize,
            nodes,
        }
    }

    /// Build the grid from the coordinates of the samples along each axis.
    ///
    /// The first sample of each axis becomes `base` and the absolute difference of
    /// the first two samples becomes the stepsize. Axes with a single sample take their
    /// stepsize from `cellsize`, or `1.0` without one.
    pub(crate) fn from_axis_coordinates(
        axes: [&[f64]; 3],
        cellsize: Option<[f64; 3]>,
    ) -> Result<Self, InvalidCoordinates> {
        let mut base = [0.; 3];
        let mut stepsize = [0.; 3];
        let mut nodes = [0; 3];

        for (i, coords) in axes.iter().enumerate() {
            base[i] = coords[0];
            nodes[i] = coords.len();
            stepsize[i] = match coords {
                [first, second, ..] => check_stepsize(
                    i,
                    (second - first).abs(),
                    "the first two coordinates must be finite and distinct",
                )?,
                _ => match cellsize {
                    Some(cell) => check_stepsize(i, cell[i], CELLSIZE_REASON)?,
                    None => 1.,
                },
            };
        }

        Ok(Self::new(base, stepsize, nodes))
    }

    /// Grid whose first sample sits at `origin`, with `cellsize` between samples.
    pub(crate) fn from_cellsize(
        origin: [f64; 3],
        cellsize: [f64; 3],
        nodes: [usize; 3],
    ) -> Result<Self, InvalidCoordinates> {
        for (i, cell) in cellsize.iter().enumerate() {
            check_stepsize(i, *cell, CELLSIZE_REASON)?;
        }

        Ok(Self::new(origin, cellsize, nodes))
    }

    /// The bounding box implied by `base` and `stepsize`: half a cell beyond the
    /// first and last sample along each axis
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bounds = BoundingBox::default();

        for i in 0..3 {
            bounds.min[i] = self.base[i] - 0.5 * self.stepsize[i];
            bounds.max[i] = self.base[i] + (self.nodes[i] as f64 - 0.5) * self.stepsize[i];
        }

        bounds
    }

    /// Coordinates of every cell center, each array with shape `(xnodes, ynodes, znodes)`.
    ///
    /// Positions are computed as `min + stepsize * (index + 0.5)` from the bounding box
    /// minimum, never from `base`. A file whose `base` is not exactly half a step above
    /// `min` reads back with shifted coordinates.
    pub fn cell_centers(&self, bounds: &BoundingBox) -> Coordinates {
        let [nx, ny, nz] = self.nodes;
        let axis = |i: usize, index: usize| {
            bounds.min[i] + self.stepsize[i] * (0.5 + index as f64)
        };

        let x = Array3::from_shape_fn((nx, ny, nz), |(i, _, _)| axis(0, i));
        let y = Array3::from_shape_fn((nx, ny, nz), |(_, j, _)| axis(1, j));
        let z = Array3::from_shape_fn((nx, ny, nz), |(_, _, k)| axis(2, k));

        Coordinates {
            x: x.into_dyn(),
            y: y.into_dyn(),
            z: z.into_dyn(),
        }
    }
}

const CELLSIZE_REASON: &str = "cellsize must be finite and positive";

fn check_stepsize(i: usize, stepsize: f64, reason: &'static str) -> Result<f64, InvalidCoordinates> {
    if stepsize.is_finite() && stepsize > 0. {
        Ok(stepsize)
    } else {
        Err(InvalidCoordinates::new(mesh::AXES[i], reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_centers_start_half_a_step_in() {
        let mesh = Rectangular::new([0.; 3], [1.; 3], [2, 1, 1]);
        let bounds = BoundingBox {
            min: [-0.5; 3],
            max: [1.5, 0.5, 0.5],
        };

        let coords = mesh.cell_centers(&bounds);
        assert_eq!(coords.x.shape(), &[2, 1, 1]);
        assert_eq!(coords.x.iter().copied().collect::<Vec<_>>(), vec![0.0, 1.0]);
        assert_eq!(coords.y.iter().copied().collect::<Vec<_>>(), vec![0.0, 0.0]);
    }

    #[test]
    fn coordinates_come_from_min_not_base() {
        // base is inconsistent with min: the reader trusts min
        let mesh = Rectangular::new([10.; 3], [2.; 3], [1, 1, 3]);
        let bounds = BoundingBox {
            min: [0.; 3],
            max: [2., 2., 6.],
        };

        let coords = mesh.cell_centers(&bounds);
        let z: Vec<f64> = coords.z.iter().copied().collect();
        assert_eq!(z, vec![1., 3., 5.]);
    }

    #[test]
    fn bounding_box_pads_half_a_cell() {
        let mesh = Rectangular::new([1., 0., -2.], [0.5, 1., 2.], [3, 2, 1]);
        let bounds = mesh.bounding_box();
        assert_eq!(bounds.min, [0.75, -0.5, -3.]);
        assert_eq!(bounds.max, [2.25, 1.5, -1.]);
    }

    #[test]
    fn spacing_from_axis_coordinates() {
        let x = [3., 1., -1.];
        let y = [0.];
        let z = [0., 0.25];

        let mesh = Rectangular::from_axis_coordinates([&x[..], &y[..], &z[..]], None).unwrap();
        assert_eq!(mesh.base, [3., 0., 0.]);
        assert_eq!(mesh.stepsize, [2., 1., 0.25]);
        assert_eq!(mesh.nodes, [3, 1, 2]);

        let mesh = Rectangular::from_axis_coordinates([&x[..], &y[..], &z[..]], Some([9., 7., 9.])).unwrap();
        assert_eq!(mesh.stepsize[1], 7.);
    }

    #[test]
    fn repeated_coordinates_are_rejected() {
        let x = [1., 1.];
        let err = Rectangular::from_axis_coordinates([&x[..], &[0.][..], &[0.][..]], None).unwrap_err();
        assert_eq!(err.axis, "x");

        let z = [0., f64::NAN];
        let err = Rectangular::from_axis_coordinates([&[0.][..], &[0.][..], &z[..]], None).unwrap_err();
        assert_eq!(err.axis, "z");
    }

    #[test]
    fn cellsize_must_be_a_usable_distance() {
        let single = [0.];
        let axes = [&single[..], &single[..], &single[..]];
        for (cellsize, axis) in [
            ([0., 1., 1.], "x"),
            ([1., f64::INFINITY, 1.], "y"),
            ([1., 1., f64::NAN], "z"),
            ([1., -2., 1.], "y"),
        ] {
            let err = Rectangular::from_axis_coordinates(axes, Some(cellsize)).unwrap_err();
            assert_eq!(err.axis, axis);

            let err = Rectangular::from_cellsize([0.; 3], cellsize, [1; 3]).unwrap_err();
            assert_eq!(err.axis, axis);
            assert_eq!(err.reason, CELLSIZE_REASON);
        }

        let mesh = Rectangular::from_cellsize([1.; 3], [2e-9; 3], [4, 4, 1]).unwrap();
        assert_eq!(mesh.stepsize, [2e-9; 3]);
    }
}
