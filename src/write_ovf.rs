use crate::prelude::*;
use log::debug;
use ndarray::{ArrayBase, Data, Dimension, Ix2, Ix4};
use std::io::BufWriter;

/// Reasons an array could not be written as an OVF file. Nothing is written to the
/// sink when one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    InvalidShape(#[from] InvalidShape),
    #[error(transparent)]
    UnsupportedRepresentation(#[from] UnsupportedRepresentation),
    #[error(transparent)]
    LabelCountMismatch(#[from] LabelCountMismatch),
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),
    #[error(transparent)]
    InvalidHeaderText(#[from] InvalidHeaderText),
    #[error("`{field}` cannot be written as a shell-quoted list: {source}")]
    Quote {
        field: &'static str,
        source: shlex::QuoteError,
    },
}

impl WriteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidShape(_) => ErrorKind::InvalidShape,
            Self::UnsupportedRepresentation(_) => ErrorKind::UnsupportedRepresentation,
            Self::LabelCountMismatch(_) => ErrorKind::LabelCountMismatch,
            Self::InvalidCoordinates(_) => ErrorKind::InvalidCoordinates,
            Self::InvalidHeaderText(_) => ErrorKind::InvalidHeaderText,
            Self::Quote { .. } => ErrorKind::Quote,
        }
    }
}

#[derive(Debug, Constructor, thiserror::Error)]
#[error("`{argument}` has shape {found:?}, expected {expected}")]
pub struct InvalidShape {
    argument: &'static str,
    expected: String,
    found: Vec<usize>,
}

#[derive(Debug, Constructor, thiserror::Error)]
#[error("invalid coordinates along `{axis}`: {reason}")]
pub struct InvalidCoordinates {
    pub(crate) axis: &'static str,
    pub(crate) reason: &'static str,
}

/// A header value that would not survive being written on a single `# key: value` line
#[derive(Debug, Constructor, thiserror::Error)]
#[error("`{field}` value {value:?} contains {found}, which cannot be stored in a header line")]
pub struct InvalidHeaderText {
    pub(crate) field: &'static str,
    pub(crate) value: String,
    pub(crate) found: &'static str,
}

/// Options for [`write_ovf_rectangular`]
///
/// ```
/// let options = ovf2::RectangularOptions {
///     cellsize: Some([5e-9, 5e-9, 10e-9]),
///     valuelabels: vec!["m_x".into(), "m_y".into(), "m_z".into()],
///     ..Default::default()
/// };
/// assert_eq!(options.title, "title");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RectangularOptions {
    /// position of the first sample, not the corner of the bounding box.
    /// Ignored when `x`, `y` and `z` are given.
    pub origin: [f64; 3],
    /// Distance between adjacent samples. Without it (and without `x`, `y`, `z`) a unit
    /// spacing is used and `meshunit` becomes `pt`.
    pub cellsize: Option<[f64; 3]>,
    /// Sample coordinates along each axis. Either all three or none must be given; the
    /// origin and spacing are taken from the first two samples of each.
    pub x: Option<Vec<f64>>,
    pub y: Option<Vec<f64>>,
    pub z: Option<Vec<f64>>,
    pub title: String,
    /// description lines, written after a line naming this crate
    pub desc: Vec<String>,
    pub meshunit: String,
    /// one unit for every component, or a single unit shared by all of them. Empty
    /// gives `1` for every component.
    pub valueunits: Vec<String>,
    /// one label per component. Empty gives `value_0`, `value_1`, ...
    pub valuelabels: Vec<String>,
    pub representation: Representation,
}

impl Default for RectangularOptions {
    fn default() -> Self {
        Self {
            origin: [0.; 3],
            cellsize: None,
            x: None,
            y: None,
            z: None,
            title: "title".into(),
            desc: Vec::new(),
            meshunit: "m".into(),
            valueunits: Vec::new(),
            valuelabels: Vec::new(),
            representation: Representation::default(),
        }
    }
}

/// Options for [`write_ovf_irregular`]
#[derive(Debug, Clone, PartialEq)]
pub struct IrregularOptions {
    /// Location of every sample, shape `(pointcount, 3)`. Without it the points are
    /// `(index, 0, 0)`, `cellsize` is `(1, 1, 1)` and `meshunit` becomes `pt`.
    pub points: Option<Array2<f64>>,
    /// display hint, pads the bounding box by half a cell on each side
    pub cellsize: [f64; 3],
    pub title: String,
    pub desc: Vec<String>,
    pub meshunit: String,
    pub valueunits: Vec<String>,
    pub valuelabels: Vec<String>,
    pub representation: Representation,
}

impl Default for IrregularOptions {
    fn default() -> Self {
        Self {
            points: None,
            cellsize: [0.; 3],
            title: "title".into(),
            desc: Vec::new(),
            meshunit: "m".into(),
            valueunits: Vec::new(),
            valuelabels: Vec::new(),
            representation: Representation::default(),
        }
    }
}

/// Write values sampled on a regular grid.
///
/// `data` has the shape `(xnodes, ynodes, znodes, valuedim)`. All arguments are
/// validated before anything is written to `writer`.
///
/// ```
/// use ovf2::ndarray::Array4;
///
/// let data = Array4::<f64>::zeros((4, 3, 2, 3));
/// let mut file = Vec::new();
/// ovf2::write_ovf_rectangular(&data, &mut file, &Default::default()).unwrap();
///
/// let read = ovf2::parse_ovf_document(file.as_slice()).unwrap();
/// assert_eq!(read.metadata.meshunit, "pt");
/// assert_eq!(read.data["value_2"].shape(), &[4, 3, 2]);
/// ```
pub fn write_ovf_rectangular<W, S, D>(
    data: &ArrayBase<S, D>,
    writer: W,
    options: &RectangularOptions,
) -> Result<(), Error>
where
    W: Write,
    S: Data<Elem = f64>,
    D: Dimension,
{
    let data = data
        .view()
        .into_dimensionality::<Ix4>()
        .map_err(|_| rectangular_shape(data.shape()))?;

    if data.shape().contains(&0) {
        return Err(rectangular_shape(data.shape()).into());
    }

    let (nx, ny, nz, valuedim) = data.dim();

    let (rect, meshunit) = match (&options.x, &options.y, &options.z) {
        (Some(x), Some(y), Some(z)) => {
            for (axis, (coords, n)) in mesh::AXES.iter().zip([(x, nx), (y, ny), (z, nz)]) {
                if coords.len() != n {
                    return Err(WriteError::from(InvalidShape::new(
                        *axis,
                        format!("{} coordinates to match the data", n),
                        vec![coords.len()],
                    ))
                    .into());
                }
            }

            let axes = [x.as_slice(), y.as_slice(), z.as_slice()];
            let rect = Rectangular::from_axis_coordinates(axes, options.cellsize)
                .map_err(WriteError::from)?;
            (rect, options.meshunit.clone())
        }
        (None, None, None) => match options.cellsize {
            Some(cellsize) => (
                Rectangular::from_cellsize(options.origin, cellsize, [nx, ny, nz])
                    .map_err(WriteError::from)?,
                options.meshunit.clone(),
            ),
            None => (
                Rectangular::new(options.origin, [1.; 3], [nx, ny, nz]),
                "pt".to_string(),
            ),
        },
        _ => {
            return Err(WriteError::from(InvalidCoordinates::new(
                "x, y, z",
                "either all of the axis coordinates or none of them must be given",
            ))
            .into())
        }
    };

    let header = Header {
        title: options.title.clone(),
        desc: generated_desc(&options.desc),
        meshunit,
        bounds: rect.bounding_box(),
        mesh: Mesh::Rectangular(rect),
        valuedim,
        valueunits: default_valueunits(&options.valueunits, valuedim)?,
        valuelabels: default_valuelabels(&options.valuelabels, valuedim)?,
        unrecognized: Vec::new(),
    };

    // one record per grid point, x varying fastest
    let mut values = Vec::with_capacity(data.len());
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                for c in 0..valuedim {
                    values.push(data[[i, j, k, c]]);
                }
            }
        }
    }

    write_segment(writer, &header, &values, valuedim, options.representation)
}

/// Write values sampled at an explicit list of points.
///
/// `data` has the shape `(pointcount, valuedim)`. The points are stored in front of the
/// values of each record.
pub fn write_ovf_irregular<W, S, D>(
    data: &ArrayBase<S, D>,
    writer: W,
    options: &IrregularOptions,
) -> Result<(), Error>
where
    W: Write,
    S: Data<Elem = f64>,
    D: Dimension,
{
    let data = data
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| irregular_shape(data.shape()))?;

    if data.shape().contains(&0) {
        return Err(irregular_shape(data.shape()).into());
    }

    let (pointcount, valuedim) = data.dim();

    let (points, cellsize, meshunit) = match &options.points {
        Some(points) if points.dim() == (pointcount, 3) => {
            (points.clone(), options.cellsize, options.meshunit.clone())
        }
        Some(points) => {
            return Err(WriteError::from(InvalidShape::new(
                "points",
                format!("({}, 3)", pointcount),
                points.shape().to_vec(),
            ))
            .into())
        }
        None => {
            let points =
                Array2::from_shape_fn((pointcount, 3), |(i, c)| if c == 0 { i as f64 } else { 0. });
            (points, [1.; 3], "pt".to_string())
        }
    };

    let header = Header {
        title: options.title.clone(),
        desc: generated_desc(&options.desc),
        meshunit,
        bounds: Irregular::bounding_box(&points, cellsize),
        mesh: Mesh::Irregular(Irregular::new(pointcount)),
        valuedim,
        valueunits: default_valueunits(&options.valueunits, valuedim)?,
        valuelabels: default_valuelabels(&options.valuelabels, valuedim)?,
        unrecognized: Vec::new(),
    };

    let record_len = 3 + valuedim;
    let mut values = Vec::with_capacity(pointcount * record_len);
    for (point, row) in points.outer_iter().zip(data.outer_iter()) {
        values.extend(point.iter());
        values.extend(row.iter());
    }

    write_segment(writer, &header, &values, record_len, options.representation)
}

/// Write `data` with default options, picking the mesh type from its rank.
///
/// Rank 4 arrays are written with [`write_ovf_rectangular`] and rank 2 arrays with
/// [`write_ovf_irregular`]. `representation` is one of `text`, `bin4` or `bin8`.
pub fn write_ovf<W, S, D>(data: &ArrayBase<S, D>, writer: W, representation: &str) -> Result<(), Error>
where
    W: Write,
    S: Data<Elem = f64>,
    D: Dimension,
{
    let representation: Representation = representation.parse().map_err(WriteError::from)?;

    match data.ndim() {
        4 => write_ovf_rectangular(
            data,
            writer,
            &RectangularOptions {
                representation,
                ..Default::default()
            },
        ),
        2 => write_ovf_irregular(
            data,
            writer,
            &IrregularOptions {
                representation,
                ..Default::default()
            },
        ),
        _ => Err(WriteError::from(InvalidShape::new(
            "data",
            "(xnodes, ynodes, znodes, valuedim) or (pointcount, valuedim)".into(),
            data.shape().to_vec(),
        ))
        .into()),
    }
}

fn rectangular_shape(found: &[usize]) -> WriteError {
    InvalidShape::new(
        "data",
        "(xnodes, ynodes, znodes, valuedim) with no empty axis".into(),
        found.to_vec(),
    )
    .into()
}

fn irregular_shape(found: &[usize]) -> WriteError {
    InvalidShape::new(
        "data",
        "(pointcount, valuedim) with no empty axis".into(),
        found.to_vec(),
    )
    .into()
}

fn generated_desc(desc: &[String]) -> Vec<String> {
    let marker = format!("OVF file generated by ovf2 {}.", env!("CARGO_PKG_VERSION"));
    std::iter::once(marker).chain(desc.iter().cloned()).collect()
}

fn default_valueunits(units: &[String], valuedim: usize) -> Result<Vec<String>, WriteError> {
    if units.is_empty() {
        return Ok(vec!["1".to_string(); valuedim]);
    }

    Ok(header::broadcast_valueunits(units.to_vec(), valuedim)?)
}

fn default_valuelabels(labels: &[String], valuedim: usize) -> Result<Vec<String>, WriteError> {
    if labels.is_empty() {
        return Ok((0..valuedim).map(|n| format!("value_{}", n)).collect());
    }

    Ok(header::check_valuelabels(labels.to_vec(), valuedim)?)
}

/// render the header up front so that a quoting failure leaves `writer` untouched
fn write_segment<W: Write>(
    writer: W,
    header: &Header,
    values: &[f64],
    record_len: usize,
    representation: Representation,
) -> Result<(), Error> {
    let text = header.render(representation)?;

    let mut writer = BufWriter::new(writer);
    writer.write_all(text.as_bytes())?;
    array::write_data_block(&mut writer, values, record_len, representation)?;
    writer.flush()?;

    debug!(
        "wrote {} OVF segment with {} values as {}",
        header.mesh_type(),
        values.len(),
        representation
    );

    Ok(())
}
