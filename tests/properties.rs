use ovf2::ndarray::{Array2, Array4, Axis};
use ovf2::{ErrorKind, IrregularOptions, RectangularOptions, Representation};
use proptest::prelude::*;

fn representation() -> impl Strategy<Value = Representation> {
    prop_oneof![
        Just(Representation::Text),
        Just(Representation::Binary4),
        Just(Representation::Binary8),
    ]
}

/// `(xnodes, ynodes, znodes, valuedim)` together with matching values
fn rectangular_data() -> impl Strategy<Value = Array4<f64>> {
    (1usize..5, 1usize..5, 1usize..5, 1usize..4).prop_flat_map(|shape| {
        let (nx, ny, nz, d) = shape;
        prop::collection::vec(-1e12f64..1e12, nx * ny * nz * d)
            .prop_map(move |values| Array4::from_shape_vec(shape, values).unwrap())
    })
}

fn irregular_data() -> impl Strategy<Value = (Array2<f64>, Array2<f64>)> {
    (1usize..20, 1usize..4).prop_flat_map(|(n, d)| {
        (
            prop::collection::vec(-1e3f64..1e3, n * d),
            prop::collection::vec(-1e-6f64..1e-6, n * 3),
        )
            .prop_map(move |(values, points)| {
                (
                    Array2::from_shape_vec((n, d), values).unwrap(),
                    Array2::from_shape_vec((n, 3), points).unwrap(),
                )
            })
    })
}

fn stored(value: f64, representation: Representation) -> f64 {
    match representation {
        Representation::Binary4 => value as f32 as f64,
        _ => value,
    }
}

proptest! {
    #[test]
    fn rectangular_round_trip(data in rectangular_data(), representation in representation()) {
        let options = RectangularOptions { representation, ..Default::default() };
        let mut buffer = Vec::new();
        ovf2::write_ovf_rectangular(&data, &mut buffer, &options).unwrap();

        let read = ovf2::parse_ovf_document(buffer.as_slice()).unwrap();
        prop_assert_eq!(read.data.len(), data.shape()[3]);

        for (c, (_, field)) in read.data.iter().enumerate() {
            let written = data.index_axis(Axis(3), c);
            prop_assert_eq!(field.shape(), written.shape());

            for (read_value, written_value) in field.iter().zip(written.iter()) {
                prop_assert_eq!(*read_value, stored(*written_value, representation));
            }
        }
    }

    #[test]
    fn irregular_round_trip((data, points) in irregular_data(), representation in representation()) {
        let options = IrregularOptions {
            points: Some(points.clone()),
            representation,
            ..Default::default()
        };
        let mut buffer = Vec::new();
        ovf2::write_ovf_irregular(&data, &mut buffer, &options).unwrap();

        let read = ovf2::parse_ovf_document(buffer.as_slice()).unwrap();

        let axes = [&read.coords.x, &read.coords.y, &read.coords.z];
        for (axis, coords) in axes.iter().enumerate() {
            for (read_value, point) in coords.iter().zip(points.column(axis).iter()) {
                prop_assert_eq!(*read_value, stored(*point, representation));
            }
        }

        for (c, (_, field)) in read.data.iter().enumerate() {
            for (read_value, written) in field.iter().zip(data.column(c).iter()) {
                prop_assert_eq!(*read_value, stored(*written, representation));
            }
        }
    }

    /// any change to the first value of a binary block is caught before the payload is read
    #[test]
    fn sentinel_guards_binary_blocks(
        representation in prop_oneof![Just(Representation::Binary4), Just(Representation::Binary8)],
        byte in 0usize..4,
        flip in 1u8..=255,
    ) {
        let mut buffer = Vec::new();
        ovf2::write_ovf(&Array2::<f64>::ones((3, 1)), &mut buffer, &representation.to_string())
            .unwrap();

        let marker = format!("# Begin: Data {representation}\n");
        let start = buffer
            .windows(marker.len())
            .position(|window| window == marker.as_bytes())
            .unwrap()
            + marker.len();
        buffer[start + byte] ^= flip;

        let err = ovf2::parse_ovf_document(buffer.as_slice()).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::BinaryAlignment);
    }
}
