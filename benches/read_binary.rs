use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array4;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use ovf2::{RectangularOptions, Representation};

fn encoded(n: usize, representation: Representation) -> Vec<u8> {
    let array: Array4<f64> = ndarray::Array::random((n, n, n, 3), Uniform::new(-1., 1.));
    let options = RectangularOptions {
        cellsize: Some([1e-9; 3]),
        representation,
        ..Default::default()
    };

    let mut writer = Vec::new();
    ovf2::write_ovf_rectangular(&array, &mut writer, &options).unwrap();
    writer
}

fn read_bench(c: &mut Criterion) {
    let n = 100;

    for representation in [Representation::Binary8, Representation::Text] {
        let file = encoded(n, representation);

        c.bench_function(&format!("read {} {}", representation, n), |b| {
            b.iter(|| ovf2::parse_ovf_document(black_box(file.as_slice())).unwrap())
        });
    }
}

criterion_group!(benches, read_bench);
criterion_main!(benches);
