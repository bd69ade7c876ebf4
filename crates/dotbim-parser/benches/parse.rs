// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dotbim_model::{BimFile, Color, Element, Mesh, Vector};

/// Grid of boxes sharing one mesh, similar to a typical facade export
fn synthetic_file(count: usize) -> BimFile {
    let coordinates = vec![
        0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0,
        1.0, 1.0, 1.0, 0.0, 1.0, 1.0,
    ];
    let indices = vec![
        0, 2, 1, 0, 3, 2, 4, 5, 6, 4, 6, 7, 0, 1, 5, 0, 5, 4, 1, 2, 6, 1, 6, 5, 2, 3, 7, 2, 7,
        6, 3, 0, 4, 3, 4, 7,
    ];

    let elements = (0..count)
        .map(|i| {
            let mut element = Element::new(format!("box-{i}"), 0u64, "Box")
                .with_vector(Vector::new((i % 100) as f64 * 1.5, (i / 100) as f64 * 1.5, 0.0))
                .with_color(Color::new((i % 256) as u8, 128, 64, 255))
                .with_face_colors(vec![Color::default(); 12]);
            element.info.insert("Index", i);
            element
        })
        .collect();

    BimFile {
        meshes: vec![Mesh::new(0u64, coordinates, indices)],
        elements,
        ..BimFile::new()
    }
}

fn bench_parse(c: &mut Criterion) {
    let text = dotbim_parser::encode(&synthetic_file(5_000)).expect("encode fixture");

    c.bench_function("parse 5k elements", |b| {
        b.iter(|| dotbim_parser::parse(black_box(&text)))
    });
}

fn bench_encode(c: &mut Criterion) {
    let file = synthetic_file(5_000);

    c.bench_function("encode 5k elements", |b| {
        b.iter(|| dotbim_parser::encode(black_box(&file)))
    });
}

criterion_group!(benches, bench_parse, bench_encode);
criterion_main!(benches);
