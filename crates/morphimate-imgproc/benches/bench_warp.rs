use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use morphimate_image::{Image, ImageSize};
use morphimate_imgproc::{
    interpolation::{ImageSampler, InterpolationMode},
    triangulation::triangulate,
    warp::warp_piecewise_affine,
};

fn control_points(rng: &mut StdRng, size: ImageSize, n: usize) -> Vec<[i32; 2]> {
    let (w, h) = (size.width as i32 - 1, size.height as i32 - 1);
    let mut points = (0..n)
        .map(|_| [rng.random_range(1..w), rng.random_range(1..h)])
        .collect::<Vec<_>>();
    points.extend([[0, 0], [0, h], [w, 0], [w, h]]);
    points
}

fn bench_warp_piecewise(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpPiecewiseAffine");
    let mut rng = StdRng::seed_from_u64(42);

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size: ImageSize = [*width, *height].into();
        let image = Image::<u8, 3>::from_fn(image_size, |x, y| {
            [(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]
        });
        let src_points = control_points(&mut rng, image_size, 50);
        let dst_points = control_points(&mut rng, image_size, 50);

        for mode in [InterpolationMode::Bicubic, InterpolationMode::Bilinear] {
            let sampler = ImageSampler::new(&image, mode).unwrap();
            let output = Image::<u8, 3>::from_size_val(image_size, 0).unwrap();

            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", mode), &parameter_string),
                &(&sampler, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| {
                        warp_piecewise_affine(
                            black_box(src),
                            black_box(&src_points),
                            black_box(&dst_points),
                            black_box(&mut dst),
                        )
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_triangulate(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let size = ImageSize {
        width: 500,
        height: 600,
    };
    let points = control_points(&mut rng, size, 70);

    c.bench_function("Triangulate74", |b| {
        b.iter(|| triangulate(black_box(&points)))
    });
}

criterion_group!(benches, bench_warp_piecewise, bench_triangulate);
criterion_main!(benches);
