use std::hint::black_box;
use std::time::{Duration, Instant};

use barcode_bridge::{BarcodeReader, BitMatrix, RasterImage, RenderOptions, Renderer};
use image::RgbaImage;

const ITERATIONS: u32 = 200;

fn time<F: FnMut()>(mut f: F) -> Duration {
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        f();
    }
    start.elapsed() / ITERATIONS
}

fn main() {
    println!("Running barcode-bridge benchmarks");
    println!("=================================\n");

    // Pseudo random 177x177 grid, the size of the largest QR symbol
    let matrix = BitMatrix::from_fn(177, 177, |x, y| (x * 31 + y * 17) % 7 < 3).unwrap();
    let renderer = Renderer::default();

    for sz in [177, 531, 1062] {
        let opts = RenderOptions::new(sz, sz);
        let raster = time(|| {
            let img: RasterImage = renderer.render(&matrix, Some(&opts)).unwrap();
            black_box(img);
        });
        let rgba = time(|| {
            let img: RgbaImage = renderer.render(&matrix, Some(&opts)).unwrap();
            black_box(img);
        });
        println!("Render {sz}x{sz}: raster {raster:?}, rgba {rgba:?}");
    }

    let reader = BarcodeReader::<RgbaImage>::for_images();
    let img: RgbaImage = renderer.render(&matrix, Some(&RenderOptions::new(531, 531))).unwrap();
    let decode = time(|| {
        let _ = black_box(reader.decode(&img));
    });
    println!("\nDecode 531x531: {decode:?}");
}
