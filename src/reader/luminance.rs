use image::{DynamicImage, GenericImageView, GrayImage, Pixel, Rgba, RgbImage, RgbaImage};
use log::trace;

use crate::{
    common::{bit_matrix::grid_index, luma, BridgeError, BridgeResult},
    render::RasterImage,
};

// Color image capability
//------------------------------------------------------------------------------

/// Anything that exposes its size and an RGBA value per pixel.
pub trait ColorImage {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn pixel_at(&self, x: u32, y: u32) -> Rgba<u8>;
}

impl ColorImage for RgbImage {
    fn width(&self) -> u32 {
        self.width()
    }

    fn height(&self) -> u32 {
        self.height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgba<u8> {
        self.get_pixel(x, y).to_rgba()
    }
}

impl ColorImage for RgbaImage {
    fn width(&self) -> u32 {
        self.width()
    }

    fn height(&self) -> u32 {
        self.height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.get_pixel(x, y)
    }
}

impl ColorImage for GrayImage {
    fn width(&self) -> u32 {
        self.width()
    }

    fn height(&self) -> u32 {
        self.height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgba<u8> {
        self.get_pixel(x, y).to_rgba()
    }
}

impl ColorImage for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgba<u8> {
        self.get_pixel(x, y)
    }
}

impl ColorImage for RasterImage {
    fn width(&self) -> u32 {
        self.width()
    }

    fn height(&self) -> u32 {
        self.height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgba<u8> {
        self.get(x, y).map_or(Rgba([0, 0, 0, 0]), Rgba::from)
    }
}

// Adapter
// Flattens an image into row-major RGB triplets. Each pixel is read once, alpha is dropped.
//------------------------------------------------------------------------------

pub fn rgb_samples<I: ColorImage + ?Sized>(img: &I) -> BridgeResult<Vec<u8>> {
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return Err(BridgeError::EmptyImage);
    }

    let mut samples = Vec::with_capacity(w as usize * h as usize * 3);
    for y in 0..h {
        for x in 0..w {
            let [r, g, b, _] = img.pixel_at(x, y).0;
            samples.extend_from_slice(&[r, g, b]);
        }
    }
    Ok(samples)
}

// Bitmap format
//------------------------------------------------------------------------------

/// Layout of a raw pixel buffer handed to [`LuminanceSource::from_raw`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BitmapFormat {
    Gray8,
    Rgb24,
    Bgr24,
    Rgb32,
    Bgr32,
    Rgba32,
    Bgra32,
    Argb32,
    /// 16-bit little endian, 5 red, 6 green, 5 blue bits from the top
    Rgb565,
}

impl BitmapFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb565 => 2,
            Self::Rgb24 | Self::Bgr24 => 3,
            Self::Rgb32 | Self::Bgr32 | Self::Rgba32 | Self::Bgra32 | Self::Argb32 => 4,
        }
    }

    fn luma(self, px: &[u8]) -> u8 {
        match self {
            Self::Gray8 => px[0],
            Self::Rgb24 | Self::Rgb32 | Self::Rgba32 => luma(px[0], px[1], px[2]),
            Self::Bgr24 | Self::Bgr32 | Self::Bgra32 => luma(px[2], px[1], px[0]),
            Self::Argb32 => luma(px[1], px[2], px[3]),
            Self::Rgb565 => {
                let v = u16::from_le_bytes([px[0], px[1]]);
                let r = ((v >> 11) & 0x1f) as u8;
                let g = ((v >> 5) & 0x3f) as u8;
                let b = (v & 0x1f) as u8;
                luma(r << 3 | r >> 2, g << 2 | g >> 4, b << 3 | b >> 2)
            }
        }
    }
}

// Luminance source
//------------------------------------------------------------------------------

/// Single channel brightness grid, row-major, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuminanceSource {
    w: u32,
    h: u32,
    luma: Vec<u8>,
}

impl LuminanceSource {
    /// Wraps an existing brightness buffer. `luma` must hold at least `w * h` bytes.
    pub fn new(w: u32, h: u32, mut luma: Vec<u8>) -> BridgeResult<Self> {
        if w == 0 || h == 0 {
            return Err(BridgeError::EmptyImage);
        }
        let expected = w as usize * h as usize;
        if luma.len() < expected {
            return Err(BridgeError::BufferTooShort { expected, actual: luma.len() });
        }
        luma.truncate(expected);
        Ok(Self { w, h, luma })
    }

    /// Computes brightness from row-major RGB triplets
    pub fn from_rgb_samples(samples: &[u8], w: u32, h: u32) -> BridgeResult<Self> {
        Self::from_raw(samples, w, h, BitmapFormat::Rgb24)
    }

    pub fn from_image<I: ColorImage + ?Sized>(img: &I) -> BridgeResult<Self> {
        let samples = rgb_samples(img)?;
        trace!("Adapted {}x{} image to RGB samples", img.width(), img.height());
        Self::from_rgb_samples(&samples, img.width(), img.height())
    }

    /// Computes brightness from a raw pixel buffer. Extra trailing bytes are ignored.
    pub fn from_raw(bytes: &[u8], w: u32, h: u32, format: BitmapFormat) -> BridgeResult<Self> {
        if w == 0 || h == 0 {
            return Err(BridgeError::EmptyImage);
        }

        let bpp = format.bytes_per_pixel();
        let expected = w as usize * h as usize * bpp;
        if bytes.len() < expected {
            return Err(BridgeError::BufferTooShort { expected, actual: bytes.len() });
        }

        let luma = bytes[..expected].chunks_exact(bpp).map(|px| format.luma(px)).collect();
        Ok(Self { w, h, luma })
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.luma[grid_index(self.w, x, y)]
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let start = grid_index(self.w, 0, y);
        &self.luma[start..start + self.w as usize]
    }

    pub fn data(&self) -> &[u8] {
        &self.luma
    }
}

#[cfg(test)]
mod luminance_tests {
    use std::cell::Cell;

    use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use test_case::test_case;

    use super::{rgb_samples, BitmapFormat, ColorImage, LuminanceSource};
    use crate::{
        common::{BridgeError, Color},
        render::RasterImage,
    };

    struct CountingImage {
        w: u32,
        h: u32,
        reads: Cell<Vec<(u32, u32)>>,
    }

    impl ColorImage for CountingImage {
        fn width(&self) -> u32 {
            self.w
        }

        fn height(&self) -> u32 {
            self.h
        }

        fn pixel_at(&self, x: u32, y: u32) -> Rgba<u8> {
            let mut reads = self.reads.take();
            reads.push((x, y));
            self.reads.set(reads);
            Rgba([x as u8, y as u8, 7, 99])
        }
    }

    #[test]
    fn test_samples_read_once_row_major() {
        let img = CountingImage { w: 3, h: 2, reads: Cell::new(Vec::new()) };
        let samples = rgb_samples(&img).unwrap();

        let exp_reads = vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)];
        assert_eq!(img.reads.take(), exp_reads);
        assert_eq!(samples, vec![0, 0, 7, 1, 0, 7, 2, 0, 7, 0, 1, 7, 1, 1, 7, 2, 1, 7]);
    }

    #[test]
    fn test_samples_empty_image() {
        let img = RgbImage::new(0, 5);
        assert_eq!(rgb_samples(&img), Err(BridgeError::EmptyImage));
        assert_eq!(LuminanceSource::from_image(&img), Err(BridgeError::EmptyImage));
    }

    #[test]
    fn test_samples_drop_alpha() {
        let img = RgbaImage::from_pixel(2, 1, Rgba([10, 20, 30, 0]));
        assert_eq!(rgb_samples(&img).unwrap(), vec![10, 20, 30, 10, 20, 30]);
    }

    #[test]
    fn test_image_types_agree() {
        let rgb = RgbImage::from_fn(4, 3, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        let gray = GrayImage::from_fn(4, 3, |x, y| Luma([rgb.get_pixel(x, y)[0]]));
        let dynamic = DynamicImage::ImageRgb8(rgb.clone());

        let exp = LuminanceSource::from_image(&rgb).unwrap();
        assert_eq!(LuminanceSource::from_image(&gray).unwrap(), exp);
        assert_eq!(LuminanceSource::from_image(&dynamic).unwrap(), exp);
        assert_eq!(exp.row(0), &[0, 255, 0, 255]);
        assert_eq!(exp.get(1, 1), 0);
    }

    #[test]
    fn test_raster_image_source() {
        let mut img = RasterImage::new(2, 1);
        img.set(0, 0, Color::WHITE);
        img.set(1, 0, Color::BLACK);
        let src = LuminanceSource::from_image(&img).unwrap();
        assert_eq!(src.data(), &[255, 0]);
    }

    #[test_case(BitmapFormat::Gray8, &[76], 76; "gray8")]
    #[test_case(BitmapFormat::Rgb24, &[255, 0, 0], 76; "rgb24")]
    #[test_case(BitmapFormat::Bgr24, &[0, 0, 255], 76; "bgr24")]
    #[test_case(BitmapFormat::Rgb32, &[255, 0, 0, 0], 76; "rgb32")]
    #[test_case(BitmapFormat::Bgr32, &[0, 0, 255, 0], 76; "bgr32")]
    #[test_case(BitmapFormat::Rgba32, &[255, 0, 0, 255], 76; "rgba32")]
    #[test_case(BitmapFormat::Bgra32, &[0, 0, 255, 255], 76; "bgra32")]
    #[test_case(BitmapFormat::Argb32, &[255, 255, 0, 0], 76; "argb32")]
    #[test_case(BitmapFormat::Rgb565, &[0x00, 0xf8], 76; "rgb565_red")]
    #[test_case(BitmapFormat::Rgb565, &[0xff, 0xff], 255; "rgb565_white")]
    fn test_raw_formats(format: BitmapFormat, px: &[u8], exp: u8) {
        let src = LuminanceSource::from_raw(px, 1, 1, format).unwrap();
        assert_eq!(src.data(), &[exp]);
    }

    #[test]
    fn test_raw_buffer_too_short() {
        let res = LuminanceSource::from_raw(&[0; 11], 2, 2, BitmapFormat::Rgb24);
        assert_eq!(res, Err(BridgeError::BufferTooShort { expected: 12, actual: 11 }));
    }

    #[test]
    fn test_raw_empty() {
        let res = LuminanceSource::from_raw(&[], 0, 2, BitmapFormat::Gray8);
        assert_eq!(res, Err(BridgeError::EmptyImage));
    }

    #[test]
    fn test_new_truncates() {
        let src = LuminanceSource::new(2, 1, vec![1, 2, 3]).unwrap();
        assert_eq!(src.data(), &[1, 2]);
        assert_eq!(
            LuminanceSource::new(2, 2, vec![0; 3]),
            Err(BridgeError::BufferTooShort { expected: 4, actual: 3 })
        );
    }
}
