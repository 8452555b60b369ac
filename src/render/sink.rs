use image::{ImageBuffer, Pixel, RgbaImage};

use crate::common::{bit_matrix::grid_index, Color};

// Pixel sink
// Output surface for the renderer. Allocation happens once per render through `blank`.
//------------------------------------------------------------------------------

pub trait PixelSink: Sized {
    fn blank(w: u32, h: u32) -> Self;

    fn put(&mut self, x: u32, y: u32, color: Color);
}

impl<P> PixelSink for ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + From<Color>,
{
    fn blank(w: u32, h: u32) -> Self {
        ImageBuffer::new(w, h)
    }

    fn put(&mut self, x: u32, y: u32, color: Color) {
        self.put_pixel(x, y, P::from(color));
    }
}

// Raster image
//------------------------------------------------------------------------------

/// Library-neutral ARGB raster. Freshly created rasters are transparent black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    w: u32,
    h: u32,
    pixels: Vec<Color>,
}

impl RasterImage {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h, pixels: vec![Color(0); w as usize * h as usize] }
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.w || y >= self.h {
            return None;
        }
        Some(self.pixels[grid_index(self.w, x, y)])
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if x < self.w && y < self.h {
            self.pixels[grid_index(self.w, x, y)] = color;
        }
    }

    /// Row-major pixels
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.w, self.h, |x, y| self.pixels[grid_index(self.w, x, y)].into())
    }
}

impl PixelSink for RasterImage {
    fn blank(w: u32, h: u32) -> Self {
        Self::new(w, h)
    }

    fn put(&mut self, x: u32, y: u32, color: Color) {
        self.set(x, y, color);
    }
}

#[cfg(test)]
mod sink_tests {
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba};

    use super::{PixelSink, RasterImage};
    use crate::common::Color;

    #[test]
    fn test_raster_put_get() {
        let mut img = RasterImage::blank(2, 3);
        assert_eq!((img.width(), img.height()), (2, 3));
        assert_eq!(img.get(1, 2), Some(Color(0)));

        img.put(1, 2, Color::WHITE);
        assert_eq!(img.get(1, 2), Some(Color::WHITE));
        assert_eq!(img.get(2, 0), None);

        // Out of range writes are dropped
        img.put(5, 5, Color::BLACK);
        assert_eq!(img.pixels().iter().filter(|&&c| c == Color::BLACK).count(), 0);
    }

    #[test]
    fn test_raster_to_rgba() {
        let mut img = RasterImage::new(2, 1);
        img.set(0, 0, Color::BLACK);
        img.set(1, 0, Color::from_argb(0x80, 1, 2, 3));
        let rgba = img.to_rgba_image();
        assert_eq!(*rgba.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*rgba.get_pixel(1, 0), Rgba([1, 2, 3, 0x80]));
    }

    #[test]
    fn test_image_buffer_sinks() {
        let mut rgb = RgbImage::blank(1, 1);
        rgb.put(0, 0, Color::from_rgb(9, 8, 7));
        assert_eq!(*rgb.get_pixel(0, 0), Rgb([9, 8, 7]));

        let mut gray = GrayImage::blank(1, 1);
        gray.put(0, 0, Color::WHITE);
        assert_eq!(*gray.get_pixel(0, 0), Luma([255]));
    }
}
