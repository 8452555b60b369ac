//! # barcode-bridge
//!
//! Glue between barcode module grids, pixel rasters and barcode decode engines.
//!
//! ## Features
//!
//! - **Rendering**: Paint a [`BitMatrix`] onto any [`PixelSink`] with integer module scaling
//! - **Luminance**: Turn RGB, RGBA, gray or raw pixel buffers into a [`LuminanceSource`]
//! - **Reading**: A [`BarcodeReader`] composed of pluggable luminance, binarizer and decode
//!   engine collaborators, with a QR engine backed by `rqrr` as the default
//!
//! ## Quick Start
//!
//! ### Rendering a Matrix
//!
//! ```rust
//! use barcode_bridge::{BitMatrix, RasterImage, RenderOptions, Renderer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let matrix = BitMatrix::from_rows(&[[true, false], [false, true]])?;
//!
//! // Each module becomes a 4x4 block
//! let img: RasterImage = Renderer::default().render(&matrix, Some(&RenderOptions::new(8, 8)))?;
//! assert_eq!((img.width(), img.height()), (8, 8));
//! # Ok(())
//! # }
//! ```
//!
//! ### Reading an Image
//!
//! ```rust
//! use barcode_bridge::{BarcodeReader, BridgeError, DecodeFailure};
//! use image::{Rgb, RgbImage};
//!
//! let reader = BarcodeReader::<RgbImage>::for_images();
//! let img = RgbImage::from_pixel(64, 64, Rgb([255, 255, 255]));
//!
//! // Blank image, nothing to find
//! assert_eq!(reader.decode(&img), Err(BridgeError::Decode(DecodeFailure::NotFound)));
//! ```
//!
//! ### Custom Collaborators
//!
//! ```rust
//! use barcode_bridge::{BarcodeReader, LuminanceSource, ReaderConfig};
//! use image::GrayImage;
//!
//! let reader: BarcodeReader<GrayImage> = ReaderConfig::new()
//!     .luminance(LuminanceSource::from_image::<GrayImage>)
//!     .raw_luminance(LuminanceSource::from_raw)
//!     .build();
//! ```

#![allow(clippy::items_after_test_module)]

pub mod common;
pub mod reader;
pub mod render;

pub use common::{BitMatrix, BridgeError, BridgeResult, Color, DecodeFailure, ErrorKind};
pub use reader::{
    binarize::{AdaptiveBinarizer, Binarizer},
    engine::{BarcodeFormat, DecodeEngine, Decoded, MultiFormatEngine, QrEngine},
    luminance::{rgb_samples, BitmapFormat, ColorImage, LuminanceSource},
    BarcodeReader, BinarizerFactory, LuminanceFactory, RawLuminanceFactory, ReaderConfig,
};
pub use render::{render, PixelSink, RasterImage, RenderOptions, Renderer};
