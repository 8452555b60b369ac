pub mod binarize;
pub mod engine;
pub mod luminance;

use std::{
    fmt::{Debug, Error, Formatter},
    sync::Arc,
};

use log::debug;

use crate::common::{BridgeError, BridgeResult};
use binarize::{AdaptiveBinarizer, Binarizer};
use engine::{DecodeEngine, Decoded, MultiFormatEngine};
use luminance::{BitmapFormat, ColorImage, LuminanceSource};

// Collaborator slots
//------------------------------------------------------------------------------

pub type LuminanceFactory<I> = Arc<dyn Fn(&I) -> BridgeResult<LuminanceSource> + Send + Sync>;

pub type BinarizerFactory = Arc<dyn Fn(LuminanceSource) -> Box<dyn Binarizer> + Send + Sync>;

pub type RawLuminanceFactory =
    Arc<dyn Fn(&[u8], u32, u32, BitmapFormat) -> BridgeResult<LuminanceSource> + Send + Sync>;

// Reader config
//------------------------------------------------------------------------------

/// Collaborators for a [`BarcodeReader`]. Unset slots resolve when the reader is built:
///
/// - engine: [`MultiFormatEngine::default`]
/// - binarizer: [`AdaptiveBinarizer`]
/// - luminance and raw luminance: no default. A reader without them refuses to decode
///   the matching input
pub struct ReaderConfig<I: ?Sized> {
    engine: Option<Arc<dyn DecodeEngine>>,
    luminance: Option<LuminanceFactory<I>>,
    binarizer: Option<BinarizerFactory>,
    raw_luminance: Option<RawLuminanceFactory>,
}

impl<I: ?Sized> Default for ReaderConfig<I> {
    fn default() -> Self {
        Self { engine: None, luminance: None, binarizer: None, raw_luminance: None }
    }
}

impl<I: ?Sized> ReaderConfig<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine<E: DecodeEngine + 'static>(&mut self, engine: E) -> &mut Self {
        self.engine = Some(Arc::new(engine));
        self
    }

    pub fn luminance<F>(&mut self, factory: F) -> &mut Self
    where
        F: Fn(&I) -> BridgeResult<LuminanceSource> + Send + Sync + 'static,
    {
        self.luminance = Some(Arc::new(factory));
        self
    }

    pub fn binarizer<F>(&mut self, factory: F) -> &mut Self
    where
        F: Fn(LuminanceSource) -> Box<dyn Binarizer> + Send + Sync + 'static,
    {
        self.binarizer = Some(Arc::new(factory));
        self
    }

    pub fn raw_luminance<F>(&mut self, factory: F) -> &mut Self
    where
        F: Fn(&[u8], u32, u32, BitmapFormat) -> BridgeResult<LuminanceSource>
            + Send
            + Sync
            + 'static,
    {
        self.raw_luminance = Some(Arc::new(factory));
        self
    }

    pub fn build(&self) -> BarcodeReader<I> {
        let engine = match &self.engine {
            Some(e) => Arc::clone(e),
            None => Arc::new(MultiFormatEngine::default()),
        };
        let binarizer = match &self.binarizer {
            Some(b) => Arc::clone(b),
            None => default_binarizer(),
        };

        BarcodeReader {
            engine,
            luminance: self.luminance.clone(),
            binarizer,
            raw_luminance: self.raw_luminance.clone(),
        }
    }
}

fn default_binarizer() -> BinarizerFactory {
    Arc::new(|source: LuminanceSource| -> Box<dyn Binarizer> {
        Box::new(AdaptiveBinarizer::new(source))
    })
}

// Barcode reader
//------------------------------------------------------------------------------

/// Decodes barcodes from images of type `I` through its configured collaborators.
///
/// Configuration is fixed once built. Concurrent `decode` calls are safe as long as the
/// collaborators are.
pub struct BarcodeReader<I: ?Sized> {
    engine: Arc<dyn DecodeEngine>,
    luminance: Option<LuminanceFactory<I>>,
    binarizer: BinarizerFactory,
    raw_luminance: Option<RawLuminanceFactory>,
}

impl<I: ?Sized> BarcodeReader<I> {
    /// Reader with every slot at its default. It cannot decode images until given a
    /// luminance factory through [`ReaderConfig`].
    pub fn new() -> Self {
        ReaderConfig::new().build()
    }

    pub fn decode(&self, image: &I) -> BridgeResult<Decoded> {
        let luminance = self.luminance.as_ref().ok_or(BridgeError::MissingLuminanceFactory)?;
        let source = luminance(image)?;
        self.decode_source(source)
    }

    pub fn decode_raw(
        &self,
        bytes: &[u8],
        w: u32,
        h: u32,
        format: BitmapFormat,
    ) -> BridgeResult<Decoded> {
        let raw = self.raw_luminance.as_ref().ok_or(BridgeError::MissingRawLuminanceFactory)?;
        let source = raw(bytes, w, h, format)?;
        self.decode_source(source)
    }

    fn decode_source(&self, source: LuminanceSource) -> BridgeResult<Decoded> {
        debug!("Decoding {}x{} luminance source", source.width(), source.height());
        let binarizer = (self.binarizer)(source);
        let decoded = self.engine.decode(binarizer.as_ref())?;
        debug!("Decoded {} symbol, {} chars", decoded.format, decoded.text.len());
        Ok(decoded)
    }
}

impl<I: ColorImage + ?Sized + 'static> BarcodeReader<I> {
    /// Reader wired to compute luminance straight from the image pixels
    pub fn for_images() -> Self {
        ReaderConfig::new().luminance(LuminanceSource::from_image::<I>).build()
    }
}

impl<I: ?Sized> Default for BarcodeReader<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ?Sized> Clone for BarcodeReader<I> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            luminance: self.luminance.clone(),
            binarizer: Arc::clone(&self.binarizer),
            raw_luminance: self.raw_luminance.clone(),
        }
    }
}

impl<I: ?Sized> Debug for BarcodeReader<I> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        f.debug_struct("BarcodeReader")
            .field("luminance", &self.luminance.is_some())
            .field("raw_luminance", &self.raw_luminance.is_some())
            .finish_non_exhaustive()
    }
}
