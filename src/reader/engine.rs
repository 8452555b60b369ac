use std::fmt::{Display, Error, Formatter};

use log::{debug, trace};
use rqrr::{DeQRError, PreparedImage};

use crate::common::DecodeFailure;

use super::binarize::Binarizer;

// Decoded symbol
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BarcodeFormat {
    QrCode,
}

impl Display for BarcodeFormat {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Self::QrCode => f.write_str("QR_CODE"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Decoded {
    pub text: String,
    pub format: BarcodeFormat,
    pub version: usize,
    pub ec_level: u16,
}

// Decode engine
//------------------------------------------------------------------------------

/// Locates and decodes a symbol from a binarized image.
///
/// Implementations are shared between threads by the reader, so decoding must only need
/// shared access.
pub trait DecodeEngine: Send + Sync {
    fn decode(&self, binarizer: &dyn Binarizer) -> Result<Decoded, DecodeFailure>;
}

// QR engine
//------------------------------------------------------------------------------

/// QR code engine backed by `rqrr`. Tries every detected grid and returns the first one
/// that decodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrEngine;

impl DecodeEngine for QrEngine {
    fn decode(&self, binarizer: &dyn Binarizer) -> Result<Decoded, DecodeFailure> {
        let bits = binarizer
            .black_matrix()
            .map_err(|e| DecodeFailure::Format(e.to_string()))?;

        let (w, h) = (bits.width() as usize, bits.height() as usize);
        let mut img = PreparedImage::prepare_from_greyscale(w, h, |x, y| {
            if bits.get(x as u32, y as u32) {
                0
            } else {
                255
            }
        });

        let grids = img.detect_grids();
        trace!("QR engine found {} candidate grids", grids.len());

        let mut failure = DecodeFailure::NotFound;
        for grid in grids.iter() {
            match grid.decode() {
                Ok((meta, text)) => {
                    return Ok(Decoded {
                        text,
                        format: BarcodeFormat::QrCode,
                        version: meta.version.0,
                        ec_level: meta.ecc_level,
                    })
                }
                Err(e) => failure = qr_failure(e),
            }
        }
        Err(failure)
    }
}

fn qr_failure(e: DeQRError) -> DecodeFailure {
    match e {
        DeQRError::DataEcc | DeQRError::FormatEcc => DecodeFailure::Checksum,
        e => DecodeFailure::Format(e.to_string()),
    }
}

// Multi format engine
//------------------------------------------------------------------------------

/// Runs a list of engines in order until one decodes.
///
/// A `NotFound` from one engine lets the next one try; any other failure is kept and
/// returned if no later engine succeeds.
pub struct MultiFormatEngine {
    engines: Vec<Box<dyn DecodeEngine>>,
}

impl Default for MultiFormatEngine {
    fn default() -> Self {
        Self::new(vec![Box::new(QrEngine)])
    }
}

impl MultiFormatEngine {
    pub fn new(engines: Vec<Box<dyn DecodeEngine>>) -> Self {
        Self { engines }
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

impl DecodeEngine for MultiFormatEngine {
    fn decode(&self, binarizer: &dyn Binarizer) -> Result<Decoded, DecodeFailure> {
        let mut failure = DecodeFailure::NotFound;
        for (i, engine) in self.engines.iter().enumerate() {
            match engine.decode(binarizer) {
                Ok(decoded) => {
                    debug!("Engine {i} decoded {} symbol", decoded.format);
                    return Ok(decoded);
                }
                Err(DecodeFailure::NotFound) => {}
                Err(e) => failure = e,
            }
        }
        Err(failure)
    }
}
