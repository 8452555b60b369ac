use std::fmt::{Display, Error, Formatter};

// Error kind
//------------------------------------------------------------------------------

/// Coarse classification of a [`BridgeError`].
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ErrorKind {
    /// Bad dimensions or buffers, raised before any work is done
    Argument,
    /// A required collaborator was never configured
    Configuration,
    /// Forwarded from the decode engine
    Decode,
}

// Decode failure
//------------------------------------------------------------------------------

/// Failure reported by a decode engine. Passed through the reader untouched.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DecodeFailure {
    NotFound,
    Checksum,
    Format(String),
}

impl Display for DecodeFailure {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Self::NotFound => f.write_str("No barcode found"),
            Self::Checksum => f.write_str("Checksum verification failed"),
            Self::Format(msg) => write!(f, "Malformed barcode: {msg}"),
        }
    }
}

impl std::error::Error for DecodeFailure {}

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum BridgeError {
    // Arguments
    EmptyMatrix,
    EmptyImage,
    RaggedRows,
    BufferTooShort { expected: usize, actual: usize },

    // Configuration
    MissingLuminanceFactory,
    MissingRawLuminanceFactory,

    // Engine
    Decode(DecodeFailure),
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyMatrix | Self::EmptyImage | Self::RaggedRows | Self::BufferTooShort { .. } => {
                ErrorKind::Argument
            }
            Self::MissingLuminanceFactory | Self::MissingRawLuminanceFactory => {
                ErrorKind::Configuration
            }
            Self::Decode(_) => ErrorKind::Decode,
        }
    }
}

impl Display for BridgeError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Self::EmptyMatrix => f.write_str("Matrix width and height must be positive"),
            Self::EmptyImage => f.write_str("Image width and height must be positive"),
            Self::RaggedRows => f.write_str("Matrix rows differ in length"),
            Self::BufferTooShort { expected, actual } => {
                write!(f, "Pixel buffer too short: expected {expected} bytes, got {actual}")
            }
            Self::MissingLuminanceFactory => f.write_str("No luminance source factory configured"),
            Self::MissingRawLuminanceFactory => {
                f.write_str("No raw bytes luminance source factory configured")
            }
            Self::Decode(e) => Display::fmt(e, f),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DecodeFailure> for BridgeError {
    fn from(e: DecodeFailure) -> Self {
        Self::Decode(e)
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
