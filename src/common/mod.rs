pub mod bit_matrix;
pub mod color;
pub mod error;

pub use bit_matrix::*;
pub use color::*;
pub use error::*;
