use std::fmt::{Display, Error, Formatter};

use super::error::{BridgeError, BridgeResult};

// Bit matrix
//------------------------------------------------------------------------------

/// Row-major offset of `(x, y)` in a grid `w` wide
pub(crate) fn grid_index(w: u32, x: u32, y: u32) -> usize {
    y as usize * w as usize + x as usize
}

/// Rectangular grid of barcode modules. `true` is a dark module.
///
/// Width and height are always positive; every constructor rejects empty grids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    w: u32,
    h: u32,
    grid: Vec<bool>,
}

impl BitMatrix {
    /// All-light matrix of the given size
    pub fn new(w: u32, h: u32) -> BridgeResult<Self> {
        Self::from_fn(w, h, |_, _| false)
    }

    pub fn from_fn<F>(w: u32, h: u32, mut f: F) -> BridgeResult<Self>
    where
        F: FnMut(u32, u32) -> bool,
    {
        if w == 0 || h == 0 {
            return Err(BridgeError::EmptyMatrix);
        }

        let mut grid = Vec::with_capacity(w as usize * h as usize);
        for y in 0..h {
            for x in 0..w {
                grid.push(f(x, y));
            }
        }
        Ok(Self { w, h, grid })
    }

    /// Builds a matrix from rows given top to bottom. All rows must be equally long.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> BridgeResult<Self> {
        let h = rows.len();
        let w = rows.first().map_or(0, |r| r.as_ref().len());
        if w == 0 || h == 0 {
            return Err(BridgeError::EmptyMatrix);
        }
        if rows.iter().any(|r| r.as_ref().len() != w) {
            return Err(BridgeError::RaggedRows);
        }

        let grid = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Ok(Self { w: w as u32, h: h as u32, grid })
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    /// Module at `(x, y)`. Out of range coordinates read as light.
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.w || y >= self.h {
            return false;
        }
        self.grid[grid_index(self.w, x, y)]
    }

    pub fn count_set(&self) -> usize {
        self.grid.iter().filter(|&&m| m).count()
    }
}

impl Display for BitMatrix {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        for row in self.grid.chunks_exact(self.w as usize) {
            for &m in row {
                f.write_str(if m { "X " } else { "  " })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod bit_matrix_tests {
    use super::{grid_index, BitMatrix};
    use crate::common::error::BridgeError;

    #[test]
    fn test_from_rows() {
        let m = BitMatrix::from_rows(&[[true, false, true], [false, true, false]]).unwrap();
        assert_eq!((m.width(), m.height()), (3, 2));
        assert!(m.get(0, 0));
        assert!(!m.get(1, 0));
        assert!(m.get(1, 1));
        assert_eq!(m.count_set(), 3);
    }

    #[test]
    fn test_out_of_bounds_is_light() {
        let m = BitMatrix::from_fn(2, 2, |_, _| true).unwrap();
        assert!(!m.get(2, 0));
        assert!(!m.get(0, 2));
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(BitMatrix::new(0, 4), Err(BridgeError::EmptyMatrix));
        assert_eq!(BitMatrix::new(4, 0), Err(BridgeError::EmptyMatrix));
        let rows: [[bool; 0]; 2] = [[], []];
        assert_eq!(BitMatrix::from_rows(&rows), Err(BridgeError::EmptyMatrix));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![true, false], vec![true]];
        assert_eq!(BitMatrix::from_rows(&rows), Err(BridgeError::RaggedRows));
    }

    #[test]
    fn test_display() {
        let m = BitMatrix::from_rows(&[[true, false], [false, true]]).unwrap();
        assert_eq!(m.to_string(), "X   \n  X \n");
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_grid_index_past_u32() {
        let w = u32::MAX;
        assert_eq!(grid_index(w, 1, 2), 2 * w as usize + 1);
        assert_eq!(grid_index(65_536, 0, 65_536), 1 << 32);
    }
}
