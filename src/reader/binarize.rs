use log::trace;

use crate::common::{BitMatrix, BridgeResult};

use super::luminance::LuminanceSource;

// Binarizer
//------------------------------------------------------------------------------

/// Turns a luminance grid into a 1-bit grid. Set bits are dark.
pub trait Binarizer {
    fn source(&self) -> &LuminanceSource;

    fn black_matrix(&self) -> BridgeResult<BitMatrix>;

    fn width(&self) -> u32 {
        self.source().width()
    }

    fn height(&self) -> u32 {
        self.source().height()
    }
}

// Adaptive binarizer
// Steps:
// 1. Divides image into blocks of 8x8 pixels. The last fractional block on each axis is
//    computed from the last 8 pixels, so a few pixels overlap into 2 blocks
// 2. Calculates average of each block. Low contrast blocks take half their minimum, raised
//    to the average of their top/left neighbours when that is brighter than the minimum
// 3. Calculates the threshold for each block by averaging the 5x5 blocks around it
// 4. Marks a pixel dark if its value is less than or equal to the threshold. Equality counts
//    as dark so that a zero threshold still yields black pixels
// Images smaller than 40 pixels on either axis fall back to a single global threshold.
//------------------------------------------------------------------------------

const BLOCK_SHIFT: u32 = 3;
const BLOCK_SZ: u32 = 1 << BLOCK_SHIFT;
const MIN_BLOCK_DIM: u32 = 40;
const MIN_DYNAMIC_RANGE: u8 = 24;

#[derive(Debug, Clone)]
pub struct AdaptiveBinarizer {
    source: LuminanceSource,
}

impl AdaptiveBinarizer {
    pub fn new(source: LuminanceSource) -> Self {
        Self { source }
    }

    fn steps(&self) -> (u32, u32) {
        (self.source.width().div_ceil(BLOCK_SZ), self.source.height().div_ceil(BLOCK_SZ))
    }

    fn block_averages(&self) -> Vec<u32> {
        let src = &self.source;
        let (w, h) = (src.width(), src.height());
        let (wsteps, hsteps) = self.steps();
        let mut avg = Vec::with_capacity((wsteps * hsteps) as usize);

        for by in 0..hsteps {
            let y0 = (by << BLOCK_SHIFT).min(h - BLOCK_SZ);
            for bx in 0..wsteps {
                let x0 = (bx << BLOCK_SHIFT).min(w - BLOCK_SZ);

                let mut sum = 0u32;
                let (mut mn, mut mx) = (u8::MAX, u8::MIN);
                for y in y0..y0 + BLOCK_SZ {
                    for &p in &src.row(y)[x0 as usize..(x0 + BLOCK_SZ) as usize] {
                        sum += p as u32;
                        mn = mn.min(p);
                        mx = mx.max(p);
                    }
                }

                let blk_avg = if mx - mn > MIN_DYNAMIC_RANGE {
                    // 8x8 sum to average
                    sum >> 6
                } else {
                    let mut blk_avg = mn as u32 / 2;
                    if bx > 0 && by > 0 {
                        let i = (by * wsteps + bx) as usize;
                        let ws = wsteps as usize;
                        let ng_avg = (avg[i - ws] + 2 * avg[i - 1] + avg[i - ws - 1]) / 4;
                        if (mn as u32) < ng_avg {
                            blk_avg = ng_avg;
                        }
                    }
                    blk_avg
                };
                avg.push(blk_avg);
            }
        }
        avg
    }

    fn block_thresholds(&self, avg: &[u32]) -> Vec<u8> {
        let (wsteps, hsteps) = self.steps();
        let (maxx, maxy) = (wsteps - 3, hsteps - 3);
        let mut res = Vec::with_capacity(avg.len());

        for y in 0..hsteps {
            let cy = y.clamp(2, maxy);
            for x in 0..wsteps {
                let cx = x.clamp(2, maxx);
                let mut sum = 0u32;
                for ny in cy - 2..=cy + 2 {
                    let ni = (ny * wsteps + cx) as usize;
                    sum += avg[ni - 2..=ni + 2].iter().sum::<u32>();
                }
                res.push((sum / 25) as u8);
            }
        }
        res
    }

    fn block_matrix(&self) -> BridgeResult<BitMatrix> {
        let avg = self.block_averages();
        let thresh = self.block_thresholds(&avg);
        let (wsteps, _) = self.steps();

        BitMatrix::from_fn(self.source.width(), self.source.height(), |x, y| {
            let t = thresh[((y >> BLOCK_SHIFT) * wsteps + (x >> BLOCK_SHIFT)) as usize];
            self.source.get(x, y) <= t
        })
    }

    fn global_matrix(&self) -> BridgeResult<BitMatrix> {
        let data = self.source.data();
        let mn = data.iter().copied().min().unwrap_or(0);
        let mx = data.iter().copied().max().unwrap_or(0);

        let dark = |p: u8| {
            if mx - mn <= MIN_DYNAMIC_RANGE {
                p < 128
            } else {
                (p as u32) < (mn as u32 + mx as u32 + 1) / 2
            }
        };

        BitMatrix::from_fn(self.source.width(), self.source.height(), |x, y| {
            dark(self.source.get(x, y))
        })
    }
}

impl Binarizer for AdaptiveBinarizer {
    fn source(&self) -> &LuminanceSource {
        &self.source
    }

    fn black_matrix(&self) -> BridgeResult<BitMatrix> {
        let (w, h) = (self.source.width(), self.source.height());
        if w >= MIN_BLOCK_DIM && h >= MIN_BLOCK_DIM {
            trace!("Block thresholding {w}x{h} luminance");
            self.block_matrix()
        } else {
            trace!("Global thresholding {w}x{h} luminance");
            self.global_matrix()
        }
    }
}
