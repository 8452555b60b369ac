mod sink;

pub use sink::{PixelSink, RasterImage};

use log::{debug, trace};

use crate::common::{BitMatrix, BridgeError, BridgeResult, Color};

// Render options
//------------------------------------------------------------------------------

/// Requested minimum output size. A zero dimension requests no scaling on that axis.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
}

impl RenderOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

// Layout
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Layout {
    pub out_w: u32,
    pub out_h: u32,
    pub scale: u32,
}

impl Layout {
    pub(crate) fn compute(matrix: &BitMatrix, opts: &RenderOptions) -> Self {
        let (mw, mh) = (matrix.width(), matrix.height());
        let out_w = mw.max(opts.width);
        let out_h = mh.max(opts.height);

        // Floor division, left unclamped
        let scale = (out_w / mw).min(out_h / mh);

        Self { out_w, out_h, scale }
    }
}

// Renderer
//------------------------------------------------------------------------------

/// Paints a [`BitMatrix`] onto any [`PixelSink`].
///
/// Each module becomes a `scale x scale` block, where `scale` is the largest integer
/// factor fitting the requested size on both axes. Output pixels the scaled matrix does
/// not cover, to the right of and below it, are painted with the foreground color.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Renderer {
    pub foreground: Color,
    pub background: Color,
}

impl Default for Renderer {
    fn default() -> Self {
        Self { foreground: Color::BLACK, background: Color::WHITE }
    }
}

impl Renderer {
    pub fn new(foreground: Color, background: Color) -> Self {
        Self { foreground, background }
    }

    /// Renders `matrix`. `None` options keep one pixel per module.
    ///
    /// `BitMatrix` constructors already reject empty grids; the `EmptyMatrix` check here is
    /// defence in depth for the layout division.
    pub fn render<S: PixelSink>(
        &self,
        matrix: &BitMatrix,
        options: Option<&RenderOptions>,
    ) -> BridgeResult<S> {
        if matrix.width() == 0 || matrix.height() == 0 {
            return Err(BridgeError::EmptyMatrix);
        }

        let layout = Layout::compute(matrix, options.unwrap_or(&RenderOptions::default()));
        debug!(
            "Rendering {}x{} matrix into {}x{} raster at scale {}",
            matrix.width(),
            matrix.height(),
            layout.out_w,
            layout.out_h,
            layout.scale
        );

        Ok(paint(matrix, layout, self.foreground, self.background))
    }
}

/// Renders `matrix` with explicit colors. See [`Renderer`] for the layout rules.
pub fn render<S: PixelSink>(
    matrix: &BitMatrix,
    options: &RenderOptions,
    foreground: Color,
    background: Color,
) -> BridgeResult<S> {
    Renderer::new(foreground, background).render(matrix, Some(options))
}

pub(crate) fn paint<S: PixelSink>(matrix: &BitMatrix, layout: Layout, fg: Color, bg: Color) -> S {
    let Layout { out_w, out_h, scale } = layout;
    let body_w = scale * matrix.width();
    let body_h = scale * matrix.height();
    trace!("Body {body_w}x{body_h}, padding {}x{}", out_w - body_w, out_h - body_h);

    let mut canvas = S::blank(out_w, out_h);
    for y in 0..out_h {
        for x in 0..out_w {
            let color = if x < body_w && y < body_h {
                if matrix.get(x / scale, y / scale) {
                    fg
                } else {
                    bg
                }
            } else {
                fg
            };
            canvas.put(x, y, color);
        }
    }
    canvas
}
