use crate::batch::LineBatch;
use glam::Vec3;
use wirebox_common::Color;
use wirebox_kernel::{DebugDraw, DebugFlags, Scene};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RenderError {
    /// The presentation surface must be reconfigured; the frame is dropped.
    #[error("render surface lost or outdated")]
    SurfaceLost,
    #[error("render backend error: {0}")]
    Backend(String),
}

/// Something a frame can be drawn into.
///
/// The scene's debug geometry arrives through the [`DebugDraw`] supertrait
/// between [`FrameTarget::clear`] and [`FrameTarget::present`].
pub trait FrameTarget: DebugDraw {
    /// Start a frame filled with `color`.
    fn clear(&mut self, color: Color);

    /// Finish the frame and hand it to the display.
    fn present(&mut self) -> Result<(), RenderError>;
}

/// Draw one frame of `scene` into `target`: clear, debug draw, present.
///
/// Returns the number of debug lines the scene emitted.
pub fn render_frame<T: FrameTarget + ?Sized>(
    scene: &Scene,
    target: &mut T,
    background: Color,
) -> Result<usize, RenderError> {
    target.clear(background);
    let lines = scene.debug_draw(target);
    target.present()?;
    Ok(lines)
}

/// Text frame target for headless runs and tests.
///
/// Produces a human-readable summary of each presented frame instead of
/// pixels.
#[derive(Debug)]
pub struct DebugTextRenderer {
    batch: LineBatch,
    background: Color,
    frames_presented: u64,
    last_frame: String,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self {
            batch: LineBatch::default(),
            background: Color::BLACK,
            frames_presented: 0,
            last_frame: String::new(),
        }
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Summary of the most recently presented frame.
    pub fn last_frame(&self) -> &str {
        &self.last_frame
    }

    fn summarize(&self) -> String {
        let mut out = String::new();
        let bg = self.background;
        out.push_str(&format!("=== Frame {} ===\n", self.frames_presented));
        out.push_str(&format!(
            "Background: ({:.2}, {:.2}, {:.2})\n",
            bg.r, bg.g, bg.b
        ));
        out.push_str(&format!("Lines: {}\n", self.batch.len()));

        let mut points = self.batch.lines().iter().flat_map(|l| [l.from, l.to]);
        if let Some(first) = points.next() {
            let (min, max) = points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
            out.push_str(&format!(
                "Bounds: ({:.2}, {:.2}) .. ({:.2}, {:.2})\n",
                min.x, min.y, max.x, max.y
            ));
        }
        out
    }
}

impl DebugDraw for DebugTextRenderer {
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: Color) {
        self.batch.draw_line(from, to, color);
    }

    fn debug_flags(&self) -> DebugFlags {
        self.batch.debug_flags()
    }
}

impl FrameTarget for DebugTextRenderer {
    fn clear(&mut self, color: Color) {
        self.batch.clear();
        self.background = color;
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.last_frame = self.summarize();
        self.frames_presented += 1;
        tracing::trace!(lines = self.batch.len(), "text frame presented");
        Ok(())
    }
}
