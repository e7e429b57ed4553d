use glam::Vec3;
use wirebox_common::Color;
use wirebox_kernel::{DebugDraw, DebugFlags};

/// One debug segment in physics space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: Vec3,
    pub to: Vec3,
    pub color: Color,
}

/// Collects the lines a scene emits during one frame.
#[derive(Debug, Clone)]
pub struct LineBatch {
    lines: Vec<Line>,
    flags: DebugFlags,
}

impl Default for LineBatch {
    fn default() -> Self {
        Self::new(DebugFlags::WIREFRAME)
    }
}

impl LineBatch {
    pub fn new(flags: DebugFlags) -> Self {
        Self {
            lines: Vec::new(),
            flags,
        }
    }

    pub fn set_flags(&mut self, flags: DebugFlags) {
        self.flags = flags;
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl DebugDraw for LineBatch {
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: Color) {
        self.lines.push(Line { from, to, color });
    }

    fn debug_flags(&self) -> DebugFlags {
        self.flags
    }
}
