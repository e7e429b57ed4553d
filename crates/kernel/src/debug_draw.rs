use glam::Vec3;
use rapier3d::math::{Point, Real};
use rapier3d::pipeline::{DebugRenderBackend, DebugRenderMode, DebugRenderObject};
use wirebox_common::Color;

bitflags::bitflags! {
    /// Categories of debug geometry a drawer wants to receive.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DebugFlags: u32 {
        /// Collider outlines.
        const WIREFRAME = 1 << 0;
        /// Axis-aligned bounding boxes.
        const AABB = 1 << 1;
        /// Contact points and normals.
        const CONTACTS = 1 << 2;
        /// Local axes of each rigid body.
        const AXES = 1 << 3;
        const JOINTS = 1 << 4;
    }
}

impl DebugFlags {
    pub(crate) fn to_render_mode(self) -> DebugRenderMode {
        let mut mode = DebugRenderMode::empty();
        if self.contains(DebugFlags::WIREFRAME) {
            mode |= DebugRenderMode::COLLIDER_SHAPES;
        }
        if self.contains(DebugFlags::AABB) {
            mode |= DebugRenderMode::COLLIDER_AABBS;
        }
        if self.contains(DebugFlags::CONTACTS) {
            mode |= DebugRenderMode::CONTACTS;
        }
        if self.contains(DebugFlags::AXES) {
            mode |= DebugRenderMode::RIGID_BODY_AXES;
        }
        if self.contains(DebugFlags::JOINTS) {
            mode |= DebugRenderMode::IMPULSE_JOINTS | DebugRenderMode::MULTIBODY_JOINTS;
        }
        mode
    }
}

/// Sink for the wireframe geometry a scene emits.
///
/// The kernel depends on this capability only; any renderer can implement it.
pub trait DebugDraw {
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: Color);

    fn debug_flags(&self) -> DebugFlags;
}

/// Adapts a [`DebugDraw`] to the backend's debug-render callback.
pub(crate) struct BackendBridge<'a, D: DebugDraw + ?Sized> {
    pub(crate) sink: &'a mut D,
    pub(crate) lines: usize,
}

impl<'a, D: DebugDraw + ?Sized> BackendBridge<'a, D> {
    pub(crate) fn new(sink: &'a mut D) -> Self {
        Self { sink, lines: 0 }
    }
}

impl<D: DebugDraw + ?Sized> DebugRenderBackend for BackendBridge<'_, D> {
    fn draw_line(
        &mut self,
        _object: DebugRenderObject<'_>,
        a: Point<Real>,
        b: Point<Real>,
        color: [f32; 4],
    ) {
        let color = Color::from_hsla(color[0], color[1], color[2], color[3]);
        self.sink
            .draw_line(Vec3::new(a.x, a.y, a.z), Vec3::new(b.x, b.y, b.z), color);
        self.lines += 1;
    }
}
