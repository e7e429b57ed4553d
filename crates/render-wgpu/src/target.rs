use crate::camera::ScreenCamera;
use crate::context::GpuContext;
use crate::gpu::WgpuRenderer;
use glam::Vec3;
use wirebox_common::Color;
use wirebox_kernel::{DebugDraw, DebugFlags};
use wirebox_render::{FrameTarget, LineBatch, RenderError};

/// Window-backed frame target: batches debug lines during the frame and
/// submits them on present.
pub struct WgpuTarget {
    gpu: GpuContext,
    renderer: WgpuRenderer,
    camera: ScreenCamera,
    batch: LineBatch,
    clear: Color,
}

impl WgpuTarget {
    pub fn new(gpu: GpuContext, camera: ScreenCamera, flags: DebugFlags) -> Self {
        let renderer = WgpuRenderer::new(gpu.device(), gpu.format());
        Self {
            gpu,
            renderer,
            camera,
            batch: LineBatch::new(flags),
            clear: Color::BLACK,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }
}

impl DebugDraw for WgpuTarget {
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: Color) {
        self.batch.draw_line(from, to, color);
    }

    fn debug_flags(&self) -> DebugFlags {
        self.batch.debug_flags()
    }
}

impl FrameTarget for WgpuTarget {
    fn clear(&mut self, color: Color) {
        self.batch.clear();
        self.clear = color;
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let output = self.gpu.acquire()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render(
            self.gpu.device(),
            self.gpu.queue(),
            &view,
            &self.camera,
            self.batch.lines(),
            self.clear,
        );
        output.present();
        Ok(())
    }
}
