use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};
use wirebox_common::{FrameClock, WorldDimensions, config};
use wirebox_kernel::DebugFlags;
use wirebox_render_wgpu::{GpuContext, GpuInitError, ScreenCamera, WgpuTarget};

use crate::app::{App, LoopState};
use crate::platform;

/// Windowed front end: one fixed-size window drawing the scene wireframe.
pub struct GpuApp {
    app: App,
    clock: FrameClock,
    window: Option<Arc<Window>>,
    target: Option<WgpuTarget>,
    init_error: Option<GpuInitError>,
}

impl GpuApp {
    pub fn new(app: App) -> Self {
        Self {
            app,
            clock: FrameClock::new(),
            window: None,
            target: None,
            init_error: None,
        }
    }

    /// Error that stopped window or GPU setup, if any.
    pub fn take_init_error(&mut self) -> Option<GpuInitError> {
        self.init_error.take()
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), GpuInitError> {
        let dims = WorldDimensions::default();
        let attrs = Window::default_attributes()
            .with_title(config::WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(dims.width_px, dims.height_px))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| GpuInitError::CreateWindow(e.to_string()))?,
        );

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height, config::VSYNC)?;
        let target = WgpuTarget::new(
            gpu,
            ScreenCamera::from_dimensions(&dims),
            DebugFlags::WIREFRAME,
        );

        self.window = Some(window);
        self.target = Some(target);
        self.clock.reset();
        Ok(())
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("window setup failed: {e}");
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(loop_event) = platform::translate_window_event(&event) {
            if self.app.handle_event(loop_event) == LoopState::Closing {
                event_loop.exit();
                return;
            }
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(target) = &mut self.target {
                    target.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(target) = &mut self.target else {
                    return;
                };
                let frame = self.clock.tick();
                if self.app.frame(frame.dt, target) == LoopState::Closing {
                    event_loop.exit();
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
