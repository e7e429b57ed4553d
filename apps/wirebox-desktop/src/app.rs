use wirebox_common::{WorldDimensions, config};
use wirebox_input::{Action, FrameContext, InputMapper, Key, KeyboardState};
use wirebox_kernel::{Scene, SceneError, SceneLayout, build_scene};
use wirebox_render::{FrameTarget, RenderError, render_frame};

/// Lifecycle of the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Terminal: no further stepping or rendering.
    Closing,
}

/// Platform-neutral events the loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    CloseRequested,
    KeyPressed(Key),
    KeyReleased(Key),
    FocusLost,
}

/// Simulation state plus the per-frame driver.
///
/// Each frame runs step, clear forces, map input, apply actions, render. Forces
/// applied in frame N are therefore integrated by the step of frame N+1.
pub struct App {
    scene: Scene,
    layout: SceneLayout,
    mapper: InputMapper,
    keyboard: KeyboardState,
    state: LoopState,
    frames: u64,
}

impl App {
    /// The demo scene at window size with default gravity.
    pub fn new() -> Result<Self, SceneError> {
        let (scene, layout) = build_scene(&WorldDimensions::default(), config::DEFAULT_GRAVITY)?;
        Ok(Self::from_parts(scene, layout, InputMapper::default()))
    }

    pub fn from_parts(scene: Scene, layout: SceneLayout, mapper: InputMapper) -> Self {
        Self {
            scene,
            layout,
            mapper,
            keyboard: KeyboardState::new(),
            state: LoopState::Running,
            frames: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames fully executed (stepped and rendered).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Feed one pumped event. Close requests and Escape end the loop.
    pub fn handle_event(&mut self, event: LoopEvent) -> LoopState {
        if self.state == LoopState::Closing {
            return self.state;
        }
        match event {
            LoopEvent::CloseRequested | LoopEvent::KeyPressed(Key::Escape) => {
                tracing::info!(frames = self.frames, "closing");
                self.state = LoopState::Closing;
            }
            LoopEvent::KeyPressed(key) => {
                self.keyboard.press(key);
            }
            LoopEvent::KeyReleased(key) => {
                self.keyboard.release(key);
            }
            LoopEvent::FocusLost => {
                self.keyboard.clear();
            }
        }
        self.state
    }

    /// Run one frame against `target`. Does nothing once closing.
    pub fn frame<T: FrameTarget + ?Sized>(&mut self, frame_time: f32, target: &mut T) -> LoopState {
        if self.state == LoopState::Closing {
            return self.state;
        }

        let ctx = FrameContext {
            frame_time,
            keys: self.keyboard.clone(),
        };

        self.scene.step();
        self.scene.clear_forces();

        let actions = self.mapper.map(&ctx.keys, ctx.frame_time);
        self.apply(&actions);

        if tracing::enabled!(tracing::Level::TRACE) {
            self.scene.log_positions();
        }

        match render_frame(&self.scene, target, config::BACKGROUND) {
            Ok(_) => {}
            Err(RenderError::SurfaceLost) => tracing::debug!("surface lost, frame skipped"),
            Err(e) => tracing::warn!("render failed: {e}"),
        }

        self.frames += 1;
        self.state
    }

    fn apply(&mut self, actions: &[Action]) {
        let ball = self.layout.ball;
        for action in actions {
            let result = match *action {
                Action::ApplyForce(force) => self.scene.apply_force(ball, force),
                Action::ApplyTorque(torque) => self.scene.apply_torque(ball, torque),
                Action::SetGravity(gravity) => {
                    self.scene.set_gravity(gravity);
                    Ok(())
                }
            };
            if let Err(e) = result {
                tracing::warn!(?action, "action dropped: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use wirebox_common::Color;
    use wirebox_kernel::{DebugDraw, DebugFlags};
    use wirebox_render::DebugTextRenderer;

    const DT: f32 = 1.0 / 60.0;

    #[derive(Default)]
    struct CountingTarget {
        clears: usize,
        lines: usize,
        presents: usize,
    }

    impl DebugDraw for CountingTarget {
        fn draw_line(&mut self, _from: Vec3, _to: Vec3, _color: Color) {
            self.lines += 1;
        }

        fn debug_flags(&self) -> DebugFlags {
            DebugFlags::WIREFRAME
        }
    }

    impl FrameTarget for CountingTarget {
        fn clear(&mut self, _color: Color) {
            self.clears += 1;
        }

        fn present(&mut self) -> Result<(), RenderError> {
            self.presents += 1;
            Ok(())
        }
    }

    struct LostSurface;

    impl DebugDraw for LostSurface {
        fn draw_line(&mut self, _from: Vec3, _to: Vec3, _color: Color) {}

        fn debug_flags(&self) -> DebugFlags {
            DebugFlags::WIREFRAME
        }
    }

    impl FrameTarget for LostSurface {
        fn clear(&mut self, _color: Color) {}

        fn present(&mut self) -> Result<(), RenderError> {
            Err(RenderError::SurfaceLost)
        }
    }

    #[test]
    fn frame_steps_and_renders_once() {
        let mut app = App::new().unwrap();
        let mut target = CountingTarget::default();
        assert_eq!(app.frame(DT, &mut target), LoopState::Running);
        assert_eq!(app.scene().tick(), 1);
        assert_eq!(app.frames(), 1);
        assert_eq!(target.clears, 1);
        assert_eq!(target.presents, 1);
        assert!(target.lines > 0);
    }

    #[test]
    fn escape_stops_stepping_and_rendering() {
        let mut app = App::new().unwrap();
        let mut target = CountingTarget::default();
        app.frame(DT, &mut target);

        assert_eq!(app.handle_event(LoopEvent::KeyPressed(Key::Escape)), LoopState::Closing);
        assert_eq!(app.frame(DT, &mut target), LoopState::Closing);
        assert_eq!(app.frame(DT, &mut target), LoopState::Closing);

        assert_eq!(app.scene().tick(), 1);
        assert_eq!(app.frames(), 1);
        assert_eq!(target.presents, 1);
    }

    #[test]
    fn close_request_stops_the_loop() {
        let mut app = App::new().unwrap();
        let mut target = CountingTarget::default();
        app.handle_event(LoopEvent::CloseRequested);
        assert!(!app.is_running());
        app.frame(DT, &mut target);
        assert_eq!(app.scene().tick(), 0);
        assert_eq!(target.clears, 0);
    }

    #[test]
    fn closing_is_terminal() {
        let mut app = App::new().unwrap();
        app.handle_event(LoopEvent::CloseRequested);
        assert_eq!(app.handle_event(LoopEvent::KeyPressed(Key::Left)), LoopState::Closing);
        assert_eq!(app.state(), LoopState::Closing);
    }

    #[test]
    fn input_force_lands_in_the_next_step() {
        let mut app = App::new().unwrap();
        app.scene.set_gravity(Vec3::ZERO);
        let ball = app.layout().ball;
        let mut target = CountingTarget::default();

        app.handle_event(LoopEvent::KeyPressed(Key::Right));
        app.frame(DT, &mut target);
        // Stepped before the force was applied.
        assert!(app.scene().linear_velocity(ball).unwrap().x.abs() < 1e-6);
        assert!(app.scene().accumulated_force(ball).unwrap().x > 0.0);

        app.handle_event(LoopEvent::KeyReleased(Key::Right));
        app.frame(DT, &mut target);
        let vx = app.scene().linear_velocity(ball).unwrap().x;
        assert!(vx > 0.0);
        assert_eq!(app.scene().accumulated_force(ball), Some(Vec3::ZERO));

        app.frame(DT, &mut target);
        let vx_after = app.scene().linear_velocity(ball).unwrap().x;
        assert!((vx_after - vx).abs() < 1e-4);
    }

    #[test]
    fn left_and_right_give_no_horizontal_push() {
        let mut app = App::new().unwrap();
        let ball = app.layout().ball;
        let mut target = CountingTarget::default();
        app.handle_event(LoopEvent::KeyPressed(Key::Left));
        app.handle_event(LoopEvent::KeyPressed(Key::Right));
        app.frame(DT, &mut target);
        assert_eq!(app.scene().accumulated_force(ball).unwrap().x, 0.0);
        app.frame(DT, &mut target);
        assert!(app.scene().linear_velocity(ball).unwrap().x.abs() < 1e-5);
    }

    #[test]
    fn gravity_keys_change_scene_gravity() {
        let mut app = App::new().unwrap();
        let mut target = CountingTarget::default();
        assert_eq!(app.scene().gravity(), config::DEFAULT_GRAVITY);

        app.handle_event(LoopEvent::KeyPressed(Key::A));
        app.frame(DT, &mut target);
        assert_eq!(app.scene().gravity(), Vec3::new(-2.0, 0.0, 0.0));

        app.handle_event(LoopEvent::KeyPressed(Key::D));
        app.frame(DT, &mut target);
        assert_eq!(app.scene().gravity(), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let mut app = App::new().unwrap();
        let ball = app.layout().ball;
        let mut target = CountingTarget::default();
        app.handle_event(LoopEvent::KeyPressed(Key::Up));
        app.handle_event(LoopEvent::FocusLost);
        app.frame(DT, &mut target);
        assert_eq!(app.scene().accumulated_force(ball), Some(Vec3::ZERO));
    }

    #[test]
    fn lost_surface_does_not_stop_the_loop() {
        let mut app = App::new().unwrap();
        assert_eq!(app.frame(DT, &mut LostSurface), LoopState::Running);
        assert_eq!(app.frames(), 1);
    }

    #[test]
    fn text_target_sees_every_frame() {
        let mut app = App::new().unwrap();
        let mut renderer = DebugTextRenderer::new();
        for _ in 0..10 {
            app.frame(DT, &mut renderer);
        }
        assert_eq!(renderer.frames_presented(), 10);
        assert!(renderer.last_frame().contains("Frame 9"));
    }
}
