use glam::Mat4;
use sdl2::keyboard::Scancode;
use sdl2::Sdl;
use tracing::{debug, info, warn};

use crate::ar::{ArSession, FixedMarker};
use crate::assets::AssetLoader;
use crate::camera::Camera;
use crate::config::{vec3, SceneConfig};
use crate::context::SimContext;
use crate::driver::FrameDriver;
use crate::engine::input::{InputEvent, InputState};
use crate::engine::time::FrameTimer;
use crate::engine::window::GameWindow;
use crate::error::GfxError;
use crate::events::AngleListeners;
use crate::recording::SampleRecorder;
use crate::renderer::{MeshStore, Renderer};
use crate::scene::{apply_preset, attach_target, build_demo_scene, target_model_source};
use crate::systems::{transform_propagation_system, SimplePhysics};
use crate::ui::bridge::LaunchState;
use crate::ui::{
    action_for_key, change_gravity, update_kinematic_labels, ControlPanel, Hud, Label,
    TextRenderer, UiAction, UiBridge,
};

pub struct DemoApp {
    config: SceneConfig,
    ctx: SimContext,
    meshes: MeshStore,
    driver: FrameDriver<SimplePhysics>,
    loader: Option<AssetLoader>,
    ui: UiBridge,
    panel: ControlPanel,
    hud: Hud,
    camera: Camera,
    renderer: Renderer,
    text_renderer: TextRenderer,
}

impl DemoApp {
    pub fn new(config: SceneConfig, window: &GameWindow) -> Result<Self, GfxError> {
        let mut listeners = AngleListeners::default();
        listeners.subscribe(|ctx, event| {
            ctx.labels
                .set(Label::Angle, format!("{:.1}°", event.new_angle));
        });
        listeners.subscribe(|_ctx, event| debug!(angle = event.new_angle, "launch angle changed"));

        let (ctx, meshes) = build_demo_scene(&config, listeners);

        let physics = SimplePhysics::new(vec3(config.world.gravity));
        let mut driver = FrameDriver::new(physics, config.world.max_step);
        driver.add_observer(update_kinematic_labels);
        if config.ar.enabled {
            info!(pattern = %config.ar.pattern, "AR alignment enabled");
            driver.add_observer(ArSession::new(FixedMarker::from_config(&config.ar)));
        }
        let interval = config.instrumentation.sample_interval_ms;
        let recorder = match &config.instrumentation.csv_path {
            Some(path) => SampleRecorder::to_csv(path, interval).unwrap_or_else(|err| {
                warn!(%err, path = %path.display(), "cannot open sample file, logging only");
                SampleRecorder::new(interval, None)
            }),
            None => SampleRecorder::new(interval, None),
        };
        driver.add_observer(recorder);

        let loader = AssetLoader::spawn(target_model_source(&config.target));

        let (w, h) = window.size();
        let renderer = Renderer::init()?;
        renderer.set_viewport(w, h);

        Ok(Self {
            config,
            ctx,
            meshes,
            driver,
            loader: Some(loader),
            ui: UiBridge::new(),
            panel: ControlPanel::new(w as f32, h as f32),
            hud: Hud::new(),
            camera: Camera::new(),
            renderer,
            text_renderer: TextRenderer::new()?,
        })
    }

    pub fn run(&mut self, sdl: &Sdl, window: &GameWindow) -> Result<(), GfxError> {
        let mut event_pump = sdl.event_pump().map_err(GfxError::Sdl)?;
        let mut input = InputState::new();
        let mut timer = FrameTimer::new();

        loop {
            timer.tick();
            input.update(&mut event_pump);

            if input.should_quit() {
                info!("quit requested");
                break;
            }

            for event in &input.events {
                self.handle_event(*event);
            }
            let (dx, dy) = input.orbit_delta();
            self.camera.orbit(dx, dy);
            if input.scroll_dy != 0.0 {
                self.camera.zoom(input.scroll_dy);
            }

            self.poll_assets();
            self.ui.tick(timer.dt);
            self.driver.tick(&mut self.ctx, timer.dt, timer.elapsed);
            self.hud.update(timer.dt);

            transform_propagation_system(&mut self.ctx.world);
            self.render(window);

            window.swap();
        }
        Ok(())
    }

    fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyPressed(Scancode::F3) => self.hud.toggle_fps(),
            InputEvent::KeyPressed(key) => {
                if let Some(action) = action_for_key(key) {
                    self.apply(action);
                }
            }
            InputEvent::MouseClicked { x, y } => {
                if let Some(action) = self.panel.hit_test(x, y) {
                    self.apply(action);
                }
            }
            InputEvent::Resized { width, height } => {
                self.panel.layout(width as f32, height as f32);
                self.renderer.set_viewport(width, height);
            }
        }
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::LaunchOrReset => {
                if self.ui.press_launch(&mut self.ctx) == LaunchState::Ready {
                    self.driver.reset_clock();
                }
            }
            UiAction::PauseOrResume => self.ui.press_pause(&mut self.ctx),
            UiAction::Preset(index) => {
                apply_preset(&mut self.ctx, &mut self.meshes, &self.config, index);
            }
            UiAction::Gravity(axis, steps) => {
                let gravity = &mut self.driver.physics_mut().gravity;
                change_gravity(&mut self.ctx, gravity, axis, steps);
            }
        }
    }

    fn poll_assets(&mut self) {
        let Some(result) = self.loader.as_mut().and_then(AssetLoader::poll) else {
            return;
        };
        self.loader = None;
        match result {
            Ok(mesh) => attach_target(&mut self.ctx, &mut self.meshes, &self.config.target, mesh),
            Err(err) => warn!(%err, "target model failed to load, continuing without a target"),
        }
    }

    fn render(&mut self, window: &GameWindow) {
        let view = self.camera.view_matrix();
        let proj = self.camera.projection_matrix(window.aspect_ratio());

        self.renderer.draw_scene(
            &self.ctx.world,
            &mut self.meshes,
            &view,
            &proj,
            self.camera.position(),
        );

        // UI pass, on top of the scene
        let (w, h) = window.size();
        let ui_proj = Mat4::orthographic_rh_gl(0.0, w as f32, h as f32, 0.0, -1.0, 1.0);

        unsafe {
            gl::Disable(gl::DEPTH_TEST);
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        }

        self.hud
            .draw(&mut self.text_renderer, &self.ctx.labels, &ui_proj);
        self.panel.draw(&mut self.text_renderer, &self.ui, &ui_proj);

        unsafe {
            gl::Disable(gl::BLEND);
            gl::Enable(gl::DEPTH_TEST);
        }
    }
}
