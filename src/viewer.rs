//! Interactive window: pointer input in, ribbons out.
//!
//! ```ignore
//! use ribbons::prelude::*;
//!
//! Viewer::new(RibbonConfig::new().with_ribbons_count(20))
//!     .run()
//!     .expect("viewer failed");
//! ```
//!
//! | Input | Action |
//! |-------|--------|
//! | pointer move | move the anchor (when following the pointer) |
//! | right drag | orbit the camera |
//! | wheel | zoom |
//! | `F` | toggle pointer following |
//! | `A` | toggle auto-move |
//! | `R` | regenerate ribbons |
//! | `Up` / `Down` | add / remove a ribbon |
//! | `Escape` | quit |

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::RibbonConfig;
use crate::controller::Controller;
use crate::error::ViewerError;
use crate::gpu::GpuState;
use crate::input::{Input, KeyCode, MouseButton};
use crate::time::Time;

/// Window that runs a [`Controller`] and draws its ribbons.
pub struct Viewer {
    config: RibbonConfig,
    title: String,
}

impl Viewer {
    pub fn new(config: RibbonConfig) -> Self {
        Self {
            config,
            title: "Ribbons".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Open the window and block until it is closed.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config, self.title);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct App {
    title: String,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    controller: Controller,
    input: Input,
    time: Time,
    /// First fatal error; returned from `Viewer::run`.
    error: Option<ViewerError>,
}

impl App {
    fn new(config: RibbonConfig, title: String) -> Self {
        Self {
            title,
            window: None,
            gpu_state: None,
            controller: Controller::new(config),
            input: Input::new(),
            time: Time::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let size = window.inner_size();
        self.input.set_window_size(size.width, size.height);

        let gpu_state = pollster::block_on(GpuState::new(window.clone()))?;
        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn handle_keys(&mut self, event_loop: &ActiveEventLoop) {
        if self.input.key_pressed(KeyCode::Escape) {
            event_loop.exit();
            return;
        }

        let mut config = self.controller.config().clone();
        if self.input.key_pressed(KeyCode::F) {
            config.follow_pointer = !config.follow_pointer;
            log::info!("follow pointer: {}", config.follow_pointer);
        }
        if self.input.key_pressed(KeyCode::A) {
            config.auto_move = !config.auto_move;
            log::info!("auto move: {}", config.auto_move);
        }
        if self.input.key_pressed(KeyCode::Up) {
            config.ribbons_count += 1;
        }
        if self.input.key_pressed(KeyCode::Down) {
            config.ribbons_count = config.ribbons_count.saturating_sub(1);
        }
        self.controller.reconfigure(config);

        if self.input.key_pressed(KeyCode::R) {
            self.controller.reset();
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.time.update();
        self.handle_keys(event_loop);

        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };

        if self.input.mouse_held(MouseButton::Right) {
            gpu_state.camera.orbit(self.input.mouse_delta());
        }
        if self.input.scroll_delta() != 0.0 {
            gpu_state.camera.zoom(self.input.scroll_delta());
        }

        if self.input.mouse_moved() && !self.input.mouse_held(MouseButton::Right) {
            let depth = self.controller.config().anchor_depth;
            if let Some(target) =
                gpu_state
                    .camera
                    .project_to_depth(self.input.mouse_ndc(), gpu_state.aspect(), depth)
            {
                self.controller.set_pointer_target(target);
            }
        }

        self.controller.tick(dt);
        gpu_state.sync(self.controller.ribbons_mut());

        match gpu_state.render() {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu_state.resize(winit::dpi::PhysicalSize {
                    width: gpu_state.config.width,
                    height: gpu_state.config.height,
                })
            }
            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
            Err(e) => log::warn!("render error: {:?}", e),
        }

        self.input.begin_frame();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.input
                    .set_window_size(physical_size.width, physical_size.height);
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
