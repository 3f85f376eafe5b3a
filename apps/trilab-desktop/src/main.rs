use anyhow::Result;
use clap::{Parser, Subcommand};
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use trilab_input::{InputSnapshot, Key};
use trilab_kernel::{FrameController, FrameInput, RotateController, TintController};
use trilab_render::{FrameDraw, RenderView};
use trilab_render_wgpu::TriangleRenderer;
use trilab_tools::{SceneInspector, notice_text};
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const WINDOW_SIZE: PhysicalSize<u32> = PhysicalSize::new(800, 600);
/// Pixels the centered window is raised above true center.
const WINDOW_LIFT: i32 = 10;
/// Fixed update rate: 30 ticks per second.
const TICK_RATE: f64 = 1.0 / 30.0;
/// Ticks owed beyond this in one frame are dropped.
const MAX_TICKS_PER_FRAME: u32 = 4;

#[derive(Parser)]
#[command(name = "trilab-desktop", about = "Interactive triangle exercises")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    exercise: Exercise,
}

#[derive(Subcommand)]
enum Exercise {
    /// Fixed RGB triangle: W/S zoom, left-drag rotates
    Rotate,
    /// Loaded triangle with color targets and alpha control
    Tint {
        /// Vertex file, one `x,y,z` per line
        #[arg(long, default_value = "triangle.txt")]
        vertices: PathBuf,
    },
}

impl Exercise {
    fn controller(&self) -> Box<dyn FrameController> {
        match self {
            Exercise::Rotate => Box::new(RotateController::new()),
            Exercise::Tint { vertices } => Box::new(TintController::new(
                trilab_assets::load_triangle_or_absent(vertices),
            )),
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyM => Key::M,
        _ => return None,
    })
}

/// Top-left corner that centers `window` on a monitor, lifted by `WINDOW_LIFT`.
fn centered_position(
    monitor_origin: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let x = (monitor_size.width as i32 - window.width as i32) / 2;
    let y = (monitor_size.height as i32 - window.height as i32) / 2 - WINDOW_LIFT;
    PhysicalPosition::new(monitor_origin.x + x, monitor_origin.y + y)
}

/// Application state.
struct AppState {
    controller: Box<dyn FrameController>,
    input: InputSnapshot,
    show_inspector: bool,
    aspect: f32,
    last_frame: Instant,
    // Fixed timestep
    tick_accumulator: f64,
    tick_rate: f64,
}

impl AppState {
    fn new(controller: Box<dyn FrameController>) -> Self {
        Self {
            controller,
            input: InputSnapshot::new(),
            show_inspector: false,
            aspect: RenderView::aspect_of(WINDOW_SIZE.width, WINDOW_SIZE.height),
            last_frame: Instant::now(),
            tick_accumulator: 0.0,
            tick_rate: TICK_RATE,
        }
    }

    fn load(&mut self) {
        for notice in self.controller.load(self.input.cursor()) {
            println!("{}", notice_text(notice));
        }
        self.last_frame = Instant::now();
        tracing::info!(exercise = self.controller.name(), "exercise loaded");
    }

    /// Run the ticks owed for `dt` seconds. Returns true once the exercise quits.
    fn update(&mut self, dt: f64) -> bool {
        self.tick_accumulator += dt;
        let mut ticks = 0;
        while self.tick_accumulator >= self.tick_rate {
            if ticks == MAX_TICKS_PER_FRAME {
                tracing::debug!(
                    owed = self.tick_accumulator / self.tick_rate,
                    "update loop behind, dropping ticks"
                );
                self.tick_accumulator = 0.0;
                break;
            }
            self.tick_accumulator -= self.tick_rate;
            ticks += 1;

            let input = FrameInput::sample(&self.input, self.controller.bindings());
            let report = self.controller.step(&input);
            for notice in report.notices {
                println!("{}", notice_text(notice));
            }
            if report.exit {
                return true;
            }
        }
        false
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        if code == KeyCode::F1 {
            if pressed {
                self.show_inspector = !self.show_inspector;
            }
            return;
        }
        let Some(key) = map_key(code) else {
            return;
        };
        if pressed {
            self.input.press(key);
        } else {
            self.input.release(key);
        }
    }

    /// Left button edge. A press the UI took never starts a drag, but a
    /// release always ends one even when the pointer is over the UI.
    fn mouse_button(&mut self, pressed: bool, consumed_by_ui: bool) {
        if pressed && consumed_by_ui {
            return;
        }
        self.input.set_primary_button(pressed);
    }

    /// Drop everything held; the release events go to another window.
    fn lose_focus(&mut self) {
        self.input.clear_held();
        tracing::debug!("focus lost, held input cleared");
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        if !self.show_inspector {
            return;
        }

        let summary = SceneInspector::summary(self.controller.as_ref());

        egui::SidePanel::left("inspector")
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading(format!("trilab: {}", summary.exercise));
                ui.separator();
                ui.label(format!("Tick: {}", summary.ticks));
                ui.label(format!("Distance: {:.1}", summary.distance));
                ui.label(format!(
                    "Yaw: {:.1}  Pitch: {:.1}",
                    summary.yaw, summary.pitch
                ));
                let cursor = self.input.cursor();
                ui.label(format!("Cursor: ({:.0}, {:.0})", cursor.x, cursor.y));

                let color = (summary.current, summary.target, summary.alpha);
                if let (Some(c), Some(t), Some(a)) = color {
                    ui.separator();
                    ui.heading("Color");
                    ui.label(format!("Current: ({:.3}, {:.3}, {:.3})", c.r, c.g, c.b));
                    ui.label(format!("Target: ({:.1}, {:.1}, {:.1})", t.r, t.g, t.b));
                    ui.label(format!("Alpha: {a:.2}"));
                }
                if !summary.has_geometry {
                    ui.colored_label(egui::Color32::RED, "No geometry loaded");
                }

                ui.separator();
                ui.heading("Keys");
                for (key, action) in self.controller.bindings().entries() {
                    ui.small(format!("{key:?}: {action:?}"));
                }

                ui.separator();
                ui.small("F1: Toggle Inspector | LMB: Rotate");
            });
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<TriangleRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(controller: Box<dyn FrameController>) -> Self {
        Self {
            state: AppState::new(controller),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = (now - self.state.last_frame).as_secs_f64().min(0.25);
        self.state.last_frame = now;

        if self.state.update(dt) {
            tracing::info!(
                exercise = self.state.controller.name(),
                ticks = self.state.controller.ticks(),
                "quit"
            );
            event_loop.exit();
            return;
        }

        let frame = match FrameDraw::compose(self.state.controller.as_ref(), self.state.aspect) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("cannot draw {}: {e}", self.state.controller.name());
                event_loop.exit();
                return;
            }
        };

        let (
            Some(window),
            Some(surface),
            Some(device),
            Some(queue),
            Some(config),
            Some(renderer),
            Some(egui_winit),
            Some(egui_renderer),
        ) = (
            self.window.as_ref(),
            self.surface.as_ref(),
            self.device.as_ref(),
            self.queue.as_ref(),
            self.config.as_ref(),
            self.renderer.as_ref(),
            self.egui_winit.as_mut(),
            self.egui_renderer.as_mut(),
        )
        else {
            return;
        };

        let output = match surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                surface.configure(device, config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        renderer.render(device, queue, &view, &frame);

        let raw_input = egui_winit.take_egui_input(window);
        let state = &self.state;
        let full_output = self.egui_ctx.run(raw_input, |ctx| state.draw_ui(ctx));
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [config.width, config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        egui_renderer.update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
        window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let mut attrs = Window::default_attributes()
            .with_title("trilab")
            .with_inner_size(WINDOW_SIZE);
        if let Some(monitor) = event_loop.primary_monitor() {
            attrs = attrs.with_position(centered_position(
                monitor.position(),
                monitor.size(),
                WINDOW_SIZE,
            ));
        }
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let info = adapter.get_info();
        println!(
            "Graphics adapter: {} | backend: {} | driver: {} {}",
            info.name,
            info.backend.to_str(),
            info.driver,
            info.driver_info
        );
        window.set_title(&format!(
            "trilab {} | {} ({})",
            self.state.controller.name(),
            info.name,
            info.backend.to_str()
        ));

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("trilab_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        // Vertex colors are written as given, without an sRGB encode.
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.aspect = RenderView::aspect_of(size.width, size.height);

        let renderer = TriangleRenderer::new(&device, surface_format, size.width, size.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            info.backend.to_str()
        );

        self.state.load();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let consumed = match (&mut self.egui_winit, &self.window) {
            (Some(egui_winit), Some(window)) => egui_winit.on_window_event(window, &event).consumed,
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state.aspect = RenderView::aspect_of(config.width, config.height);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::Focused(false) => {
                self.state.lose_focus();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;
                // Releases still reach the controller so no key stays held.
                if !(pressed && consumed) {
                    self.state.handle_key(key, pressed);
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                self.state
                    .mouse_button(btn_state == ElementState::Pressed, consumed);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.input.move_cursor(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("trilab-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(cli.exercise.controller());
    event_loop.run_app(&mut app)?;

    Ok(())
}
