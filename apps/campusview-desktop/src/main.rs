mod touch;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use campusview_camera::OrbitManipulator;
use campusview_common::ViewpointField;
use campusview_input::GestureEvent;
use campusview_render::{ModelAsset, Scene};
use campusview_render_wgpu::WgpuRenderer;
use campusview_screen::{Applied, ScreenConfig, ViewerScreen};
use campusview_viewpoint::ViewpointRegistry;
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::touch::{TouchTracker, TrackpadPinch, wheel_pinch};

/// Pixels of smooth scrolling that count as one wheel line.
const PIXELS_PER_LINE: f32 = 40.0;

#[derive(Parser)]
#[command(name = "campusview-desktop", about = "Interactive 3D campus viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Preset file (YAML or JSON) to use instead of the built-in campus presets
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Campus model asset
    #[arg(long, default_value = "assets/nwssu.glb")]
    model: String,

    /// Viewpoint transition length in milliseconds
    #[arg(long, default_value = "500")]
    transition_ms: u64,
}

/// Application state outside the GPU.
struct AppState {
    screen: ViewerScreen<OrbitManipulator>,
    /// Text in the manual entry fields, committed on Apply.
    drafts: [String; 3],
    last_readout: Option<String>,
    cursor: Vec2,
    dragging: bool,
    touches: TouchTracker,
    trackpad: TrackpadPinch,
    last_frame: Instant,
}

impl AppState {
    fn new(screen: ViewerScreen<OrbitManipulator>) -> Self {
        let drafts = ViewpointField::ALL.map(|f| screen.custom_text(f));
        Self {
            screen,
            drafts,
            last_readout: None,
            cursor: Vec2::ZERO,
            dragging: false,
            touches: TouchTracker::new(),
            trackpad: TrackpadPinch::new(),
            last_frame: Instant::now(),
        }
    }

    fn update(&mut self, dt: Duration) {
        self.screen.frame(dt);
    }

    fn gestures(&mut self, events: impl IntoIterator<Item = GestureEvent>) {
        for event in events {
            self.screen.handle_gesture(event);
        }
    }

    fn apply_drafts(&mut self) {
        for (field, text) in ViewpointField::ALL.into_iter().zip(&self.drafts) {
            if self.screen.set_custom_field(field, text).is_err() {
                return;
            }
        }
        if let Err(e) = self.screen.apply_custom() {
            tracing::warn!("custom viewpoint not applied: {e}");
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        let toggle = if self.screen.controls_visible() {
            "Hide Controls"
        } else {
            "Show Controls"
        };
        egui::Area::new(egui::Id::new("controls_toggle"))
            .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
            .show(ctx, |ui| {
                if ui.button(toggle).clicked() {
                    self.screen.toggle_controls();
                }
            });

        if !self.screen.controls_visible() {
            return;
        }

        let presets: Vec<(String, String)> = self
            .screen
            .registry()
            .entries()
            .iter()
            .map(|e| (e.key.clone(), e.display_label().to_string()))
            .collect();
        let applied_label = match self.screen.applied() {
            Applied::Preset(key) => self
                .screen
                .registry()
                .label(key)
                .unwrap_or(key.as_str())
                .to_string(),
            Applied::Custom => "Custom".to_string(),
        };
        let mut picked: Option<String> = None;
        let mut apply = false;
        let mut get_coords = false;

        egui::SidePanel::left("viewpoints")
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.heading("Campus Viewer");
                ui.separator();

                ui.label("Presets");
                ui.horizontal_wrapped(|ui| {
                    for (key, label) in &presets {
                        let selected = self.screen.applied_key() == Some(key.as_str());
                        if ui.selectable_label(selected, label.as_str()).clicked() {
                            picked = Some(key.clone());
                        }
                    }
                });
                egui::ComboBox::from_label("Viewpoint")
                    .selected_text(applied_label.as_str())
                    .show_ui(ui, |ui| {
                        for (key, label) in &presets {
                            let selected = self.screen.applied_key() == Some(key.as_str());
                            if ui.selectable_label(selected, label.as_str()).clicked() {
                                picked = Some(key.clone());
                            }
                        }
                    });

                ui.separator();
                ui.label("Manual Viewpoint");
                for (field, draft) in ViewpointField::ALL.into_iter().zip(self.drafts.iter_mut()) {
                    ui.label(field.label());
                    ui.text_edit_singleline(draft);
                }
                ui.horizontal(|ui| {
                    apply = ui.button("Apply").clicked();
                    get_coords = ui.button("Get Coords").clicked();
                });

                if let Some(notice) = self.screen.notice() {
                    ui.colored_label(egui::Color32::YELLOW, notice);
                }
                if let Some(readout) = &self.last_readout {
                    ui.separator();
                    ui.monospace(readout.as_str());
                }

                ui.separator();
                ui.small("Drag: orbit | Wheel/Pinch: zoom");
            });

        if let Some(key) = picked {
            // Unknown keys are logged by the screen.
            let _ = self.screen.select_preset(&key);
        }
        if apply {
            self.apply_drafts();
        }
        if get_coords {
            self.last_readout = self.screen.fetch_look_at().map(|r| r.to_string());
        }
    }
}

/// Window, surface and GPU resources, created on resume.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Campus Viewer")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("campusview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);
        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn redraw(&mut self, state: &mut AppState, egui_ctx: &EguiContext) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
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

        self.renderer.render(
            &self.device,
            &self.queue,
            &view,
            state.screen.scene(),
            &state.screen.render_view(),
        );

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| state.draw_ui(ctx));
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
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
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
        self.window.request_redraw();
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(screen: ViewerScreen<OrbitManipulator>) -> Self {
        Self {
            state: AppState::new(screen),
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.egui_ctx) {
            Ok(gpu) => {
                let size = gpu.window.inner_size();
                self.state.screen.resize(size.width, size.height);
                self.state.screen.mount(OrbitManipulator::default());
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
        if response.consumed {
            return;
        }

        let state = &mut self.state;
        match event {
            WindowEvent::CloseRequested => {
                state.screen.unmount();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size);
                state.screen.resize(new_size.width, new_size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                state.cursor = Vec2::new(position.x as f32, position.y as f32);
                if state.dragging {
                    state.gestures([GestureEvent::PanUpdate {
                        x: state.cursor.x,
                        y: state.cursor.y,
                        pointers: 1,
                    }]);
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => match btn_state {
                ElementState::Pressed if !state.dragging => {
                    state.dragging = true;
                    state.gestures([GestureEvent::PanBegin {
                        x: state.cursor.x,
                        y: state.cursor.y,
                        pointers: 1,
                    }]);
                }
                ElementState::Released if state.dragging => {
                    state.dragging = false;
                    state.gestures([GestureEvent::PanEnd]);
                }
                _ => {}
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                if lines != 0.0 {
                    let focal = state.cursor;
                    state.gestures(wheel_pinch(lines, focal));
                }
            }
            WindowEvent::PinchGesture { delta, phase, .. } => {
                let focal = state.cursor;
                let events = state.trackpad.gesture(delta as f32, phase, focal);
                state.gestures(events);
            }
            WindowEvent::Touch(touch) => {
                let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                let events = state.touches.touch(touch.id, touch.phase, position);
                state.gestures(events);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - state.last_frame).min(Duration::from_millis(100));
                state.last_frame = now;
                state.update(dt);
                gpu.redraw(state, &self.egui_ctx);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn build_screen(cli: &Cli) -> Result<ViewerScreen<OrbitManipulator>> {
    let registry = match &cli.presets {
        Some(path) => ViewpointRegistry::load(path)
            .with_context(|| format!("loading presets from {}", path.display()))?,
        None => ViewpointRegistry::campus(),
    };
    if !std::path::Path::new(&cli.model).exists() {
        tracing::warn!(model = %cli.model, "model asset not found; showing placeholder");
    }
    let config = ScreenConfig {
        transition: Duration::from_millis(cli.transition_ms),
        ..ScreenConfig::default()
    };
    Ok(ViewerScreen::new(
        registry,
        Scene::new(ModelAsset::new(cli.model.clone())),
        config,
    )?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("campusview-desktop starting");

    let screen = build_screen(&cli)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(screen);
    event_loop.run_app(&mut app)?;

    Ok(())
}
