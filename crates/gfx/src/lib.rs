//! egui front end for tag lists: text measurement, painting, input routing
//! and the wgpu renderer the platform runner draws with.

use std::sync::Arc;
use std::time::Duration;

use egui::{Context as EguiContext, FullOutput, viewport::ViewportId};
use egui_wgpu::{
    Renderer as EguiWgpuRenderer, ScreenDescriptor,
    wgpu::{
        Color, CommandEncoderDescriptor, Device, DeviceDescriptor, Features, Instance,
        InstanceDescriptor, Limits, LoadOp, MemoryHints, Operations, PowerPreference, PresentMode,
        Queue, RenderPassColorAttachment, RenderPassDescriptor, RequestAdapterOptions, StoreOp,
        Surface, SurfaceCapabilities, SurfaceConfiguration, SurfaceError, SurfaceTexture,
        TextureFormat, TextureUsages, TextureViewDescriptor, Trace,
    },
};
use egui_winit::State as EguiWinitState;
use winit::{dpi::PhysicalSize, event::WindowEvent, window::Window};

pub mod keys;
pub mod text_measurer;
pub mod view;

pub use text_measurer::EguiTextMeasurer;
pub use view::TagListView;

/// Surface plus the device that presents to it.
struct Gpu {
    surface: Surface<'static>,
    device: Device,
    queue: Queue,
    config: SurfaceConfiguration,
}

fn preferred_format(caps: &SurfaceCapabilities) -> TextureFormat {
    caps.formats
        .iter()
        .copied()
        .find(TextureFormat::is_srgb)
        .unwrap_or(caps.formats[0])
}

impl Gpu {
    fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();
        let instance = Instance::new(&InstanceDescriptor::default());
        let surface = instance.create_surface(window).expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::LowPower,
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .expect("no suitable adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(&DeviceDescriptor {
            label: Some("taglist device"),
            required_features: Features::empty(),
            required_limits: Limits::default(),
            memory_hints: MemoryHints::MemoryUsage,
            trace: Trace::default(),
        }))
        .expect("request device");

        let caps = surface.get_capabilities(&adapter);
        let config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: preferred_format(&caps),
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: Vec::new(),
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::debug!(target: "gfx", "surface {}x{} {:?}", config.width, config.height, config.format);

        Self {
            surface,
            device,
            queue,
            config,
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    /// Next frame to draw into. On failure returns the repaint delay to ask for.
    fn acquire(&mut self) -> Result<SurfaceTexture, Option<Duration>> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                Err(Some(Duration::ZERO))
            }
            Err(err) => {
                log::warn!(target: "gfx", "surface error: {err:?}");
                Err(None)
            }
        }
    }
}

/// Owns the GPU surface and the egui state of one window.
pub struct Renderer {
    egui_context: EguiContext,
    egui_state: EguiWinitState,
    egui_renderer: EguiWgpuRenderer,
    gpu: Gpu,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Self {
        let egui_context = EguiContext::default();
        let egui_state = EguiWinitState::new(
            egui_context.clone(),
            ViewportId::ROOT,
            &*window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let gpu = Gpu::new(window);
        let egui_renderer = EguiWgpuRenderer::new(&gpu.device, gpu.config.format, None, 1, true);

        Self {
            egui_context,
            egui_state,
            egui_renderer,
            gpu,
        }
    }

    pub fn context(&self) -> &EguiContext {
        &self.egui_context
    }

    /// Feed a window event to egui. Returns whether egui wants a repaint.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).repaint
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    /// Run one egui pass and present it.
    ///
    /// Returns how long egui asked to wait before the next repaint.
    pub fn render<F: FnMut(&EguiContext)>(&mut self, window: &Window, build_ui: F) -> Option<Duration> {
        let frame = match self.gpu.acquire() {
            Ok(frame) => frame,
            Err(delay) => return delay,
        };

        let raw_input = self.egui_state.take_egui_input(window);
        let mut output = self.egui_context.run(raw_input, build_ui);
        let platform_output = std::mem::take(&mut output.platform_output);
        self.egui_state.handle_platform_output(window, platform_output);
        let repaint_delay = output
            .viewport_output
            .get(&ViewportId::ROOT)
            .map(|viewport| viewport.repaint_delay);

        self.paint(&frame, output);
        frame.present();
        repaint_delay
    }

    fn paint(&mut self, frame: &SurfaceTexture, output: FullOutput) {
        let Gpu {
            device,
            queue,
            config,
            ..
        } = &self.gpu;
        let target = frame.texture.create_view(&TextureViewDescriptor::default());
        let primitives = self
            .egui_context
            .tessellate(output.shapes, output.pixels_per_point);
        for (id, delta) in &output.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, delta);
        }

        let screen = ScreenDescriptor {
            size_in_pixels: [config.width, config.height],
            pixels_per_point: output.pixels_per_point,
        };
        let mut encoder = device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("taglist encoder"),
        });
        self.egui_renderer
            .update_buffers(device, queue, &mut encoder, &primitives, &screen);

        {
            let pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("taglist pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(self.clear_color()),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui_renderer
                .render(&mut pass.forget_lifetime(), &primitives, &screen);
        }

        for id in &output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        queue.submit(Some(encoder.finish()));
    }

    /// The panel fill, so the window edge matches the egui background.
    fn clear_color(&self) -> Color {
        let [r, g, b, _] = self
            .egui_context
            .style()
            .visuals
            .panel_fill
            .to_normalized_gamma_f32();
        Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: 1.0,
        }
    }
}
