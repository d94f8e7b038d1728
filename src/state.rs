use winit::{
    event::{ElementState, KeyEvent, WindowEvent, MouseScrollDelta, MouseButton},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};
use wgpu::util::DeviceExt;
use anyhow::Context;
use pdfium_render::prelude::PdfDocument;
use crate::gpu::{GpuContext, texture::Texture};
use crate::loader::{DocumentLoader, LoadState};
use crate::locator::Locator;
use crate::pdf::{PdfSystem, render::{DocumentRenderer, Viewport}};
use crate::ui::{present, window_title, Presentation, UiState};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    tex_coords: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct CameraUniform {
    scale: [f32; 2],
    translation: [f32; 2],
    rotation: [f32; 2], // x: ángulo, y: relleno
}

const VERTICES: &[Vertex] = &[
    Vertex { position: [-1.0, 1.0, 0.0], tex_coords: [0.0, 0.0] },
    Vertex { position: [-1.0, -1.0, 0.0], tex_coords: [0.0, 1.0] },
    Vertex { position: [1.0, -1.0, 0.0], tex_coords: [1.0, 1.0] },
    Vertex { position: [1.0, 1.0, 0.0], tex_coords: [1.0, 0.0] },
];

const INDICES: &[u16] = &[0, 1, 2, 2, 3, 0];

const CLEAR_NEUTRAL: wgpu::Color = wgpu::Color { r: 0.05, g: 0.05, b: 0.08, a: 1.0 };
const CLEAR_ERROR: wgpu::Color = wgpu::Color { r: 0.18, g: 0.03, b: 0.03, a: 1.0 };

/// Textura de la página actual con su bind group.
struct PageTexture {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// Visor en ventana: dibuja la vista que toca según el estado de carga.
pub struct State<'a> {
    gpu: GpuContext,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    num_indices: u32,

    // BindGroups
    texture_bg_layout: wgpu::BindGroupLayout,
    spinner_bind_group: wgpu::BindGroup,
    error_bind_group: wgpu::BindGroup,
    camera_bind_group: wgpu::BindGroup,
    page: Option<PageTexture>,

    // Estado Cámara
    camera_buffer: wgpu::Buffer,
    camera_uniform: CameraUniform,
    zoom: f32,
    pan: [f32; 2],

    // Lógica App
    ui: UiState,
    engine: &'a PdfSystem,
    pending: Option<Option<Locator>>, // Some mientras la carga no se ha hecho
    load_state: LoadState<PdfDocument<'a>>,
    current_page: u16,
    redraw_attempts: u64,

    // Input State
    mouse_pressed: bool,
    last_mouse_pos: [f64; 2], // Para calcular el delta del drag
}

impl<'a> State<'a> {
    pub async fn new(window: &Window, engine: &'a PdfSystem, locator: Option<Locator>) -> anyhow::Result<Self> {
        let gpu = GpuContext::new(window).await.context("Fallo al inicializar la GPU")?;
        let ui = UiState::new(&gpu.device, &gpu.queue).context("Fallo al crear los iconos")?;

        let texture_bg_layout = gpu.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry { binding: 0, visibility: wgpu::ShaderStages::FRAGMENT, ty: wgpu::BindingType::Texture { multisampled: false, view_dimension: wgpu::TextureViewDimension::D2, sample_type: wgpu::TextureSampleType::Float { filterable: true } }, count: None },
                wgpu::BindGroupLayoutEntry { binding: 1, visibility: wgpu::ShaderStages::FRAGMENT, ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering), count: None },
            ],
            label: Some("Texture BG Layout"),
        });

        let spinner_bind_group = texture_bind_group(&gpu.device, &texture_bg_layout, &ui.icon_spinner, "Spinner BG");
        let error_bind_group = texture_bind_group(&gpu.device, &texture_bg_layout, &ui.icon_error, "Error BG");

        let camera_uniform = CameraUniform { scale: [1.0, 1.0], translation: [0.0, 0.0], rotation: [0.0, 0.0] };
        let camera_buffer = gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bg_layout = gpu.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer { ty: wgpu::BufferBindingType::Uniform, has_dynamic_offset: false, min_binding_size: None },
                count: None,
            }],
            label: Some("Camera BG Layout"),
        });

        let camera_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bg_layout,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() }],
            label: Some("Camera BG"),
        });

        let shader = gpu.device.create_shader_module(wgpu::include_wgsl!("../assets/shaders/shader.wgsl"));
        let render_pipeline_layout = gpu.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Pipeline Layout"),
            bind_group_layouts: &[&texture_bg_layout, &camera_bg_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = gpu.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState { module: &shader, entry_point: "vs_main", buffers: &[wgpu::VertexBufferLayout { array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress, step_mode: wgpu::VertexStepMode::Vertex, attributes: &[wgpu::VertexAttribute { offset: 0, shader_location: 0, format: wgpu::VertexFormat::Float32x3 }, wgpu::VertexAttribute { offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress, shader_location: 1, format: wgpu::VertexFormat::Float32x2 }] }] },
            fragment: Some(wgpu::FragmentState { module: &shader, entry_point: "fs_main", targets: &[Some(wgpu::ColorTargetState { format: gpu.config.format, blend: Some(wgpu::BlendState::ALPHA_BLENDING), write_mask: wgpu::ColorWrites::ALL })] }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let vertex_buffer = gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            gpu, render_pipeline, vertex_buffer, index_buffer,
            num_indices: INDICES.len() as u32,
            texture_bg_layout, spinner_bind_group, error_bind_group, camera_bind_group,
            page: None,
            camera_buffer, camera_uniform,
            zoom: 1.0, pan: [0.0, 0.0],
            ui, engine,
            pending: Some(locator),
            load_state: LoadState::Loading,
            current_page: 0,
            redraw_attempts: 0,
            mouse_pressed: false, last_mouse_pos: [0.0, 0.0],
        })
    }

    // --- LÓGICA CORE ---

    /// Ejecuta la carga tras el primer intento de dibujar el indicador de
    /// progreso, se haya presentado o no. Devuelve true en el frame en que el
    /// estado pasa a terminal.
    pub fn poll_load(&mut self) -> bool {
        if !load_is_due(self.redraw_attempts, self.pending.is_some()) {
            return false;
        }
        let Some(locator) = self.pending.take() else {
            return false;
        };

        let loader = DocumentLoader::observed(self.engine, locator.as_ref(), |state| {
            log::debug!("Estado de carga: {}", present(state).summary());
        });
        self.load_state = loader.into_state();

        if let Some(message) = self.load_state.failure_message() {
            log::error!("{}", message);
        }
        if self.load_state.document().is_some() {
            self.load_page(0);
        }
        true
    }

    /// Título de ventana para el estado actual (el mensaje en caso de error).
    pub fn window_title(&self, base: &str) -> String {
        window_title(base, &present(&self.load_state), self.current_page)
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.gpu.size.width, self.gpu.size.height)
    }

    fn load_page(&mut self, page_idx: u16) {
        let LoadState::Success(doc) = &self.load_state else {
            return;
        };

        let bitmap = match self.engine.render(doc, page_idx, self.viewport()) {
            Ok(bitmap) => bitmap,
            Err(e) => {
                log::warn!("No se pudo renderizar la página {}: {}", page_idx + 1, e);
                return;
            }
        };

        match Texture::from_bytes(&self.gpu.device, &self.gpu.queue, &bitmap.data, bitmap.width, bitmap.height, wgpu::TextureFormat::Bgra8UnormSrgb, Some("PDF")) {
            Ok(texture) => {
                let bind_group = texture_bind_group(&self.gpu.device, &self.texture_bg_layout, &texture, "Page BG");
                self.page = Some(PageTexture { texture, bind_group });
                self.current_page = page_idx;
                log::info!("Página cargada: {}", page_idx + 1);
            }
            Err(e) => log::warn!("Bitmap de página inválido: {}", e),
        }
    }

    fn page_count(&self) -> u16 {
        self.load_state.document().map_or(0, |doc| doc.pages().len())
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.gpu.resize(new_size);
        // Re-ajustar la página al nuevo viewport
        if self.page.is_some() && new_size.width > 0 && new_size.height > 0 {
            self.load_page(self.current_page);
        }
    }

    pub fn input(&mut self, event: &WindowEvent) -> bool {
        if self.load_state.document().is_none() {
            return false;
        }

        match event {
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.mouse_pressed = *state == ElementState::Pressed;
                true
            },
            WindowEvent::CursorMoved { position, .. } => {
                // Normalizado -1 a 1
                let x = (position.x / self.gpu.size.width.max(1) as f64) * 2.0 - 1.0;
                let y = -((position.y / self.gpu.size.height.max(1) as f64) * 2.0 - 1.0);

                let dx = x - self.last_mouse_pos[0];
                let dy = y - self.last_mouse_pos[1];
                self.last_mouse_pos = [x, y];

                if self.mouse_pressed {
                    // Arrastrar documento
                    self.pan[0] += dx as f32;
                    self.pan[1] += dy as f32;
                }
                true
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta { MouseScrollDelta::LineDelta(_, y) => *y * 0.1, MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.001 };
                self.zoom = (self.zoom + scroll).clamp(0.1, 10.0);
                true
            },
            WindowEvent::KeyboardInput { event: KeyEvent { state: ElementState::Pressed, physical_key: PhysicalKey::Code(keycode), .. }, .. } => {
                match keycode {
                    KeyCode::ArrowRight => {
                        if self.current_page + 1 < self.page_count() {
                            self.load_page(self.current_page + 1);
                        }
                        true
                    },
                    KeyCode::ArrowLeft => {
                        if self.current_page > 0 {
                            self.load_page(self.current_page - 1);
                        }
                        true
                    },
                    _ => false,
                }
            },
            _ => false,
        }
    }

    pub fn update(&mut self) {
        let (w, h) = (self.gpu.size.width.max(1) as f32, self.gpu.size.height.max(1) as f32);

        match present(&self.load_state) {
            Presentation::ProgressIndicator => {
                self.ui.tick();
                let icon = self.ui.icon_size as f32;
                self.camera_uniform.scale = [icon / w, icon / h];
                self.camera_uniform.translation = [0.0, 0.0];
                self.camera_uniform.rotation = [self.ui.spinner_angle, 0.0];
            }
            Presentation::Document { .. } => {
                // La textura ya viene ajustada al viewport; aquí solo zoom y pan
                let (tw, th) = self.page.as_ref().map_or((w, h), |p| (p.texture.width as f32, p.texture.height as f32));
                self.camera_uniform.scale = [self.zoom * tw / w, self.zoom * th / h];
                self.camera_uniform.translation = self.pan;
                self.camera_uniform.rotation = [0.0, 0.0];
            }
            Presentation::ErrorText { .. } => {
                let icon = self.ui.icon_size as f32 * 2.0;
                self.camera_uniform.scale = [icon / w, icon / h];
                self.camera_uniform.translation = [0.0, 0.0];
                self.camera_uniform.rotation = [0.0, 0.0];
            }
        }

        self.gpu.queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[self.camera_uniform]));
    }

    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> { self.gpu.size }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // Cuenta aunque la superficie falle (Outdated/Timeout): la carga no espera
        self.redraw_attempts += 1;
        let output = self.gpu.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });

        let (clear, bind_group) = match present(&self.load_state) {
            Presentation::ProgressIndicator => (CLEAR_NEUTRAL, Some(&self.spinner_bind_group)),
            Presentation::Document { .. } => (CLEAR_NEUTRAL, self.page.as_ref().map(|p| &p.bind_group)),
            Presentation::ErrorText { .. } => (CLEAR_ERROR, Some(&self.error_bind_group)),
        };

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Clear(clear), store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(bind_group) = bind_group {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, bind_group, &[]);
                render_pass.set_bind_group(1, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..self.num_indices, 0, 0..1);
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

fn texture_bind_group(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, texture: &Texture, label: &str) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(&texture.view) },
            wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(&texture.sampler) },
        ],
        label: Some(label),
    })
}

/// La carga se lanza una sola vez, después del primer redraw.
fn load_is_due(redraw_attempts: u64, pending: bool) -> bool {
    pending && redraw_attempts > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_waits_for_the_first_redraw_only() {
        assert!(!load_is_due(0, true));
        assert!(load_is_due(1, true));
        assert!(!load_is_due(5, false));
    }
}
