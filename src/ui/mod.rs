pub mod assets;

use crate::gpu::texture::{Texture, TextureError};
use crate::loader::LoadState;
use crate::pdf::PageSource;

/// Rojo de los mensajes de error (RGBA).
pub const ERROR_COLOR: [u8; 4] = [255, 59, 48, 255];

/// Qué vista corresponde a cada estado de carga.
#[derive(Debug)]
pub enum Presentation<'s, D> {
    /// Indicador de progreso indeterminado.
    ProgressIndicator,
    /// El documento delegado al renderizador, ajustado al viewport.
    Document { document: &'s D, auto_scales: bool },
    /// Texto plano marcado como error.
    ErrorText { message: &'s str, color: [u8; 4] },
}

pub fn present<D>(state: &LoadState<D>) -> Presentation<'_, D> {
    match state {
        LoadState::Loading => Presentation::ProgressIndicator,
        LoadState::Success(document) => Presentation::Document { document, auto_scales: true },
        LoadState::Failure { message, .. } => Presentation::ErrorText { message: message.as_str(), color: ERROR_COLOR },
    }
}

impl<D: PageSource> Presentation<'_, D> {
    /// Resumen en una línea, usado por el modo headless.
    pub fn summary(&self) -> String {
        match self {
            Presentation::ProgressIndicator => "loading".to_string(),
            Presentation::Document { document, .. } => {
                let pages = document.page_count();
                format!("document: {} page{}", pages, if pages == 1 { "" } else { "s" })
            }
            Presentation::ErrorText { message, .. } => format!("error: {}", message),
        }
    }
}

/// Título de la ventana para una vista. Los errores se marcan como tales
/// porque el mensaje solo es legible ahí y en el log.
pub fn window_title<D: PageSource>(base: &str, view: &Presentation<'_, D>, current_page: u16) -> String {
    match view {
        Presentation::ProgressIndicator => format!("{} (cargando…)", base),
        Presentation::Document { document, .. } => {
            format!("{} ({}/{})", base, current_page as usize + 1, document.page_count())
        }
        Presentation::ErrorText { message, .. } => format!("[ERROR] {}: {}", base, message),
    }
}

pub struct UiState {
    // Texturas de Iconos
    pub icon_spinner: Texture,
    pub icon_error: Texture,

    /// Rotación actual del indicador de progreso, en radianes.
    pub spinner_angle: f32,
    pub icon_size: u32,
}

impl UiState {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Self, TextureError> {
        // Generar iconos procedurales
        let size = 64;
        let spinner = assets::IconGenerator::generate_spinner_icon(size);
        let error = assets::IconGenerator::generate_error_icon(size, ERROR_COLOR);

        let format = wgpu::TextureFormat::Rgba8UnormSrgb;
        let icon_spinner = Texture::from_bytes(device, queue, spinner.as_raw(), size, size, format, Some("Icon Spinner"))?;
        let icon_error = Texture::from_bytes(device, queue, error.as_raw(), size, size, format, Some("Icon Error"))?;

        Ok(Self {
            icon_spinner,
            icon_error,
            spinner_angle: 0.0,
            icon_size: size,
        })
    }

    /// Avanza el indicador una fracción de vuelta por frame.
    pub fn tick(&mut self) {
        self.spinner_angle = advance_spinner(self.spinner_angle);
    }
}

fn advance_spinner(angle: f32) -> f32 {
    const STEP: f32 = std::f32::consts::TAU / 60.0;
    (angle - STEP).rem_euclid(std::f32::consts::TAU)
}
