use super::{PageSource, PdfSystem};
use crate::error::EngineError;
use pdfium_render::prelude::*;

pub struct PageBitmap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>, // Bytes crudos BGRA listos para la GPU
}

/// Área disponible para dibujar la página, en píxeles físicos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Escala uniforme más grande con la que la página cabe en el viewport.
///
/// `None` si el viewport no tiene área. Páginas sin tamaño se dejan a 1.0.
pub fn fit_scale(page_width: f32, page_height: f32, viewport: Viewport) -> Option<f32> {
    if viewport.is_empty() {
        return None;
    }
    if page_width <= 0.0 || page_height <= 0.0 {
        return Some(1.0);
    }
    let sx = viewport.width as f32 / page_width;
    let sy = viewport.height as f32 / page_height;
    Some(sx.min(sy))
}

/// Capacidad de dibujar un documento dentro de un viewport.
pub trait DocumentRenderer<D: PageSource> {
    fn render(&self, document: &D, page_index: u16, viewport: Viewport) -> Result<PageBitmap, EngineError>;
}

impl<'a> DocumentRenderer<PdfDocument<'a>> for PdfSystem {
    /// Rasteriza la página ajustada al viewport (equivalente a `autoScales`).
    fn render(&self, document: &PdfDocument<'a>, page_index: u16, viewport: Viewport) -> Result<PageBitmap, EngineError> {
        let count = document.page_count();
        if page_index as usize >= count {
            return Err(EngineError::PageOutOfRange { index: page_index, count });
        }

        let page = document.pages().get(page_index)?;
        let scale = fit_scale(page.width().value, page.height().value, viewport)
            .ok_or(EngineError::EmptyViewport)?;

        render_page_to_memory(&page, scale)
    }
}

/// Renderiza una página a una escala dada.
/// scale_factor: 1.0 = tamaño original (72 DPI).
fn render_page_to_memory(page: &PdfPage, scale_factor: f32) -> Result<PageBitmap, EngineError> {
    // Dimensiones en píxeles físicos (nunca cero, wgpu no acepta texturas vacías)
    let width = ((page.width().value * scale_factor).round() as i32).max(1);
    let height = ((page.height().value * scale_factor).round() as i32).max(1);

    // BGRA_8888 porque wgpu::TextureFormat::Bgra8UnormSrgb es óptimo en Windows.
    let render_config = PdfRenderConfig::new()
        .set_target_width(width)
        .set_target_height(height)
        .set_format(PdfBitmapFormat::BGRA);

    let bitmap = page.render_with_config(&render_config)?;
    let data = bitmap.as_bytes().to_vec();

    log::debug!("Página rasterizada a {}x{} (escala {:.3})", width, height, scale_factor);

    Ok(PageBitmap {
        width: width as u32,
        height: height as u32,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_scale_is_limited_by_the_tighter_axis() {
        // A4 en puntos dentro de una ventana apaisada: manda la altura
        let scale = fit_scale(595.0, 842.0, Viewport::new(1200, 800)).unwrap();
        assert!((scale - 800.0 / 842.0).abs() < 1e-6);

        // Página apaisada en ventana vertical: manda la anchura
        let scale = fit_scale(842.0, 595.0, Viewport::new(600, 1000)).unwrap();
        assert!((scale - 600.0 / 842.0).abs() < 1e-6);
    }

    #[test]
    fn fit_scale_can_upscale_small_pages() {
        let scale = fit_scale(100.0, 100.0, Viewport::new(400, 300)).unwrap();
        assert!((scale - 3.0).abs() < 1e-6);
    }

    #[test]
    fn fit_scale_degenerate_inputs() {
        assert_eq!(fit_scale(595.0, 842.0, Viewport::new(0, 800)), None);
        assert_eq!(fit_scale(0.0, 842.0, Viewport::new(800, 800)), Some(1.0));
    }
}
