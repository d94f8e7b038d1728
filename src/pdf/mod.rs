pub mod parser;
pub mod render;

use crate::error::EngineError;
use pdfium_render::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// Documento ya abierto por un motor. La aplicación solo consulta el número
/// de páginas; el resto del contenido pertenece al motor.
pub trait PageSource {
    fn page_count(&self) -> usize;
}

/// Motor externo capaz de convertir una ruta en un documento.
///
/// El documento puede tomar prestado el motor (pdfium mantiene la librería
/// viva mientras existan documentos), de ahí el lifetime asociado.
pub trait DocumentEngine {
    type Document<'a>: PageSource
    where
        Self: 'a;

    fn open<'a>(&'a self, path: &Path) -> Result<Self::Document<'a>, EngineError>;
}

impl<'a> PageSource for PdfDocument<'a> {
    fn page_count(&self) -> usize {
        self.pages().len() as usize
    }
}

/// Estructura que mantiene viva la instancia de PDFium.
/// Usamos Arc para poder compartirla con el renderizador.
#[derive(Clone)]
pub struct PdfSystem {
    library: Arc<Pdfium>,
}

impl PdfSystem {
    /// Enlaza dinámicamente con la DLL que descargó build.rs.
    /// Intentamos cargar localmente primero, luego en sistema.
    pub fn bind() -> Result<Self, EngineError> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| EngineError::Binding(format!("{:?}", e)))?;

        log::info!("PDFium enlazado correctamente");

        Ok(Self {
            library: Arc::new(Pdfium::new(bindings)),
        })
    }
}

impl DocumentEngine for PdfSystem {
    type Document<'a> = PdfDocument<'a>;

    /// Abre un archivo PDF desde el disco.
    /// Retorna un documento gestionado que limpia su memoria al cerrarse.
    fn open<'a>(&'a self, path: &Path) -> Result<Self::Document<'a>, EngineError> {
        Ok(self.library.load_pdf_from_file(path, None)?)
    }
}
