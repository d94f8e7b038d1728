use pdfium_render::prelude::PdfiumError;
use thiserror::Error;

/// Fallo del motor de documentos al abrir o rasterizar un recurso.
#[derive(Error, Debug)]
pub enum EngineError {
    /// No se pudo enlazar la librería dinámica de pdfium.
    #[error("unable to bind the pdfium library: {0}")]
    Binding(String),

    #[error("pdfium error: {0:?}")]
    Pdfium(PdfiumError),

    #[error("pdf parse error: {0}")]
    Parse(#[from] lopdf::Error),

    #[error("page {index} not found (document has {count} pages)")]
    PageOutOfRange { index: u16, count: usize },

    #[error("viewport has no area")]
    EmptyViewport,
}

impl From<PdfiumError> for EngineError {
    fn from(err: PdfiumError) -> Self {
        EngineError::Pdfium(err)
    }
}

/// Resultado fallido de un intento de carga.
///
/// El texto de `Display` es el mensaje que se muestra al usuario,
/// la causa del motor queda en `source()` para los logs.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("The provided URL is not valid.")]
    InvalidLocator,

    #[error("The document returned nil.")]
    DocumentUnavailable {
        #[source]
        source: EngineError,
    },
}
