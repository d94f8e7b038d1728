//! Motor PDF en Rust puro basado en `lopdf`.
//!
//! No rasteriza: solo valida que el archivo es un PDF legible y expone su
//! número de páginas. Sirve para el modo headless y no depende de pdfium.

use super::{DocumentEngine, PageSource};
use crate::error::EngineError;
use lopdf::Document;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfEngine;

/// Documento parseado por lopdf.
#[derive(Debug)]
pub struct ParsedDocument {
    inner: Document,
}

impl PageSource for ParsedDocument {
    fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }
}

impl DocumentEngine for LopdfEngine {
    type Document<'a> = ParsedDocument;

    fn open<'a>(&'a self, path: &Path) -> Result<Self::Document<'a>, EngineError> {
        let inner = Document::load(path)?;
        Ok(ParsedDocument { inner })
    }
}
