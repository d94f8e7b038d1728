//! Estado de carga observable de un documento.
//!
//! `DocumentLoader` hace un único intento síncrono al construirse y deja el
//! resultado en un `LoadState`: `Loading` → `Success` o `Loading` → `Failure`.
//! Una vez en estado terminal no vuelve a cambiar.

use crate::error::LoadError;
use crate::locator::Locator;
use crate::pdf::{DocumentEngine, PageSource};

/// Tipo de fallo, para quien necesite distinguirlos sin comparar textos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidLocator,
    DocumentUnavailable,
}

impl From<&LoadError> for FailureKind {
    fn from(err: &LoadError) -> Self {
        match err {
            LoadError::InvalidLocator => FailureKind::InvalidLocator,
            LoadError::DocumentUnavailable { .. } => FailureKind::DocumentUnavailable,
        }
    }
}

#[derive(Debug)]
pub enum LoadState<D> {
    Loading,
    Success(D),
    Failure { kind: FailureKind, message: String },
}

impl<D> LoadState<D> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    pub fn document(&self) -> Option<&D> {
        match self {
            LoadState::Success(document) => Some(document),
            _ => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            LoadState::Failure { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            LoadState::Failure { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl<D> From<Result<D, LoadError>> for LoadState<D> {
    fn from(result: Result<D, LoadError>) -> Self {
        match result {
            Ok(document) => LoadState::Success(document),
            Err(err) => LoadState::Failure {
                kind: FailureKind::from(&err),
                message: err.to_string(),
            },
        }
    }
}

/// Intenta abrir el documento: la variante "que lanza" del cargador, sin estado.
pub fn load_document<'a, E: DocumentEngine + 'a>(
    engine: &'a E,
    locator: Option<&Locator>,
) -> Result<E::Document<'a>, LoadError> {
    let locator = locator.ok_or(LoadError::InvalidLocator)?;
    engine
        .open(locator.path())
        .map_err(|source| LoadError::DocumentUnavailable { source })
}

pub struct DocumentLoader<'a, E: DocumentEngine + 'a> {
    state: LoadState<E::Document<'a>>,
}

impl<'a, E: DocumentEngine + 'a> DocumentLoader<'a, E> {
    /// Crea el cargador y resuelve el locator en el acto.
    pub fn new(engine: &'a E, locator: Option<&Locator>) -> Self {
        Self::observed(engine, locator, |_| {})
    }

    /// Igual que `new`, notificando a `observer` cada estado publicado:
    /// primero `Loading` y después el estado terminal.
    pub fn observed<F>(engine: &'a E, locator: Option<&Locator>, mut observer: F) -> Self
    where
        F: FnMut(&LoadState<E::Document<'a>>),
    {
        let mut loader = Self { state: LoadState::Loading };
        observer(&loader.state);

        loader.load(engine, locator);
        observer(&loader.state);
        loader
    }

    fn load(&mut self, engine: &'a E, locator: Option<&Locator>) {
        debug_assert!(self.state.is_loading(), "load must run exactly once");

        let result = load_document(engine, locator);
        match &result {
            Ok(document) => {
                log::info!(
                    "Documento cargado desde {:?} ({} páginas)",
                    locator.map(Locator::path),
                    document.page_count()
                );
            }
            Err(LoadError::InvalidLocator) => {
                log::warn!("Carga abortada: no se proporcionó ningún locator");
            }
            Err(LoadError::DocumentUnavailable { source }) => {
                log::warn!(
                    "El motor no produjo documento para {:?}: {}",
                    locator.map(Locator::path),
                    source
                );
            }
        }
        self.state = LoadState::from(result);
    }

    pub fn state(&self) -> &LoadState<E::Document<'a>> {
        &self.state
    }

    pub fn into_state(self) -> LoadState<E::Document<'a>> {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::cell::Cell;
    use std::path::Path;

    /// Motor de prueba: acepta solo rutas que terminan en "ok.pdf".
    struct FakeEngine {
        opened: Cell<usize>,
    }

    struct FakeDocument(usize);

    impl PageSource for FakeDocument {
        fn page_count(&self) -> usize {
            self.0
        }
    }

    impl DocumentEngine for FakeEngine {
        type Document<'a> = FakeDocument;

        fn open<'a>(&'a self, path: &Path) -> Result<Self::Document<'a>, EngineError> {
            self.opened.set(self.opened.get() + 1);
            if path.ends_with("ok.pdf") {
                Ok(FakeDocument(3))
            } else {
                Err(EngineError::Binding("rejected by fake engine".into()))
            }
        }
    }

    fn engine() -> FakeEngine {
        FakeEngine { opened: Cell::new(0) }
    }

    #[test]
    fn absent_locator_fails_without_touching_the_engine() {
        let engine = engine();
        let loader = DocumentLoader::new(&engine, None);

        assert_eq!(loader.state().failure_message(), Some("The provided URL is not valid."));
        assert_eq!(loader.state().failure_kind(), Some(FailureKind::InvalidLocator));
        assert_eq!(engine.opened.get(), 0);
    }

    #[test]
    fn engine_failure_maps_to_document_unavailable() {
        let engine = engine();
        let locator = Locator::from_path("broken.pdf");
        let loader = DocumentLoader::new(&engine, Some(&locator));

        assert_eq!(loader.state().failure_message(), Some("The document returned nil."));
        assert_eq!(loader.state().failure_kind(), Some(FailureKind::DocumentUnavailable));
    }

    #[test]
    fn success_holds_the_document() {
        let engine = engine();
        let locator = Locator::from_path("dir/ok.pdf");
        let loader = DocumentLoader::new(&engine, Some(&locator));

        let document = loader.state().document().expect("document");
        assert_eq!(document.page_count(), 3);
        assert!(loader.state().is_terminal());
        assert_eq!(engine.opened.get(), 1);
    }

    #[test]
    fn observer_sees_loading_then_terminal_state() {
        let engine = engine();
        let locator = Locator::from_path("ok.pdf");
        let mut seen = Vec::new();

        let loader = DocumentLoader::observed(&engine, Some(&locator), |state| {
            seen.push(match state {
                LoadState::Loading => "loading",
                LoadState::Success(_) => "success",
                LoadState::Failure { .. } => "failure",
            });
        });

        assert_eq!(seen, ["loading", "success"]);
        assert!(loader.state().document().is_some());
    }

    #[test]
    fn state_is_stable_after_construction() {
        let engine = engine();
        let loader = DocumentLoader::new(&engine, None);

        let first = loader.state().failure_message().map(str::to_owned);
        let second = loader.state().failure_message().map(str::to_owned);
        assert_eq!(first, second);
        assert_eq!(engine.opened.get(), 0);
    }

    #[test]
    fn load_document_reports_the_engine_cause() {
        let engine = engine();
        let locator = Locator::from_path("nope.pdf");
        let err = load_document(&engine, Some(&locator)).err().expect("error");

        assert_eq!(err.to_string(), "The document returned nil.");
        assert!(std::error::Error::source(&err).is_some());
    }
}
