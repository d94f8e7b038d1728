pub mod config;
pub mod error;
pub mod gpu;
pub mod loader;
pub mod locator;
pub mod pdf;
pub mod state;
pub mod ui;

pub use error::{EngineError, LoadError};
pub use loader::{load_document, DocumentLoader, FailureKind, LoadState};
pub use locator::{AssetBundle, Locator};
