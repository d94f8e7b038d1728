use std::path::{Path, PathBuf};
use url::Url;

/// Nombre lógico del PDF que acompaña a la aplicación.
pub const DEFAULT_RESOURCE: &str = "sat-practice-test-1";
pub const DEFAULT_EXTENSION: &str = "pdf";

/// Referencia a un recurso de documento (ruta o URI `file://`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator(PathBuf);

impl Locator {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Interpreta una ruta o URI `file:`. Una entrada vacía, o una URI que no
    /// se puede convertir en ruta local, equivale a "sin locator".
    ///
    /// Rutas inexistentes siguen siendo locators válidos: es el motor quien
    /// decide después si puede producir un documento.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        if !raw.starts_with("file:") {
            return Some(Self(PathBuf::from(raw)));
        }

        let path = Url::parse(raw).ok().and_then(|url| url.to_file_path().ok());
        if path.is_none() {
            log::debug!("URI sin ruta local: {:?}", raw);
        }
        path.map(Self)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Directorio de recursos empaquetados junto al ejecutable.
#[derive(Debug, Clone)]
pub struct AssetBundle {
    root: PathBuf,
}

impl AssetBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Busca `<root>/<name>.<extension>`; `None` si el recurso no existe.
    pub fn url(&self, for_resource: &str, with_extension: &str) -> Option<Locator> {
        if for_resource.is_empty() {
            return None;
        }
        let path = self.root.join(format!("{for_resource}.{with_extension}"));
        if path.is_file() {
            Some(Locator(path))
        } else {
            log::debug!("Recurso {:?} no encontrado en el bundle", path);
            None
        }
    }
}
