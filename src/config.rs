use crate::locator::{AssetBundle, Locator, DEFAULT_EXTENSION, DEFAULT_RESOURCE};
use std::path::PathBuf;

/// Configuración del visor, a partir de los argumentos de lanzamiento.
///
/// `pdfpane [--headless] [--assets <dir>] [ruta.pdf]`
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Ruta explícita ("Abrir con..."). Si falta se usa el recurso del bundle.
    pub file: Option<String>,
    pub asset_dir: PathBuf,
    pub resource: String,
    pub extension: String,
    pub headless: bool,
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            file: None,
            asset_dir: PathBuf::from("assets"),
            resource: DEFAULT_RESOURCE.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            headless: false,
            title: "PdfPane".to_string(),
            width: 1200,
            height: 800,
        }
    }
}

impl ViewerConfig {
    /// `args` no incluye el nombre del ejecutable.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--headless" => config.headless = true,
                "--assets" => match args.next() {
                    Some(dir) => config.asset_dir = PathBuf::from(dir),
                    None => log::warn!("--assets requiere un directorio, se ignora"),
                },
                _ if arg.starts_with("--") => log::warn!("Argumento desconocido: {}", arg),
                _ => {
                    if config.file.is_some() {
                        log::warn!("Solo se abre un archivo, se ignora {:?}", arg);
                    } else {
                        config.file = Some(arg);
                    }
                }
            }
        }

        config
    }

    /// Resuelve el documento a abrir: la ruta explícita o el recurso empaquetado.
    pub fn locator(&self) -> Option<Locator> {
        match &self.file {
            Some(raw) => Locator::parse(raw),
            None => AssetBundle::new(&self.asset_dir).url(&self.resource, &self.extension),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_point_at_the_bundled_test() {
        let config = ViewerConfig::from_args(Vec::new());
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.resource, "sat-practice-test-1");
        assert_eq!(config.extension, "pdf");
        assert!(!config.headless);
    }

    #[test]
    fn flags_and_positional_path() {
        let config = ViewerConfig::from_args(args(&["--headless", "--assets", "res", "doc.pdf", "other.pdf"]));
        assert!(config.headless);
        assert_eq!(config.asset_dir, PathBuf::from("res"));
        assert_eq!(config.file.as_deref(), Some("doc.pdf"));
    }

    #[test]
    fn explicit_path_wins_over_bundle() {
        let config = ViewerConfig::from_args(args(&["file:///tmp/x.pdf"]));
        assert_eq!(config.locator(), Some(Locator::from_path("/tmp/x.pdf")));
    }

    #[test]
    fn missing_bundle_resource_means_no_locator() {
        let dir = tempfile::tempdir().unwrap();
        let config = ViewerConfig::from_args(args(&["--assets", dir.path().to_str().unwrap()]));
        assert_eq!(config.locator(), None);
    }
}
