use anyhow::Context;
use std::env;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").context("CARGO_MANIFEST_DIR no definido")?);

    // En Windows descargamos la DLL; en el resto se espera libpdfium en el sistema
    // (o se usa el modo --headless, que no la necesita).
    #[cfg(target_os = "windows")]
    setup_pdfium(&manifest_dir)?;

    // Instrucciones para que el linker sepa dónde buscar (aunque sea carga dinámica)
    println!("cargo:rustc-link-search=native={}", manifest_dir.display());

    Ok(())
}

#[cfg(target_os = "windows")]
fn setup_pdfium(root_dir: &std::path::Path) -> anyhow::Result<()> {
    use std::fs;
    use std::io::Cursor;

    const PDFIUM_URL: &str = "https://github.com/bblanchon/pdfium-binaries/releases/latest/download/pdfium-win-x64.zip";
    const DLL_NAME: &str = "pdfium.dll";

    // En la raíz del proyecto para que 'cargo run' la encuentre inmediatamente.
    let dll_path = root_dir.join(DLL_NAME);
    if dll_path.exists() {
        return Ok(());
    }

    println!("cargo:warning=Descargando PDFium desde {}...", PDFIUM_URL);

    let response = reqwest::blocking::get(PDFIUM_URL)
        .context("Fallo al descargar PDFium")?
        .bytes()
        .context("Fallo al leer bytes del ZIP")?;

    let mut zip = zip::ZipArchive::new(Cursor::new(response)).context("Fallo al abrir el ZIP")?;

    // La DLL suele estar en bin/pdfium.dll; no dependemos de la ruta exacta
    let index = (0..zip.len())
        .find(|&i| {
            zip.by_index(i)
                .map(|f| f.name().ends_with("bin/pdfium.dll") || f.name() == DLL_NAME)
                .unwrap_or(false)
        })
        .context("No se encontró pdfium.dll dentro del ZIP descargado")?;
    let mut dll_file = zip.by_index(index).context("Entrada del ZIP ilegible")?;

    let mut out_file = fs::File::create(&dll_path)
        .with_context(|| format!("Fallo al crear el archivo {:?}", dll_path))?;
    std::io::copy(&mut dll_file, &mut out_file).context("Fallo al extraer/escribir pdfium.dll")?;

    println!("cargo:warning=PDFium instalado en: {:?}", dll_path);
    Ok(())
}
