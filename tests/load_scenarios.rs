use lopdf::{dictionary, Document, Object};
use pdfpane::pdf::parser::LopdfEngine;
use pdfpane::pdf::PageSource;
use pdfpane::ui::{present, Presentation};
use pdfpane::{load_document, AssetBundle, DocumentLoader, FailureKind, LoadError, LoadState, Locator};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Escribe un PDF mínimo con `pages` páginas A4 vacías.
fn write_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            Object::Reference(doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
            }))
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).expect("write fixture pdf");
    path
}

#[test]
fn absent_locator_is_invalid() {
    let loader = DocumentLoader::new(&LopdfEngine, None);

    assert_eq!(loader.state().failure_message(), Some("The provided URL is not valid."));
    assert_eq!(loader.state().failure_kind(), Some(FailureKind::InvalidLocator));
}

#[test]
fn zero_byte_file_yields_no_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corrupt.pdf");
    std::fs::write(&path, b"").unwrap();

    let locator = Locator::from_path(&path);
    let loader = DocumentLoader::new(&LopdfEngine, Some(&locator));

    assert_eq!(loader.state().failure_message(), Some("The document returned nil."));
    assert_eq!(loader.state().failure_kind(), Some(FailureKind::DocumentUnavailable));
}

#[test]
fn non_pdf_and_missing_files_yield_no_document() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("notes.pdf");
    std::fs::write(&text, b"just some text, not a pdf").unwrap();

    for path in [text, dir.path().join("missing.pdf")] {
        let locator = Locator::from_path(path);
        let state = DocumentLoader::new(&LopdfEngine, Some(&locator)).into_state();
        assert_eq!(state.failure_message(), Some("The document returned nil."));
    }
}

#[test]
fn valid_single_page_pdf_succeeds() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(dir.path(), "single.pdf", 1);

    let locator = Locator::from_path(&path);
    let loader = DocumentLoader::new(&LopdfEngine, Some(&locator));

    let document = loader.state().document().expect("document loaded");
    assert!(document.page_count() >= 1);
    assert!(loader.state().failure_message().is_none());
}

#[test]
fn observer_is_notified_once_per_transition() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(dir.path(), "three.pdf", 3);
    let locator = Locator::from_path(&path);

    let mut summaries = Vec::new();
    let loader = DocumentLoader::observed(&LopdfEngine, Some(&locator), |state| {
        summaries.push(present(state).summary());
    });

    assert_eq!(summaries, ["loading", "document: 3 pages"]);
    assert_eq!(present(loader.state()).summary(), "document: 3 pages");
}

#[test]
fn bundled_resource_resolves_through_the_asset_bundle() {
    let dir = TempDir::new().unwrap();
    write_pdf(dir.path(), "sat-practice-test-1.pdf", 2);

    let bundle = AssetBundle::new(dir.path());
    let locator = bundle.url("sat-practice-test-1", "pdf");
    let loader = DocumentLoader::new(&LopdfEngine, locator.as_ref());

    match present(loader.state()) {
        Presentation::Document { document, auto_scales } => {
            assert!(auto_scales);
            assert_eq!(document.page_count(), 2);
        }
        other => panic!("expected a document view, got {}", other.summary()),
    }
}

#[test]
fn missing_bundled_resource_is_an_invalid_locator() {
    let dir = TempDir::new().unwrap();
    let bundle = AssetBundle::new(dir.path());

    let loader = DocumentLoader::new(&LopdfEngine, bundle.url("sat-practice-test-1", "pdf").as_ref());
    assert!(matches!(present(loader.state()), Presentation::ErrorText { message: "The provided URL is not valid.", .. }));
}

#[test]
fn result_variant_matches_the_state_variant() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(dir.path(), "ok.pdf", 1);
    let locator = Locator::from_path(&path);

    assert!(matches!(load_document(&LopdfEngine, None), Err(LoadError::InvalidLocator)));
    let document = load_document(&LopdfEngine, Some(&locator)).expect("document");
    assert_eq!(document.page_count(), 1);

    let state: LoadState<_> = load_document(&LopdfEngine, Some(&Locator::from_path(dir.path().join("nope.pdf")))).into();
    assert_eq!(state.failure_kind(), Some(FailureKind::DocumentUnavailable));
}

#[test]
fn shipped_asset_loads() {
    let bundle = AssetBundle::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"));
    let locator = bundle.url("sat-practice-test-1", "pdf").expect("bundled pdf present");

    let loader = DocumentLoader::new(&LopdfEngine, Some(&locator));
    assert_eq!(present(loader.state()).summary(), "document: 1 page");
}

#[test]
fn percent_encoded_file_uri_loads_the_document() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(dir.path(), "my doc.pdf", 1);
    let uri = url::Url::from_file_path(&path).unwrap().to_string();

    let locator = Locator::parse(&uri);
    let loader = DocumentLoader::new(&LopdfEngine, locator.as_ref());

    assert_eq!(present(loader.state()).summary(), "document: 1 page");
}

#[cfg(unix)]
#[test]
fn localhost_file_uri_loads_the_document() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(dir.path(), "my doc.pdf", 2);
    let uri = url::Url::from_file_path(&path).unwrap();

    let locator = Locator::parse(&format!("file://localhost{}", uri.path()));
    let loader = DocumentLoader::new(&LopdfEngine, locator.as_ref());

    assert_eq!(present(loader.state()).summary(), "document: 2 pages");
}
