mod common;

use common::{el, leaf, txt};
use mdtree_pdf::{Error, ExportOptions, PageGeometry, finalize_pages, paginate, resolve, serialize};

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn sample_tree() -> mdtree_pdf::MarkupNode {
    el(
        "body",
        vec![
            leaf("h1", "Release notes"),
            leaf("p", "Everything that changed this cycle."),
            el(
                "ul",
                vec![leaf("li", "faster exports"), leaf("li", "fewer crashes")],
            ),
            el("pre", vec![el("code", vec![txt("cargo build --release")])]),
        ],
    )
}

#[test]
fn export_produces_a_wellformed_pdf() {
    let _ = env_logger::try_init();
    let bytes = mdtree_pdf::export_to_pdf(&sample_tree(), &ExportOptions::default()).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(contains(&bytes, b"%%EOF"));
    assert!(contains(&bytes, b"/Type /Page"));
}

#[test]
fn declared_page_count_matches_layout() {
    let style = resolve("light", "medium").unwrap();
    let geom = PageGeometry::default();
    let blocks = mdtree_pdf::flatten(&sample_tree());
    let pages = finalize_pages(paginate(&blocks, &style, geom), &style, geom, "2026-08-05");
    assert_eq!(pages.len(), 1);

    let bytes = serialize(&pages, geom);
    assert!(contains(&bytes, b"/Count 1"));
}

#[test]
fn all_four_base_fonts_are_registered() {
    let style = resolve("sepia", "large").unwrap();
    let geom = PageGeometry::default();
    let pages = finalize_pages(Vec::new(), &style, geom, "2026-08-05");
    let bytes = serialize(&pages, geom);

    for face in [
        b"Helvetica-Bold".as_slice(),
        b"Helvetica-Oblique".as_slice(),
        b"Courier".as_slice(),
    ] {
        assert!(contains(&bytes, face));
    }
}

#[test]
fn unknown_theme_aborts_before_layout() {
    let options = ExportOptions {
        theme: "neon".to_string(),
        size_tier: "medium".to_string(),
        font_family: String::new(),
    };
    let err = mdtree_pdf::export_to_pdf(&sample_tree(), &options).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn unknown_tier_aborts_before_layout() {
    let options = ExportOptions {
        size_tier: "jumbo".to_string(),
        ..ExportOptions::default()
    };
    let err = mdtree_pdf::export_to_pdf(&sample_tree(), &options).unwrap_err();
    assert!(err.to_string().contains("jumbo"));
}

#[test]
fn font_family_option_is_accepted_but_has_no_effect() {
    // The staged pipeline never consults the font family; the option only
    // exists so callers can pass their preview settings through unchanged.
    let options = ExportOptions {
        font_family: "Comic Sans MS".to_string(),
        ..ExportOptions::default()
    };
    let _ = env_logger::try_init();
    let bytes = mdtree_pdf::export_to_pdf(&sample_tree(), &options).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(!contains(&bytes, b"Comic Sans MS"));
}
