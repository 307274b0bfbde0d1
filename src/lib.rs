mod error;
mod flatten;
mod fonts;
mod layout;
mod model;
mod pdf;
mod style;

pub use error::Error;
pub use flatten::flatten;
pub use layout::{FOOTER_BAND, finalize_pages, paginate};
pub use model::{Block, DrawCommand, FontWeight, MarkupNode, Page, PageGeometry};
pub use pdf::serialize;
pub use style::{ExportOptions, StyleProfile, resolve};

use std::time::Instant;

/// Export a rendered markup tree as a paginated PDF. Returns the serialized
/// bytes; writing them anywhere is the caller's job.
pub fn export_to_pdf(tree: &MarkupNode, options: &ExportOptions) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();

    let profile = style::resolve(&options.theme, &options.size_tier)?;
    let blocks = flatten::flatten(tree);
    let t_flatten = t0.elapsed();

    let geom = PageGeometry::default();
    let pages = layout::paginate(&blocks, &profile, geom);
    let date_stamp = chrono::Local::now().format("%Y-%m-%d").to_string();
    let pages = layout::finalize_pages(pages, &profile, geom, &date_stamp);
    let t_layout = t0.elapsed();

    let bytes = pdf::serialize(&pages, geom);
    let t_total = t0.elapsed();

    log::info!(
        "Export: flatten={:.1}ms ({} blocks), layout={:.1}ms ({} pages), serialize={:.1}ms (output {} bytes)",
        t_flatten.as_secs_f64() * 1000.0,
        blocks.len(),
        (t_layout - t_flatten).as_secs_f64() * 1000.0,
        pages.len(),
        (t_total - t_layout).as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(bytes)
}
