//! Export backends for a calculated layout.

pub(crate) mod svg;

use crate::layout::DiagramLayout;

/// Turns a positioned layout into a renderable document.
pub(crate) trait Exporter {
    fn render_document(&self, layout: &DiagramLayout) -> ::svg::Document;
}
