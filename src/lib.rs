//! # Labelforge
//!
//! A dual-channel label rendering engine for warehouse operations.
//!
//! Most label printing code describes each layout twice: once as markup and
//! stylesheet rules for the browser print pipeline, and once as hand-computed
//! millimeter offsets for the thermal printer's command language. The two
//! drift, and every template change risks labels that no longer match their
//! physical stock.
//!
//! Labelforge does the opposite: **one grid description per template** drives
//! every output channel. The same row/column model produces the CSS grid the
//! browser lays out, the dot-positioned ZPL job the printer executes, and the
//! preview tree the UI displays.
//!
//! ## Architecture
//!
//! ```text
//! LabelEntity (article / package)
//!       ↓
//!   [template]  - registry lookup, one GridSpec + field list per template
//!       ↓
//!   [layout]    - grid span → absolute mm box (single source of truth)
//!       ↓
//!   [markup] ──→ printable document → [dispatch] → platform print flow
//!   [zpl]    ──→ ^XA…^XZ job        → external printer transport
//!   [preview]──→ on-screen tree
//! ```
//!
//! Templates are immutable values registered once at startup in an
//! explicitly constructed [`template::TemplateRegistry`]; entities are plain
//! records the engine never mutates.

pub mod dispatch;
pub mod entity;
pub mod error;
pub mod format;
pub mod layout;
pub mod markup;
pub mod preview;
pub mod template;
pub mod units;
pub mod zpl;

pub use entity::{Article, LabelEntity, Package};
pub use error::LabelError;
pub use units::Dpi;

use preview::PreviewTree;
use template::TemplateRegistry;
use zpl::ZplOptions;

/// Render the on-screen preview for one entity. An unknown or omitted
/// template id resolves to the registry's first template.
pub fn render_preview(
    registry: &TemplateRegistry,
    template_id: Option<&str>,
    entity: &LabelEntity,
) -> Result<PreviewTree, LabelError> {
    registry.get(template_id).render_preview(entity)
}

/// Render one complete ZPL job for one entity at the given resolution.
pub fn render_zpl(
    registry: &TemplateRegistry,
    template_id: Option<&str>,
    entity: &LabelEntity,
    dpi: Dpi,
) -> Result<String, LabelError> {
    registry
        .get(template_id)
        .render_zpl(entity, dpi, &ZplOptions::default())
}

/// Assemble the printable document for a list of entities: the template's
/// stylesheet once, then one label fragment per entity in order. This is
/// what [`dispatch::PrintDispatcher`] loads into the rendering surface.
pub fn render_document(
    registry: &TemplateRegistry,
    template_id: Option<&str>,
    entities: &[LabelEntity],
) -> String {
    let template = registry.get(template_id);
    let fragments: Vec<String> = entities
        .iter()
        .map(|entity| template.render_markup(entity))
        .collect();
    markup::document(&template.stylesheet(), &fragments)
}
