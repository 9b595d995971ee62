//! On-screen preview tree.
//!
//! A serializable representation of one rendered label for UI display. Not
//! pixel-identical to print output, but it carries the same resolved field
//! boxes and values, so a preview pane can show where every field will land.

use crate::layout::GridBox;
use crate::template::Align;
use serde::Serialize;

/// Root of a label preview: physical size plus positioned field nodes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewTree {
    pub template_id: String,
    pub width_mm: f64,
    pub height_mm: f64,
    pub nodes: Vec<PreviewNode>,
}

/// One positioned element of a label preview.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PreviewNode {
    Text {
        field: &'static str,
        #[serde(rename = "box")]
        bounds: GridBox,
        content: String,
        font_mm: f64,
        align: Align,
    },
    Barcode {
        field: &'static str,
        #[serde(rename = "box")]
        bounds: GridBox,
        payload: String,
    },
}

impl PreviewTree {
    /// Largest text font on the label, in millimeters. Used by the UI to
    /// scale preview typography; also pins the "price is the biggest field"
    /// template contract in tests.
    pub fn max_font_mm(&self) -> f64 {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                PreviewNode::Text { font_mm, .. } => Some(*font_mm),
                PreviewNode::Barcode { .. } => None,
            })
            .fold(0.0, f64::max)
    }
}
