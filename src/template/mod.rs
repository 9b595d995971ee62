//! # Label Templates
//!
//! A template is data: an id, a physical size, one [`GridSpec`] and a field
//! list. The renderers in this module consume that single description for
//! every output channel, so the markup, ZPL and preview paths agree on field
//! placement by construction:
//!
//! ```text
//!               ┌─ stylesheet() + render_markup()  → printable document
//! LabelTemplate ┼─ render_zpl()                    → thermal printer job
//!               └─ render_preview()                → on-screen tree
//! ```
//!
//! Templates never read mutable state and entities are never mutated;
//! rendering the same inputs always produces the same output.

mod article;
mod package;
mod registry;

pub use article::{compact_25x25, mousetail_63x12, small_38x25, small_50x25, standard_69x25};
pub use package::package_4x6;
pub use registry::TemplateRegistry;

use crate::entity::LabelEntity;
use crate::error::LabelError;
use crate::layout::{GridSpec, Span};
use crate::markup;
use crate::preview::{PreviewNode, PreviewTree};
use crate::units::Dpi;
use crate::zpl::{ZplJob, ZplOptions};
use serde::Serialize;

/// Horizontal alignment of a field, shared by every output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

type TextFn = Box<dyn Fn(&LabelEntity) -> String + Send + Sync>;

enum Source {
    Text(TextFn),
    Barcode(TextFn),
}

/// Default gap between wrapped lines inside one field, in millimeters.
const LINE_GAP_MM: f64 = 0.4;

/// One positioned field of a template: a cell span, typography, and a
/// function from the entity to the field's value.
pub struct Field {
    name: &'static str,
    span: Span,
    font_mm: f64,
    align: Align,
    max_lines: u32,
    line_gap_mm: f64,
    bold: bool,
    source: Source,
}

impl Field {
    /// A single-line, left-aligned text field. Adjust with the builder
    /// methods below.
    pub fn text(
        name: &'static str,
        span: Span,
        font_mm: f64,
        value: impl Fn(&LabelEntity) -> String + Send + Sync + 'static,
    ) -> Self {
        Field {
            name,
            span,
            font_mm,
            align: Align::Left,
            max_lines: 1,
            line_gap_mm: LINE_GAP_MM,
            bold: false,
            source: Source::Text(Box::new(value)),
        }
    }

    /// A Code128 barcode field. The payload function supplies the raw data;
    /// an empty payload omits the field in every channel.
    pub fn barcode(
        name: &'static str,
        span: Span,
        payload: impl Fn(&LabelEntity) -> String + Send + Sync + 'static,
    ) -> Self {
        Field {
            name,
            span,
            font_mm: 0.0,
            align: Align::Center,
            max_lines: 1,
            line_gap_mm: 0.0,
            bold: false,
            source: Source::Barcode(Box::new(payload)),
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn lines(mut self, max_lines: u32) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn font_mm(&self) -> f64 {
        self.font_mm
    }

    pub fn is_barcode(&self) -> bool {
        matches!(self.source, Source::Barcode(_))
    }
}

/// A named, fixed-size label layout able to render the same field set
/// through every output channel. Immutable once built; registered at
/// startup in a [`TemplateRegistry`].
pub struct LabelTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub width_mm: f64,
    pub height_mm: f64,
    grid: GridSpec,
    fields: Vec<Field>,
}

impl LabelTemplate {
    pub fn new(
        id: &'static str,
        name: &'static str,
        grid: GridSpec,
        fields: Vec<Field>,
    ) -> Self {
        LabelTemplate {
            id,
            name,
            width_mm: grid.width_mm,
            height_mm: grid.height_mm,
            grid,
            fields,
        }
    }

    /// The grid every renderer lays out against.
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Check every field span against the grid. Malformed templates fail
    /// here, at authoring/test time, instead of mid-print.
    pub fn validate(&self) -> Result<(), LabelError> {
        for field in &self.fields {
            self.grid.cell_box(field.span)?;
        }
        Ok(())
    }

    /// The printable stylesheet for the markup path: `@page` sizing, the
    /// grid container, and one rule per field. Generated from the same
    /// [`GridSpec`] the ZPL path converts to dots.
    pub fn stylesheet(&self) -> String {
        let mut css = markup::page_rule(self.width_mm, self.height_mm);
        css.push_str(&format!(
            ".label {{ width: {w}mm; height: {h}mm; box-sizing: border-box; \
             display: grid; grid-template-columns: {cols}; grid-template-rows: {rows}; \
             column-gap: {cgap}mm; row-gap: {rgap}mm; \
             padding: {pt}mm {pr}mm {pb}mm {pl}mm; \
             overflow: hidden; page-break-after: always; \
             font-family: Arial, sans-serif; }}\n",
            w = self.width_mm,
            h = self.height_mm,
            cols = self.grid.css_template_columns(),
            rows = self.grid.css_template_rows(),
            cgap = self.grid.column_gap_mm,
            rgap = self.grid.row_gap_mm,
            pt = self.grid.padding.top,
            pr = self.grid.padding.right,
            pb = self.grid.padding.bottom,
            pl = self.grid.padding.left,
        ));
        for field in &self.fields {
            css.push_str(&self.field_rule(field));
        }
        css.push_str(".barcode svg { width: 100%; height: 100%; }\n");
        css
    }

    fn field_rule(&self, field: &Field) -> String {
        let mut rule = format!(".label .f-{} {{ grid-area: {};", field.name, field.span.grid_area());
        if field.is_barcode() {
            rule.push_str(" }\n");
            return rule;
        }
        rule.push_str(&format!(
            " font-size: {}mm; line-height: 1.1; text-align: {};",
            field.font_mm,
            css_align(field.align),
        ));
        if field.bold {
            rule.push_str(" font-weight: bold;");
        }
        if field.max_lines > 1 {
            // Line clamping for multi-line fields.
            rule.push_str(&format!(
                " overflow: hidden; display: -webkit-box; -webkit-box-orient: vertical; \
                 -webkit-line-clamp: {};",
                field.max_lines
            ));
        } else {
            rule.push_str(" overflow: hidden; white-space: nowrap;");
        }
        rule.push_str(" }\n");
        rule
    }

    /// One label's markup fragment for the given entity. Barcode fields
    /// become placeholder elements the host fills with Code128 symbols.
    pub fn render_markup(&self, entity: &LabelEntity) -> String {
        let mut html = String::from("<div class=\"label\">");
        for field in &self.fields {
            match &field.source {
                Source::Text(value) => {
                    let text = value(entity);
                    if !text.is_empty() {
                        html.push_str(&markup::field_block(field.name, &text));
                    }
                }
                Source::Barcode(payload) => {
                    let payload = payload(entity);
                    if !payload.is_empty() {
                        html.push_str(&markup::barcode_placeholder(field.name, &payload));
                    }
                }
            }
        }
        html.push_str("</div>");
        html
    }

    /// One complete, self-terminated ZPL job for the given entity at the
    /// given resolution.
    pub fn render_zpl(
        &self,
        entity: &LabelEntity,
        dpi: Dpi,
        options: &ZplOptions,
    ) -> Result<String, LabelError> {
        let mut job = ZplJob::new(dpi, self.width_mm, self.height_mm);
        for field in &self.fields {
            let bx = self.grid.cell_box(field.span)?;
            match &field.source {
                Source::Text(value) => {
                    job.text_box(
                        &bx,
                        field.font_mm,
                        field.max_lines,
                        field.line_gap_mm,
                        field.align,
                        &value(entity),
                    );
                }
                Source::Barcode(payload) => job.barcode(&bx, &payload(entity)),
            }
        }
        job.quantity(options.copies);
        Ok(job.finish())
    }

    /// The on-screen preview tree for the given entity.
    pub fn render_preview(&self, entity: &LabelEntity) -> Result<PreviewTree, LabelError> {
        let mut nodes = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let bounds = self.grid.cell_box(field.span)?;
            match &field.source {
                Source::Text(value) => {
                    let content = value(entity);
                    if !content.is_empty() {
                        nodes.push(PreviewNode::Text {
                            field: field.name,
                            bounds,
                            content,
                            font_mm: field.font_mm,
                            align: field.align,
                        });
                    }
                }
                Source::Barcode(payload) => {
                    let payload = payload(entity);
                    if !payload.is_empty() {
                        nodes.push(PreviewNode::Barcode {
                            field: field.name,
                            bounds,
                            payload,
                        });
                    }
                }
            }
        }
        Ok(PreviewTree {
            template_id: self.id.to_string(),
            width_mm: self.width_mm,
            height_mm: self.height_mm,
            nodes,
        })
    }
}

fn css_align(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    }
}
