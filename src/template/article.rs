//! The shelf-label templates for inventory articles.
//!
//! Five physical formats, each one grid plus a field list. Row heights,
//! gaps and padding always sum to the physical label height so that the
//! markup grid and the dot grid fill the same area.

use super::{Align, Field, LabelTemplate};
use crate::entity::{Article, LabelEntity};
use crate::format::money;
use crate::layout::{Columns, Edges, GridSpec, Span};

/// Lift a per-article accessor into a field value function. Non-article
/// entities yield an empty value, which omits the field.
fn art(
    f: impl Fn(&Article) -> String + Send + Sync + 'static,
) -> impl Fn(&LabelEntity) -> String + Send + Sync + 'static {
    move |e| e.article().map(&f).unwrap_or_default()
}

fn unit_status(a: &Article) -> String {
    [a.unit.as_str(), a.status.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn max_stock(a: &Article) -> String {
    a.max_stock
        .map(|m| format!("MAX {m:.0}"))
        .unwrap_or_default()
}

/// Standard shelf label, 69.8 × 25.4 mm. Name on a two-row, three-column
/// span at the top; the list price is the single largest field; barcode
/// zone on the right.
pub fn standard_69x25() -> LabelTemplate {
    let grid = GridSpec {
        width_mm: 69.8,
        height_mm: 25.4,
        columns: Columns::Count(3),
        row_heights_mm: vec![4.0, 4.0, 5.5, 4.7, 4.0],
        column_gap_mm: 0.5,
        row_gap_mm: 0.3,
        padding: Edges::uniform(1.0),
    };
    LabelTemplate::new(
        "standard-69x25",
        "Standard (69.8×25.4)",
        grid,
        vec![
            Field::text("name", Span::new(1, 1, 3, 4), 3.2, art(|a| a.name.clone())).lines(2),
            Field::text("price", Span::new(3, 1, 5, 2), 5.0, art(|a| money(a.list_price))).bold(),
            Field::text(
                "distributor",
                Span::new(3, 2, 4, 3),
                2.5,
                art(|a| money(a.distributor_price)),
            )
            .align(Align::Center),
            Field::text("max", Span::new(4, 2, 5, 3), 2.2, art(max_stock)).align(Align::Center),
            Field::barcode("code", Span::new(3, 3, 5, 4), |e| {
                e.barcode_payload().to_string()
            }),
            Field::text("code-text", Span::new(5, 1, 6, 2), 2.2, art(|a| a.code.clone())),
            Field::text("unit", Span::new(5, 2, 6, 3), 2.2, art(unit_status)).align(Align::Center),
            Field::text("date", Span::new(5, 3, 6, 4), 2.2, art(|a| a.date.clone()))
                .align(Align::Right),
        ],
    )
}

/// Small shelf label, 50.8 × 25.4 mm. Same field set as the standard
/// format minus the barcode zone.
pub fn small_50x25() -> LabelTemplate {
    let grid = GridSpec {
        width_mm: 50.8,
        height_mm: 25.4,
        columns: Columns::Count(2),
        row_heights_mm: vec![4.0, 4.0, 5.5, 4.7, 4.0],
        column_gap_mm: 0.5,
        row_gap_mm: 0.3,
        padding: Edges::uniform(1.0),
    };
    LabelTemplate::new(
        "small-50x25",
        "Small (50.8×25.4)",
        grid,
        vec![
            Field::text("name", Span::new(1, 1, 3, 3), 3.0, art(|a| a.name.clone())).lines(2),
            Field::text("price", Span::new(3, 1, 4, 2), 4.5, art(|a| money(a.list_price))).bold(),
            Field::text(
                "distributor",
                Span::new(3, 2, 4, 3),
                2.2,
                art(|a| money(a.distributor_price)),
            )
            .align(Align::Right),
            Field::text("code-text", Span::new(4, 1, 5, 2), 2.2, art(|a| a.code.clone())),
            Field::text("unit", Span::new(4, 2, 5, 3), 2.2, art(unit_status)).align(Align::Right),
            Field::text("date", Span::new(5, 1, 6, 2), 2.0, art(|a| a.date.clone())),
            Field::text("max", Span::new(5, 2, 6, 3), 2.0, art(max_stock)).align(Align::Right),
        ],
    )
}

/// Compact 25 × 25 mm label for small bins: name, price, code and a
/// barcode strip.
pub fn compact_25x25() -> LabelTemplate {
    let grid = GridSpec {
        width_mm: 25.0,
        height_mm: 25.0,
        columns: Columns::Count(2),
        row_heights_mm: vec![5.0, 6.5, 5.0, 6.0],
        column_gap_mm: 0.4,
        row_gap_mm: 0.3,
        padding: Edges::uniform(0.8),
    };
    LabelTemplate::new(
        "compact-25x25",
        "Compact (25×25)",
        grid,
        vec![
            Field::text("name", Span::new(1, 1, 2, 3), 2.2, art(|a| a.name.clone())).lines(2),
            Field::text("price", Span::new(2, 1, 3, 3), 4.0, art(|a| money(a.list_price)))
                .align(Align::Center)
                .bold(),
            Field::text("code-text", Span::new(3, 1, 4, 3), 2.0, art(|a| a.code.clone()))
                .align(Align::Center),
            Field::barcode("code", Span::new(4, 1, 5, 3), |e| {
                e.barcode_payload().to_string()
            }),
        ],
    )
}

/// Mouse-tail wraparound label, 63.5 × 12.7 mm. Two mirrored wings around
/// a central barcode zone; the label folds over the article so both faces
/// show the same data. Explicit column widths keep the barcode zone fixed.
pub fn mousetail_63x12() -> LabelTemplate {
    let grid = GridSpec {
        width_mm: 63.5,
        height_mm: 12.7,
        columns: Columns::WidthsMm(vec![24.0, 14.0, 24.0]),
        row_heights_mm: vec![3.5, 4.2, 3.5],
        column_gap_mm: 0.25,
        row_gap_mm: 0.25,
        padding: Edges::uniform(0.5),
    };
    let wing = |suffix: &'static str, col: usize| -> Vec<Field> {
        let (name, price, code): (&'static str, &'static str, &'static str) = match suffix {
            "l" => ("name-l", "price-l", "code-l"),
            _ => ("name-r", "price-r", "code-r"),
        };
        vec![
            Field::text(name, Span::new(1, col, 2, col + 1), 1.8, art(|a| a.name.clone())),
            Field::text(price, Span::new(2, col, 3, col + 1), 3.0, art(|a| money(a.list_price)))
                .bold(),
            Field::text(code, Span::new(3, col, 4, col + 1), 1.6, art(|a| a.code.clone())),
        ]
    };
    let mut fields = wing("l", 1);
    fields.push(Field::barcode("code", Span::new(1, 2, 4, 3), |e| {
        e.barcode_payload().to_string()
    }));
    fields.extend(wing("r", 3));
    LabelTemplate::new("mousetail-63x12", "Mouse-tail (63.5×12.7)", grid, fields)
}

/// Variant small format, 38.1 × 25.4 mm.
pub fn small_38x25() -> LabelTemplate {
    let grid = GridSpec {
        width_mm: 38.1,
        height_mm: 25.4,
        columns: Columns::Count(2),
        row_heights_mm: vec![4.0, 4.0, 5.5, 4.7, 4.0],
        column_gap_mm: 0.4,
        row_gap_mm: 0.3,
        padding: Edges::uniform(1.0),
    };
    LabelTemplate::new(
        "small-38x25",
        "Small variant (38.1×25.4)",
        grid,
        vec![
            Field::text("name", Span::new(1, 1, 3, 3), 2.6, art(|a| a.name.clone())).lines(2),
            Field::text("price", Span::new(3, 1, 5, 2), 4.2, art(|a| money(a.list_price))).bold(),
            Field::text(
                "distributor",
                Span::new(3, 2, 4, 3),
                2.0,
                art(|a| money(a.distributor_price)),
            )
            .align(Align::Right),
            Field::text("max", Span::new(4, 2, 5, 3), 2.0, art(max_stock)).align(Align::Right),
            Field::text("code-text", Span::new(5, 1, 6, 2), 2.0, art(|a| a.code.clone())),
            Field::text("date", Span::new(5, 2, 6, 3), 2.0, art(|a| a.date.clone()))
                .align(Align::Right),
        ],
    )
}
