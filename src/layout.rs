//! # Grid Layout Translator
//!
//! One grid description per template, in physical millimeters, consumed by
//! every output path. The ZPL renderer asks [`GridSpec::cell_box`] for the
//! absolute box of each field span; the markup renderer emits the same model
//! declaratively as CSS grid template strings and `grid-area` values. Both
//! paths therefore agree on field placement by construction instead of by
//! hand-maintained parallel constants.
//!
//! Spans are 1-based with exclusive ends, matching the CSS grid-line
//! convention templates are authored in.

use crate::error::LabelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Edge values (top, right, bottom, left) used for grid padding.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Column track definition.
///
/// Most templates use equal-width columns and declare only a count; templates
/// that need unequal columns (e.g. a fixed barcode zone) declare explicit
/// widths in millimeters instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Columns {
    /// `n` equal-width columns sharing the padded width minus gaps.
    Count(usize),
    /// Explicit column widths in millimeters.
    WidthsMm(Vec<f64>),
}

/// A rectangular region of the grid: `(row_start, col_start)` inclusive to
/// `(row_end, col_end)` exclusive, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub row_start: usize,
    pub col_start: usize,
    pub row_end: usize,
    pub col_end: usize,
}

impl Span {
    pub const fn new(row_start: usize, col_start: usize, row_end: usize, col_end: usize) -> Self {
        Self {
            row_start,
            col_start,
            row_end,
            col_end,
        }
    }

    /// The CSS `grid-area` value for this span.
    pub fn grid_area(&self) -> String {
        format!(
            "{} / {} / {} / {}",
            self.row_start, self.col_start, self.row_end, self.col_end
        )
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows {}..{}, cols {}..{}",
            self.row_start, self.row_end, self.col_start, self.col_end
        )
    }
}

/// Absolute bounding box of one cell span, in millimeters.
///
/// Transient: recomputed on every layout call. Templates are small, so
/// recomputation is cheaper than a cache with invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// A logical grid at fixed physical dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSpec {
    /// Total label width in millimeters.
    pub width_mm: f64,
    /// Total label height in millimeters.
    pub height_mm: f64,
    /// Column tracks.
    pub columns: Columns,
    /// Row heights in millimeters, one entry per row.
    pub row_heights_mm: Vec<f64>,
    /// Gap between adjacent columns, in millimeters.
    pub column_gap_mm: f64,
    /// Gap between adjacent rows, in millimeters.
    pub row_gap_mm: f64,
    /// Outer padding.
    pub padding: Edges,
}

impl GridSpec {
    /// Resolve column tracks to concrete widths in millimeters.
    ///
    /// Equal-count columns share `width - padding - gaps` evenly; explicit
    /// widths pass through unchanged.
    pub fn column_widths(&self) -> Vec<f64> {
        match &self.columns {
            Columns::WidthsMm(widths) => widths.clone(),
            Columns::Count(n) => {
                if *n == 0 {
                    return vec![];
                }
                let gaps = (*n - 1) as f64 * self.column_gap_mm;
                let available = self.width_mm - self.padding.horizontal() - gaps;
                vec![available / *n as f64; *n]
            }
        }
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        match &self.columns {
            Columns::Count(n) => *n,
            Columns::WidthsMm(widths) => widths.len(),
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_heights_mm.len()
    }

    /// Compute the absolute bounding box for a cell span.
    ///
    /// A single-row or single-column span has no interior gap term; wider
    /// spans absorb the gaps between the tracks they cross. Empty, inverted
    /// or out-of-range spans are [`LabelError::InvalidSpan`].
    pub fn cell_box(&self, span: Span) -> Result<GridBox, LabelError> {
        self.validate_span(span)?;

        let widths = self.column_widths();
        let (x, w) = track_extent(
            &widths,
            span.col_start,
            span.col_end,
            self.column_gap_mm,
            self.padding.left,
        );
        let (y, h) = track_extent(
            &self.row_heights_mm,
            span.row_start,
            span.row_end,
            self.row_gap_mm,
            self.padding.top,
        );

        Ok(GridBox { x, y, w, h })
    }

    fn validate_span(&self, span: Span) -> Result<(), LabelError> {
        let invalid = |reason| LabelError::InvalidSpan { span, reason };
        if span.row_start == 0 || span.col_start == 0 {
            return Err(invalid("grid lines are 1-based"));
        }
        if span.row_end <= span.row_start || span.col_end <= span.col_start {
            return Err(invalid("span is empty or inverted"));
        }
        if span.row_end > self.row_count() + 1 {
            return Err(invalid("row span exceeds the grid"));
        }
        if span.col_end > self.column_count() + 1 {
            return Err(invalid("column span exceeds the grid"));
        }
        Ok(())
    }

    /// CSS `grid-template-columns` value, e.g. `"21.0mm 21.0mm 21.0mm"`.
    pub fn css_template_columns(&self) -> String {
        mm_track_list(&self.column_widths())
    }

    /// CSS `grid-template-rows` value.
    pub fn css_template_rows(&self) -> String {
        mm_track_list(&self.row_heights_mm)
    }
}

/// Offset and extent of a track range `[start, end)` (1-based), including
/// interior gaps.
fn track_extent(sizes: &[f64], start: usize, end: usize, gap: f64, padding: f64) -> (f64, f64) {
    let offset: f64 = sizes[..start - 1].iter().sum::<f64>() + (start - 1) as f64 * gap;
    let extent: f64 =
        sizes[start - 1..end - 1].iter().sum::<f64>() + (end - start - 1) as f64 * gap;
    (padding + offset, extent)
}

fn mm_track_list(sizes: &[f64]) -> String {
    sizes
        .iter()
        .map(|s| format!("{s:.3}mm"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> GridSpec {
        GridSpec {
            width_mm: 69.8,
            height_mm: 25.4,
            columns: Columns::Count(3),
            row_heights_mm: vec![4.0, 4.0, 5.0, 5.0, 4.4],
            column_gap_mm: 0.5,
            row_gap_mm: 0.3,
            padding: Edges::uniform(1.0),
        }
    }

    #[test]
    fn test_equal_columns_share_padded_width() {
        let widths = spec().column_widths();
        assert_eq!(widths.len(), 3);
        // (69.8 - 2*1.0 - 2*0.5) / 3
        let expected = (69.8 - 2.0 - 1.0) / 3.0;
        for w in widths {
            assert!((w - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_cell_has_no_gap_term() {
        let s = spec();
        let bx = s.cell_box(Span::new(1, 1, 2, 2)).unwrap();
        assert!((bx.x - 1.0).abs() < 1e-9);
        assert!((bx.y - 1.0).abs() < 1e-9);
        assert!((bx.w - s.column_widths()[0]).abs() < 1e-9);
        assert!((bx.h - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_multi_span_absorbs_interior_gaps() {
        let s = spec();
        let bx = s.cell_box(Span::new(1, 1, 3, 4)).unwrap();
        let col = s.column_widths()[0];
        assert!((bx.w - (3.0 * col + 2.0 * 0.5)).abs() < 1e-9);
        assert!((bx.h - (4.0 + 4.0 + 0.3)).abs() < 1e-9);
    }

    #[test]
    fn test_offset_accumulates_gaps() {
        let s = spec();
        let bx = s.cell_box(Span::new(3, 2, 4, 3)).unwrap();
        let col = s.column_widths()[0];
        assert!((bx.x - (1.0 + col + 0.5)).abs() < 1e-9);
        assert!((bx.y - (1.0 + 4.0 + 0.3 + 4.0 + 0.3)).abs() < 1e-9);
    }

    #[test]
    fn test_explicit_column_widths() {
        let s = GridSpec {
            columns: Columns::WidthsMm(vec![10.0, 25.0, 8.0]),
            ..spec()
        };
        let bx = s.cell_box(Span::new(1, 2, 2, 3)).unwrap();
        assert!((bx.x - (1.0 + 10.0 + 0.5)).abs() < 1e-9);
        assert!((bx.w - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_spans() {
        let s = spec();
        assert!(matches!(
            s.cell_box(Span::new(0, 1, 2, 2)),
            Err(LabelError::InvalidSpan { .. })
        ));
        assert!(matches!(
            s.cell_box(Span::new(2, 1, 2, 2)),
            Err(LabelError::InvalidSpan { .. })
        ));
        assert!(matches!(
            s.cell_box(Span::new(3, 2, 2, 3)),
            Err(LabelError::InvalidSpan { .. })
        ));
        assert!(matches!(
            s.cell_box(Span::new(1, 1, 7, 2)),
            Err(LabelError::InvalidSpan { .. })
        ));
        assert!(matches!(
            s.cell_box(Span::new(1, 1, 2, 5)),
            Err(LabelError::InvalidSpan { .. })
        ));
    }

    #[test]
    fn test_full_grid_span_fills_padded_area() {
        let s = spec();
        let bx = s.cell_box(Span::new(1, 1, 6, 4)).unwrap();
        assert!((bx.w - (s.width_mm - s.padding.horizontal())).abs() < 1e-9);
        let rows: f64 = s.row_heights_mm.iter().sum::<f64>() + 4.0 * s.row_gap_mm;
        assert!((bx.h - rows).abs() < 1e-9);
    }

    #[test]
    fn test_css_template_strings() {
        let s = GridSpec {
            columns: Columns::WidthsMm(vec![10.0, 25.5]),
            row_heights_mm: vec![4.0, 5.25],
            ..spec()
        };
        assert_eq!(s.css_template_columns(), "10.000mm 25.500mm");
        assert_eq!(s.css_template_rows(), "4.000mm 5.250mm");
    }

    #[test]
    fn test_grid_area() {
        assert_eq!(Span::new(1, 1, 3, 4).grid_area(), "1 / 1 / 3 / 4");
    }
}
