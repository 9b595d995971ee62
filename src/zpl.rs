//! # ZPL Emission
//!
//! Builds one complete, self-terminated ZPL job (`^XA … ^XZ`) for a label.
//! All coordinates are integer dots produced by [`crate::units::Dpi`] from
//! the same millimeter boxes the markup path lays out, so the two channels
//! agree on field placement.
//!
//! Every piece of field data passes through [`crate::format::sanitize`]
//! before emission; unsanitized `^`/`~`/`\` would be read as in-band
//! commands by the printer and corrupt the job.

use crate::format::sanitize;
use crate::layout::GridBox;
use crate::template::Align;
use crate::units::Dpi;

/// Nominal narrow-bar width for Code128 symbols, in millimeters.
const BARCODE_MODULE_MM: f64 = 0.25;

/// Per-job ZPL rendering options.
#[derive(Debug, Clone)]
pub struct ZplOptions {
    /// Number of copies the printer should produce (`^PQ`). Copies of a
    /// ZPL job are identical; multi-part packages go through the
    /// dispatcher, which stamps a running part index per copy instead.
    pub copies: u32,
}

impl Default for ZplOptions {
    fn default() -> Self {
        ZplOptions { copies: 1 }
    }
}

/// Incremental builder for one printer-language job.
pub struct ZplJob {
    dpi: Dpi,
    buf: String,
}

impl ZplJob {
    /// Start a job for a label of the given physical size. Emits the job
    /// start marker, UTF-8 text encoding, print width and label length.
    pub fn new(dpi: Dpi, width_mm: f64, height_mm: f64) -> Self {
        let mut buf = String::new();
        buf.push_str("^XA\n^CI28\n");
        buf.push_str(&format!("^PW{}\n", dpi.dots(width_mm)));
        buf.push_str(&format!("^LL{}\n", dpi.dots(height_mm)));
        buf.push_str("^LH0,0\n");
        ZplJob { dpi, buf }
    }

    /// Emit one positioned, auto-terminated text block: absolute origin,
    /// scalable font sized in dots, bounded field block with a maximum line
    /// count, line gap and horizontal alignment.
    ///
    /// Text is sanitized first; a field that sanitizes to nothing is
    /// omitted rather than emitting an empty command.
    pub fn text_box(
        &mut self,
        bx: &GridBox,
        font_mm: f64,
        max_lines: u32,
        line_gap_mm: f64,
        align: Align,
        text: &str,
    ) {
        let text = sanitize(text);
        if text.is_empty() {
            return;
        }
        let font = self.dpi.dots(font_mm);
        self.buf.push_str(&format!(
            "^FO{},{}^A0N,{font},{font}^FB{},{max_lines},{},{}^FD{text}^FS\n",
            self.dpi.dots(bx.x),
            self.dpi.dots(bx.y),
            self.dpi.dots(bx.w),
            self.dpi.dots(line_gap_mm),
            align_letter(align),
        ));
    }

    /// Emit a Code128 symbol through the printer's native barcode opcode.
    ///
    /// The payload is sanitized like any other field data. An empty payload
    /// omits the field entirely instead of printing a zero-width symbol.
    pub fn barcode(&mut self, bx: &GridBox, payload: &str) {
        let payload = sanitize(payload);
        if payload.is_empty() {
            return;
        }
        let module = self.dpi.dots(BARCODE_MODULE_MM).max(1);
        let height = self.dpi.dots(bx.h);
        self.buf.push_str(&format!(
            "^FO{},{}^BY{module},,{height}^BCN,{height},Y,N,N^FD{payload}^FS\n",
            self.dpi.dots(bx.x),
            self.dpi.dots(bx.y),
        ));
    }

    /// Print quantity for the job. Omitted for a single copy.
    pub fn quantity(&mut self, copies: u32) {
        if copies > 1 {
            self.buf.push_str(&format!("^PQ{copies}\n"));
        }
    }

    /// Terminate the job.
    pub fn finish(mut self) -> String {
        self.buf.push_str("^XZ\n");
        self.buf
    }
}

fn align_letter(align: Align) -> char {
    match align {
        Align::Left => 'L',
        Align::Center => 'C',
        Align::Right => 'R',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bx() -> GridBox {
        GridBox {
            x: 1.0,
            y: 2.0,
            w: 30.0,
            h: 10.0,
        }
    }

    #[test]
    fn test_job_is_self_terminated() {
        let job = ZplJob::new(Dpi::D200, 69.8, 25.4).finish();
        assert!(job.starts_with("^XA"));
        assert!(job.trim_end().ends_with("^XZ"));
    }

    #[test]
    fn test_header_uses_converted_dimensions() {
        let job = ZplJob::new(Dpi::D300, 25.4, 25.4).finish();
        assert!(job.contains("^PW300"));
        assert!(job.contains("^LL300"));
    }

    #[test]
    fn test_text_box_positions_in_dots() {
        let mut job = ZplJob::new(Dpi::D200, 69.8, 25.4);
        job.text_box(&bx(), 3.175, 2, 0.5, Align::Center, "Zapato X");
        let out = job.finish();
        // 1.0 mm -> 8 dots; 2.0 mm -> 16 dots; 3.175 mm -> 25 dots.
        assert!(out.contains("^FO8,16^A0N,25,25"));
        assert!(out.contains(",C^FDZapato X^FS"));
    }

    #[test]
    fn test_text_is_sanitized() {
        let mut job = ZplJob::new(Dpi::D200, 69.8, 25.4);
        job.text_box(&bx(), 2.0, 1, 0.0, Align::Left, "A^B~C\\D");
        let out = job.finish();
        assert!(out.contains("^FDA B C D^FS"));
    }

    #[test]
    fn test_empty_text_field_omitted() {
        let mut job = ZplJob::new(Dpi::D200, 69.8, 25.4);
        job.text_box(&bx(), 2.0, 1, 0.0, Align::Left, " ^~ ");
        assert!(!job.finish().contains("^FB"));
    }

    #[test]
    fn test_barcode_uses_native_opcode() {
        let mut job = ZplJob::new(Dpi::D200, 69.8, 25.4);
        job.barcode(&bx(), "ABC123");
        let out = job.finish();
        assert!(out.contains("^BCN,"));
        assert!(out.contains("^FDABC123^FS"));
    }

    #[test]
    fn test_empty_barcode_omitted() {
        let mut job = ZplJob::new(Dpi::D200, 69.8, 25.4);
        job.barcode(&bx(), "");
        assert!(!job.finish().contains("^BC"));
    }

    #[test]
    fn test_quantity_only_for_multiple_copies() {
        let mut single = ZplJob::new(Dpi::D200, 69.8, 25.4);
        single.quantity(1);
        assert!(!single.finish().contains("^PQ"));

        let mut multi = ZplJob::new(Dpi::D200, 69.8, 25.4);
        multi.quantity(4);
        assert!(multi.finish().contains("^PQ4"));
    }
}
