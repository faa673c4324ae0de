//! Deterministic vector output for symbols.

use std::fmt::Write as _;

use crate::encode::Symbol;

// Geometry of the generated document: 2 units per module, 4-module quiet
// zone.
const CELL: usize = 2;
const QUIET_CELLS: usize = 4;

/// Render `symbol` as a standalone SVG document: a white background rect
/// plus a single black path covering every dark module. Byte-stable for a
/// given symbol.
pub fn svg_document(symbol: &Symbol) -> String {
    let size = (symbol.width() + QUIET_CELLS * 2) * CELL;
    let mut path = String::new();
    for y in 0..symbol.width() {
        for x in 0..symbol.width() {
            if !symbol.is_dark(x, y) {
                continue;
            }
            let px = (x + QUIET_CELLS) * CELL;
            let py = (y + QUIET_CELLS) * CELL;
            let _ = write!(path, "M{px},{py}h{CELL}v{CELL}h-{CELL}z");
        }
    }
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" \
         viewBox=\"0 0 {size} {size}\" preserveAspectRatio=\"xMinYMin meet\">\
         <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\
         <path d=\"{path}\" fill=\"black\"/></svg>"
    )
}
