//! Symbol encoding seam over the external QR generator.
//!
//! The bit-level symbol construction (Reed-Solomon error correction, module
//! placement, version and mask selection) belongs to the `qrcode` crate.
//! This module fixes the ordinal interface and the matrix shape handed to
//! the renderer; minimal-size version selection stays with the generator.

use qrcode::{EcLevel, QrCode};

use crate::foundation::error::{QrFieldError, QrFieldResult};

/// Square grid of binary modules for one encoded symbol.
///
/// Owned transiently by the renderer during rendering; never persisted.
#[derive(Clone, Debug)]
pub struct Symbol {
    width: usize,
    modules: Vec<bool>,
}

impl Symbol {
    /// Modules per side.
    pub fn width(&self) -> usize {
        self.width
    }

    /// True when the module at `(x, y)` is dark.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.width + x]
    }

    #[cfg(test)]
    pub(crate) fn from_modules(width: usize, modules: Vec<bool>) -> Self {
        assert_eq!(modules.len(), width * width);
        Self { width, modules }
    }
}

/// The encoder's fixed ordinal table, non-monotonic: L is 1, M is 0,
/// Q is 3, H is 2.
fn level_for_ordinal(ordinal: u8) -> QrFieldResult<EcLevel> {
    match ordinal {
        1 => Ok(EcLevel::L),
        0 => Ok(EcLevel::M),
        3 => Ok(EcLevel::Q),
        2 => Ok(EcLevel::H),
        other => Err(QrFieldError::encode(format!(
            "unknown error-correction ordinal {other}"
        ))),
    }
}

/// Encode `text` into a minimal-size symbol at the given error-correction
/// ordinal.
///
/// Capacity failures (payload too large for the level) propagate as
/// [`QrFieldError::Encode`]; they are never retried.
pub fn encode_symbol(text: &str, ordinal: u8) -> QrFieldResult<Symbol> {
    let level = level_for_ordinal(ordinal)?;
    let code = QrCode::with_error_correction_level(text, level)?;
    let width = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|color| matches!(color, qrcode::Color::Dark))
        .collect();
    Ok(Symbol { width, modules })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_a_square_symbol() {
        let symbol = encode_symbol("https://example.com/", 1).unwrap();
        assert!(symbol.width() >= 21);
        // Finder pattern corner module is dark in every symbol.
        assert!(symbol.is_dark(0, 0));
    }

    #[test]
    fn same_input_same_symbol() {
        let a = encode_symbol("hello", 1).unwrap();
        let b = encode_symbol("hello", 1).unwrap();
        assert_eq!(a.width(), b.width());
        let same = (0..a.width())
            .all(|y| (0..a.width()).all(|x| a.is_dark(x, y) == b.is_dark(x, y)));
        assert!(same);
    }

    #[test]
    fn higher_recovery_never_shrinks_the_symbol() {
        // Ordinals: 1 = L, 2 = H.
        let low = encode_symbol("https://example.com/some/path", 1).unwrap();
        let high = encode_symbol("https://example.com/some/path", 2).unwrap();
        assert!(high.width() >= low.width());
    }

    #[test]
    fn unknown_ordinal_is_rejected() {
        assert!(encode_symbol("x", 9).is_err());
    }
}
