//! Indexed raster output for symbols.

use std::io::Cursor;

use crate::encode::Symbol;
use crate::foundation::error::{QrFieldError, QrFieldResult};

// 4 pixels per module with a 4-pixel quiet zone.
const CELL: u32 = 4;
const QUIET: u32 = 4;

/// Render `symbol` as GIF bytes, black modules on white.
pub fn gif_image(symbol: &Symbol) -> QrFieldResult<Vec<u8>> {
    let width = symbol.width() as u32;
    let side = width * CELL + QUIET * 2;
    let mut pixels = vec![0xFFu8; (side as usize) * (side as usize) * 4];
    for y in 0..symbol.width() {
        for x in 0..symbol.width() {
            if !symbol.is_dark(x, y) {
                continue;
            }
            fill_cell(&mut pixels, side, x as u32, y as u32);
        }
    }
    let mut out = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        &pixels,
        side,
        side,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Gif,
    )
    .map_err(|err| QrFieldError::render(err.to_string()))?;
    Ok(out.into_inner())
}

fn fill_cell(pixels: &mut [u8], side: u32, x: u32, y: u32) {
    for dy in 0..CELL {
        let py = QUIET + y * CELL + dy;
        for dx in 0..CELL {
            let px = QUIET + x * CELL + dx;
            let offset = ((py * side + px) * 4) as usize;
            pixels[offset..offset + 3].fill(0x00);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: usize) -> Symbol {
        let modules = (0..width * width).map(|i| i % 2 == 0).collect();
        Symbol::from_modules(width, modules)
    }

    #[test]
    fn output_carries_gif_signature() {
        let bytes = gif_image(&checker(21)).unwrap();
        assert!(bytes.starts_with(b"GIF8"));
    }

    #[test]
    fn output_is_byte_stable() {
        let a = gif_image(&checker(21)).unwrap();
        let b = gif_image(&checker(21)).unwrap();
        assert_eq!(a, b);
    }
}
