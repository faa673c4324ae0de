//! Rendering: symbol matrices to image markup and data URIs.
//!
//! Two packaging steps follow symbol rendering. [`raw_image`] produces the
//! raw payload (inline SVG markup, or a base64 data URI for SVG and GIF).
//! [`finish`] wraps the payload into display markup carrying the original
//! text: a `<title>` caption inside inline SVG, or an `<img>` reference
//! whose `alt` attribute holds the text. Both are pure; rendering the same
//! input twice yields byte-identical output.

mod gif;
mod svg;

pub use gif::gif_image;
pub use svg::svg_document;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::config::{EncodingConfig, ImageFormat};
use crate::encode::Symbol;
use crate::foundation::error::QrFieldResult;

/// True when `text` is a previously rendered payload that must flow
/// through the renderer unchanged.
pub fn is_prerendered(text: &str) -> bool {
    text.starts_with("data:image/") || text.starts_with("<svg")
}

/// Produce the raw image payload for `symbol` under `config`: inline SVG
/// markup, or a base64 data URI (`image/svg+xml` / `image/gif`).
pub fn raw_image(symbol: &Symbol, config: EncodingConfig) -> QrFieldResult<String> {
    match config.format {
        ImageFormat::Svg => {
            let doc = svg_document(symbol);
            if config.markup {
                Ok(doc)
            } else {
                Ok(format!(
                    "data:image/svg+xml;base64,{}",
                    STANDARD.encode(doc)
                ))
            }
        }
        ImageFormat::Gif => Ok(format!(
            "data:image/gif;base64,{}",
            STANDARD.encode(gif_image(symbol)?)
        )),
    }
}

/// Wrap a raw payload into display markup carrying the original text.
///
/// Inline SVG gets a `<title>` caption immediately after its opening tag;
/// anything else becomes an `<img>` reference with the text in `alt`. The
/// synchronizer reads the text back from exactly these two places.
pub fn finish(data: &str, text: &str, config: EncodingConfig) -> String {
    if config.format == ImageFormat::Svg && config.markup {
        insert_caption(data, text)
    } else {
        format!("<img src=\"{data}\" alt=\"{}\" />", escape_attr(text))
    }
}

fn insert_caption(svg: &str, text: &str) -> String {
    match svg.find('>') {
        Some(end) => format!(
            "{}<title>{}</title>{}",
            &svg[..=end],
            escape_text(text),
            &svg[end + 1..]
        ),
        None => svg.to_string(),
    }
}

pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub(crate) fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}

pub(crate) fn unescape(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
