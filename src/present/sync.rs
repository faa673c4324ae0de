//! Selector synchronization: the selection state machine.
//!
//! A selection change moves the visibility marker, re-reads the payload
//! text from the newly visible item's own markup and re-renders the echo
//! region. The whole transition is synchronous, touches no other state and
//! never re-invokes the pipeline: it operates purely on already-rendered
//! markup.

use crate::present::markup::{Viewer, echo_markup};
use crate::render::unescape;

impl Viewer {
    /// Apply a selection change to `index`.
    ///
    /// Steps, in order: clear the old visibility marker, mark item
    /// `index` visible, extract the encoded text from that item's markup,
    /// re-render the echo region under the same auto-link rule the
    /// presenter uses. Out-of-range indices leave the viewer untouched
    /// and return false.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.visible = index;
        let text = extract_text(&self.items[index]).unwrap_or_default();
        self.echo = echo_markup(&text);
        true
    }
}

/// Read the encoded payload text back from item markup: the `<title>`
/// caption of an inline SVG, or the `alt` attribute of an image
/// reference.
pub fn extract_text(markup: &str) -> Option<String> {
    let markup = markup.trim_start();
    let raw = if markup.starts_with("<svg") {
        let start = markup.find("<title>")? + "<title>".len();
        let end = markup[start..].find("</title>")? + start;
        &markup[start..end]
    } else {
        // The leading space keeps a data URI ending in `alt=` inside the
        // src attribute from matching.
        let start = markup.find(" alt=\"")? + " alt=\"".len();
        let end = markup[start..].find('"')? + start;
        &markup[start..end]
    };
    Some(unescape(raw))
}
