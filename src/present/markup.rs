//! Viewer fragment: selector, gallery and echo region.
//!
//! The fragment has three parts in a fixed order: an optional selector
//! (one option per entry, value = positional index), a gallery where
//! exactly one item is visible, and an echo region showing the visible
//! entry's text. The parts share a fragment identifier and address items
//! by index, never by sibling position, so the synchronizer contract is
//! robust to markup changes.

use std::fmt::Write as _;

use crate::pipeline::QrEntry;
use crate::render::{escape_attr, escape_text};

/// Class marking the visible gallery item.
pub(crate) const VISIBLE_CLASS: &str = "is-visible";

/// Presentation options for one viewer fragment.
#[derive(Clone, Debug)]
pub struct ViewerOptions {
    /// Fragment identifier shared by selector, gallery and echo region.
    pub fragment_id: String,
    /// Location of the field's source configuration, linked from the
    /// empty-state message.
    pub config_url: Option<String>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            fragment_id: "qrfield".to_string(),
            config_url: None,
        }
    }
}

/// Single-selection viewer over an ordered entry sequence.
///
/// Exactly one gallery item is visible at a time; absent explicit
/// selection, the first. The echo region mirrors the visible item's
/// decoded text. [`Viewer::select`] is the only transition.
#[derive(Clone, Debug)]
pub struct Viewer {
    pub(crate) options: ViewerOptions,
    pub(crate) labels: Vec<String>,
    pub(crate) items: Vec<String>,
    pub(crate) visible: usize,
    pub(crate) echo: String,
}

impl Viewer {
    /// Build the viewer model from rendered entries. The first entry is
    /// visible and feeds the echo region.
    pub fn build(entries: Vec<QrEntry>, options: ViewerOptions) -> Self {
        let echo = entries
            .first()
            .map(|entry| echo_markup(&entry.text))
            .unwrap_or_default();
        let mut labels = Vec::with_capacity(entries.len());
        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            labels.push(entry.label);
            items.push(entry.image);
        }
        Self {
            options,
            labels,
            items,
            visible: 0,
            echo,
        }
    }

    /// Number of entries behind the viewer.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no source resolved to an entry.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the currently visible gallery item.
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Current echo region markup.
    pub fn echo(&self) -> &str {
        &self.echo
    }

    /// Serialize the fragment: selector (two or more entries), gallery and
    /// echo region, or the empty state when nothing resolved.
    pub fn to_html(&self) -> String {
        if self.is_empty() {
            return self.empty_state();
        }
        let id = &self.options.fragment_id;
        let mut out = String::new();
        if self.items.len() > 1 {
            let _ = write!(out, "<select class=\"qrfield-select\" data-qrfield=\"{id}\">");
            for (index, label) in self.labels.iter().enumerate() {
                let _ = write!(
                    out,
                    "<option value=\"{index}\">{}</option>",
                    escape_text(label)
                );
            }
            out.push_str("</select>");
        }
        let _ = write!(out, "<ul class=\"qrfield-gallery\" data-qrfield=\"{id}\">");
        for (index, item) in self.items.iter().enumerate() {
            let class = if index == self.visible {
                format!("qrfield-item {VISIBLE_CLASS}")
            } else {
                "qrfield-item".to_string()
            };
            let _ = write!(
                out,
                "<li class=\"{class}\" data-index=\"{index}\">{item}</li>"
            );
        }
        out.push_str("</ul>");
        let _ = write!(
            out,
            "<p class=\"qrfield-content\" data-qrfield=\"{id}\">{}</p>",
            self.echo
        );
        out
    }

    /// Serialize the fragment, then apply caller-supplied post-processing
    /// (cosmetic wrapping for alternate list views and the like).
    pub fn to_html_with(&self, post: impl FnOnce(String) -> String) -> String {
        post(self.to_html())
    }

    fn empty_state(&self) -> String {
        let mut out = String::from("<p class=\"qrfield-empty\">No QR code to output.<br>");
        match &self.options.config_url {
            Some(url) => {
                let _ = write!(
                    out,
                    "Please check your <a href=\"{}\" target=\"_blank\">source(s)</a>.</p>",
                    escape_attr(url)
                );
            }
            None => out.push_str("Please check your source(s).</p>"),
        }
        out
    }
}

/// Echo region markup for `text`: a self-anchored hyperlink opening a new
/// context when the text starts with a recognized scheme prefix (`http`,
/// `mailto`, `tel`), plain text otherwise.
pub fn echo_markup(text: &str) -> String {
    const LINK_PREFIXES: [&str; 3] = ["http", "mailto", "tel"];
    if LINK_PREFIXES.iter().any(|prefix| text.starts_with(prefix)) {
        format!(
            "<a href=\"{}\" target=\"_blank\">{}</a>",
            escape_attr(text),
            escape_text(text)
        )
    } else {
        escape_text(text)
    }
}
