//! Pipeline assembly: resolved sources to encoded, rendered entries.
//!
//! Assembly is sequential and order-stable: the entry sequence matches the
//! resolver's emission order exactly. Encoder capacity failures propagate;
//! nothing here retries.

use serde::Serialize;

use crate::config::EncodingConfig;
use crate::encode::encode_symbol;
use crate::foundation::error::QrFieldResult;
use crate::present::markup::{Viewer, ViewerOptions};
use crate::record::{RecordDoc, Snapshot};
use crate::render;
use crate::resolve::resolver::{ResolveContext, ResolvedSource, resolve};
use crate::resolve::sources::SourceSpec;

/// One fully resolved, encoded and rendered payload. Immutable after
/// creation.
#[derive(Clone, Debug, Serialize)]
pub struct QrEntry {
    /// Human-facing label shown in the selector.
    pub label: String,
    /// Exact text encoded into the symbol.
    pub text: String,
    /// Display markup: inline SVG, or an `<img>` reference.
    pub image: String,
    /// Pre-wrap payload: data URI, or SVG markup when inline.
    pub data: String,
    /// Configured source this entry came from.
    pub source: SourceSpec,
}

/// Encode and render every resolved source against `record`, in
/// resolution order.
#[tracing::instrument(skip(record, ctx))]
pub fn generate_entries(
    record: &RecordDoc,
    sources: &[SourceSpec],
    ctx: ResolveContext<'_>,
    config: EncodingConfig,
) -> QrFieldResult<Vec<QrEntry>> {
    let resolved = resolve(record, sources, ctx);
    let mut entries = Vec::with_capacity(resolved.len());
    for item in resolved {
        entries.push(make_entry(item, config)?);
    }
    Ok(entries)
}

fn make_entry(item: ResolvedSource, config: EncodingConfig) -> QrFieldResult<QrEntry> {
    let data = if render::is_prerendered(&item.text) {
        // Pre-rendered payloads flow through the renderer unchanged.
        item.text.clone()
    } else {
        let symbol = encode_symbol(&item.text, config.recovery.ordinal())?;
        render::raw_image(&symbol, config)?
    };
    let image = render::finish(&data, &item.text, config);
    tracing::trace!(label = %item.label, source = %item.source.as_str(), "rendered entry");
    Ok(QrEntry {
        label: item.label,
        text: item.text,
        image,
        data,
        source: item.source,
    })
}

/// Concatenation of every entry's display markup, in order: the formatted
/// field value.
pub fn formatted(entries: &[QrEntry]) -> String {
    entries.iter().map(|entry| entry.image.as_str()).collect()
}

/// Resolve, encode and render a full snapshot into its entry sequence.
///
/// Applies the actor's language restriction and the configured source
/// list before running the pipeline.
#[tracing::instrument(skip(snapshot))]
pub fn snapshot_entries(snapshot: &Snapshot) -> QrFieldResult<Vec<QrEntry>> {
    let sources = snapshot.field.sources();
    let actor = snapshot.actor.clone().unwrap_or_default();
    let languages = snapshot
        .languages
        .as_ref()
        .map(|context| context.for_actor(&actor));
    let ctx = ResolveContext {
        languages: languages.as_ref(),
        root: snapshot.root.as_ref(),
    };
    generate_entries(&snapshot.record, &sources, ctx, snapshot.field.encoding())
}

/// Render a full snapshot into its viewer.
pub fn render_field(snapshot: &Snapshot) -> QrFieldResult<Viewer> {
    let entries = snapshot_entries(snapshot)?;
    let options = ViewerOptions {
        config_url: snapshot.field.config_url.clone(),
        ..ViewerOptions::default()
    };
    Ok(Viewer::build(entries, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldConfig, ImageFormat, RecoveryLevel};
    use crate::record::{FieldSlot, FieldValue};
    use crate::resolve::sources::parse_sources;

    fn record() -> RecordDoc {
        RecordDoc {
            title: "Home".to_string(),
            http_url: "https://example.com/".to_string(),
            edit_url: "https://example.com/admin/?id=1".to_string(),
            ..RecordDoc::default()
        }
    }

    fn config() -> EncodingConfig {
        EncodingConfig {
            format: ImageFormat::Svg,
            markup: false,
            recovery: RecoveryLevel::L,
        }
    }

    #[test]
    fn entries_preserve_resolution_order() {
        let entries = generate_entries(
            &record(),
            &parse_sources("url, editUrl"),
            ResolveContext::default(),
            config(),
        )
        .unwrap();
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["URL", "Admin URL"]);
    }

    #[test]
    fn entry_text_is_the_exact_payload() {
        let entries = generate_entries(
            &record(),
            &[SourceSpec::CanonicalUrl],
            ResolveContext::default(),
            config(),
        )
        .unwrap();
        assert_eq!(entries[0].text, "https://example.com/");
        assert!(entries[0].data.starts_with("data:image/svg+xml;base64,"));
        assert!(entries[0].image.starts_with("<img "));
    }

    #[test]
    fn prerendered_text_bypasses_the_encoder() {
        let mut record = record();
        record.fields.insert(
            "badge".to_string(),
            FieldSlot {
                label: "Badge".to_string(),
                value: FieldValue::Text("data:image/gif;base64,R0lGODdh".to_string()),
            },
        );
        let entries = generate_entries(
            &record,
            &[SourceSpec::Field("badge".to_string())],
            ResolveContext::default(),
            config(),
        )
        .unwrap();
        assert_eq!(entries[0].data, "data:image/gif;base64,R0lGODdh");
    }

    #[test]
    fn formatted_concatenates_in_order() {
        let entries = generate_entries(
            &record(),
            &parse_sources("url, editUrl"),
            ResolveContext::default(),
            config(),
        )
        .unwrap();
        let formatted = formatted(&entries);
        let first = formatted.find(&entries[0].image).unwrap();
        let second = formatted.find(&entries[1].image).unwrap();
        assert!(first < second);
    }

    #[test]
    fn snapshot_defaults_to_canonical_url() {
        let snapshot = Snapshot {
            record: record(),
            field: FieldConfig::default(),
            ..Snapshot::default()
        };
        let entries = snapshot_entries(&snapshot).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "URL");
    }
}
