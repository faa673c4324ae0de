//! Resolution of configured sources into ordered (text, label) pairs.
//!
//! Resolution is pure over its inputs and order-stable: source-list order
//! first, then per-source fan-out order (collection order, then language
//! order with the default language first). Sources that produce no usable
//! value are skipped silently; that is the expected recoverable condition,
//! not an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::{FieldValue, Language, LanguageContext, RecordDoc};
use crate::resolve::sources::SourceSpec;

/// One resolved payload before encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSource {
    /// The exact text to encode.
    pub text: String,
    /// Human-facing label.
    pub label: String,
    /// The configured source this pair came from.
    pub source: SourceSpec,
}

/// Record-system context for one resolution pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResolveContext<'a> {
    /// Available languages (after actor restriction), when the system has
    /// any.
    pub languages: Option<&'a LanguageContext>,
    /// Root record, consulted by the duplicate-routing heuristic. Without
    /// it every language is emitted.
    pub root: Option<&'a RecordDoc>,
}

static LANGUAGE_QUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&language=\d+").expect("valid pattern"));

fn strip_language_query(url: &str) -> String {
    LANGUAGE_QUERY.replace_all(url, "").into_owned()
}

/// Resolve `sources` against `record`, in order.
#[tracing::instrument(skip(record, ctx))]
pub fn resolve(
    record: &RecordDoc,
    sources: &[SourceSpec],
    ctx: ResolveContext<'_>,
) -> Vec<ResolvedSource> {
    let mut out = Vec::new();
    for source in sources {
        match source {
            SourceSpec::CanonicalUrl => {
                if let Some(languages) = ctx.languages {
                    fan_out_record_urls(record, languages, ctx.root, "URL", false, source, &mut out);
                } else {
                    push(&mut out, record.http_url.clone(), "URL".to_string(), source);
                }
            }
            SourceSpec::EditUrl => {
                let url = strip_language_query(&record.edit_url);
                push(&mut out, url, "Admin URL".to_string(), source);
            }
            SourceSpec::Field(name) => resolve_field(record, name, ctx, source, &mut out),
        }
    }
    out
}

fn resolve_field(
    record: &RecordDoc,
    name: &str,
    ctx: ResolveContext<'_>,
    source: &SourceSpec,
    out: &mut Vec<ResolvedSource>,
) {
    let Some(slot) = record.field(name) else {
        tracing::debug!(field = name, "unknown or empty field, skipped");
        return;
    };
    let label = record.field_label(name);
    match &slot.value {
        FieldValue::Text(text) => push(out, text.clone(), label.to_string(), source),
        FieldValue::MultiLang(values) => {
            // Without a language context a multi-language value has no
            // usable shape and yields nothing.
            if let Some(languages) = ctx.languages {
                fan_out_multi_lang(values, languages, label, source, out);
            }
        }
        FieldValue::SubRecords(subs) => {
            for sub in subs {
                if let Some(languages) = ctx.languages {
                    fan_out_record_urls(sub, languages, ctx.root, label, true, source, out);
                } else {
                    push(
                        out,
                        sub.http_url.clone(),
                        format!("{label}: {}", sub.title),
                        source,
                    );
                }
            }
        }
        FieldValue::Files(files) => {
            for file in files {
                push(
                    out,
                    file.http_url.clone(),
                    format!("{label}: {}", file.basename),
                    source,
                );
            }
        }
    }
}

/// Fan a record's canonical URL out across the context languages.
///
/// Non-default languages whose root-record URL equals the default root URL
/// have no distinct routing; emitting them would duplicate the default
/// entry, so they are skipped.
fn fan_out_record_urls(
    record: &RecordDoc,
    languages: &LanguageContext,
    root: Option<&RecordDoc>,
    label: &str,
    add_title: bool,
    source: &SourceSpec,
    out: &mut Vec<ResolvedSource>,
) {
    let root_default_url = root.map(|r| r.http_url_in(&languages.default).to_string());
    for language in &languages.languages {
        let is_default = languages.is_default(&language.id);
        if !is_default
            && let (Some(root), Some(default_url)) = (root, root_default_url.as_deref())
            && root.http_url_in(&language.id) == default_url
        {
            tracing::debug!(language = %language.id, "no distinct routing, skipped");
            continue;
        }
        let text = record.http_url_in(&language.id).to_string();
        let title = add_title.then_some(record.title.as_str());
        push(
            out,
            text,
            suffix_label(label, language, is_default, title),
            source,
        );
    }
}

/// Fan a multi-language value out across the context languages, skipping
/// languages with no value.
fn fan_out_multi_lang(
    values: &std::collections::BTreeMap<String, String>,
    languages: &LanguageContext,
    label: &str,
    source: &SourceSpec,
    out: &mut Vec<ResolvedSource>,
) {
    for language in &languages.languages {
        let Some(text) = values.get(&language.id).filter(|t| !t.is_empty()) else {
            tracing::debug!(language = %language.id, "empty language value, skipped");
            continue;
        };
        let is_default = languages.is_default(&language.id);
        push(
            out,
            text.clone(),
            suffix_label(label, language, is_default, None),
            source,
        );
    }
}

/// Label suffix rules: `" (<language title>)"` for non-default languages,
/// then `": <record title>"` when requested. Suffixes stand alone when the
/// base label is empty.
fn suffix_label(base: &str, language: &Language, is_default: bool, title: Option<&str>) -> String {
    let mut label = base.to_string();
    if !is_default {
        if label.is_empty() {
            label = language.title.clone();
        } else {
            label = format!("{label} ({})", language.title);
        }
    }
    if let Some(title) = title {
        if label.is_empty() {
            label = title.to_string();
        } else {
            label = format!("{label}: {title}");
        }
    }
    label
}

fn push(out: &mut Vec<ResolvedSource>, text: String, label: String, source: &SourceSpec) {
    if text.is_empty() {
        tracing::debug!(%label, "empty payload, skipped");
        return;
    }
    out.push(ResolvedSource {
        text,
        label,
        source: source.clone(),
    });
}
