//! Record-system interface consumed by the resolver.
//!
//! The hosting record system is external to this crate. It is consumed as a
//! self-contained serde document ([`RecordDoc`]) carrying exactly the
//! accessors resolution needs: title, canonical URL (optionally per
//! language), administrative edit URL and raw field slots. A [`Snapshot`]
//! front-loads one record plus its context and field configuration so the
//! pipeline itself performs no IO.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::FieldConfig;
use crate::foundation::error::{QrFieldError, QrFieldResult};

/// Identifier of a language in the record system.
pub type LanguageId = String;

/// One available language: identifier plus human-facing title.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Stable identifier, as used in per-language URL and value maps.
    pub id: LanguageId,
    /// Human-facing title, used as a label suffix for non-default entries.
    pub title: String,
}

/// Ordered set of available languages with a designated default.
///
/// Context order drives fan-out order; by convention the default language
/// comes first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageContext {
    /// Identifier of the default language.
    pub default: LanguageId,
    /// Available languages, in fan-out order.
    pub languages: Vec<Language>,
}

impl LanguageContext {
    /// True when `id` names the default language.
    pub fn is_default(&self, id: &str) -> bool {
        self.default == id
    }

    /// The context restricted for `actor`.
    ///
    /// Guests are limited to their own language; everyone else sees the full
    /// context. The default identifier is kept either way, so labelling and
    /// the duplicate-routing heuristic stay consistent.
    pub fn for_actor(&self, actor: &Actor) -> Self {
        if !actor.guest {
            return self.clone();
        }
        let id = actor.language.as_deref().unwrap_or(&self.default);
        let language = self
            .languages
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .unwrap_or_else(|| Language {
                id: id.to_string(),
                title: id.to_string(),
            });
        Self {
            default: self.default.clone(),
            languages: vec![language],
        }
    }
}

/// Requesting user, as far as language restriction is concerned.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Actor {
    /// Unauthenticated actors see only their own language.
    #[serde(default)]
    pub guest: bool,
    /// The actor's language, defaulting to the context default.
    #[serde(default)]
    pub language: Option<LanguageId>,
}

/// File or image attachment referenced by a record field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// File name, used as a label suffix.
    pub basename: String,
    /// Canonical URL of the attachment; the encoded payload.
    pub http_url: String,
}

/// Raw (unformatted) value shapes a field can resolve to.
///
/// Any shape the host system produces that is not representable here yields
/// no entries; the resolver dispatches on the tag, never on dynamic type
/// inspection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    /// A single text value.
    Text(String),
    /// A multi-language text value, keyed by language identifier.
    MultiLang(BTreeMap<LanguageId, String>),
    /// A collection of linked sub-records.
    SubRecords(Vec<RecordDoc>),
    /// A collection of file or image attachments.
    Files(Vec<FileRef>),
}

/// One field slot on a record: display label plus raw value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSlot {
    /// Display label from the field definition; the field name stands in
    /// when empty.
    #[serde(default)]
    pub label: String,
    /// Raw field value.
    pub value: FieldValue,
}

/// A record as seen by the resolver.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDoc {
    /// Record title, used as a label suffix for sub-record entries.
    #[serde(default)]
    pub title: String,
    /// Public canonical URL (default language).
    pub http_url: String,
    /// Administrative edit URL, possibly carrying a language query
    /// parameter.
    #[serde(default)]
    pub edit_url: String,
    /// Per-language canonical URLs, keyed by language identifier.
    #[serde(default)]
    pub language_urls: BTreeMap<LanguageId, String>,
    /// Raw field slots, keyed by field name.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldSlot>,
}

impl RecordDoc {
    /// Canonical URL in `language`, falling back to the default canonical
    /// URL when the record has no language-specific one.
    pub fn http_url_in(&self, language: &str) -> &str {
        self.language_urls
            .get(language)
            .map(String::as_str)
            .unwrap_or(&self.http_url)
    }

    /// Raw field slot for `name`.
    pub fn field(&self, name: &str) -> Option<&FieldSlot> {
        self.fields.get(name)
    }

    /// Display label for `name`: the slot label, or the field name itself
    /// when the definition carries none.
    pub fn field_label<'a>(&'a self, name: &'a str) -> &'a str {
        match self.fields.get(name) {
            Some(slot) if !slot.label.is_empty() => &slot.label,
            _ => name,
        }
    }
}

/// Self-contained render request: one record plus context and field
/// configuration, front-loaded before the pipeline runs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// The record to resolve.
    pub record: RecordDoc,
    /// Root record, consulted by the duplicate-routing heuristic. Fan-out
    /// emits every language when absent.
    #[serde(default)]
    pub root: Option<RecordDoc>,
    /// Available languages; absent when the system has none.
    #[serde(default)]
    pub languages: Option<LanguageContext>,
    /// Requesting actor; absent means authenticated.
    #[serde(default)]
    pub actor: Option<Actor>,
    /// Host field configuration.
    #[serde(default)]
    pub field: FieldConfig,
}

impl Snapshot {
    /// Parse a snapshot from its JSON document form.
    pub fn from_json(raw: &str) -> QrFieldResult<Self> {
        serde_json::from_str(raw).map_err(|err| QrFieldError::serde(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> LanguageContext {
        LanguageContext {
            default: "default".to_string(),
            languages: vec![
                Language {
                    id: "default".to_string(),
                    title: "English".to_string(),
                },
                Language {
                    id: "fr".to_string(),
                    title: "French".to_string(),
                },
            ],
        }
    }

    #[test]
    fn guest_actor_restricts_to_own_language() {
        let restricted = ctx().for_actor(&Actor {
            guest: true,
            language: Some("fr".to_string()),
        });
        assert_eq!(restricted.languages.len(), 1);
        assert_eq!(restricted.languages[0].id, "fr");
        assert_eq!(restricted.default, "default");
    }

    #[test]
    fn guest_without_language_falls_back_to_default() {
        let restricted = ctx().for_actor(&Actor {
            guest: true,
            language: None,
        });
        assert_eq!(restricted.languages.len(), 1);
        assert_eq!(restricted.languages[0].id, "default");
    }

    #[test]
    fn authenticated_actor_keeps_full_context() {
        let full = ctx().for_actor(&Actor::default());
        assert_eq!(full.languages.len(), 2);
    }

    #[test]
    fn http_url_in_falls_back_to_canonical() {
        let mut record = RecordDoc {
            http_url: "https://example.com/a/".to_string(),
            ..RecordDoc::default()
        };
        record
            .language_urls
            .insert("fr".to_string(), "https://example.com/fr/a/".to_string());
        assert_eq!(record.http_url_in("fr"), "https://example.com/fr/a/");
        assert_eq!(record.http_url_in("de"), "https://example.com/a/");
    }
}
