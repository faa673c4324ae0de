//! Source identifiers and their normalization.

/// Where a QR payload's text comes from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceSpec {
    /// The record's public canonical URL. Configured as `httpUrl`; the
    /// literal alias `url` normalizes to the same source.
    CanonicalUrl,
    /// The record's administrative edit URL, configured as `editUrl`.
    EditUrl,
    /// A named field on the record.
    Field(String),
}

impl SourceSpec {
    /// Parse one trimmed identifier. Returns `None` for empty input.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw {
            "" => None,
            "httpUrl" | "url" => Some(Self::CanonicalUrl),
            "editUrl" => Some(Self::EditUrl),
            name => Some(Self::Field(name.to_string())),
        }
    }

    /// The normalized configuration identifier.
    pub fn as_str(&self) -> &str {
        match self {
            Self::CanonicalUrl => "httpUrl",
            Self::EditUrl => "editUrl",
            Self::Field(name) => name,
        }
    }
}

impl serde::Serialize for SourceSpec {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Parse a comma-separated source list into normalized specs.
///
/// An empty list defaults to the canonical URL; duplicates (after
/// normalization) keep their first occurrence only.
pub fn parse_sources(raw: &str) -> Vec<SourceSpec> {
    let mut sources: Vec<SourceSpec> = Vec::new();
    for part in raw.split(',') {
        let Some(spec) = SourceSpec::parse(part) else {
            continue;
        };
        if !sources.contains(&spec) {
            sources.push(spec);
        }
    }
    if sources.is_empty() {
        sources.push(SourceSpec::CanonicalUrl);
    }
    sources
}
