//! Field-level configuration surface.
//!
//! The host exposes four named options per field (`format`, `markup`,
//! `source`, `recovery`). They are read fresh into a [`FieldConfig`] at the
//! start of each invocation; the encoding subset travels through the
//! pipeline as an immutable [`EncodingConfig`] value, never as shared state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::QrFieldError;
use crate::resolve::sources::{SourceSpec, parse_sources};

/// Output representation for rendered symbols.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Scalable vector document (`image/svg+xml`).
    #[default]
    Svg,
    /// Indexed-color raster (`image/gif`).
    Gif,
}

impl FromStr for ImageFormat {
    type Err = QrFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "svg" => Ok(Self::Svg),
            "gif" => Ok(Self::Gif),
            other => Err(QrFieldError::config(format!("unknown format '{other}'"))),
        }
    }
}

/// Error-correction level: data recovery on visual damage, traded against
/// payload capacity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryLevel {
    /// 7% of data can be restored.
    #[default]
    L,
    /// 15% of data can be restored.
    M,
    /// 25% of data can be restored.
    Q,
    /// 30% of data can be restored.
    H,
}

impl RecoveryLevel {
    /// Encoder ordinal for this level.
    ///
    /// The table is the encoder's and non-monotonic: L is 1, M is 0, Q is 3,
    /// H is 2. Do not reorder.
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::L => 1,
            Self::M => 0,
            Self::Q => 3,
            Self::H => 2,
        }
    }
}

impl FromStr for RecoveryLevel {
    type Err = QrFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            other => Err(QrFieldError::config(format!(
                "unknown recovery level '{other}'"
            ))),
        }
    }
}

/// Immutable encoding options for one invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodingConfig {
    /// Output representation.
    pub format: ImageFormat,
    /// Emit inline SVG markup instead of a data URI. Meaningful only when
    /// `format` is [`ImageFormat::Svg`].
    pub markup: bool,
    /// Error-correction level.
    pub recovery: RecoveryLevel,
}

/// The named options read from the host field configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Image format (default `svg`).
    pub format: ImageFormat,
    /// Render SVG markup inline instead of a base64 data URI (default
    /// false).
    pub markup: bool,
    /// Comma-separated source list; empty means the canonical URL only.
    pub source: String,
    /// Error-correction level (default `L`).
    pub recovery: RecoveryLevel,
    /// Location of the field's source configuration, linked from the
    /// empty-state message.
    pub config_url: Option<String>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            format: ImageFormat::Svg,
            markup: false,
            source: String::new(),
            recovery: RecoveryLevel::L,
            config_url: None,
        }
    }
}

impl FieldConfig {
    /// Encoding options snapshot for one invocation.
    pub fn encoding(&self) -> EncodingConfig {
        EncodingConfig {
            format: self.format,
            markup: self.markup,
            recovery: self.recovery,
        }
    }

    /// Parsed, normalized, de-duplicated source list.
    pub fn sources(&self) -> Vec<SourceSpec> {
        parse_sources(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_table_is_fixed() {
        assert_eq!(RecoveryLevel::L.ordinal(), 1);
        assert_eq!(RecoveryLevel::M.ordinal(), 0);
        assert_eq!(RecoveryLevel::Q.ordinal(), 3);
        assert_eq!(RecoveryLevel::H.ordinal(), 2);
    }

    #[test]
    fn field_config_defaults() {
        let config = FieldConfig::default();
        assert_eq!(config.format, ImageFormat::Svg);
        assert!(!config.markup);
        assert!(config.source.is_empty());
        assert_eq!(config.recovery, RecoveryLevel::L);
        assert_eq!(config.sources(), vec![SourceSpec::CanonicalUrl]);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: FieldConfig = serde_json::from_str(r#"{"format":"gif"}"#).unwrap();
        assert_eq!(config.format, ImageFormat::Gif);
        assert_eq!(config.recovery, RecoveryLevel::L);
    }

    #[test]
    fn unknown_values_are_config_errors() {
        assert!(matches!(
            "png".parse::<ImageFormat>(),
            Err(QrFieldError::Config(_))
        ));
        assert!(matches!(
            "X".parse::<RecoveryLevel>(),
            Err(QrFieldError::Config(_))
        ));
    }
}
