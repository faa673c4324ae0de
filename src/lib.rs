//! Qrfield turns record content into QR code collections and a viewer fragment.
//!
//! The crate resolves a configurable set of content sources attached to a
//! record (canonical URL, edit URL, named text/file/image fields, with
//! per-language variants) into a deterministic, ordered sequence of encoded
//! and rendered payloads (`QrEntry`), and presents them behind a
//! single-selection viewer whose echo region mirrors the visible payload.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `RecordDoc + [SourceSpec] + ResolveContext -> Vec<ResolvedSource>`
//!    (which texts, in what order, under which labels)
//! 2. **Encode**: `&str + recovery ordinal -> Symbol` (the external `qrcode`
//!    crate behind [`encode_symbol`], which also picks the minimal symbol
//!    version)
//! 3. **Render**: `Symbol -> raw payload -> image markup` (inline SVG with a
//!    `<title>` caption, or a `data:` URI wrapped in `<img>`)
//! 4. **Present**: `Vec<QrEntry> -> Viewer -> HTML fragment` (selector,
//!    gallery, echo region)
//! 5. **Synchronize**: [`Viewer::select`], the selection state machine
//!    operating only on already-rendered item markup.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: resolution, encoding and rendering are pure
//!   and byte-stable for a given input.
//! - **No IO in the pipeline**: record and configuration data are front-loaded
//!   into [`Snapshot`] values; file IO lives in the CLI.
//! - **No shared mutable state**: [`EncodingConfig`] is an explicit value
//!   threaded through resolve, assembly and rendering.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod encode;
mod foundation;
mod pipeline;
mod present;
mod record;
mod render;
mod resolve;

pub use config::{EncodingConfig, FieldConfig, ImageFormat, RecoveryLevel};
pub use encode::{Symbol, encode_symbol};
pub use foundation::error::{QrFieldError, QrFieldResult};
pub use pipeline::{QrEntry, formatted, generate_entries, render_field, snapshot_entries};
pub use present::markup::{Viewer, ViewerOptions, echo_markup};
pub use present::sync::extract_text;
pub use record::{
    Actor, FieldSlot, FieldValue, FileRef, Language, LanguageContext, LanguageId, RecordDoc,
    Snapshot,
};
pub use render::{finish, is_prerendered, raw_image};
pub use resolve::resolver::{ResolveContext, ResolvedSource, resolve};
pub use resolve::sources::{SourceSpec, parse_sources};
