//! `string-hover`: string literal previews from the command line.
//!
//! Reads a file, picks the language surface from `--lang` or the file
//! extension, and runs the matching locator at the requested position.

mod args;
mod error;

use std::path::Path;
use std::sync::Once;

use hover_literal::{
    JsonEscapePolicy, LocatorConfig, NeverCancelled, SourceText, Surface,
    DEFAULT_JSON_ESCAPE_POLICY,
};

pub use args::{parse_args, Command, Invocation, USAGE};
pub use error::CliError;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing from `RUST_LOG`.
///
/// Safe to call multiple times; only the first call has effect, and nothing
/// is installed when `RUST_LOG` is unset.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}

/// Pick the surface for an invocation.
pub fn resolve_surface(language: Option<&str>, path: &Path) -> Result<Surface, CliError> {
    if let Some(id) = language {
        return Surface::from_language_id(id).ok_or_else(|| CliError::UnknownLanguage(id.to_owned()));
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Surface::from_extension)
        .ok_or_else(|| CliError::UndetectedLanguage {
            path: path.to_path_buf(),
        })
}

/// Run one hover request against in-memory text.
pub fn preview(text: &str, surface: Surface, invocation: &Invocation) -> Option<String> {
    let policy = if invocation.lenient_json {
        JsonEscapePolicy::Lenient
    } else {
        DEFAULT_JSON_ESCAPE_POLICY
    };
    let source = SourceText::new(text);
    surface.locate(
        LocatorConfig::with_json_escape_policy(policy),
        &source,
        invocation.position,
        &NeverCancelled,
    )
}

/// Read the file and run the hover request.
#[tracing::instrument(level = "debug", skip_all, fields(path = %invocation.path.display()))]
pub fn run(invocation: &Invocation) -> Result<Option<String>, CliError> {
    let surface = resolve_surface(invocation.language.as_deref(), &invocation.path)?;
    let text = std::fs::read_to_string(&invocation.path).map_err(|source| CliError::Read {
        path: invocation.path.clone(),
        source,
    })?;
    tracing::debug!(?surface, bytes = text.len(), "file loaded");
    Ok(preview(&text, surface, invocation))
}
