//! Preview support for `envbuild diff`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use envbuild_core::{Settings, OUTPUT_FILE};
use envbuild_store::ParameterStore;

use crate::error::{io_err, SyncError};
use crate::pipeline::render_env;

/// What a build would change in `.env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvDiff {
    pub output_path: PathBuf,
    /// Unified diff against the current file; `None` when nothing would change.
    pub unified_diff: Option<String>,
    pub unresolved: Vec<String>,
}

/// Render exactly as a build would and compare with the current `.env`.
///
/// A missing `.env` compares as empty. No files are written.
pub async fn diff_env<S>(settings: &Settings, store: &S) -> Result<EnvDiff, SyncError>
where
    S: ParameterStore + ?Sized,
{
    let env = render_env(settings, store).await?;
    let existing = read_existing_or_empty(&env.output_path)?;
    let rendered = &env.rendered.text;

    let unified_diff = (existing != *rendered).then(|| {
        let old_header = format!("a/{OUTPUT_FILE}");
        let new_header = format!("b/{OUTPUT_FILE}");
        TextDiff::from_lines(&existing, rendered)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string()
    });

    Ok(EnvDiff {
        output_path: env.output_path,
        unified_diff,
        unresolved: env.rendered.unresolved,
    })
}

fn read_existing_or_empty(path: &Path) -> Result<String, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}
