//! Build run: ReadTemplate → FetchParameters → Render → WriteOutput.
//!
//! The first failing stage aborts the run. Nothing is written unless every
//! earlier stage succeeded, so a failed run leaves the previous `.env` alone.

use std::path::PathBuf;

use envbuild_core::{Environment, Settings, OUTPUT_FILE, TEMPLATE_FILE};
use envbuild_renderer::{RenderContext, RenderOptions, Rendered, Renderer};
use envbuild_store::{fetch_parameters, ParameterStore};

use crate::error::SyncError;
use crate::writer::{self, WriteResult};

/// Summary of a finished build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub environment: Environment,
    pub output_path: PathBuf,
    pub parameter_count: usize,
    pub unresolved: Vec<String>,
    pub unused: Vec<String>,
    pub write: WriteResult,
}

/// Rendered output for a run, before anything is written.
#[derive(Debug, Clone)]
pub(crate) struct RenderedEnv {
    pub output_path: PathBuf,
    pub parameter_count: usize,
    pub rendered: Rendered,
}

/// Read the template, fetch parameters and render, without writing.
pub(crate) async fn render_env<S>(settings: &Settings, store: &S) -> Result<RenderedEnv, SyncError>
where
    S: ParameterStore + ?Sized,
{
    let template_path = settings.template_path();
    tracing::info!("Reading {}...", TEMPLATE_FILE);
    let template = std::fs::read_to_string(&template_path).map_err(|source| SyncError::Template {
        path: template_path.clone(),
        source,
    })?;

    tracing::info!(
        "Fetching parameters under {}...",
        settings.environment.namespace_path()
    );
    let parameters = fetch_parameters(store, &settings.environment, settings.max_pages).await?;

    tracing::info!("Building {} from {} parameters...", OUTPUT_FILE, parameters.len());
    let ctx = RenderContext::new(&settings.environment, &parameters);
    let renderer = Renderer::new(RenderOptions {
        escape: settings.escape,
        unresolved: settings.unresolved,
    });
    let rendered = renderer.render(&ctx, &template)?;

    for name in &rendered.unresolved {
        tracing::warn!("no parameter for %{}%; token left as-is", name);
    }
    if !rendered.unused.is_empty() {
        tracing::warn!(
            "{} parameters not used by the template: {}",
            rendered.unused.len(),
            rendered.unused.join(", ")
        );
    }

    Ok(RenderedEnv {
        output_path: settings.output_path(),
        parameter_count: parameters.len(),
        rendered,
    })
}

/// Run a full build for `settings` against `store`.
pub async fn run<S>(settings: &Settings, store: &S) -> Result<BuildReport, SyncError>
where
    S: ParameterStore + ?Sized,
{
    tracing::info!(
        "Building {} for \"{}\" environment...",
        OUTPUT_FILE,
        settings.environment
    );

    let env = render_env(settings, store).await?;
    let write = writer::write_output(&env.output_path, &env.rendered.text, settings.dry_run)?;

    if matches!(write, WriteResult::Written { .. } | WriteResult::Unchanged { .. }) {
        tracing::info!(
            "{} for \"{}\" environment has been built successfully!",
            OUTPUT_FILE,
            settings.environment
        );
    }

    Ok(BuildReport {
        environment: settings.environment.clone(),
        output_path: env.output_path,
        parameter_count: env.parameter_count,
        unresolved: env.rendered.unresolved,
        unused: env.rendered.unused,
        write,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use envbuild_core::{Environment, Parameter, UnresolvedPolicy};
    use envbuild_store::MemoryStore;
    use tempfile::TempDir;

    use super::*;

    fn settings(dir: &TempDir) -> Settings {
        Settings::new(Environment::parse("dev").unwrap(), dir.path())
    }

    fn store() -> MemoryStore {
        MemoryStore::with_pages(vec![
            vec![Parameter::new("/dev/DB_HOST", " db ")],
            vec![Parameter::new("/dev/DB_PORT", "5432")],
        ])
    }

    #[tokio::test]
    async fn run_writes_rendered_env() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env.template"), "H=%DB_HOST%\nP=%DB_PORT%\nE=%ENV%\n").unwrap();

        let report = run(&settings(&dir), &store()).await.expect("run");
        assert_eq!(report.parameter_count, 2);
        assert!(matches!(report.write, WriteResult::Written { .. }));
        assert_eq!(
            fs::read_to_string(dir.path().join(".env")).unwrap(),
            "H=\"db\"\nP=\"5432\"\nE=\"dev\"\n"
        );
    }

    #[tokio::test]
    async fn missing_template_fails_before_fetch() {
        let dir = TempDir::new().unwrap();
        let store = store();
        let err = run(&settings(&dir), &store).await.unwrap_err();
        assert!(matches!(err, SyncError::Template { .. }), "got: {err}");
        assert!(err.to_string().contains(".env.template"));
        assert!(store.requests().is_empty(), "store must not be called");
        assert!(!dir.path().join(".env").exists());
    }

    #[tokio::test]
    async fn strict_mode_aborts_without_writing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env.template"), "X=%MISSING%\n").unwrap();
        let s = settings(&dir).with_unresolved(UnresolvedPolicy::Fail);
        let err = run(&s, &store()).await.unwrap_err();
        assert!(matches!(err, SyncError::Render(_)), "got: {err}");
        assert!(!dir.path().join(".env").exists());
    }

    #[tokio::test]
    async fn dry_run_reports_would_write() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env.template"), "E=%ENV%\n").unwrap();
        let s = settings(&dir).with_dry_run(true);
        let report = run(&s, &store()).await.expect("run");
        assert!(matches!(report.write, WriteResult::WouldWrite { .. }));
        assert!(!dir.path().join(".env").exists());
    }
}
