use std::fs;
use std::path::Path;

use anyhow::Context as _;
use catalog_application::AppContext;
use catalog_core::Settings;
use catalog_storage::Dataset;
use catalog_ui::Ui;
use directories::ProjectDirs;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let project_dirs =
        ProjectDirs::from("dev", "catalog", "catalog").context("resolve project dirs")?;

    let _log_guard = init_logging(project_dirs.data_local_dir())?;

    let settings_path = project_dirs.config_dir().join("settings.json");
    let mut settings = catalog_storage::load_settings(&settings_path)?;
    catalog_storage::apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    let dataset = load_dataset(&settings)?;
    let page_size = settings.effective_page_size(dataset.page_size);

    let system_theme =
        catalog_storage::detect_system_theme(std::env::var("COLORFGBG").ok().as_deref());
    let theme = settings.theme.unwrap_or(system_theme);
    info!(
        books = dataset.catalog.len(),
        authors = dataset.catalog.authors().len(),
        genres = dataset.catalog.genres().len(),
        page_size,
        %theme,
        "catalog loaded"
    );

    let ctx = AppContext::new(dataset.catalog, page_size, theme);
    let mut ui = Ui::new(ctx);
    let outcome = ui.run()?;
    info!(
        exit = ?outcome.exit,
        matches = outcome.ctx.matches.len(),
        rendered = outcome.ctx.list.len(),
        "session ended"
    );

    Ok(())
}

fn load_dataset(settings: &Settings) -> anyhow::Result<Dataset> {
    match settings.data_path.as_deref() {
        Some(path) => {
            info!(path, "loading dataset");
            catalog_storage::load_dataset(path)
        }
        None => catalog_storage::bundled_dataset(),
    }
}

/// File logging; stdout belongs to the terminal UI. The guard must outlive the UI.
fn init_logging(data_dir: &Path) -> anyhow::Result<WorkerGuard> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let logs_dir = data_dir.join("logs");
    fs::create_dir_all(&logs_dir)
        .with_context(|| format!("create log dir {}", logs_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "catalog.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("install tracing subscriber")?;

    Ok(guard)
}
