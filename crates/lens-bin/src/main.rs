//! `lens`: a modal terminal editor with switchable views.

use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};

use anyhow::Result;
use clap::Parser;
use core_actions::ModeController;
use core_config::{Config, ConfigContext, EffectiveView, load_from};
use core_state::Mode;
use core_terminal::CrosstermBackend;
use core_view::{VariantTable, ViewSettings};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod runtime;
mod startup;

use runtime::EditorRuntime;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "lens", version, about = "Modal line editor with switchable views")]
struct Args {
    /// Files to edit as one buffer. `FILE/N` opens FILE at line N.
    pub files: Vec<PathBuf>,
    /// Start in table view.
    #[arg(short = 't', long = "table")]
    pub table: bool,
    /// Configuration file path (overrides discovery of `lens.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    /// Log to `lens.log` in the working directory, recreated on every start.
    /// The terminal owns stdout, so nothing is logged there.
    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join("lens.log");
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, "lens.log");
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

fn view_settings(config: &Config, effective: EffectiveView, columns: u16, rows: u16) -> ViewSettings {
    ViewSettings {
        table_cell_width: usize::from(effective.table_cell_width),
        search_pattern_max: effective.search_pattern_max,
        variants: Arc::new(VariantTable::with_groups(&config.file.variants.groups)),
        ..ViewSettings::for_terminal(columns, rows, effective.reserved_rows)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut app = AppStartup::new();
    app.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let mut config = load_from(args.config.clone())?;
    let targets = startup::resolve_targets(&args.files, &config.file.editor.default_file);
    let (state, start_line) = startup::open(&targets);
    let mode = if args.table { Mode::Table } else { Mode::Plain };

    let guard = app.backend.enter_guard()?;
    let (columns, rows) = guard.size()?;
    let effective = config.apply_context(ConfigContext::new(columns, rows));
    let settings = view_settings(&config, effective, columns, rows);
    info!(
        target: "runtime",
        columns,
        rows,
        mode = %mode,
        config_override = args.config.is_some(),
        reserved_rows = effective.reserved_rows,
        "bootstrap_complete"
    );

    let mut ctl = ModeController::new(state, mode, settings);
    if let Some(line) = start_line.filter(|&l| l > 0) {
        ctl.jump_to_line(isize::try_from(line).unwrap_or(isize::MAX));
    }

    let mut runtime = EditorRuntime::new(ctl, config, stdout());
    let result = runtime.run();
    drop(guard);
    info!(target: "runtime", ok = result.is_ok(), "shutdown");
    result
}
