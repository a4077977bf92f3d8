//! Quill entrypoint.
//!
//! Synchronous loop: poll the terminal with a timeout, feed converted events
//! to the session, send a `Tick` at a steady cadence and repaint only when
//! something reported a visible change.

use anyhow::Result;
use clap::Parser;
use core_actions::{EditorSession, FsFileIo, Host};
use core_events::Event;
use core_render::{MarkdownTheme, PlainTheme, ThemeOverlay};
use core_terminal::{
    CrosstermBackend, Painter, SystemClipboard, TerminalBackend, TerminalConfirm, convert_event,
};
use std::cell::Cell;
use std::io::{BufWriter, stdout};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Once;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const TICK: Duration = Duration::from_millis(100);
const LOG_FILE: &str = "quill.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "Quill, a distraction-free writing editor")]
struct Args {
    /// File to open. A missing file is created on first save.
    pub path: Option<PathBuf>,
    /// Configuration file (overrides discovery of `quill.toml`).
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

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
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

    fn build_session(args: &Args) -> Result<(EditorSession, Rc<Cell<bool>>)> {
        let config = core_config::load_from(args.config.clone())?;
        let confirm = TerminalConfirm::new();
        let touched = confirm.touched();
        let host = Host::new(Box::new(FsFileIo), Box::new(confirm));
        let mut session = EditorSession::new(config, host, Instant::now());
        match SystemClipboard::new() {
            Ok(clipboard) => session.set_clipboard_provider(Box::new(clipboard)),
            Err(e) => warn!(target: "runtime", error = %e, "system_clipboard_unavailable"),
        }
        if let Some(path) = &args.path {
            session.open_initial(path);
        }
        info!(
            target: "runtime",
            path = args.path.as_ref().map(|p| p.display().to_string()).as_deref(),
            config_override = args.config.is_some(),
            "bootstrap_complete"
        );
        Ok((session, touched))
    }
}

/// Markdown styling for markdown files, plain text otherwise.
fn theme_for(path: Option<&Path>) -> &'static dyn ThemeOverlay {
    let markdown = path
        .and_then(Path::extension)
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"));
    if markdown { &MarkdownTheme } else { &PlainTheme }
}

fn run_loop(
    session: &mut EditorSession,
    touched: &Rc<Cell<bool>>,
    theme: &dyn ThemeOverlay,
) -> Result<()> {
    let (cols, rows) = crossterm::terminal::size()?;
    session.resize(cols, rows);
    let mut painter = Painter::new();
    let mut out = BufWriter::new(stdout());
    let mut dirty = true;
    let mut last_tick = Instant::now();
    while !session.should_quit() {
        if touched.replace(false) {
            painter.invalidate();
            dirty = true;
        }
        if dirty {
            let screen = session.render(theme);
            painter.paint(&mut out, &screen)?;
            dirty = false;
        }
        let timeout = TICK.saturating_sub(last_tick.elapsed());
        if crossterm::event::poll(timeout)?
            && let Some(event) = convert_event(crossterm::event::read()?)
        {
            if matches!(event, Event::Resize { .. }) {
                painter.invalidate();
            }
            dirty |= session.handle_event(event).dirty;
        }
        if last_tick.elapsed() >= TICK {
            last_tick = Instant::now();
            dirty |= session.handle_event(Event::Tick(last_tick)).dirty;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let (mut session, touched) = AppStartup::build_session(&args)?;
    let theme = theme_for(args.path.as_deref());
    startup.backend.set_title("Quill")?;
    let result = {
        let _guard = startup.backend.enter_guard()?;
        run_loop(&mut session, &touched, theme)
    };
    info!(target: "runtime", ok = result.is_ok(), "shutdown");
    result
}
