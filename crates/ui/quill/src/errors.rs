use std::{
    io::stdout,
    panic::PanicHookInfo,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use color_eyre::{
    Result,
    config::{HookBuilder, PanicHook},
};
use crossterm::{
    cursor,
    event::DisableBracketedPaste,
    terminal::{self, LeaveAlternateScreen},
};
use tracing::error;

static INSTALLED: OnceLock<()> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Install color-eyre report and panic hooks. Safe to call more than once.
pub fn init() -> Result<()> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let (panic_hook, eyre_hook) = HookBuilder::default()
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .try_into_hooks()?;
    eyre_hook.install()?;
    std::panic::set_hook(Box::new(move |info| on_panic(&panic_hook, info)));

    let _ = INSTALLED.set(());
    Ok(())
}

/// Where the session log is written; quoted in crash messages.
pub fn set_log_path(path: PathBuf) {
    let _ = LOG_PATH.set(path);
}

/// Leaves raw mode and the alternate screen if the form UI had entered them.
pub fn restore_terminal() -> Result<()> {
    if terminal::is_raw_mode_enabled()? {
        crossterm::execute!(
            stdout(),
            DisableBracketedPaste,
            LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;
    }
    Ok(())
}

fn crash_hint(log_path: Option<&Path>) -> String {
    match log_path {
        Some(path) => format!(
            "quill stopped unexpectedly; submissions of this session are lost. \
             The session log is at {}",
            path.display()
        ),
        None => "quill stopped unexpectedly before logging was set up.".to_string(),
    }
}

fn on_panic(hook: &PanicHook, info: &PanicHookInfo<'_>) {
    if let Err(err) = restore_terminal() {
        error!(%err, "could not restore the terminal");
    }

    let report = hook.panic_report(info).to_string();
    error!(report = %strip_ansi_escapes::strip_str(&report), "panic");

    #[cfg(not(debug_assertions))]
    {
        use human_panic::{handle_dump, metadata, print_msg};
        let metadata = metadata!();
        let dump = handle_dump(&metadata, info);
        if let Err(err) = print_msg(dump, &metadata) {
            eprintln!("{report}\n(human-panic failed: {err})");
        }
    }

    #[cfg(debug_assertions)]
    {
        better_panic::Settings::auto()
            .most_recent_first(false)
            .lineno_suffix(true)
            .verbosity(better_panic::Verbosity::Full)
            .create_panic_handler()(info);
    }

    eprintln!("{}", crash_hint(LOG_PATH.get().map(PathBuf::as_path)));
    std::process::exit(libc::EXIT_FAILURE);
}
