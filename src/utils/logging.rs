use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};
use std::env;
use std::fs;
use std::io;
use std::path::Path;

/// Initialize logging for the wardrobe runner.
///
/// Console output is always enabled. When `log_file` is given the file is
/// truncated and receives a second, ANSI-free copy of every event.
pub fn init_logging(log_file: Option<&Path>) {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let enable_backtrace = env::var("RUST_BACKTRACE").unwrap_or_else(|_| "0".to_string()) == "1";

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = EnvFilter::new(&log_level);
        if let Ok(directive) = "mre_wardrobe=debug".parse() {
            filter = filter.add_directive(directive);
        }
        filter
    });

    let file_layer = log_file.and_then(|path| match open_log_file(path) {
        Ok(file) => Some(
            fmt::layer()
                .with_writer(file)
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .boxed(),
        ),
        Err(e) => {
            eprintln!("Warning: Failed to open log file {}: {}", path.display(), e);
            None
        }
    });

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true)
                .with_thread_names(true)
                .with_ansi(true),
        )
        .with(file_layer);

    // A subscriber may already be installed (tests, embedding hosts)
    if subscriber.try_init().is_err() {
        return;
    }

    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!("Panic occurred: {}", panic_info);

        if let Some(location) = panic_info.location() {
            tracing::error!(
                "Panic location: {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            );
        }

        if enable_backtrace {
            tracing::error!("Backtrace:\n{:?}", std::backtrace::Backtrace::capture());
        }
    }));

    tracing::info!("Logging initialized with level: {}", log_level);
    if let Some(path) = log_file {
        tracing::info!("File logging enabled: {}", path.display());
    }
}

fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
            return Err(e);
        }
    }
    fs::File::create(path)
}
