use tokio::task::JoinHandle;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::configuration::{LogFormat, LoggerSettings};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `logger.level`. The returned guard flushes the file
/// appender and must live as long as the process.
pub fn init(logger: &LoggerSettings) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logger.level));

    // console layer for tracing-subscriber
    let console = match logger.format {
        LogFormat::Json => fmt::Layer::new()
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .boxed(),
        LogFormat::Pretty => fmt::Layer::new().pretty().boxed(),
    };

    // file appender layer for tracing-subscriber
    let (file, guard) = match &logger.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "helpdesk.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .json();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    guard
}

pub fn spawn_blocking_with_tracing<F, R>(f: F) -> JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let current_span = tracing::Span::current();
    tokio::task::spawn_blocking(move || current_span.in_scope(f))
}
