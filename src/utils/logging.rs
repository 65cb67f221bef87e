use camino::Utf8Path;
use once_cell::sync::OnceCell;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: OnceCell<()> = OnceCell::new();
static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Console logging, plus a daily rolling file when `log_dir` is given.
/// Level comes from `RUST_LOG`, `info` otherwise. Safe to call more than once.
pub fn init_logging(log_dir: Option<&Utf8Path>) {
    let _ = INIT.get_or_init(|| {
        let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let console_layer = fmt::layer().with_target(false);

        let file_layer = log_dir.and_then(|dir| {
            std::fs::create_dir_all(dir).ok()?;
            let appender = rolling::daily(dir, "v2077-installer.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().with_writer(writer).with_ansi(false))
        });

        let _ = tracing_subscriber::registry()
            .with(env)
            .with(console_layer)
            .with(file_layer)
            .try_init();
    });
}
