use tracing::Event;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::FormatFields;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::registry::LookupSpan;

use crate::config::LoggingConfig;

struct ScopeFormat {
    engine_name: String,
}

impl<S, N> FormatEvent<S, N> for ScopeFormat
where
    S: tracing::Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let file = metadata.file().unwrap_or("unknown");
        let line = metadata.line().unwrap_or(0);

        if file == "unknown" && !cfg!(feature = "deep-trace") {
            return Ok(());
        }

        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");

        write!(
            writer,
            "{} {}::{}::{}::{}::",
            metadata.level(),
            timestamp,
            self.engine_name,
            file,
            line
        )?;

        // Format the actual message
        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Console output by default; when a log directory is configured the
/// same format goes to a daily-rolled file instead. The returned guard
/// must stay alive for the file writer to flush.
pub fn setup_tracing(config: &LoggingConfig, engine_name: &str) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,"));
    let format = ScopeFormat { engine_name: engine_name.to_string() };

    if let Some(directory) = &config.directory {
        let appender = tracing_appender::rolling::daily(directory, format!("{engine_name}.log"));
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .with_writer(non_blocking)
            .event_format(format)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_ansi(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .event_format(format)
            .init();
        None
    }
}
