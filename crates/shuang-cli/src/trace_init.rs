use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "shuangpin-trace.jsonl";
const FILE_FILTER: &str = "shuang_core=debug,shuang_session=debug,shuang_cli=debug";
const STDERR_FILTER: &str = "warn";

/// Install the global subscriber. With `log_dir` events go to a
/// never-rotating file at debug level, otherwise warnings go to stderr.
/// `RUST_LOG` overrides either filter.
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the whole run.
pub fn init_tracing(log_dir: Option<&Path>, json: bool) -> Option<WorkerGuard> {
    let (writer, guard, default_filter) = match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (BoxMakeWriter::new(non_blocking), Some(guard), FILE_FILTER)
        }
        None => (BoxMakeWriter::new(std::io::stderr), None, STDERR_FILTER),
    };

    let builder = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        );
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("tracing already initialized: {e}");
    }
    guard
}
