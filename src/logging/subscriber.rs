//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{Event, Level};
use tracing_subscriber::filter::LevelFilter;

use super::utils::{log_file_path, strip_ansi, utc_now};
use crate::cli::VERSION;

/// Target used for stage headers.
pub(super) const STAGE_TARGET: &str = "dotlink::stage";

/// How a single event is rendered, shared by the console and the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Stage,
    Error,
    Warn,
    Info,
    Debug,
}

impl LineKind {
    fn of(event: &Event<'_>) -> Self {
        let metadata = event.metadata();
        match *metadata.level() {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO if metadata.target() == STAGE_TARGET => Self::Stage,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Fixed-width tag used in the log file.
    const fn file_tag(self) -> &'static str {
        match self {
            Self::Stage => "==>  ",
            Self::Error => "ERROR",
            Self::Warn => "WARN ",
            Self::Info => "     ",
            Self::Debug => "debug",
        }
    }
}

/// Pulls the formatted `message` field out of an event.
#[derive(Default)]
struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }
}

fn message_of(event: &Event<'_>) -> String {
    let mut visitor = MessageVisitor::default();
    event.record(&mut visitor);
    visitor.0
}

/// Layer that appends every event to the run's log file, timestamped and
/// without ANSI codes.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate (or create) the log file at `path` and write a run header.
    ///
    /// Returns `None` if the file cannot be opened.
    pub(super) fn open(path: &Path) -> Option<Self> {
        let mut file = fs::File::create(path).ok()?;
        writeln!(
            file,
            "# dotlink {VERSION} started {} UTC",
            utc_now("%Y-%m-%d %H:%M:%S")
        )
        .ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let line = format!(
            "{} {} {}",
            utc_now("%H:%M:%S"),
            LineKind::of(event).file_tag(),
            strip_ansi(&message_of(event))
        );
        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "{line}").ok();
        }
    }
}

/// Console formatter: colored level prefixes, stage headers in bold.
struct DotlinkFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for DotlinkFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let msg = message_of(event);
        match LineKind::of(event) {
            LineKind::Error => writeln!(writer, "\x1b[31merror:\x1b[0m {msg}"),
            LineKind::Warn => writeln!(writer, "\x1b[33mwarning:\x1b[0m {msg}"),
            LineKind::Stage => writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            LineKind::Info => writeln!(writer, "  {msg}"),
            LineKind::Debug => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Console verbosity selected on the command line.
///
/// `-v` wins over `-q`.
#[must_use]
pub const fn console_level(verbose: bool, quiet: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else if quiet {
        LevelFilter::ERROR
    } else {
        LevelFilter::INFO
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Errors and warnings go to stderr, everything else to stdout, filtered at
/// `console`.  When `command` is given, every event from `DEBUG` up is also
/// written to `$XDG_CACHE_HOME/dotlink/<command>.log`, and that path is
/// returned if the file could be opened.
///
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(console: LevelFilter, command: Option<&str>) -> Option<PathBuf> {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let make_writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));
    let console_layer = fmt::layer()
        .event_format(DotlinkFormatter)
        .with_writer(make_writer)
        .with_filter(console);

    let path = command.and_then(log_file_path);
    let file_layer = path
        .as_deref()
        .and_then(FileLayer::open)
        .map(|layer| layer.with_filter(LevelFilter::DEBUG));
    let opened = file_layer.is_some();

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    path.filter(|_| opened)
}
