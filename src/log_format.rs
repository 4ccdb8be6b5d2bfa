//! Compact log line format used by the binary.
//!
//! `2084-06-12T10:15:00.123Z  INFO hello_db::web: span1:span2: message key=value`
//!
//! The module path comes before the span context so lines from the same
//! module line up when scanning a log.

use chrono::{SecondsFormat, Utc};
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

pub struct CompactFormat {
    ansi: bool,
}

impl CompactFormat {
    pub fn new(ansi: bool) -> Self {
        Self { ansi }
    }
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[31m",
        Level::WARN => "\x1b[33m",
        Level::INFO => "\x1b[32m",
        Level::DEBUG => "\x1b[34m",
        Level::TRACE => "\x1b[35m",
    }
}

impl<S, N> FormatEvent<S, N> for CompactFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        write!(
            writer,
            "{} ",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
        )?;

        let level = metadata.level();
        if self.ansi {
            write!(writer, "{}{:>5}\x1b[0m ", level_color(level), level)?;
        } else {
            write!(writer, "{:>5} ", level)?;
        }

        write!(writer, "{}: ", metadata.target())?;

        if let Some(scope) = ctx.event_scope() {
            let names: Vec<&str> = scope.from_root().map(|span| span.name()).collect();
            if !names.is_empty() {
                write!(writer, "{}: ", names.join(":"))?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
