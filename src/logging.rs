use colored::*;
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

/// A tracing event formatter for user-facing CLI output.
///
/// Benchmark progress is what the user asked to see, so info-level lines are
/// printed bare; warnings and errors keep a short level tag. The whole line
/// is colored by severity and no timestamps or targets are printed.
pub struct SuiteFormatter;

impl<S, N> FormatEvent<S, N> for SuiteFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        // Buffer the fields so color applies to the whole line.
        let mut buffer = String::new();
        let mut buf_writer = Writer::new(&mut buffer);
        ctx.format_fields(buf_writer.by_ref(), event)?;

        let line = match *event.metadata().level() {
            Level::INFO => buffer.white(),
            Level::WARN => format!("warning: {}", buffer).yellow(),
            Level::ERROR => format!("error: {}", buffer).red(),
            Level::DEBUG => buffer.blue(),
            Level::TRACE => buffer.purple(),
        };

        writeln!(writer, "{}", line)
    }
}
