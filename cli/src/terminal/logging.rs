use std::fmt::Debug;

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::filter::{EnvFilter, FilterExt, filter_fn};
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use crate::terminal::print::PRINT_TARGET;

/// Installs the global subscriber.
///
/// Terminal output goes to stdout unformatted; everything else is filtered by
/// `RUST_LOG` (bamctl's own events at `info`, or `debug` with `--debug`)
/// and goes to stderr.
pub fn init(debug: bool) {
    let level: &str = if debug { "debug" } else { "info" };
    let env_filter: EnvFilter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,bamctl={level},bamctl_core={level},bamctl_common={level}"))
    });

    let output = tracing_subscriber::fmt::layer()
        .event_format(BamctlFormatter)
        .with_writer(std::io::stdout)
        .with_filter(filter_fn(|meta: &Metadata<'_>| meta.target() == PRINT_TARGET));

    let logs = tracing_subscriber::fmt::layer()
        .event_format(BamctlFormatter)
        .with_writer(std::io::stderr)
        .with_filter(env_filter.and(filter_fn(|meta: &Metadata<'_>| meta.target() != PRINT_TARGET)));

    tracing_subscriber::registry().with(output).with(logs).init();
}

pub struct BamctlFormatter;

impl<S, N> FormatEvent<S, N> for BamctlFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut raw = RawMessage::default();
            event.record(&mut raw);
            return writeln!(writer, "{}", raw.0.unwrap_or_default());
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[derive(Default)]
struct RawMessage(Option<String>);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "raw_msg" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}
