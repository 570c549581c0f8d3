//! `tracing` bridge: forwards events from the global dispatcher into a
//! [`Logger`], so libraries that use `tracing` end up in the project log.

use std::fmt::{self, Write as _};

use projkit_types::Level;
use tracing::field::{Field, Visit};
use tracing::{Event, Level as TraceLevel, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

use crate::logger::Logger;

/// Events from this crate are never forwarded. That covers records a
/// propagating [`Logger`] re-emits and the logger's own write failures, so the
/// bridge cannot loop.
const OWN_TARGET: &str = "projkit_logger";

/// A `tracing_subscriber` layer writing events to a [`Logger`].
///
/// ```ignore
/// use tracing_subscriber::layer::SubscriberExt;
/// use tracing_subscriber::util::SubscriberInitExt;
///
/// let logger = projkit_logger::get_logger("demo")?;
/// tracing_subscriber::registry()
///     .with(projkit_logger::LoggerLayer::new(logger))
///     .init();
/// ```
#[derive(Debug, Clone)]
pub struct LoggerLayer {
    logger: Logger,
}

impl LoggerLayer {
    #[must_use]
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    #[must_use]
    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl<S: Subscriber> Layer<S> for LoggerLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target().starts_with(OWN_TARGET) {
            return;
        }

        let level = level_from_tracing(*metadata.level());
        if !self.logger.is_enabled_for(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.logger.log(level, visitor.finish());
    }
}

fn level_from_tracing(level: TraceLevel) -> Level {
    if level == TraceLevel::ERROR {
        Level::Error
    } else if level == TraceLevel::WARN {
        Level::Warning
    } else if level == TraceLevel::INFO {
        Level::Info
    } else {
        Level::Debug
    }
}

/// Flattens an event into `message key=value ...`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }
}
