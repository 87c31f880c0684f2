//! Application telemetry events, sinks and log setup.
//!
//! Telemetry records review-submission signals as structured events; tracing
//! output goes to a log file because the review screen owns the terminal.

use std::io;
use std::sync::{Arc, Mutex};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::api::ReviewError;

/// A structured telemetry event emitted by the review workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A review was accepted by the API.
    ReviewSubmitted {
        /// Reviewed shop.
        shop_id: String,
        /// Submitted star rating.
        rating: u8,
        /// Number of uploaded attachments.
        attachment_count: usize,
    },
    /// The API or transport rejected a submission.
    ReviewSubmissionFailed {
        /// Reviewed shop.
        shop_id: String,
        /// Error shown to the user.
        error: String,
    },
    /// The media picker failed.
    MediaPickFailed {
        /// `photo` or `video`.
        kind: String,
        /// Picker error detail.
        error: String,
        /// Whether the failure was shown to the user.
        surfaced: bool,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Telemetry sink that forwards events to `tracing` as JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };
        tracing::info!(target: "shop_review::telemetry", "{serialised}");
    }
}

/// Shared handle to the active sink.
pub type SharedTelemetrySink = Arc<dyn TelemetrySink>;

/// Returns a sink that drops everything.
#[must_use]
pub fn noop_sink() -> SharedTelemetrySink {
    Arc::new(NoopTelemetrySink)
}

/// Installs the global tracing subscriber writing to `log_file`.
///
/// Without a log file nothing is installed and tracing output is discarded.
/// The filter honours `RUST_LOG` and defaults to `shop_review=info`.
///
/// # Errors
///
/// Returns [`ReviewError::Io`] when the log file cannot be opened, or
/// [`ReviewError::Configuration`] when a subscriber is already installed.
pub fn init_logging(log_file: Option<&Utf8Path>) -> Result<(), ReviewError> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = open_log_file(path).map_err(|error| ReviewError::Io {
        message: format!("failed to open log file '{path}': {error}"),
    })?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("shop_review=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file.into_std())),
        )
        .try_init()
        .map_err(|error| ReviewError::Configuration {
            message: format!("failed to install log subscriber: {error}"),
        })
}

fn open_log_file(path: &Utf8Path) -> io::Result<cap_std::fs_utf8::File> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log path has no file name"))?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    dir.open_with(name, &options)
}

/// Recording sink for tests.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use std::sync::Mutex;

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that keeps every event in memory.
    #[derive(Debug, Default)]
    pub struct RecordingTelemetrySink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingTelemetrySink {
        /// Drains recorded events.
        #[must_use]
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .map(|mut events| events.drain(..).collect())
                .unwrap_or_default()
        }
    }

    impl TelemetrySink for RecordingTelemetrySink {
        fn record(&self, event: TelemetryEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }
    }
}
