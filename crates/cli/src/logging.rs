//! Logging setup with runtime level reload.
//!
//! `RUST_LOG` wins when set; otherwise the level follows the
//! `datadigger.debugLogging` setting, and a reload handle lets a
//! configuration change retune it without restarting.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

pub struct Logging {
    handle: reload::Handle<EnvFilter, Registry>,
}

/// Install the global subscriber. Call once, early.
pub fn init(debug: bool) -> Logging {
    let (filter, handle) = reload::Layer::new(default_filter(debug));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
    Logging { handle }
}

impl Logging {
    /// Apply a changed debug-logging setting.
    pub fn set_debug(&self, debug: bool) {
        if let Err(err) = self.handle.reload(default_filter(debug)) {
            tracing::warn!("Could not reload the log filter: {err}");
        }
    }
}

fn default_filter(debug: bool) -> EnvFilter {
    if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}
