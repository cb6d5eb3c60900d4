//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// No output; tests install their own capture layer
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Only the first call has an effect. If another global subscriber is
/// already installed it is left in place.
///
/// # Profiles
///
/// - **Development**: human-readable logs, `deepeq_core=debug` unless
///   `RUST_LOG` says otherwise
/// - **Production**: JSON logs, `deepeq_core=info` by default
/// - **Test**: a bare registry
///
/// # Example
///
/// ```
/// use deepeq_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("deepeq_core=debug")),
                )
                .with_writer(std::io::stderr)
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("deepeq_core=info")),
                )
                .with_writer(std::io::stderr)
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init().map_err(Into::into),
        };
        installed.ok();
    });
}
