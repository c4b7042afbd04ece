// src/telemetry.rs
//! Tracing setup and log-safe helpers.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG_FORMAT: &str = "CONFIDENCE_LOG_FORMAT";
const DEFAULT_FILTER: &str = "incident_confidence=info,confidence=info,warn";

/// Short SHA-256 prefix so user ids never hit the logs raw.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Install a global subscriber: `RUST_LOG` filter (default above), compact
/// output, or JSON lines when `CONFIDENCE_LOG_FORMAT=json`.
/// Returns `false` if a subscriber was already installed (e.g. by the runtime).
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var(ENV_LOG_FORMAT)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).try_init().is_ok()
    } else {
        registry.with(fmt::layer().compact()).try_init().is_ok()
    }
}
