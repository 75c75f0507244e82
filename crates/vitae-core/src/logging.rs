#![forbid(unsafe_code)]

//! Production logging setup.

/// Install a JSON subscriber honoring `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed; the existing
/// subscriber is never clobbered.
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_does_not_clobber() {
        let _ = init_json_logging();
        assert!(!init_json_logging());
    }
}
