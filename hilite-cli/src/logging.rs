use std::sync::Once;

use tracing_subscriber::EnvFilter;

static LOGGING_INIT: Once = Once::new();

/// Install the global subscriber, writing to stderr so stdout only carries output.
///
/// Repeated calls are no-ops once initialization has run.
pub fn init_logging() -> Result<(), String> {
    let mut init_result = Ok(());

    LOGGING_INIT.call_once(|| {
        init_result = tracing_subscriber::fmt()
            .with_env_filter(default_env_filter())
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|error| format!("failed to initialize logging: {}", error));
    });

    init_result
}

fn default_env_filter() -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn"),
    }
}

#[cfg(test)]
mod tests {
    use super::init_logging;

    #[test]
    fn init_logging_is_idempotent() {
        assert!(init_logging().is_ok());
        assert!(init_logging().is_ok());
    }
}
