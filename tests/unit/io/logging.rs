//! Tests for log level selection and subscriber setup

#[cfg(test)]
mod tests {
    use tilestitch::io::logging::{init_logging, level_for_verbosity};

    // Tests each verbosity flag raises the level
    // Verified by mapping every count to info
    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), "info");
        assert_eq!(level_for_verbosity(1), "debug");
        assert_eq!(level_for_verbosity(2), "trace");
        assert_eq!(level_for_verbosity(9), "trace");
    }

    // Tests repeated initialization keeps the first subscriber
    // Verified by using init instead of try_init
    #[test]
    fn test_init_logging_twice() {
        init_logging(0);
        init_logging(2);
        tracing::info!("logging initialized");
    }
}
