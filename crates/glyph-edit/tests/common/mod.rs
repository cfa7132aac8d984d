use std::sync::Once;

static INIT: Once = Once::new();

/// Route engine logs to the test harness output.
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}
