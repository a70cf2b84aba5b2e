//! Helpers shared by the in-crate tests.


/// Routes `log` output through the test harness so it shows up for failing tests. Safe to call
/// from every test; only the first call installs the logger.
pub(crate) fn init_logging() {
    use simplelog::{Config, LevelFilter, TestLogger};

    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}
