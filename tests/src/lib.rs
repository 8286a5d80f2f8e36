//! # Discovery ACL Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Request-handler flows over the whole gate
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p qc-tests
//!
//! # With logs
//! RUST_LOG=qc_discovery_acl=debug cargo test -p qc-tests -- --nocapture
//! ```

pub mod integration;

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a test-writer subscriber honouring `RUST_LOG`. Safe to call from
/// every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
