//! Tests for tracing initialization.

use dple_core::tracing::init_tracing;

/// Initialization can be called repeatedly.
#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
    tracing::info!("still logging");
}
