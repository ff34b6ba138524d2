//! Tests for tracing initialization.

use std::sync::Mutex;

use brierboard_core::tracing::setup::{init_tracing, LOG_ENV_VAR};

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_per_crate_filter_is_accepted() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV_VAR, "brierboard_engine=debug,brierboard=warn");
    init_tracing();
    std::env::remove_var(LOG_ENV_VAR);
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    tracing::info!(target: "brierboard", "still alive");
}

#[test]
fn test_stage_span_names() {
    use brierboard_core::tracing::spans::names;
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    let span = brierboard_core::assemble_span!("baseline");
    let _guard = span.enter();
    for name in [names::BUILD, names::FIT, names::SIMULATE, names::ASSEMBLE, names::SOTA] {
        assert!(name.starts_with("brierboard."));
    }
}
