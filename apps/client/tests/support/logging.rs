//! Logging for integration test binaries; level from `TEST_LOG`, then
//! `RUST_LOG`, then `"warn"`.

#[ctor::ctor]
fn _auto_init_for_integration_tests() {
    client_test_support::test_logging::init();
}
