mod dispatch_tests;
mod run_loop_tests;
