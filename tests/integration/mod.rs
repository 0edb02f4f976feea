//! Integration tests for auxgen

mod config_integration;
mod driver_run;
mod logging_default;
mod test_utils;
