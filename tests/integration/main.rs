//! Integration tests

mod api_tests;
mod archive_tests;
