//! Integration tests for gh-search
//!
//! These tests use wiremock to stand in for GitHub and run whole searches
//! end-to-end.

mod search_tests;
