//! Integration tests for the valuator command line
//!
//! Tests are organized by topic:
//! - `run` - End-to-end invocations: inputs files, overrides, defaults
//! - `report` - Text, YAML and JSON rendering of evaluated suites

mod report;
