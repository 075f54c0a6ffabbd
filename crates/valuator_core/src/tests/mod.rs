//! Integration tests for the valuation engine
//!
//! Tests are organized by topic:
//! - `value` - Value suite against hand-computed figures
//! - `dividend` - Dividend discount models and the reinvestment walk
//! - `growth` - Growth suite, reverse DCF and scenarios
//! - `properties` - Formula identities, monotonicity and determinism

mod growth;
