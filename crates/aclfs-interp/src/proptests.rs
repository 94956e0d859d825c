//! Property-based tests for the grammar and the session driver.
