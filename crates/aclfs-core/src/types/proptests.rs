//! Property-based tests for core types and the path grammar.
