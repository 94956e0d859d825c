//! Property-based tests for ACL matching.
