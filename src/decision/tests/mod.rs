//! Unit tests for the decision context.
