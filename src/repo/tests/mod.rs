//! Unit tests for the repo context.
