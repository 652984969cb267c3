//! Unit tests for repository ports and the in-memory adapter.
