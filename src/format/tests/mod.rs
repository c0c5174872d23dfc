//! Unit tests for note file parsing and file I/O.
//!
//! These tests verify import validation of malformed documents and that
//! exported files can be read back from disk.
