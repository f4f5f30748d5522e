//! Test modules for twobe-io
//!
//! File-based loading tests: extension dispatch, missing files and the
//! error taxonomy surfaced to the viewer.
