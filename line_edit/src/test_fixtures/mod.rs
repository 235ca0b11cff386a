// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fixtures for testing code built on this crate, without a real terminal. These are
//! public so that integration tests (and downstream crates) can use them too.

// Attach.
pub mod input_stream;
pub mod terminal_surface_mock;

// Re-export.
pub use input_stream::*;
pub use terminal_surface_mock::*;
