// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Async line editor for cursor-addressable terminals
//!
//! This crate is the interactive line editing layer that sits between a terminal and a
//! read-eval-print consumer. The user types, navigates, corrects, and recalls previously
//! submitted lines. A completed line is handed to whoever is awaiting
//! [`LineEditor::readline`].
//!
//! # Table of contents
//!
//! <!-- TOC -->
//!
//! - [Mental model](#mental-model)
//! - [Key bindings](#key-bindings)
//! - [History and drafts](#history-and-drafts)
//! - [Redraws are derived from the terminal, not from a local model](#redraws-are-derived-from-the-terminal-not-from-a-local-model)
//! - [How to use this crate](#how-to-use-this-crate)
//!
//! <!-- /TOC -->
//!
//! # Mental model
//!
//! ```text
//! TerminalSurface ──► key classifier ──► edit ops ──► SessionState
//!        ▲                                   │
//!        └──────── escape sequences ◄────────┘
//!                                            │ (Enter)
//!                                            ▼
//!                             pending read resolved ──► evaluator
//! ```
//!
//! - [`TerminalSurface`] is the only thing the editor talks to. It accepts text, and
//!   answers "how big are you" and "where is your cursor".
//! - Input arrives on two channels, represented by [`EditorEvent`]: named keys
//!   ([`EditorEvent::NamedKey`]) and raw text ([`EditorEvent::RawText`]).
//! - All mutation happens synchronously inside [`LineEditor::handle_event`]. There are
//!   no locks in the core.
//!
//! # Key bindings
//!
//! | Key                 | Effect                                       |
//! |---------------------|----------------------------------------------|
//! | Enter               | Submit the line, resolve the pending read    |
//! | Backspace           | Delete the code point before the cursor      |
//! | Left / Right        | Move the cursor one code point               |
//! | Up / Down           | Walk through history drafts                  |
//! | `\` (configurable)  | Insert `λ`                                   |
//! | Anything else       | Inserted as text, control bytes as `^X`      |
//!
//! # History and drafts
//!
//! Committed lines live in an append-only [`HistoryStore`]. Navigating to a committed
//! line copies it into a [`DraftMap`] slot, and edits only ever touch that copy. The
//! store is never mutated in place. Submitting a recalled and edited line appends a
//! brand new entry.
//!
//! # Redraws are derived from the terminal, not from a local model
//!
//! Every redraw decision re-queries [`TerminalSurface::cursor_position`] and
//! [`TerminalSurface::size`] right before emitting escape sequences. The escape
//! vocabulary is intentionally tiny, see [`CsiSequence`].
//!
//! # How to use this crate
//!
//! For an interactive program use [`ReadlineAsync::try_new`] and then call
//! [`ReadlineAsync::read_line`] in a loop. The `lambda_repl` binary in this crate shows
//! how.
//!
//! For tests, or to embed the editor on top of some other terminal, construct a
//! [`LineEditor`] directly, [`LineEditor::attach`] a surface, and feed it
//! [`EditorEvent`]s.

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod ansi;
pub mod decl_macros;
pub mod error;
pub mod public_api;
pub mod readline_impl;
pub mod terminal_surface;
pub mod test_fixtures;
pub mod tracing_logging;

// Re-export the public API.
pub use ansi::*;
pub use error::*;
pub use public_api::*;
pub use readline_impl::*;
pub use terminal_surface::*;
pub use tracing_logging::*;

// Type aliases.
use crossterm::event::Event;
use futures_core::Stream;
use std::pin::Pin;

pub type CrosstermEventResult = Result<Event, std::io::Error>;
pub type PinnedInputStream<T> = Pin<Box<dyn Stream<Item = T>>>;

// Constants.
pub const DEFAULT_PROMPT: &str = "> ";
pub const DEFAULT_LITERAL_KEY: char = '\\';
pub const DEFAULT_LITERAL_GLYPH: &str = "λ";
pub const CARET: char = '^';
pub const CARET_XOR_MASK: u32 = 0x40;
pub const DEL_CODE_POINT: u32 = 0x7F;
pub const C0_CONTROL_END: u32 = 0x20;
pub const SCROLL_FORCING_NEWLINE: &str = "\r\n";
