// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

/// Error returned from [`LineEditor::readline()`][crate::LineEditor::readline] and
/// [`ReadlineAsync::read_line()`][crate::ReadlineAsync::read_line]. Edits that run into
/// a buffer boundary are not errors, they are no-ops.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ReadlineError {
    /// An internal I/O error occurred while writing to, or querying, the terminal
    /// surface.
    #[error(transparent)]
    #[diagnostic(code(line_edit::io))]
    IO(#[from] io::Error),

    /// `readline()` was called before a terminal surface was attached.
    #[error("no terminal surface is attached to the line editor")]
    #[diagnostic(
        code(line_edit::not_attached),
        help("Call `LineEditor::attach()` before `LineEditor::readline()`")
    )]
    NotAttached,

    /// `readline()` was called while a previous read is still waiting for the user to
    /// press Enter. Reads are never queued.
    #[error("a read is already pending on this line editor")]
    #[diagnostic(
        code(line_edit::read_already_pending),
        help("Await the existing read handle before asking for another line")
    )]
    ReadAlreadyPending,

    /// The line editor was dropped before the pending read was fulfilled.
    #[error("line editor closed before the line was submitted")]
    #[diagnostic(code(line_edit::closed))]
    Closed,

    /// The stream of terminal input events ended while a read was pending.
    #[error("terminal input stream ended")]
    #[diagnostic(code(line_edit::input_closed))]
    InputClosed,
}

/// For convenience, convert [`miette::Report`] to [`ReadlineError`], so that
/// `into_diagnostic()` works in code that returns a [`ReadlineError`].
impl From<miette::Report> for ReadlineError {
    fn from(report: miette::Report) -> Self {
        ReadlineError::IO(io::Error::other(format!("{report}")))
    }
}
