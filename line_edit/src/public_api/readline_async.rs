// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CrosstermEventResult, CrosstermSurface, EditorConfig, HistoryStore,
            LineEditor, PinnedInputStream, ReadlineError, SCROLL_FORCING_NEWLINE,
            TTYResult, TerminalSurface, is_fully_interactive_terminal, ok};
use crossterm::{event::{DisableBracketedPaste, EnableBracketedPaste, EventStream},
                execute,
                terminal::{disable_raw_mode, enable_raw_mode}};
use futures_util::StreamExt as _;
use miette::IntoDiagnostic as _;
use std::io::{Stdout, stdout};

/// Drives a [LineEditor] from a stream of [crossterm] events. This is what an
/// interactive program uses. Tests inject a mock surface and a generated stream with
/// [ReadlineAsync::new].
pub struct ReadlineAsync<S: TerminalSurface = CrosstermSurface<Stdout>> {
    editor: LineEditor<S>,
    input_stream: PinnedInputStream<CrosstermEventResult>,
    owns_raw_mode: bool,
}

impl<S: TerminalSurface + std::fmt::Debug> std::fmt::Debug for ReadlineAsync<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadlineAsync")
            .field("editor", &self.editor)
            .field("input_stream", &"<stream>")
            .field("owns_raw_mode", &self.owns_raw_mode)
            .finish()
    }
}

impl ReadlineAsync {
    /// Put the terminal in raw mode and start reading events from it.
    ///
    /// ```rust
    /// async fn foo() -> miette::Result<()> {
    ///     # use line_edit::{EditorConfig, ReadlineAsync};
    ///     let Some(mut readline_async) = ReadlineAsync::try_new(EditorConfig::default())?
    ///     else {
    ///         return Err(miette::miette!("Not an interactive terminal"));
    ///     };
    ///     let line = readline_async.read_line(Some("> ")).await?;
    ///     Ok(())
    /// }
    /// ```
    ///
    /// # Returns
    /// 1. [None] if `stdin` or `stdout` is not a terminal (eg: piped, or running in
    ///    `cargo test`).
    /// 2. Otherwise a [ReadlineAsync] attached to `stdout`.
    ///
    /// # Errors
    ///
    /// If raw mode or bracketed paste can't be turned on.
    pub fn try_new(config: EditorConfig) -> miette::Result<Option<Self>> {
        Self::try_new_with_history(config, HistoryStore::new())
    }

    /// Same as [ReadlineAsync::try_new], starting with some history.
    ///
    /// # Errors
    ///
    /// If raw mode or bracketed paste can't be turned on.
    pub fn try_new_with_history(
        config: EditorConfig,
        history: HistoryStore,
    ) -> miette::Result<Option<Self>> {
        if let TTYResult::IsNotInteractive = is_fully_interactive_terminal() {
            return Ok(None);
        }

        enable_raw_mode().into_diagnostic()?;
        execute!(stdout(), EnableBracketedPaste).into_diagnostic()?;

        let mut editor = LineEditor::new_with_history(config, history);
        editor.attach(CrosstermSurface::stdout());
        let input_stream: PinnedInputStream<CrosstermEventResult> =
            Box::pin(EventStream::new());

        Ok(Some(Self {
            editor,
            input_stream,
            owns_raw_mode: true,
        }))
    }
}

impl<S: TerminalSurface> ReadlineAsync<S> {
    /// The terminal mode is left alone, `editor` should already have a surface.
    pub fn new(
        editor: LineEditor<S>,
        input_stream: PinnedInputStream<CrosstermEventResult>,
    ) -> Self {
        Self {
            editor,
            input_stream,
            owns_raw_mode: false,
        }
    }

    #[must_use]
    pub fn editor(&self) -> &LineEditor<S> { &self.editor }

    pub fn editor_mut(&mut self) -> &mut LineEditor<S> { &mut self.editor }

    /// Replacement for [std::io::Stdin::read_line()] (this is async and non-blocking).
    /// Events are fed to the editor until the user presses Enter.
    ///
    /// # Errors
    ///
    /// - [ReadlineError::InputClosed] if the input stream ends first.
    /// - [ReadlineError::IO] if reading input or drawing fails.
    /// - Anything [LineEditor::readline] returns.
    ///
    /// In every error case the pending read is given up, so the next call starts a new
    /// one. The text typed so far stays in the editor.
    pub async fn read_line(&mut self, prompt: Option<&str>) -> Result<String, ReadlineError> {
        let mut handle = self.editor.readline(prompt)?;

        loop {
            tokio::select! {
                biased;

                result = &mut handle => return result,

                maybe_event = self.input_stream.next() => {
                    let outcome = match maybe_event {
                        Some(Ok(event)) => self.editor.handle_crossterm_event(&event),
                        Some(Err(err)) => Err(ReadlineError::IO(err)),
                        None => Err(ReadlineError::InputClosed),
                    };
                    if let Err(err) = outcome {
                        tracing::debug!(message = "read_line failed", error = %err);
                        self.editor.cancel_read();
                        return Err(err);
                    }
                }
            }
        }
    }

    /// Write `text` followed by a newline, eg: the evaluator's output between reads.
    /// In raw mode `\n` doesn't return the carriage, so `\r\n` is used.
    ///
    /// # Errors
    ///
    /// - [ReadlineError::NotAttached] if the editor has no surface.
    /// - [ReadlineError::IO] if the surface can't be written to.
    pub fn print_line(&mut self, text: &str) -> Result<(), ReadlineError> {
        let surface = self
            .editor
            .surface_mut()
            .ok_or(ReadlineError::NotAttached)?;
        surface.write_str(&format!("{text}{SCROLL_FORCING_NEWLINE}"))?;
        ok!()
    }
}

impl<S: TerminalSurface> Drop for ReadlineAsync<S> {
    fn drop(&mut self) {
        if !self.owns_raw_mode {
            return;
        }
        if let Err(err) = execute!(stdout(), DisableBracketedPaste) {
            tracing::warn!(message = "failed to disable bracketed paste", error = %err);
        }
        if let Err(err) = disable_raw_mode() {
            tracing::warn!(message = "failed to disable raw mode", error = %err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{TerminalSurfaceMock, gen_input_stream, key_press,
                               key_presses_for};
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    fn readline_async(
        events: Vec<CrosstermEventResult>,
    ) -> ReadlineAsync<TerminalSurfaceMock> {
        let mut editor = LineEditor::new(EditorConfig::default());
        editor.attach(TerminalSurfaceMock::new(20, 5));
        ReadlineAsync::new(editor, gen_input_stream(events))
    }

    fn typed_then_enter(text: &str) -> Vec<CrosstermEventResult> {
        let mut events = key_presses_for(text);
        events.push(key_press(KeyCode::Enter));
        events
    }

    #[tokio::test]
    async fn test_read_line() {
        let mut rla = readline_async(typed_then_enter("abc"));
        assert_eq!(rla.read_line(Some("> ")).await.unwrap(), "abc");
        assert!(!rla.editor().is_read_pending());
    }

    #[tokio::test]
    async fn test_consecutive_reads_share_the_stream() {
        let mut events = typed_then_enter("first");
        events.push(key_press(KeyCode::Up));
        events.push(key_press(KeyCode::Enter));
        let mut rla = readline_async(events);

        assert_eq!(rla.read_line(Some("> ")).await.unwrap(), "first");
        assert_eq!(rla.read_line(Some("> ")).await.unwrap(), "first");
        assert_eq!(rla.editor().state().history().entries(), &["first", "first"]);
    }

    #[tokio::test]
    async fn test_input_closed() {
        let mut rla = readline_async(key_presses_for("ab"));
        assert!(matches!(
            rla.read_line(Some("> ")).await,
            Err(ReadlineError::InputClosed)
        ));
        assert!(!rla.editor().is_read_pending());
        assert_eq!(rla.editor().state().line(), "ab");
    }

    #[tokio::test]
    async fn test_input_error() {
        let mut rla = readline_async(vec![Err(std::io::Error::other("tty gone"))]);
        assert!(matches!(
            rla.read_line(None).await,
            Err(ReadlineError::IO(_))
        ));
        assert!(!rla.editor().is_read_pending());
    }

    #[tokio::test]
    async fn test_print_line() {
        let mut rla = readline_async(typed_then_enter("1+1"));
        assert_eq!(rla.read_line(Some("> ")).await.unwrap(), "1+1");
        rla.print_line("2").unwrap();

        let surface = rla.editor().surface().unwrap();
        assert_eq!(surface.screen_lines()[..2].to_vec(), vec!["> 1+1", "2"]);
        assert_eq!(surface.cursor().row, 2);
    }
}
