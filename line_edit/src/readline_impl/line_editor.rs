// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Classified, CrosstermInput, EditorConfig, EditorEvent, HistoryStore,
            KeyDisposition, PendingRead, SessionState, classify_named_key,
            classify_raw_text, edit_ops, redraw};
use crate::{ReadlineError, TerminalSurface, ok};
use std::{future::Future,
          pin::Pin,
          task::{Context, Poll}};
use tokio::sync::oneshot;

/// The line editor. It owns the [SessionState], and once a [TerminalSurface] is
/// attached, it turns [EditorEvent]s into edits and redraws.
///
/// Everything here is synchronous and takes `&mut self`. The only async piece is the
/// [ReadHandle] returned by [LineEditor::readline], which completes when the user
/// presses Enter. See [crate::ReadlineAsync] for a driver that feeds this from a real
/// terminal.
///
/// ```
/// use line_edit::{EditorConfig, EditorEvent, LineEditor, NamedKey,
///                 test_fixtures::TerminalSurfaceMock};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), line_edit::ReadlineError> {
/// let mut editor = LineEditor::new(EditorConfig::default());
/// editor.attach(TerminalSurfaceMock::new(80, 24));
///
/// let handle = editor.readline(Some("> "))?;
/// editor.handle_event(EditorEvent::RawText("hi".into()))?;
/// editor.handle_event(EditorEvent::NamedKey(NamedKey::Enter))?;
/// assert_eq!(handle.await?, "hi");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LineEditor<S: TerminalSurface> {
    surface: Option<S>,
    state: SessionState,
    config: EditorConfig,
}

impl<S: TerminalSurface> LineEditor<S> {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self::new_with_history(config, HistoryStore::new())
    }

    /// Start with lines that were submitted in an earlier session.
    #[must_use]
    pub fn new_with_history(config: EditorConfig, history: HistoryStore) -> Self {
        Self {
            surface: None,
            state: SessionState::new(history),
            config,
        }
    }

    /// Attach the surface to draw on. Returns the previously attached one, if any.
    pub fn attach(&mut self, surface: S) -> Option<S> { self.surface.replace(surface) }

    #[must_use]
    pub fn surface(&self) -> Option<&S> { self.surface.as_ref() }

    /// For writing output (eg: evaluation results) in between reads.
    pub fn surface_mut(&mut self) -> Option<&mut S> { self.surface.as_mut() }

    #[must_use]
    pub fn state(&self) -> &SessionState { &self.state }

    #[must_use]
    pub fn config(&self) -> &EditorConfig { &self.config }

    #[must_use]
    pub fn is_read_pending(&self) -> bool { self.state.is_read_pending() }

    /// Write `prompt` and start waiting for a line. With no prompt, the line starts
    /// wherever the cursor is.
    ///
    /// # Errors
    ///
    /// - [ReadlineError::NotAttached] if there is no surface.
    /// - [ReadlineError::ReadAlreadyPending] if the last [ReadHandle] hasn't completed.
    /// - [ReadlineError::IO] if the surface can't be written to or queried.
    pub fn readline(&mut self, prompt: Option<&str>) -> Result<ReadHandle, ReadlineError> {
        let surface = self.surface.as_mut().ok_or(ReadlineError::NotAttached)?;
        if self.state.is_read_pending() {
            return Err(ReadlineError::ReadAlreadyPending);
        }

        let prompt = prompt.unwrap_or_default();
        if !prompt.is_empty() {
            let geometry = edit_ops::query_geometry(surface)?;
            let prompt_len = strip_ansi_escapes::strip_str(prompt).chars().count();
            surface.write_str(&redraw::prompt(&geometry, prompt, prompt_len))?;
        }
        self.state.origin = surface.cursor_position()?.into();

        let (sender, receiver) = oneshot::channel();
        self.state.pending_read = Some(PendingRead {
            prompt: prompt.to_string(),
            sender,
        });
        tracing::debug!(
            message = "readline",
            prompt = %prompt,
            origin_col = self.state.origin.col,
            origin_row = self.state.origin.row
        );

        ok!(ReadHandle { receiver })
    }

    /// Give up on the pending read, if any. Its [ReadHandle] completes with
    /// [ReadlineError::Closed]. The line being edited is kept.
    pub fn cancel_read(&mut self) -> bool {
        let cancelled = self.state.pending_read.take().is_some();
        if cancelled {
            tracing::debug!(message = "readline cancelled");
        }
        cancelled
    }

    /// Apply one event.
    ///
    /// For a [EditorEvent::NamedKey], the return value says whether the key was
    /// intercepted. If it comes back [KeyDisposition::Passthrough], the caller should
    /// deliver the key's data as an [EditorEvent::RawText]. Raw text is always
    /// consumed.
    ///
    /// # Errors
    ///
    /// - [ReadlineError::NotAttached] if there is no surface.
    /// - [ReadlineError::IO] if the surface can't be written to or queried.
    pub fn handle_event(
        &mut self,
        event: EditorEvent,
    ) -> Result<KeyDisposition, ReadlineError> {
        let surface = self.surface.as_mut().ok_or(ReadlineError::NotAttached)?;

        let command = match event {
            EditorEvent::NamedKey(key) => match classify_named_key(key, &self.config) {
                Classified::Command(command) => command,
                Classified::Passthrough => return ok!(KeyDisposition::Passthrough),
            },
            EditorEvent::RawText(text) => match classify_raw_text(&text) {
                Some(command) => command,
                None => return ok!(KeyDisposition::Suppress),
            },
        };

        tracing::trace!(message = "edit", ?command);
        edit_ops::apply(command, &mut self.state, surface)?;
        ok!(KeyDisposition::Suppress)
    }

    /// Feed one [crossterm] event through both input channels.
    ///
    /// # Errors
    ///
    /// See [LineEditor::handle_event].
    pub fn handle_crossterm_event(
        &mut self,
        event: &crossterm::event::Event,
    ) -> Result<(), ReadlineError> {
        match CrosstermInput::from_event(event) {
            Some(CrosstermInput::Key {
                named_key,
                default_data,
            }) => {
                let disposition = self.handle_event(EditorEvent::NamedKey(named_key))?;
                if let (KeyDisposition::Passthrough, Some(data)) = (disposition, default_data)
                {
                    self.handle_event(EditorEvent::RawText(data))?;
                }
            }
            Some(CrosstermInput::Paste(text)) => {
                self.handle_event(EditorEvent::RawText(text))?;
            }
            None => {}
        }
        ok!()
    }
}

/// Completes once, with the submitted line, when the user presses Enter. If the
/// [LineEditor] is dropped first, it completes with [ReadlineError::Closed].
#[derive(Debug)]
#[must_use = "the line is delivered through this handle"]
pub struct ReadHandle {
    receiver: oneshot::Receiver<String>,
}

impl Future for ReadHandle {
    type Output = Result<String, ReadlineError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.map_err(|_| ReadlineError::Closed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NamedKey, test_fixtures::TerminalSurfaceMock};
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn editor() -> LineEditor<TerminalSurfaceMock> {
        let mut editor = LineEditor::new(EditorConfig::default());
        editor.attach(TerminalSurfaceMock::new(10, 5));
        editor
    }

    fn key(editor: &mut LineEditor<TerminalSurfaceMock>, named_key: NamedKey) {
        editor.handle_event(EditorEvent::NamedKey(named_key)).unwrap();
    }

    fn type_text(editor: &mut LineEditor<TerminalSurfaceMock>, text: &str) {
        for ch in text.chars() {
            editor.handle_event(EditorEvent::RawText(ch.to_string())).unwrap();
        }
    }

    #[tokio::test]
    async fn test_readline_before_attach() {
        let mut editor = LineEditor::<TerminalSurfaceMock>::new(EditorConfig::default());
        assert!(matches!(
            editor.readline(Some("> ")),
            Err(ReadlineError::NotAttached)
        ));
        assert!(matches!(
            editor.handle_event(EditorEvent::RawText("x".into())),
            Err(ReadlineError::NotAttached)
        ));
    }

    #[tokio::test]
    async fn test_second_readline_is_rejected() {
        let mut editor = editor();
        let first = editor.readline(Some("> ")).unwrap();
        assert!(matches!(
            editor.readline(Some("> ")),
            Err(ReadlineError::ReadAlreadyPending)
        ));

        type_text(&mut editor, "ok");
        key(&mut editor, NamedKey::Enter);
        assert_eq!(first.await.unwrap(), "ok");

        // Once fulfilled, a new read is allowed.
        assert!(editor.readline(Some("> ")).is_ok());
    }

    #[tokio::test]
    async fn test_submit_resolves_with_line_and_records_history() {
        let mut editor = editor();
        let handle = editor.readline(Some("> ")).unwrap();
        type_text(&mut editor, "x");
        key(&mut editor, NamedKey::Enter);

        assert_eq!(handle.await.unwrap(), "x");
        assert_eq!(editor.state().history().entries(), &["x"]);
        assert!(!editor.is_read_pending());
    }

    #[tokio::test]
    async fn test_blank_submit_resolves_but_is_not_recorded() {
        let mut editor = editor();
        let handle = editor.readline(Some("> ")).unwrap();
        type_text(&mut editor, "   ");
        key(&mut editor, NamedKey::Enter);

        assert_eq!(handle.await.unwrap(), "   ");
        assert!(editor.state().history().is_empty());
    }

    #[tokio::test]
    async fn test_enter_without_pending_read_does_nothing() {
        let mut editor = editor();
        type_text(&mut editor, "x");
        let before = editor.surface().unwrap().get_output_as_string();
        key(&mut editor, NamedKey::Enter);

        assert_eq!(editor.surface().unwrap().get_output_as_string(), before);
        assert_eq!(editor.state().cursor(), 1);
        assert!(editor.state().history().is_empty());
    }

    #[tokio::test]
    async fn test_dropped_editor_closes_handle() {
        let mut editor = editor();
        let handle = editor.readline(None).unwrap();
        drop(editor);
        assert!(matches!(handle.await, Err(ReadlineError::Closed)));
    }

    #[tokio::test]
    async fn test_cancel_read_allows_a_new_read() {
        let mut editor = editor();
        let handle = editor.readline(Some("> ")).unwrap();
        type_text(&mut editor, "ab");

        assert!(editor.cancel_read());
        assert!(!editor.cancel_read());
        assert!(matches!(handle.await, Err(ReadlineError::Closed)));

        let handle = editor.readline(None).unwrap();
        key(&mut editor, NamedKey::Enter);
        assert_eq!(handle.await.unwrap(), "ab");
    }

    #[tokio::test]
    async fn test_failed_submit_redraw_keeps_line_and_pending_read() {
        let mut editor = editor();
        let handle = editor.readline(Some("> ")).unwrap();
        type_text(&mut editor, "hello");

        editor.surface_mut().unwrap().set_fail_writes(true);
        assert!(matches!(
            editor.handle_event(EditorEvent::NamedKey(NamedKey::Enter)),
            Err(ReadlineError::IO(_))
        ));
        assert!(editor.is_read_pending());
        assert!(editor.state().history().is_empty());
        assert_eq!(editor.state().line(), "hello");

        editor.surface_mut().unwrap().set_fail_writes(false);
        key(&mut editor, NamedKey::Enter);
        assert_eq!(handle.await.unwrap(), "hello");
        assert_eq!(editor.state().history().entries(), &["hello"]);
    }

    #[tokio::test]
    async fn test_named_key_disposition() {
        let mut editor = editor();
        let _handle = editor.readline(Some("> ")).unwrap();
        assert_eq!(
            editor
                .handle_event(EditorEvent::NamedKey(NamedKey::Character('\\')))
                .unwrap(),
            KeyDisposition::Suppress
        );
        assert_eq!(
            editor
                .handle_event(EditorEvent::NamedKey(NamedKey::Character('a')))
                .unwrap(),
            KeyDisposition::Passthrough
        );
        assert_eq!(editor.state().line(), "λ");
    }

    #[tokio::test]
    async fn test_crossterm_keys_use_both_channels() {
        let mut editor = editor();
        let handle = editor.readline(Some("> ")).unwrap();
        for code in [
            KeyCode::Char('a'),
            KeyCode::Char('\\'),
            KeyCode::Tab,
            KeyCode::Left,
            KeyCode::Backspace,
            KeyCode::Enter,
        ] {
            editor
                .handle_crossterm_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
                .unwrap();
        }
        // `a`, `λ`, `^I`, then left over the `I`, then delete the `^`.
        assert_eq!(handle.await.unwrap(), "aλI");
    }

    #[tokio::test]
    async fn test_paste_escapes_carriage_return() {
        let mut editor = editor();
        let _handle = editor.readline(Some("> ")).unwrap();
        editor
            .handle_crossterm_event(&Event::Paste("a\rb".into()))
            .unwrap();
        assert_eq!(editor.state().line(), "a^Mb");
        assert!(editor.is_read_pending());
    }

    #[tokio::test]
    async fn test_disabled_literal_substitution_types_backslash() {
        let mut editor = LineEditor::new(EditorConfig::without_literal_substitution());
        editor.attach(TerminalSurfaceMock::new(10, 5));
        let handle = editor.readline(Some("> ")).unwrap();
        for code in [KeyCode::Char('\\'), KeyCode::Enter] {
            editor
                .handle_crossterm_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
                .unwrap();
        }
        assert_eq!(handle.await.unwrap(), "\\");
    }
}
