// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CrosstermEventResult, PinnedInputStream};
use async_stream::stream;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

/// Stand-in for [crossterm::event::EventStream]. The stream ends after the last item,
/// which is what a closed terminal looks like to the driver.
pub fn gen_input_stream<T>(generator_vec: Vec<T>) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            yield item;
        }
    };
    Box::pin(it)
}

pub fn gen_input_stream_with_delay<T>(
    generator_vec: Vec<T>,
    delay: Duration,
) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            tokio::time::sleep(delay).await;
            yield item;
        }
    };
    Box::pin(it)
}

/// A key press event with no modifiers.
#[must_use]
pub fn key_press(code: KeyCode) -> CrosstermEventResult {
    Ok(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

/// One key press per character of `text`.
#[must_use]
pub fn key_presses_for(text: &str) -> Vec<CrosstermEventResult> {
    text.chars().map(|ch| key_press(KeyCode::Char(ch))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_gen_input_stream() {
        let mut input_stream = gen_input_stream(vec![1, 2, 3]);
        for expected in 1..=3 {
            assert_eq!(input_stream.next().await, Some(expected));
        }
        assert_eq!(input_stream.next().await, None);
    }

    #[tokio::test]
    async fn test_gen_input_stream_with_delay() {
        const DELAY: u64 = 20;

        let start_time = std::time::Instant::now();
        let mut input_stream =
            gen_input_stream_with_delay(vec![1, 2, 3], Duration::from_millis(DELAY));
        for _ in 1..=3 {
            input_stream.next().await;
        }
        let elapsed = start_time.elapsed();

        assert_eq!(input_stream.next().await, None);
        assert!(elapsed >= Duration::from_millis(DELAY * 3));
    }

    #[test]
    fn test_key_presses_for() {
        let events = key_presses_for("ab");
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[1],
            Ok(Event::Key(KeyEvent {
                code: KeyCode::Char('b'),
                ..
            }))
        ));
    }
}
