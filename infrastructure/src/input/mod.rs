//! Key events from a line-oriented stream.
//!
//! Each line is `"<index> <state>"`, for example `3 down` or `11 0`.
//! Blank lines and lines starting with `#` are ignored. Malformed lines
//! are logged and skipped so a typo never stops the device.

use keybow_domain::KeyEvent;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::warn;

pub struct LineKeySource<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: AsyncBufRead + Unpin> LineKeySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Next well-formed event, or `None` at end of input.
    ///
    /// Cancel safe: no event is lost if the future is dropped.
    pub async fn next_event(&mut self) -> std::io::Result<Option<KeyEvent>> {
        while let Some(line) = self.lines.next_line().await? {
            self.line_no += 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.parse::<KeyEvent>() {
                Ok(event) => return Ok(Some(event)),
                Err(e) => warn!(line = self.line_no, "Skipping key input: {}", e),
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keybow_domain::KeyIndex;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn test_reads_events_and_skips_noise() {
        let input = b"# demo\n0 down\n\nbogus\n11 0\n3 press extra\n2 release\n";
        let mut source = LineKeySource::new(BufReader::new(&input[..]));

        let mut events = Vec::new();
        while let Some(event) = source.next_event().await.unwrap() {
            events.push(event);
        }

        assert_eq!(
            events,
            vec![
                KeyEvent {
                    index: KeyIndex(0),
                    pressed: true
                },
                KeyEvent {
                    index: KeyIndex(11),
                    pressed: false
                },
                KeyEvent {
                    index: KeyIndex(2),
                    pressed: false
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_input_ends_immediately() {
        let mut source = LineKeySource::new(BufReader::new(&b""[..]));
        assert!(source.next_event().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_last_line_without_newline() {
        let mut source = LineKeySource::new(BufReader::new(&b"7 1"[..]));
        let event = source.next_event().await.unwrap().unwrap();
        assert_eq!(event.index, KeyIndex(7));
        assert!(event.pressed);
    }
}
