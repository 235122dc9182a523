//! Output plumbing for web sessions.

use std::io::{self, Write};

use tokio::sync::mpsc;

/// A `Write` target for one session's terminal frames.
///
/// Bytes are buffered until `flush`, then handed to the connection task
/// as a complete frame; the renderer stays synchronous while the socket
/// side is async.
pub struct SessionWriter {
    tx: mpsc::UnboundedSender<Vec<u8>>,
    buffer: Vec<u8>,
}

impl SessionWriter {
    pub fn new(tx: mpsc::UnboundedSender<Vec<u8>>) -> Self {
        Self {
            tx,
            buffer: Vec::with_capacity(8192),
        }
    }
}

impl Write for SessionWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            // A closed connection just drops the frame; the session
            // loop exits via its input channel.
            let _ = self.tx.send(std::mem::take(&mut self.buffer));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_are_sent_on_flush() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut writer = SessionWriter::new(tx);

        writer.write_all(b"\x1b[2J").expect("write");
        writer.write_all(b"hello").expect("write");
        assert!(rx.try_recv().is_err());

        writer.flush().expect("flush");
        assert_eq!(rx.try_recv().unwrap(), b"\x1b[2Jhello".to_vec());

        // Nothing buffered, nothing sent.
        writer.flush().expect("flush");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_channel_does_not_error() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut writer = SessionWriter::new(tx);
        writer.write_all(b"frame").expect("write");
        writer.flush().expect("flush ignores closed channel");
    }
}
