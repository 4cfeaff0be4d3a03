//! Browser console sink for `tracing` output.

use std::io;
use tracing_subscriber::fmt::MakeWriter;

/// Forwards each formatted record to `console.log`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ConsoleWriter;

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let line = String::from_utf8_lossy(buf);
        let line = line.trim_end();
        if !line.is_empty() {
            gloo::console::log!(line.to_string());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        *self
    }
}
