use std::io::{self, Write};

/// Destination for rendered output, one line at a time.
pub trait Sink {
    /// # Errors
    /// Returns the underlying I/O error when the line cannot be written.
    fn accept(&mut self, line: &str) -> io::Result<()>;

    /// # Errors
    /// Returns the underlying I/O error when buffered output cannot be flushed.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes each line, newline-terminated, to any [`Write`]r (a terminal, a file, a buffer).
#[derive(Debug)]
pub struct StreamSink<W: Write> {
    writer: W,
}

impl<W: Write> StreamSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for StreamSink<W> {
    fn accept(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Sink for Vec<String> {
    fn accept(&mut self, line: &str) -> io::Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// Push every line into `sink`, then flush it.
///
/// # Errors
/// Returns the first I/O error reported by the sink.
pub fn write_lines<S, I, L>(sink: &mut S, lines: I) -> io::Result<()>
where
    S: Sink + ?Sized,
    I: IntoIterator<Item = L>,
    L: AsRef<str>,
{
    for line in lines {
        sink.accept(line.as_ref())?;
    }
    sink.finish()
}
