use std::io::{self, Write};

use camport_application::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};

pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Renders `[####------]  40.0% (4/10)` on one line, rewriting it in place.
///
/// Write errors are ignored: progress output never fails an import.
#[derive(Debug)]
pub struct TextProgressReporter<W: Write> {
    writer: W,
    width: usize,
}

impl<W: Write> TextProgressReporter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_width(writer, DEFAULT_BAR_WIDTH)
    }

    pub fn with_width(writer: W, width: usize) -> Self {
        Self {
            writer,
            width: width.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ProgressReporter for TextProgressReporter<W> {
    fn report(&mut self, current: usize, total: usize) {
        let line = render_bar(current, total, self.width);
        let _ = write!(self.writer, "\r{line}");
        if current >= total {
            let _ = writeln!(self.writer);
        }
        let _ = self.writer.flush();
    }
}

/// An empty run (`total == 0`) renders as complete.
pub fn render_bar(current: usize, total: usize, width: usize) -> String {
    let fraction = if total == 0 {
        1.0
    } else {
        current.min(total) as f64 / total as f64
    };
    let filled = ((fraction * width as f64) as usize).min(width);
    format!(
        "[{}{}] {:5.1}% ({current}/{total})",
        "#".repeat(filled),
        "-".repeat(width - filled),
        fraction * 100.0
    )
}

/// Terminal progress bar on stderr.
///
/// The bar exists from construction so that log output can be routed around
/// it through [`IndicatifProgressReporter::log_sink`] before the first report.
pub struct IndicatifProgressReporter {
    bar: ProgressBar,
}

impl IndicatifProgressReporter {
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(0))
    }

    pub fn with_bar(bar: ProgressBar) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({percent}%)")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Self { bar }
    }

    pub fn log_sink(&self) -> LogSink {
        LogSink {
            bar: Some(self.bar.clone()),
        }
    }
}

impl Default for IndicatifProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for IndicatifProgressReporter {
    fn report(&mut self, current: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current as u64);
        if current >= total {
            self.bar.finish();
        }
    }
}

/// Hands out log writers that clear the progress bar while a line is written
/// and redraw it afterwards. Without a bar the writers pass straight through.
#[derive(Clone, Default)]
pub struct LogSink {
    bar: Option<ProgressBar>,
}

impl LogSink {
    pub fn writer<W: Write>(&self, inner: W) -> SuspendingWriter<W> {
        SuspendingWriter {
            bar: self.bar.clone(),
            inner,
        }
    }
}

pub struct SuspendingWriter<W: Write> {
    bar: Option<ProgressBar>,
    inner: W,
}

impl<W: Write> SuspendingWriter<W> {
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for SuspendingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Whole buffers only, so a log line is never split around a redraw.
        let inner = &mut self.inner;
        match &self.bar {
            Some(bar) => bar.suspend(|| inner.write_all(buf))?,
            None => inner.write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
