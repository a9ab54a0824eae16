use std::io::{self, Write};

/// Rendering settings for [`ProgressReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStyle {
    /// Number of cells in the bar
    pub bar_width: usize,
    /// Decimal places of the percentage
    pub decimals: usize,
    pub fill: char,
    pub empty: char,
    /// Used to blank out the tail of a longer previous status line
    pub padding: char,
    /// Lines are cut to this many characters, leading `\r` included
    pub max_line_width: usize,
    /// Written after every rendered line
    pub line_end: String,
}

impl Default for ProgressStyle {
    fn default() -> Self {
        Self {
            bar_width: 10,
            decimals: 1,
            fill: '█',
            empty: '-',
            padding: ' ',
            max_line_width: 140,
            line_end: String::new(),
        }
    }
}

/// Single-line progress bar that overwrites itself in place
pub struct ProgressReporter<W: Write> {
    out: W,
    style: ProgressStyle,
}

impl ProgressReporter<io::Sink> {
    /// Reporter that renders nothing
    pub fn hidden() -> Self {
        Self::new(io::sink(), ProgressStyle::default())
    }
}

impl<W: Write> ProgressReporter<W> {
    pub fn new(out: W, style: ProgressStyle) -> Self {
        Self { out, style }
    }

    pub fn style(&self) -> &ProgressStyle {
        &self.style
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Build the bar line for `current` of `total`, without any line ending.
    ///
    /// Returns `None` when `total` is zero.
    pub fn render(&self, current: usize, total: usize, prefix: &str, suffix: &str) -> Option<String> {
        if total == 0 {
            return None;
        }

        let ratio = current as f64 / total as f64;
        let percent = format!("{:.*}", self.style.decimals, 100.0 * ratio);

        let filled = (self.style.bar_width * current / total).min(self.style.bar_width);
        let mut bar = String::with_capacity(self.style.bar_width * 3);
        bar.extend(std::iter::repeat_n(self.style.fill, filled));
        bar.extend(std::iter::repeat_n(self.style.empty, self.style.bar_width - filled));

        let line = format!("\r{prefix} |{bar}| {percent}% {suffix}");
        Some(line.chars().take(self.style.max_line_width).collect())
    }

    /// Draw the bar. A newline follows once `current` reaches `total`.
    pub fn report(&mut self, current: usize, total: usize, prefix: &str, suffix: &str) -> io::Result<()> {
        let Some(line) = self.render(current, total, prefix, suffix) else {
            tracing::debug!("Skipping progress report with zero total");
            return Ok(());
        };

        self.out.write_all(line.as_bytes())?;
        self.out.write_all(self.style.line_end.as_bytes())?;
        if current == total {
            self.out.write_all(b"\n")?;
        }
        self.out.flush()
    }

    /// Print a full line of text outside the bar
    pub fn message(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    /// Pad `status` so it covers a previous status of `previous_len` characters
    pub fn pad_status(&self, status: &str, previous_len: usize) -> String {
        let len = status.chars().count();
        let mut padded = status.to_string();
        if previous_len > len {
            padded.extend(std::iter::repeat_n(self.style.padding, previous_len - len));
        }
        padded
    }
}
