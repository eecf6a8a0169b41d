//! Progress reporting.
//!
//! The merge reports integer percentages (0 to 100) to a [`ProgressSink`].
//! Channel senders implement the trait so a caller can receive updates on
//! its own task while the merge runs on the blocking pool. [`ProgressBar`]
//! renders those percentages on a terminal.
//!
//! # Examples
//!
//! ```
//! use pdfmerger::output::progress::{ProgressBar, ProgressStyle};
//!
//! let mut progress = ProgressBar::new(ProgressStyle::Bar);
//! progress.set_message("Merging");
//!
//! for percent in [25, 50, 75, 100] {
//!     progress.update(percent);
//! }
//!
//! progress.finish();
//! ```

use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};

/// Receives merge progress as a percentage.
pub trait ProgressSink: Send + Sync {
    /// Called with a value in `0..=100`. Values never decrease within one
    /// merge.
    fn report(&self, percent: u8);
}

impl ProgressSink for mpsc::UnboundedSender<u8> {
    fn report(&self, percent: u8) {
        // A dropped receiver only means nobody is watching.
        let _ = self.send(percent);
    }
}

impl ProgressSink for mpsc::Sender<u8> {
    fn report(&self, percent: u8) {
        // Updates are skipped while the channel is full.
        let _ = self.try_send(percent);
    }
}

impl ProgressSink for watch::Sender<u8> {
    fn report(&self, percent: u8) {
        self.send_replace(percent);
    }
}

impl<T: ProgressSink + ?Sized> ProgressSink for Arc<T> {
    fn report(&self, percent: u8) {
        (**self).report(percent);
    }
}

/// `done * 100 / total`, rounded down. An empty job counts as complete.
pub fn percent_of(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (done.min(total) * 100 / total) as u8
}

/// Style of progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStyle {
    /// Classic progress bar: [=====>    ]
    Bar,
    /// Percentage only: 42%
    Counter,
}

/// Terminal progress bar driven by percentages.
pub struct ProgressBar {
    /// Current percentage.
    current: u8,
    /// Progress bar style.
    style: ProgressStyle,
    /// Optional message to display.
    message: Option<String>,
    /// Start time of the operation.
    start_time: Instant,
    /// Last update time (for rate limiting).
    last_update: Instant,
    /// Minimum time between updates.
    update_interval: Duration,
    /// Whether the progress bar is enabled.
    enabled: bool,
}

impl ProgressBar {
    /// Create a new progress bar; it is disabled when stdout is not a
    /// terminal.
    pub fn new(style: ProgressStyle) -> Self {
        Self {
            current: 0,
            style,
            message: None,
            start_time: Instant::now(),
            last_update: Instant::now(),
            update_interval: Duration::from_millis(100),
            enabled: Self::is_terminal(),
        }
    }

    /// Create a disabled progress bar (no output).
    pub fn disabled() -> Self {
        let mut pb = Self::new(ProgressStyle::Counter);
        pb.enabled = false;
        pb
    }

    fn is_terminal() -> bool {
        use std::io::IsTerminal;
        io::stdout().is_terminal()
    }

    /// Set the message to display with the progress bar.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Move the bar to `percent` (clamped to 100).
    pub fn update(&mut self, percent: u8) {
        self.current = percent.min(100);

        // Rate limit updates
        if self.last_update.elapsed() < self.update_interval && self.current < 100 {
            return;
        }

        self.last_update = Instant::now();
        self.render();
    }

    /// Mark the progress bar as finished.
    pub fn finish(&mut self) {
        self.current = 100;
        if self.enabled {
            self.render();
            println!();
        }
    }

    /// Clear the progress bar from the terminal.
    pub fn clear(&self) {
        if self.enabled {
            print!("\r\x1b[K");
            io::stdout().flush().ok();
        }
    }

    fn render(&mut self) {
        if !self.enabled {
            return;
        }

        let output = match self.style {
            ProgressStyle::Bar => self.render_bar(),
            ProgressStyle::Counter => self.render_counter(),
        };

        print!("\r{output}");
        io::stdout().flush().ok();
    }

    fn render_bar(&self) -> String {
        let width = 40;
        let filled = width * self.current as usize / 100;
        let empty = width - filled;

        let bar = format!(
            "[{}{}]",
            "=".repeat(filled.saturating_sub(1)) + if filled > 0 { ">" } else { "" },
            " ".repeat(empty)
        );

        let elapsed = format_duration(self.start_time.elapsed());
        let mut parts = vec![bar, format!("{}%", self.current), elapsed];

        if let Some(ref msg) = self.message {
            parts.insert(0, msg.clone());
        }

        parts.join(" ")
    }

    fn render_counter(&self) -> String {
        let mut parts = vec![
            format!("{}%", self.current),
            format_duration(self.start_time.elapsed()),
        ];

        if let Some(ref msg) = self.message {
            parts.insert(0, msg.clone());
        }

        parts.join(" ")
    }

    /// Current percentage.
    pub fn percent(&self) -> u8 {
        self.current
    }
}

/// Format a duration as a human-readable string.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
