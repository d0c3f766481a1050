//! On-screen message log and the `log` backend feeding it.

use std::sync::mpsc::Sender;

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

use crate::model::Msg;

/// A single log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub level: Level,
    pub dups: u32,
}

/// Keeps only this many entries.
const MAX_ENTRIES: usize = 500;

/// The visualizer's message log.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Vec<LogEntry>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Append a message. A repeat of the previous message only bumps its
    /// counter.
    pub fn push(&mut self, level: Level, text: &str) {
        let text = uppercase_first(text.trim());
        if let Some(last) = self.entries.last_mut() {
            if last.text == text && last.level == level {
                last.dups += 1;
                return;
            }
        }
        self.entries.push(LogEntry {
            text,
            level,
            dups: 0,
        });
        if self.entries.len() > MAX_ENTRIES {
            self.entries.drain(0..MAX_ENTRIES / 10);
        }
    }

    /// The newest entries that fit in `max_lines` lines of `width`
    /// characters, oldest first. Long entries are cut, not wrapped.
    pub fn recent_lines(&self, width: usize, max_lines: usize) -> Vec<(Level, String)> {
        let mut lines: Vec<(Level, String)> = self
            .entries
            .iter()
            .rev()
            .take(max_lines)
            .map(|e| {
                let mut s = e.text.clone();
                if e.dups > 0 {
                    s.push_str(&format!(" ({}×)", e.dups + 1));
                }
                (e.level, s.chars().take(width).collect())
            })
            .collect();
        lines.reverse();
        lines
    }
}

fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().to_string() + chars.as_str(),
    }
}

/// Where log records end up.
pub enum Sink {
    /// Plain lines on stderr, for headless runs.
    Stderr,
    /// [`Msg::Log`] messages for the interactive model.
    Channel(Sender<Msg>),
}

/// A [`log::Log`] implementation writing to a [`Sink`].
pub struct Logger {
    level: LevelFilter,
    sink: Sink,
}

impl Logger {
    pub fn new(level: LevelFilter, sink: Sink) -> Self {
        Self { level, sink }
    }

    /// Install as the global logger.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match &self.sink {
            Sink::Stderr => {
                eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
            }
            Sink::Channel(tx) => {
                // Dropped once the application loop has exited.
                let _ = tx.send(Msg::Log(record.level(), record.args().to_string()));
            }
        }
    }

    fn flush(&self) {}
}
