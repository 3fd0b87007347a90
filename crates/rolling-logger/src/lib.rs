//! Rolling Logger
//!
//! Process-wide logger for the material tracker:
//! - file sink under the log directory, rotated by size (`app.log`, `app.1.log`, ...)
//! - stderr sink
//! - circular buffer of the most recent lines, for a diagnostics view
//!
//! Records emitted through the `log` facade are bridged into `tracing`,
//! so library crates only ever depend on `log`.

use std::collections::VecDeque;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 3;
pub const DEFAULT_BUFFER_LINES: usize = 500;

/// Rotation and buffering limits
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    /// Size at which the active file is rotated
    pub max_file_bytes: u64,
    /// Number of rotated files kept next to the active one
    pub max_files: usize,
    /// Capacity of the in-memory ring buffer
    pub buffer_lines: usize,
    pub level: LevelFilter,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_files: DEFAULT_MAX_FILES,
            buffer_lines: DEFAULT_BUFFER_LINES,
            level: LevelFilter::INFO,
        }
    }
}

struct RollingState {
    dir: PathBuf,
    app_name: String,
    file: File,
    written: u64,
    options: LoggerOptions,
    recent: VecDeque<String>,
    partial: String,
}

impl RollingState {
    fn open(dir: &Path, app_name: &str, options: LoggerOptions) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path(dir, app_name, 0))?;
        let written = file.metadata()?.len();

        Ok(Self {
            dir: dir.to_path_buf(),
            app_name: app_name.to_string(),
            file,
            written,
            recent: VecDeque::with_capacity(options.buffer_lines),
            options,
            partial: String::new(),
        })
    }

    fn path(&self, index: usize) -> PathBuf {
        log_path(&self.dir, &self.app_name, index)
    }

    /// Shift `app.N.log` up by one, dropping the oldest, then start a fresh active file.
    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let max_files = self.options.max_files;
        if max_files > 0 {
            let oldest = self.path(max_files);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for index in (1..max_files).rev() {
                let from = self.path(index);
                if from.exists() {
                    fs::rename(&from, self.path(index + 1))?;
                }
            }
            fs::rename(self.path(0), self.path(1))?;
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.path(0))?;
        self.written = 0;
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let incoming = buf.len() as u64;
        if self.written > 0 && self.written + incoming > self.options.max_file_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += incoming;
        self.remember(buf);
        Ok(buf.len())
    }

    fn remember(&mut self, buf: &[u8]) {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            if self.options.buffer_lines == 0 {
                continue;
            }
            if self.recent.len() >= self.options.buffer_lines {
                self.recent.pop_front();
            }
            self.recent.push_back(line.trim_end().to_string());
        }
    }
}

fn log_path(dir: &Path, app_name: &str, index: usize) -> PathBuf {
    if index == 0 {
        dir.join(format!("{}.log", app_name))
    } else {
        dir.join(format!("{}.{}.log", app_name, index))
    }
}

/// Cloneable handle to the rolling file; handed to the fmt layer as its writer.
#[derive(Clone)]
pub struct RollingWriter {
    state: Arc<Mutex<RollingState>>,
}

impl RollingWriter {
    pub fn new(dir: impl AsRef<Path>, app_name: &str, options: LoggerOptions) -> io::Result<Self> {
        let state = RollingState::open(dir.as_ref(), app_name, options)?;
        Ok(Self {
            state: Arc::new(Mutex::new(state)),
        })
    }

    /// Most recent complete lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        self.lock().recent.iter().cloned().collect()
    }

    /// Path of the file currently being written
    pub fn active_path(&self) -> PathBuf {
        self.lock().path(0)
    }

    fn lock(&self) -> MutexGuard<'_, RollingState> {
        // A panic while holding the lock only leaves a partial line behind.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Local wall-clock timestamps with millisecond precision
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

struct Installed {
    app_name: String,
    writer: RollingWriter,
}

static LOGGER: OnceLock<Installed> = OnceLock::new();

/// Initialize the global logger with default limits
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), String> {
    init_logger_with(log_dir, app_name, LoggerOptions::default())
}

/// Initialize the global logger. Fails if a logger is already installed.
pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    options: LoggerOptions,
) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Err("Logger already initialized".to_string());
    }

    let level = options.level;
    let writer = RollingWriter::new(log_dir, app_name, options)
        .map_err(|e| format!("Failed to open log file: {}", e))?;

    tracing_subscriber::registry()
        .with(level)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_timer(LocalTime)
                .with_writer(writer.clone()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTime)
                .with_writer(io::stderr),
        )
        .try_init()
        .map_err(|e| format!("Failed to install subscriber: {}", e))?;

    LOGGER
        .set(Installed {
            app_name: app_name.to_string(),
            writer,
        })
        .map_err(|_| "Logger already initialized".to_string())
}

fn emit(level: log::Level, msg: &str) -> Result<(), String> {
    let installed = LOGGER.get().ok_or("Logger not initialized")?;
    log::log!(target: installed.app_name.as_str(), level, "{}", msg);
    Ok(())
}

pub fn info(msg: &str) -> Result<(), String> {
    emit(log::Level::Info, msg)
}

pub fn warn(msg: &str) -> Result<(), String> {
    emit(log::Level::Warn, msg)
}

pub fn error(msg: &str) -> Result<(), String> {
    emit(log::Level::Error, msg)
}

/// Recent lines from the global logger (empty before initialization)
pub fn recent_logs() -> Vec<String> {
    LOGGER
        .get()
        .map(|installed| installed.writer.recent_lines())
        .unwrap_or_default()
}
