use chrono::{format::DelayedFormat, DateTime, Local};
use concat_string::concat_string;
use crossbeam_channel::{bounded, unbounded, Sender};
use once_cell::sync::Lazy;
use std::{
    fs::{self, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

const LOG_DIR: &str = "log";

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("scrappy"));

pub struct Logger {
    writer: Option<Sender<Entry>>,
}

enum Entry {
    Line(LogMessage),
    /// Drain everything buffered so far, then acknowledge.
    Flush(Sender<()>),
}

impl Logger {
    fn new(log_name: &str) -> Self {
        let log_path = match Self::get_log_path(log_name) {
            Some(path) => path,
            None => {
                error_console(format!("Failed to create log directory '{}'.", LOG_DIR));
                return Logger { writer: None };
            }
        };
        let (tx, rx) = unbounded::<Entry>();

        // 寫入檔案的操作使用另一個線程處理
        thread::spawn(move || {
            let file = match OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
            {
                Ok(file) => file,
                Err(why) => {
                    error_console(format!(
                        "Failed to open log file {}: {}",
                        log_path.display(),
                        why
                    ));
                    return;
                }
            };

            let mut writer = BufWriter::new(file);
            let mut line = String::with_capacity(4096);

            while let Ok(entry) = rx.recv() {
                let received = match entry {
                    Entry::Line(received) => received,
                    Entry::Flush(ack) => {
                        if writer.write_all(line.as_bytes()).is_err() || writer.flush().is_err() {
                            info_console(line.clone())
                        }
                        line.clear();
                        let _ = ack.send(());
                        continue;
                    }
                };

                line.push_str(received.to_line().as_str());

                if rx.is_empty() || line.len() >= 4096 {
                    if writer.write_all(line.as_bytes()).is_err() || writer.flush().is_err() {
                        info_console(line.clone())
                    }

                    line.clear();
                }
            }
        });

        Logger { writer: Some(tx) }
    }

    fn info(&self, log: String) {
        self.send(log::Level::Info, log);
    }

    fn warn(&self, log: String) {
        self.send(log::Level::Warn, log);
    }

    fn error(&self, log: String) {
        self.send(log::Level::Error, log);
    }

    fn send(&self, level: log::Level, msg: String) {
        let Some(writer) = &self.writer else {
            return;
        };

        if let Err(why) = writer.send(Entry::Line(LogMessage::new(level, msg))) {
            error_console(why.to_string());
        }
    }

    fn flush(&self, timeout: Duration) {
        let Some(writer) = &self.writer else {
            return;
        };

        let (ack_tx, ack_rx) = bounded::<()>(1);
        if writer.send(Entry::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv_timeout(timeout);
        }
    }

    fn get_log_path(name: &str) -> Option<PathBuf> {
        let path = Path::new(LOG_DIR);

        if !path.exists() {
            fs::create_dir_all(path).ok()?;
        }

        let mut log_path = PathBuf::from(path);
        log_path.push(concat_string!(
            name,
            "_",
            Local::now().format("%Y-%m-%d").to_string(),
            ".log"
        ));

        Some(log_path)
    }
}

pub struct LogMessage {
    pub level: log::Level,
    pub msg: String,
    pub created_at: DateTime<Local>,
}

impl LogMessage {
    pub fn new(level: log::Level, msg: String) -> Self {
        LogMessage {
            level,
            msg,
            created_at: Local::now(),
        }
    }

    /// One line of the log file, e.g. `2023-04-05 16:00:00.000000 WARN ...`.
    fn to_line(&self) -> String {
        let created_at = self.created_at.format("%F %X%.6f").to_string();
        let level = self.level.to_string();

        concat_string!(created_at, " ", level, " ", self.msg, "\n")
    }
}

pub fn info_file_async(log: String) {
    LOGGER.info(log);
}

pub fn warn_file_async(log: String) {
    LOGGER.warn(log);
}

pub fn error_file_async(log: String) {
    LOGGER.error(log);
}

/// Blocks until the background writer has persisted every queued line, or
/// `timeout` elapses. Call before the process exits.
pub fn flush(timeout: Duration) {
    LOGGER.flush(timeout);
}

pub fn info_console(log: String) {
    println!(
        "{} Info {}",
        Local::now().format("%Y-%m-%d %H:%M:%S.%3f"),
        log
    );
}

/// Writes to stderr, stdout belongs to the quote table.
pub fn error_console(log: String) {
    eprintln!(
        "{} Error {}",
        DelayedFormat::to_string(&Local::now().format("%Y-%m-%d %H:%M:%S.%3f")),
        log
    );
}
