use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;

// The terminal is owned by the UI, so logs go to a file next to the binary.
const LOG_FILE: &str = "webhook-composer.log";

pub trait Logger {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

pub fn get_logger() -> Box<dyn Logger> {
    let file = OpenOptions::new().create(true).append(true).open(LOG_FILE);

    match file {
        Ok(file) => Box::new(FileLogger { file }),
        Err(_) => Box::new(NullLogger),
    }
}

struct FileLogger {
    file: File,
}

impl FileLogger {
    fn write(&self, level: &str, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

        // Logging is best-effort; a full disk should not take the app down.
        let mut file = &self.file;
        _ = writeln!(file, "{timestamp} [{level}] {message}");
    }
}

impl Logger for FileLogger {
    fn info(&self, message: &str) {
        self.write("INFO", message);
    }

    fn warning(&self, message: &str) {
        self.write("WARN", message);
    }

    fn error(&self, message: &str) {
        self.write("ERROR", message);
    }
}

/// Used when the log file cannot be opened, and by tests.
pub struct NullLogger;

impl Logger for NullLogger {
    fn info(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
