// logging.rs - Run log built on env_logger

use crate::error::{AsdistError, Result};
use crate::output::ensure_parent_dir;
use env_logger::{Builder, Env, Target};
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;
use log::{Level, LevelFilter};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Environment variable overriding the log filter, e.g. `ASDIST_LOG=debug`
pub const LOG_ENV: &str = "ASDIST_LOG";

/// Echoes every log line to stdout and appends it to an optional file
#[derive(Debug)]
pub struct LogSink {
    file: Option<File>,
}

impl LogSink {
    pub fn open(log_path: Option<&Path>) -> Result<Self> {
        let file = match log_path {
            Some(path) => {
                ensure_parent_dir(path)?;
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| AsdistError::io(path, e))?;
                Some(file)
            }
            None => None,
        };
        Ok(Self { file })
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

/// Lines look like `log 2024-05-01 12:00:00.123456: message`
pub fn format_line(level: Level, message: &std::fmt::Arguments) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f");
    match level {
        Level::Info => format!("log {}: {}", timestamp, message),
        _ => format!("log {}: [{}] {}", timestamp, level, message),
    }
}

pub struct RunLogger;

impl RunLogger {
    /// env_logger builder writing `log <ts>: <msg>` lines into `sink`
    pub fn builder(level: LevelFilter, sink: LogSink) -> Builder {
        let mut builder = Builder::new();
        builder
            .filter_level(level)
            .format(|buf, record| writeln!(buf, "{}", format_line(record.level(), record.args())))
            .target(Target::Pipe(Box::new(sink)))
            .parse_env(Env::default().filter(LOG_ENV));
        builder
    }

    /// Install the logger globally; `log_path` is opened in append mode.
    ///
    /// Progress bars added to the returned `MultiProgress` are suspended while
    /// a line is written.
    pub fn init(log_path: Option<&Path>, level: LevelFilter) -> Result<MultiProgress> {
        let sink = LogSink::open(log_path)?;
        let logger = Self::builder(level, sink).build();
        let max_level = logger.filter();

        let multi_pg = MultiProgress::new();
        LogWrapper::new(multi_pg.clone(), logger)
            .try_init()
            .map_err(|e| {
                AsdistError::io(
                    log_path.unwrap_or(Path::new("<stdout>")),
                    io::Error::new(io::ErrorKind::Other, e.to_string()),
                )
            })?;
        log::set_max_level(max_level);
        Ok(multi_pg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Log, Record};

    #[test]
    fn test_line_format() {
        let line = format_line(Level::Info, &format_args!("file exist, exit."));
        assert!(line.starts_with("log "));
        assert!(line.ends_with(": file exist, exit."));

        let line = format_line(Level::Warn, &format_args!("careful"));
        assert!(line.ends_with(": [WARN] careful"));
    }

    #[test]
    fn test_lines_are_appended_to_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Log").join("10_0.log");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "log earlier run\n").unwrap();

        let logger = RunLogger::builder(LevelFilter::Info, LogSink::open(Some(&path)).unwrap())
            .build();
        logger.log(
            &Record::builder()
                .args(format_args!("file exist, exit."))
                .level(Level::Info)
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("hidden"))
                .level(Level::Debug)
                .build(),
        );
        logger.flush();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "log earlier run");
        assert!(lines[1].starts_with("log "));
        assert!(lines[1].ends_with(": file exist, exit."));
    }

    #[test]
    fn test_sink_creates_the_log_folder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Log").join("5_1.log");
        let mut sink = LogSink::open(Some(&path)).unwrap();
        sink.write_all(b"log line\n").unwrap();
        sink.flush().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "log line\n");
    }
}
