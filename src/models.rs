use serde::Serialize;
use std::ffi::{OsStr, OsString};
use std::fmt;

/// Group a file is assigned to by the cluster or predict actions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Label {
    /// Unlabeled k-means group
    Cluster(usize),
    /// Category predicted by the classifier
    Category(String),
}

impl Label {
    /// Name of the destination folder for this label
    pub fn folder_name(&self, cluster_prefix: &str) -> String {
        match self {
            Label::Cluster(id) => format!("{}{}", cluster_prefix, id),
            Label::Category(name) => name.clone(),
        }
    }
}

/// One file and the label it was given
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// Display form of the name; invalid UTF-8 is replaced
    pub file_name: String,
    pub label: Label,
    #[serde(skip)]
    os_name: OsString,
}

impl Assignment {
    pub fn new<S: AsRef<OsStr>>(file_name: S, label: Label) -> Self {
        let os_name = file_name.as_ref().to_os_string();
        Self {
            file_name: os_name.to_string_lossy().into_owned(),
            label,
            os_name,
        }
    }

    /// The file name exactly as it appears on disk
    pub fn os_name(&self) -> &OsStr {
        &self.os_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLine {
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            LogLevel::Info => "•",
            LogLevel::Error => "✗",
        };
        write!(f, "{} {}", marker, self.message)
    }
}

/// Ordered record of what an action did. Every line is also emitted as a tracing event.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivityLog {
    lines: Vec<LogLine>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a progress line. The caller prints these, so tracing only sees them at debug.
    pub fn info<S: Into<String>>(&mut self, message: S) {
        let message = message.into();
        tracing::debug!("{}", message);
        self.push(LogLevel::Info, message);
    }

    pub fn error<S: Into<String>>(&mut self, message: S) {
        let message = message.into();
        tracing::error!("{}", message);
        self.push(LogLevel::Error, message);
    }

    fn push(&mut self, level: LogLevel, message: String) {
        self.lines.push(LogLine { level, message });
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
