//! Run state definitions for restart tracking
use std::fmt;

/// Kind of recoverable fetch failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransientKind {
    /// Connection, protocol or HTTP status failure
    Network,

    /// Request exceeded the configured timeout
    Timeout,
}

impl fmt::Display for TransientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Timeout => write!(f, "timeout"),
        }
    }
}

/// State of the current traversal attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RunState {
    /// No transient failure seen so far
    #[default]
    Running,

    /// A transient failure occurred; the attempt's results are discarded
    RestartRequested {
        /// URL of the first failed fetch
        url: String,
        /// Classification of that failure
        kind: TransientKind,
    },
}

impl RunState {
    /// Returns true if the attempt must be redone
    pub fn is_restart_requested(&self) -> bool {
        matches!(self, Self::RestartRequested { .. })
    }

    /// Moves to `RestartRequested`, keeping the first reason recorded
    pub fn request_restart(&mut self, url: &str, kind: TransientKind) {
        if let Self::Running = self {
            *self = Self::RestartRequested {
                url: url.to_string(),
                kind,
            };
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::RestartRequested { url, kind } => {
                write!(f, "restart requested ({} failure at {})", kind, url)
            }
        }
    }
}
