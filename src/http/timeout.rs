use std::time::Duration;

/// Connect and read timeouts for a [`RequestClient`](super::RequestClient).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    /// Same limit for the connect phase and for each read
    Both(Duration),
    Split { connect: Duration, read: Duration },
}

impl Timeout {
    pub fn connect(&self) -> Duration {
        match self {
            Timeout::Both(d) => *d,
            Timeout::Split { connect, .. } => *connect,
        }
    }

    pub fn read(&self) -> Duration {
        match self {
            Timeout::Both(d) => *d,
            Timeout::Split { read, .. } => *read,
        }
    }
}

impl From<Duration> for Timeout {
    fn from(d: Duration) -> Self {
        Timeout::Both(d)
    }
}

impl From<(Duration, Duration)> for Timeout {
    fn from((connect, read): (Duration, Duration)) -> Self {
        Timeout::Split { connect, read }
    }
}
