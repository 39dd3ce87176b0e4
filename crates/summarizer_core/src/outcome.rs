use std::fmt;

/// Title and summary returned by the service, with their quality scores in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultData {
    pub title: String,
    pub summary: String,
    pub title_score: f64,
    pub summary_score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// The service could not be reached.
    Network,
    /// The connection failed after the request was under way.
    ConnectionLost,
    Timeout,
    ServerError { code: u16, message: String },
    MalformedResponse,
    Cancelled,
    Other(String),
}

pub type RequestOutcome = Result<ResultData, FailureCause>;

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Network => write!(f, "cannot connect"),
            FailureCause::ConnectionLost => write!(f, "connection lost"),
            FailureCause::Timeout => write!(f, "timeout"),
            FailureCause::ServerError { code, message } => {
                write!(f, "server error {code}: {message}")
            }
            FailureCause::MalformedResponse => write!(f, "malformed response"),
            FailureCause::Cancelled => write!(f, "cancelled"),
            FailureCause::Other(message) => write!(f, "unexpected failure: {message}"),
        }
    }
}
