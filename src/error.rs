use thiserror::Error;

use crate::PageIndex;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] reqwest::Error),
    #[error("The selector you are trying to scrape for is missing. Selector: {0}")]
    ParseMissingSelector(String),

    /// One of the pages an aggregate needed could not be fetched.
    #[error("Failed to fetch page {page}: {source}")]
    UpstreamFetchFailed {
        page: PageIndex,
        #[source]
        source: Box<Error>,
    },
    /// A page was missing from the cache right after it was filled.
    #[error("Page {0} could not be read back from the cache")]
    InternalInconsistency(PageIndex),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Couldn't install the log subscriber: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

impl Error {
    /// True when the caller is at fault, false for upstream and internal failures.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn only_invalid_argument_is_a_client_error() {
        assert!(Error::InvalidArgument("0".into()).is_client_error());
        assert!(!Error::InternalInconsistency(3).is_client_error());
        assert!(!Error::UpstreamFetchFailed {
            page: 2,
            source: Box::new(Error::InvalidArgument("nested".into())),
        }
        .is_client_error());
    }

    #[test]
    fn fetch_failure_exposes_its_cause() {
        let err = Error::UpstreamFetchFailed {
            page: 3,
            source: Box::new(Error::ParseMissingSelector(".athing".into())),
        };
        assert!(err.to_string().starts_with("Failed to fetch page 3"));
        let source = err.source().map(ToString::to_string).unwrap_or_default();
        assert!(source.contains(".athing"));
    }
}
