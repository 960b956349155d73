use thiserror::Error;

/// Why a single upstream request produced nothing usable.
///
/// Each variant abandons only the unit of work that issued the request
/// (the deck list, one deck, one card); callers log it and move on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl FetchError {
    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = FetchError::Status {
            url: "https://www.17lands.com/data/deck?draft_id=x".to_string(),
            status: 429,
        };
        assert_eq!(err.status(), Some(429));
        assert_eq!(
            err.to_string(),
            "HTTP 429 from https://www.17lands.com/data/deck?draft_id=x"
        );
    }

    #[test]
    fn test_decode_has_no_status() {
        let err: FetchError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.status(), None);
        assert!(err.to_string().starts_with("invalid JSON"));
    }
}
