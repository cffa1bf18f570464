//! Error taxonomy for the lookup chain.

use reqwest::StatusCode;
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "Location not found. Please enter a valid location.";
pub const RESOLVER_FAILURE_MESSAGE: &str = "An error occurred while processing your request.";
pub const FETCH_FAILURE_MESSAGE: &str = "Could not retrieve weather data. Please try again later.";

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("No location matches '{0}'")]
    NotFound(String),

    #[error("Geocoding request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Geocoding request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed geocoding response: {0}")]
    Malformed(String),
}

impl GeocodeError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// User-facing text for the chat.
    pub fn user_message(&self) -> &'static str {
        if self.is_not_found() {
            NOT_FOUND_MESSAGE
        } else {
            RESOLVER_FAILURE_MESSAGE
        }
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Forecast request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Forecast request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed forecast response: {0}")]
    Malformed(String),

    #[error("Forecast response contained no periods")]
    NoPeriods,

    #[error("Forecast period is missing `{0}`")]
    MissingField(&'static str),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILURE_MESSAGE
    }
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl LookupError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Geocode(err) => err.user_message(),
            Self::Fetch(err) => err.user_message(),
        }
    }
}

/// Shorten a response body for inclusion in an error or log line.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geocode_user_messages() {
        let err = GeocodeError::NotFound("Atlantis".into());
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), NOT_FOUND_MESSAGE);

        let err = GeocodeError::Malformed("bad lat".into());
        assert!(!err.is_not_found());
        assert_eq!(err.user_message(), RESOLVER_FAILURE_MESSAGE);

        let err = GeocodeError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        assert_eq!(err.user_message(), RESOLVER_FAILURE_MESSAGE);
    }

    #[test]
    fn lookup_error_delegates_user_message() {
        let err = LookupError::from(GeocodeError::NotFound("x".into()));
        assert_eq!(err.user_message(), NOT_FOUND_MESSAGE);

        let err = LookupError::from(FetchError::MissingField("main.temp"));
        assert_eq!(err.user_message(), FETCH_FAILURE_MESSAGE);
        assert!(err.to_string().contains("main.temp"));
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(150);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 203);
    }
}
