use axum::http::HeaderMap;

pub const SESSION_HEADER: &str = "x-session-id";
pub const ANONYMOUS_SESSION: &str = "anonymous";

const MAX_SESSION_ID_LEN: usize = 128;

#[derive(Debug)]
pub enum ValidationError {
    InvalidHeader {
        header: &'static str,
        reason: &'static str,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidHeader { header, reason } => {
                write!(f, "Invalid header '{}': {}", header, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidHeader { header, .. } => header,
        }
    }
}

/// Session the view is recorded under. A missing header counts as the
/// shared anonymous session.
pub fn session_id(headers: &HeaderMap) -> Result<String, ValidationError> {
    let Some(raw) = headers.get(SESSION_HEADER) else {
        return Ok(ANONYMOUS_SESSION.to_string());
    };

    let value = raw.to_str().map_err(|_| ValidationError::InvalidHeader {
        header: SESSION_HEADER,
        reason: "session id must be visible ASCII",
    })?;
    let value = value.trim();

    if value.is_empty() {
        return Ok(ANONYMOUS_SESSION.to_string());
    }

    if value.len() > MAX_SESSION_ID_LEN {
        return Err(ValidationError::InvalidHeader {
            header: SESSION_HEADER,
            reason: "session id must be at most 128 characters",
        });
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidHeader {
            header: SESSION_HEADER,
            reason: "session id must contain only alphanumeric characters, hyphens, or underscores",
        });
    }

    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_or_blank_is_anonymous() {
        assert_eq!(session_id(&HeaderMap::new()).unwrap(), "anonymous");
        assert_eq!(session_id(&headers("  ")).unwrap(), "anonymous");
    }

    #[test]
    fn test_valid_session_id() {
        assert_eq!(session_id(&headers("sess_01-AB")).unwrap(), "sess_01-AB");
    }

    #[test]
    fn test_rejects_bad_session_ids() {
        assert!(session_id(&headers("a b")).is_err());
        assert!(session_id(&headers(&"x".repeat(129))).is_err());

        let err = session_id(&headers("semi;colon")).unwrap_err();
        assert_eq!(err.field(), "x-session-id");
    }
}
