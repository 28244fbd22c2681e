/// Classification of GitLab API failures. Every variant is fatal for the run.
#[derive(Debug, Clone, PartialEq)]
pub enum GitLabApiError {
    /// 401 / 403: missing, expired or under-privileged token
    Unauthorized(String),
    /// 404: unknown project or group id, or not visible to the token
    NotFound(String),
    /// Any other 4xx response
    ClientError(u16, String),
    /// 5xx response
    ServerError(u16, String),
    /// Connection, TLS or timeout failure before a response arrived
    Transport(String),
    /// Response body was not a JSON array of issues
    Decode(String),
}

impl GitLabApiError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, body: String) -> Self {
        let result = match status {
            401 | 403 => Self::Unauthorized(body),
            404 => Self::NotFound(body),
            400..=499 => Self::ClientError(status, body),
            _ => Self::ServerError(status, body),
        };
        tracing::error!("GitLab API request failed: {}", result);
        result
    }

    /// Convert a reqwest error raised while sending or reading a request
    pub fn from_reqwest_error(error: reqwest::Error) -> Self {
        tracing::debug!("Raw reqwest error: {:?}", error);

        let result = if error.is_decode() {
            Self::Decode(error.to_string())
        } else if error.is_timeout() {
            Self::Transport(format!("Request timed out: {}", error))
        } else {
            Self::Transport(error.to_string())
        };

        tracing::error!("GitLab API request failed: {}", result);
        result
    }
}

impl std::fmt::Display for GitLabApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::NotFound(msg) => write!(f, "Resource not found: {}", msg),
            Self::ClientError(status, msg) => write!(f, "Client error ({}): {}", status, msg),
            Self::ServerError(status, msg) => write!(f, "Server error ({}): {}", status, msg),
            Self::Transport(msg) => write!(f, "Transport error: {}", msg),
            Self::Decode(msg) => write!(f, "Invalid response body: {}", msg),
        }
    }
}

impl std::error::Error for GitLabApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(
            GitLabApiError::from_status(401, "401 Unauthorized".to_string()),
            GitLabApiError::Unauthorized("401 Unauthorized".to_string())
        );
        assert!(matches!(
            GitLabApiError::from_status(404, String::new()),
            GitLabApiError::NotFound(_)
        ));
        assert!(matches!(
            GitLabApiError::from_status(429, String::new()),
            GitLabApiError::ClientError(429, _)
        ));
        assert!(matches!(
            GitLabApiError::from_status(502, String::new()),
            GitLabApiError::ServerError(502, _)
        ));
    }
}
