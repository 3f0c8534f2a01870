use actix_web::http::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum ProxyError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Request to upstream failed: {0}")]
    Transport(String),
    #[error("Upstream responded with status {status}: {message}")]
    UpstreamStatus { status: u16, message: String },
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl ProxyError {
    pub(crate) fn invalid_request(msg: &str) -> Self {
        Self::InvalidRequest(msg.to_string())
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl actix_web::ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}
