use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::{self, Debug};
use std::io;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        io_error(err)
    }
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self.code {
            1..=99 => StatusCode::INTERNAL_SERVER_ERROR,
            100 => StatusCode::CONFLICT,
            103 | 105 => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self.code {
            1..=99 => "Internal Server Error",
            _ => self.message.as_str(),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_state_error() -> Error {
    Error {
        code: 100,
        message: "invalid state".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn configuration_error(detail: &str) -> Error {
    Error {
        code: 102,
        message: format!("configuration error: {}", detail),
    }
}

pub fn asset_missing_error(path: &str) -> Error {
    Error {
        code: 103,
        message: format!("asset not found at `{}`", path),
    }
}

pub fn location_unavailable_error() -> Error {
    Error {
        code: 104,
        message: "location unavailable".into(),
    }
}

pub fn not_found_error() -> Error {
    Error {
        code: 105,
        message: "not found".into(),
    }
}

pub fn io_error<T: Debug>(err: T) -> Error {
    tracing::error!("io error: {:?}", err);

    Error {
        code: 2,
        message: "io error".into(),
    }
}

#[test]
fn internal_errors_hide_their_message() {
    let err = io_error("disk on fire");
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn client_errors_map_to_status() {
    assert_eq!(invalid_state_error().status(), StatusCode::CONFLICT);
    assert_eq!(invalid_input_error().status(), StatusCode::BAD_REQUEST);
    assert_eq!(configuration_error("x").status(), StatusCode::BAD_REQUEST);
    assert_eq!(asset_missing_error("a.pdf").status(), StatusCode::NOT_FOUND);
    assert_eq!(location_unavailable_error().status(), StatusCode::BAD_REQUEST);
    assert_eq!(not_found_error().status(), StatusCode::NOT_FOUND);
}

#[test]
fn configuration_error_names_the_detail() {
    let err = configuration_error("unknown venue `Town Hall`");
    assert_eq!(err.code, 102);
    assert!(err.message.contains("Town Hall"));
}
