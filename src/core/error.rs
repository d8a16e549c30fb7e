use axum::BoxError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database migration error: {0}")]
    DatabaseMigration(#[from] sqlx::migrate::MigrateError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("Access and refresh secrets must differ")]
    MatchingSecrets,
    #[error("Token TTLs must be positive, with refresh exceeding access")]
    TokenTtl,
    #[error("Bcrypt cost factor {0} out of range")]
    HashCost(u32),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("No credentials provided")]
    NoCredentials,
    #[error("Expired token")]
    ExpiredToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Invalid username")]
    InvalidUsername,
    #[error("Header decode error: {0}")]
    HeaderDecode(#[from] axum::http::header::ToStrError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("{:?}", self);

        let (status, detail): (StatusCode, String) = match self {
            Error::Sql(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SQL error".into()),
            Error::Bcrypt(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Bcrypt error".into()),
            Error::Jwt(_) => (StatusCode::INTERNAL_SERVER_ERROR, "JWT error".into()),
            Error::NoCredentials => (StatusCode::UNAUTHORIZED, "No credentials provided".into()),
            Error::ExpiredToken => (StatusCode::UNAUTHORIZED, "Expired token".into()),
            Error::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".into()),
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".into()),
            Error::UserAlreadyExists => (StatusCode::CONFLICT, "User already exists".into()),
            Error::InvalidUsername => (StatusCode::BAD_REQUEST, "Invalid username".into()),
            Error::HeaderDecode(_) => (StatusCode::UNAUTHORIZED, "Invalid authorization header".into()),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

pub(crate) async fn handle_middleware_errors(err: BoxError) -> (StatusCode, &'static str) {
    tracing::error!("Unhandled error: {:?}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}
