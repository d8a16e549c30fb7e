use axum::Json;
use axum::extract::Extension;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::core::error::Error;
use crate::types::{User, response};

#[instrument(skip_all)]
pub(crate) async fn me(Extension(user): Extension<User>) -> Result<impl IntoResponse, Error> {
    Ok(Json(response::User::new(user.id, &user.username)))
}
