use axum::extract::{Query, State};
use axum::{Form, Json};
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::{request, response};

#[instrument(skip_all)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(user_data): Json<request::LoginData>,
) -> Result<Json<response::Message>, Error> {
    state
        .sessions
        .register(&user_data.username, &user_data.password)
        .await?;

    Ok(Json(response::Message::new("User registered successfully")))
}

// OAuth2-style password grant: urlencoded form in, token pair out
#[instrument(skip_all)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Form(user_data): Form<request::LoginData>,
) -> Result<Json<response::TokenPair>, Error> {
    let tokens = state
        .sessions
        .login(&user_data.username, &user_data.password)
        .await?;

    Ok(Json(tokens))
}

#[instrument(skip_all)]
pub(crate) async fn refresh(
    State(state): State<AppState>,
    Query(params): Query<request::RefreshParams>,
) -> Result<Json<response::AccessToken>, Error> {
    let token = state.sessions.refresh(&params.refresh_token).await?;

    Ok(Json(token))
}
