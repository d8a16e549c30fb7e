use chrono::Utc;

use crate::controllers::token::TokenController;
use crate::controllers::user::UserController;
use crate::core::error::Error;
use crate::core::store::UserStore;
use crate::types::{TokenKind, User, response};

/// Ties the credential verifier and the token controller together into the
/// login, refresh, and identity-resolution flows the routes call.
#[derive(Clone, Debug)]
pub(crate) struct SessionController<S> {
    users: UserController<S>,
    tokens: TokenController,
}

impl<S: UserStore> SessionController<S> {
    pub(crate) fn new(users: UserController<S>, tokens: TokenController) -> Self {
        Self { users, tokens }
    }

    pub(crate) async fn register(&self, username: &str, password: &str) -> Result<User, Error> {
        self.users.register(username, password).await
    }

    pub(crate) async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<response::TokenPair, Error> {
        let user = self.users.authenticate(username, password).await?;

        let (access_token, refresh_token) = self.tokens.issue_pair(&user.username, Utc::now())?;

        Ok(response::TokenPair::new(access_token, refresh_token))
    }

    /// Redeems a refresh token for a new access token. The subject must
    /// still exist; the presented refresh token stays valid until it
    /// expires on its own.
    pub(crate) async fn refresh(&self, refresh_token: &str) -> Result<response::AccessToken, Error> {
        let claims = self.tokens.decode(refresh_token, TokenKind::Refresh)?;

        let user = self
            .users
            .find_by_username(&claims.sub)
            .await?
            .ok_or(Error::Unauthorized)?;

        let access_token = self
            .tokens
            .issue(&user.username, TokenKind::Access, Utc::now())?;

        Ok(response::AccessToken::new(access_token))
    }

    pub(crate) async fn current_user(&self, token: &str) -> Result<User, Error> {
        let claims = self.tokens.decode(token, TokenKind::Access)?;

        let user = self
            .users
            .find_by_username(&claims.sub)
            .await?
            .ok_or(Error::Unauthorized)?;

        if !user.is_active {
            return Err(Error::Unauthorized);
        }

        Ok(user)
    }
}
