use chrono::Duration;
use sqlx::postgres::PgPool;

use crate::controllers::session::SessionController;
use crate::controllers::token::TokenController;
use crate::controllers::user::UserController;
use crate::core::config::Args;
use crate::core::error::ConfigError;
use crate::core::store::PgUserStore;

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    pub(crate) pool: PgPool,
    pub(crate) sessions: SessionController<PgUserStore>,
}

impl AppState {
    pub(crate) fn new(pool: PgPool, config: &Args) -> Result<Self, ConfigError> {
        let users = UserController::new(PgUserStore::new(pool.clone()), config.hash_cost)?;

        let tokens = TokenController::new(
            &config.access_secret,
            &config.refresh_secret,
            Duration::minutes(i64::from(config.access_ttl_minutes)),
            Duration::minutes(i64::from(config.refresh_ttl_minutes)),
        )?;

        Ok(AppState {
            pool,
            sessions: SessionController::new(users, tokens),
        })
    }
}
