use sqlx::Row;
use sqlx::postgres::{PgPool, PgRow};

use crate::core::error::Error;
use crate::types::User;

/// The narrow contract the credential core needs from wherever user records
/// actually live. At most one record exists per username.
pub(crate) trait UserStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, Error>;

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, Error>;
}

#[derive(Clone, Debug)]
pub(crate) struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        match sqlx::query(
            "SELECT
                id,
                username,
                password_hash,
                is_active
            FROM users
            WHERE username = $1;",
        )
        .bind(username)
        .map(map_user)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(e) => Err(Error::Sql(e)),
        }
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, Error> {
        match sqlx::query(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING
                id,
                username,
                password_hash,
                is_active;",
        )
        .bind(username)
        .bind(password_hash)
        .map(map_user)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(Error::UserAlreadyExists)
            }
            Err(e) => Err(Error::Sql(e)),
        }
    }
}

fn map_user(row: PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        is_active: row.get("is_active"),
    }
}
