use regex::Regex;

use crate::core::error::{ConfigError, Error};
use crate::core::store::UserStore;
use crate::types::User;

// bcrypt refuses anything outside this window
const MIN_HASH_COST: u32 = 4;
const MAX_HASH_COST: u32 = 31;

/// Verifies submitted credentials against stored hashes and registers new
/// accounts. Everything here is read-only against the store except
/// `register`, and no failure path reveals whether the username exists.
#[derive(Clone, Debug)]
pub(crate) struct UserController<S> {
    store: S,
    hash_cost: u32,
    username_pattern: Regex,
}

impl<S: UserStore> UserController<S> {
    pub(crate) fn new(store: S, hash_cost: u32) -> Result<Self, ConfigError> {
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&hash_cost) {
            return Err(ConfigError::HashCost(hash_cost));
        }

        Ok(Self {
            store,
            hash_cost,
            username_pattern: Regex::new(r"^[a-zA-Z0-9_-]{3,20}$")?,
        })
    }

    pub(crate) async fn register(&self, username: &str, password: &str) -> Result<User, Error> {
        if !self.username_pattern.is_match(username) {
            return Err(Error::InvalidUsername);
        }

        let password_hash = self.hash_password(password)?;

        self.store.create_user(username, &password_hash).await
    }

    /// Checks a username/password pair. Unknown usernames and wrong
    /// passwords collapse to the same error.
    pub(crate) async fn authenticate(&self, username: &str, password: &str) -> Result<User, Error> {
        let user = self
            .store
            .find_user_by_username(username)
            .await?
            .ok_or(Error::Unauthorized)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(Error::Unauthorized);
        }

        Ok(user)
    }

    pub(crate) async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        self.store.find_user_by_username(username).await
    }

    /// Salted, so hashing the same password twice yields different strings.
    pub(crate) fn hash_password(&self, password: &str) -> Result<String, Error> {
        bcrypt::hash(password, self.hash_cost).map_err(Error::Bcrypt)
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, Error> {
        bcrypt::verify(password, password_hash).map_err(Error::Bcrypt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::memory::MemoryUserStore;

    fn make_controller() -> UserController<MemoryUserStore> {
        UserController::new(MemoryUserStore::new(), MIN_HASH_COST).unwrap()
    }

    #[test]
    fn test_hash_password_salts_each_call() {
        let controller = make_controller();

        let first = controller.hash_password("correct-horse").unwrap();
        let second = controller.hash_password("correct-horse").unwrap();

        assert_ne!(first, second);
        assert!(controller.verify_password("correct-horse", &first).unwrap());
        assert!(controller.verify_password("correct-horse", &second).unwrap());
    }

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let controller = make_controller();

        let user = controller.register("alice", "correct-horse").await.unwrap();
        assert_eq!(user.username, "alice");
        assert!(user.is_active);

        let user = controller
            .authenticate("alice", "correct-horse")
            .await
            .unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_collapse() {
        let controller = make_controller();

        controller.register("alice", "correct-horse").await.unwrap();

        assert!(matches!(
            controller.authenticate("alice", "wrong-horse").await,
            Err(Error::Unauthorized)
        ));
        assert!(matches!(
            controller.authenticate("bob", "correct-horse").await,
            Err(Error::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let controller = make_controller();

        controller.register("alice", "correct-horse").await.unwrap();

        assert!(matches!(
            controller.register("alice", "other-password").await,
            Err(Error::UserAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_register_validates_username() {
        let controller = make_controller();

        assert!(matches!(
            controller.register("a!", "correct-horse").await,
            Err(Error::InvalidUsername)
        ));
        assert!(matches!(
            controller.register("ab", "correct-horse").await,
            Err(Error::InvalidUsername)
        ));
    }

    #[tokio::test]
    async fn test_register_accepts_any_password() {
        let controller = make_controller();

        // no length floor: anything bcrypt can hash is registrable
        let user = controller.register("alice", "pw1").await.unwrap();
        assert_eq!(user.username, "alice");

        let user = controller.authenticate("alice", "pw1").await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn test_hash_cost_out_of_range() {
        assert!(matches!(
            UserController::new(MemoryUserStore::new(), 1),
            Err(ConfigError::HashCost(1))
        ));
    }
}
