use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct Message {
    pub(crate) message: String,
}

impl Message {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Body returned by a successful login: both credential kinds at once.
#[derive(Debug, Serialize)]
pub(crate) struct TokenPair {
    pub(crate) access_token: String,
    pub(crate) refresh_token: String,
    pub(crate) token_type: String,
}

impl TokenPair {
    pub(crate) fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Body returned by the refresh endpoint: a fresh access token only.
#[derive(Debug, Serialize)]
pub(crate) struct AccessToken {
    pub(crate) access_token: String,
    pub(crate) token_type: String,
}

impl AccessToken {
    pub(crate) fn new(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct User {
    pub(crate) id: i32,
    pub(crate) username: String,
}

impl User {
    pub(crate) fn new(id: i32, username: &str) -> Self {
        Self {
            id,
            username: username.to_string(),
        }
    }
}
