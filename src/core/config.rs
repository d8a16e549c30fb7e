use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Args {
    pub(crate) database_host: String,
    pub(crate) database_port: u16,
    pub(crate) database_name: String,
    pub(crate) database_user: String,
    pub(crate) database_password: String,
    pub(crate) log_level: String,
    pub(crate) port: u16,
    pub(crate) access_secret: String,
    pub(crate) refresh_secret: String,
    #[serde(default = "default_access_ttl_minutes")]
    pub(crate) access_ttl_minutes: u32,
    #[serde(default = "default_refresh_ttl_minutes")]
    pub(crate) refresh_ttl_minutes: u32,
    #[serde(default = "default_hash_cost")]
    pub(crate) hash_cost: u32,
}

fn default_access_ttl_minutes() -> u32 {
    30
}

// seven days
fn default_refresh_ttl_minutes() -> u32 {
    10080
}

fn default_hash_cost() -> u32 {
    bcrypt::DEFAULT_COST
}
