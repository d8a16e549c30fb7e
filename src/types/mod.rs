pub(crate) mod request;
pub(crate) mod response;
pub(crate) mod token;
pub(crate) mod user;

pub(crate) use token::{Claims, TokenKind};
pub(crate) use user::User;
