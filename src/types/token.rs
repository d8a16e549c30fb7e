use serde::{Deserialize, Serialize};

/// The two purposes a signed token can be minted for. Each kind is signed
/// with its own secret, so the kind never needs to appear in the claims.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Access,
    Refresh,
}

#[derive(Deserialize, Serialize, Debug)]
pub(crate) struct Claims {
    pub(crate) exp: usize,
    pub(crate) iat: usize,
    pub(crate) sub: String,
    pub(crate) iss: String,
}
