use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};

use crate::core::error::{ConfigError, Error};
use crate::types::{Claims, TokenKind};

const ISSUER: &str = "authcore";

/// Mints and verifies the two token kinds. Each kind gets its own key pair,
/// so an access secret can never validate a refresh token or vice versa.
#[derive(Clone)]
pub(crate) struct TokenController {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenController")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenController {
    pub(crate) fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, ConfigError> {
        if access_secret == refresh_secret {
            return Err(ConfigError::MatchingSecrets);
        }

        if access_ttl <= Duration::zero() || refresh_ttl <= access_ttl {
            return Err(ConfigError::TokenTtl);
        }

        Ok(Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        })
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }

    fn encoding_key(&self, kind: TokenKind) -> &EncodingKey {
        match kind {
            TokenKind::Access => &self.access_encoding,
            TokenKind::Refresh => &self.refresh_encoding,
        }
    }

    fn decoding_key(&self, kind: TokenKind) -> &DecodingKey {
        match kind {
            TokenKind::Access => &self.access_decoding,
            TokenKind::Refresh => &self.refresh_decoding,
        }
    }

    pub(crate) fn issue(
        &self,
        subject: &str,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<String, Error> {
        let expiration_time = now + self.ttl(kind);

        let claims = Claims {
            exp: expiration_time.timestamp() as usize,
            iat: now.timestamp() as usize,
            sub: subject.to_string(),
            iss: ISSUER.into(),
        };

        Ok(jsonwebtoken::encode(
            &Header::default(),
            &claims,
            self.encoding_key(kind),
        )?)
    }

    pub(crate) fn issue_pair(
        &self,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<(String, String), Error> {
        let access_token = self.issue(subject, TokenKind::Access, now)?;
        let refresh_token = self.issue(subject, TokenKind::Refresh, now)?;

        Ok((access_token, refresh_token))
    }

    pub(crate) fn decode(&self, token: &str, kind: TokenKind) -> Result<Claims, Error> {
        // no leeway: a token is dead the moment its expiry passes
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data =
            match jsonwebtoken::decode::<Claims>(token, self.decoding_key(kind), &validation) {
                Ok(token_data) => token_data,
                Err(e) => match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        return Err(Error::ExpiredToken);
                    }
                    _ => return Err(Error::InvalidToken),
                },
            };

        // jsonwebtoken only rejects exp < now, which leaves a token alive for
        // the rest of its expiry second; it must be dead from exp onward
        if token_data.claims.exp <= Utc::now().timestamp() as usize {
            return Err(Error::ExpiredToken);
        }

        if token_data.claims.sub.is_empty() {
            return Err(Error::InvalidToken);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_controller() -> TokenController {
        TokenController::new(
            "access-secret-for-tests",
            "refresh-secret-for-tests",
            Duration::minutes(30),
            Duration::days(7),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_decode_round_trip() {
        let controller = make_controller();
        let now = Utc::now();

        for kind in [TokenKind::Access, TokenKind::Refresh] {
            let token = controller.issue("alice", kind, now).unwrap();
            let claims = controller.decode(&token, kind).unwrap();

            assert_eq!(claims.sub, "alice");
            assert_eq!(claims.iat, now.timestamp() as usize);
            assert_eq!(
                claims.exp,
                (now + controller.ttl(kind)).timestamp() as usize
            );
        }
    }

    #[test]
    fn test_cross_kind_rejection() {
        let controller = make_controller();
        let now = Utc::now();

        let access = controller.issue("alice", TokenKind::Access, now).unwrap();
        let refresh = controller.issue("alice", TokenKind::Refresh, now).unwrap();

        assert!(matches!(
            controller.decode(&access, TokenKind::Refresh),
            Err(Error::InvalidToken)
        ));
        assert!(matches!(
            controller.decode(&refresh, TokenKind::Access),
            Err(Error::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let controller = make_controller();
        let issued_at = Utc::now() - controller.ttl(TokenKind::Access) - Duration::seconds(30);

        let token = controller
            .issue("alice", TokenKind::Access, issued_at)
            .unwrap();

        assert!(matches!(
            controller.decode(&token, TokenKind::Access),
            Err(Error::ExpiredToken)
        ));
    }

    #[test]
    fn test_token_rejected_at_exact_expiry() {
        let controller = make_controller();
        // exp lands on the current second, the first instant the token is dead
        let issued_at = Utc::now() - controller.ttl(TokenKind::Access);

        let token = controller
            .issue("alice", TokenKind::Access, issued_at)
            .unwrap();

        assert!(matches!(
            controller.decode(&token, TokenKind::Access),
            Err(Error::ExpiredToken)
        ));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let controller = make_controller();
        let token = controller
            .issue("alice", TokenKind::Access, Utc::now())
            .unwrap();

        let (head, signature) = token.rsplit_once('.').unwrap();
        let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
        let tampered = format!("{}.{}{}", head, flipped, &signature[1..]);

        assert!(matches!(
            controller.decode(&tampered, TokenKind::Access),
            Err(Error::InvalidToken)
        ));
    }

    #[test]
    fn test_empty_subject_rejected() {
        let controller = make_controller();
        let now = Utc::now();

        let claims = Claims {
            exp: (now + Duration::minutes(5)).timestamp() as usize,
            iat: now.timestamp() as usize,
            sub: String::new(),
            iss: ISSUER.into(),
        };

        // validly signed, but carrying no subject
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &controller.access_encoding,
        )
        .unwrap();

        assert!(matches!(
            controller.decode(&token, TokenKind::Access),
            Err(Error::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let controller = make_controller();

        assert!(matches!(
            controller.decode("not.a.token", TokenKind::Access),
            Err(Error::InvalidToken)
        ));
    }

    #[test]
    fn test_matching_secrets_rejected() {
        let result = TokenController::new(
            "same-secret",
            "same-secret",
            Duration::minutes(30),
            Duration::days(7),
        );

        assert!(matches!(result, Err(ConfigError::MatchingSecrets)));
    }

    #[test]
    fn test_refresh_ttl_must_exceed_access_ttl() {
        let result = TokenController::new(
            "access-secret",
            "refresh-secret",
            Duration::minutes(30),
            Duration::minutes(30),
        );

        assert!(matches!(result, Err(ConfigError::TokenTtl)));
    }

    #[test]
    fn test_non_positive_access_ttl_rejected() {
        for access_ttl in [Duration::zero(), Duration::minutes(-30)] {
            let result = TokenController::new(
                "access-secret",
                "refresh-secret",
                access_ttl,
                Duration::days(7),
            );

            assert!(matches!(result, Err(ConfigError::TokenTtl)));
        }
    }
}
