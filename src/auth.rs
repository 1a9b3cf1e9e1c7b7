//! Auth Gate: bearer token verification at connection establishment.
//!
//! Tokens are `base64url(claims JSON) "." base64url(HMAC-SHA256 tag)`,
//! signed with a process-wide secret. The MAC is computed over the encoded
//! claims part. Verification is a pure function of token, secret and the
//! caller-supplied current time, so tests can pin the clock.
//!
//! A connection that fails verification must be closed before any session
//! is created; the WebSocket handler sends a policy-violation close frame.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::domain::{Age, UserName};

type HmacSha256 = Hmac<Sha256>;

/// Verification failures. Both are fatal to the connection attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Wrong shape, undecodable claims, bad signature, or claims that fail
    /// domain validation
    #[error("invalid token")]
    Invalid,

    /// Signature is fine but the token is past its expiry
    #[error("token expired")]
    Expired,
}

/// Identity claims established by a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub name: UserName,
    pub age: Age,
}

/// Token claims wire format
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    name: String,
    age: u32,
    /// Expiry, Unix seconds
    exp: i64,
}

/// Verifies bearer tokens against the process-wide secret.
#[derive(Clone)]
pub struct AuthGate {
    secret: String,
}

impl AuthGate {
    /// Create a gate for the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verify a token at time `now` (Unix seconds).
    pub fn verify(&self, token: &str, now: i64) -> Result<VerifiedIdentity, AuthError> {
        let (claims_part, sig_part) = token.split_once('.').ok_or(AuthError::Invalid)?;

        let mut mac =
            HmacSha256::new_from_slice(self.secret.as_bytes()).map_err(|_| AuthError::Invalid)?;
        mac.update(claims_part.as_bytes());
        let sig = URL_SAFE_NO_PAD
            .decode(sig_part)
            .map_err(|_| AuthError::Invalid)?;
        mac.verify_slice(&sig).map_err(|_| AuthError::Invalid)?;

        let claims_json = URL_SAFE_NO_PAD
            .decode(claims_part)
            .map_err(|_| AuthError::Invalid)?;
        let claims: TokenClaims =
            serde_json::from_slice(&claims_json).map_err(|_| AuthError::Invalid)?;

        if now >= claims.exp {
            return Err(AuthError::Expired);
        }

        let name = UserName::new(claims.name).map_err(|_| AuthError::Invalid)?;
        let age = Age::new(claims.age).map_err(|_| AuthError::Invalid)?;
        Ok(VerifiedIdentity { name, age })
    }

    /// Mint a token for `identity`, valid for `ttl_secs` from `now`
    /// (Unix seconds). Used by tests and the server's token-minting CLI.
    pub fn issue(&self, identity: &VerifiedIdentity, ttl_secs: i64, now: i64) -> String {
        let claims = TokenClaims {
            name: identity.name.as_str().to_string(),
            age: identity.age.value(),
            exp: now + ttl_secs,
        };
        // serialization of a plain struct cannot fail
        let claims_json = serde_json::to_vec(&claims).unwrap();
        let claims_part = URL_SAFE_NO_PAD.encode(&claims_json);

        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(claims_part.as_bytes());
        let sig_part = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        format!("{claims_part}.{sig_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str, age: u32) -> VerifiedIdentity {
        VerifiedIdentity {
            name: UserName::new(name.to_string()).unwrap(),
            age: Age::new(age).unwrap(),
        }
    }

    #[test]
    fn test_issue_then_verify_roundtrip() {
        // テスト項目: 発行したトークンを検証できる
        // given (前提条件):
        let gate = AuthGate::new("test-secret");
        let alice = identity("alice", 20);

        // when (操作):
        let token = gate.issue(&alice, 3600, 1_000_000);
        let result = gate.verify(&token, 1_000_000);

        // then (期待する結果):
        assert_eq!(result.unwrap(), alice);
    }

    #[test]
    fn test_verify_expired_token_fails() {
        // テスト項目: 有効期限切れのトークンは Expired になる
        // given (前提条件):
        let gate = AuthGate::new("test-secret");
        let token = gate.issue(&identity("alice", 20), 3600, 1_000_000);

        // when (操作): 有効期限ちょうどの時刻で検証
        let result = gate.verify(&token, 1_003_600);

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), AuthError::Expired);
    }

    #[test]
    fn test_verify_wrong_secret_fails() {
        // テスト項目: 異なるシークレットで署名されたトークンは Invalid になる
        // given (前提条件):
        let gate = AuthGate::new("test-secret");
        let other = AuthGate::new("other-secret");
        let token = other.issue(&identity("alice", 20), 3600, 1_000_000);

        // when (操作):
        let result = gate.verify(&token, 1_000_000);

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), AuthError::Invalid);
    }

    #[test]
    fn test_verify_tampered_claims_fails() {
        // テスト項目: クレーム部を改竄したトークンは Invalid になる
        // given (前提条件):
        let gate = AuthGate::new("test-secret");
        let token = gate.issue(&identity("alice", 20), 3600, 1_000_000);
        let (_, sig) = token.split_once('.').unwrap();
        let forged_claims = URL_SAFE_NO_PAD.encode(br#"{"name":"mallory","age":20,"exp":9999999999}"#);
        let forged = format!("{forged_claims}.{sig}");

        // when (操作):
        let result = gate.verify(&forged, 1_000_000);

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), AuthError::Invalid);
    }

    #[test]
    fn test_verify_garbage_fails() {
        // テスト項目: トークン形式でない文字列は Invalid になる
        let gate = AuthGate::new("test-secret");

        assert_eq!(gate.verify("", 0).unwrap_err(), AuthError::Invalid);
        assert_eq!(gate.verify("not-a-token", 0).unwrap_err(), AuthError::Invalid);
        assert_eq!(gate.verify("a.b.c", 0).unwrap_err(), AuthError::Invalid);
    }

    #[test]
    fn test_verify_underage_claims_fails() {
        // テスト項目: 署名は正しくても年齢が最小値未満なら Invalid になる
        // given (前提条件): 13 歳未満のクレームを直接署名する
        let gate = AuthGate::new("test-secret");
        let claims_part =
            URL_SAFE_NO_PAD.encode(br#"{"name":"kid","age":10,"exp":2000000000}"#);
        let mut mac = HmacSha256::new_from_slice(b"test-secret").unwrap();
        mac.update(claims_part.as_bytes());
        let sig_part = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        let token = format!("{claims_part}.{sig_part}");

        // when (操作):
        let result = gate.verify(&token, 1_000_000);

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), AuthError::Invalid);
    }
}
