use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
};
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use thiserror::Error;
use uuid::Uuid;

/// 令牌有效期（天）
pub const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Error)]
pub enum TokenError {
    /// 签名不匹配，或者使用了 HS256 以外的算法
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token claims: {0}")]
    MalformedClaims(String),
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String, // 用户ID
    pub exp: i64,        // 过期时间
    pub iat: i64,        // 签发时间
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 签发和校验无状态的 HS256 令牌，密钥在进程内共享
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: &str, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // 过期时间按注入的时钟检查
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            clock,
        }
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let now = self.clock.now();
        let claims = Claims {
            user_id: user_id.to_string(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    pub fn validate(&self, token: &str) -> Result<Uuid, TokenError> {
        check_algorithm(token)?;
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(classify)?;

        if data.claims.exp <= self.clock.now().timestamp() {
            return Err(TokenError::Expired);
        }

        Uuid::parse_str(&data.claims.user_id)
            .map_err(|_| TokenError::MalformedClaims("invalid user_id format".into()))
    }
}

/// 头部能解析但算法不是 HS256（包括 `none` 和未知算法）一律按签名无效处理
fn check_algorithm(token: &str) -> Result<(), TokenError> {
    match decode_header(token) {
        Ok(header) if header.alg == Algorithm::HS256 => Ok(()),
        Ok(_) => Err(TokenError::InvalidSignature),
        Err(err) => match err.kind() {
            ErrorKind::Json(e) if e.classify() == Category::Data => {
                Err(TokenError::InvalidSignature)
            }
            _ => Err(TokenError::MalformedClaims(err.to_string())),
        },
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::MalformedClaims(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::TimeZone;

    use super::*;

    const SECRET: &str = "test-secret";

    struct FixedClock(Mutex<DateTime<Utc>>);

    impl FixedClock {
        fn at(now: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self(Mutex::new(now)))
        }

        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn issued_token_validates_to_same_user() {
        let issuer = TokenIssuer::new(SECRET);
        let user_id = Uuid::new_v4();
        let token = issuer.issue(user_id).unwrap();
        assert_eq!(issuer.validate(&token).unwrap(), user_id);
    }

    #[test]
    fn token_expires_after_seven_days() {
        let clock = FixedClock::at(start());
        let issuer = TokenIssuer::with_clock(SECRET, clock.clone());
        let user_id = Uuid::new_v4();
        let token = issuer.issue(user_id).unwrap();

        clock.advance(Duration::days(TOKEN_TTL_DAYS) - Duration::seconds(1));
        assert_eq!(issuer.validate(&token).unwrap(), user_id);

        clock.advance(Duration::seconds(1));
        assert!(matches!(issuer.validate(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn claims_carry_user_id_and_expiry() {
        let clock = FixedClock::at(start());
        let issuer = TokenIssuer::with_clock(SECRET, clock);
        let user_id = Uuid::new_v4();
        let token = issuer.issue(user_id).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &validation,
        )
        .unwrap();

        assert_eq!(data.claims.user_id, user_id.to_string());
        assert_eq!(data.claims.iat, start().timestamp());
        assert_eq!(data.claims.exp - data.claims.iat, 7 * 24 * 3600);
    }

    #[test]
    fn other_secret_is_rejected() {
        let token = TokenIssuer::new("other-secret").issue(Uuid::new_v4()).unwrap();
        let result = TokenIssuer::new(SECRET).validate(&token);
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn spliced_payload_is_rejected() {
        let issuer = TokenIssuer::new(SECRET);
        let victim = issuer.issue(Uuid::new_v4()).unwrap();
        let forged = TokenIssuer::new("attacker").issue(Uuid::new_v4()).unwrap();

        let victim_parts: Vec<&str> = victim.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let tampered = format!(
            "{}.{}.{}",
            victim_parts[0], forged_parts[1], victim_parts[2]
        );

        assert!(matches!(
            issuer.validate(&tampered),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn other_algorithm_is_rejected() {
        let claims = Claims {
            user_id: Uuid::new_v4().to_string(),
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = TokenIssuer::new(SECRET).validate(&token);
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn alg_none_is_invalid_signature() {
        let issuer = TokenIssuer::new(SECRET);
        let genuine = issuer.issue(Uuid::new_v4()).unwrap();
        let payload = genuine.split('.').nth(1).unwrap();
        // {"alg":"none","typ":"JWT"}
        let unsigned = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{}.", payload);

        assert!(matches!(
            issuer.validate(&unsigned),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn non_json_header_is_malformed() {
        let issuer = TokenIssuer::new(SECRET);
        let genuine = issuer.issue(Uuid::new_v4()).unwrap();
        let parts: Vec<&str> = genuine.split('.').collect();
        // "hello"
        let token = format!("aGVsbG8.{}.{}", parts[1], parts[2]);

        assert!(matches!(
            issuer.validate(&token),
            Err(TokenError::MalformedClaims(_))
        ));
    }

    #[test]
    fn non_uuid_user_id_is_malformed() {
        let claims = serde_json::json!({
            "user_id": "alice",
            "exp": Utc::now().timestamp() + 3600,
            "iat": Utc::now().timestamp(),
        });
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = TokenIssuer::new(SECRET).validate(&token);
        assert!(matches!(result, Err(TokenError::MalformedClaims(_))));
    }

    #[test]
    fn missing_claims_are_malformed() {
        let claims = serde_json::json!({ "user_id": Uuid::new_v4().to_string() });
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = TokenIssuer::new(SECRET).validate(&token);
        assert!(matches!(result, Err(TokenError::MalformedClaims(_))));
    }

    #[test]
    fn garbage_is_malformed() {
        let result = TokenIssuer::new(SECRET).validate("definitely-not-a-jwt");
        assert!(matches!(result, Err(TokenError::MalformedClaims(_))));
    }
}
