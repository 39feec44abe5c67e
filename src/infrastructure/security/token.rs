// src/infrastructure/security/token.rs
use crate::application::{
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::{
    collections::HashMap,
    fmt::Write as _,
    sync::Arc,
    time::{Duration, SystemTime},
};
use tracing::debug;

const TOKEN_TYPE: &str = "Bearer";

/// Issues Ed25519-signed biscuit bearer tokens carrying the account id,
/// email, role and capability facts.
#[derive(Clone)]
pub struct BiscuitTokenManager {
    root: Arc<KeyPair>,
    public: PublicKey,
    ttl: Duration,
}

impl BiscuitTokenManager {
    pub fn new(private_key_hex: &str, ttl: Duration) -> ApplicationResult<Self> {
        let private = PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        let keypair = KeyPair::from(&private);
        let public = keypair.public();

        Ok(Self {
            root: Arc::new(keypair),
            public,
            ttl,
        })
    }

    fn expires_in_seconds(&self) -> i64 {
        ChronoDuration::from_std(self.ttl)
            .map(|ttl| ttl.num_seconds())
            .unwrap_or(i64::MAX)
            .max(0)
    }
}

fn escape_datalog(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn authority_block(
    subject: &TokenSubject,
    issued_at: SystemTime,
    expires_at: SystemTime,
) -> (String, HashMap<String, Term>) {
    let mut params: HashMap<String, Term> = HashMap::new();
    params.insert("uid".to_string(), i64::from(subject.user_id).into());
    params.insert("email".to_string(), subject.email.clone().into());
    params.insert("urole".to_string(), subject.role.as_str().into());
    params.insert("issued".to_string(), issued_at.into());
    params.insert("exp".to_string(), expires_at.into());

    let mut code = String::from(
        r"
        user({uid}, {email});
        role({urole});
        issued_at({issued});
        expires_at({exp});
        check if time($now), $now >= {issued};
        check if time($now), $now <= {exp};
        ",
    );

    let mut capabilities: Vec<_> = subject.capabilities.iter().collect();
    capabilities.sort_by(|a, b| (&a.resource, &a.action).cmp(&(&b.resource, &b.action)));
    for cap in capabilities {
        let _ = writeln!(
            code,
            r#"right("{}", "{}");"#,
            escape_datalog(&cap.resource),
            escape_datalog(&cap.action)
        );
    }

    (code, params)
}

fn sign(code: &str, params: HashMap<String, Term>, root: &KeyPair) -> ApplicationResult<String> {
    let token = Biscuit::builder()
        .code_with_params(code, params, HashMap::new())
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        .build(root)
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

    token
        .seal()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        .to_base64()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = SystemTime::now();
        let expires_at = issued_at
            .checked_add(self.ttl)
            .ok_or_else(|| ApplicationError::infrastructure("token expiration overflow"))?;

        let (code, params) = authority_block(&subject, issued_at, expires_at);
        let token = sign(&code, params, self.root.as_ref())?;

        Ok(AuthTokenDto {
            token,
            token_type: TOKEN_TYPE.to_string(),
            issued_at: DateTime::<Utc>::from(issued_at),
            expires_at: DateTime::<Utc>::from(expires_at),
            expires_in: self.expires_in_seconds(),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let unauthorized = |err: &dyn std::fmt::Display| {
            debug!(error = %err, "bearer token rejected");
            ApplicationError::unauthorized("invalid or expired token")
        };

        let biscuit = Biscuit::from_base64(token, self.public).map_err(|err| unauthorized(&err))?;

        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .code("allow if user($id, $email);")
            .map_err(|err| unauthorized(&err))?
            .build(&biscuit)
            .map_err(|err| unauthorized(&err))?;
        authorizer.authorize().map_err(|err| unauthorized(&err))?;

        let (facts, _, _, _) = biscuit
            .authorizer()
            .map_err(|err| unauthorized(&err))?
            .dump();

        super::claims::parse_claims(facts)
    }
}
