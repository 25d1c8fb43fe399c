use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::{Role, TokenClaims};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24;
const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 90;

/// Issue a signed access token carrying the staff member's role.
pub async fn generate_access_token(user_id: &str, username: &str, role: Role) -> Result<String> {
    let now = Utc::now();
    let exp = (now + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role,
        exp,
        iat,
    };

    let secret = get_jwt_secret().await?;
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")?;

    Ok(token)
}

/// Validate a token signature and expiry, returning its claims.
pub async fn validate_token(token: &str) -> Result<TokenClaims> {
    let secret = get_jwt_secret().await?;

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

/// Opaque refresh token; only its hash is persisted.
pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Signing secret, created on first use and kept in sys_settings so tokens
/// survive restarts.
pub async fn get_jwt_secret() -> Result<String> {
    match get_jwt_secret_from_db().await {
        Ok(Some(secret)) => Ok(secret),
        Ok(None) | Err(_) => {
            let secret = generate_jwt_secret();
            let _ = save_jwt_secret_to_db(&secret).await;
            Ok(secret)
        }
    }
}

/// 256 random bits, base64-encoded
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

async fn get_jwt_secret_from_db() -> Result<Option<String>> {
    use crate::shared::data::db::get_connection;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            ["jwt_secret".into()],
        ))
        .await?;

    match result {
        Some(row) => {
            let secret: String = row.try_get("", "value")?;
            Ok(Some(secret))
        }
        None => Ok(None),
    }
}

async fn save_jwt_secret_to_db(secret: &str) -> Result<()> {
    use crate::shared::data::db::get_connection;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let conn = get_connection();
    let now = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT OR REPLACE INTO sys_settings (key, value, description, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            "jwt_secret".into(),
            secret.to_string().into(),
            "Auto-generated JWT signing secret".into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await?;

    Ok(())
}

/// Expiry stamp for a refresh token issued now.
pub fn calculate_refresh_token_expiration() -> String {
    let exp = Utc::now() + chrono::Duration::days(REFRESH_TOKEN_LIFETIME_DAYS);
    exp.to_rfc3339()
}
