use std::env;
use std::time::Duration;

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("JWT_SECRET must not be empty")]
    EmptySecret,
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// 未配置时使用内存存储
    pub database_url: Option<String>,
    /// 未配置时使用内存黑名单
    pub redis_url: Option<String>,
    pub jwt_secret: String,
    pub access_token_expiration_secs: u64,
    pub refresh_token_expiration_secs: u64,
    pub admin_user_id: i64,
    pub bcrypt_cost: u32,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        let bcrypt_cost = checked_bcrypt_cost(parsed_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?)?;

        Ok(Config {
            database_url: optional("DATABASE_URL"),
            redis_url: optional("REDIS_URL"),
            jwt_secret,
            access_token_expiration_secs: duration_var("ACCESS_TOKEN_EXPIRATION", 15 * 60)?,
            refresh_token_expiration_secs: duration_var(
                "REFRESH_TOKEN_EXPIRATION",
                30 * 24 * 3600,
            )?,
            admin_user_id: parsed_var("ADMIN_USER_ID", 1)?,
            bcrypt_cost,
            server_host: optional("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parsed_var("SERVER_PORT", 5000)?,
        })
    }

    pub fn access_token_expiration(&self) -> Duration {
        Duration::from_secs(self.access_token_expiration_secs)
    }

    pub fn refresh_token_expiration(&self) -> Duration {
        Duration::from_secs(self.refresh_token_expiration_secs)
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

/// bcrypt 只接受 4..=31
fn checked_bcrypt_cost(cost: u32) -> Result<u32, ConfigError> {
    if (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        Ok(cost)
    } else {
        Err(ConfigError::Invalid {
            name: "BCRYPT_COST",
            value: cost.to_string(),
        })
    }
}

fn duration_var(name: &'static str, default_secs: u64) -> Result<u64, ConfigError> {
    match optional(name) {
        Some(value) => parse_duration_secs(&value).ok_or(ConfigError::Invalid { name, value }),
        None => Ok(default_secs),
    }
}

/// 解析 "900"、"15m"、"1h"、"30d" 这类时长，返回秒数
pub fn parse_duration_secs(value: &str) -> Option<u64> {
    let value = value.trim();
    let (number, unit) = match value.char_indices().last()? {
        (idx, c) if c.is_ascii_alphabetic() => (&value[..idx], c.to_ascii_lowercase()),
        _ => (value, 's'),
    };
    let number: u64 = number.trim().parse().ok()?;
    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        'd' => 24 * 3600,
        _ => return None,
    };
    number.checked_mul(multiplier)
}
