use std::env;

use thiserror::Error;

pub const DEFAULT_API_BASE_URI: &str = "/api/v1";
pub const DEFAULT_SERVER_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// 为空时进入演示模式，数据只保存在内存中
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        // 签名密钥缺失时不能启动
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let server_port = server_port(|name| env::var(name).ok())?;

        Ok(Config {
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            database_max_connections: optional_var("DATABASE_MAX_CONNECTIONS")?.unwrap_or(10),
            jwt_secret,
            bcrypt_cost: optional_var("BCRYPT_COST")?.unwrap_or(bcrypt::DEFAULT_COST),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port,
            api_base_uri: env::var("API_BASE_URI")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URI.into()),
        })
    }

    /// 测试用配置：内存存储，无数据库
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Config {
            database_url: None,
            database_max_connections: 1,
            jwt_secret: jwt_secret.into(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            server_host: "127.0.0.1".into(),
            server_port: DEFAULT_SERVER_PORT,
            api_base_uri: DEFAULT_API_BASE_URI.into(),
        }
    }
}

/// `PORT` 优先，其次 `SERVER_PORT`；报错时带上实际读取的变量名
fn server_port(lookup: impl Fn(&str) -> Option<String>) -> Result<u16, ConfigError> {
    match ["PORT", "SERVER_PORT"]
        .into_iter()
        .find_map(|name| lookup(name).map(|value| (name, value)))
    {
        Some((name, value)) => parse_var(name, &value),
        None => Ok(DEFAULT_SERVER_PORT),
    }
}

fn optional_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => parse_var(name, &value).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_rejects_garbage() {
        let err = parse_var::<u16>("PORT", "eighty").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
        assert_eq!(parse_var::<u16>("PORT", " 9000 ").unwrap(), 9000);
    }

    #[test]
    fn server_port_reports_the_variable_it_read() {
        let err = server_port(|name| (name == "SERVER_PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "SERVER_PORT", .. }));

        let err = server_port(|name| (name == "PORT").then(|| "http".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }

    #[test]
    fn server_port_prefers_port_then_falls_back() {
        let both = |name: &str| match name {
            "PORT" => Some("9000".to_string()),
            "SERVER_PORT" => Some("9001".to_string()),
            _ => None,
        };
        assert_eq!(server_port(both).unwrap(), 9000);
        assert_eq!(
            server_port(|name| (name == "SERVER_PORT").then(|| "9001".to_string())).unwrap(),
            9001
        );
        assert_eq!(server_port(|_| None).unwrap(), DEFAULT_SERVER_PORT);
    }

    #[test]
    fn with_secret_defaults_to_demo_mode() {
        let config = Config::with_secret("s3cret");
        assert!(config.database_url.is_none());
        assert_eq!(config.api_base_uri, "/api/v1");
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
    }
}
