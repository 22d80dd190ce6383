use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
            jwt_secret: "docket-dev-secret".to_string(),
            token_ttl: Duration::from_secs(8 * 60 * 60),
            bcrypt_cost: 10,
            cors_allowed_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

pub fn validate_startup_config(config: &ApiConfig) -> Result<(), String> {
    if config.jwt_secret.trim().is_empty() {
        return Err("jwt_secret must not be empty".to_string());
    }
    if config.max_body_bytes == 0 {
        return Err("max_body_bytes must be > 0".to_string());
    }
    if config.token_ttl.is_zero() {
        return Err("token_ttl must be > 0".to_string());
    }
    if !(4..=31).contains(&config.bcrypt_cost) {
        return Err("bcrypt_cost must be within 4..=31".to_string());
    }
    Ok(())
}
