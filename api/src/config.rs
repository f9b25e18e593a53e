use std::env;
use std::time::Duration;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    /// Token lifetime in milliseconds
    pub jwt_expiration_ms: i64,
    /// Roles allowed to list loans and change their status
    pub reviewer_roles: Vec<String>,
    pub user_service_url: String,
    pub user_validate_path: String,
    pub user_batch_path: String,
    pub user_service_timeout: Duration,
    /// Consecutive user-service failures before the breaker opens
    pub user_breaker_failure_threshold: u32,
    /// How long the breaker stays open before a trial call
    pub user_breaker_open_duration: Duration,
    pub sqs_region: String,
    pub sqs_status_queue_url: String,
    /// Overrides the SQS endpoint (LocalStack)
    pub sqs_endpoint: Option<String>,
    /// Public path of the loans collection, used for `Location` headers
    pub loans_path: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, value)),
        Err(_) => Ok(default),
    }
}

fn parse_roles(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_var("PORT", 8080)?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_expiration_ms: parse_var("JWT_EXPIRATION_MS", 3_600_000)?,
            reviewer_roles: parse_roles(&var_or("JWT_REVIEWER_ROLES", "ADMIN,ADVISOR")),
            user_service_url: var_or("USER_SERVICE_URL", "http://localhost:8081"),
            user_validate_path: var_or("USER_VALIDATE_PATH", "/api/v1/users/validate"),
            user_batch_path: var_or("USER_BATCH_PATH", "/api/v1/users/batch"),
            user_service_timeout: Duration::from_millis(parse_var(
                "USER_SERVICE_TIMEOUT_MS",
                5000,
            )?),
            user_breaker_failure_threshold: parse_var("USER_BREAKER_FAILURE_THRESHOLD", 5)?,
            user_breaker_open_duration: Duration::from_millis(parse_var(
                "USER_BREAKER_OPEN_MS",
                30_000,
            )?),
            sqs_region: var_or("SQS_REGION", "us-east-1"),
            sqs_status_queue_url: env::var("SQS_STATUS_QUEUE_URL")
                .context("SQS_STATUS_QUEUE_URL must be set")?,
            sqs_endpoint: env::var("SQS_ENDPOINT").ok().filter(|v| !v.is_empty()),
            loans_path: var_or("LOANS_PATH", "/api/v1/loans")
                .trim_end_matches('/')
                .to_string(),
        })
    }
}
