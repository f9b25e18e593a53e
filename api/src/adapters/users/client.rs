//! User service REST client implementation

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use urlencoding::encode;

use super::circuit_breaker::CircuitBreaker;
use crate::domain::ports::{UserClient, UserProfile};
use crate::error::UserClientError;

/// Implementation of the user service client
///
/// Single-user validation goes through the circuit breaker. The batch lookup
/// used for listing enrichment does not.
pub struct RestUserClient {
    http: Client,
    base_url: String,
    validate_path: String,
    batch_path: String,
    breaker: CircuitBreaker,
}

impl RestUserClient {
    pub fn new(
        base_url: String,
        validate_path: String,
        batch_path: String,
        timeout: Duration,
        breaker: CircuitBreaker,
    ) -> Result<Self, UserClientError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            validate_path,
            batch_path,
            breaker,
        })
    }

    fn validate_url(&self, email: &str, document_number: Option<&str>) -> String {
        let mut url = format!(
            "{}{}?email={}",
            self.base_url,
            self.validate_path,
            encode(email)
        );
        if let Some(document_number) = document_number {
            url.push_str("&documentNumber=");
            url.push_str(&encode(document_number));
        }
        url
    }

    fn batch_url(&self) -> String {
        format!("{}{}", self.base_url, self.batch_path)
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, UserClientError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| UserClientError::Deserialization(e.to_string()))
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(UserClientError::Unauthorized)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(UserClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn fetch_user(
        &self,
        email: &str,
        document_number: Option<&str>,
        token: &str,
    ) -> Result<Option<UserProfile>, UserClientError> {
        let resp = self
            .http
            .get(self.validate_url(email, document_number))
            .bearer_auth(token)
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let envelope: Envelope<UserProfile> = self.handle_response(resp).await?;
        if envelope.data.is_none() {
            tracing::debug!(email, message = ?envelope.user_message, "User not registered");
        }

        Ok(envelope.data)
    }
}

/// Whether an error says the user service itself is unhealthy. A rejected
/// token or a client error still means the service answered.
fn is_service_failure(err: &UserClientError) -> bool {
    match err {
        UserClientError::Request(_) | UserClientError::Deserialization(_) => true,
        UserClientError::Api { status, .. } => *status >= 500,
        UserClientError::Unauthorized | UserClientError::CircuitOpen(_) => false,
    }
}

/// Response envelope used by the user service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<T> {
    #[serde(default)]
    user_message: Option<String>,
    data: Option<T>,
}

#[derive(Serialize)]
struct BatchRequest<'a> {
    emails: &'a HashSet<String>,
}

#[async_trait]
impl UserClient for RestUserClient {
    async fn validate_user_registered(
        &self,
        email: &str,
        document_number: Option<&str>,
        token: &str,
    ) -> Result<Option<UserProfile>, UserClientError> {
        tracing::debug!(email, document_number, "Validating user with user service");

        if !self.breaker.is_request_allowed().await {
            tracing::warn!(email, "User service circuit open, failing fast");
            return Err(UserClientError::CircuitOpen(self.breaker.name().await));
        }

        let result = self.fetch_user(email, document_number, token).await;
        match &result {
            Err(e) if is_service_failure(e) => self.breaker.record_failure().await,
            _ => self.breaker.record_success().await,
        }

        result
    }

    async fn get_users_by_emails(
        &self,
        emails: &HashSet<String>,
        token: &str,
    ) -> Result<HashMap<String, UserProfile>, UserClientError> {
        tracing::debug!(count = emails.len(), "Resolving users in batch");

        let resp = self
            .http
            .post(self.batch_url())
            .bearer_auth(token)
            .json(&BatchRequest { emails })
            .send()
            .await?;

        let envelope: Envelope<HashMap<String, UserProfile>> = self.handle_response(resp).await?;

        Ok(envelope.data.unwrap_or_default())
    }
}
