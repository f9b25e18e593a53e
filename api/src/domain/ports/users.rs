//! User service port trait
//!
//! Users are owned by an external service; this system only reads them.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::UserClientError;

/// User profile as returned by the user service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: Uuid,
    pub name: String,
    pub lastname: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub email: String,
    #[serde(default)]
    pub base_salary: Option<i64>,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.lastname)
    }
}

#[async_trait]
pub trait UserClient: Send + Sync {
    /// Look up a registered user. `Ok(None)` means the user does not exist.
    async fn validate_user_registered(
        &self,
        email: &str,
        document_number: Option<&str>,
        token: &str,
    ) -> Result<Option<UserProfile>, UserClientError>;

    /// Resolve a set of emails in one call. Unknown emails are missing from the map.
    async fn get_users_by_emails(
        &self,
        emails: &HashSet<String>,
        token: &str,
    ) -> Result<HashMap<String, UserProfile>, UserClientError>;
}
