//! SQS implementation of LoanPublisher

use async_trait::async_trait;
use aws_sdk_sqs::Client as SqsClient;

use crate::domain::entities::Loan;
use crate::domain::ports::{LoanPublisher, LoanStatusEvent};
use crate::error::PublisherError;

/// Sends loan status changes to the status queue
pub struct SqsLoanPublisher {
    client: SqsClient,
    status_queue_url: String,
}

impl SqsLoanPublisher {
    pub fn new(client: SqsClient, status_queue_url: String) -> Self {
        Self {
            client,
            status_queue_url,
        }
    }

    /// Build a client from the default AWS credential chain.
    ///
    /// `endpoint_url` overrides the service endpoint (LocalStack).
    pub async fn from_config(
        region: &str,
        endpoint_url: Option<&str>,
        status_queue_url: String,
    ) -> Self {
        let mut config_builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()));

        if let Some(endpoint_url) = endpoint_url {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        let aws_cfg = config_builder.load().await;
        Self::new(SqsClient::new(&aws_cfg), status_queue_url)
    }

    async fn send(&self, body: String) -> Result<String, PublisherError> {
        let queue_url = self.status_queue_url.as_str();
        let result = self
            .client
            .send_message()
            .queue_url(queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, queue_url, "Failed to send SQS message");
                PublisherError::Send(e.to_string())
            })?;

        Ok(result.message_id().unwrap_or_default().to_string())
    }
}

#[async_trait]
impl LoanPublisher for SqsLoanPublisher {
    async fn send_status_update(
        &self,
        loan: &Loan,
        status: &str,
        username: &str,
    ) -> Result<(), PublisherError> {
        let body = serde_json::to_string(&LoanStatusEvent::new(loan, status, username))?;
        tracing::trace!(%body, "Publishing loan status");

        let message_id = self.send(body).await?;
        tracing::debug!(loan_id = %loan.id, %message_id, "Loan status message sent");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_sqs::config::retry::RetryConfig;
    use aws_sdk_sqs::config::{BehaviorVersion, Credentials, Region};

    use crate::test_utils::test_loan;

    fn unreachable_publisher() -> SqsLoanPublisher {
        let config = aws_sdk_sqs::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "static"))
            // Nothing listens on port 1
            .endpoint_url("http://127.0.0.1:1")
            .retry_config(RetryConfig::disabled())
            .build();

        SqsLoanPublisher::new(
            SqsClient::from_conf(config),
            "http://127.0.0.1:1/000000000000/loan-status".to_string(),
        )
    }

    #[tokio::test]
    async fn send_failure_is_reported() {
        let publisher = unreachable_publisher();

        let err = publisher
            .send_status_update(&test_loan("ana@example.com", 2), "Approved", "Ana Gomez")
            .await
            .unwrap_err();

        assert!(matches!(err, PublisherError::Send(_)));
    }
}
