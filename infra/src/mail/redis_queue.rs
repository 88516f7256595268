//! Redis-backed implementation of the MailDispatcher trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use ak_core::errors::DomainResult;
use ak_core::mail::{MailDispatcher, MailMessage};
use ak_shared::config::mail::MailConfig;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// A queued delivery job as the worker expects it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailJob {
    /// Unique job identifier
    pub id: Uuid,
    /// Job name consumed by the worker
    pub name: String,
    /// The message to deliver
    pub data: MailMessage,
    /// When the job was enqueued
    pub queued_at: DateTime<Utc>,
}

impl MailJob {
    /// Wrap a message in a delivery job
    pub fn new(mail: MailMessage) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "sendMail".to_string(),
            data: mail,
            queued_at: Utc::now(),
        }
    }
}

/// [`MailDispatcher`] that LPUSHes jobs onto a Redis list
pub struct RedisMailQueue {
    client: RedisClient,
    queue_name: String,
}

impl RedisMailQueue {
    /// Create a queue over an existing Redis client
    pub fn new(client: RedisClient, config: &MailConfig) -> Self {
        Self {
            client,
            queue_name: config.queue_name.clone(),
        }
    }
}

#[async_trait]
impl MailDispatcher for RedisMailQueue {
    async fn enqueue(&self, mail: MailMessage) -> DomainResult<()> {
        let job = MailJob::new(mail);
        let payload = serde_json::to_string(&job).map_err(InfrastructureError::Serialization)?;

        let length = self.client.lpush(&self.queue_name, &payload).await?;
        debug!(
            event = "mail_enqueued",
            job_id = %job.id,
            queue_depth = length
        );

        Ok(())
    }
}
