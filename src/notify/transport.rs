//! Outbound notification transports
//!
//! Push, SMS and mail each sit behind an async trait object so the
//! orchestrator can be exercised with in-memory fakes. The production
//! implementations are thin HTTP clients.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::core_types::{BookingId, UserId};

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Transport request failed: {0}")]
    Http(String),

    #[error("Transport rejected the message: status {0}")]
    Rejected(u16),
}

impl From<reqwest::Error> for NotifyError {
    fn from(e: reqwest::Error) -> Self {
        NotifyError::Http(e.to_string())
    }
}

/// Push alert sound class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PushSound {
    EmergencyBooking,
    NormalBooking,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushMessage {
    pub booking_id: BookingId,
    /// Routing tag for the mobile client, e.g. "suitable_job".
    pub notification_type: String,
    pub body: String,
    pub sound: PushSound,
    /// When set, the provider holds delivery until this instant.
    pub deliver_after: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub to_name: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn send(&self, recipients: &[UserId], message: &PushMessage) -> Result<(), NotifyError>;
}

#[async_trait]
pub trait SmsTransport: Send + Sync {
    async fn send(&self, to_mobile: &str, body: &str) -> Result<(), NotifyError>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), NotifyError>;
}

/// OneSignal-style push gateway client
pub struct HttpPushTransport {
    client: reqwest::Client,
    endpoint: String,
    app_id: String,
    rest_key: String,
}

impl HttpPushTransport {
    pub fn new(endpoint: String, app_id: String, rest_key: String) -> Self {
        HttpPushTransport {
            client: reqwest::Client::new(),
            endpoint,
            app_id,
            rest_key,
        }
    }
}

#[derive(Serialize)]
struct PushRequest<'a> {
    app_id: &'a str,
    include_external_user_ids: Vec<String>,
    contents: serde_json::Value,
    data: &'a PushMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    send_after: Option<String>,
    ios_sound: String,
    android_sound: String,
}

#[async_trait]
impl PushTransport for HttpPushTransport {
    async fn send(&self, recipients: &[UserId], message: &PushMessage) -> Result<(), NotifyError> {
        if recipients.is_empty() {
            return Ok(());
        }
        let sound = match message.sound {
            PushSound::EmergencyBooking => "emergency_booking",
            PushSound::NormalBooking => "normal_booking",
        };
        let req = PushRequest {
            app_id: &self.app_id,
            include_external_user_ids: recipients.iter().map(|id| id.to_string()).collect(),
            contents: serde_json::json!({ "en": message.body }),
            data: message,
            send_after: message.deliver_after.map(|t| t.to_rfc3339()),
            ios_sound: format!("{sound}.mp3"),
            android_sound: sound.to_string(),
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Basic {}", self.rest_key))
            .json(&req)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(NotifyError::Rejected(resp.status().as_u16()));
        }
        Ok(())
    }
}

/// SMS gateway client posting one message per recipient
pub struct HttpSmsTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    sender: String,
}

impl HttpSmsTransport {
    pub fn new(endpoint: String, api_key: String, sender: String) -> Self {
        HttpSmsTransport {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
            sender,
        }
    }
}

#[async_trait]
impl SmsTransport for HttpSmsTransport {
    async fn send(&self, to_mobile: &str, body: &str) -> Result<(), NotifyError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "from": self.sender,
                "to": to_mobile,
                "message": body,
            }))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(NotifyError::Rejected(resp.status().as_u16()));
        }
        Ok(())
    }
}

/// Mail relay client
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    from_address: String,
    from_name: String,
}

impl HttpMailer {
    pub fn new(endpoint: String, from_address: String, from_name: String) -> Self {
        HttpMailer {
            client: reqwest::Client::new(),
            endpoint,
            from_address,
            from_name,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "from": { "address": self.from_address, "name": self.from_name },
                "to": { "address": email.to, "name": email.to_name },
                "subject": email.subject,
                "body": email.body,
            }))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(NotifyError::Rejected(resp.status().as_u16()));
        }
        Ok(())
    }
}

/// In-memory transports recording every message, for tests.
#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockPush {
        pub sent: Mutex<Vec<(Vec<UserId>, PushMessage)>>,
    }

    #[async_trait]
    impl PushTransport for MockPush {
        async fn send(
            &self,
            recipients: &[UserId],
            message: &PushMessage,
        ) -> Result<(), NotifyError> {
            self.sent
                .lock()
                .unwrap()
                .push((recipients.to_vec(), message.clone()));
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct MockSms {
        pub sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl SmsTransport for MockSms {
        async fn send(&self, to_mobile: &str, body: &str) -> Result<(), NotifyError> {
            self.sent
                .lock()
                .unwrap()
                .push((to_mobile.to_string(), body.to_string()));
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct MockMailer {
        pub sent: Mutex<Vec<Email>>,
    }

    #[async_trait]
    impl Mailer for MockMailer {
        async fn send(&self, email: &Email) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }
}
