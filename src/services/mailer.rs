use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::config::EmailConfig;

/// Outbound email collaborator. Delivery failures are reported as `false`
/// and never propagate as errors.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_otp_email(&self, to: &str, code: &str, name: &str) -> bool;
    async fn send_password_reset_email(&self, to: &str, reset_url: &str, name: &str) -> bool;
}

// =============================================================================
// TEMPLATES
// =============================================================================

pub struct RenderedEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Bilingual OTP email: English first, Arabic second.
pub fn render_otp_email(code: &str, name: &str, ttl_secs: i64) -> RenderedEmail {
    let text = format!(
        "Hello {name},\n\nYour verification code is {code}. It expires in {ttl_secs} seconds.\n\n\
         مرحباً {name}،\n\nرمز التحقق الخاص بك هو {code}. تنتهي صلاحيته خلال {ttl_secs} ثانية."
    );
    let html = format!(
        "<div dir=\"ltr\"><p>Hello {name},</p><p>Your verification code is <strong>{code}</strong>. \
         It expires in {ttl_secs} seconds.</p></div>\
         <div dir=\"rtl\" lang=\"ar\"><p>مرحباً {name}،</p><p>رمز التحقق الخاص بك هو <strong>{code}</strong>. \
         تنتهي صلاحيته خلال {ttl_secs} ثانية.</p></div>"
    );

    RenderedEmail {
        subject: "Your verification code | رمز التحقق".to_string(),
        text,
        html,
    }
}

pub fn render_password_reset_email(reset_url: &str, name: &str) -> RenderedEmail {
    let text = format!(
        "Hello {name},\n\nUse the link below to reset your password. It is valid for one hour.\n{reset_url}\n\n\
         مرحباً {name}،\n\nاستخدم الرابط التالي لإعادة تعيين كلمة المرور. الرابط صالح لمدة ساعة واحدة.\n{reset_url}"
    );
    let html = format!(
        "<div dir=\"ltr\"><p>Hello {name},</p><p>Use the link below to reset your password. \
         It is valid for one hour.</p><p><a href=\"{reset_url}\">Reset password</a></p></div>\
         <div dir=\"rtl\" lang=\"ar\"><p>مرحباً {name}،</p><p>استخدم الرابط التالي لإعادة تعيين كلمة المرور. \
         الرابط صالح لمدة ساعة واحدة.</p><p><a href=\"{reset_url}\">إعادة تعيين كلمة المرور</a></p></div>"
    );

    RenderedEmail {
        subject: "Reset your password | إعادة تعيين كلمة المرور".to_string(),
        text,
        html,
    }
}

// =============================================================================
// HTTP PROVIDER
// =============================================================================

#[derive(Serialize)]
struct ProviderMessage<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

/// Sends through a transactional mail API that accepts
/// `{from, to, subject, text, html}` JSON with a bearer key.
pub struct HttpMailer {
    client: reqwest::Client,
    config: EmailConfig,
    otp_ttl_secs: i64,
}

impl HttpMailer {
    pub fn new(config: EmailConfig, otp_ttl_secs: i64) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            config,
            otp_ttl_secs,
        })
    }

    async fn deliver(&self, to: &str, email: RenderedEmail) -> bool {
        let message = ProviderMessage {
            from: &self.config.from,
            to: [to],
            subject: &email.subject,
            text: &email.text,
            html: &email.html,
        };

        let result = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&message)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::info!(to = %to, subject = %email.subject, "email dispatched");
                true
            }
            Ok(response) => {
                tracing::warn!(to = %to, status = %response.status(), "email provider rejected message");
                false
            }
            Err(e) => {
                tracing::warn!(to = %to, error = %e, "email dispatch failed");
                false
            }
        }
    }
}

#[async_trait]
impl EmailSender for HttpMailer {
    async fn send_otp_email(&self, to: &str, code: &str, name: &str) -> bool {
        self.deliver(to, render_otp_email(code, name, self.otp_ttl_secs))
            .await
    }

    async fn send_password_reset_email(&self, to: &str, reset_url: &str, name: &str) -> bool {
        self.deliver(to, render_password_reset_email(reset_url, name))
            .await
    }
}

/// Used when no provider is configured: nothing leaves the process.
pub struct LogMailer;

#[async_trait]
impl EmailSender for LogMailer {
    async fn send_otp_email(&self, to: &str, _code: &str, _name: &str) -> bool {
        tracing::warn!(to = %to, "no email provider configured, OTP email not sent");
        false
    }

    async fn send_password_reset_email(&self, to: &str, _reset_url: &str, _name: &str) -> bool {
        tracing::warn!(to = %to, "no email provider configured, reset email not sent");
        false
    }
}

// =============================================================================
// RECORDING MAILER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailKind {
    Otp,
    PasswordReset,
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub kind: EmailKind,
    /// OTP code or reset URL.
    pub payload: String,
    pub name: String,
}

/// Keeps every message in an outbox; can be switched to simulate outages.
#[derive(Default)]
pub struct MemoryMailer {
    outbox: Mutex<Vec<SentEmail>>,
    failing: AtomicBool,
}

impl MemoryMailer {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn outbox(&self) -> Vec<SentEmail> {
        self.outbox.lock().unwrap().clone()
    }

    pub fn last_otp_for(&self, email: &str) -> Option<String> {
        self.last_payload(email, EmailKind::Otp)
    }

    /// The `token` query parameter of the most recent reset link.
    pub fn last_reset_token_for(&self, email: &str) -> Option<String> {
        self.last_payload(email, EmailKind::PasswordReset)
            .and_then(|url| url.split("token=").nth(1).map(str::to_string))
    }

    fn last_payload(&self, email: &str, kind: EmailKind) -> Option<String> {
        self.outbox
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.to == email && m.kind == kind)
            .map(|m| m.payload.clone())
    }

    fn record(&self, to: &str, kind: EmailKind, payload: &str, name: &str) -> bool {
        if self.failing.load(Ordering::SeqCst) {
            return false;
        }
        self.outbox.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            kind,
            payload: payload.to_string(),
            name: name.to_string(),
        });
        true
    }
}

#[async_trait]
impl EmailSender for MemoryMailer {
    async fn send_otp_email(&self, to: &str, code: &str, name: &str) -> bool {
        self.record(to, EmailKind::Otp, code, name)
    }

    async fn send_password_reset_email(&self, to: &str, reset_url: &str, name: &str) -> bool {
        self.record(to, EmailKind::PasswordReset, reset_url, name)
    }
}
