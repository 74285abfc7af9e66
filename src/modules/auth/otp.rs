use chrono::{Duration, Utc};
use rand::Rng;
use tracing::{info, instrument, warn};

use super::interface::{AccountRepository, OtpRepository};
use super::model::{AdminAccount, AdminStatus, OtpChallenge};
use crate::config::AuthSettings;
use crate::error::{AppError, Result};
use crate::services::hashing::{constant_time_eq, keyed_digest};
use crate::services::mailer::EmailSender;
use crate::AppState;

pub const OTP_DIGITS: usize = 6;

/// Wrong guesses allowed per code before it is discarded.
pub const MAX_OTP_ATTEMPTS: i32 = 5;

/// How `issue` treats an existing, still-valid challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuePolicy {
    /// Replace whatever is there.
    Supersede,
    /// Refuse with `AlreadyValid` until the previous code has lapsed.
    RequireLapsed,
}

#[derive(Debug)]
pub struct OtpDispatch {
    pub code: String,
    pub email_sent: bool,
    pub expires_in: i64,
}

/// Uniform over 000000..=999999.
pub fn generate_code() -> String {
    let n: u32 = rand::rng().random_range(0..1_000_000);
    format!("{n:0width$}", width = OTP_DIGITS)
}

pub struct OtpService<'a> {
    otps: &'a dyn OtpRepository,
    accounts: &'a dyn AccountRepository,
    mailer: &'a dyn EmailSender,
    pepper: &'a str,
    ttl: Duration,
}

impl<'a> OtpService<'a> {
    pub fn new(
        otps: &'a dyn OtpRepository,
        accounts: &'a dyn AccountRepository,
        mailer: &'a dyn EmailSender,
        settings: &'a AuthSettings,
    ) -> Self {
        Self {
            otps,
            accounts,
            mailer,
            pepper: &settings.hash_pepper,
            ttl: settings.otp_ttl,
        }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(
            state.repos.otps.as_ref(),
            state.repos.accounts.as_ref(),
            state.mailer.as_ref(),
            &state.settings,
        )
    }

    fn digest(&self, email: &str, code: &str) -> String {
        keyed_digest(self.pepper, email, code)
    }

    #[instrument(skip_all, fields(email = %email, policy = ?policy))]
    pub async fn issue(&self, email: &str, name: &str, policy: IssuePolicy) -> Result<OtpDispatch> {
        let now = Utc::now();

        if policy == IssuePolicy::RequireLapsed {
            if let Some(existing) = self.otps.find(email).await? {
                if existing.expires_at > now {
                    return Err(AppError::AlreadyValid {
                        retry_after_secs: (existing.expires_at - now).num_seconds().max(1),
                    });
                }
            }
        }

        let code = generate_code();
        let challenge = OtpChallenge {
            email: email.to_string(),
            otp_hash: self.digest(email, &code),
            attempts: 0,
            expires_at: now + self.ttl,
            created_at: now,
        };
        self.otps.upsert(&challenge).await?;

        // The challenge stands even if delivery fails.
        let email_sent = self.mailer.send_otp_email(email, &code, name).await;
        if !email_sent {
            warn!("OTP email was not delivered");
        }

        Ok(OtpDispatch {
            code,
            email_sent,
            expires_in: self.ttl.num_seconds(),
        })
    }

    /// Reissue for a `pending` admin once the previous code has lapsed.
    pub async fn resend(&self, email: &str) -> Result<OtpDispatch> {
        let admin = self
            .accounts
            .find_admin_by_email(email)
            .await?
            .ok_or(AppError::NotFound("Admin"))?;

        if admin.status != AdminStatus::Pending {
            return Err(AppError::NotRequired);
        }

        self.issue(email, &admin.name, IssuePolicy::RequireLapsed).await
    }

    /// `NotFound -> Expired -> Mismatch -> NotRequired`, then `pending -> verified`.
    /// Every comparison spends one of `MAX_OTP_ATTEMPTS`; the code is
    /// discarded with the last wrong guess.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn verify(&self, email: &str, code: &str) -> Result<AdminAccount> {
        let challenge = self
            .otps
            .find(email)
            .await?
            .ok_or(AppError::NotFound("Verification code"))?;

        if challenge.expires_at <= Utc::now() {
            return Err(AppError::Expired);
        }

        if !self.otps.consume_attempt(email, MAX_OTP_ATTEMPTS).await? {
            self.otps.delete(email).await?;
            return Err(AppError::AttemptsExhausted);
        }

        let presented = self.digest(email, code.trim());
        if !constant_time_eq(presented.as_bytes(), challenge.otp_hash.as_bytes()) {
            if challenge.attempts + 1 >= MAX_OTP_ATTEMPTS {
                self.otps.delete(email).await?;
                warn!("OTP discarded after too many incorrect attempts");
                return Err(AppError::AttemptsExhausted);
            }
            return Err(AppError::Mismatch);
        }

        let admin = self
            .accounts
            .find_admin_by_email(email)
            .await?
            .ok_or(AppError::NotFound("Admin"))?;

        self.otps.delete(email).await?;

        if admin.status != AdminStatus::Pending {
            return Err(AppError::NotRequired);
        }

        if !self
            .accounts
            .update_admin_status(&admin.id, AdminStatus::Verified, None)
            .await?
        {
            return Err(AppError::NotFound("Admin"));
        }

        info!(admin_id = %admin.id, "admin email verified");
        Ok(AdminAccount {
            status: AdminStatus::Verified,
            ..admin
        })
    }
}
