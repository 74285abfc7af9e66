use chrono::{Duration, Utc};
use tracing::{debug, info, instrument, warn};

use super::credentials::{hash_password, CredentialStore};
use super::interface::{AccountRepository, PasswordResetRepository};
use super::model::PasswordResetChallenge;
use crate::config::AuthSettings;
use crate::error::{AppError, Result};
use crate::services::hashing::{generate_secret_token, hash_token};
use crate::services::mailer::EmailSender;
use crate::AppState;

pub struct PasswordResetService<'a> {
    resets: &'a dyn PasswordResetRepository,
    accounts: &'a dyn AccountRepository,
    mailer: &'a dyn EmailSender,
    settings: &'a AuthSettings,
}

impl<'a> PasswordResetService<'a> {
    pub fn new(
        resets: &'a dyn PasswordResetRepository,
        accounts: &'a dyn AccountRepository,
        mailer: &'a dyn EmailSender,
        settings: &'a AuthSettings,
    ) -> Self {
        Self {
            resets,
            accounts,
            mailer,
            settings,
        }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(
            state.repos.resets.as_ref(),
            state.repos.accounts.as_ref(),
            state.mailer.as_ref(),
            &state.settings,
        )
    }

    fn ttl(&self) -> Duration {
        self.settings.reset_ttl
    }

    /// Issues a reset challenge when `email` belongs to an account. The
    /// plaintext token is returned so development builds can echo it;
    /// callers must respond identically either way.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn request(&self, email: &str) -> Result<Option<String>> {
        let Some(account) = CredentialStore::new(self.accounts).find_by_email(email).await? else {
            debug!("password reset requested for unknown email");
            return Ok(None);
        };

        let token = generate_secret_token();
        let now = Utc::now();
        let challenge = PasswordResetChallenge {
            email: account.email().to_string(),
            token_hash: hash_token(&token),
            expires_at: now + self.ttl(),
            created_at: now,
        };
        self.resets.upsert(&challenge).await?;

        let reset_url = self.settings.reset_url(&token);
        if !self
            .mailer
            .send_password_reset_email(account.email(), &reset_url, account.name())
            .await
        {
            warn!("password reset email was not delivered");
        }

        info!(account_id = %account.id(), "password reset challenge issued");
        Ok(Some(token))
    }

    /// Consumes the challenge matching `token` and stores `new_password`.
    /// The new hash is computed before the challenge is claimed, and a
    /// failed write puts the challenge back, so only a completed reset
    /// spends the token.
    #[instrument(skip_all)]
    pub async fn reset(&self, token: &str, new_password: &str) -> Result<()> {
        let token_hash = hash_token(token.trim());
        let challenge = self
            .resets
            .find_by_token_hash(&token_hash)
            .await?
            .ok_or(AppError::InvalidOrExpired)?;

        if challenge.expires_at <= Utc::now() {
            self.resets.claim(&challenge.email, &token_hash).await?;
            return Err(AppError::InvalidOrExpired);
        }

        let store = CredentialStore::new(self.accounts);
        let Some(account) = store.find_by_email(&challenge.email).await? else {
            self.resets.claim(&challenge.email, &token_hash).await?;
            warn!(email = %challenge.email, "reset token outlived its account");
            return Err(AppError::InvalidOrExpired);
        };
        let password_hash = hash_password(new_password).await?;

        if !self.resets.claim(&challenge.email, &token_hash).await? {
            return Err(AppError::InvalidOrExpired);
        }

        if let Err(err) = store.store_password_hash(&account, &password_hash).await {
            if let Err(restore) = self.resets.upsert(&challenge).await {
                warn!(error = %restore, "could not restore reset challenge");
            }
            return Err(match err {
                AppError::NotFound(_) => AppError::InvalidOrExpired,
                other => other,
            });
        }

        info!(email = %challenge.email, "password reset completed");
        Ok(())
    }
}
