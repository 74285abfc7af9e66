use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::info;

use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::modules::auth::{
    credentials::{normalize_email, CredentialStore},
    gate::AdminSession,
    model::AdminStatus,
    otp::{IssuePolicy, OtpService},
    password_reset::PasswordResetService,
    schema::{
        ChangePasswordRequest, ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest,
        LoginResponse, MeResponse, MessageResponse, RegisterRequest, RegisterResponse,
        ResendOtpRequest, ResendOtpResponse, ResetPasswordRequest, SessionUser, VerifyOtpRequest,
        VerifyOtpResponse,
    },
};
use crate::services::jwt::{expired_session_cookie, session_cookie, SessionSubject};
use crate::AppState;

const FORGOT_PASSWORD_MESSAGE: &str =
    "If an account exists for that email, a password reset link has been sent";

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let email = normalize_email(&req.email);

    let admin = CredentialStore::new(state.repos.accounts.as_ref())
        .create_admin(&req.name, &email, &req.password, AdminStatus::Pending)
        .await?;

    let dispatch = OtpService::from_state(&state)
        .issue(&admin.email, &admin.name, IssuePolicy::Supersede)
        .await?;

    let message = if dispatch.email_sent {
        "Registration successful, a verification code has been sent to your email"
    } else {
        "Registration successful, but the verification email could not be sent; request a new code"
    };

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message,
            email: admin.email,
            email_sent: dispatch.email_sent,
            otp_expires_in: dispatch.expires_in,
            debug_otp: state.settings.expose_debug_secrets.then_some(dispatch.code),
        }),
    ))
}

pub async fn verify_otp(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>> {
    let email = normalize_email(&req.email);
    let admin = OtpService::from_state(&state).verify(&email, &req.otp).await?;

    Ok(Json(VerifyOtpResponse {
        message: "Email verified, your account is awaiting super-admin approval",
        status: admin.status,
    }))
}

pub async fn resend_otp(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<ResendOtpRequest>,
) -> Result<Json<ResendOtpResponse>> {
    let email = normalize_email(&req.email);
    let dispatch = OtpService::from_state(&state).resend(&email).await?;

    Ok(Json(ResendOtpResponse {
        message: "A new verification code has been issued",
        email_sent: dispatch.email_sent,
        otp_expires_in: dispatch.expires_in,
        debug_otp: state.settings.expose_debug_secrets.then_some(dispatch.code),
    }))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let email = normalize_email(&req.email);
    let account = CredentialStore::new(state.repos.accounts.as_ref())
        .authenticate(&email, &req.password)
        .await?;

    match account.status() {
        AdminStatus::Approved => {}
        AdminStatus::Pending => {
            return Err(AppError::forbidden("Please verify your email before logging in"))
        }
        AdminStatus::Verified => {
            return Err(AppError::forbidden(
                "Your account is awaiting super-admin approval",
            ))
        }
        AdminStatus::Rejected => {
            return Err(AppError::forbidden("Your account has been rejected"))
        }
    }

    let subject = SessionSubject {
        user_id: account.id().to_string(),
        email: account.email().to_string(),
        name: account.name().to_string(),
        role: account.role(),
        status: account.status(),
    };
    let token = state.jwt_service.issue(&subject)?;
    let expires_in = state.jwt_service.session_duration_secs();

    info!(account_id = %subject.user_id, role = subject.role.as_str(), "login succeeded");

    let jar = jar.add(session_cookie(
        token.clone(),
        expires_in,
        state.settings.secure_cookies,
    ));

    Ok((
        jar,
        Json(LoginResponse {
            token,
            token_type: "Bearer",
            expires_in,
            user: SessionUser {
                id: subject.user_id,
                name: subject.name,
                email: subject.email,
                role: subject.role,
                status: subject.status,
            },
        }),
    ))
}

/// Sessions are stateless, so logging out only clears the cookie.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        jar.add(expired_session_cookie()),
        Json(MessageResponse {
            message: "Logged out",
        }),
    )
}

pub async fn me(AdminSession(identity): AdminSession) -> Json<MeResponse> {
    Json(MeResponse { user: identity })
}

pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<ForgotPasswordRequest>,
) -> Result<Json<ForgotPasswordResponse>> {
    let email = normalize_email(&req.email);
    let token = PasswordResetService::from_state(&state).request(&email).await?;

    Ok(Json(ForgotPasswordResponse {
        message: FORGOT_PASSWORD_MESSAGE,
        debug_token: token.filter(|_| state.settings.expose_debug_secrets),
    }))
}

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    PasswordResetService::from_state(&state)
        .reset(&req.token, &req.password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password has been reset, you can now log in",
    }))
}

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    AdminSession(identity): AdminSession,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>> {
    CredentialStore::new(state.repos.accounts.as_ref())
        .change_password(&identity, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password changed",
    }))
}
