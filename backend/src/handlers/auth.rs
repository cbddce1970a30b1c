use actix_web::{web, HttpResponse, Result};
use rental_platform_shared::{
    AuthResponse, LoginRequest, UserRole, ERROR_INVALID_CREDENTIALS, JWT_ACCESS_TOKEN_EXPIRY,
};
use tracing::{info, warn};
use validator::Validate;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::utils::JwtService;

/// Admin login. The single admin account is provisioned through
/// configuration; a bcrypt check against the stored hash gates the
/// token. Both wrong-email and wrong-password fail identically.
pub async fn login(
    request: web::Json<LoginRequest>,
    config: web::Data<AppConfig>,
    jwt_service: web::Data<JwtService>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let email = request.email.to_lowercase();
    if email != config.admin_email.to_lowercase() {
        warn!(%email, "login attempt for unknown account");
        return Err(AppError::Authentication(
            ERROR_INVALID_CREDENTIALS.to_string(),
        ));
    }

    let valid = bcrypt::verify(&request.password, &config.admin_password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

    if !valid {
        warn!(%email, "login attempt with wrong password");
        return Err(AppError::Authentication(
            ERROR_INVALID_CREDENTIALS.to_string(),
        ));
    }

    let access_token = jwt_service.generate_access_token(email.clone(), UserRole::Admin)?;

    info!(%email, "admin logged in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token,
        role: UserRole::Admin,
        expires_in: JWT_ACCESS_TOKEN_EXPIRY.as_secs() as i64,
    }))
}
