//! Signup, login and password-reset routes.

use super::common::*;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/password-reset", post(request_password_reset))
        .route("/password-reset/confirm", post(confirm_password_reset))
}

#[derive(Deserialize)]
struct SignupPayload {
    name: String,
    email: String,
    password: String,
}

#[derive(Serialize)]
struct UserResponse {
    id: Uuid,
    name: String,
    email: String,
}

/// POST /auth/signup
async fn signup(
    State(app_state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> AppResult<impl IntoResponse> {
    let user = app_state
        .auth_use_cases
        .signup(&payload.name, &payload.email, &payload.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
        }),
    ))
}

#[derive(Deserialize)]
struct LoginPayload {
    email: String,
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    token: String,
}

/// POST /auth/login
async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<impl IntoResponse> {
    let token = app_state
        .auth_use_cases
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(LoginResponse { token }))
}

/// POST /auth/logout
///
/// Sessions are stateless JWTs, so there is nothing to revoke server-side;
/// the client simply discards its token.
async fn logout() -> impl IntoResponse {
    Json(MessageResponse::new("Logout successful"))
}

#[derive(Deserialize)]
struct PasswordResetPayload {
    email: String,
}

/// POST /auth/password-reset
async fn request_password_reset(
    State(app_state): State<AppState>,
    Json(payload): Json<PasswordResetPayload>,
) -> AppResult<impl IntoResponse> {
    app_state
        .auth_use_cases
        .request_password_reset(&payload.email)
        .await?;
    Ok(Json(MessageResponse::new("Password reset email sent")))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmResetPayload {
    token: String,
    new_password: String,
}

/// POST /auth/password-reset/confirm
async fn confirm_password_reset(
    State(app_state): State<AppState>,
    Json(payload): Json<ConfirmResetPayload>,
) -> AppResult<impl IntoResponse> {
    app_state
        .auth_use_cases
        .confirm_password_reset(&payload.token, &payload.new_password)
        .await?;
    Ok(Json(MessageResponse::new("Password reset successful")))
}
