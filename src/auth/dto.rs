use serde::Deserialize;

/// Body for `POST /auth/register`. No format or complexity checks are applied
/// at this boundary; email uniqueness is enforced by the store.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST /auth/activate`.
#[derive(Debug, Deserialize)]
pub struct ActivationRequest {
    pub email: String,
}
