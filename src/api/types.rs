use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Successful login response: the opaque bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub key: String,
}

/// Body of `POST /wallets/{id}/topup/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TopUpRequest {
    pub sum: rust_decimal::Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_serializes() {
        let body = serde_json::to_string(&LoginRequest::new("johnwick", "secret")).unwrap();
        assert_eq!(body, r#"{"username":"johnwick","password":"secret"}"#);
    }

    #[test]
    fn test_login_response_deserializes() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"key": "9c53a367b6f5b7a1"}"#).unwrap();
        assert_eq!(response.key, "9c53a367b6f5b7a1");
    }
}
