//! Identity-toolkit REST client.
//!
//! Every call is `POST <base>/v1/accounts:<method>?key=<api key>` with a
//! JSON body. Errors come back as `{"error": {"message": "CODE"}}`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{Account, Authenticator};
use crate::core::config::ServerConfig;
use crate::error::{AuthError, Result, StoreError};

const PRODUCTION_BASE: &str = "https://identitytoolkit.googleapis.com";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenReply {
    local_id: String,
    #[serde(default)]
    email: String,
    id_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    #[serde(default)]
    email_verified: bool,
}

#[derive(Debug, Deserialize)]
struct LookupReply {
    #[serde(default)]
    users: Vec<LookupUser>,
}

/// [`Authenticator`] over the identity-toolkit v1 API.
#[derive(Debug, Clone)]
pub struct FirebaseAuth {
    client: Client,
    base: String,
    api_key: String,
}

impl FirebaseAuth {
    /// Client for the configured project, or its auth emulator when set.
    pub fn new(config: &ServerConfig, timeout: Duration) -> Result<Self> {
        let base = match &config.auth_emulator {
            Some(emulator) => format!(
                "{}/identitytoolkit.googleapis.com",
                emulator.trim_end_matches('/')
            ),
            None => PRODUCTION_BASE.to_string(),
        };
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base,
            api_key: config.api_key.clone(),
        })
    }

    /// Endpoint URL for an `accounts:<method>` call.
    pub fn endpoint(&self, method: &str) -> String {
        format!("{}/v1/accounts:{}?key={}", self.base, method, self.api_key)
    }

    fn call<T: DeserializeOwned>(&self, method: &str, body: &Value) -> Result<T> {
        debug!(method, "auth request");
        let response = self
            .client
            .post(self.endpoint(method))
            .json(body)
            .send()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| StoreError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(AuthError::Rejected(error_message(&text)).into());
        }
        serde_json::from_str(&text).map_err(|e| {
            StoreError::Malformed {
                path: format!("accounts:{}", method),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn email_verified(&self, id_token: &str) -> Result<bool> {
        let reply: LookupReply = self.call("lookup", &json!({ "idToken": id_token }))?;
        Ok(reply.users.first().map(|u| u.email_verified).unwrap_or(false))
    }
}

/// Human-readable form of an identity-toolkit error body.
fn error_message(body: &str) -> String {
    let code = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());

    // Codes may carry detail after a colon: "WEAK_PASSWORD : Password should be..."
    let head = code.split(':').next().unwrap_or_default().trim();
    match head {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "invalid email or password".to_string()
        }
        "EMAIL_EXISTS" => "email already registered".to_string(),
        "USER_DISABLED" => "account disabled".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "too many attempts, try again later".to_string(),
        "WEAK_PASSWORD" => "password rejected as too weak".to_string(),
        "INVALID_ID_TOKEN" | "TOKEN_EXPIRED" | "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => {
            "session expired, log in again".to_string()
        }
        _ => code,
    }
}

impl Authenticator for FirebaseAuth {
    fn sign_in(&self, email: &str, password: &str) -> Result<Account> {
        let reply: TokenReply = self.call(
            "signInWithPassword",
            &json!({ "email": email, "password": password, "returnSecureToken": true }),
        )?;
        let email_verified = self.email_verified(&reply.id_token)?;
        Ok(Account {
            uid: reply.local_id,
            email: if reply.email.is_empty() {
                email.to_string()
            } else {
                reply.email
            },
            email_verified,
            id_token: reply.id_token,
        })
    }

    fn sign_up(&self, email: &str, password: &str) -> Result<Account> {
        let reply: TokenReply = self.call(
            "signUp",
            &json!({ "email": email, "password": password, "returnSecureToken": true }),
        )?;
        Ok(Account {
            uid: reply.local_id,
            email: email.to_string(),
            email_verified: false,
            id_token: reply.id_token,
        })
    }

    fn send_verification(&self, account: &Account) -> Result<()> {
        let _: Value = self.call(
            "sendOobCode",
            &json!({ "requestType": "VERIFY_EMAIL", "idToken": account.id_token }),
        )?;
        Ok(())
    }

    fn change_password(&self, account: &Account, new_password: &str) -> Result<()> {
        let _: Value = self.call(
            "update",
            &json!({
                "idToken": account.id_token,
                "password": new_password,
                "returnSecureToken": true
            }),
        )?;
        Ok(())
    }
}
