// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking client for the Chitieu REST backend.

pub mod envelope;

use std::fmt;
use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{
    Category, CategoryRequest, TransactionRecord, TransactionRequest, User, Wallet,
    WalletOverview, WalletRequest,
};
use crate::range::DateRange;
use crate::utils::{http_client, DEFAULT_TIMEOUT};

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Could not reach the server: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message} ({code})")]
    Rejected {
        status: Option<u16>,
        code: String,
        message: String,
    },
    #[error("Unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Not logged in; run `chitieu auth login` first")]
    Unauthenticated,
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Bearer token issued by `/auth/login`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Credential(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub credential: Option<Credential>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            credential: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LoginData {
    Bare(String),
    Wrapped {
        #[serde(alias = "accessToken", alias = "jwt")]
        token: String,
    },
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    credential: Option<Credential>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        Ok(Self {
            http: http_client(config.timeout)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credential: config.credential,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(%method, %url, "api request");
        self.http.request(method, url)
    }

    fn authed(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let cred = self.credential.as_ref().ok_or(ApiError::Unauthenticated)?;
        Ok(self.request(method, path).bearer_auth(cred.token()))
    }

    fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> ApiResult<T> {
        let resp = req.send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        debug!(status, bytes = body.len(), "api response");
        envelope::decode(status, &body)
    }

    pub fn login(&self, username: &str, password: &str) -> ApiResult<Credential> {
        let req = self
            .request(Method::POST, "/auth/login")
            .json(&LoginRequest { username, password });
        let token = match self.execute::<LoginData>(req)? {
            LoginData::Bare(t) | LoginData::Wrapped { token: t } => t,
        };
        Ok(Credential::new(token))
    }

    pub fn register(&self, email: &str, username: &str, password: &str) -> ApiResult<()> {
        let req = self.request(Method::POST, "/auth/register").json(&RegisterRequest {
            email,
            username,
            password,
        });
        self.execute::<Value>(req)?;
        Ok(())
    }

    pub fn profile(&self) -> ApiResult<User> {
        self.execute(self.authed(Method::GET, "/auth/userdetail")?)
    }

    pub fn categories(&self) -> ApiResult<Vec<Category>> {
        let list: Option<Vec<Category>> = self.execute(self.authed(Method::GET, "/categories")?)?;
        Ok(list.unwrap_or_default())
    }

    pub fn create_category(&self, req: &CategoryRequest) -> ApiResult<Category> {
        let form = json_form(req)?;
        self.execute(self.authed(Method::POST, "/users/categories")?.multipart(form))
    }

    pub fn delete_category(&self, id: i64) -> ApiResult<()> {
        let path = format!("/users/categories/{}", id);
        self.execute::<Value>(self.authed(Method::DELETE, &path)?)?;
        Ok(())
    }

    pub fn wallets(&self) -> ApiResult<Vec<Wallet>> {
        let list: Option<Vec<Wallet>> = self.execute(self.authed(Method::GET, "/wallets")?)?;
        Ok(list.unwrap_or_default())
    }

    pub fn create_wallet(&self, req: &WalletRequest) -> ApiResult<Wallet> {
        let form = json_form(req)?;
        self.execute(self.authed(Method::POST, "/wallets")?.multipart(form))
    }

    pub fn delete_wallet(&self, id: i64) -> ApiResult<()> {
        let path = format!("/wallets/{}", id);
        self.execute::<Value>(self.authed(Method::DELETE, &path)?)?;
        Ok(())
    }

    pub fn wallet_overview(&self) -> ApiResult<WalletOverview> {
        let raw: Option<WalletOverview> =
            self.execute(self.authed(Method::GET, "/wallets/overview")?)?;
        Ok(raw.unwrap_or_default())
    }

    pub fn create_transaction(&self, req: &TransactionRequest) -> ApiResult<Value> {
        self.execute(self.authed(Method::POST, "/transactions")?.json(req))
    }

    /// Lists the user's transactions, optionally limited to `range`.
    ///
    /// Records with a negative amount are dropped here so the aggregates only ever
    /// see non-negative amounts.
    pub fn fetch_transactions(&self, range: Option<&DateRange>) -> ApiResult<Vec<TransactionRecord>> {
        let mut req = self.authed(Method::GET, "/transactions/user")?;
        if let Some(r) = range {
            req = req.query(&transaction_query(r));
        }
        let data: Value = self.execute(req)?;
        Ok(retain_valid(envelope::transaction_records(data)?))
    }
}

/// Query parameters for a range; both dates are inclusive.
pub fn transaction_query(range: &DateRange) -> Vec<(&'static str, String)> {
    let (start, end) = range.query_dates();
    vec![("startDate", start), ("endDate", end)]
}

pub fn retain_valid(records: Vec<TransactionRecord>) -> Vec<TransactionRecord> {
    records
        .into_iter()
        .filter(|t| {
            let ok = !t.amount.is_sign_negative() || t.amount.is_zero();
            if !ok {
                warn!(id = t.id, amount = %t.amount, "dropping transaction with negative amount");
            }
            ok
        })
        .collect()
}

// The backend reads create payloads from a multipart `data` part.
fn json_form<T: Serialize>(payload: &T) -> ApiResult<Form> {
    let body = serde_json::to_string(payload)?;
    let part = Part::text(body)
        .file_name("data.json")
        .mime_str("application/json")?;
    Ok(Form::new().part("data", part))
}
