// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Decoding of the backend's `{ success, code, message, data, timestamp }` wrapper.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;
use crate::models::TransactionRecord;

/// Turns an HTTP status and raw body into the payload or a typed rejection.
///
/// Non-2xx statuses are rejections whatever the body says. A 2xx body carrying a
/// boolean `success` is read as an envelope and `data` is decoded into `T` (an
/// absent `data` decodes as `null`). Any other 2xx body is decoded into `T` whole.
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let parsed: Option<Value> = if body.trim().is_empty() {
        None
    } else {
        serde_json::from_str(body).ok()
    };

    if !(200..300).contains(&status) {
        return Err(rejection(Some(status), parsed.as_ref()));
    }

    let parsed = parsed.unwrap_or(Value::Null);
    match parsed {
        Value::Object(ref obj) if obj.get("success").is_some_and(Value::is_boolean) => {
            if obj.get("success") == Some(&Value::Bool(false)) {
                return Err(rejection(None, Some(&parsed)));
            }
            let data = obj.get("data").cloned().unwrap_or(Value::Null);
            Ok(serde_json::from_value(data)?)
        }
        other => Ok(serde_json::from_value(other)?),
    }
}

fn rejection(status: Option<u16>, body: Option<&Value>) -> ApiError {
    let field = |name: &str| {
        body.and_then(|v| v.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let message = field("message").unwrap_or_else(|| match status {
        Some(s) => format!("HTTP {}", s),
        None => "Request was not successful".to_string(),
    });
    let code = field("code").unwrap_or_else(|| match status {
        Some(s) => format!("HTTP_{}", s),
        None => "UNKNOWN".to_string(),
    });
    ApiError::Rejected {
        status,
        code,
        message,
    }
}

/// Transaction listings come either as a bare array or paged under `items`.
/// Anything else is an empty listing.
pub fn transaction_records(data: Value) -> Result<Vec<TransactionRecord>, ApiError> {
    let items = match data {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut obj) => match obj.remove("items") {
            Some(items @ Value::Array(_)) => items,
            _ => return Ok(Vec::new()),
        },
        _ => return Ok(Vec::new()),
    };
    Ok(serde_json::from_value(items)?)
}
