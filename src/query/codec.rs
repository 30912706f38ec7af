//! URL-safe transport of queries: base64 over compact JSON.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};

use serde::de::DeserializeOwned;

use crate::errors::QueryError;
use crate::value::Value;

use super::types::FindQuery;

/// Base64 of the query's compact JSON.
#[must_use]
pub fn encode(query: &FindQuery) -> String {
    match serde_json::to_value(query) {
        Ok(json) => encode_json(&json),
        Err(e) => {
            log::error!("query encode failed: {e}");
            encode_json(&serde_json::json!({ "where": {} }))
        }
    }
}

/// Base64 of any JSON value; the untyped counterpart of [`encode`].
#[must_use]
pub fn encode_json(json: &serde_json::Value) -> String {
    STANDARD.encode(json.to_string())
}

/// Decode a query, falling back to `{ where: {} }` on any failure.
#[must_use]
pub fn decode(encoded: &str) -> FindQuery {
    try_decode(encoded).unwrap_or_else(|e| {
        report(&e);
        FindQuery::default()
    })
}

/// Decode to raw JSON, keeping fields [`FindQuery`] does not model.
#[must_use]
pub fn decode_json(encoded: &str) -> serde_json::Value {
    try_decode_json(encoded).unwrap_or_else(|e| {
        report(&e);
        serde_json::json!({ "where": {} })
    })
}

/// Decode a query. Only transport failures and a missing `where` are errors; a malformed
/// `orderBy`, `distinct`, `skip`, `take` or `pagination` is dropped with a warning.
pub fn try_decode(encoded: &str) -> Result<FindQuery, QueryError> {
    let json = try_decode_json(encoded)?;
    let mut query = FindQuery::new(json.get("where").cloned().map_or_else(Value::record, Value::from));
    query.order_by = field(&json, "orderBy");
    query.distinct = field(&json, "distinct");
    query.skip = field(&json, "skip");
    query.take = field(&json, "take");
    query.pagination = field(&json, "pagination");
    Ok(query)
}

/// A present and well-typed field. `null` reads as absent.
fn field<T: DeserializeOwned>(json: &serde_json::Value, key: &str) -> Option<T> {
    let raw = json.get(key).filter(|v| !v.is_null())?;
    match serde_json::from_value(raw.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("query field `{key}` ignored: {e}");
            let error = e.to_string();
            crate::utils::devlog::event("codec_field_dropped", &[("field", key), ("error", error.as_str())]);
            None
        }
    }
}

pub fn try_decode_json(encoded: &str) -> Result<serde_json::Value, QueryError> {
    let bytes = decode_base64(encoded.trim())?;
    let json: serde_json::Value = serde_json::from_str(&String::from_utf8(bytes)?)?;
    if json.get("where").is_none() {
        return Err(QueryError::MissingWhere);
    }
    Ok(json)
}

/// Standard or URL-safe alphabet, padded or not.
fn decode_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD
        .decode(s)
        .or_else(|e| STANDARD_NO_PAD.decode(s).map_err(|_| e))
        .or_else(|e| URL_SAFE.decode(s).map_err(|_| e))
        .or_else(|e| URL_SAFE_NO_PAD.decode(s).map_err(|_| e))
}

fn report(e: &QueryError) {
    log::error!("query decode failed, using empty where: {e}");
    crate::utils::devlog::event("codec_fallback", &[("error", e.to_string().as_str())]);
}
