//! Typed resource APIs over the authenticated client.
//!
//! Backend responses arrive wrapped in `{ success, message, data }`; some
//! endpoints reply flat. `envelope_data` handles both shapes, and list
//! endpoints treat `data: null` as an empty collection.

pub mod announcements;
pub mod auth;
pub mod banners;
pub mod campaigns;
pub mod categories;
pub mod products;
pub mod upload;
pub mod users;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::error::ClientError;

/// Unwrap the response envelope, falling back to the body itself for
/// endpoints that reply without one.
pub(crate) fn envelope_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(envelope_data(value)).map_err(|e| ClientError::Payload(e.to_string()))
}

pub(crate) fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ClientError> {
    match envelope_data(value) {
        Value::Null => Ok(Vec::new()),
        payload => {
            serde_json::from_value(payload).map_err(|e| ClientError::Payload(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_data_prefers_nested_payload() {
        let value = json!({"success": true, "message": "ok", "data": {"x": 1}});
        assert_eq!(envelope_data(value), json!({"x": 1}));
    }

    #[test]
    fn test_envelope_data_falls_back_to_flat_body() {
        let value = json!({"accessToken": "t", "user": null});
        assert_eq!(envelope_data(value.clone()), value);
    }

    #[test]
    fn test_decode_list_maps_null_to_empty() {
        let items: Vec<i32> = decode_list(json!({"success": true, "data": null})).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_decode_list_rejects_wrong_shape() {
        let result: Result<Vec<i32>, _> = decode_list(json!({"data": "oops"}));
        assert!(result.is_err());
    }
}
