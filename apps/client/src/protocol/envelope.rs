use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;

/// Encode one application event as a two-element JSON array.
pub fn encode_envelope<P: Serialize + ?Sized>(
    event: &str,
    payload: &P,
) -> Result<String, ClientError> {
    Ok(serde_json::to_string(&(event, payload))?)
}

/// Split a raw frame into its event name and untouched payload.
pub fn decode_envelope(raw: &str) -> Result<(String, Value), ClientError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Array(items) = value else {
        return Err(ClientError::malformed("envelope is not an array"));
    };
    let Ok([name, payload]) = <[Value; 2]>::try_from(items) else {
        return Err(ClientError::malformed("envelope must have exactly two elements"));
    };
    let Value::String(name) = name else {
        return Err(ClientError::malformed("event name is not a string"));
    };
    Ok((name, payload))
}
