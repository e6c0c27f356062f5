use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use super::types::CursorData;

// Only round-trip fidelity is promised; the byte format is not a contract.
pub fn encode_cursor(data: &CursorData) -> String {
    let payload = serde_json::to_string(data).expect("cursor payload serializes");
    URL_SAFE_NO_PAD.encode(payload)
}

pub fn decode_cursor(cursor: &str) -> Option<CursorData> {
    let bytes = URL_SAFE_NO_PAD.decode(cursor).ok()?;
    let payload = String::from_utf8(bytes).ok()?;
    let value: serde_json::Value = serde_json::from_str(&payload).ok()?;
    // Derive would also accept a sequence for the struct; only an object
    // counts as a well-formed token.
    if !value.is_object() {
        return None;
    }
    let data: CursorData = serde_json::from_value(value).ok()?;
    if data.last_id.is_empty() {
        return None;
    }
    Some(data)
}
