//! Inbound payload checks.

use serde_json::Value;

use crate::{error::Rejection, model::ForecastRequest};

const REQUIRED_FIELDS: [&str; 3] = ["token", "location", "requester_name"];

/// Check an inbound payload and the shared token.
///
/// Required fields are checked in order and the first absent (or `null`) one
/// is reported; the token is compared only once all of them are present.
/// `date` is carried through unchecked.
pub fn validate(payload: &Value, expected_token: &str) -> Result<ForecastRequest, Rejection> {
    let fields = payload.as_object().ok_or(Rejection::InvalidBody)?;

    for name in REQUIRED_FIELDS {
        if fields.get(name).is_none_or(Value::is_null) {
            return Err(Rejection::MissingField(name));
        }
    }

    let token = match &fields["token"] {
        Value::String(token) if token == expected_token => token.clone(),
        _ => return Err(Rejection::Unauthorized("wrong API token".to_string())),
    };

    let date = fields.get("date").filter(|d| !is_blank(d)).map(as_text);

    Ok(ForecastRequest {
        token,
        location: as_text(&fields["location"]),
        requester_name: as_text(&fields["requester_name"]),
        date,
    })
}

/// Values that mean "no date": null, `false`, zero and empty strings or containers.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
