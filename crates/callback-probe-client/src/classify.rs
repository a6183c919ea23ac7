//! Response classification.
//!
//! The backend and the gateway report success differently. Both classifiers
//! treat a missing or malformed `status` as a failure, and a success without
//! the expected link fields as a failure too.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApplicationError;

/// Payment link returned by a successful initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLink {
    /// Hosted checkout page the user is sent to.
    pub authorization_url: String,
    /// Payment reference used to verify the transaction later.
    pub reference: String,
}

/// Classify a booking backend response.
///
/// Success is `status == "success"` with `data.authorizationUrl` and
/// `data.paymentReference`.
///
/// # Errors
///
/// Returns an [`ApplicationError`] for any other shape.
pub fn classify_backend(body: &Value) -> Result<PaymentLink, ApplicationError> {
    match body.get("status") {
        Some(Value::String(status)) if status == "success" => {
            extract_link(body, "authorizationUrl", "paymentReference")
        }
        Some(status) => Err(failure(body, format!("booking status is {status}"))),
        None => Err(failure(body, "response has no status field".into())),
    }
}

/// Classify a gateway `transaction/initialize` response.
///
/// Success is a truthy `status` with `data.authorization_url` and
/// `data.reference`. Truthy means `true`, a non-zero number, or the string
/// `"true"` / `"success"`.
///
/// # Errors
///
/// Returns an [`ApplicationError`] for any other shape.
pub fn classify_gateway(body: &Value) -> Result<PaymentLink, ApplicationError> {
    match body.get("status") {
        Some(status) if is_truthy(status) => extract_link(body, "authorization_url", "reference"),
        Some(status) => Err(failure(body, format!("gateway status is {status}"))),
        None => Err(failure(body, "response has no status field".into())),
    }
}

fn is_truthy(status: &Value) -> bool {
    match status {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("success"),
        _ => false,
    }
}

fn extract_link(
    body: &Value,
    url_key: &str,
    reference_key: &str,
) -> Result<PaymentLink, ApplicationError> {
    let data = body.get("data");
    let field = |key: &str| {
        data.and_then(|d| d.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    match (field(url_key), field(reference_key)) {
        (Some(authorization_url), Some(reference)) => Ok(PaymentLink {
            authorization_url,
            reference,
        }),
        (None, _) => Err(ApplicationError {
            message: format!("success response is missing data.{url_key}"),
            response: body.clone(),
        }),
        (_, None) => Err(ApplicationError {
            message: format!("success response is missing data.{reference_key}"),
            response: body.clone(),
        }),
    }
}

/// Prefer the response's own `message`; fall back to `describe`.
fn failure(body: &Value, describe: String) -> ApplicationError {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map_or(describe, str::to_string);

    ApplicationError {
        message,
        response: body.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn backend_success() {
        let body = json!({
            "status": "success",
            "data": { "authorizationUrl": "X", "paymentReference": "Y" }
        });
        let link = classify_backend(&body).unwrap();
        assert_eq!(link.authorization_url, "X");
        assert_eq!(link.reference, "Y");
    }

    #[test]
    fn backend_error_uses_message() {
        let body = json!({ "status": "error", "message": "bad request" });
        let err = classify_backend(&body).unwrap_err();
        assert_eq!(err.message, "bad request");
        assert_eq!(err.response, body);
    }

    #[test]
    fn backend_missing_status_is_failure() {
        let err = classify_backend(&json!({ "data": {} })).unwrap_err();
        assert_eq!(err.message, "response has no status field");
    }

    #[test]
    fn backend_boolean_status_is_not_success() {
        let body = json!({
            "status": true,
            "data": { "authorizationUrl": "X", "paymentReference": "Y" }
        });
        assert!(classify_backend(&body).is_err());
    }

    #[test]
    fn backend_success_without_data_is_failure() {
        let err = classify_backend(&json!({ "status": "success" })).unwrap_err();
        assert_eq!(err.message, "success response is missing data.authorizationUrl");

        let err = classify_backend(&json!({
            "status": "success",
            "data": { "authorizationUrl": "X" }
        }))
        .unwrap_err();
        assert_eq!(err.message, "success response is missing data.paymentReference");
    }

    #[test]
    fn backend_non_object_is_failure() {
        assert!(classify_backend(&json!("success")).is_err());
        assert!(classify_backend(&json!(null)).is_err());
        assert!(classify_backend(&json!([1, 2])).is_err());
    }

    #[test]
    fn gateway_success() {
        let body = json!({
            "status": true,
            "message": "Authorization URL created",
            "data": {
                "authorization_url": "https://checkout.paystack.com/abc",
                "access_code": "abc",
                "reference": "CBP-DIRECT-1"
            }
        });
        let link = classify_gateway(&body).unwrap();
        assert_eq!(link.authorization_url, "https://checkout.paystack.com/abc");
        assert_eq!(link.reference, "CBP-DIRECT-1");
    }

    #[test]
    fn gateway_false_status_uses_message() {
        let body = json!({ "status": false, "message": "Invalid key" });
        let err = classify_gateway(&body).unwrap_err();
        assert_eq!(err.message, "Invalid key");
    }

    #[test]
    fn gateway_truthiness() {
        let data = json!({ "authorization_url": "u", "reference": "r" });
        for status in [json!(true), json!(1), json!("true"), json!("success")] {
            let body = json!({ "status": status, "data": data });
            assert!(classify_gateway(&body).is_ok(), "{status}");
        }
        for status in [json!(false), json!(0), json!(""), json!({}), json!(null)] {
            let body = json!({ "status": status, "data": data });
            assert!(classify_gateway(&body).is_err(), "{status}");
        }
    }

    #[test]
    fn gateway_missing_status_is_failure() {
        let err = classify_gateway(&json!({ "message": "" })).unwrap_err();
        assert_eq!(err.message, "response has no status field");
    }
}
