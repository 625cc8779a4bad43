//! Transport-independent request/response boundary.
//!
//! The engine is mounted behind whatever transport the deployment uses; this
//! module owns everything the transport needs: payload validation, the success
//! and error envelopes, and the display-only recommendations derived from a
//! [`ScrubResult`].

use std::panic::{self, AssertUnwindSafe};

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error};

use crate::engine;
use crate::types::{Confidence, ScrubResult};

pub const API_VERSION: &str = "2.0";
pub const DETECTION_METHOD: &str = "comprehensive-unicode";

/// Ratio above which the recommendation list calls out the size reduction.
const SIGNIFICANT_COMPRESSION: f64 = 5.0;

/// Rejection of a request payload, before the engine is ever invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Request body is required")]
    MissingBody,
    #[error("The \"text\" field is required in the request body")]
    MissingText,
    #[error("The \"text\" field must be a string")]
    TextNotString,
}

/// Validate a parsed request payload and extract the `text` field.
pub fn validate_request(body: &Value) -> Result<&str, RequestError> {
    if body.is_null() {
        return Err(RequestError::MissingBody);
    }
    match body.get("text") {
        None => Err(RequestError::MissingText),
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(RequestError::TextNotString),
    }
}

/// Status code plus optional JSON body, ready for any transport to write out.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Option<Value>,
}

impl Response {
    fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    fn error(status: u16, error: &str, message: &str) -> Self {
        Self {
            status,
            body: Some(json!({
                "success": false,
                "error": error,
                "message": message,
            })),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    processing_time: String,
    api_version: &'static str,
    detection_method: &'static str,
    total_characters_analyzed: usize,
    confidence_level: Confidence,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuccessEnvelope<'a> {
    success: bool,
    original: &'a str,
    cleaned: &'a str,
    stats: &'a crate::types::ScrubStats,
    detected_watermarks: &'a [crate::types::DetectedWatermark],
    analysis: &'a crate::types::Analysis,
    metadata: Metadata,
    recommendations: Vec<String>,
}

/// Handle one request: method check, preflight, body parsing, validation,
/// engine invocation, envelope assembly.
///
/// A same-origin preflight gets an empty success response. Unexpected panics
/// during processing are caught here, logged, and surfaced as a generic 500;
/// panic detail is attached only in debug builds.
pub fn handle(method: &str, raw_body: &str) -> Response {
    if method.eq_ignore_ascii_case("OPTIONS") {
        return Response {
            status: 200,
            body: None,
        };
    }

    if !method.eq_ignore_ascii_case("POST") {
        let mut response =
            Response::error(405, "Method not allowed", "Only POST requests are supported for this endpoint");
        if let Some(body) = response.body.as_mut() {
            body["allowedMethods"] = json!(["POST"]);
        }
        return response;
    }

    let body: Value = match serde_json::from_str(raw_body) {
        Ok(value) => value,
        Err(_) => return Response::error(400, "Invalid JSON", "Request body must be valid JSON"),
    };

    let text = match validate_request(&body) {
        Ok(text) => text,
        Err(err) => return Response::error(400, "Invalid input", &err.to_string()),
    };

    match panic::catch_unwind(AssertUnwindSafe(|| engine::analyze_and_clean(text))) {
        Ok(result) => {
            debug!(
                original_length = result.stats.original_length,
                characters_removed = result.stats.characters_removed,
                confidence = %result.analysis.confidence,
                "request processed"
            );
            Response::ok(success_envelope(&result))
        }
        Err(payload) => {
            let detail = panic_message(payload.as_ref());
            error!(detail, "unexpected failure while processing request");
            let mut response = Response::error(
                500,
                "Internal server error",
                "An error occurred while processing your request",
            );
            if cfg!(debug_assertions) {
                if let Some(body) = response.body.as_mut() {
                    body["details"] = json!(detail);
                }
            }
            response
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

fn success_envelope(result: &ScrubResult) -> Value {
    let envelope = SuccessEnvelope {
        success: true,
        original: &result.original,
        cleaned: &result.cleaned,
        stats: &result.stats,
        detected_watermarks: &result.detected_watermarks,
        analysis: &result.analysis,
        metadata: Metadata {
            processing_time: Utc::now().to_rfc3339(),
            api_version: API_VERSION,
            detection_method: DETECTION_METHOD,
            total_characters_analyzed: result.stats.original_length,
            confidence_level: result.analysis.confidence,
        },
        recommendations: recommendations(result),
    };
    serde_json::to_value(envelope).unwrap_or_else(|err| {
        error!(%err, "envelope serialization failed");
        json!({
            "success": false,
            "error": "Internal server error",
            "message": "An error occurred while processing your request",
        })
    })
}

/// Human-readable notes derived from stats and analysis. Pure presentation.
pub fn recommendations(result: &ScrubResult) -> Vec<String> {
    let mut notes = Vec::new();

    if !result.stats.watermarks_detected {
        notes.push("No watermarks detected in the provided text.".to_string());
        return notes;
    }

    notes.push("Watermarks were detected and removed from your text.".to_string());

    if result.analysis.has_invisible_characters {
        notes.push(
            "Invisible characters were found - these are commonly used for text watermarking."
                .to_string(),
        );
    }
    if result.analysis.has_control_characters {
        notes.push(
            "Control characters were detected - these may indicate advanced watermarking techniques."
                .to_string(),
        );
    }
    if result.analysis.has_suspicious_spacing {
        notes.push(
            "Suspicious spacing characters were found - these can be used to embed hidden information."
                .to_string(),
        );
    }
    if result.analysis.confidence == Confidence::High {
        notes.push(
            "High confidence watermark detection - the text likely contained AI-generated watermarks."
                .to_string(),
        );
    }
    if result.stats.compression_ratio > SIGNIFICANT_COMPRESSION {
        notes.push(format!(
            "Text size reduced by {:.2}% - significant watermark presence detected.",
            result.stats.compression_ratio
        ));
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_missing_body() {
        assert_eq!(validate_request(&Value::Null), Err(RequestError::MissingBody));
    }

    #[test]
    fn test_validate_missing_text_field() {
        assert_eq!(
            validate_request(&json!({"other": 1})),
            Err(RequestError::MissingText)
        );
    }

    #[test]
    fn test_validate_non_string_text() {
        assert_eq!(
            validate_request(&json!({"text": 42})),
            Err(RequestError::TextNotString)
        );
        assert_eq!(
            validate_request(&json!({"text": ["a"]})),
            Err(RequestError::TextNotString)
        );
    }

    #[test]
    fn test_validate_ok() {
        let body = json!({"text": "hello"});
        assert_eq!(validate_request(&body), Ok("hello"));
    }

    #[test]
    fn test_preflight_has_no_body() {
        let response = handle("OPTIONS", "");
        assert_eq!(response.status, 200);
        assert!(response.body.is_none());
    }

    #[test]
    fn test_method_not_allowed() {
        let response = handle("GET", "");
        assert_eq!(response.status, 405);
        let body = response.body.unwrap();
        assert_eq!(body["error"], "Method not allowed");
        assert_eq!(body["allowedMethods"], json!(["POST"]));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let response = handle("POST", "{not json");
        assert_eq!(response.status, 400);
        assert_eq!(response.body.unwrap()["error"], "Invalid JSON");
    }

    #[test]
    fn test_invalid_input_message_passthrough() {
        let response = handle("POST", r#"{"text": 7}"#);
        assert_eq!(response.status, 400);
        let body = response.body.unwrap();
        assert_eq!(body["error"], "Invalid input");
        assert_eq!(body["message"], "The \"text\" field must be a string");
    }

    #[test]
    fn test_success_envelope_fields() {
        let raw = r#"{"text": "Hello\u200Bworld"}"#;
        let response = handle("POST", raw);
        assert_eq!(response.status, 200);
        let body = response.body.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["cleaned"], "Helloworld");
        assert_eq!(body["stats"]["charactersRemoved"], 1);
        assert_eq!(body["metadata"]["apiVersion"], API_VERSION);
        assert_eq!(body["metadata"]["detectionMethod"], DETECTION_METHOD);
        assert_eq!(body["metadata"]["totalCharactersAnalyzed"], 11);
        assert_eq!(body["metadata"]["confidenceLevel"], "high");
        assert!(body["recommendations"].as_array().unwrap().len() >= 2);
    }

    #[test]
    fn test_no_watermark_single_recommendation() {
        let result = engine::analyze_and_clean("plain text");
        assert_eq!(
            recommendations(&result),
            vec!["No watermarks detected in the provided text.".to_string()]
        );
    }

    #[test]
    fn test_recommendation_order_and_interpolation() {
        let result = engine::analyze_and_clean("Hi\u{200B}\u{0007}\u{00A0}");
        let notes = recommendations(&result);
        assert_eq!(notes[0], "Watermarks were detected and removed from your text.");
        assert!(notes[1].starts_with("Invisible characters"));
        assert!(notes[2].starts_with("Control characters"));
        assert!(notes[3].starts_with("Suspicious spacing"));
        assert!(notes[4].starts_with("High confidence"));
        assert!(notes[5].starts_with("Text size reduced by"));
        assert!(notes[5].contains('%'));
    }
}
