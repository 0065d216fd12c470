// src/api/parser.rs
//! Pure parsing of incremental-load replies.
//!
//! The reply is validated structurally before anything downstream sees it:
//! either it is a success carrying a non-empty fragment, or it is a
//! [`LoadError::Protocol`].

use super::responses::{RawLazyLoadResult, RpcResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::LoadError;

/// A validated successful reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentPayload {
    /// HTML fragment holding the new page's items.
    pub html: String,
    /// Item count the server claims it rendered, when it says so.
    pub reported_count: Option<u64>,
}

/// Parses a raw reply body.
pub fn parse_lazy_load_response(body: &str) -> Result<FragmentPayload, LoadError> {
    let envelope: RpcResponse = serde_json::from_str(body).map_err(|e| {
        LoadError::protocol(format!(
            "reply is not a JSON-RPC envelope ({}): {}",
            e,
            preview(body)
        ))
    })?;

    if let Some(error) = envelope.error {
        return Err(LoadError::protocol(error.describe()));
    }

    let result = envelope
        .result
        .ok_or_else(|| LoadError::protocol("reply has no result"))?;

    if !result.is_object() {
        return Err(LoadError::protocol(format!(
            "result is not an object: {}",
            preview(&result.to_string())
        )));
    }

    let result: RawLazyLoadResult = serde_json::from_value(result)
        .map_err(|e| LoadError::protocol(format!("malformed result: {}", e)))?;

    match result.success {
        Some(true) => {}
        Some(false) => {
            return Err(LoadError::protocol(
                result
                    .error
                    .unwrap_or_else(|| "server reported failure".to_string()),
            ))
        }
        None => return Err(LoadError::protocol("result has no success flag")),
    }

    match result.fragment {
        Some(html) if !html.trim().is_empty() => Ok(FragmentPayload {
            html,
            reported_count: result.count,
        }),
        _ => Err(LoadError::protocol("success reply carries no fragment")),
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_PREVIEW_LENGTH {
        body.to_string()
    } else {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(result: serde_json::Value) -> String {
        json!({ "jsonrpc": "2.0", "id": null, "result": result }).to_string()
    }

    #[test]
    fn accepts_success_with_fragment() {
        let body = reply(json!({
            "success": true,
            "tableWrapper": "<section><div class=\"oe_product\"></div></section>",
            "count": 1,
            "debug": { "lang": "fr", "page": 2 }
        }));
        let payload = parse_lazy_load_response(&body).unwrap();
        assert!(payload.html.contains("oe_product"));
        assert_eq!(payload.reported_count, Some(1));
    }

    #[test]
    fn accepts_fragment_field_name() {
        let body = reply(json!({ "success": true, "fragment": "<div class=\"oe_product\"></div>" }));
        let payload = parse_lazy_load_response(&body).unwrap();
        assert_eq!(payload.reported_count, None);
    }

    #[test]
    fn success_false_carries_server_error() {
        let body = reply(json!({
            "success": false,
            "error": "No products container found",
            "count": 0,
            "tableWrapper": ""
        }));
        assert_eq!(
            parse_lazy_load_response(&body),
            Err(LoadError::protocol("No products container found"))
        );
    }

    #[test]
    fn missing_success_flag_is_protocol_error() {
        let body = reply(json!({ "tableWrapper": "<div class=\"oe_product\"></div>" }));
        assert!(matches!(
            parse_lazy_load_response(&body),
            Err(LoadError::Protocol { .. })
        ));
    }

    #[test]
    fn empty_fragment_is_protocol_error() {
        let body = reply(json!({ "success": true, "tableWrapper": "  " }));
        assert_eq!(
            parse_lazy_load_response(&body),
            Err(LoadError::protocol("success reply carries no fragment"))
        );
    }

    #[test]
    fn rpc_error_object_is_protocol_error() {
        let body = json!({
            "jsonrpc": "2.0",
            "error": { "code": 200, "message": "Odoo Server Error" }
        })
        .to_string();
        assert_eq!(
            parse_lazy_load_response(&body),
            Err(LoadError::protocol("Odoo Server Error (code 200)"))
        );
    }

    #[test]
    fn non_json_and_wrong_shapes_are_rejected() {
        for body in [
            "<html>502 Bad Gateway</html>",
            "{}",
            "[]",
            r#"{"result": "ok"}"#,
            r#"{"result": {"success": "yes"}}"#,
        ] {
            assert!(
                matches!(parse_lazy_load_response(body), Err(LoadError::Protocol { .. })),
                "expected protocol error for {}",
                body
            );
        }
    }

    #[test]
    fn long_bodies_are_truncated_in_errors() {
        let body = "x".repeat(ERROR_BODY_PREVIEW_LENGTH * 3);
        let err = parse_lazy_load_response(&body).unwrap_err();
        assert!(err.to_string().len() < body.len());
        assert!(err.to_string().ends_with("..."));
    }
}
