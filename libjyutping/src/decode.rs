//! Decoding of the callback-wrapped suggestion response.
//!
//! The provider answers a GET with JavaScript source: a callback invocation
//! whose single argument is a JSON array, optionally preceded by a comment
//! marker. Two patterns peel the envelope: a strict one for a bare
//! `callbackName(payload)` body, then a looser fallback that accepts any
//! prefix before the final parenthesized payload (which is how the comment
//! marker variant arrives).
//!
//! The payload itself is `[status, data, ...]`. `data` is a list of
//! candidate groups; a real group is `[key, [candidate, ...], ...]` and
//! anything else (auxiliary metadata the provider interleaves) is skipped
//! without complaint. Candidate order is preserved exactly as sent.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::CloudError;

/// Status string the provider uses for a successful lookup.
const SUCCESS_STATUS: &str = "SUCCESS";

/// Bare `callbackName(payload)` covering the whole body.
static ENVELOPE_STRICT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^[A-Za-z_$][0-9A-Za-z_$.]*\((.*)\)\s*;?\s*$")
        .expect("strict envelope pattern is valid")
});

/// Any prefix, then the final parenthesized payload.
static ENVELOPE_LOOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\((.*)\)").expect("loose envelope pattern is valid"));

/// Extract and decode the candidate strings from a raw response body.
pub fn decode_candidates(body: &str) -> Result<Vec<String>, CloudError> {
    let payload = extract_payload(body)?;
    let value: Value =
        serde_json::from_str(payload).map_err(|e| CloudError::MalformedPayload(e.to_string()))?;

    let envelope = value
        .as_array()
        .filter(|a| a.len() >= 2)
        .ok_or(CloudError::UnexpectedShape)?;

    let status = envelope[0].as_str().ok_or(CloudError::UnexpectedShape)?;
    if status != SUCCESS_STATUS {
        return Err(CloudError::Provider(status.to_string()));
    }

    let groups = envelope[1].as_array().ok_or(CloudError::UnexpectedShape)?;
    let mut candidates = Vec::new();
    for group in groups {
        let Some(items) = group
            .as_array()
            .filter(|g| g.len() >= 2)
            .and_then(|g| g[1].as_array())
        else {
            // metadata group, not suggestions
            continue;
        };
        candidates.extend(items.iter().filter_map(|v| v.as_str().map(str::to_string)));
    }
    Ok(candidates)
}

/// Peel the callback envelope off the body.
fn extract_payload(body: &str) -> Result<&str, CloudError> {
    if let Some(caps) = ENVELOPE_STRICT.captures(body) {
        if let Some(m) = caps.get(1) {
            return Ok(m.as_str());
        }
    }
    if let Some(caps) = ENVELOPE_LOOSE.captures(body) {
        if let Some(m) = caps.get(1) {
            return Ok(m.as_str());
        }
    }
    Err(CloudError::MalformedEnvelope)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_commented_envelope() {
        let body = r#"/*API*/_callbacks____x(["SUCCESS",[["m",["唔","五","午"],[],{}]]])"#;
        let candidates = decode_candidates(body).expect("decode");
        assert_eq!(candidates, ["唔", "五", "午"]);
    }

    #[test]
    fn decodes_a_bare_callback_envelope() {
        let body = r#"_callbacks____x(["SUCCESS",[["nei",["你","妳"]]]])"#;
        let candidates = decode_candidates(body).expect("decode");
        assert_eq!(candidates, ["你", "妳"]);
    }

    #[test]
    fn concatenates_groups_in_order() {
        let body = r#"cb(["SUCCESS",[["a",["一","二"]],["b",["三"]]]])"#;
        let candidates = decode_candidates(body).expect("decode");
        assert_eq!(candidates, ["一", "二", "三"]);
    }

    #[test]
    fn skips_metadata_groups_silently() {
        let body = r#"cb(["SUCCESS",[42,"x",["k"],["m",["你"],{"ext":1}],["n",{"not":"arr"}]]])"#;
        let candidates = decode_candidates(body).expect("decode");
        assert_eq!(candidates, ["你"]);
    }

    #[test]
    fn empty_data_yields_no_candidates() {
        let body = r#"cb(["SUCCESS",[]])"#;
        assert_eq!(decode_candidates(body).expect("decode"), Vec::<String>::new());
    }

    #[test]
    fn failure_status_is_a_provider_error() {
        let body = r#"(["FAILURE","quota exceeded"])"#;
        assert_eq!(
            decode_candidates(body),
            Err(CloudError::Provider("FAILURE".to_string()))
        );
    }

    #[test]
    fn non_json_payload_is_malformed() {
        let body = "cb(not json at all)";
        assert!(matches!(
            decode_candidates(body),
            Err(CloudError::MalformedPayload(_))
        ));
    }

    #[test]
    fn missing_parens_is_a_malformed_envelope() {
        assert_eq!(
            decode_candidates("no payload here"),
            Err(CloudError::MalformedEnvelope)
        );
        assert_eq!(decode_candidates(""), Err(CloudError::MalformedEnvelope));
    }

    #[test]
    fn short_or_non_array_payloads_are_unexpected() {
        assert_eq!(
            decode_candidates(r#"cb(["SUCCESS"])"#),
            Err(CloudError::UnexpectedShape)
        );
        assert_eq!(
            decode_candidates(r#"cb({"status":"SUCCESS"})"#),
            Err(CloudError::UnexpectedShape)
        );
        assert_eq!(
            decode_candidates(r#"cb([1,[]])"#),
            Err(CloudError::UnexpectedShape)
        );
        assert_eq!(
            decode_candidates(r#"cb(["SUCCESS","not-groups"])"#),
            Err(CloudError::UnexpectedShape)
        );
    }

    #[test]
    fn non_string_candidates_are_skipped() {
        let body = r#"cb(["SUCCESS",[["m",["你",5,null,"好"]]]])"#;
        let candidates = decode_candidates(body).expect("decode");
        assert_eq!(candidates, ["你", "好"]);
    }

    #[test]
    fn trailing_semicolon_is_tolerated() {
        let body = "cb([\"SUCCESS\",[[\"m\",[\"你\"]]]]);\n";
        let candidates = decode_candidates(body).expect("decode");
        assert_eq!(candidates, ["你"]);
    }
}
