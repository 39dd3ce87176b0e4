//! JSON shapes exchanged with the summarization service.

use serde::{Deserialize, Serialize};
use summarizer_core::{FailureCause, RequestOutcome, ResultData};

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SummaryBody {
    status: Option<String>,
    title: Option<String>,
    summary: Option<String>,
    title_f1: Option<f64>,
    summary_f1: Option<f64>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Interpret a 2xx body. A `status: "error"` marker still counts as a failure.
pub(crate) fn parse_summary(code: u16, body: &[u8]) -> RequestOutcome {
    let parsed: SummaryBody =
        serde_json::from_slice(body).map_err(|_| FailureCause::MalformedResponse)?;

    if parsed.status.as_deref() == Some("error") {
        return Err(FailureCause::ServerError {
            code,
            message: server_message(parsed.error, code),
        });
    }

    match (parsed.title, parsed.summary, parsed.title_f1, parsed.summary_f1) {
        (Some(title), Some(summary), Some(title_score), Some(summary_score))
            if is_score(title_score) && is_score(summary_score) =>
        {
            Ok(ResultData {
                title,
                summary,
                title_score,
                summary_score,
            })
        }
        _ => Err(FailureCause::MalformedResponse),
    }
}

/// Interpret a non-2xx body, falling back to a generic message when it carries none.
pub(crate) fn parse_error(code: u16, body: &[u8]) -> FailureCause {
    let error = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error);
    FailureCause::ServerError {
        code,
        message: server_message(error, code),
    }
}

fn server_message(error: Option<String>, code: u16) -> String {
    error
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("Server error: {code}"))
}

fn is_score(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::{parse_error, parse_summary};
    use summarizer_core::{FailureCause, ResultData};

    #[test]
    fn well_formed_body_becomes_result() {
        let body = br#"{"status":"success","title":"T","summary":"S","title_f1":0.9,"summary_f1":0.85}"#;
        assert_eq!(
            parse_summary(200, body),
            Ok(ResultData {
                title: "T".into(),
                summary: "S".into(),
                title_score: 0.9,
                summary_score: 0.85,
            })
        );
    }

    #[test]
    fn status_field_is_optional() {
        let body = br#"{"title":"T","summary":"S","title_f1":1,"summary_f1":0}"#;
        assert!(parse_summary(200, body).is_ok());
    }

    #[test]
    fn embedded_error_marker_is_a_server_error() {
        let body = br#"{"status":"error","error":"No text provided"}"#;
        assert_eq!(
            parse_summary(200, body),
            Err(FailureCause::ServerError {
                code: 200,
                message: "No text provided".into(),
            })
        );
    }

    #[test]
    fn embedded_error_marker_without_message_gets_fallback() {
        let body = br#"{"status":"error"}"#;
        assert_eq!(
            parse_summary(200, body),
            Err(FailureCause::ServerError {
                code: 200,
                message: "Server error: 200".into(),
            })
        );
    }

    #[test]
    fn missing_fields_are_malformed() {
        let body = br#"{"status":"success","title":"T"}"#;
        assert_eq!(parse_summary(200, body), Err(FailureCause::MalformedResponse));
    }

    #[test]
    fn out_of_range_score_is_malformed() {
        let body = br#"{"title":"T","summary":"S","title_f1":1.5,"summary_f1":0.5}"#;
        assert_eq!(parse_summary(200, body), Err(FailureCause::MalformedResponse));
    }

    #[test]
    fn wrongly_typed_score_is_malformed() {
        let body = br#"{"title":"T","summary":"S","title_f1":"high","summary_f1":0.5}"#;
        assert_eq!(parse_summary(200, body), Err(FailureCause::MalformedResponse));
    }

    #[test]
    fn non_json_success_body_is_malformed() {
        assert_eq!(
            parse_summary(200, b"<html>oops</html>"),
            Err(FailureCause::MalformedResponse)
        );
    }

    #[test]
    fn error_body_message_is_used() {
        assert_eq!(
            parse_error(400, br#"{"error":"No file part"}"#),
            FailureCause::ServerError {
                code: 400,
                message: "No file part".into(),
            }
        );
    }

    #[test]
    fn unparsable_error_body_falls_back_to_status() {
        assert_eq!(
            parse_error(502, b"Bad Gateway"),
            FailureCause::ServerError {
                code: 502,
                message: "Server error: 502".into(),
            }
        );
    }
}
