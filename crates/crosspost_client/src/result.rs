//! Upload outcomes.

use crate::RawResponse;
use crosspost_core::Platform;
use crosspost_error::TransportError;
use derive_getters::Getters;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Overall outcome of one upload.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UploadStatus {
    /// Every platform accepted the content
    Success,
    /// Some platforms accepted the content, others did not
    PartialFailure,
    /// Nothing was published
    Failure,
}

/// Outcome on a single platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum PlatformStatus {
    /// Published
    #[display("success")]
    Success,
    /// Not published, with the upstream's reason
    #[display("failure: {}", _0)]
    Failure(String),
}

impl PlatformStatus {
    /// Whether the platform published the content.
    pub fn is_success(&self) -> bool {
        matches!(self, PlatformStatus::Success)
    }
}

/// Why an upload ended in [`UploadStatus::Failure`].
#[derive(Debug, Clone, derive_more::Display)]
pub enum FailureReason {
    /// The request never produced a 2xx response
    #[display("{}", _0)]
    Transport(TransportError),
    /// The API answered 2xx but declined the upload as a whole
    #[display("Upload rejected: {}", _0)]
    Rejected(String),
    /// The API reported a failure on every requested platform
    #[display("Upload failed on every platform")]
    AllPlatformsFailed,
}

impl FailureReason {
    /// Whether the publishing API refused the upload, as opposed to the
    /// request failing unexpectedly on the way.
    pub fn is_rejection(&self) -> bool {
        match self {
            FailureReason::Transport(err) => err.kind.is_rejection(),
            FailureReason::Rejected(_) | FailureReason::AllPlatformsFailed => true,
        }
    }
}

/// Structured result of one upload call.
///
/// `platforms` is populated only when the API reported per-platform status;
/// otherwise the result is all-or-nothing. A [`UploadStatus::PartialFailure`]
/// is not an error, but callers must not treat it as success.
#[derive(Debug, Clone, Getters, Serialize)]
pub struct UploadResult {
    /// Overall outcome.
    status: UploadStatus,
    /// Per-platform outcome, when reported.
    platforms: BTreeMap<Platform, PlatformStatus>,
    /// Reason for a failed upload.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_reason"
    )]
    failure: Option<FailureReason>,
    /// Upstream response body (JSON when parseable, otherwise a string).
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<Value>,
}

fn serialize_reason<S: Serializer>(
    reason: &Option<FailureReason>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match reason {
        Some(reason) => serializer.serialize_some(&reason.to_string()),
        None => serializer.serialize_none(),
    }
}

impl UploadResult {
    /// A failed upload with no upstream body.
    pub fn failed(reason: FailureReason) -> Self {
        Self {
            status: UploadStatus::Failure,
            platforms: BTreeMap::new(),
            failure: Some(reason),
            raw: None,
        }
    }

    /// Interpret a 2xx response to a request for `requested` platforms.
    ///
    /// Expected shape:
    /// `{"success": bool, "results": {"<platform>": {"success": bool, "error": "..."}}}`.
    /// Bodies without `results` are all-or-nothing; non-JSON bodies count as success.
    /// When `results` is present, a requested platform it leaves out counts as
    /// failed, and an overall `"success": false` overrides per-platform success.
    pub fn from_response(response: &RawResponse, requested: &[Platform]) -> Self {
        let value: Value = match serde_json::from_str(response.body()) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "Response body is not JSON; treating 2xx as success");
                return Self {
                    status: UploadStatus::Success,
                    platforms: BTreeMap::new(),
                    failure: None,
                    raw: Some(Value::String(response.body().clone())),
                };
            }
        };

        let mut platforms = value
            .get("results")
            .and_then(Value::as_object)
            .map(|results| {
                results
                    .iter()
                    .filter_map(|(name, entry)| match name.parse::<Platform>() {
                        Ok(platform) => Some((platform, platform_status(entry))),
                        Err(_) => {
                            warn!(platform = %name, "Ignoring result for unknown platform");
                            None
                        }
                    })
                    .collect::<BTreeMap<_, _>>()
            })
            .unwrap_or_default();

        if !platforms.is_empty() {
            for platform in requested {
                if !platforms.contains_key(platform) {
                    warn!(%platform, "No result reported for requested platform");
                    platforms.insert(
                        *platform,
                        PlatformStatus::Failure("no result reported".to_string()),
                    );
                }
            }
        }
        let overall = value.get("success").and_then(Value::as_bool);

        let (status, failure) = if platforms.is_empty() {
            match overall {
                Some(false) => (
                    UploadStatus::Failure,
                    Some(FailureReason::Rejected(
                        message_of(&value).unwrap_or_else(|| "no reason given".to_string()),
                    )),
                ),
                _ => (UploadStatus::Success, None),
            }
        } else {
            let succeeded = platforms.values().filter(|s| s.is_success()).count();
            if succeeded == platforms.len() && overall == Some(false) {
                warn!("Upload declined overall despite per-platform success");
                (
                    UploadStatus::Failure,
                    Some(FailureReason::Rejected(
                        message_of(&value).unwrap_or_else(|| "no reason given".to_string()),
                    )),
                )
            } else if succeeded == platforms.len() {
                (UploadStatus::Success, None)
            } else if succeeded == 0 {
                (UploadStatus::Failure, Some(FailureReason::AllPlatformsFailed))
            } else {
                (UploadStatus::PartialFailure, None)
            }
        };

        Self {
            status,
            platforms,
            failure,
            raw: Some(value),
        }
    }

    /// Every platform published (or the API reported overall success).
    pub fn is_success(&self) -> bool {
        self.status == UploadStatus::Success
    }

    /// Some platforms published and some did not.
    pub fn is_partial(&self) -> bool {
        self.status == UploadStatus::PartialFailure
    }

    /// Nothing was published.
    pub fn is_failure(&self) -> bool {
        self.status == UploadStatus::Failure
    }

    /// Platforms that reported success.
    pub fn succeeded(&self) -> Vec<Platform> {
        self.platforms
            .iter()
            .filter(|(_, status)| status.is_success())
            .map(|(platform, _)| *platform)
            .collect()
    }

    /// Platforms that reported failure.
    pub fn failed_platforms(&self) -> Vec<Platform> {
        self.platforms
            .iter()
            .filter(|(_, status)| !status.is_success())
            .map(|(platform, _)| *platform)
            .collect()
    }
}

fn platform_status(entry: &Value) -> PlatformStatus {
    match entry {
        Value::Bool(true) => PlatformStatus::Success,
        Value::Bool(false) => PlatformStatus::Failure("reported failure".to_string()),
        Value::String(s) if matches!(s.to_ascii_lowercase().as_str(), "ok" | "success") => {
            PlatformStatus::Success
        }
        Value::String(s) => PlatformStatus::Failure(s.clone()),
        Value::Object(_) => {
            let message = message_of(entry);
            let success = entry
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(message.is_none());
            if success {
                PlatformStatus::Success
            } else {
                PlatformStatus::Failure(message.unwrap_or_else(|| "reported failure".to_string()))
            }
        }
        _ => PlatformStatus::Failure(format!("unrecognized status: {}", entry)),
    }
}

fn message_of(value: &Value) -> Option<String> {
    ["error", "message", "detail"]
        .iter()
        .find_map(|key| value.get(*key))
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str, requested: &[Platform]) -> UploadResult {
        UploadResult::from_response(&RawResponse::new(200, body), requested)
    }

    #[test]
    fn mixed_results_are_partial() {
        let result = parse(
            r#"{"success": true, "results": {"linkedin": {"success": true}, "x": {"success": false, "error": "duplicate post"}}}"#,
            &[Platform::LinkedIn, Platform::X],
        );
        assert_eq!(*result.status(), UploadStatus::PartialFailure);
        assert_eq!(result.platforms()[&Platform::LinkedIn], PlatformStatus::Success);
        assert_eq!(
            result.platforms()[&Platform::X],
            PlatformStatus::Failure("duplicate post".to_string())
        );
        assert!(result.failure().is_none());
    }

    #[test]
    fn all_failed_results_are_failure() {
        let result = parse(
            r#"{"results": {"x": false, "threads": {"error": "token expired"}}}"#,
            &[Platform::X, Platform::Threads],
        );
        assert!(result.is_failure());
        assert!(matches!(result.failure(), Some(FailureReason::AllPlatformsFailed)));
        assert_eq!(result.failed_platforms(), vec![Platform::X, Platform::Threads]);
    }

    #[test]
    fn overall_flag_without_results() {
        let ok = parse(r#"{"success": true}"#, &[Platform::X]);
        assert!(ok.is_success());
        assert!(ok.platforms().is_empty());

        let rejected = parse(r#"{"success": false, "message": "quota"}"#, &[Platform::X]);
        assert!(rejected.is_failure());
        assert!(rejected.failure().as_ref().unwrap().is_rejection());
        assert_eq!(rejected.failure().as_ref().unwrap().to_string(), "Upload rejected: quota");
    }

    #[test]
    fn unknown_platforms_are_ignored() {
        let result = parse(
            r#"{"results": {"myspace": {"success": false}, "tiktok": {"success": true}}}"#,
            &[Platform::TikTok],
        );
        assert!(result.is_success());
        assert_eq!(result.succeeded(), vec![Platform::TikTok]);
    }

    #[test]
    fn unreported_platform_counts_as_failed() {
        let result = parse(
            r#"{"success": true, "results": {"tiktok": {"success": true}}}"#,
            &[Platform::TikTok, Platform::YouTube],
        );
        assert!(result.is_partial());
        assert_eq!(result.failed_platforms(), vec![Platform::YouTube]);
        assert_eq!(
            result.platforms()[&Platform::YouTube],
            PlatformStatus::Failure("no result reported".to_string())
        );
    }

    #[test]
    fn overall_false_overrides_platform_success() {
        let result = parse(
            r#"{"success": false, "message": "account suspended", "results": {"x": {"success": true}}}"#,
            &[Platform::X],
        );
        assert!(result.is_failure());
        assert_eq!(
            result.failure().as_ref().unwrap().to_string(),
            "Upload rejected: account suspended"
        );
    }

    #[test]
    fn non_json_body_is_success_with_raw_text() {
        let result = parse("accepted", &[Platform::X]);
        assert!(result.is_success());
        assert_eq!(result.raw(), &Some(Value::String("accepted".to_string())));
    }

    #[test]
    fn serializes_reason_as_text() {
        let result = UploadResult::failed(FailureReason::AllPlatformsFailed);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["failure"], "Upload failed on every platform");
        assert!(json.get("raw").is_none());
    }
}
