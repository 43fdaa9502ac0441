//! JSON rendering of verification reports for machine consumption.

use serde::Serialize;

use crate::output::{FunctionReport, VerificationStatus};

/// Version of the JSON schema emitted by [`reports_to_json`].
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct JsonReport<'a> {
    schema_version: u32,
    results: Vec<JsonFunction<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonFunction<'a> {
    name: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    vc_count: usize,
    verified_count: usize,
    duration_ms: u64,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    ok: usize,
    failed: usize,
    inconclusive: usize,
}

fn status_str(status: VerificationStatus) -> &'static str {
    match status {
        VerificationStatus::Ok => "ok",
        VerificationStatus::Fail => "fail",
        VerificationStatus::Inconclusive => "inconclusive",
    }
}

/// Serialize reports to a pretty-printed JSON document.
pub fn reports_to_json(reports: &[FunctionReport]) -> serde_json::Result<String> {
    let results: Vec<JsonFunction<'_>> = reports
        .iter()
        .map(|r| JsonFunction {
            name: &r.name,
            status: status_str(r.status),
            message: r.message.as_deref(),
            vc_count: r.vc_count,
            verified_count: r.verified_count,
            duration_ms: r.duration_ms,
        })
        .collect();

    let count =
        |status| reports.iter().filter(|r| r.status == status).count();

    let report = JsonReport {
        schema_version: SCHEMA_VERSION,
        summary: JsonSummary {
            total: reports.len(),
            ok: count(VerificationStatus::Ok),
            failed: count(VerificationStatus::Fail),
            inconclusive: count(VerificationStatus::Inconclusive),
        },
        results,
    };
    serde_json::to_string_pretty(&report)
}
