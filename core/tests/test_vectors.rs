//! Verify the classifier against JSON test vectors stored in `test-vectors/`.
//!
//! Each case carries a simulated response and either the expected result
//! (with its rate-limit snapshot) or the expected error variant. Results are
//! compared as decoded records, not raw strings.

use std::time::Duration;

use genderize_core::{classify, Error, HttpResponse, Inference, RateLimit, ResetPolicy};

fn simulated_response(sim: &serde_json::Value) -> HttpResponse {
    let headers = sim["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let pair = h.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
        })
        .collect();
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers,
        body: sim["body"].as_str().unwrap().as_bytes().to_vec(),
    }
}

fn expected_rate_limit(case: &serde_json::Value) -> RateLimit {
    let info = &case["expected_rate_limit"];
    RateLimit {
        limit: info["limit"].as_i64().unwrap(),
        remaining: info["remaining"].as_i64().unwrap(),
        reset: Duration::from_secs(info["reset_seconds"].as_u64().unwrap()),
    }
}

/// Variant name of an error, as spelled in the vectors.
fn kind(err: &Error) -> &'static str {
    match err {
        Error::Transport(_) => "Transport",
        Error::InvalidEndpoint(_) => "InvalidEndpoint",
        Error::ResponseBody(_) => "ResponseBody",
        Error::ResponseHeader { .. } => "ResponseHeader",
        Error::InvalidApiKey => "InvalidApiKey",
        Error::SubscriptionInactive => "SubscriptionInactive",
        Error::MissingName => "MissingName",
        Error::InvalidName => "InvalidName",
        Error::Validation(_) => "Validation",
        Error::RequestLimitReached => "RequestLimitReached",
        Error::RequestLimitTooLow => "RequestLimitTooLow",
        Error::TooManyRequests(_) => "TooManyRequests",
        Error::Unknown { .. } => "Unknown",
        Error::Internal { .. } => "Internal",
        Error::NotFound => "NotFound",
        _ => "unlisted",
    }
}

#[test]
fn classify_test_vectors() {
    let raw = include_str!("../../test-vectors/classify.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = simulated_response(&case["response"]);
        let expected_error = case.get("expected_error").and_then(|e| e.as_str());

        match case["flavor"].as_str().unwrap() {
            "single" => {
                let result = classify::single(&response, ResetPolicy::Required);
                if let Some(expected) = expected_error {
                    let err = result.unwrap_err();
                    assert_eq!(kind(&err), expected, "{name}: error kind");
                    continue;
                }
                let lookup = result.unwrap();
                let expected: Inference =
                    serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(lookup.inference, expected, "{name}: parsed result");
                assert_eq!(lookup.rate_limit, expected_rate_limit(case), "{name}: rate limit");
            }
            "batch" => {
                let result = classify::batch(&response, ResetPolicy::Required);
                if let Some(expected) = expected_error {
                    let err = result.unwrap_err();
                    assert_eq!(kind(&err), expected, "{name}: error kind");
                    continue;
                }
                let collection = result.unwrap();
                let expected: Vec<Inference> =
                    serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(collection.len(), expected.len(), "{name}: length");
                for record in &expected {
                    assert_eq!(collection.find(&record.name).unwrap(), record, "{name}: {}", record.name);
                }
                assert_eq!(collection.rate_limit(), Some(expected_rate_limit(case)), "{name}: rate limit");
            }
            other => panic!("{name}: unknown flavor: {other}"),
        }
    }
}
