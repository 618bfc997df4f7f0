//! Request counters exported on `/metrics`

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const COACH_REQUESTS: &str = "coach_requests_total";
pub const COACH_DEGRADED: &str = "coach_degraded_total";
pub const LLM_REQUESTS: &str = "llm_requests_total";
pub const SEARCH_REQUESTS: &str = "search_requests_total";

/// Install the global Prometheus recorder
pub fn install_recorder() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    metrics::describe_counter!(COACH_REQUESTS, "Coaching requests by kind");
    metrics::describe_counter!(COACH_DEGRADED, "Coaching replies degraded to an apology");
    metrics::describe_counter!(LLM_REQUESTS, "Language model calls by outcome");
    metrics::describe_counter!(SEARCH_REQUESTS, "Web search calls by provider and outcome");
    Ok(handle)
}

pub fn coach_request(kind: &'static str) {
    metrics::counter!(COACH_REQUESTS, "kind" => kind).increment(1);
}

pub fn coach_degraded(kind: &'static str) {
    metrics::counter!(COACH_DEGRADED, "kind" => kind).increment(1);
}

pub fn llm_request(outcome: &'static str) {
    metrics::counter!(LLM_REQUESTS, "outcome" => outcome).increment(1);
}

pub fn search_request(provider: &'static str, outcome: &'static str) {
    metrics::counter!(SEARCH_REQUESTS, "provider" => provider, "outcome" => outcome)
        .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_without_recorder_are_noops() {
        coach_request("chat");
        coach_degraded("insights");
        llm_request("success");
        search_request("serper", "error");
    }
}
