use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

lazy_static! {
    pub static ref PLANS_GENERATED: IntCounter = register_int_counter!(
        "travel_plans_generated_total",
        "Trip plans assembled by the orchestrator"
    )
    .unwrap();
    pub static ref PLAN_FAILURES: IntCounter = register_int_counter!(
        "travel_plan_failures_total",
        "Plan requests that ended in an error"
    )
    .unwrap();
    pub static ref AGENT_CLI_CALLS: IntCounterVec = register_int_counter_vec!(
        "travel_agent_cli_invocations_total",
        "External agent CLI invocations by outcome",
        &["outcome"]
    )
    .unwrap();
}

/// Prometheus text exposition of every registered metric.
pub fn render() -> (Vec<u8>, String) {
    use prometheus::{Encoder, TextEncoder};

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
    }
    (buffer, encoder.format_type().to_string())
}
