use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_timestamp_normalizes_offsets_to_utc() {
        let parsed = parse_timestamp(" 2025-10-11T18:00:00-03:00 ").expect("valid timestamp");
        let expected = Utc
            .with_ymd_and_hms(2025, 10, 11, 21, 0, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(parsed, expected);

        let error = parse_timestamp("11/10/2025").expect_err("rejects other formats");
        assert!(error.contains("RFC 3339"));
    }
}
