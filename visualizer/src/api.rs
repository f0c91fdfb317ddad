use chrono::{NaiveDate, NaiveDateTime};
use fleetcore::analysis::{
    CoverageHeatmap, DailySeries, FleetMetrics, HourlySeries, PowerBuckets, QualityReading,
};
use fleetcore::prelude::{MaintenanceEntry, SystemStatus, Transmitter, TransmitterDetails};
use serde::{Deserialize, Serialize};

const BRIDGE_URL: &str = "http://127.0.0.1:9000";

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardPayload {
    #[serde(default)]
    pub generated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub rendered_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub transmitters: Vec<Transmitter>,
    #[serde(default)]
    pub metrics: FleetMetrics,
    #[serde(default)]
    pub current_quality: Vec<QualityReading>,
    #[serde(default)]
    pub power_buckets: PowerBuckets,
    #[serde(default)]
    pub heatmap: Option<CoverageHeatmap>,
    #[serde(default)]
    pub maintenance: Vec<MaintenanceEntry>,
    #[serde(default)]
    pub details: Vec<TransmitterDetails>,
    #[serde(default)]
    pub system: SystemStatus,
    #[serde(default)]
    pub hourly_quality: Vec<HourlySeries>,
    #[serde(default)]
    pub featured_daily: Vec<DailySeries>,
}

impl DashboardPayload {
    pub fn hourly_for(&self, transmitter_id: &str) -> Option<&HourlySeries> {
        self.hourly_quality
            .iter()
            .find(|series| series.transmitter_id == transmitter_id)
    }

    pub fn details_for(&self, transmitter_id: &str) -> Option<&TransmitterDetails> {
        self.details
            .iter()
            .find(|details| details.transmitter_id == transmitter_id)
    }
}

#[derive(Debug, Serialize)]
pub struct ScenarioConfig {
    pub seed: Option<u64>,
    pub description: Option<String>,
    pub scenario: Option<String>,
}

fn payload_url(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let mut params = Vec::new();
    if let Some(start) = start {
        params.push(format!("start={start}"));
    }
    if let Some(end) = end {
        params.push(format!("end={end}"));
    }
    if params.is_empty() {
        format!("{BRIDGE_URL}/payload")
    } else {
        format!("{BRIDGE_URL}/payload?{}", params.join("&"))
    }
}

pub async fn fetch_payload(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DashboardPayload, String> {
    let response = reqwest::get(payload_url(start, end))
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<DashboardPayload>()
        .await
        .map_err(|e| e.to_string())
}

pub async fn post_refresh() -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{BRIDGE_URL}/refresh"))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        Ok("Data refreshed".into())
    } else {
        Err(response.status().to_string())
    }
}

pub async fn post_config(config: ScenarioConfig) -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{BRIDGE_URL}/ingest-config"))
        .json(&config)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        Ok(match config.seed {
            Some(seed) => format!("Fleet regenerated with seed {seed}"),
            None => "Fleet regenerated".into(),
        })
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_url_includes_only_given_bounds() {
        assert_eq!(payload_url(None, None), "http://127.0.0.1:9000/payload");
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(
            payload_url(Some(start), None),
            "http://127.0.0.1:9000/payload?start=2024-01-02"
        );
        assert_eq!(
            payload_url(Some(start), Some(start)),
            "http://127.0.0.1:9000/payload?start=2024-01-02&end=2024-01-02"
        );
    }

    #[test]
    fn payload_tolerates_missing_sections() {
        let payload: DashboardPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.transmitters.is_empty());
        assert!(payload.heatmap.is_none());
        assert_eq!(payload.power_buckets.total(), 0);
        assert_eq!(payload.system, SystemStatus::default());
        assert!(payload.details_for("FR-001").is_none());
    }

    #[test]
    fn details_are_looked_up_by_transmitter() {
        let payload: DashboardPayload = serde_json::from_str(
            r#"{
                "details": [{
                    "transmitter_id": "FR-002",
                    "antenna_type": "Directional",
                    "azimuth_deg": 270,
                    "model": "FM-4821",
                    "service_history": [{"date": "2024-06-15", "kind": "Upgrade"}]
                }],
                "system": {"active_alerts": 2, "updates_today": 4}
            }"#,
        )
        .unwrap();
        let details = payload.details_for("FR-002").unwrap();
        assert_eq!(details.model, "FM-4821");
        assert_eq!(details.service_history[0].kind.label(), "upgrade");
        assert_eq!(payload.system.active_alerts, 2);
        assert!(payload.details_for("FR-001").is_none());
    }
}
