//! Downloadable batch report document.
//!
//! The report is the one externally visible artifact of the system. Field
//! names and nesting are a stable contract: flat batch fields plus a nested
//! composition object, with an ISO 8601 generation stamp.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::batches::{Batch, Composition};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: String,
    pub truck_id: String,
    pub total_waste_kg: f64,
    pub segregation_score: u8,
    pub co2_saved_kg: f64,
    pub composition: Composition,
    /// ISO 8601 with millisecond precision, e.g. `2025-11-04T12:00:00.000Z`.
    pub generated_at: String,
}

/// Build the report for a batch at the given generation time (the facility
/// clock's `now()`, so report stamps are deterministic in tests).
pub fn build_report(batch: &Batch, generated_at: DateTime<Utc>) -> BatchReport {
    BatchReport {
        batch_id: batch.id.clone(),
        truck_id: batch.truck_id.clone(),
        total_waste_kg: batch.total_waste_kg,
        segregation_score: batch.segregation_score,
        co2_saved_kg: batch.co2_saved_kg,
        composition: batch.composition,
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Suggested download name, e.g. `BinTDT_Report_BATCH-001_1762257600000.json`.
pub fn report_file_name(batch: &Batch, generated_at: DateTime<Utc>) -> String {
    format!(
        "BinTDT_Report_{}_{}.json",
        batch.id,
        generated_at.timestamp_millis()
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::batches::BatchStatus;

    fn report_batch() -> Batch {
        Batch {
            id: "BATCH-001".to_string(),
            truck_id: "Car 1".to_string(),
            zone: "Ward 7 - Kothrud".to_string(),
            collected_at: Utc
                .with_ymd_and_hms(2025, 11, 4, 10, 32, 0)
                .single()
                .unwrap(),
            status: BatchStatus::ReadyForSale,
            total_waste_kg: 245.8,
            segregation_score: 87,
            co2_saved_kg: 32.4,
            composition: Composition {
                plastic: 35.0,
                paper: 28.0,
                organic: 25.0,
                metal: 12.0,
            },
            societies: Vec::new(),
            revenue: None,
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 4, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn test_report_field_names_are_stable() {
        let report = build_report(&report_batch(), noon());
        let value = serde_json::to_value(&report).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "batch_id",
            "truck_id",
            "total_waste_kg",
            "segregation_score",
            "co2_saved_kg",
            "composition",
            "generated_at",
        ] {
            assert!(object.contains_key(key), "missing report field `{key}`");
        }
        assert_eq!(object.len(), 7);

        let composition = object["composition"].as_object().unwrap();
        for key in ["plastic", "paper", "organic", "metal"] {
            assert!(composition.contains_key(key));
        }
    }

    #[test]
    fn test_report_values_copy_the_batch() {
        let report = build_report(&report_batch(), noon());
        assert_eq!(report.batch_id, "BATCH-001");
        assert_eq!(report.truck_id, "Car 1");
        assert_eq!(report.total_waste_kg, 245.8);
        assert_eq!(report.segregation_score, 87);
        assert_eq!(report.co2_saved_kg, 32.4);
        assert_eq!(report.composition.plastic, 35.0);
    }

    #[test]
    fn test_generation_stamp_is_iso8601() {
        let report = build_report(&report_batch(), noon());
        assert_eq!(report.generated_at, "2025-11-04T12:00:00.000Z");
    }

    #[test]
    fn test_file_name() {
        let name = report_file_name(&report_batch(), noon());
        assert!(name.starts_with("BinTDT_Report_BATCH-001_"));
        assert!(name.ends_with(".json"));
    }
}
