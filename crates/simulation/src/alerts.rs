//! Advisory alerts for the operator: delayed trucks, poor segregation, and
//! an explicit all-clear when nothing needs attention.

use bevy::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::batches::{Batch, BatchLedger, BatchStatus};
use crate::clock::FacilityClock;
use crate::config::{COLLECTION_DELAY_ALERT_HOURS, QUALITY_ALERT_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    Delay,
    Quality,
    AllClear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Info,
}

/// A single advisory item shown in the attention panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Stable id, e.g. `BATCH-003-delay`; the all-clear item is `all-clear`.
    pub id: String,
    pub kind: AlertKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

/// Derive the advisory list for a set of batches at a reference time.
///
/// Pure and deterministic: the same batches and the same `now` always yield
/// the same alerts, in ledger order.
pub fn derive_alerts(batches: &[Batch], now: DateTime<Utc>) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for batch in batches {
        let age_hours = (now - batch.collected_at).num_minutes() as f64 / 60.0;

        // Truck still in the field for too long.
        if batch.status == BatchStatus::Collected && age_hours > COLLECTION_DELAY_ALERT_HOURS {
            alerts.push(Alert {
                id: format!("{}-delay", batch.id),
                kind: AlertKind::Delay,
                severity: Severity::Warning,
                title: format!("Truck {} delayed", batch.truck_id),
                description: format!(
                    "{} collected over {:.1}h ago in {} but has not completed MRF \
                     processing yet.",
                    batch.id, age_hours, batch.zone
                ),
            });
        }

        // Low segregation quality, once segregation data exists.
        if batch.status.segregation_available() && batch.segregation_score < QUALITY_ALERT_THRESHOLD
        {
            alerts.push(Alert {
                id: format!("{}-quality", batch.id),
                kind: AlertKind::Quality,
                severity: Severity::Warning,
                title: format!("Low segregation score on {}", batch.id),
                description: format!(
                    "Segregation quality is {}%. Consider manual review or rescan.",
                    batch.segregation_score
                ),
            });
        }
    }

    if alerts.is_empty() {
        alerts.push(Alert {
            id: "all-clear".to_string(),
            kind: AlertKind::AllClear,
            severity: Severity::Info,
            title: "All systems normal".to_string(),
            description: "No critical issues detected across today's collection runs and MRF \
                          processing."
                .to_string(),
        });
    }

    alerts
}

/// Current advisory list, refreshed from the ledger each tick.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertBoard {
    pub alerts: Vec<Alert>,
}

pub fn update_alerts(
    ledger: Res<BatchLedger>,
    clock: Res<FacilityClock>,
    mut board: ResMut<AlertBoard>,
) {
    board.alerts = derive_alerts(&ledger.batches, clock.now());
}
