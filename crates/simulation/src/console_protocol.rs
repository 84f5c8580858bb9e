//! Operator console text protocol.
//!
//! Defines the JSON command/response envelope that external programs
//! (scripts, demo front ends, test harnesses) use to drive the facility over
//! newline-delimited JSON on stdin/stdout.
//!
//! These types live in the `simulation` crate so they can be unit-tested
//! without the app binary; the actual I/O loop lives in
//! `crates/app/src/console_mode.rs`.

use serde::{Deserialize, Serialize};

use crate::chart_data::ChartSegment;
use crate::facility_actions::{ActionResult, OperatorAction};
use crate::observation::FacilitySnapshot;
use crate::reports::BatchReport;
use crate::rewards::RewardBreakdown;

// ---------------------------------------------------------------------------
// Commands (stdin → simulation)
// ---------------------------------------------------------------------------

/// A single command sent by the console client. Each line of stdin is parsed
/// as one `ConsoleCommand`; the `cmd` field acts as the discriminator tag.
#[derive(Debug, Deserialize)]
#[serde(tag = "cmd")]
pub enum ConsoleCommand {
    /// Request the current facility snapshot.
    #[serde(rename = "observe")]
    Observe,

    /// Execute a single operator action.
    #[serde(rename = "act")]
    Act { action: OperatorAction },

    /// Execute multiple operator actions in sequence.
    #[serde(rename = "batch_act")]
    BatchAct { actions: Vec<OperatorAction> },

    /// Advance the simulation by `ticks` fixed-update ticks.
    #[serde(rename = "step")]
    Step { ticks: u64 },

    /// Generate the downloadable report document for a batch.
    #[serde(rename = "report")]
    Report { batch_id: String },

    /// Compute the reward distribution for a batch.
    #[serde(rename = "rewards")]
    Rewards { batch_id: String },

    /// Compute the composition donut geometry for a batch.
    #[serde(rename = "chart")]
    Chart { batch_id: String },

    /// Gracefully shut down the console session.
    #[serde(rename = "quit")]
    Quit,
}

// ---------------------------------------------------------------------------
// Responses (simulation → stdout)
// ---------------------------------------------------------------------------

/// Every response includes the protocol version and a tagged payload.
#[derive(Debug, Serialize)]
pub struct ConsoleResponse {
    /// Monotonically increasing protocol version (currently 1).
    pub protocol_version: u32,
    /// The response payload, flattened into this object.
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

/// Tagged payload variants for console responses.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ResponsePayload {
    /// The simulation is ready to accept commands.
    #[serde(rename = "ready")]
    Ready,

    /// A facility snapshot.
    #[serde(rename = "observation")]
    Observation { observation: FacilitySnapshot },

    /// Result of a single `act` command.
    #[serde(rename = "action_result")]
    ActionResult { result: ActionResult },

    /// Results of a `batch_act` command.
    #[serde(rename = "batch_result")]
    BatchResult { results: Vec<ActionResult> },

    /// The simulation has advanced; reports the current tick counter.
    #[serde(rename = "step_complete")]
    StepComplete { tick: u64 },

    /// A batch report document plus its suggested download name.
    #[serde(rename = "report")]
    Report {
        report: BatchReport,
        file_name: String,
    },

    /// Reward distribution for one batch. `eligible` is false for batches
    /// that have not reached ready-for-sale; the math still runs.
    #[serde(rename = "rewards")]
    Rewards {
        eligible: bool,
        breakdown: RewardBreakdown,
    },

    /// Donut segments for one batch's composition.
    #[serde(rename = "chart")]
    Chart {
        batch_id: String,
        segments: Vec<ChartSegment>,
    },

    /// An error occurred while processing the command.
    #[serde(rename = "error")]
    Error { message: String },

    /// The session is ending (response to `quit`).
    #[serde(rename = "goodbye")]
    Goodbye,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Current protocol version. Bump when the command/response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

/// Convenience constructor that wraps a payload with the current version.
pub fn make_response(payload: ResponsePayload) -> ConsoleResponse {
    ConsoleResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_observe_command() {
        let json = r#"{"cmd":"observe"}"#;
        let cmd: ConsoleCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, ConsoleCommand::Observe));
    }

    #[test]
    fn deserialize_act_command() {
        let json = r#"{"cmd":"act","action":{"SetPaused":{"paused":true}}}"#;
        let cmd: ConsoleCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, ConsoleCommand::Act { .. }));
    }

    #[test]
    fn deserialize_batch_act_command() {
        let json =
            r#"{"cmd":"batch_act","actions":["AnalyzeSample",{"SetPaused":{"paused":false}}]}"#;
        let cmd: ConsoleCommand = serde_json::from_str(json).unwrap();
        if let ConsoleCommand::BatchAct { actions } = cmd {
            assert_eq!(actions.len(), 2);
        } else {
            panic!("expected BatchAct");
        }
    }

    #[test]
    fn deserialize_step_command() {
        let json = r#"{"cmd":"step","ticks":100}"#;
        let cmd: ConsoleCommand = serde_json::from_str(json).unwrap();
        if let ConsoleCommand::Step { ticks } = cmd {
            assert_eq!(ticks, 100);
        } else {
            panic!("expected Step");
        }
    }

    #[test]
    fn deserialize_report_command() {
        let json = r#"{"cmd":"report","batch_id":"BATCH-001"}"#;
        let cmd: ConsoleCommand = serde_json::from_str(json).unwrap();
        if let ConsoleCommand::Report { batch_id } = cmd {
            assert_eq!(batch_id, "BATCH-001");
        } else {
            panic!("expected Report");
        }
    }

    #[test]
    fn deserialize_rewards_command() {
        let json = r#"{"cmd":"rewards","batch_id":"BATCH-002"}"#;
        let cmd: ConsoleCommand = serde_json::from_str(json).unwrap();
        if let ConsoleCommand::Rewards { batch_id } = cmd {
            assert_eq!(batch_id, "BATCH-002");
        } else {
            panic!("expected Rewards");
        }
    }

    #[test]
    fn deserialize_chart_command() {
        let json = r#"{"cmd":"chart","batch_id":"BATCH-001"}"#;
        let cmd: ConsoleCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, ConsoleCommand::Chart { .. }));
    }

    #[test]
    fn deserialize_quit_command() {
        let json = r#"{"cmd":"quit"}"#;
        let cmd: ConsoleCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, ConsoleCommand::Quit));
    }

    #[test]
    fn serialize_ready_response() {
        let resp = make_response(ResponsePayload::Ready);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"protocol_version\":1"));
        assert!(json.contains("\"type\":\"ready\""));
    }

    #[test]
    fn serialize_observation_response() {
        let resp = make_response(ResponsePayload::Observation {
            observation: FacilitySnapshot::default(),
        });
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"type\":\"observation\""));
        assert!(json.contains("\"tick\":0"));
    }

    #[test]
    fn serialize_action_result_response() {
        let resp = make_response(ResponsePayload::ActionResult {
            result: ActionResult::Success,
        });
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"type\":\"action_result\""));
        assert!(json.contains("\"result\":\"Success\""));
    }

    #[test]
    fn serialize_batch_result_response() {
        let resp = make_response(ResponsePayload::BatchResult {
            results: vec![ActionResult::Success, ActionResult::Success],
        });
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"type\":\"batch_result\""));
    }

    #[test]
    fn serialize_step_complete_response() {
        let resp = make_response(ResponsePayload::StepComplete { tick: 42 });
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"type\":\"step_complete\""));
        assert!(json.contains("\"tick\":42"));
    }

    #[test]
    fn serialize_rewards_response() {
        let resp = make_response(ResponsePayload::Rewards {
            eligible: true,
            breakdown: RewardBreakdown {
                batch_id: "BATCH-001".to_string(),
                revenue: 7374.0,
                pool: 1106.1,
                facility_retained: 6267.9,
                shares: Vec::new(),
            },
        });
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"type\":\"rewards\""));
        assert!(json.contains("\"eligible\":true"));
        assert!(json.contains("\"revenue\":7374.0"));
    }

    #[test]
    fn serialize_error_response() {
        let resp = make_response(ResponsePayload::Error {
            message: "something went wrong".to_string(),
        });
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"type\":\"error\""));
        assert!(json.contains("something went wrong"));
    }

    #[test]
    fn serialize_goodbye_response() {
        let resp = make_response(ResponsePayload::Goodbye);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"type\":\"goodbye\""));
    }

    #[test]
    fn invalid_command_returns_parse_error() {
        let json = r#"{"cmd":"nonexistent"}"#;
        assert!(serde_json::from_str::<ConsoleCommand>(json).is_err());
    }

    #[test]
    fn malformed_json_returns_parse_error() {
        let json = r#"{not valid json"#;
        assert!(serde_json::from_str::<ConsoleCommand>(json).is_err());
    }
}
