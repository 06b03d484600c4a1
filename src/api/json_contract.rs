use serde::{Deserialize, Serialize};

use crate::core::{DateRange, ViewportState};
use crate::error::{GanttError, GanttResult};
use crate::render::Renderer;

use super::controller::CalendarLayout;
use super::task_layout::TaskRow;
use super::{GanttChart, LayoutPhase};

pub const LAYOUT_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable picture of everything a renderer needs for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub phase: LayoutPhase,
    pub range: DateRange,
    pub container_width: f64,
    pub viewport: ViewportState,
    pub layout: Option<CalendarLayout>,
    pub rows: Vec<TaskRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: LayoutSnapshot,
}

impl LayoutSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> GanttResult<String> {
        let payload = LayoutSnapshotJsonContractV1 {
            schema_version: LAYOUT_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            GanttError::InvalidData(format!("failed to serialize layout snapshot contract v1: {e}"))
        })
    }

    /// Accepts a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> GanttResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<LayoutSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: LayoutSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            GanttError::InvalidData(format!("failed to parse layout snapshot json payload: {e}"))
        })?;
        if payload.schema_version != LAYOUT_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(GanttError::InvalidData(format!(
                "unsupported layout snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> GanttChart<R> {
    #[must_use]
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            phase: self.controller.phase(),
            range: self.controller.range(),
            container_width: self.controller.container_width(),
            viewport: self.controller.viewport(),
            layout: self.controller.layout().cloned(),
            rows: self.task_rows(),
        }
    }
}
