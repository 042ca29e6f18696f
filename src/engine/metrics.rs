/*!
 * Engine Metrics
 * Running counters and the performance summary derived from them
 */

use super::snapshot::EngineStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

/// Cumulative engine counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Processes that reached TERMINATED
    pub completed: u64,
    /// Cycles in which an instruction executed
    pub busy_cycles: u64,
    /// Sum over cycles of the ready-queue length
    pub wait_cycles: u64,
    /// Sum over completed processes of first dispatch minus arrival
    pub response_cycles: u64,
    pub admissions: u64,
    pub dispatches: u64,
    pub preemptions: u64,
    pub blocks: u64,
    pub unblocks: u64,
    pub suspensions: u64,
    pub resumptions: u64,
}

/// Performance summary as shown by the front end
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Completed processes per wall-clock second since start
    #[serde(rename = "Throughput")]
    pub throughput: f64,
    /// Busy cycles over elapsed cycles
    #[serde(rename = "CPU_Utilization")]
    pub cpu_utilization: f64,
    #[serde(rename = "Avg_Wait_Time")]
    pub avg_wait_time: f64,
    #[serde(rename = "Avg_Response_Time")]
    pub avg_response_time: f64,
}

impl PerformanceMetrics {
    pub const THROUGHPUT: &'static str = "Throughput";
    pub const CPU_UTILIZATION: &'static str = "CPU_Utilization";
    pub const AVG_WAIT_TIME: &'static str = "Avg_Wait_Time";
    pub const AVG_RESPONSE_TIME: &'static str = "Avg_Response_Time";

    /// Derive the summary from a status snapshot
    ///
    /// Every ratio with a zero denominator reports 0.
    pub fn compute(status: &EngineStatus, now: Instant) -> Self {
        let stats = &status.stats;
        let elapsed = status
            .started_at
            .map(|started| now.saturating_duration_since(started).as_secs_f64())
            .unwrap_or(0.0);

        let population = stats.completed + status.live_processes as u64;

        Self {
            throughput: ratio(stats.completed as f64, elapsed),
            cpu_utilization: ratio(stats.busy_cycles as f64, status.global_cycle as f64),
            avg_wait_time: ratio(stats.wait_cycles as f64, population as f64),
            avg_response_time: ratio(stats.response_cycles as f64, stats.completed as f64),
        }
    }

    /// Keyed view: Throughput, CPU_Utilization, Avg_Wait_Time, Avg_Response_Time
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            (Self::THROUGHPUT, self.throughput),
            (Self::CPU_UTILIZATION, self.cpu_utilization),
            (Self::AVG_WAIT_TIME, self.avg_wait_time),
            (Self::AVG_RESPONSE_TIME, self.avg_response_time),
        ])
    }
}

#[inline]
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
