//! Export job timeline configuration.

use serde::{Deserialize, Serialize};

/// Timing and progress parameters for simulated export progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Delay between job creation and the first advancement step.
    #[serde(default = "default_start_delay")]
    pub start_delay_ms: u64,
    /// Interval between subsequent advancement steps.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Progress assigned when a job enters `processing`.
    #[serde(default = "default_initial_progress")]
    pub initial_progress: u8,
    /// Progress added on every tick after the first.
    #[serde(default = "default_progress_step")]
    pub progress_step: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: default_start_delay(),
            tick_interval_ms: default_tick_interval(),
            initial_progress: default_initial_progress(),
            progress_step: default_progress_step(),
        }
    }
}

fn default_start_delay() -> u64 {
    100
}

fn default_tick_interval() -> u64 {
    200
}

fn default_initial_progress() -> u8 {
    10
}

fn default_progress_step() -> u8 {
    10
}
