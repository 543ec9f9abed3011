//! Process resource monitoring
//!
//! Samples the server process itself (CPU share and resident memory) at a
//! configurable interval and emits the readings through `tracing`.

use std::time::Duration;
use sysinfo::{Pid, ProcessesToUpdate, System};
use tokio::time;
use tracing::{info, warn};

pub struct MonitorConfig {
    /// Sampling interval in seconds
    pub interval_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self { interval_secs: 120 }
    }
}

/// One reading of the server process
#[derive(Debug, Clone)]
pub struct ResourceSnapshot {
    pub cpu_percentage: f32,
    pub memory_usage_mb: f64,
}

impl ResourceSnapshot {
    pub fn format_for_log(&self) -> String {
        format!(
            "CPU: {:.2}% | Memory: {:.2} MB",
            self.cpu_percentage, self.memory_usage_mb
        )
    }
}

/// Background task sampling the current process forever. Spawn it from main.
pub async fn start_resource_monitoring(config: MonitorConfig) {
    info!(
        "Starting process resource monitoring every {}s",
        config.interval_secs
    );

    let mut sys = System::new_all();
    let pid = Pid::from_u32(std::process::id());
    let mut interval = time::interval(Duration::from_secs(config.interval_secs.max(1)));

    // the first tick fires immediately, skip it
    interval.tick().await;

    loop {
        interval.tick().await;
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        match sys.process(pid) {
            Some(process) => {
                let snapshot = ResourceSnapshot {
                    cpu_percentage: process.cpu_usage(),
                    memory_usage_mb: process.memory() as f64 / (1024.0 * 1024.0),
                };
                info!("{}", snapshot.format_for_log());
            }
            None => warn!("Server process {} not visible to sysinfo", pid),
        }
    }
}
