use std::{collections::VecDeque, sync::Mutex};

use chrono::{DateTime, Utc};
use diesel::RunQueryDsl;
use serde::Serialize;
use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System, MINIMUM_CPU_UPDATE_INTERVAL};

use crate::{domain::percentage, telemetry::spawn_blocking_with_tracing, utils::{round_to, run_query, DbPool}};

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Readings{
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
    pub database_up: bool
}

// 100 minus penalties for each stressed resource, clamped to 0..=100
pub fn score(readings: &Readings) -> f64 {
    let mut score = 100.0;
    if readings.cpu_percent > 80.0 {
        score -= 10.0;
    }
    if readings.memory_percent > 80.0 {
        score -= 10.0;
    }
    if readings.disk_percent > 90.0 {
        score -= 10.0;
    }
    if !readings.database_up {
        score -= 30.0;
    }

    f64::clamp(score, 0.0, 100.0)
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthSample{
    pub score: f64,
    pub recorded_at: DateTime<Utc>
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChange{
    pub current: f64,
    pub previous: Option<f64>,
    pub change: String
}

/// Fixed-size history of health scores, oldest samples are dropped first
pub struct HealthHistory{
    capacity: usize,
    samples: Mutex<VecDeque<HealthSample>>
}

impl HealthHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        HealthHistory{
            capacity,
            samples: Mutex::new(VecDeque::with_capacity(capacity))
        }
    }

    pub fn record(&self, score: f64) -> HealthChange {
        let mut samples = self.samples.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = samples.back().map(|s| s.score);

        if samples.len() == self.capacity {
            samples.pop_front();
        }
        samples.push_back(HealthSample{ score, recorded_at: Utc::now() });

        HealthChange{
            current: score,
            previous,
            change: percentage::change(score, previous.unwrap_or(0.0))
        }
    }

    // Latest sample against the one before it, without taking a new one
    pub fn latest(&self) -> Option<HealthChange> {
        let samples = self.samples.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let current = samples.back()?.score;
        let previous = samples.iter().rev().nth(1).map(|s| s.score);

        Some(HealthChange{
            current,
            previous,
            change: percentage::change(current, previous.unwrap_or(0.0))
        })
    }

    pub fn samples(&self) -> Vec<HealthSample> {
        let samples = self.samples.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        samples.iter().copied().collect()
    }
}

fn system_readings() -> (f64, f64, f64) {
    let mut sys = System::new_with_specifics(
        RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
            .with_memory(MemoryRefreshKind::nothing().with_ram())
    );
    // cpu usage is a delta between two refreshes
    std::thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_cpu_usage();

    let cpu = sys.global_cpu_usage() as f64;
    let memory = if sys.total_memory() == 0 {
        0.0
    } else {
        sys.used_memory() as f64 / sys.total_memory() as f64 * 100.0
    };

    let disks = Disks::new_with_refreshed_list();
    let (total, available) = disks.list()
        .iter()
        .fold((0u64, 0u64), |(t, a), d| (t + d.total_space(), a + d.available_space()));
    let disk = if total == 0 {
        0.0
    } else {
        (total - available) as f64 / total as f64 * 100.0
    };

    (round_to(cpu, 1), round_to(memory, 1), round_to(disk, 1))
}

#[tracing::instrument(
    "Probing system health",
    skip(pool)
)]
pub async fn probe(pool: &DbPool) -> Readings {
    let database_up = run_query(pool, |conn| diesel::sql_query("SELECT 1").execute(conn))
        .await
        .map_err(|e| tracing::warn!(error = ?e, "Database health check failed"))
        .is_ok();

    let (cpu_percent, memory_percent, disk_percent) = match spawn_blocking_with_tracing(system_readings).await {
        Ok(readings) => readings,
        Err(e) => {
            tracing::warn!(error = ?e, "Failed to read system metrics");
            (0.0, 0.0, 0.0)
        }
    };

    Readings{ cpu_percent, memory_percent, disk_percent, database_up }
}
