//! Semi Trucker accounting: pure functions over `PlayerData`, fully testable.

use super::catalog::{Catalog, Job};
use super::error::{JobError, JobResult};
use super::state::{Business, JobStats, PlayerData};

/// Account for `delta_ms` elapsed milliseconds on every running job.
/// Returns the money earned, which has already been added to the balance.
pub fn tick(data: &mut PlayerData, catalog: &Catalog, delta_ms: u64) -> u64 {
    let mut earned: u64 = 0;
    for (&id, stats) in data.jobs.iter_mut() {
        earned = earned.saturating_add(manage_job(stats, catalog.get(id), delta_ms));
    }
    data.money = data.money.saturating_add(earned);
    if earned > 0 {
        log::debug!("tick: +{} over {}ms", earned, delta_ms);
    }
    earned
}

/// Advance one job's timer and settle any completed cycles.
/// A stored `Some(0)` is idle, same as `None`.
fn manage_job(stats: &mut JobStats, job: &Job, delta_ms: u64) -> u64 {
    let Some(time) = stats.time.filter(|&t| t > 0) else {
        return 0;
    };

    let delay = i64::try_from(job.delay).unwrap_or(i64::MAX);
    let timer = i64::try_from(time)
        .unwrap_or(i64::MAX)
        .saturating_sub(i64::try_from(delta_ms).unwrap_or(i64::MAX));
    if timer > 0 {
        stats.time = Some(timer as u64);
        return 0;
    }

    // Automated jobs restart on their own and are settled one cycle per tick.
    // A manual job left on the road settles every cycle that fit in the gap.
    let cycles = if !stats.managed && timer < -delay {
        1 + timer.unsigned_abs() / job.delay
    } else {
        1
    };

    stats.time = if stats.managed { Some(job.delay) } else { None };

    job.profit
        .saturating_mul(stats.amount as u64)
        .saturating_mul(cycles)
}

/// Put a manual job on the road.
pub fn start_job(data: &mut PlayerData, catalog: &Catalog, id: Business) -> JobResult<()> {
    if let Some(stats) = data.jobs.get(&id) {
        if stats.managed {
            return Err(JobError::AlreadyAutomated(id));
        }
        if stats.is_running() {
            return Err(JobError::AlreadyRunning(id));
        }
    }
    let delay = catalog.get(id).delay;
    data.jobs.entry(id).or_default().time = Some(delay);
    Ok(())
}

/// Buy one more unit of `id`. Returns the price paid.
pub fn purchase(data: &mut PlayerData, catalog: &Catalog, id: Business) -> JobResult<u64> {
    let cost = catalog.get(id).cost(data.amount_of(id));
    if !can_afford(data, cost) {
        return Err(JobError::InsufficientFunds {
            needed: cost,
            available: data.money,
        });
    }
    data.money -= cost;
    let stats = data.jobs.entry(id).or_default();
    stats.amount = stats.amount.saturating_add(1);
    log::info!("bought {} #{} for {}", id, stats.amount, cost);
    Ok(cost)
}

/// Automate `id` and put it on the road.
pub fn automate(data: &mut PlayerData, catalog: &Catalog, id: Business) -> JobResult<()> {
    if data.jobs.get(&id).is_some_and(|s| s.managed) {
        return Err(JobError::AlreadyAutomated(id));
    }
    let job = catalog.get(id);
    if !can_afford(data, job.auto_cost) {
        return Err(JobError::InsufficientFunds {
            needed: job.auto_cost,
            available: data.money,
        });
    }
    data.money -= job.auto_cost;
    let stats = data.jobs.entry(id).or_default();
    stats.managed = true;
    if !stats.is_running() {
        stats.time = Some(job.delay);
    }
    log::info!("automated {} for {}", id, job.auto_cost);
    Ok(())
}

/// Settle the time that passed since the last save in a single tick.
pub fn sync_elapsed(data: &mut PlayerData, catalog: &Catalog, now_ms: u64) -> u64 {
    let delta = now_ms.saturating_sub(data.last_time);
    let earned = tick(data, catalog, delta);
    data.last_time = data.last_time.max(now_ms);
    if earned > 0 {
        log::info!("offline catch-up: +{} over {}ms", earned, delta);
    }
    earned
}

/// Restart automated jobs whose cycle was lost, e.g. from an old save.
pub fn resume_automated(data: &mut PlayerData, catalog: &Catalog) {
    for (&id, stats) in data.jobs.iter_mut() {
        if stats.managed && !stats.is_running() {
            stats.time = Some(catalog.get(id).delay);
        }
    }
}

pub fn can_afford(data: &PlayerData, cost: u64) -> bool {
    data.money >= cost
}

/// Fraction of the current cycle already driven, 0.0 when idle.
pub fn job_progress(stats: &JobStats, job: &Job) -> f64 {
    match stats.time {
        Some(t) if t > 0 => {
            let left = t.min(job.delay) as f64 / job.delay as f64;
            1.0 - left
        }
        _ => 0.0,
    }
}

/// Steady income of automated jobs, in cents per second.
pub fn income_rate(data: &PlayerData, catalog: &Catalog) -> f64 {
    data.jobs
        .iter()
        .filter(|(_, s)| s.managed)
        .map(|(&id, s)| {
            let job = catalog.get(id);
            job.profit as f64 * s.amount as f64 * 1000.0 / job.delay as f64
        })
        .sum()
}

/// Format cents as `1,234.56`.
pub fn format_money(cents: u64) -> String {
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}.{:02}", grouped, cents % 100)
}
