//! Balance simulator for Semi Trucker.
//! Run with: cargo test -p semi-trucker simulate -- --nocapture

use super::catalog::{Catalog, Job};
use super::logic;
use super::state::{Business, PlayerData, BUSINESS_COUNT};

/// Seconds of income a purchase may be saved up for.
const SAVE_HORIZON_SECS: u64 = 30;

/// What to buy next.
#[derive(Clone, Copy, Debug)]
enum Purchase {
    Truck(Business),
    Driver(Business),
}

#[derive(Debug)]
struct Outcome {
    data: PlayerData,
    purchases: u32,
    /// Second at which each tier was first owned.
    first_owned: [Option<u32>; BUSINESS_COUNT],
}

impl Outcome {
    fn tiers_owned(&self) -> usize {
        self.first_owned.iter().filter(|t| t.is_some()).count()
    }
}

/// Whole seconds a cycle takes when ticked once per second.
fn cycle_secs(job: &Job) -> u64 {
    job.delay.div_ceil(1_000)
}

/// Cents per second one unit earns, given how often the player checks in.
fn unit_rate(job: &Job, managed: bool, attention_secs: u64) -> f64 {
    let secs = if managed {
        cycle_secs(job)
    } else {
        cycle_secs(job).div_ceil(attention_secs) * attention_secs
    };
    job.profit as f64 / secs as f64
}

fn estimated_income(data: &PlayerData, catalog: &Catalog, attention_secs: u64) -> f64 {
    data.jobs
        .iter()
        .map(|(&id, s)| s.amount as f64 * unit_rate(catalog.get(id), s.managed, attention_secs))
        .sum()
}

/// The purchase with the shortest payback that can be saved up for soon.
fn find_best_purchase(
    data: &PlayerData,
    catalog: &Catalog,
    attention_secs: u64,
) -> Option<(Purchase, u64)> {
    let reach = data.money as f64
        + estimated_income(data, catalog, attention_secs) * SAVE_HORIZON_SECS as f64;
    let mut best: Option<(f64, Purchase, u64)> = None; // (payback_seconds, purchase, cost)

    let mut consider = |payback: f64, purchase: Purchase, cost: u64| {
        if cost as f64 > reach {
            return;
        }
        let dominated = best.as_ref().is_some_and(|(bp, _, _)| *bp <= payback);
        if !dominated {
            best = Some((payback, purchase, cost));
        }
    };

    for job in catalog.iter() {
        let stats = data.jobs.get(&job.id);
        let amount = stats.map_or(0, |s| s.amount);
        let managed = stats.is_some_and(|s| s.managed);

        let cost = job.cost(amount);
        consider(
            cost as f64 / unit_rate(job, managed, attention_secs),
            Purchase::Truck(job.id),
            cost,
        );

        if amount > 0 && !managed {
            let gain = amount as f64
                * (unit_rate(job, true, attention_secs) - unit_rate(job, false, attention_secs));
            if gain > 0.0 {
                consider(job.auto_cost as f64 / gain, Purchase::Driver(job.id), job.auto_cost);
            }
        }
    }

    best.map(|(_, p, cost)| (p, cost))
}

fn report_stats(data: &PlayerData, catalog: &Catalog, seconds: u32, purchases: u32) {
    eprintln!("┌─── {}m{}s ─────────────────────────", seconds / 60, seconds % 60);
    eprintln!(
        "│ Balance: ${}  Purchases: {}",
        logic::format_money(data.money),
        purchases
    );
    let fleet: Vec<String> = data
        .jobs
        .iter()
        .filter(|(_, s)| s.amount > 0)
        .map(|(id, s)| format!("{}:{}{}", id, s.amount, if s.managed { "(A)" } else { "" }))
        .collect();
    eprintln!("│ Fleet: {}", fleet.join("  "));
    eprintln!(
        "│ Automated income: ${}/s",
        logic::format_money(logic::income_rate(data, catalog) as u64)
    );
    eprintln!("└────────────────────────────────────");
}

/// Play greedily for `total_seconds`, checking in every `attention_secs`.
fn simulate(total_seconds: u32, attention_secs: u64) -> Outcome {
    let catalog = Catalog::default();
    let mut data = PlayerData::new_player(0);
    let mut purchases: u32 = 0;
    let mut first_owned = [None; BUSINESS_COUNT];
    first_owned[Business::HotDog.index()] = Some(0);

    let report_times = [60, 300, 600, 1200, 1800, 3600];
    let mut next_report = 0;

    eprintln!("\n========================================");
    eprintln!("  Semi Trucker balance simulator");
    eprintln!(
        "  Play time: {}m, checking in every {}s",
        total_seconds / 60,
        attention_secs
    );
    eprintln!("========================================\n");

    for second in 0..total_seconds {
        let attentive = u64::from(second) % attention_secs == 0;

        if attentive {
            for id in Business::ALL {
                let idle = data
                    .jobs
                    .get(&id)
                    .is_some_and(|s| s.amount > 0 && !s.managed && !s.is_running());
                if idle {
                    logic::start_job(&mut data, &catalog, id).unwrap();
                }
            }
        }

        let before = data.money;
        logic::tick(&mut data, &catalog, 1_000);
        assert!(data.money >= before, "tick lowered the balance at {}s", second);

        if attentive {
            // Safety limit
            for _ in 0..20 {
                let Some((purchase, cost)) = find_best_purchase(&data, &catalog, attention_secs)
                else {
                    break;
                };
                if !logic::can_afford(&data, cost) {
                    break;
                }
                match purchase {
                    Purchase::Truck(id) => {
                        logic::purchase(&mut data, &catalog, id).unwrap();
                        first_owned[id.index()].get_or_insert(second);
                    }
                    Purchase::Driver(id) => logic::automate(&mut data, &catalog, id).unwrap(),
                }
                purchases += 1;
            }
        }

        if next_report < report_times.len() && second + 1 >= report_times[next_report] {
            report_stats(&data, &catalog, second + 1, purchases);
            next_report += 1;
        }
    }

    Outcome {
        data,
        purchases,
        first_owned,
    }
}

#[test]
fn simulate_attentive_30min() {
    let out = simulate(1_800, 1);
    assert!(out.purchases > 0);
    assert!(
        out.first_owned[Business::Newspaper.index()].is_some_and(|t| t <= 120),
        "newspaper too late: {:?}",
        out.first_owned
    );
    assert!(out.tiers_owned() >= 5, "only {} tiers", out.tiers_owned());
}

#[test]
fn simulate_idle_player_hires_drivers() {
    let out = simulate(1_800, 30);
    assert!(
        out.data.jobs.values().any(|s| s.managed),
        "no driver hired: {:?}",
        out.data.jobs
    );
}

#[test]
fn tiers_unlock_in_order() {
    let out = simulate(1_800, 1);
    let times: Vec<u32> = out.first_owned.iter().flatten().copied().collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]), "{:?}", out.first_owned);
}
