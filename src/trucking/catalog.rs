//! Static economy of every business: cost curve, payout and cycle length.
//!
//! Every number comes out of a closed-form curve over the business tier, so
//! higher tiers run longer cycles for bigger payouts while each unit of money
//! spent buys a little less profit than the tier below.

use serde::Deserialize;

use super::state::{Business, BUSINESS_COUNT};

/// Coefficients of the progression curve.
///
/// ```text
/// delay(id)   = base_delay + delay_quad * id^2 + delay_cube * max(id - 3, 0)^3
/// profit(id)  = (profit_base + profit_quad * id^2 + profit_cube * id^3
///                + profit_late^max(id - 3, 0) + id / 4) * currency_scale
/// initial(id) = entry_price * currency_scale + profit(id) * id / 2
/// auto(id)    = (auto_base + auto_quad * id^2) * currency_scale
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub base_delay: u64,
    pub delay_quad: u64,
    pub delay_cube: u64,
    pub profit_base: u64,
    pub profit_quad: u64,
    pub profit_cube: u64,
    pub profit_late: u64,
    pub entry_price: u64,
    pub auto_base: u64,
    pub auto_quad: u64,
    /// Smallest currency units per displayed unit (100 = cents).
    pub currency_scale: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_delay: 2_000,
            delay_quad: 1_250,
            delay_cube: 1_000,
            profit_base: 49,
            profit_quad: 100,
            profit_cube: 10,
            profit_late: 60,
            entry_price: 10,
            auto_base: 2_000,
            auto_quad: 2_000,
            currency_scale: 100,
        }
    }
}

/// Static description of one business.
#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    pub id: Business,
    pub name: &'static str,
    /// Paid per unit owned for each completed cycle.
    pub profit: u64,
    /// Cycle length in milliseconds. Never zero.
    pub delay: u64,
    pub initial_price: u64,
    pub increment: u64,
    /// One-time price of automation.
    pub auto_cost: u64,
}

impl Job {
    /// Price of the next unit when `amount` are already owned.
    pub fn cost(&self, amount: u32) -> u64 {
        self.initial_price
            .saturating_add(self.increment.saturating_mul(amount as u64))
    }
}

/// Build the description of `id` from the given curve.
pub fn make_job(id: Business, tuning: &Tuning) -> Job {
    let n = id.index() as u64;
    let late = n.saturating_sub(3);

    let delay = tuning
        .base_delay
        .saturating_add(tuning.delay_quad.saturating_mul(n * n))
        .saturating_add(tuning.delay_cube.saturating_mul(late.pow(3)))
        .max(1);
    let profit = tuning
        .profit_base
        .saturating_add(tuning.profit_quad.saturating_mul(n * n))
        .saturating_add(tuning.profit_cube.saturating_mul(n.pow(3)))
        .saturating_add(tuning.profit_late.saturating_pow(late as u32))
        .saturating_add(n / 4)
        .saturating_mul(tuning.currency_scale);
    let initial_price = tuning
        .entry_price
        .saturating_mul(tuning.currency_scale)
        .saturating_add(profit.saturating_mul(n) / 2);
    let increment = (initial_price / 2).max(1);
    let auto_cost = tuning
        .auto_base
        .saturating_add(tuning.auto_quad.saturating_mul(n * n))
        .saturating_mul(tuning.currency_scale);

    Job {
        id,
        name: id.name(),
        profit,
        delay,
        initial_price,
        increment,
        auto_cost,
    }
}

/// Description of `id` with the shipped curve.
pub fn describe_job(id: Business) -> Job {
    make_job(id, &Tuning::default())
}

/// Read-only lookup table of every business.
#[derive(Clone, Debug)]
pub struct Catalog {
    jobs: [Job; BUSINESS_COUNT],
}

impl Catalog {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            jobs: Business::ALL.map(|id| make_job(id, tuning)),
        }
    }

    pub fn get(&self, id: Business) -> &Job {
        &self.jobs[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Profit per unit of purchase price.
    fn efficiency(job: &Job) -> f64 {
        job.profit as f64 / job.initial_price as f64
    }

    #[test]
    fn shipped_delays() {
        let delays: Vec<u64> = Business::ALL.iter().map(|&b| describe_job(b).delay).collect();
        assert_eq!(delays, vec![2_000, 3_250, 7_000, 13_250, 23_000, 41_250, 74_000]);
    }

    #[test]
    fn shipped_profits_in_cents() {
        let profits: Vec<u64> = Business::ALL.iter().map(|&b| describe_job(b).profit).collect();
        assert_eq!(
            profits,
            vec![5_000, 16_000, 53_000, 122_000, 235_000, 740_000, 22_181_000]
        );
    }

    #[test]
    fn shipped_prices_in_cents() {
        let prices: Vec<u64> = Business::ALL
            .iter()
            .map(|&b| describe_job(b).initial_price)
            .collect();
        assert_eq!(
            prices,
            vec![1_000, 9_000, 54_000, 184_000, 471_000, 1_851_000, 66_544_000]
        );
    }

    #[test]
    fn automation_cost_grows_with_tier() {
        assert_eq!(describe_job(Business::HotDog).auto_cost, 200_000);
        assert_eq!(describe_job(Business::Newspaper).auto_cost, 400_000);
        assert_eq!(describe_job(Business::Military).auto_cost, 7_400_000);
    }

    #[test]
    fn cost_curve_is_linear() {
        let job = describe_job(Business::Newspaper);
        assert_eq!(job.increment, 4_500);
        assert_eq!(job.cost(0), 9_000);
        assert_eq!(job.cost(1), 13_500);
        assert_eq!(job.cost(10), 54_000);
    }

    #[test]
    fn cost_saturates_instead_of_overflowing() {
        let job = describe_job(Business::Military);
        assert!(job.cost(u32::MAX) >= job.cost(u32::MAX - 1));
    }

    #[test]
    fn efficiency_drops_every_tier() {
        let catalog = Catalog::default();
        let ratios: Vec<f64> = catalog.iter().map(efficiency).collect();
        for pair in ratios.windows(2) {
            assert!(pair[1] < pair[0], "ratios not decreasing: {:?}", ratios);
        }
    }

    #[test]
    fn catalog_matches_describe_job() {
        let catalog = Catalog::default();
        for b in Business::ALL {
            assert_eq!(catalog.get(b), &describe_job(b));
            assert_eq!(catalog.get(b).id, b);
        }
    }

    #[test]
    fn unit_scale_reproduces_whole_unit_curve() {
        let tuning = Tuning {
            currency_scale: 1,
            ..Tuning::default()
        };
        let job = make_job(Business::HotDog, &tuning);
        assert_eq!(job.profit, 50);
        assert_eq!(job.delay, 2_000);
        assert_eq!(job.initial_price, 10);
    }

    #[test]
    fn partial_tuning_override_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "base_delay": 500 }"#).unwrap();
        assert_eq!(tuning.base_delay, 500);
        assert_eq!(tuning.currency_scale, 100);
        assert_eq!(make_job(Business::HotDog, &tuning).delay, 500);
    }

    #[test]
    fn oversized_tuning_saturates() {
        let tuning: Tuning = serde_json::from_str(
            r#"{ "profit_late": 10000000, "delay_cube": 18446744073709551615, "auto_quad": 18446744073709551615 }"#,
        )
        .unwrap();
        let job = make_job(Business::Military, &tuning);
        assert_eq!(job.profit, u64::MAX);
        assert_eq!(job.delay, u64::MAX);
        assert_eq!(job.auto_cost, u64::MAX);
        assert!(job.initial_price > 0);
        assert_eq!(job.cost(u32::MAX), u64::MAX);
    }

    #[test]
    fn zero_delay_curve_is_clamped() {
        let tuning = Tuning {
            base_delay: 0,
            ..Tuning::default()
        };
        assert_eq!(make_job(Business::HotDog, &tuning).delay, 1);
    }
}
