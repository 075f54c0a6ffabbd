//! Cash-flow projection
//!
//! Grows a base amount period by period along a growth schedule and discounts
//! each period back at a single rate. Period `i` is discounted by `(1 + r)^i`.
//! Schedules never hold more than `MAX_PERIODS` steps.

use crate::model::{CashFlowPeriod, GrowthStep, MAX_PERIODS, Projection, Stage};

/// Project `base` forward along `schedule`, starting at period 1
#[must_use]
pub fn project_cash_flows(base: f64, schedule: &[GrowthStep], discount_rate: f64) -> Projection {
    project_from(base, schedule, discount_rate, 1)
}

/// Project `base` forward along `schedule`, numbering periods from `first_period`.
///
/// Used to continue a timeline (e.g. a stable tail after an explicit stage)
/// while keeping the discount exponent equal to the period number.
#[must_use]
pub fn project_from(
    base: f64,
    schedule: &[GrowthStep],
    discount_rate: f64,
    first_period: u32,
) -> Projection {
    let mut periods = Vec::with_capacity(schedule.len());
    let mut nominal = base;
    let mut total_present_value = 0.0;

    for (offset, step) in schedule.iter().enumerate() {
        let offset = u32::try_from(offset).unwrap_or(u32::MAX);
        let index = first_period.saturating_add(offset);
        nominal *= 1.0 + step.rate;
        let present_value = discount(nominal, discount_rate, index);
        total_present_value += present_value;
        periods.push(CashFlowPeriod {
            index,
            nominal,
            present_value,
            growth_rate: step.rate,
            stage: step.stage,
        });
    }

    Projection {
        base,
        discount_rate,
        periods,
        total_present_value,
    }
}

/// Present value of `amount` received at the end of `periods` periods
#[must_use]
pub fn discount(amount: f64, rate: f64, periods: u32) -> f64 {
    let exponent = i32::try_from(periods).unwrap_or(i32::MAX);
    amount / (1.0 + rate).powi(exponent)
}

/// `periods` steps of constant growth
#[must_use]
pub fn constant_schedule(rate: f64, periods: u32, stage: Stage) -> Vec<GrowthStep> {
    (0..periods.min(MAX_PERIODS))
        .map(|_| GrowthStep::new(rate, stage))
        .collect()
}

/// `periods` steps whose rate moves linearly from `from` toward `to`.
///
/// Step `i` (1-based) grows at `from + (to - from) * i / periods`, so the last
/// step lands exactly on `to`.
#[must_use]
pub fn fade_schedule(from: f64, to: f64, periods: u32) -> Vec<GrowthStep> {
    (1..=periods.min(MAX_PERIODS))
        .map(|i| {
            let rate = from + (to - from) * (f64::from(i) / f64::from(periods));
            GrowthStep::new(rate, Stage::Fade)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_growth_matches_closed_form() {
        let schedule = constant_schedule(0.08, 10, Stage::Growth);
        let projection = project_cash_flows(150.0, &schedule, 0.10);

        assert_eq!(projection.len(), 10);
        for period in &projection.periods {
            let expected = 150.0 * 1.08_f64.powi(period.index as i32);
            assert!((period.nominal - expected).abs() < 1e-9);
            let expected_pv = expected / 1.10_f64.powi(period.index as i32);
            assert!((period.present_value - expected_pv).abs() < 1e-9);
        }

        let sum: f64 = projection.periods.iter().map(|p| p.present_value).sum();
        assert!((projection.total_present_value - sum).abs() < 1e-9);
    }

    #[test]
    fn test_periods_are_ordered_from_one() {
        let schedule = constant_schedule(0.05, 4, Stage::Growth);
        let projection = project_cash_flows(1.0, &schedule, 0.1);
        let indices: Vec<u32> = projection.periods.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
        assert_eq!(projection.last_index(), 4);
    }

    #[test]
    fn test_schedules_are_capped() {
        assert_eq!(constant_schedule(0.05, u32::MAX, Stage::Growth).len(), MAX_PERIODS as usize);
        assert_eq!(fade_schedule(0.2, 0.05, u32::MAX).len(), MAX_PERIODS as usize);

        let schedule = constant_schedule(0.0, 3, Stage::Stable);
        let late = project_from(1.0, &schedule, 0.1, u32::MAX - 1);
        let indices: Vec<u32> = late.periods.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![u32::MAX - 1, u32::MAX, u32::MAX]);
        assert_eq!(discount(100.0, 0.1, u32::MAX), 0.0);
    }

    #[test]
    fn test_empty_schedule_keeps_base() {
        let projection = project_cash_flows(42.0, &[], 0.1);
        assert!(projection.is_empty());
        assert_eq!(projection.terminal_nominal(), 42.0);
        assert_eq!(projection.total_present_value, 0.0);
        assert_eq!(projection.last_index(), 0);
    }

    #[test]
    fn test_project_from_offsets_discounting() {
        let schedule = constant_schedule(0.0, 2, Stage::Stable);
        let projection = project_from(100.0, &schedule, 0.10, 6);
        assert_eq!(projection.periods[0].index, 6);
        assert!((projection.periods[0].present_value - 100.0 / 1.1_f64.powi(6)).abs() < 1e-9);
    }

    #[test]
    fn test_fade_schedule_lands_on_target() {
        let schedule = fade_schedule(0.25, 0.15, 5);
        assert_eq!(schedule.len(), 5);
        assert!((schedule[0].rate - 0.23).abs() < 1e-12);
        assert!((schedule[4].rate - 0.15).abs() < 1e-12);
        assert!(schedule.iter().all(|s| s.stage == Stage::Fade));
        assert!(fade_schedule(0.25, 0.15, 0).is_empty());
    }
}
