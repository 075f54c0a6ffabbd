//! Perpetuity (Gordon) terminal values

use crate::model::Estimate;

use super::projector::discount;

/// Value at time `t` of a cash flow growing forever from `cash_flow` at time `t`:
/// `cash_flow * (1 + g) / (r - g)`.
///
/// Non-computable whenever `discount_rate <= growth_rate`.
#[must_use]
pub fn perpetuity_value(cash_flow: f64, discount_rate: f64, growth_rate: f64) -> Estimate {
    if discount_rate <= growth_rate {
        return Estimate::NonComputable;
    }
    Estimate::finite(cash_flow * (1.0 + growth_rate) / (discount_rate - growth_rate))
}

/// Terminal value after `periods` explicit periods, discounted back to today
#[must_use]
pub fn discounted_terminal_value(
    terminal_cash_flow: f64,
    discount_rate: f64,
    growth_rate: f64,
    periods: u32,
) -> Estimate {
    perpetuity_value(terminal_cash_flow, discount_rate, growth_rate)
        .map(|tv| discount(tv, discount_rate, periods))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gordon_formula() {
        let value = perpetuity_value(1.5, 0.10, 0.05).value().unwrap();
        assert!((value - 1.5 * 1.05 / 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_non_computable_when_rate_not_above_growth() {
        assert_eq!(perpetuity_value(1.5, 0.05, 0.05), Estimate::NonComputable);
        assert_eq!(perpetuity_value(1.5, 0.04, 0.05), Estimate::NonComputable);
    }

    #[test]
    fn test_discounted_terminal_value() {
        let pv = discounted_terminal_value(100.0, 0.10, 0.03, 10)
            .value()
            .unwrap();
        let expected = 100.0 * 1.03 / 0.07 / 1.1_f64.powi(10);
        assert!((pv - expected).abs() < 1e-9);
        assert_eq!(
            discounted_terminal_value(100.0, 0.03, 0.03, 10),
            Estimate::NonComputable
        );
    }
}
