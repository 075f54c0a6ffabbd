//! Valuation input snapshots
//!
//! Each suite reads a flat set of named fields. Rates are fractions (0.08 = 8%),
//! per-share figures are in currency, and company-level figures (cash flow,
//! assets, debt, revenue) share whatever unit the caller chose for them, the
//! share count included.

use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};

fn finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NonFinite { field, value })
    }
}

/// Largest accepted period count (projection years, growth stages, DRIP horizon)
pub const MAX_PERIODS: u32 = 500;

fn count(field: &'static str, value: f64) -> Result<u32> {
    let whole = value.is_finite() && value >= 0.0 && value.fract() == 0.0;
    if !whole || value > f64::from(MAX_PERIODS) {
        return Err(InputError::InvalidCount { field, value });
    }
    Ok(value as u32)
}

fn check_counts(fields: &[(&'static str, u32)]) -> Result<()> {
    for &(field, periods) in fields {
        count(field, f64::from(periods))?;
    }
    Ok(())
}

fn check_all(fields: &[(&'static str, f64)]) -> Result<()> {
    for &(field, value) in fields {
        finite(field, value)?;
    }
    Ok(())
}

/// Inputs for the value-investing suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueInputs {
    pub current_price: f64,
    pub eps: f64,
    pub book_value_per_share: f64,
    pub shares_outstanding: f64,
    pub free_cash_flow: f64,
    pub fcf_growth_rate: f64,
    pub wacc: f64,
    pub terminal_growth_rate: f64,
    pub projection_years: u32,
    pub margin_of_safety: f64,
    pub current_assets: f64,
    pub total_liabilities: f64,
    pub preferred_stock: f64,
    pub industry_pe: f64,
    pub risk_free_rate: f64,
    pub earnings_growth_rate: f64,
}

impl Default for ValueInputs {
    fn default() -> Self {
        Self {
            current_price: 25.0,
            eps: 2.5,
            book_value_per_share: 15.0,
            shares_outstanding: 100.0,
            free_cash_flow: 150.0,
            fcf_growth_rate: 0.08,
            wacc: 0.10,
            terminal_growth_rate: 0.03,
            projection_years: 10,
            margin_of_safety: 0.25,
            current_assets: 500.0,
            total_liabilities: 300.0,
            preferred_stock: 0.0,
            industry_pe: 15.0,
            risk_free_rate: 0.035,
            earnings_growth_rate: 0.10,
        }
    }
}

impl ValueInputs {
    pub const FIELDS: &'static [&'static str] = &[
        "current_price",
        "eps",
        "book_value_per_share",
        "shares_outstanding",
        "free_cash_flow",
        "fcf_growth_rate",
        "wacc",
        "terminal_growth_rate",
        "projection_years",
        "margin_of_safety",
        "current_assets",
        "total_liabilities",
        "preferred_stock",
        "industry_pe",
        "risk_free_rate",
        "earnings_growth_rate",
    ];

    /// Set a field by name
    pub fn set(&mut self, field: &str, value: f64) -> Result<()> {
        match field {
            "current_price" => self.current_price = finite("current_price", value)?,
            "eps" => self.eps = finite("eps", value)?,
            "book_value_per_share" => {
                self.book_value_per_share = finite("book_value_per_share", value)?;
            }
            "shares_outstanding" => {
                self.shares_outstanding = finite("shares_outstanding", value)?;
            }
            "free_cash_flow" => self.free_cash_flow = finite("free_cash_flow", value)?,
            "fcf_growth_rate" => self.fcf_growth_rate = finite("fcf_growth_rate", value)?,
            "wacc" => self.wacc = finite("wacc", value)?,
            "terminal_growth_rate" => {
                self.terminal_growth_rate = finite("terminal_growth_rate", value)?;
            }
            "projection_years" => self.projection_years = count("projection_years", value)?,
            "margin_of_safety" => self.margin_of_safety = finite("margin_of_safety", value)?,
            "current_assets" => self.current_assets = finite("current_assets", value)?,
            "total_liabilities" => {
                self.total_liabilities = finite("total_liabilities", value)?;
            }
            "preferred_stock" => self.preferred_stock = finite("preferred_stock", value)?,
            "industry_pe" => self.industry_pe = finite("industry_pe", value)?,
            "risk_free_rate" => self.risk_free_rate = finite("risk_free_rate", value)?,
            "earnings_growth_rate" => {
                self.earnings_growth_rate = finite("earnings_growth_rate", value)?;
            }
            other => {
                return Err(InputError::UnknownField {
                    suite: "value",
                    field: other.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Reject non-finite fields (e.g. `.nan` read from a file) and period
    /// counts above `MAX_PERIODS`
    pub fn validate(&self) -> Result<()> {
        check_counts(&[("projection_years", self.projection_years)])?;
        check_all(&[
            ("current_price", self.current_price),
            ("eps", self.eps),
            ("book_value_per_share", self.book_value_per_share),
            ("shares_outstanding", self.shares_outstanding),
            ("free_cash_flow", self.free_cash_flow),
            ("fcf_growth_rate", self.fcf_growth_rate),
            ("wacc", self.wacc),
            ("terminal_growth_rate", self.terminal_growth_rate),
            ("margin_of_safety", self.margin_of_safety),
            ("current_assets", self.current_assets),
            ("total_liabilities", self.total_liabilities),
            ("preferred_stock", self.preferred_stock),
            ("industry_pe", self.industry_pe),
            ("risk_free_rate", self.risk_free_rate),
            ("earnings_growth_rate", self.earnings_growth_rate),
        ])
    }
}

/// Inputs for the dividend-investing suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DividendInputs {
    pub current_price: f64,
    /// Most recent annual dividend per share (D0)
    pub annual_dividend: f64,
    pub eps: f64,
    pub required_return: f64,
    pub dividend_growth_rate: f64,
    pub high_growth_rate: f64,
    pub high_growth_years: u32,
    pub stable_growth_rate: f64,
    pub retention_rate: f64,
    pub roe: f64,
    pub risk_free_rate: f64,
    /// Horizon of the dividend reinvestment walk
    pub years_to_project: u32,
    /// Shares held at the start of the dividend reinvestment walk
    pub initial_shares: f64,
}

impl Default for DividendInputs {
    fn default() -> Self {
        Self {
            current_price: 30.0,
            annual_dividend: 1.5,
            eps: 3.0,
            required_return: 0.10,
            dividend_growth_rate: 0.05,
            high_growth_rate: 0.12,
            high_growth_years: 5,
            stable_growth_rate: 0.04,
            retention_rate: 0.5,
            roe: 0.15,
            risk_free_rate: 0.035,
            years_to_project: 20,
            initial_shares: 1000.0,
        }
    }
}

impl DividendInputs {
    pub const FIELDS: &'static [&'static str] = &[
        "current_price",
        "annual_dividend",
        "eps",
        "required_return",
        "dividend_growth_rate",
        "high_growth_rate",
        "high_growth_years",
        "stable_growth_rate",
        "retention_rate",
        "roe",
        "risk_free_rate",
        "years_to_project",
        "initial_shares",
    ];

    pub fn set(&mut self, field: &str, value: f64) -> Result<()> {
        match field {
            "current_price" => self.current_price = finite("current_price", value)?,
            "annual_dividend" => self.annual_dividend = finite("annual_dividend", value)?,
            "eps" => self.eps = finite("eps", value)?,
            "required_return" => self.required_return = finite("required_return", value)?,
            "dividend_growth_rate" => {
                self.dividend_growth_rate = finite("dividend_growth_rate", value)?;
            }
            "high_growth_rate" => self.high_growth_rate = finite("high_growth_rate", value)?,
            "high_growth_years" => self.high_growth_years = count("high_growth_years", value)?,
            "stable_growth_rate" => {
                self.stable_growth_rate = finite("stable_growth_rate", value)?;
            }
            "retention_rate" => self.retention_rate = finite("retention_rate", value)?,
            "roe" => self.roe = finite("roe", value)?,
            "risk_free_rate" => self.risk_free_rate = finite("risk_free_rate", value)?,
            "years_to_project" => self.years_to_project = count("years_to_project", value)?,
            "initial_shares" => self.initial_shares = finite("initial_shares", value)?,
            other => {
                return Err(InputError::UnknownField {
                    suite: "dividend",
                    field: other.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        check_counts(&[
            ("high_growth_years", self.high_growth_years),
            ("years_to_project", self.years_to_project),
        ])?;
        check_all(&[
            ("current_price", self.current_price),
            ("annual_dividend", self.annual_dividend),
            ("eps", self.eps),
            ("required_return", self.required_return),
            ("dividend_growth_rate", self.dividend_growth_rate),
            ("high_growth_rate", self.high_growth_rate),
            ("stable_growth_rate", self.stable_growth_rate),
            ("retention_rate", self.retention_rate),
            ("roe", self.roe),
            ("risk_free_rate", self.risk_free_rate),
            ("initial_shares", self.initial_shares),
        ])
    }
}

/// Inputs for the growth-investing suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthInputs {
    pub current_price: f64,
    pub eps: f64,
    pub revenue: f64,
    pub revenue_growth_rate: f64,
    pub shares_outstanding: f64,
    pub free_cash_flow: f64,
    pub high_growth_rate: f64,
    pub high_growth_years: u32,
    /// Growth rate reached at the end of the fade stage
    pub fade_growth_rate: f64,
    pub fade_years: u32,
    pub terminal_growth_rate: f64,
    pub wacc: f64,
    pub ebitda: f64,
    pub total_debt: f64,
    pub cash_and_equivalents: f64,
    pub industry_ev_ebitda: f64,
    pub industry_ps: f64,
    pub profit_margin: f64,
}

impl Default for GrowthInputs {
    fn default() -> Self {
        Self {
            current_price: 80.0,
            eps: 2.0,
            revenue: 5000.0,
            revenue_growth_rate: 0.30,
            shares_outstanding: 200.0,
            free_cash_flow: 300.0,
            high_growth_rate: 0.25,
            high_growth_years: 5,
            fade_growth_rate: 0.15,
            fade_years: 5,
            terminal_growth_rate: 0.03,
            wacc: 0.12,
            ebitda: 600.0,
            total_debt: 500.0,
            cash_and_equivalents: 200.0,
            industry_ev_ebitda: 15.0,
            industry_ps: 5.0,
            profit_margin: 0.10,
        }
    }
}

impl GrowthInputs {
    pub const FIELDS: &'static [&'static str] = &[
        "current_price",
        "eps",
        "revenue",
        "revenue_growth_rate",
        "shares_outstanding",
        "free_cash_flow",
        "high_growth_rate",
        "high_growth_years",
        "fade_growth_rate",
        "fade_years",
        "terminal_growth_rate",
        "wacc",
        "ebitda",
        "total_debt",
        "cash_and_equivalents",
        "industry_ev_ebitda",
        "industry_ps",
        "profit_margin",
    ];

    pub fn set(&mut self, field: &str, value: f64) -> Result<()> {
        match field {
            "current_price" => self.current_price = finite("current_price", value)?,
            "eps" => self.eps = finite("eps", value)?,
            "revenue" => self.revenue = finite("revenue", value)?,
            "revenue_growth_rate" => {
                self.revenue_growth_rate = finite("revenue_growth_rate", value)?;
            }
            "shares_outstanding" => {
                self.shares_outstanding = finite("shares_outstanding", value)?;
            }
            "free_cash_flow" => self.free_cash_flow = finite("free_cash_flow", value)?,
            "high_growth_rate" => self.high_growth_rate = finite("high_growth_rate", value)?,
            "high_growth_years" => self.high_growth_years = count("high_growth_years", value)?,
            "fade_growth_rate" => self.fade_growth_rate = finite("fade_growth_rate", value)?,
            "fade_years" => self.fade_years = count("fade_years", value)?,
            "terminal_growth_rate" => {
                self.terminal_growth_rate = finite("terminal_growth_rate", value)?;
            }
            "wacc" => self.wacc = finite("wacc", value)?,
            "ebitda" => self.ebitda = finite("ebitda", value)?,
            "total_debt" => self.total_debt = finite("total_debt", value)?,
            "cash_and_equivalents" => {
                self.cash_and_equivalents = finite("cash_and_equivalents", value)?;
            }
            "industry_ev_ebitda" => {
                self.industry_ev_ebitda = finite("industry_ev_ebitda", value)?;
            }
            "industry_ps" => self.industry_ps = finite("industry_ps", value)?,
            "profit_margin" => self.profit_margin = finite("profit_margin", value)?,
            other => {
                return Err(InputError::UnknownField {
                    suite: "growth",
                    field: other.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        check_counts(&[
            ("high_growth_years", self.high_growth_years),
            ("fade_years", self.fade_years),
        ])?;
        check_all(&[
            ("current_price", self.current_price),
            ("eps", self.eps),
            ("revenue", self.revenue),
            ("revenue_growth_rate", self.revenue_growth_rate),
            ("shares_outstanding", self.shares_outstanding),
            ("free_cash_flow", self.free_cash_flow),
            ("high_growth_rate", self.high_growth_rate),
            ("fade_growth_rate", self.fade_growth_rate),
            ("terminal_growth_rate", self.terminal_growth_rate),
            ("wacc", self.wacc),
            ("ebitda", self.ebitda),
            ("total_debt", self.total_debt),
            ("cash_and_equivalents", self.cash_and_equivalents),
            ("industry_ev_ebitda", self.industry_ev_ebitda),
            ("industry_ps", self.industry_ps),
            ("profit_margin", self.profit_margin),
        ])
    }
}

/// Complete input snapshot for one evaluation of every suite
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationInputs {
    pub value: ValueInputs,
    pub dividend: DividendInputs,
    pub growth: GrowthInputs,
}

impl ValuationInputs {
    /// Set a field addressed as `suite.field`, e.g. `growth.wacc`
    pub fn set(&mut self, path: &str, value: f64) -> Result<()> {
        let (suite, field) = path
            .split_once('.')
            .ok_or_else(|| InputError::UnknownSuite(path.to_string()))?;
        match suite {
            "value" => self.value.set(field, value),
            "dividend" => self.dividend.set(field, value),
            "growth" => self.growth.set(field, value),
            other => Err(InputError::UnknownSuite(other.to_string())),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.value.validate()?;
        self.dividend.validate()?;
        self.growth.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_by_path() {
        let mut inputs = ValuationInputs::default();
        inputs.set("growth.wacc", 0.09).unwrap();
        inputs.set("dividend.high_growth_years", 7.0).unwrap();
        assert_eq!(inputs.growth.wacc, 0.09);
        assert_eq!(inputs.dividend.high_growth_years, 7);
    }

    #[test]
    fn test_set_rejects_unknown_names() {
        let mut inputs = ValuationInputs::default();
        assert_eq!(
            inputs.set("value.nope", 1.0),
            Err(InputError::UnknownField {
                suite: "value",
                field: "nope".to_string()
            })
        );
        assert_eq!(
            inputs.set("income.eps", 1.0),
            Err(InputError::UnknownSuite("income".to_string()))
        );
        assert!(inputs.set("eps", 1.0).is_err());
    }

    #[test]
    fn test_set_rejects_non_finite_and_fractional_counts() {
        let mut inputs = ValuationInputs::default();
        assert!(matches!(
            inputs.set("value.eps", f64::NAN),
            Err(InputError::NonFinite { field: "eps", .. })
        ));
        assert!(matches!(
            inputs.set("growth.fade_years", 2.5),
            Err(InputError::InvalidCount { .. })
        ));
        assert!(matches!(
            inputs.set("growth.fade_years", -1.0),
            Err(InputError::InvalidCount { .. })
        ));
    }

    #[test]
    fn test_huge_period_counts_are_rejected() {
        let count_fields = [
            "value.projection_years",
            "dividend.high_growth_years",
            "dividend.years_to_project",
            "growth.high_growth_years",
            "growth.fade_years",
        ];
        let mut inputs = ValuationInputs::default();
        for path in count_fields {
            for huge in [3e9, f64::from(u32::MAX), f64::from(MAX_PERIODS) + 1.0] {
                assert!(
                    matches!(inputs.set(path, huge), Err(InputError::InvalidCount { .. })),
                    "{path} accepted {huge}"
                );
            }
            inputs.set(path, f64::from(MAX_PERIODS)).unwrap();
        }
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_validate_catches_huge_counts() {
        let mut inputs = ValuationInputs::default();
        inputs.dividend.years_to_project = u32::MAX;
        assert!(matches!(
            inputs.validate(),
            Err(InputError::InvalidCount { field: "years_to_project", .. })
        ));

        let mut inputs = ValuationInputs::default();
        inputs.dividend.high_growth_years = u32::MAX;
        assert!(inputs.dividend.validate().is_err());

        let mut inputs = ValuationInputs::default();
        inputs.value.projection_years = MAX_PERIODS + 1;
        assert!(inputs.value.validate().is_err());

        let mut inputs = ValuationInputs::default();
        inputs.growth.fade_years = 4_000_000;
        assert!(inputs.growth.validate().is_err());
        inputs.growth.fade_years = 5;
        inputs.growth.high_growth_years = 4_000_000;
        assert!(inputs.growth.validate().is_err());
    }

    #[test]
    fn test_out_of_range_rates_are_accepted() {
        let mut inputs = ValuationInputs::default();
        inputs.set("value.wacc", 0.0).unwrap();
        inputs.set("value.fcf_growth_rate", -0.5).unwrap();
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_every_listed_field_is_settable() {
        let mut inputs = ValuationInputs::default();
        for field in ValueInputs::FIELDS {
            inputs.value.set(field, 1.0).unwrap();
        }
        for field in DividendInputs::FIELDS {
            inputs.dividend.set(field, 1.0).unwrap();
        }
        for field in GrowthInputs::FIELDS {
            inputs.growth.set(field, 1.0).unwrap();
        }
    }

    #[test]
    fn test_validate_catches_nan() {
        let mut inputs = ValuationInputs::default();
        inputs.growth.ebitda = f64::INFINITY;
        assert!(matches!(
            inputs.validate(),
            Err(InputError::NonFinite { field: "ebitda", .. })
        ));
    }
}
