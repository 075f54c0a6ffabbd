//! Signal threshold configuration
//!
//! One `Band` per model. Bands marked *scaled* are multiplied by a reference
//! (industry multiple, NCAV, fair price, actual growth) before comparison.
//! The DCF band is derived from the margin of safety and the sustainable growth
//! band from the stated dividend growth, so neither appears here.

use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};
use crate::primitives::{Band, Cutoff};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdTable {
    // Value suite
    pub graham_number: Band,
    /// Scaled by the industry P/E
    pub price_to_earnings: Band,
    pub peg_quick_check: Band,
    pub price_to_book: Band,
    /// Scaled by NCAV per share
    pub net_current_asset_value: Band,
    pub residual_income: Band,

    // Dividend suite
    pub gordon_growth: Band,
    pub two_stage_ddm: Band,
    pub h_model: Band,
    pub dividend_yield: Band,
    pub payout_ratio: Band,
    pub dividend_coverage: Band,

    // Growth suite
    pub peg: Band,
    /// Scaled by the PEG = 1 fair price
    pub growth_adjusted_value: Band,
    pub three_stage_dcf: Band,
    /// Scaled by the industry EV/EBITDA
    pub ev_ebitda: Band,
    /// Scaled by the EV/EBITDA fair price
    pub ev_ebitda_fair_value: Band,
    /// Scaled by the industry P/S
    pub price_to_sales: Band,
    /// Scaled by the P/S fair price
    pub price_to_sales_fair_value: Band,
    pub rule_of_forty: Band,
    /// Scaled by the actual revenue growth
    pub reverse_dcf: Band,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            graham_number: Band::ratio(),
            price_to_earnings: Band::ratio(),
            peg_quick_check: Band::new(Cutoff::Below(0.8), Cutoff::Above(1.5)),
            price_to_book: Band::new(Cutoff::Below(1.0), Cutoff::Above(3.0)),
            net_current_asset_value: Band::new(Cutoff::Below(0.67), Cutoff::AtOrAbove(1.0)),
            residual_income: Band::ratio(),

            gordon_growth: Band::ratio(),
            two_stage_ddm: Band::ratio(),
            h_model: Band::ratio(),
            dividend_yield: Band::new(Cutoff::Above(0.06), Cutoff::Below(0.02)),
            payout_ratio: Band::new(Cutoff::AtOrBelow(0.7), Cutoff::Above(0.9)),
            dividend_coverage: Band::new(Cutoff::Above(2.0), Cutoff::AtOrBelow(1.2)),

            peg: Band::new(Cutoff::Below(0.75), Cutoff::Above(1.5)),
            growth_adjusted_value: Band::ratio(),
            three_stage_dcf: Band::new(Cutoff::Below(0.7), Cutoff::Above(1.2)),
            ev_ebitda: Band::new(Cutoff::Below(0.8), Cutoff::Above(1.3)),
            ev_ebitda_fair_value: Band::ratio(),
            price_to_sales: Band::new(Cutoff::Below(0.7), Cutoff::Above(1.5)),
            price_to_sales_fair_value: Band::new(Cutoff::Below(0.7), Cutoff::Above(1.5)),
            rule_of_forty: Band::new(Cutoff::AtOrAbove(50.0), Cutoff::Below(40.0)),
            reverse_dcf: Band::new(Cutoff::Below(0.5), Cutoff::Above(1.5)).sell_first(),
        }
    }
}

impl ThresholdTable {
    /// Reject cutoffs whose level is NaN or infinite
    pub fn validate(&self) -> Result<()> {
        let bands = [
            ("graham_number", &self.graham_number),
            ("price_to_earnings", &self.price_to_earnings),
            ("peg_quick_check", &self.peg_quick_check),
            ("price_to_book", &self.price_to_book),
            ("net_current_asset_value", &self.net_current_asset_value),
            ("residual_income", &self.residual_income),
            ("gordon_growth", &self.gordon_growth),
            ("two_stage_ddm", &self.two_stage_ddm),
            ("h_model", &self.h_model),
            ("dividend_yield", &self.dividend_yield),
            ("payout_ratio", &self.payout_ratio),
            ("dividend_coverage", &self.dividend_coverage),
            ("peg", &self.peg),
            ("growth_adjusted_value", &self.growth_adjusted_value),
            ("three_stage_dcf", &self.three_stage_dcf),
            ("ev_ebitda", &self.ev_ebitda),
            ("ev_ebitda_fair_value", &self.ev_ebitda_fair_value),
            ("price_to_sales", &self.price_to_sales),
            ("price_to_sales_fair_value", &self.price_to_sales_fair_value),
            ("rule_of_forty", &self.rule_of_forty),
            ("reverse_dcf", &self.reverse_dcf),
        ];
        for (field, band) in bands {
            for level in [band.buy.level(), band.sell.level()].into_iter().flatten() {
                if !level.is_finite() {
                    return Err(InputError::NonFinite { field, value: level });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Signal;

    #[test]
    fn test_partial_table_keeps_defaults() {
        let table: ThresholdTable =
            serde_json::from_str(r#"{"price_to_book":{"buy":{"below":0.8},"sell":{"above":2.5}}}"#)
                .unwrap();
        assert_eq!(
            table.price_to_book,
            Band::new(Cutoff::Below(0.8), Cutoff::Above(2.5))
        );
        assert_eq!(table.graham_number, ThresholdTable::default().graham_number);
    }

    #[test]
    fn test_non_finite_cutoffs_are_rejected() {
        assert!(ThresholdTable::default().validate().is_ok());

        let mut table = ThresholdTable::default();
        table.price_to_book = Band::new(Cutoff::Below(f64::NAN), Cutoff::Above(3.0));
        assert!(matches!(
            table.validate(),
            Err(InputError::NonFinite { field: "price_to_book", .. })
        ));

        let mut table = ThresholdTable::default();
        table.reverse_dcf = Band::new(Cutoff::Never, Cutoff::AtOrAbove(f64::INFINITY));
        assert!(matches!(
            table.validate(),
            Err(InputError::NonFinite { field: "reverse_dcf", .. })
        ));
    }

    #[test]
    fn test_payout_band_edges() {
        let band = ThresholdTable::default().payout_ratio;
        assert_eq!(band.classify(0.7), Signal::Buy);
        assert_eq!(band.classify(0.9), Signal::Hold);
        assert_eq!(band.classify(0.91), Signal::Sell);
    }

    #[test]
    fn test_rule_of_forty_band_edges() {
        let band = ThresholdTable::default().rule_of_forty;
        assert_eq!(band.classify(50.0), Signal::Buy);
        assert_eq!(band.classify(40.0), Signal::Hold);
        assert_eq!(band.classify(39.9), Signal::Sell);
    }
}
