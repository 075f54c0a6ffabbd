//! The three model suites, one module per investing style

pub mod dividend;
pub mod growth;
pub mod value;

pub use dividend::{
    DividendReport, ReinvestmentProjection, ReinvestmentYear, TwoStageDdm,
};
pub use growth::{GrowthReport, ReverseDcf, ThreeStageDcf};
pub use value::{ComparisonBar, DcfValuation, ValueReport};
