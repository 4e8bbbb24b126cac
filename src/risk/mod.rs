//! Turning detector signals into a risk score and level.
//!
//! - [`scorer`] — weighted sum of the three detector flags.
//! - [`classifier`] — maps a score onto [`RiskLevel`](crate::models::RiskLevel).

pub mod classifier;
pub mod scorer;
