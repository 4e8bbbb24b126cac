//! Supply-chain risk scoring for package metadata.
//!
//! Each package is checked by three rule-based detectors, and their flags are
//! combined into a score and a risk level:
//!
//! - [`detector::similarity`] — name is a near miss of a popular package (typo-squatting).
//! - [`detector::temporal`] — no update for years (abandoned), or dormant yet still
//!   heavily downloaded (revived).
//! - [`risk`] — weighted score and its [`models::RiskLevel`].
//!
//! [`pipeline::Pipeline`] ties them together over a [`models::PackageTable`];
//! [`table`] and [`report`] handle CSV I/O and rendering.

pub mod cli;
pub mod config;
pub mod detector;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod risk;
pub mod table;
