//! Rule-based detectors that each turn one aspect of a package into a boolean signal.
//!
//! - [`similarity`] — name look-alikes of popular packages (typo-squatting).
//! - [`temporal`] — abandonment and suspicious revival, relative to an injected "now".

pub mod similarity;
pub mod temporal;
