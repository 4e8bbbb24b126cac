use crate::models::RiskLevel;

/// Map a risk score to its level.
///
/// - `0` → Low
/// - `1..=3` → Medium
/// - anything higher → High
pub fn classify(score: u32) -> RiskLevel {
    match score {
        0 => RiskLevel::Low,
        1..=3 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}
