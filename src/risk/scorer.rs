pub const TYPO_WEIGHT: u32 = 2;
pub const ABANDONED_WEIGHT: u32 = 1;
pub const REVIVED_WEIGHT: u32 = 3;

/// Highest score [`score`] can return.
pub const MAX_SCORE: u32 = TYPO_WEIGHT + ABANDONED_WEIGHT + REVIVED_WEIGHT;

/// Weighted sum of the detector flags. Revival weighs most, abandonment least.
pub fn score(typo_suspect: bool, abandoned: bool, revived_risk: bool) -> u32 {
    TYPO_WEIGHT * u32::from(typo_suspect)
        + ABANDONED_WEIGHT * u32::from(abandoned)
        + REVIVED_WEIGHT * u32::from(revived_risk)
}
