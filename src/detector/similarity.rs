use std::collections::HashMap;

/// Default ratio at or above which a name is considered a look-alike.
pub const DEFAULT_THRESHOLD: f64 = 0.85;

/// References at least this long drop over-represented characters as match seeds.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Flag `name` when it is close to, but not identical to, any reference.
///
/// Returns `false` for an empty name or an empty reference list.
pub fn is_typosquat<S: AsRef<str>>(name: &str, references: &[S], threshold: f64) -> bool {
    if name.is_empty() {
        return false;
    }

    references
        .iter()
        .map(AsRef::<str>::as_ref)
        .any(|reference| reference != name && similarity_ratio(name, reference) >= threshold)
}

/// The most similar reference that is not `name` itself, with its ratio.
pub fn closest_reference<'r, S: AsRef<str>>(
    name: &str,
    references: &'r [S],
) -> Option<(&'r str, f64)> {
    references
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|reference| *reference != name)
        .map(|reference| (reference, similarity_ratio(name, reference)))
        .fold(None, |best, (reference, ratio)| match best {
            Some((_, best_ratio)) if best_ratio >= ratio => best,
            _ => Some((reference, ratio)),
        })
}

/// Longest-matching-blocks similarity: `2 * M / (len(a) + len(b))`.
///
/// `M` is the number of characters covered by the matching blocks found by
/// repeatedly taking the longest common run and recursing on both sides of it.
/// Two empty strings are identical (ratio `1.0`).
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched = BlockMatcher::new(&a, &b).matched_len();
    2.0 * matched as f64 / total as f64
}

struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each character in `b`, ascending.
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b2j }
    }

    /// Total size of all matching blocks.
    fn matched_len(&self) -> usize {
        let mut total = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, size) = self.longest_match(alo, ahi, blo, bhi);
            if size == 0 {
                continue;
            }
            total += size;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + size < ahi && j + size < bhi {
                pending.push((i + size, ahi, j + size, bhi));
            }
        }

        total
    }

    /// Longest common run in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Ties go to the run starting earliest in `a`, then earliest in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // run length ending at (i - 1, j), keyed by j
        let mut run_at: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_at.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            run_at = next;
        }

        // grow across characters that were dropped as match seeds
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ratio_identical_and_empty() {
        assert!(approx(similarity_ratio("numpy", "numpy"), 1.0));
        assert!(approx(similarity_ratio("", ""), 1.0));
        assert!(approx(similarity_ratio("numpy", ""), 0.0));
    }

    #[test]
    fn test_ratio_single_deletion() {
        // "requ" + "sts" = 7 matched chars over 15
        assert!(approx(similarity_ratio("requsts", "requests"), 14.0 / 15.0));
    }

    #[test]
    fn test_ratio_prefix_match() {
        assert!(approx(similarity_ratio("numpy-utils", "numpy"), 10.0 / 16.0));
    }

    #[test]
    fn test_ratio_follows_block_order() {
        // only one block survives in "tide" vs "diet", two the other way round
        assert!(approx(similarity_ratio("tide", "diet"), 0.25));
        assert!(approx(similarity_ratio("diet", "tide"), 0.5));
        assert!(approx(similarity_ratio("abcd", "bcde"), 0.75));
    }

    #[test]
    fn test_ratio_counts_chars_not_bytes() {
        assert!(approx(similarity_ratio("café", "cafe"), 0.75));
    }

    #[test]
    fn test_ratio_long_reference_autojunk() {
        let reference = "a".repeat(250);
        let name = "a".repeat(10);
        // every 'a' is over-represented, but the extension pass still grows the run
        assert!(approx(similarity_ratio(&name, &reference), 20.0 / 260.0));
    }

    #[test]
    fn test_typosquat_flags_near_miss() {
        let refs = ["requests", "numpy"];
        assert!(is_typosquat("requsts", &refs, DEFAULT_THRESHOLD));
        assert!(is_typosquat("nunpy", &refs, 0.8));
    }

    #[test]
    fn test_typosquat_ignores_exact_match() {
        let refs = ["requests", "numpy"];
        assert!(!is_typosquat("requests", &refs, DEFAULT_THRESHOLD));
        assert!(!is_typosquat("numpy", &refs, 0.0));
    }

    #[test]
    fn test_typosquat_below_threshold() {
        let refs = ["requests", "numpy"];
        assert!(!is_typosquat("numpy-utils", &refs, DEFAULT_THRESHOLD));
        assert!(!is_typosquat("flask", &refs, DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_typosquat_threshold_is_inclusive() {
        // 6 matched chars over 8 is exactly 0.75
        assert!(is_typosquat("abcd", &["bcde"], 0.75));
        assert!(!is_typosquat("abcd", &["bcde"], 0.7501));
        assert!(is_typosquat("requsts", &["requests"], 14.0 / 15.0));
    }

    #[test]
    fn test_typosquat_empty_inputs() {
        let none: [&str; 0] = [];
        assert!(!is_typosquat("requsts", &none, DEFAULT_THRESHOLD));
        assert!(!is_typosquat("", &["requests"], 0.0));
    }

    #[test]
    fn test_typosquat_reference_order_irrelevant() {
        let forward = ["numpy", "requests", "pandas"];
        let reversed = ["pandas", "requests", "numpy"];
        for name in ["requsts", "pandsa", "flask", "numpy"] {
            assert_eq!(
                is_typosquat(name, &forward, DEFAULT_THRESHOLD),
                is_typosquat(name, &reversed, DEFAULT_THRESHOLD)
            );
        }
    }

    #[test]
    fn test_closest_reference() {
        let refs = ["requests", "numpy"];
        let (name, ratio) = closest_reference("requsts", &refs).unwrap();
        assert_eq!(name, "requests");
        assert!(approx(ratio, 14.0 / 15.0));

        assert_eq!(closest_reference("numpy", &["numpy"]), None);
    }
}
