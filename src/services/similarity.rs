use std::collections::HashSet;

/// Jaccard similarity between two tag sets
///
/// Duplicates are collapsed. Returns 0.0 when either set is empty,
/// otherwise |A ∩ B| / |A ∪ B|, always within [0, 1].
pub fn jaccard<'a>(
    a: impl IntoIterator<Item = &'a str>,
    b: impl IntoIterator<Item = &'a str>,
) -> f64 {
    let a: HashSet<&str> = a.into_iter().collect();
    let b: HashSet<&str> = b.into_iter().collect();

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(&b).count();
    let union = a.union(&b).count();

    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sets_score_zero() {
        assert_eq!(jaccard([], ["a", "b"]), 0.0);
        assert_eq!(jaccard(["a", "b"], []), 0.0);
        assert_eq!(jaccard([], []), 0.0);
    }

    #[test]
    fn test_identical_sets_score_one() {
        assert_eq!(jaccard(["a", "b"], ["a", "b"]), 1.0);
        assert_eq!(jaccard(["a", "b"], ["b", "a"]), 1.0);
    }

    #[test]
    fn test_disjoint_sets_score_zero() {
        assert_eq!(jaccard(["a"], ["b"]), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // {a,b} vs {b,c}: intersection 1, union 3
        assert_eq!(jaccard(["a", "b"], ["b", "c"]), 1.0 / 3.0);
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(jaccard(["a", "a", "b"], ["b", "b", "a"]), 1.0);
    }
}
