//! Counting functions for the size of the generated models.
//!
//! These counts are used to reserve memory and to report the size of
//! a model before it is built.

/// Number of subsets of a set of size `n`.
pub fn subset_count(n: usize) -> Option<usize> {
    1usize.checked_shl(u32::try_from(n).ok()?)
}

/// Number of unordered pairs of distinct subsets of a set of size `n`.
pub fn subset_pair_count(n: usize) -> Option<usize> {
    let m = subset_count(n)?;
    m.checked_mul(m - 1).map(|x| x / 2)
}

/// Number of pairs `S ⊆ T` of distinct subsets of a set of size `n`,
/// that is `3^n - 2^n`.
pub fn nested_pair_count(n: usize) -> Option<usize> {
    let three = 3usize.checked_pow(u32::try_from(n).ok()?)?;
    Some(three - subset_count(n)?)
}

/// Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_subset_count() {
        assert_eq!(Some(1), subset_count(0));
        assert_eq!(Some(1024), subset_count(10));
        // 3^n pairs S ⊆ T, among which 2^n with S = T
        for n in 0..10 {
            let m = subset_count(n).unwrap();
            let nested = nested_pair_count(n).unwrap();
            assert!(nested <= subset_pair_count(n).unwrap());
            assert_eq!(nested + m, 3usize.pow(n as u32));
        }
    }

    #[test]
    fn unit_pairs() {
        assert_eq!(Some(28), subset_pair_count(3));
        assert_eq!(Some(0), subset_pair_count(0));
        assert_eq!(Some(19), nested_pair_count(3));
        assert_eq!(Some(0), nested_pair_count(0));
        assert_eq!(None, subset_count(usize::BITS as usize));
    }
}
