//! Proportional cloning.

use crate::simulation::Antibody;

/// Number of clones for a clone `rate` over `len` symbols: `round(rate * len)`.
///
/// Never negative; NaN and infinite rates give no clones.
///
/// ```rust
/// # use clonalg_sim::evolution::clone_count;
/// assert_eq!(clone_count(0.5, 5), 3);
/// assert_eq!(clone_count(-1.0, 5), 0);
/// ```
#[inline]
pub fn clone_count(rate: f64, len: usize) -> usize {
    if !rate.is_finite() || rate <= 0.0 {
        return 0;
    }
    (rate * len as f64).round() as usize
}

/// `count` independent deep copies of `parent`.
pub fn clones(parent: &Antibody, count: usize) -> Vec<Antibody> {
    (0..count).map(|_| parent.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Sequence;
    use std::str::FromStr;

    #[test]
    fn test_clone_count_never_negative() {
        for rate in [-10.0, -0.1, 0.0, 0.04, 0.5, 1.0, f64::NAN, f64::NEG_INFINITY] {
            assert!(clone_count(rate, 10) <= 10, "rate {rate}");
        }
        assert_eq!(clone_count(0.04, 10), 0);
        assert_eq!(clone_count(0.05, 10), 1);
        assert_eq!(clone_count(1.0, 7), 7);
        assert_eq!(clone_count(f64::NAN, 7), 0);
    }

    #[test]
    fn test_clones_are_independent() {
        let parent = Antibody::new(Sequence::from_str("ACGT").unwrap());
        let mut copies = clones(&parent, 3);
        assert_eq!(copies.len(), 3);
        copies[0].sequence_mut().set(0, b'T').unwrap();
        assert_eq!(copies[1].sequence().to_string(), "ACGT");
        assert_eq!(parent.sequence().to_string(), "ACGT");
    }
}
