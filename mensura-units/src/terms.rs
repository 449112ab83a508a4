//! Rational exponents and product-term merging
//!
//! A product unit is a list of `(unit, pow/root)` terms. Merging is kept
//! independent of `Unit` so canonicalization can be tested on plain keys.

use std::fmt;

/// A reduced rational exponent `pow/root` with `root > 0`.
///
/// `pow` never holds `i32::MIN`, so negation cannot overflow. Arithmetic is
/// checked and yields None when a result leaves that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Exponent {
    pow: i32,
    root: i32,
}

/// Greatest common divisor of the magnitudes
pub fn gcd(a: i64, b: i64) -> u64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Exponent {
    /// `1/1`
    pub const ONE: Exponent = Exponent { pow: 1, root: 1 };

    /// Build and reduce `pow/root`. None when `root` is zero or the reduced
    /// form leaves the i32 range.
    pub fn new(pow: i32, root: i32) -> Option<Exponent> {
        Self::reduce(pow.into(), root.into())
    }

    /// Reduction runs in i64: every caller passes at most a product of two
    /// i32 values, so sign normalization cannot overflow here.
    fn reduce(pow: i64, root: i64) -> Option<Exponent> {
        if root == 0 {
            return None;
        }
        let (pow, root) = if root < 0 { (-pow, -root) } else { (pow, root) };
        let divisor = i64::try_from(gcd(pow, root)).ok()?.max(1);
        Some(Exponent {
            pow: i32::try_from(pow / divisor).ok().filter(|p| *p != i32::MIN)?,
            root: i32::try_from(root / divisor).ok()?,
        })
    }

    /// Whole-number exponent `pow/1`
    pub fn integer(pow: i32) -> Option<Exponent> {
        Self::new(pow, 1)
    }

    /// Numerator
    pub fn pow(&self) -> i32 {
        self.pow
    }

    /// Denominator, always positive
    pub fn root(&self) -> i32 {
        self.root
    }

    pub fn is_zero(&self) -> bool {
        self.pow == 0
    }

    pub fn is_one(&self) -> bool {
        *self == Exponent::ONE
    }

    /// True when the denominator is 1
    pub fn is_integer(&self) -> bool {
        self.root == 1
    }

    /// Sum over a common root
    pub fn checked_plus(&self, other: &Exponent) -> Option<Exponent> {
        let (p1, r1, p2, r2) = self.wide(other);
        Self::reduce(p1 * r2 + p2 * r1, r1 * r2)
    }

    pub fn negate(&self) -> Exponent {
        Exponent { pow: -self.pow, root: self.root }
    }

    /// Product of two exponents
    pub fn checked_times(&self, other: &Exponent) -> Option<Exponent> {
        let (p1, r1, p2, r2) = self.wide(other);
        Self::reduce(p1 * p2, r1 * r2)
    }

    /// `self * n`; a negative `n` flips the sign
    pub fn checked_times_int(&self, n: i32) -> Option<Exponent> {
        Self::reduce(i64::from(self.pow) * i64::from(n), self.root.into())
    }

    /// `self / n`; a negative `n` flips the sign
    pub fn checked_nth_root(&self, n: i32) -> Option<Exponent> {
        Self::reduce(self.pow.into(), i64::from(self.root) * i64::from(n))
    }

    fn wide(&self, other: &Exponent) -> (i64, i64, i64, i64) {
        (self.pow.into(), self.root.into(), other.pow.into(), other.root.into())
    }
}

impl fmt::Display for Exponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.root == 1 {
            write!(f, "{}", self.pow)
        } else {
            write!(f, "({}/{})", self.pow, self.root)
        }
    }
}

/// Merge two term lists: same-key exponents are summed over a common root
/// and reduced, zero-exponent terms dropped. First-seen order is kept.
///
/// None when a summed exponent leaves the i32 range.
pub fn merge<K: PartialEq + Clone>(left: &[(K, Exponent)], right: &[(K, Exponent)]) -> Option<Vec<(K, Exponent)>> {
    let mut merged: Vec<(K, Exponent)> = Vec::with_capacity(left.len() + right.len());
    for (key, exp) in left.iter().chain(right.iter()) {
        match merged.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = existing.checked_plus(exp)?,
            None => merged.push((key.clone(), *exp)),
        }
    }
    merged.retain(|(_, exp)| !exp.is_zero());
    Some(merged)
}

/// Apply `f` to every exponent, then merge to canonical form
pub fn map_exponents<K, F>(terms: &[(K, Exponent)], f: F) -> Option<Vec<(K, Exponent)>>
where
    K: PartialEq + Clone,
    F: Fn(&Exponent) -> Option<Exponent>,
{
    let mapped = terms.iter()
        .map(|(k, e)| Some((k.clone(), f(e)?)))
        .collect::<Option<Vec<(K, Exponent)>>>()?;
    merge(&mapped, &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(pow: i32, root: i32) -> Exponent {
        Exponent::new(pow, root).unwrap()
    }

    fn t(key: &'static str, pow: i32, root: i32) -> (&'static str, Exponent) {
        (key, e(pow, root))
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-4, 6), 2);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(i64::MIN, 0), 1u64 << 63);
    }

    #[test]
    fn test_exponent_reduces() {
        assert_eq!(e(2, 2), Exponent::ONE);
        assert_eq!(e(4, 6), e(2, 3));
        assert_eq!(e(3, -6), e(-1, 2));
        assert_eq!(e(0, 7), Exponent::integer(0).unwrap());
        assert_eq!(Exponent::new(1, 0), None);
    }

    #[test]
    fn test_out_of_range_exponents_are_refused() {
        assert_eq!(Exponent::integer(i32::MIN), None);
        assert_eq!(Exponent::new(i32::MIN, -1), None);
        assert_eq!(Exponent::new(i32::MIN, 2), Some(e(-(1 << 30), 1)));
        assert_eq!(Exponent::ONE.checked_times_int(i32::MIN), None);
        assert_eq!(e(2, 1).checked_times_int(i32::MAX), None);
        assert_eq!(e(i32::MAX, 1).checked_plus(&Exponent::ONE), None);
        assert_eq!(e(1, i32::MAX).checked_nth_root(2), None);
    }

    #[test]
    fn test_negative_factors_flip_the_sign() {
        assert_eq!(e(1, 2).checked_times_int(-4), Some(e(-2, 1)));
        assert_eq!(e(2, 1).checked_nth_root(-2), Some(e(-1, 1)));
        assert_eq!(Exponent::ONE.checked_nth_root(i32::MIN), None);
    }

    #[test]
    fn test_plus_over_common_root() {
        let half = e(1, 2);
        let third = e(1, 3);
        assert_eq!(half.checked_plus(&third), Some(e(5, 6)));
        assert_eq!(half.checked_plus(&half), Some(Exponent::ONE));
        assert_eq!(half.checked_times(&third), Some(e(1, 6)));
    }

    #[test]
    fn test_merge_same_keys() {
        let merged = merge(&[t("m", 1, 1)], &[t("m", 1, 1)]).unwrap();
        assert_eq!(merged, vec![t("m", 2, 1)]);
    }

    #[test]
    fn test_merge_drops_zero() {
        let merged = merge(&[t("m", 1, 1), t("s", -1, 1)], &[t("m", -1, 1)]).unwrap();
        assert_eq!(merged, vec![t("s", -1, 1)]);
        assert!(merge(&[t("m", 1, 2)], &[t("m", -1, 2)]).unwrap().is_empty());
    }

    #[test]
    fn test_merge_keeps_first_seen_order() {
        let merged = merge(&[t("kg", 1, 1), t("m", 1, 1)], &[t("s", -2, 1), t("m", 1, 1)]).unwrap();
        assert_eq!(merged, vec![t("kg", 1, 1), t("m", 2, 1), t("s", -2, 1)]);
    }

    #[test]
    fn test_merge_normalizes_duplicates_within_one_side() {
        let merged = merge(&[t("m", 1, 2), t("m", 1, 2)], &[]).unwrap();
        assert_eq!(merged, vec![t("m", 1, 1)]);
    }

    #[test]
    fn test_merge_overflow() {
        assert_eq!(merge(&[t("m", i32::MAX, 1)], &[t("m", 1, 1)]), None);
    }

    #[test]
    fn test_map_exponents_root_then_pow() {
        let squared = map_exponents(&[t("m", 1, 1), t("s", -1, 1)], |x| x.checked_times_int(2)).unwrap();
        assert_eq!(squared, vec![t("m", 2, 1), t("s", -2, 1)]);
        let rooted = map_exponents(&squared, |x| x.checked_nth_root(2)).unwrap();
        assert_eq!(rooted, vec![t("m", 1, 1), t("s", -1, 1)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(e(-2, 1).to_string(), "-2");
        assert_eq!(e(1, 2).to_string(), "(1/2)");
    }
}
