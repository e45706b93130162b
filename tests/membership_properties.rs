//! Property tests for the membership function shapes

use gesture_fuzzy::MembershipFunction;
use proptest::prelude::*;

const EPS: f64 = 1e-9;

/// `(a, b, c, plateau_width)` with `a < b < c` and `plateau_width` in `[0, c - a]`
fn triangle() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (-100.0..100.0f64, 0.01..50.0f64, 0.01..50.0f64, 0.0..=1.0f64)
        .prop_map(|(a, left, right, frac)| (a, a + left, a + left + right, frac * (left + right)))
}

/// `(a, b, c, d)` with strictly increasing parameters
fn trapezoid() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (-100.0..100.0f64, 0.01..50.0f64, 0.01..50.0f64, 0.01..50.0f64)
        .prop_map(|(a, g1, g2, g3)| (a, a + g1, a + g1 + g2, a + g1 + g2 + g3))
}

proptest! {
    #[test]
    fn test_triangular_zero_outside_feet((a, b, c, w) in triangle(), beyond in 0.0..100.0f64) {
        let mf = MembershipFunction::triangular_with_plateau(a, b, c, w).unwrap();
        prop_assert_eq!(mf.evaluate(a), 0.0);
        prop_assert_eq!(mf.evaluate(c), 0.0);
        prop_assert_eq!(mf.evaluate(a - beyond), 0.0);
        prop_assert_eq!(mf.evaluate(c + beyond), 0.0);
    }

    #[test]
    fn test_triangular_one_on_plateau((a, b, c, w) in triangle(), t in 0.0..=1.0f64) {
        let mf = MembershipFunction::triangular_with_plateau(a, b, c, w).unwrap();
        let (start, end) = mf.core().unwrap();
        prop_assert!(start >= a && end <= c && start <= end);

        let x = (start + t * (end - start)).clamp(start, end);
        if x > a && x < c {
            prop_assert_eq!(mf.evaluate(x), 1.0);
        }
    }

    #[test]
    fn test_triangular_ramps_linear_and_monotonic(
        (a, b, c, w) in triangle(),
        t1 in 0.0..=1.0f64,
        t2 in 0.0..=1.0f64,
    ) {
        let mf = MembershipFunction::triangular_with_plateau(a, b, c, w).unwrap();
        let (start, end) = mf.core().unwrap();
        let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };

        if start > a {
            let x1 = a + lo * (start - a);
            let x2 = a + hi * (start - a);
            if x1 > a && x2 < start {
                prop_assert!(mf.evaluate(x1) <= mf.evaluate(x2) + EPS);
                prop_assert!((mf.evaluate(x1) - (x1 - a) / (start - a)).abs() < 1e-6);
            }
        }
        if c > end {
            let x1 = end + lo * (c - end);
            let x2 = end + hi * (c - end);
            if x1 > end && x2 < c {
                prop_assert!(mf.evaluate(x1) + EPS >= mf.evaluate(x2));
                prop_assert!((mf.evaluate(x2) - (c - x2) / (c - end)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_triangular_in_unit_interval((a, b, c, w) in triangle(), x in -300.0..300.0f64) {
        let mf = MembershipFunction::triangular_with_plateau(a, b, c, w).unwrap();
        let mu = mf.evaluate(x);
        prop_assert!((0.0..=1.0).contains(&mu), "mu({}) = {}", x, mu);
    }

    #[test]
    fn test_trapezoidal_shape((a, b, c, d) in trapezoid(), t in 0.0..=1.0f64, beyond in 0.0..100.0f64) {
        let mf = MembershipFunction::trapezoidal(a, b, c, d).unwrap();

        prop_assert_eq!(mf.evaluate(a - beyond), 0.0);
        prop_assert_eq!(mf.evaluate(d + beyond), 0.0);
        prop_assert_eq!(mf.evaluate((b + t * (c - b)).clamp(b, c)), 1.0);

        let rising = a + t * (b - a);
        if rising > a && rising < b {
            prop_assert!((mf.evaluate(rising) - (rising - a) / (b - a)).abs() < 1e-6);
        }
        let falling = c + t * (d - c);
        if falling > c && falling < d {
            prop_assert!((mf.evaluate(falling) - (d - falling) / (d - c)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_gaussian_peaks_at_center(center in -100.0..100.0f64, sigma in 0.01..20.0f64, x in -300.0..300.0f64) {
        let mf = MembershipFunction::gaussian(center, sigma).unwrap();
        prop_assert!((mf.evaluate(center) - 1.0).abs() < EPS);
        let mu = mf.evaluate(x);
        prop_assert!((0.0..=1.0).contains(&mu));
    }
}
