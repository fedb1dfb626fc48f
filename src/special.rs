//! Special functions and reference distributions.
//!
//! The normal, Student-t, chi-squared and F distribution functions come from
//! `u_numflow::special`. This module adds the two-sided t p-value used by
//! every t-test in the crate and log-factorial helpers from `statrs` for the
//! discrete families.
//!
//! Functions return `f64::NAN` for invalid degrees of freedom or NaN input;
//! callers validate their arguments first.

use statrs::function::factorial;

pub use u_numflow::special::{
    chi_squared_cdf, chi_squared_quantile, f_distribution_cdf, inverse_normal_cdf,
    standard_normal_cdf, standard_normal_sf, t_distribution_cdf, t_distribution_quantile,
};

/// Two-sided p-value of a t statistic: 2·P(T > |t|).
///
/// An infinite statistic gives 0.
pub fn t_two_sided_p(t: f64, df: f64) -> f64 {
    if t.is_infinite() {
        return 0.0;
    }
    (2.0 * (1.0 - t_distribution_cdf(t.abs(), df))).clamp(0.0, 1.0)
}

/// ln(n choose k); `-inf` when `k > n`.
pub fn ln_binomial(n: u64, k: u64) -> f64 {
    factorial::ln_binomial(n, k)
}

/// ln(k!).
pub fn ln_factorial(k: u64) -> f64 {
    factorial::ln_factorial(k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_round_trip() {
        for &p in &[0.01, 0.1, 0.5, 0.9, 0.99] {
            let x = inverse_normal_cdf(p);
            assert!((standard_normal_cdf(x) - p).abs() < 1e-10, "p = {p}");
        }
        assert_eq!(inverse_normal_cdf(0.0), f64::NEG_INFINITY);
        assert_eq!(inverse_normal_cdf(1.0), f64::INFINITY);
        assert!(inverse_normal_cdf(1.5).is_nan());
    }

    #[test]
    fn t_quantile_table_values() {
        // Two-sided 95% critical values
        assert!((t_distribution_quantile(0.975, 1.0) - 12.706205).abs() < 1e-4);
        assert!((t_distribution_quantile(0.975, 30.0) - 2.042272).abs() < 1e-5);
        assert!(t_distribution_quantile(0.975, 0.0).is_nan());
    }

    #[test]
    fn chi_squared_quantile_inverts_cdf() {
        for &k in &[1.0, 2.0, 5.0, 20.0, 63.0] {
            for &p in &[0.025, 0.5, 0.975] {
                let q = chi_squared_quantile(p, k);
                assert!((chi_squared_cdf(q, k) - p).abs() < 1e-9, "k = {k}, p = {p}");
            }
        }
    }

    #[test]
    fn chi_squared_quantile_extreme_tails() {
        // Large df and probabilities close to 1 stay finite and invert the cdf
        let q = chi_squared_quantile(1.0 - 1e-12, 500.0);
        assert!(q.is_finite() && q > 500.0);
        assert!((chi_squared_cdf(q, 500.0) - (1.0 - 1e-12)).abs() < 1e-9);
        let q = chi_squared_quantile(1e-12, 1.0);
        assert!(q > 0.0 && q < 1e-20);
    }

    #[test]
    fn chi_squared_invalid_df() {
        assert!(chi_squared_cdf(1.0, 0.0).is_nan());
        assert!(chi_squared_quantile(0.5, -1.0).is_nan());
    }

    #[test]
    fn f_cdf_bounds() {
        assert_eq!(f_distribution_cdf(0.0, 1.0, 10.0), 0.0);
        // F₀.₉₅(1, 10) = 4.964603
        assert!((f_distribution_cdf(4.964603, 1.0, 10.0) - 0.95).abs() < 1e-5);
    }

    #[test]
    fn two_sided_p() {
        assert!((t_two_sided_p(0.0, 5.0) - 1.0).abs() < 1e-12);
        assert_eq!(t_two_sided_p(f64::INFINITY, 5.0), 0.0);
        assert!((t_two_sided_p(2.262157, 9.0) - 0.05).abs() < 1e-5);
    }

    #[test]
    fn log_factorials() {
        assert!((ln_factorial(5) - 120.0_f64.ln()).abs() < 1e-12);
        assert!((ln_binomial(5, 2) - 10.0_f64.ln()).abs() < 1e-12);
        assert_eq!(ln_binomial(2, 5), f64::NEG_INFINITY);
    }
}
