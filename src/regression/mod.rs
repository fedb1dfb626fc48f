//! Regression analysis.
//!
//! - [`linear_regression`]: `y = b + k·x` with correlation, R², mean
//!   approximation error and elasticity.
//! - [`regression_diagnostics`]: coefficient t-tests, the model F-test, the
//!   correlation t-test and Gauss–Markov residual checks.
//! - [`multiple_regression`]: `y = b₀ + b₁·x₁ + b₂·x₂` through a Cholesky
//!   solve of the normal equations, with per-coefficient tests and VIF.
//!
//! # Examples
//!
//! ```
//! use u_distfit::regression::linear_regression;
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = [2.1, 3.9, 6.1, 7.9, 10.1];
//! let result = linear_regression(&x, &y).unwrap();
//! assert!((result.slope - 2.0).abs() < 0.1);
//! assert!(result.r_squared > 0.99);
//! ```

mod diagnostics;
mod multiple;
mod simple;

pub use diagnostics::{
    coefficient_tests, model_f_test, regression_diagnostics, residual_diagnostics,
    CoefficientTests, ModelFTest, RegressionDiagnostics, ResidualDiagnostics,
};
pub use multiple::{multiple_regression, Coefficients, MultipleRegressionResult, VarianceInflation};
pub use simple::{linear_regression, RegressionResult};
