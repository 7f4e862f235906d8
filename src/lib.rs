#![cfg_attr(not(test), no_std)]
//! Bounded-memory linear regression and Pearson correlation.
//!
//! [`Correlation`] keeps up to `N` `(x, y)` pairs in fixed inline storage and
//! lazily derives the least-squares fit `y = a + b*x`, the correlation
//! coefficient, averages, extremes and the residual error from them. In
//! running mode a full accumulator evicts its oldest pair instead of
//! rejecting new ones, so the fit follows the most recent window, which
//! suits periodic sensor-logging loops.
//!
//! The memory footprint is fixed at construction and all failures are local
//! and recoverable; nothing panics and nothing allocates:
//!
//! ```
//! use correlation::Correlation;
//!
//! let mut corr = Correlation::<20>::new();
//! corr.set_running(true);
//!
//! for i in 0..30 {
//!     let x = i as f32;
//!     corr.add(x, 3.0 + 0.5 * x);
//! }
//!
//! assert!(corr.calculate());
//! assert!((corr.b() - 0.5).abs() < 1e-4);
//! assert!((corr.estimate_y(40.0) - 23.0).abs() < 1e-2);
//! ```

mod buffer;
mod correlation;
mod sample;

pub use crate::correlation::Correlation;
pub use crate::sample::Sample;
