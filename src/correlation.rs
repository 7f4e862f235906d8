//! Lazily recalculated least-squares fit over a bounded set of sample pairs

use log::{debug, trace};

use crate::buffer::SampleBuffer;
use crate::sample::Sample;

/// Bounded-memory accumulator for least-squares linear regression and
/// Pearson correlation over `(x, y)` pairs.
///
/// Up to `N` pairs are retained (20 by default). Once full, [`add`] either
/// rejects new pairs or, in running mode, overwrites the oldest pair so the
/// fit tracks the most recent window. Derived statistics are cached:
/// [`calculate`] recomputes them only after the dataset changed, and every
/// getter returns the values of the last computation.
///
/// The accumulator never panics and never aborts. Precondition violations
/// come back as `false` or `None`; a degenerate fit (all x equal) surfaces
/// as a NaN slope that propagates into dependent values.
///
/// ```
/// use correlation::Correlation;
///
/// let mut corr = Correlation::<20>::new();
/// corr.add(1.0, 2.0);
/// corr.add(2.0, 4.0);
/// corr.add(3.0, 6.0);
///
/// assert!(corr.calculate());
/// assert!((corr.b() - 2.0).abs() < 1e-6);
/// assert!((corr.r() - 1.0).abs() < 1e-6);
/// assert!((corr.estimate_y(10.0) - 20.0).abs() < 1e-4);
/// ```
///
/// [`add`]: Correlation::add
/// [`calculate`]: Correlation::calculate
#[derive(Clone, Debug)]
pub struct Correlation<const N: usize = 20> {
    samples: SampleBuffer<N>,
    running: bool,
    dirty: bool,
    do_r2: bool,
    do_e2: bool,

    avg_x: f32,
    avg_y: f32,
    a: f32,
    b: f32,
    r: f32,
    e_squared: f32,
    sum_xy: f32,
    sum_x2: f32,
    sum_y2: f32,
}

impl<const N: usize> Correlation<N> {
    pub fn new() -> Self {
        Correlation {
            samples: SampleBuffer::new(),
            running: false,
            dirty: true,
            do_r2: true,
            do_e2: true,

            avg_x: 0.0,
            avg_y: 0.0,
            a: 0.0,
            b: 0.0,
            r: 0.0,
            e_squared: 0.0,
            sum_xy: 0.0,
            sum_x2: 0.0,
            sum_y2: 0.0,
        }
    }

    /// Adds a pair and marks the cached statistics stale.
    ///
    /// While there is room the pair lands in the next free slot. On a full
    /// accumulator the pair is rejected, unless running mode is on, in which
    /// case it replaces the oldest pair (circular, insertion order).
    ///
    /// Inputs are not validated; a NaN or infinite coordinate poisons the
    /// statistics until the offending slot is overwritten or cleared.
    pub fn add(&mut self, x: f32, y: f32) -> bool {
        let sample = Sample::new(x, y);
        let stored = if self.samples.push(sample) {
            true
        } else if self.running {
            self.samples.overwrite(sample)
        } else {
            false
        };
        if stored {
            self.dirty = true;
        }
        stored
    }

    /// Drops all samples. Storage is retained, statistics keep their last
    /// computed values until the next [`calculate`](Correlation::calculate).
    pub fn clear(&mut self) {
        self.samples.clear();
        self.dirty = true;
    }

    /// Number of stored pairs, `0..=N`.
    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn is_full(&self) -> bool {
        self.samples.is_full()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// In running mode a full accumulator keeps accepting pairs by evicting
    /// the oldest one, so the fit adapts to the newest window.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Enables or disables the correlation coefficient computation. Off, a
    /// [`calculate`](Correlation::calculate) leaves [`r`](Correlation::r) at
    /// its previous value, which saves a square root per recomputation.
    pub fn set_r2_calculation(&mut self, enabled: bool) {
        self.do_r2 = enabled;
    }

    pub fn r2_calculation(&self) -> bool {
        self.do_r2
    }

    /// Enables or disables the residual-error computation. Off, a
    /// [`calculate`](Correlation::calculate) leaves
    /// [`e_squared`](Correlation::e_squared) at its previous value, which
    /// saves a pass over the samples per recomputation.
    pub fn set_e2_calculation(&mut self, enabled: bool) {
        self.do_e2 = enabled;
    }

    pub fn e2_calculation(&self) -> bool {
        self.do_e2
    }

    /// Refreshes the derived statistics if the dataset changed since the
    /// last computation; a clean accumulator returns immediately.
    ///
    /// Returns false when no samples are stored, leaving all statistics
    /// untouched.
    pub fn calculate(&mut self) -> bool {
        if self.samples.is_empty() {
            return false;
        }
        if !self.dirty {
            return true;
        }
        self.recompute();
        true
    }

    /// Like [`calculate`](Correlation::calculate), but recomputes even when
    /// the cache is clean.
    pub fn recalculate(&mut self) -> bool {
        if self.samples.is_empty() {
            return false;
        }
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        let n = self.samples.len() as f32;

        let mut sum_x = 0.0f32;
        let mut sum_y = 0.0f32;
        let mut sum_xy = 0.0f32;
        let mut sum_x2 = 0.0f32;
        let mut sum_y2 = 0.0f32;
        for s in self.samples.iter() {
            sum_x += s.x;
            sum_y += s.y;
            sum_xy += s.x * s.y;
            sum_x2 += s.x * s.x;
            sum_y2 += s.y * s.y;
        }

        self.avg_x = sum_x / n;
        self.avg_y = sum_y / n;
        self.sum_xy = sum_xy;
        self.sum_x2 = sum_x2;
        self.sum_y2 = sum_y2;

        // Y = A + B * X, from the uncentered sums. The scaled x-variance
        // n*Σx² - (Σx)² is non-negative up to rounding; anything at or below
        // zero means all x coincide and the fit is a vertical line.
        let sxx = n * sum_x2 - sum_x * sum_x;
        let sxy = n * sum_xy - sum_x * sum_y;
        if sxx > 0.0 {
            self.b = sxy / sxx;
        } else {
            debug!(
                "zero x-variance over {} samples, slope undefined",
                self.samples.len()
            );
            self.b = f32::NAN;
        }
        self.a = self.avg_y - self.b * self.avg_x;

        if self.do_r2 {
            let syy = n * sum_y2 - sum_y * sum_y;
            self.r = if sxx > 0.0 && syy > 0.0 {
                sxy / libm::sqrtf(sxx * syy)
            } else {
                f32::NAN
            };
        }

        if self.do_e2 {
            let mut e2 = 0.0f32;
            for s in self.samples.iter() {
                let residual = s.y - (self.a + self.b * s.x);
                e2 += residual * residual;
            }
            self.e_squared = e2;
        }

        self.dirty = false;
        trace!("recomputed fit over {} samples", self.samples.len());
    }

    /// Intercept of `y = a + b*x`, as of the last computation.
    pub fn a(&self) -> f32 {
        self.a
    }

    /// Slope of `y = a + b*x`, as of the last computation. NaN when all
    /// x-values were equal.
    pub fn b(&self) -> f32 {
        self.b
    }

    /// Pearson correlation coefficient in [-1, 1], as of the last
    /// computation. NaN when either coordinate had zero variance; the
    /// degenerate case follows the slope's NaN policy rather than being
    /// forced to 0.
    pub fn r(&self) -> f32 {
        self.r
    }

    pub fn r_squared(&self) -> f32 {
        self.r * self.r
    }

    /// Sum of squared residuals against the fitted line. The smaller the
    /// value, the closer the samples sit to one line.
    pub fn e_squared(&self) -> f32 {
        self.e_squared
    }

    pub fn avg_x(&self) -> f32 {
        self.avg_x
    }

    pub fn avg_y(&self) -> f32 {
        self.avg_y
    }

    /// Raw sum Σ xi·yi over the samples of the last computation.
    pub fn sum_xy(&self) -> f32 {
        self.sum_xy
    }

    /// Raw sum Σ xi² over the samples of the last computation.
    pub fn sum_x2(&self) -> f32 {
        self.sum_x2
    }

    /// Raw sum Σ yi² over the samples of the last computation.
    pub fn sum_y2(&self) -> f32 {
        self.sum_y2
    }

    /// Predicted y for the given x, using the last computed fit. Call
    /// [`calculate`](Correlation::calculate) first; this never recomputes,
    /// so its cost stays constant.
    pub fn estimate_y(&self, x: f32) -> f32 {
        self.a + self.b * x
    }

    /// Inverse prediction: the x whose fitted y equals the given value.
    /// NaN when the slope is zero or undefined.
    pub fn estimate_x(&self, y: f32) -> f32 {
        if self.b == 0.0 || self.b.is_nan() {
            return f32::NAN;
        }
        (y - self.a) / self.b
    }

    /// Smallest stored x, or `None` when empty.
    pub fn min_x(&self) -> Option<f32> {
        self.samples.iter().map(|s| s.x).reduce(f32::min)
    }

    /// Largest stored x, or `None` when empty.
    pub fn max_x(&self) -> Option<f32> {
        self.samples.iter().map(|s| s.x).reduce(f32::max)
    }

    /// Smallest stored y, or `None` when empty.
    pub fn min_y(&self) -> Option<f32> {
        self.samples.iter().map(|s| s.y).reduce(f32::min)
    }

    /// Largest stored y, or `None` when empty.
    pub fn max_y(&self) -> Option<f32> {
        self.samples.iter().map(|s| s.y).reduce(f32::max)
    }

    /// Overwrites the x of a filled slot, bypassing the circular
    /// bookkeeping. Fails for indices at or past [`count`](Correlation::count).
    pub fn set_x(&mut self, idx: usize, x: f32) -> bool {
        match self.samples.get_mut(idx) {
            Some(s) => {
                s.x = x;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Overwrites the y of a filled slot. Fails past
    /// [`count`](Correlation::count).
    pub fn set_y(&mut self, idx: usize, y: f32) -> bool {
        match self.samples.get_mut(idx) {
            Some(s) => {
                s.y = y;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Overwrites both coordinates of a filled slot. Fails past
    /// [`count`](Correlation::count).
    pub fn set_xy(&mut self, idx: usize, x: f32, y: f32) -> bool {
        match self.samples.get_mut(idx) {
            Some(s) => {
                *s = Sample::new(x, y);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    pub fn get_x(&self, idx: usize) -> Option<f32> {
        self.samples.get(idx).map(|s| s.x)
    }

    pub fn get_y(&self, idx: usize) -> Option<f32> {
        self.samples.get(idx).map(|s| s.y)
    }
}

impl<const N: usize> Default for Correlation<N> {
    fn default() -> Self {
        Self::new()
    }
}
