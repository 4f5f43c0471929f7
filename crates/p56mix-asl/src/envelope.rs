//! Envelope detection.
//!
//! Two identical one-pole low-pass stages in cascade, each
//! `y[n] = (1 - g) * x[n] + g * y[n - 1]` with zero initial state, applied to
//! the rectified signal.

/// One-pole smoother with numerator `(1 - g)` and denominator `(1, -g)`.
#[derive(Debug, Clone, Copy)]
struct OnePole {
    g: f64,
    state: f64,
}

impl OnePole {
    fn new(g: f64) -> Self {
        Self { g, state: 0.0 }
    }

    #[inline]
    fn process(&mut self, x: f64) -> f64 {
        self.state = (1.0 - self.g) * x + self.g * self.state;
        self.state
    }
}

/// Cascaded two-stage envelope detector.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeDetector {
    first: OnePole,
    second: OnePole,
}

impl EnvelopeDetector {
    /// Creates a detector with smoothing factor `g` in `[0, 1]`.
    pub fn new(g: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&g));
        Self {
            first: OnePole::new(g),
            second: OnePole::new(g),
        }
    }

    /// Feeds one sample and returns the smoothed envelope `q[n]`.
    #[inline]
    pub fn process(&mut self, x: f64) -> f64 {
        let p = self.first.process(x.abs());
        self.second.process(p)
    }
}
