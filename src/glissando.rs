//! # Glissando Controller
//!
//! The glissando controller turns a stepped control value into a smooth one. Whenever the requested value jumps, the
//! output slides from where it was to the new value in a straight line over a fixed number of samples. This keeps
//! sudden switch flips from showing up as clicks in an audio signal the control value is added to.
//!
//! Unlike an RC-style lag, the glide is linear and always takes the same number of samples no matter how far it has to
//! travel, after which the output sits exactly on the requested value.
//!
//! If the request changes again before a glide finishes, the controller retargets from wherever the output currently
//! is and starts a fresh glide from there, so the output never jumps.
//!
//! The controller does a constant amount of work per sample, never allocates and never fails, so it is safe to call
//! from a real-time audio callback.

use crate::utils::*;
use biquad::Hertz;
use log::{debug, trace};

/// The default glide length in samples, a fifth of a second at 44kHz.
pub const DEFAULT_GLIDE_SAMPLES: u32 = 44_000 / 5;

/// A linear glissando controller is represented here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlissandoController {
    // where the current glide started from, or the resting value when not gliding
    prior: f32,

    // where the current glide is headed
    target: f32,

    // how far into the current glide we are, zero means not gliding
    elapsed: u32,

    // total number of samples a glide takes, never zero
    glide_samples: u32,

    // the most recent output
    value: f32,
}

impl GlissandoController {
    /// `GlissandoController::new(n)` is a new glissando controller at rest at zero, with glides lasting `n` samples
    ///
    /// The glide length is clamped to at least 1 sample, a 1 sample glide is an instant jump.
    pub fn new(glide_samples: u32) -> Self {
        if glide_samples == 0 {
            debug!("glide length of 0 samples clamped to 1");
        }

        Self {
            prior: 0.0_f32,
            target: 0.0_f32,
            elapsed: 0,
            glide_samples: glide_samples.max(1),
            value: 0.0_f32,
        }
    }

    /// `GlissandoController::from_time(sr, t)` is a new glissando controller with sample rate `sr` and glide time `t`
    ///
    /// # Arguments:
    ///
    /// * `sample_rate` - the rate at which `advance` will be called
    ///
    /// * `glide_time_secs` - how long each glide takes in seconds, negative times are treated as zero
    ///
    /// # Examples
    ///
    /// ```
    /// use bacon_modules::glissando::GlissandoController;
    /// use biquad::ToHertz;
    ///
    /// let gliss = GlissandoController::from_time(44_000.0_f32.hz(), 0.2);
    /// assert_eq!(gliss.glide_samples(), 8_800);
    /// ```
    pub fn from_time(sample_rate: Hertz<f32>, glide_time_secs: f32) -> Self {
        let glide_samples = glide_time_to_samples(sample_rate, glide_time_secs);
        debug!("{} s glide is {} samples", glide_time_secs, glide_samples);
        Self::new(glide_samples)
    }

    /// `gliss.advance(v)` is the glissando output after requesting value `v`, must be called once per sample
    ///
    /// A change in the requested value starts a glide towards it. While gliding the output moves by at most
    /// `|target - prior| / glide_samples` per call, and once the glide is over the output equals the request exactly.
    ///
    /// Non-finite requests are ignored and the controller keeps heading for its current target.
    ///
    /// # Examples
    ///
    /// ```
    /// use bacon_modules::glissando::GlissandoController;
    ///
    /// let mut gliss = GlissandoController::new(10);
    /// assert_eq!(gliss.advance(5.0), 0.5);
    /// assert_eq!(gliss.advance(5.0), 1.0);
    /// for _ in 0..7 {
    ///     gliss.advance(5.0);
    /// }
    /// assert_eq!(gliss.advance(5.0), 5.0);
    /// assert!(!gliss.is_gliding());
    /// ```
    pub fn advance(&mut self, requested: f32) -> f32 {
        let requested = if requested.is_finite() {
            requested
        } else {
            self.target
        };

        if self.elapsed == 0 {
            // at rest, nothing to do unless the request moved
            if requested == self.prior {
                self.value = self.prior;
                return self.value;
            }

            trace!("glide start {} -> {}", self.prior, requested);
            self.target = requested;
            self.elapsed = 1;
        }

        if requested != self.target {
            // the old prior and target must both be used before either is overwritten
            let last_known =
                step_interp(self.prior, self.target, self.elapsed, self.glide_samples);
            trace!(
                "glide retarget {} -> {} from {}",
                self.target,
                requested,
                last_known
            );
            self.target = requested;
            self.prior = last_known;
            self.elapsed = 0;
        }

        self.value = step_interp(self.prior, requested, self.elapsed, self.glide_samples);

        if self.elapsed == self.glide_samples {
            trace!("glide complete at {}", self.value);
            self.elapsed = 0;
            self.prior = self.value;
            self.target = self.value;
        } else {
            self.elapsed += 1;
        }

        self.value
    }

    /// `gliss.reset(v)` cancels any glide in progress and puts the controller at rest at value `v`
    ///
    /// Non-finite values reset to zero.
    pub fn reset(&mut self, value: f32) {
        let value = if value.is_finite() { value } else { 0.0_f32 };
        self.prior = value;
        self.target = value;
        self.elapsed = 0;
        self.value = value;
    }

    /// `gliss.value()` is the most recent output of the controller
    pub fn value(&self) -> f32 {
        self.value
    }

    /// `gliss.prior_value()` is the value the current glide started from, or the resting value
    pub fn prior_value(&self) -> f32 {
        self.prior
    }

    /// `gliss.target_value()` is the value the current glide is headed for, or the resting value
    pub fn target_value(&self) -> f32 {
        self.target
    }

    /// `gliss.elapsed()` is how many steps into the current glide the controller is, zero when at rest
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// `gliss.glide_samples()` is the number of samples each glide takes
    pub fn glide_samples(&self) -> u32 {
        self.glide_samples
    }

    /// `gliss.is_gliding()` is true iff a glide is in progress
    pub fn is_gliding(&self) -> bool {
        self.elapsed != 0
    }
}

impl Default for GlissandoController {
    /// `GlissandoController::default()` is a new controller at rest at zero with the default glide length
    fn default() -> Self {
        Self::new(DEFAULT_GLIDE_SAMPLES)
    }
}

/// `glide_time_to_samples(sr, t)` is the number of samples in `t` seconds at sample rate `sr`, at least 1
pub fn glide_time_to_samples(sample_rate: Hertz<f32>, glide_time_secs: f32) -> u32 {
    let samples = sample_rate.hz() * glide_time_secs.max(0.0_f32) + 0.5_f32;
    // float to int casts saturate, NaN lands on zero and is clamped below
    (samples as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use biquad::ToHertz;

    // |out(t+1) - out(t)| may be as large as the slope of the glide before or after the tick, plus float slop
    fn assert_bounded_slew(gliss: &mut GlissandoController, requests: &[f32]) {
        let mut last_out = gliss.value();
        for &r in requests {
            let slope_before = fabs(gliss.target_value() - gliss.prior_value());
            let out = gliss.advance(r);
            let slope_after = fabs(gliss.target_value() - gliss.prior_value());
            let n = gliss.glide_samples() as f32;
            let bound = slope_before.max(slope_after) / n;
            assert!(fabs(out - last_out) <= bound + 1e-5);
            last_out = out;
        }
    }

    #[test]
    fn starts_at_rest_at_zero() {
        let gliss = GlissandoController::default();
        assert_eq!(gliss.value(), 0.0);
        assert_eq!(gliss.elapsed(), 0);
        assert_eq!(gliss.glide_samples(), 8_800);
        assert!(!gliss.is_gliding());
    }

    #[test]
    fn constant_request_at_rest_is_passed_through() {
        let mut gliss = GlissandoController::new(10);
        for _ in 0..100 {
            assert_eq!(gliss.advance(0.0), 0.0);
            assert_eq!(gliss.elapsed(), 0);
        }
    }

    #[test]
    fn linear_ramp_example() {
        let mut gliss = GlissandoController::new(10);

        let expected = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0];
        for e in expected {
            assert_eq!(gliss.advance(5.0), e);
        }

        assert_eq!(gliss.elapsed(), 0);
        assert_eq!(gliss.advance(5.0), 5.0);
        assert_eq!(gliss.elapsed(), 0);
    }

    #[test]
    fn glide_completes_in_exactly_glide_samples() {
        let mut gliss = GlissandoController::default();

        for _ in 0..DEFAULT_GLIDE_SAMPLES - 1 {
            gliss.advance(12.0);
            assert!(gliss.is_gliding());
        }

        assert_eq!(gliss.advance(12.0), 12.0);
        assert_eq!(gliss.elapsed(), 0);
        assert_eq!(gliss.prior_value(), 12.0);
        assert_eq!(gliss.target_value(), 12.0);
    }

    #[test]
    fn at_rest_value_repeated_never_starts_a_glide() {
        let mut gliss = GlissandoController::new(4);
        for _ in 0..4 {
            gliss.advance(1.0);
        }
        for _ in 0..50 {
            assert_eq!(gliss.advance(1.0), 1.0);
            assert_eq!(gliss.elapsed(), 0);
        }
    }

    #[test]
    fn retarget_continues_from_where_the_glide_was() {
        let n = 100;
        let mut gliss = GlissandoController::new(n);

        for _ in 0..n / 2 {
            gliss.advance(12.0);
        }
        let before = gliss.value();
        assert!(is_almost(before, 6.0, 1e-5));

        let at_retarget = gliss.advance(-12.0);

        // the new glide starts one step further along the old one, not back at zero
        assert!(is_almost(gliss.prior_value(), 6.12, 1e-4));
        assert_eq!(at_retarget, gliss.prior_value());
        assert_eq!(gliss.target_value(), -12.0);
        assert_eq!(gliss.elapsed(), 1);
        assert!(fabs(at_retarget - before) <= 24.0 / n as f32 + 1e-5);
    }

    #[test]
    fn retargeted_glide_completes_on_the_new_target() {
        let n = 100;
        let mut gliss = GlissandoController::new(n);

        for _ in 0..n / 2 {
            gliss.advance(12.0);
        }
        gliss.advance(-12.0);
        for _ in 0..n - 1 {
            gliss.advance(-12.0);
            assert!(gliss.is_gliding());
        }

        assert_eq!(gliss.advance(-12.0), -12.0);
        assert!(!gliss.is_gliding());
        assert_eq!(gliss.prior_value(), -12.0);
    }

    #[test]
    fn glide_is_monotonic() {
        let mut gliss = GlissandoController::new(1_000);

        let mut last = gliss.advance(0.0);
        for _ in 0..1_000 {
            let res = gliss.advance(1.0);
            assert!(last < res);
            last = res;
        }
    }

    #[test]
    fn slew_is_bounded_through_several_retargets() {
        let mut gliss = GlissandoController::new(64);

        let mut requests = [0.0_f32; 400];
        requests[10..40].iter_mut().for_each(|r| *r = 1.0);
        requests[40..45].iter_mut().for_each(|r| *r = -0.5);
        requests[45..200].iter_mut().for_each(|r| *r = 2.4166667);
        requests[200..230].iter_mut().for_each(|r| *r = -1.0);

        assert_bounded_slew(&mut gliss, &requests);

        // it settles back to rest on the last request
        assert_eq!(gliss.value(), 0.0);
        assert!(!gliss.is_gliding());
    }

    #[test]
    fn one_sample_glide_is_a_jump() {
        let mut gliss = GlissandoController::new(0);
        assert_eq!(gliss.glide_samples(), 1);
        assert_eq!(gliss.advance(3.0), 3.0);
        assert!(!gliss.is_gliding());
        assert_eq!(gliss.advance(-1.0), -1.0);
    }

    #[test]
    fn non_finite_requests_are_ignored() {
        let mut gliss = GlissandoController::new(10);

        assert_eq!(gliss.advance(f32::NAN), 0.0);
        assert!(!gliss.is_gliding());

        gliss.advance(1.0);
        let mid = gliss.advance(f32::INFINITY);
        assert!(is_almost(mid, 0.2, 1e-6));
        assert_eq!(gliss.target_value(), 1.0);
    }

    #[test]
    fn reset_cancels_a_glide() {
        let mut gliss = GlissandoController::new(10);
        gliss.advance(1.0);
        gliss.reset(0.25);

        assert!(!gliss.is_gliding());
        assert_eq!(gliss.value(), 0.25);
        assert_eq!(gliss.advance(0.25), 0.25);
    }

    #[test]
    fn glide_time_converts_to_samples() {
        assert_eq!(glide_time_to_samples(44_000.0_f32.hz(), 0.2), 8_800);
        assert_eq!(glide_time_to_samples(48_000.0_f32.hz(), 0.5), 24_000);
        assert_eq!(glide_time_to_samples(48_000.0_f32.hz(), 0.0), 1);
        assert_eq!(glide_time_to_samples(48_000.0_f32.hz(), -1.0), 1);
    }
}
