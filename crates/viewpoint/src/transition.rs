use std::time::Duration;

use campusview_common::Viewpoint;

/// A time-bounded linear interpolation between two viewpoints.
///
/// Parameterized by elapsed wall-clock time, so the result does not depend on
/// how often the host loop ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    from: Viewpoint,
    to: Viewpoint,
    elapsed: Duration,
    total: Duration,
}

impl Transition {
    /// Start a transition. Both endpoints are copied.
    ///
    /// Equal endpoints give an already-complete transition.
    pub fn begin(from: Viewpoint, to: Viewpoint, total: Duration) -> Self {
        let elapsed = if from == to { total } else { Duration::ZERO };
        Self {
            from,
            to,
            elapsed,
            total,
        }
    }

    pub fn from(&self) -> Viewpoint {
        self.from
    }

    pub fn to(&self) -> Viewpoint {
        self.to
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    /// Interpolated viewpoint at `elapsed` since the start. Pure.
    pub fn sample(&self, elapsed: Duration) -> Viewpoint {
        self.from.lerp(&self.to, self.ratio(elapsed))
    }

    /// Viewpoint at the transition's own elapsed time.
    pub fn current(&self) -> Viewpoint {
        self.sample(self.elapsed)
    }

    /// Completed fraction in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.ratio(self.elapsed)
    }

    /// Move the clock forward by `dt` and return the new interpolated viewpoint.
    pub fn advance(&mut self, dt: Duration) -> Viewpoint {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.total);
        self.current()
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.total
    }

    fn ratio(&self, elapsed: Duration) -> f32 {
        if self.total.is_zero() || elapsed >= self.total {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.total.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const D: Duration = Duration::from_millis(600);

    fn a() -> Viewpoint {
        Viewpoint::new(
            Vec3::new(1.39, 0.30, 0.30),
            Vec3::new(0.43, 0.09, 0.09),
            Vec3::Y,
        )
    }

    fn b() -> Viewpoint {
        Viewpoint::new(
            Vec3::new(-0.5426, -0.0179, -0.3014),
            Vec3::new(-0.8025, -0.0982, 0.6609),
            Vec3::new(-0.2580, 21.8948, 1.7567),
        )
    }

    #[test]
    fn full_duration_reaches_destination_exactly() {
        let t = Transition::begin(a(), b(), D);
        assert_eq!(t.sample(D), b());
        assert_eq!(t.sample(D * 3), b());
    }

    #[test]
    fn zero_elapsed_is_source() {
        let t = Transition::begin(a(), b(), D);
        assert_eq!(t.sample(Duration::ZERO), a());
        assert_eq!(t.current(), a());
    }

    #[test]
    fn same_endpoints_stay_put() {
        let t = Transition::begin(a(), a(), D);
        for ms in (0..=600).step_by(50) {
            assert_eq!(t.sample(Duration::from_millis(ms)), a());
        }
    }

    #[test]
    fn same_endpoints_complete_at_once() {
        let mut t = Transition::begin(b(), b(), D);
        assert!(t.is_complete());
        assert_eq!(t.progress(), 1.0);
        assert_eq!(t.current(), b());
        assert_eq!(t.advance(Duration::from_millis(16)), b());
        for us in (0..=600_000).step_by(997) {
            assert_eq!(t.sample(Duration::from_micros(us)), b());
        }
    }

    #[test]
    fn halfway_is_componentwise_mean() {
        let t = Transition::begin(a(), b(), D);
        let mid = t.sample(D / 2);
        let mean_eye = (a().eye + b().eye) / 2.0;
        let mean_target = (a().target + b().target) / 2.0;
        let mean_up = (a().up + b().up) / 2.0;
        assert!((mid.eye - mean_eye).abs().max_element() < 1e-5);
        assert!((mid.target - mean_target).abs().max_element() < 1e-5);
        assert!((mid.up - mean_up).abs().max_element() < 1e-5);
    }

    #[test]
    fn advance_is_tick_rate_independent() {
        let mut coarse = Transition::begin(a(), b(), D);
        coarse.advance(Duration::from_millis(300));

        let mut fine = Transition::begin(a(), b(), D);
        for _ in 0..30 {
            fine.advance(Duration::from_millis(10));
        }

        let (c, f) = (coarse.current(), fine.current());
        assert!((c.eye - f.eye).abs().max_element() < 1e-5);
        assert!((coarse.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn completes_and_clamps_elapsed() {
        let mut t = Transition::begin(a(), b(), D);
        assert!(!t.is_complete());
        let end = t.advance(Duration::from_secs(5));
        assert!(t.is_complete());
        assert_eq!(t.elapsed(), D);
        assert_eq!(end, b());
    }

    #[test]
    fn zero_duration_is_immediately_complete() {
        let t = Transition::begin(a(), b(), Duration::ZERO);
        assert!(t.is_complete());
        assert_eq!(t.current(), b());
    }
}
