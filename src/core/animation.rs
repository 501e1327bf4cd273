//! Header prominence animation.
//!
//! The host feeds a target (`0.0` hidden, `1.0` shown) every time the scroll
//! position changes and advances the animation by the elapsed frame time.
//! The renderer only ever reads [`Prominence::current`].

use std::time::Duration;

/// Default tween length for a full 0 → 1 (or 1 → 0) transition.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);

/// Values closer than this to a bound count as settled at that bound.
const SETTLE_EPSILON: f32 = 1e-3;

// ───────────────────────────────────────── easing ────────────

/// Easing curve mapping linear progress `[0, 1]` onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Cubic ease-in-out: slow start, fast middle, slow finish.
    #[default]
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }

    /// Name used in the config file.
    pub fn config_name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseInOut => "ease-in-out",
        }
    }

    pub fn from_config_name(s: &str) -> Option<Self> {
        match s {
            "linear" => Some(Easing::Linear),
            "ease-in-out" => Some(Easing::EaseInOut),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── phase ─────────────

/// Which way a transition is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Showing,
    Hiding,
}

/// Coarse header state derived from the animated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPhase {
    Expanded,
    Collapsed,
    Transitioning(Direction),
}

// ───────────────────────────────────────── trait ─────────────

/// A continuously sampled header prominence in `[0, 1]`.
pub trait Prominence {
    /// Point the animation at `target` (clamped to `[0, 1]`).  Re-setting the
    /// current target is a no-op; a different target supersedes any
    /// in-flight transition.
    fn set_target(&mut self, target: f32);

    /// Move the animation forward by `elapsed` wall time.
    fn advance(&mut self, elapsed: Duration);

    fn current(&self) -> f32;

    fn target(&self) -> f32;

    /// `true` while `current` has not yet reached `target`.
    fn is_animating(&self) -> bool {
        (self.current() - self.target()).abs() > f32::EPSILON
    }

    fn phase(&self) -> HeaderPhase {
        let current = self.current();
        if self.is_animating() {
            if self.target() > current {
                HeaderPhase::Transitioning(Direction::Showing)
            } else {
                HeaderPhase::Transitioning(Direction::Hiding)
            }
        } else if current >= 1.0 - SETTLE_EPSILON {
            HeaderPhase::Expanded
        } else {
            HeaderPhase::Collapsed
        }
    }
}

// ───────────────────────────────────────── animated ──────────

#[derive(Debug, Clone)]
struct Tween {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
}

impl Tween {
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Eased tween toward the most recently requested target.
///
/// A transition covering only part of the range (e.g. reversing halfway)
/// gets the matching fraction of the full duration, so every transition
/// settles within `duration` of its last target change.
#[derive(Debug, Clone)]
pub struct AnimatedProminence {
    current: f32,
    target: f32,
    duration: Duration,
    easing: Easing,
    tween: Option<Tween>,
}

impl Default for AnimatedProminence {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl AnimatedProminence {
    /// Starts fully shown, matching a list that opens at its origin.
    pub fn new(duration: Duration) -> Self {
        Self {
            current: 1.0,
            target: 1.0,
            duration,
            easing: Easing::default(),
            tween: None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl Prominence for AnimatedProminence {
    fn set_target(&mut self, target: f32) {
        let target = target.clamp(0.0, 1.0);
        if target == self.target {
            return;
        }
        self.target = target;

        let span = (target - self.current).abs();
        if span <= f32::EPSILON {
            self.current = target;
            self.tween = None;
            return;
        }
        self.tween = Some(Tween {
            from: self.current,
            to: target,
            elapsed: Duration::ZERO,
            duration: self.duration.mul_f32(span),
        });
    }

    fn advance(&mut self, elapsed: Duration) {
        let Some(tween) = self.tween.as_mut() else {
            return;
        };
        tween.elapsed += elapsed;
        let p = tween.progress();
        if p >= 1.0 {
            self.current = tween.to;
            self.tween = None;
        } else {
            self.current = tween.from + (tween.to - tween.from) * self.easing.apply(p);
        }
    }

    fn current(&self) -> f32 {
        self.current
    }

    fn target(&self) -> f32 {
        self.target
    }
}

// ───────────────────────────────────────── static ────────────

/// Non-animated variant: decorations are always fully shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticProminence;

impl Prominence for StaticProminence {
    fn set_target(&mut self, _target: f32) {}

    fn advance(&mut self, _elapsed: Duration) {}

    fn current(&self) -> f32 {
        1.0
    }

    fn target(&self) -> f32 {
        1.0
    }
}

impl<P: Prominence + ?Sized> Prominence for Box<P> {
    fn set_target(&mut self, target: f32) {
        (**self).set_target(target)
    }

    fn advance(&mut self, elapsed: Duration) {
        (**self).advance(elapsed)
    }

    fn current(&self) -> f32 {
        (**self).current()
    }

    fn target(&self) -> f32 {
        (**self).target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn settle(anim: &mut impl Prominence) {
        for _ in 0..200 {
            anim.advance(FRAME);
        }
    }

    #[test]
    fn easing_boundaries_and_monotonic() {
        for easing in [Easing::Linear, Easing::EaseInOut] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
            let mut prev = easing.apply(0.0);
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v > prev, "{easing:?} not strictly increasing at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn linear_easing_moves_evenly() {
        let mut anim = AnimatedProminence::new(Duration::from_millis(200)).with_easing(Easing::Linear);
        anim.set_target(0.0);
        anim.advance(Duration::from_millis(50));
        assert!((anim.current() - 0.75).abs() < 1e-4);
    }

    #[test]
    fn starts_expanded() {
        let anim = AnimatedProminence::default();
        assert_eq!(anim.current(), 1.0);
        assert_eq!(anim.phase(), HeaderPhase::Expanded);
        assert!(!anim.is_animating());
    }

    #[test]
    fn converges_monotonically_within_duration() {
        let mut anim = AnimatedProminence::new(Duration::from_millis(240));
        anim.set_target(0.0);

        let mut prev = anim.current();
        let mut elapsed = Duration::ZERO;
        while anim.is_animating() {
            anim.advance(FRAME);
            elapsed += FRAME;
            assert!(anim.current() < prev, "not strictly decreasing at {elapsed:?}");
            prev = anim.current();
            assert!(elapsed <= Duration::from_millis(240) + FRAME);
        }
        assert_eq!(anim.current(), 0.0);
        assert_eq!(anim.phase(), HeaderPhase::Collapsed);
    }

    #[test]
    fn repeated_target_does_not_restart() {
        let mut anim = AnimatedProminence::new(Duration::from_millis(200));
        anim.set_target(0.0);
        anim.advance(Duration::from_millis(100));
        anim.set_target(1.0);
        anim.advance(Duration::from_millis(30));
        let mid = anim.current();

        anim.set_target(1.0);
        anim.advance(Duration::ZERO);
        assert_eq!(anim.current(), mid);

        anim.advance(FRAME);
        assert!(anim.current() > mid);
    }

    #[test]
    fn rapid_flips_resolve_to_latest_target() {
        let mut anim = AnimatedProminence::new(Duration::from_millis(200));
        anim.set_target(0.0);
        anim.advance(FRAME);
        anim.set_target(1.0);
        anim.advance(FRAME);
        anim.set_target(0.0);
        anim.advance(FRAME);
        anim.set_target(1.0);

        assert_eq!(anim.target(), 1.0);
        assert_eq!(
            anim.phase(),
            HeaderPhase::Transitioning(Direction::Showing)
        );
        let mut prev = anim.current();
        for _ in 0..50 {
            anim.advance(FRAME);
            assert!(anim.current() >= prev, "moved away from the latest target");
            prev = anim.current();
        }
        assert_eq!(anim.current(), 1.0);
        assert_eq!(anim.phase(), HeaderPhase::Expanded);
    }

    #[test]
    fn reversal_takes_partial_duration() {
        let mut anim = AnimatedProminence::new(Duration::from_millis(200));
        anim.set_target(0.0);
        anim.advance(Duration::from_millis(100));
        anim.set_target(1.0);
        // Covering at most the full range never needs more than the full duration.
        anim.advance(Duration::from_millis(200));
        assert_eq!(anim.current(), 1.0);
        assert!(!anim.is_animating());
    }

    #[test]
    fn hiding_phase_reports_direction() {
        let mut anim = AnimatedProminence::default();
        anim.set_target(0.0);
        anim.advance(FRAME);
        assert_eq!(anim.phase(), HeaderPhase::Transitioning(Direction::Hiding));
    }

    #[test]
    fn static_variant_is_always_shown() {
        let mut anim = StaticProminence;
        anim.set_target(0.0);
        anim.advance(Duration::from_secs(1));
        assert_eq!(anim.current(), 1.0);
        assert_eq!(anim.phase(), HeaderPhase::Expanded);
    }

    #[test]
    fn boxed_prominence_delegates() {
        let mut anim: Box<dyn Prominence> = Box::new(AnimatedProminence::default());
        anim.set_target(0.0);
        settle(&mut anim);
        assert_eq!(anim.current(), 0.0);
    }
}
