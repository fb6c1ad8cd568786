use std::f32::consts::PI;

/// Named easing curves, matching the names used in slider options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    Swing,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineIn,
    SineOut,
    SineInOut,
}

impl Easing {
    pub fn from_name(name: &str) -> Option<Self> {
        let easing = match name {
            "linear" => Easing::Linear,
            "swing" => Easing::Swing,
            "easeInQuad" => Easing::QuadIn,
            "easeOutQuad" => Easing::QuadOut,
            "easeInOutQuad" => Easing::QuadInOut,
            "easeInCubic" => Easing::CubicIn,
            "easeOutCubic" => Easing::CubicOut,
            "easeInOutCubic" => Easing::CubicInOut,
            "easeInSine" => Easing::SineIn,
            "easeOutSine" => Easing::SineOut,
            "easeInOutSine" => Easing::SineInOut,
            _ => return None,
        };
        Some(easing)
    }

    /// Maps linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Swing => 0.5 - (t * PI).cos() / 2.0,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 { 2.0 * t * t } else { 1.0 - (-2.0 * t + 2.0).powi(2) / 2.0 }
            }
            Easing::CubicIn => t.powi(3),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 { 4.0 * t.powi(3) } else { 1.0 - (-2.0 * t + 2.0).powi(3) / 2.0 }
            }
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

/// Interpolates a single value over a fixed duration, advanced frame by frame.
#[derive(Debug, Clone)]
pub struct Tween {
    easing: Easing,
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

impl Tween {
    pub fn new(easing: Easing, from: f32, to: f32, duration: f32) -> Self {
        Self { easing, from, to, duration: duration.max(0.0), elapsed: 0.0 }
    }

    /// Advances by `dt` seconds and returns the current value.
    pub fn apply(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> f32 {
        let t = if self.duration > 0.0 { self.elapsed / self.duration } else { 1.0 };
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_hit_endpoints() {
        for name in ["linear", "swing", "easeInQuad", "easeOutCubic", "easeInOutSine"] {
            let easing = Easing::from_name(name).unwrap();
            assert!(easing.apply(0.0).abs() < 1e-6, "{name} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{name} at 1");
        }
        assert_eq!(Easing::from_name("bounce"), None);
    }

    #[test]
    fn test_tween_reaches_target() {
        let mut tween = Tween::new(Easing::Linear, 0.0, -100.0, 0.5);
        assert_eq!(tween.apply(0.25), -50.0);
        assert!(!tween.finished());
        assert_eq!(tween.apply(1.0), -100.0);
        assert!(tween.finished());
    }

    #[test]
    fn test_zero_duration_is_finished() {
        let tween = Tween::new(Easing::Swing, 1.0, 2.0, 0.0);
        assert!(tween.finished());
        assert_eq!(tween.value(), 2.0);
    }
}
