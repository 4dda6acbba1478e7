//! Animation curves for the 2D sprites

use glam::Vec2;

/// Period scale of the bob animation (ms per radian)
const PULSE_PERIOD_MS: f64 = 100.0;
/// Bob amplitude (pixels)
const PULSE_AMPLITUDE: f32 = 5.0;

/// Vertical bob applied to power-ups and bombs
pub fn pulse_offset(age_ms: f64) -> f32 {
    (age_ms / PULSE_PERIOD_MS).sin() as f32 * PULSE_AMPLITUDE
}

/// Opacity fading linearly from 1 at spawn to 0 at `lifetime_ms`
pub fn fade_alpha(age_ms: f64, lifetime_ms: f64) -> f64 {
    if lifetime_ms <= 0.0 {
        return 0.0;
    }
    (1.0 - age_ms / lifetime_ms).clamp(0.0, 1.0)
}

/// Degrees to radians for the canvas `rotate` call
pub fn rotation_radians(angle_deg: f32) -> f64 {
    (angle_deg as f64).to_radians()
}

/// Convert a pointer position to canvas pixels, given the canvas's on-screen
/// origin
pub fn to_canvas(client: Vec2, origin: Vec2) -> Vec2 {
    client - origin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_alpha() {
        assert_eq!(fade_alpha(0.0, 1000.0), 1.0);
        assert!((fade_alpha(250.0, 1000.0) - 0.75).abs() < 1e-9);
        assert_eq!(fade_alpha(1500.0, 1000.0), 0.0);
        assert_eq!(fade_alpha(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_pulse_bounded() {
        for age in (0..5000).step_by(37) {
            let offset = pulse_offset(age as f64);
            assert!(offset.abs() <= PULSE_AMPLITUDE + 1e-4);
        }
        assert_eq!(pulse_offset(0.0), 0.0);
    }

    #[test]
    fn test_rotation() {
        assert!((rotation_radians(180.0) - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn test_to_canvas() {
        let point = to_canvas(Vec2::new(150.0, 90.0), Vec2::new(100.0, 40.0));
        assert_eq!(point, Vec2::new(50.0, 50.0));
    }
}
