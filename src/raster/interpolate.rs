//! Linear interpolation of attribute payloads along edges and spans.

use crate::simd::add_lanes;

/// Running payload that advances by a fixed delta once per raster step.
///
/// Built with the same step count as the walk it rides along (major-axis
/// length for edges, span width for rows), so position and attributes move in
/// lock-step.
#[derive(Debug, Clone)]
pub struct AttributeStepper {
    value: Vec<f32>,
    delta: Vec<f32>,
}

impl AttributeStepper {
    /// Start at `from`, reaching `to` after `steps` calls to `step`.
    /// A zero step count holds `from` constant.
    pub fn new(from: &[f32], to: &[f32], steps: i32) -> Self {
        let value = from.to_vec();
        let delta = if steps > 0 {
            let inv = 1.0 / steps as f32;
            from.iter().zip(to).map(|(a, b)| (b - a) * inv).collect()
        } else {
            vec![0.0; from.len()]
        };
        Self { value, delta }
    }

    /// Current payload
    #[inline]
    pub fn value(&self) -> &[f32] {
        &self.value
    }

    /// Advance one step
    #[inline]
    pub fn step(&mut self) {
        add_lanes(&mut self.value, &self.delta);
    }

    /// Jump ahead `n` steps at once (used when a span starts off-screen)
    pub fn skip(&mut self, n: i32) {
        if n <= 0 {
            return;
        }
        let n = n as f32;
        for (v, d) in self.value.iter_mut().zip(&self.delta) {
            *v += d * n;
        }
    }
}

/// `a + t * (b - a)` per channel, into a fresh payload
pub fn lerp_payload(a: &[f32], b: &[f32], t: f32) -> Vec<f32> {
    a.iter().zip(b).map(|(a, b)| a + t * (b - a)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepper_is_affine() {
        let p1 = [0.0, 1.0, 0.25, 10.0, -4.0];
        let p2 = [1.0, 0.0, 0.75, 30.0, 4.0];
        let steps = 40;
        let mut stepper = AttributeStepper::new(&p1, &p2, steps);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let expected = lerp_payload(&p1, &p2, t);
            for (got, want) in stepper.value().iter().zip(&expected) {
                assert!((got - want).abs() < 1e-4, "step {}: {} vs {}", i, got, want);
            }
            stepper.step();
        }
    }

    #[test]
    fn test_zero_steps_holds_start() {
        let mut stepper = AttributeStepper::new(&[0.5, 0.5], &[1.0, 0.0], 0);
        stepper.step();
        assert_eq!(stepper.value(), &[0.5, 0.5]);
    }

    #[test]
    fn test_skip_matches_repeated_steps() {
        let mut a = AttributeStepper::new(&[0.0, 2.0, 4.0], &[8.0, 2.0, 0.0], 16);
        let mut b = a.clone();
        a.skip(5);
        for _ in 0..5 {
            b.step();
        }
        for (x, y) in a.value().iter().zip(b.value()) {
            assert!((x - y).abs() < 1e-5);
        }
    }
}
