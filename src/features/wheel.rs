//! Spinning wheel used to pick a battle at random.
//!
//! Velocity is in radians per frame and decays by a fixed friction each
//! frame; past the planned duration an extra damping factor brings the wheel
//! to a smooth stop. The pointer sits at the top of the wheel.

use std::f64::consts::{
    PI,
    TAU,
};

use rand::Rng;

pub const BATTLES: [&str; 12] = [
    "Battle of Hastings",
    "Battle of Waterloo",
    "Battle of Gettysburg",
    "Battle of Stalingrad",
    "Battle of Thermopylae",
    "Battle of Agincourt",
    "Battle of Midway",
    "Battle of Panipat (First)",
    "Battle of Plassey",
    "Battle of Marathon",
    "Battle of the Somme",
    "Battle of Normandy (D-Day)",
];

pub const MIN_VELOCITY: f64 = 0.25;
pub const MAX_VELOCITY: f64 = 0.45;
pub const MIN_DURATION_SECS: f64 = 3.0;
pub const MAX_DURATION_SECS: f64 = 5.0;
pub const FRICTION: f64 = 0.985;
pub const STOP_DAMPING: f64 = 0.92;
pub const STOP_EPSILON: f64 = 0.002;
pub const POINTER_ANGLE: f64 = 3.0 * PI / 2.0;
pub const LABEL_LIMIT: usize = 18;

/// Shortens long labels to fit their slice: 15 characters plus `...`.
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() <= LABEL_LIMIT {
        return label.to_string();
    }
    let mut short: String = label.chars().take(LABEL_LIMIT - 3).collect();
    short.push_str("...");
    short
}

/// Evenly spaced hue in `[0, 1)` for segment `index`.
pub fn segment_hue(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    index as f32 / count as f32
}

/// Segment under the pointer for a given rotation.
pub fn selected_index(rotation: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let slice = TAU / count as f64;
    let offset = (POINTER_ANGLE - rotation).rem_euclid(TAU);
    ((offset / slice).floor() as usize).min(count - 1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wheel {
    pub segments: Vec<String>,
    pub rotation: f64,
    pub velocity: f64,
    pub started_at: f64,
    pub duration: f64,
    pub spinning: bool,
    pub selected: Option<usize>,
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new(BATTLES.iter().map(|b| b.to_string()).collect())
    }
}

impl Wheel {
    pub fn new(segments: Vec<String>) -> Self {
        Self {
            segments,
            rotation: 0.0,
            velocity: 0.0,
            started_at: 0.0,
            duration: 0.0,
            spinning: false,
            selected: None,
        }
    }

    pub fn slice(&self) -> f64 {
        TAU / self.segments.len().max(1) as f64
    }

    pub fn labels(&self) -> Vec<String> {
        self.segments.iter().map(|s| truncate_label(s)).collect()
    }

    /// Starts a spin at time `now` (seconds). Ignored while already spinning.
    pub fn spin<R: Rng + ?Sized>(&mut self, rng: &mut R, now: f64) -> bool {
        if self.spinning || self.segments.is_empty() {
            return false;
        }
        self.velocity = rng.random_range(MIN_VELOCITY..MAX_VELOCITY);
        self.duration = rng.random_range(MIN_DURATION_SECS..MAX_DURATION_SECS);
        self.started_at = now;
        self.spinning = true;
        self.selected = None;
        log::info!("[Wheel] Spin started at {:.3} rad/frame for {:.2}s", self.velocity, self.duration);
        true
    }

    /// Advances one animation frame. Returns the selected segment on the
    /// frame the wheel comes to rest.
    pub fn step(&mut self, now: f64) -> Option<&str> {
        if !self.spinning {
            return None;
        }

        self.rotation = (self.rotation + self.velocity).rem_euclid(TAU);
        self.velocity *= FRICTION;
        if now - self.started_at > self.duration {
            self.velocity *= STOP_DAMPING;
        }

        if self.velocity.abs() >= STOP_EPSILON {
            return None;
        }

        self.spinning = false;
        self.velocity = 0.0;
        let index = selected_index(self.rotation, self.segments.len());
        self.selected = Some(index);
        log::info!("[Wheel] Landed on {}", self.segments[index]);
        Some(self.segments[index].as_str())
    }
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;

    fn run_to_rest(wheel: &mut Wheel) -> String {
        let mut now = 0.0;
        for _ in 0..100_000 {
            now += 1.0 / 60.0;
            if let Some(label) = wheel.step(now) {
                return label.to_string();
            }
        }
        panic!("Wheel never stopped");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Battle of Midway"), "Battle of Midway");
        assert_eq!(truncate_label("Battle of Normandy (D-Day)"), "Battle of Norma...");
        assert_eq!(truncate_label("Battle of Normandy (D-Day)").chars().count(), LABEL_LIMIT);
    }

    #[test]
    fn test_pointer_segment_for_any_rotation() {
        let count = 12;
        let slice = TAU / count as f64;
        for step in 0..720 {
            let rotation = step as f64 * 0.037 - 3.0 * TAU;
            let index = selected_index(rotation, count);
            // The pointer, measured in the wheel's own frame, falls inside the slice.
            let local = (POINTER_ANGLE - rotation).rem_euclid(TAU);
            assert!(local >= index as f64 * slice - 1e-9);
            assert!(local < (index + 1) as f64 * slice + 1e-9);
        }
    }

    #[test]
    fn test_spin_comes_to_rest_on_pointer_segment() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut wheel = Wheel::default();
        assert!(wheel.spin(&mut rng, 0.0));
        assert!((MIN_VELOCITY..MAX_VELOCITY).contains(&wheel.velocity));
        assert!((MIN_DURATION_SECS..MAX_DURATION_SECS).contains(&wheel.duration));

        let label = run_to_rest(&mut wheel);
        assert!(!wheel.spinning);
        let index = wheel.selected.unwrap();
        assert_eq!(label, wheel.segments[index]);
        assert_eq!(index, selected_index(wheel.rotation, wheel.segments.len()));
    }

    #[test]
    fn test_spin_ignored_while_spinning() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut wheel = Wheel::default();
        assert!(wheel.spin(&mut rng, 0.0));
        let velocity = wheel.velocity;
        assert!(!wheel.spin(&mut rng, 0.1));
        assert_eq!(wheel.velocity, velocity);
    }

    #[test]
    fn test_hues_are_distinct() {
        let hues: Vec<f32> = (0..12).map(|i| segment_hue(i, 12)).collect();
        for (i, a) in hues.iter().enumerate() {
            for b in &hues[i + 1..] {
                assert!((a - b).abs() > f32::EPSILON);
            }
        }
    }
}
