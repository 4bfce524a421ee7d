use glam::Vec2;

/// Per-axis walk speed range, world units per tick.
const WALK_SPEED_MIN: f32 = 0.8;
const WALK_SPEED_MAX: f32 = 3.0;
/// Per-tick probability a walking cat sits down.
const PAUSE_CHANCE: f32 = 0.01;
/// Pause length range, in ticks.
const PAUSE_MIN: u32 = 20;
const PAUSE_MAX: u32 = 80;

/// Walking ⇄ Paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gait {
    Walking,
    Paused,
}

/// Position, velocity and pause countdown of one cat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left before wandering resumes. Zero means walking.
    pub still_ticks: u32,
}

impl Motion {
    /// Random spot inside `area` with a random heading.
    pub fn random(area: Vec2, rng: &mut fastrand::Rng) -> Self {
        let mut motion = Self {
            pos: Vec2::new(rng.f32() * area.x, rng.f32() * area.y),
            vel: random_velocity(rng),
            still_ticks: 0,
        };
        motion.confine(area);
        motion
    }

    pub fn gait(&self) -> Gait {
        if self.still_ticks == 0 {
            Gait::Walking
        } else {
            Gait::Paused
        }
    }

    /// Negative x velocity means the sprite is mirrored.
    pub fn facing_left(&self) -> bool {
        self.vel.x < 0.0
    }

    /// One tick of wandering inside `[0, area.x) × [0, area.y)`.
    pub fn step(&mut self, area: Vec2, rng: &mut fastrand::Rng) {
        if self.still_ticks > 0 {
            self.still_ticks -= 1;
            if self.still_ticks == 0 {
                self.vel = random_velocity(rng);
            }
            return;
        }

        let next = self.pos + self.vel;
        if next.x < 0.0 || next.x >= area.x {
            self.vel.x = -self.vel.x;
        } else {
            self.pos.x = next.x;
        }
        if next.y < 0.0 || next.y >= area.y {
            self.vel.y = -self.vel.y;
        } else {
            self.pos.y = next.y;
        }

        if rng.f32() < PAUSE_CHANCE {
            self.still_ticks = rng.u32(PAUSE_MIN..=PAUSE_MAX);
        }
    }

    /// Pull the position back inside a (possibly smaller) area.
    pub fn confine(&mut self, area: Vec2) {
        self.pos.x = confine_axis(self.pos.x, area.x);
        self.pos.y = confine_axis(self.pos.y, area.y);
    }
}

fn confine_axis(value: f32, size: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    // Largest float strictly below `size`.
    let upper = (size - size.abs() * f32::EPSILON).max(0.0);
    value.clamp(0.0, upper)
}

fn random_velocity(rng: &mut fastrand::Rng) -> Vec2 {
    let mut axis = || {
        let speed = WALK_SPEED_MIN + rng.f32() * (WALK_SPEED_MAX - WALK_SPEED_MIN);
        if rng.bool() {
            speed
        } else {
            -speed
        }
    };
    let x = axis();
    let y = axis();
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const AREA: Vec2 = Vec2::new(800.0, 400.0);

    #[test]
    fn reflects_at_right_edge() {
        let mut rng = fastrand::Rng::with_seed(5);
        let mut motion = Motion {
            pos: Vec2::new(AREA.x - 0.01, 200.0),
            vel: Vec2::new(2.0, 0.0),
            still_ticks: 0,
        };
        motion.step(AREA, &mut rng);
        assert!(motion.vel.x < 0.0);
        assert!(motion.pos.x < AREA.x);
    }

    #[test]
    fn reflects_at_top_edge() {
        let mut rng = fastrand::Rng::with_seed(5);
        let mut motion = Motion {
            pos: Vec2::new(100.0, 0.5),
            vel: Vec2::new(1.0, -2.0),
            still_ticks: 0,
        };
        motion.step(AREA, &mut rng);
        assert!(motion.vel.y > 0.0);
        assert_eq!(motion.pos.y, 0.5);
        assert_eq!(motion.pos.x, 101.0);
    }

    #[test]
    fn paused_cat_counts_down_without_moving() {
        let mut rng = fastrand::Rng::with_seed(11);
        let start = Vec2::new(300.0, 100.0);
        let mut motion = Motion {
            pos: start,
            vel: Vec2::new(1.5, 1.5),
            still_ticks: 3,
        };
        motion.step(AREA, &mut rng);
        motion.step(AREA, &mut rng);
        assert_eq!(motion.gait(), Gait::Paused);
        assert_eq!(motion.pos, start);
        motion.step(AREA, &mut rng);
        assert_eq!(motion.gait(), Gait::Walking);
        assert_eq!(motion.pos, start);
    }

    #[test]
    fn eventually_pauses() {
        let mut rng = fastrand::Rng::with_seed(2024);
        let mut motion = Motion::random(AREA, &mut rng);
        let paused = (0..5000).any(|_| {
            motion.step(AREA, &mut rng);
            motion.gait() == Gait::Paused
        });
        assert!(paused);
    }

    #[test]
    fn confine_pulls_back_inside_shrunk_area() {
        let mut motion = Motion {
            pos: Vec2::new(750.0, 390.0),
            vel: Vec2::ZERO,
            still_ticks: 0,
        };
        motion.confine(Vec2::new(400.0, 200.0));
        assert!(motion.pos.x < 400.0);
        assert!(motion.pos.y < 200.0);
    }

    proptest! {
        #[test]
        fn stays_inside_area(seed in any::<u64>(), ticks in 1usize..2000) {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut motion = Motion::random(AREA, &mut rng);
            for _ in 0..ticks {
                motion.step(AREA, &mut rng);
                prop_assert!(motion.pos.x >= 0.0 && motion.pos.x < AREA.x);
                prop_assert!(motion.pos.y >= 0.0 && motion.pos.y < AREA.y);
            }
        }
    }
}
