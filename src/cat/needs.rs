/// Upper bound for every need.
pub const NEED_MAX: f32 = 100.0;
/// Lower bound for every need.
pub const NEED_MIN: f32 = 0.0;

/// Range (ticks) a depletion interval is drawn from at creation.
const INTERVAL_MIN: u32 = 100;
const INTERVAL_MAX: u32 = 300;
/// Range of a single depletion step.
const DEPLETE_MIN: u8 = 1;
const DEPLETE_MAX: u8 = 5;

/// Happiness below this is shown as unhappy.
pub const UNHAPPY_THRESHOLD: f32 = 50.0;

/// Which of the three needs an action or event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeedKind {
    Hunger,
    Thirst,
    Affection,
}

/// One decaying scalar plus its private depletion clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Need {
    level: f32,
    /// Ticks between depletions. Drawn once, never re-rolled.
    interval: u32,
    elapsed: u32,
}

impl Need {
    pub fn new(level: f32, interval: u32) -> Self {
        Self {
            level: clamp_level(level),
            interval: interval.max(1),
            elapsed: 0,
        }
    }

    fn random(rng: &mut fastrand::Rng) -> Self {
        Self::new(NEED_MAX, rng.u32(INTERVAL_MIN..=INTERVAL_MAX))
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn set_level(&mut self, level: f32) {
        self.level = clamp_level(level);
    }

    /// Count one tick. Returns the amount taken when the interval elapses.
    fn tick(&mut self, rng: &mut fastrand::Rng) -> Option<f32> {
        self.elapsed += 1;
        if self.elapsed < self.interval {
            return None;
        }
        self.elapsed = 0;
        let amount = rng.u8(DEPLETE_MIN..=DEPLETE_MAX) as f32;
        self.level = clamp_level(self.level - amount);
        Some(amount)
    }

    fn replenish(&mut self, amount: f32) {
        self.level = clamp_level(self.level + amount);
    }
}

/// Hunger, thirst and affection, each desynchronized by its own interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Needs {
    pub hunger: Need,
    pub thirst: Need,
    pub affection: Need,
}

/// Plain need levels, as handed to renderers and the save file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedLevels {
    pub hunger: f32,
    pub thirst: f32,
    pub affection: f32,
}

impl NeedLevels {
    pub fn happiness(&self) -> f32 {
        (self.hunger + self.thirst + self.affection) / 3.0
    }
}

impl Needs {
    /// Fresh needs: all full, intervals drawn independently.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self {
            hunger: Need::random(rng),
            thirst: Need::random(rng),
            affection: Need::random(rng),
        }
    }

    pub fn get(&self, kind: NeedKind) -> &Need {
        match kind {
            NeedKind::Hunger => &self.hunger,
            NeedKind::Thirst => &self.thirst,
            NeedKind::Affection => &self.affection,
        }
    }

    pub fn get_mut(&mut self, kind: NeedKind) -> &mut Need {
        match kind {
            NeedKind::Hunger => &mut self.hunger,
            NeedKind::Thirst => &mut self.thirst,
            NeedKind::Affection => &mut self.affection,
        }
    }

    /// Advance every depletion clock by one tick, in fixed order.
    pub fn tick(&mut self, rng: &mut fastrand::Rng) {
        self.hunger.tick(rng);
        self.thirst.tick(rng);
        self.affection.tick(rng);
    }

    pub fn replenish(&mut self, kind: NeedKind, amount: f32) {
        self.get_mut(kind).replenish(amount);
    }

    pub fn levels(&self) -> NeedLevels {
        NeedLevels {
            hunger: self.hunger.level,
            thirst: self.thirst.level,
            affection: self.affection.level,
        }
    }

    /// Mean of the three levels, recomputed on every call.
    pub fn happiness(&self) -> f32 {
        self.levels().happiness()
    }
}

fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        return NEED_MAX;
    }
    level.clamp(NEED_MIN, NEED_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depletes_only_when_interval_elapses() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut need = Need::new(100.0, 5);
        for _ in 0..4 {
            assert_eq!(need.tick(&mut rng), None);
        }
        let taken = need.tick(&mut rng).unwrap();
        assert!((1.0..=5.0).contains(&taken));
        assert_eq!(need.level(), 100.0 - taken);
    }

    #[test]
    fn depletion_never_goes_below_zero() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut need = Need::new(2.0, 1);
        for _ in 0..10 {
            need.tick(&mut rng);
        }
        assert_eq!(need.level(), 0.0);
    }

    #[test]
    fn replenish_caps_at_max() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut needs = Needs::random(&mut rng);
        needs.hunger.set_level(90.0);
        needs.replenish(NeedKind::Hunger, 30.0);
        assert_eq!(needs.hunger.level(), 100.0);
        needs.replenish(NeedKind::Hunger, 30.0);
        assert_eq!(needs.hunger.level(), 100.0);
    }

    #[test]
    fn intervals_are_drawn_from_bounded_range() {
        let mut rng = fastrand::Rng::with_seed(99);
        for _ in 0..50 {
            let needs = Needs::random(&mut rng);
            for kind in [NeedKind::Hunger, NeedKind::Thirst, NeedKind::Affection] {
                let interval = needs.get(kind).interval();
                assert!((INTERVAL_MIN..=INTERVAL_MAX).contains(&interval));
                assert_eq!(needs.get(kind).level(), NEED_MAX);
            }
        }
    }

    #[test]
    fn happiness_is_mean_of_current_levels() {
        let mut needs = Needs {
            hunger: Need::new(90.0, 10),
            thirst: Need::new(60.0, 10),
            affection: Need::new(30.0, 10),
        };
        assert_eq!(needs.happiness(), 60.0);
        needs.affection.set_level(0.0);
        assert_eq!(needs.happiness(), 50.0);
    }

    #[test]
    fn loaded_levels_are_clamped() {
        assert_eq!(Need::new(250.0, 10).level(), 100.0);
        assert_eq!(Need::new(-4.0, 10).level(), 0.0);
        assert_eq!(Need::new(f32::NAN, 10).level(), 100.0);
    }
}
