pub mod animation;
pub mod motion;
pub mod needs;
pub mod tint;

use glam::Vec2;

use self::animation::AnimationState;
use self::motion::{Gait, Motion};
use self::needs::{NeedKind, NeedLevels, Needs};
use self::tint::Tint;

/// Per-tick probability of an unprompted meow.
const MEOW_CHANCE: f32 = 0.002;

/// Session-unique cat identifier. Never reused while the program runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatId(pub u64);

/// Something a cat did on its own during an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatEvent {
    Meow,
}

/// User actions that touch a single cat's needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Feed,
    Snack,
    Water,
    Pet,
    Play,
}

impl Interaction {
    pub fn need(self) -> NeedKind {
        match self {
            Self::Feed | Self::Snack => NeedKind::Hunger,
            Self::Water => NeedKind::Thirst,
            Self::Pet | Self::Play => NeedKind::Affection,
        }
    }

    pub fn amount(self) -> f32 {
        match self {
            Self::Feed => 30.0,
            Self::Snack => 10.0,
            Self::Water => 30.0,
            Self::Pet => 20.0,
            Self::Play => 15.0,
        }
    }

    /// Shown in the feedback bubble as "<name> is <activity>!".
    pub fn activity(self) -> &'static str {
        match self {
            Self::Feed => "eating dinner",
            Self::Snack => "eating snacks",
            Self::Water => "drinking water",
            Self::Pet => "being petted",
            Self::Play => "playing with a toy",
        }
    }
}

/// Read-only view of a cat for renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct CatSnapshot {
    pub id: CatId,
    pub name: String,
    pub pos: Vec2,
    pub tint: Tint,
    pub frame: u8,
    pub facing_left: bool,
    pub gait: Gait,
    pub needs: NeedLevels,
    pub happiness: f32,
}

/// One pet: identity, look, wandering state and needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Cat {
    id: CatId,
    name: String,
    tint: Tint,
    pub(crate) motion: Motion,
    pub(crate) anim: AnimationState,
    pub(crate) needs: Needs,
}

impl Cat {
    /// A brand new cat with random tint, position, heading and need clocks.
    pub fn spawn(id: CatId, name: String, area: Vec2, rng: &mut fastrand::Rng) -> Self {
        Self {
            id,
            name,
            tint: Tint::random(rng),
            motion: Motion::random(area, rng),
            anim: AnimationState::default(),
            needs: Needs::random(rng),
        }
    }

    pub fn id(&self) -> CatId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tint(&self) -> Tint {
        self.tint
    }

    pub(crate) fn set_tint(&mut self, tint: Tint) {
        self.tint = tint.normalized();
    }

    pub fn pos(&self) -> Vec2 {
        self.motion.pos
    }

    pub fn frame(&self) -> u8 {
        self.anim.frame()
    }

    pub fn needs(&self) -> &Needs {
        &self.needs
    }

    pub fn happiness(&self) -> f32 {
        self.needs.happiness()
    }

    /// Run `ticks` updates. Needs, then motion, then animation, every tick.
    pub fn update(&mut self, ticks: u32, area: Vec2, rng: &mut fastrand::Rng) -> Vec<CatEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            self.needs.tick(rng);
            self.motion.step(area, rng);
            self.anim.tick();

            if rng.f32() < MEOW_CHANCE {
                events.push(CatEvent::Meow);
            }
        }
        events
    }

    pub fn snapshot(&self) -> CatSnapshot {
        CatSnapshot {
            id: self.id,
            name: self.name.clone(),
            pos: self.motion.pos,
            tint: self.tint,
            frame: self.anim.frame(),
            facing_left: self.motion.facing_left(),
            gait: self.motion.gait(),
            needs: self.needs.levels(),
            happiness: self.needs.happiness(),
        }
    }

    /// Apply an interaction and return the feedback line to show.
    pub fn interact(&mut self, action: Interaction) -> String {
        self.needs.replenish(action.need(), action.amount());
        format!("{} is {}!", self.name, action.activity())
    }

    pub fn feed(&mut self) -> String {
        self.interact(Interaction::Feed)
    }

    pub fn give_water(&mut self) -> String {
        self.interact(Interaction::Water)
    }

    pub fn pet(&mut self) -> String {
        self.interact(Interaction::Pet)
    }

    /// Blank names are ignored. Returns the feedback line when the name changed.
    pub fn rename(&mut self, name: &str) -> Option<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        let old = std::mem::replace(&mut self.name, trimmed.to_string());
        Some(format!("{old} is now called {}!", self.name))
    }

    pub(crate) fn confine(&mut self, area: Vec2) {
        self.motion.confine(area);
    }
}

#[cfg(test)]
mod tests {
    use super::needs::Need;
    use super::*;
    use proptest::prelude::*;

    const AREA: Vec2 = Vec2::new(800.0, 400.0);

    fn tom(rng: &mut fastrand::Rng) -> Cat {
        Cat::spawn(CatId(1), "Tom".to_string(), AREA, rng)
    }

    #[test]
    fn new_cat_has_full_needs() {
        let mut rng = fastrand::Rng::with_seed(1);
        let cat = tom(&mut rng);
        let levels = cat.snapshot().needs;
        assert_eq!(levels.hunger, 100.0);
        assert_eq!(levels.thirst, 100.0);
        assert_eq!(levels.affection, 100.0);
        assert_eq!(cat.happiness(), 100.0);
    }

    #[test]
    fn first_elapsed_interval_only_touches_its_need() {
        let mut rng = fastrand::Rng::with_seed(9);
        let mut cat = tom(&mut rng);
        cat.needs = Needs {
            hunger: Need::new(100.0, 150),
            thirst: Need::new(100.0, 120),
            affection: Need::new(100.0, 200),
        };

        cat.update(119, AREA, &mut rng);
        assert_eq!(cat.needs.levels().thirst, 100.0);

        cat.update(1, AREA, &mut rng);
        let levels = cat.needs.levels();
        assert!((95.0..=99.0).contains(&levels.thirst));
        assert_eq!(levels.hunger, 100.0);
        assert_eq!(levels.affection, 100.0);
    }

    #[test]
    fn feeding_caps_hunger() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut cat = tom(&mut rng);
        cat.needs.hunger.set_level(90.0);
        let msg = cat.feed();
        assert_eq!(cat.needs.levels().hunger, 100.0);
        assert_eq!(msg, "Tom is eating dinner!");

        cat.feed();
        assert_eq!(cat.needs.levels().hunger, 100.0);
    }

    #[test]
    fn water_and_pet_hit_their_needs() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut cat = tom(&mut rng);
        cat.needs.thirst.set_level(10.0);
        cat.needs.affection.set_level(10.0);
        cat.give_water();
        cat.pet();
        assert_eq!(cat.needs.levels().thirst, 40.0);
        assert_eq!(cat.needs.levels().affection, 30.0);
    }

    #[test]
    fn blank_rename_is_ignored() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut cat = tom(&mut rng);
        assert_eq!(cat.rename("   "), None);
        assert_eq!(cat.name(), "Tom");
        assert_eq!(
            cat.rename(" Felix ").as_deref(),
            Some("Tom is now called Felix!")
        );
        assert_eq!(cat.name(), "Felix");
    }

    #[test]
    fn snapshot_has_no_side_effects() {
        let mut rng = fastrand::Rng::with_seed(4);
        let cat = tom(&mut rng);
        let before = cat.clone();
        let _ = cat.snapshot();
        let _ = cat.snapshot();
        assert_eq!(cat, before);
    }

    #[test]
    fn frame_advances_with_updates() {
        let mut rng = fastrand::Rng::with_seed(4);
        let mut cat = tom(&mut rng);
        cat.update(animation::TICKS_PER_FRAME as u32 * 3, AREA, &mut rng);
        assert_eq!(cat.frame(), 3);
    }

    #[test]
    fn cats_meow_now_and_then() {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut cat = tom(&mut rng);
        let events = cat.update(5000, AREA, &mut rng);
        assert!(events.contains(&CatEvent::Meow));
        assert!(events.len() < 100);
    }

    proptest! {
        #[test]
        fn needs_stay_in_bounds(seed in any::<u64>(), batches in prop::collection::vec(0u32..400, 1..20)) {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut cat = tom(&mut rng);
            for ticks in batches {
                cat.update(ticks, AREA, &mut rng);
                let snap = cat.snapshot();
                for level in [snap.needs.hunger, snap.needs.thirst, snap.needs.affection] {
                    prop_assert!((0.0..=100.0).contains(&level));
                }
                let mean = (snap.needs.hunger + snap.needs.thirst + snap.needs.affection) / 3.0;
                prop_assert_eq!(snap.happiness, mean);
                prop_assert!((snap.frame as u32) < animation::FRAME_COUNT as u32);
            }
        }
    }
}
