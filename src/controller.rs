use std::collections::HashMap;
use std::time::Duration;

use glam::Vec2;

use crate::bubble::Bubbles;
use crate::cat::{CatEvent, CatId, CatSnapshot, Interaction};
use crate::colony::Colony;
use crate::config::Settings;
use crate::schedule::{Scheduler, TimerHandle};
use crate::storage::{self, Store};

/// Work the scheduler hands back when a timer comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Tick(CatId),
    Autosave,
}

/// Owns the colony and everything that drives it: per-cat tick timers,
/// feedback bubbles, the random source and the backing store.
///
/// Every user action goes through here and is saved before returning.
pub struct Controller<S: Store> {
    colony: Colony,
    scheduler: Scheduler<Task>,
    tick_timers: HashMap<CatId, TimerHandle>,
    bubbles: Bubbles,
    store: S,
    key: String,
    rng: fastrand::Rng,
    tick_interval: Duration,
}

impl<S: Store> Controller<S> {
    /// Load saved cats from `store` and start their timers at `now`.
    pub fn new(settings: &Settings, store: S, now: Duration) -> Self {
        let mut ctl = Self {
            colony: Colony::new(settings.area()),
            scheduler: Scheduler::new(),
            tick_timers: HashMap::new(),
            bubbles: Bubbles::new(settings.bubble_lifetime()),
            store,
            key: settings.storage_key.clone(),
            rng: settings.rng(),
            tick_interval: settings.tick_interval(),
        };

        let loaded = storage::load(&ctl.store, &ctl.key, &mut ctl.colony, &mut ctl.rng);
        log::info!("Loaded {loaded} cats from {:?}", ctl.key);
        for id in ctl.colony.ids() {
            ctl.start_ticking(id, now);
        }
        ctl.scheduler
            .schedule(Task::Autosave, settings.autosave_interval(), now);
        ctl
    }

    pub fn colony(&self) -> &Colony {
        &self.colony
    }

    pub fn bubbles(&self) -> &Bubbles {
        &self.bubbles
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshots(&self) -> Vec<CatSnapshot> {
        self.colony.snapshots()
    }

    pub fn hit_test(&self, point: Vec2, sprite: Vec2) -> Option<CatId> {
        self.colony.hit_test(point, sprite)
    }

    fn start_ticking(&mut self, id: CatId, now: Duration) {
        let handle = self
            .scheduler
            .schedule(Task::Tick(id), self.tick_interval, now);
        self.tick_timers.insert(id, handle);
    }

    /// Write the whole colony out. Failures are logged, never fatal.
    pub fn save(&mut self) {
        if let Err(e) = storage::save(&mut self.store, &self.key, &self.colony) {
            log::error!("Failed to save cats: {e:#}");
        }
    }

    /// Adopt a new cat. A blank name becomes "Cat N".
    pub fn add_cat(&mut self, name: Option<&str>, now: Duration) -> CatId {
        let id = self.colony.spawn(name, &mut self.rng);
        self.start_ticking(id, now);
        self.save();
        id
    }

    /// Apply `action` to one cat. False if the cat doesn't exist.
    pub fn interact(&mut self, id: CatId, action: Interaction, now: Duration) -> bool {
        let Some(cat) = self.colony.get_mut(id) else {
            return false;
        };
        let msg = cat.interact(action);
        log::debug!("{msg}");
        self.bubbles.show(id, msg, now);
        self.save();
        true
    }

    pub fn feed(&mut self, id: CatId, now: Duration) -> bool {
        self.interact(id, Interaction::Feed, now)
    }

    pub fn give_water(&mut self, id: CatId, now: Duration) -> bool {
        self.interact(id, Interaction::Water, now)
    }

    pub fn pet(&mut self, id: CatId, now: Duration) -> bool {
        self.interact(id, Interaction::Pet, now)
    }

    /// Apply `action` to every cat at once. Returns how many were touched.
    pub fn interact_all(&mut self, action: Interaction, now: Duration) -> usize {
        let mut touched = 0;
        for cat in self.colony.iter_mut() {
            let msg = cat.interact(action);
            self.bubbles.show(cat.id(), msg, now);
            touched += 1;
        }
        if touched > 0 {
            log::debug!("{} cats are {}", touched, action.activity());
            self.save();
        }
        touched
    }

    /// Rename a cat. Blank names and unknown ids are ignored.
    pub fn rename(&mut self, id: CatId, name: &str, now: Duration) -> bool {
        let Some(msg) = self.colony.get_mut(id).and_then(|cat| cat.rename(name)) else {
            return false;
        };
        self.bubbles.show(id, msg, now);
        self.save();
        true
    }

    /// Remove a cat, cancel its timer and drop it from the save.
    pub fn remove(&mut self, id: CatId) -> bool {
        if self.colony.remove(id).is_none() {
            return false;
        }
        if let Some(handle) = self.tick_timers.remove(&id) {
            self.scheduler.cancel(handle);
        }
        self.bubbles.forget(id);
        self.save();
        true
    }

    /// Change the world bounds. The terminal front end keeps the area from
    /// settings and scales the view instead, so only embedders call this.
    pub fn resize(&mut self, area: Vec2) {
        self.colony.resize(area);
    }

    /// Run every timer due at `now` and expire old bubbles.
    /// Returns the number of cat ticks performed.
    pub fn poll(&mut self, now: Duration) -> usize {
        let mut ticks = 0;
        for task in self.scheduler.due(now) {
            match task {
                Task::Tick(id) => {
                    if self.colony.get(id).is_none() {
                        continue;
                    }
                    ticks += 1;
                    for event in self.colony.update(id, 1, &mut self.rng) {
                        match event {
                            CatEvent::Meow => self.bubbles.show(id, "Meow!".to_string(), now),
                        }
                    }
                }
                Task::Autosave => self.save(),
            }
        }
        self.bubbles.update(now);
        ticks
    }
}
