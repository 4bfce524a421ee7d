use glam::Vec2;

use crate::cat::{Cat, CatEvent, CatId, CatSnapshot};

/// Every cat in the play area, in creation order.
pub struct Colony {
    cats: Vec<Cat>,
    area: Vec2,
    next_id: u64,
    /// Creation counter behind the "Cat N" default names.
    created: u64,
}

impl Colony {
    pub fn new(area: Vec2) -> Self {
        Self {
            cats: Vec::new(),
            area,
            next_id: 1,
            created: 0,
        }
    }

    pub fn area(&self) -> Vec2 {
        self.area
    }

    pub fn len(&self) -> usize {
        self.cats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cats.is_empty()
    }

    fn allocate_id(&mut self) -> CatId {
        let id = CatId(self.next_id);
        self.next_id += 1;
        self.created += 1;
        id
    }

    /// Create a cat. A blank name falls back to "Cat N".
    pub fn spawn(&mut self, name: Option<&str>, rng: &mut fastrand::Rng) -> CatId {
        let id = self.allocate_id();
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("Cat {}", self.created),
        };
        let cat = Cat::spawn(id, name, self.area, rng);
        log::info!("Spawned {} ({:?})", cat.name(), id);
        self.cats.push(cat);
        id
    }

    /// Adopt a cat rebuilt from storage. `build` receives the fresh id and
    /// the default name that cat would get if it had none.
    pub fn restore(&mut self, build: impl FnOnce(CatId, String, Vec2) -> Cat) -> CatId {
        let id = self.allocate_id();
        let mut cat = build(id, format!("Cat {}", self.created), self.area);
        cat.confine(self.area);
        self.cats.push(cat);
        id
    }

    /// Drop a cat. Returns it if it was present.
    pub fn remove(&mut self, id: CatId) -> Option<Cat> {
        let idx = self.cats.iter().position(|c| c.id() == id)?;
        let cat = self.cats.remove(idx);
        log::info!("Removed {} ({:?})", cat.name(), id);
        Some(cat)
    }

    pub fn get(&self, id: CatId) -> Option<&Cat> {
        self.cats.iter().find(|c| c.id() == id)
    }

    pub fn get_mut(&mut self, id: CatId) -> Option<&mut Cat> {
        self.cats.iter_mut().find(|c| c.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cat> {
        self.cats.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cat> {
        self.cats.iter_mut()
    }

    pub fn ids(&self) -> Vec<CatId> {
        self.cats.iter().map(Cat::id).collect()
    }

    /// Update one cat. Unknown ids are ignored.
    pub fn update(&mut self, id: CatId, ticks: u32, rng: &mut fastrand::Rng) -> Vec<CatEvent> {
        let area = self.area;
        match self.get_mut(id) {
            Some(cat) => cat.update(ticks, area, rng),
            None => Vec::new(),
        }
    }

    /// Change the play area and pull stragglers back inside.
    pub fn resize(&mut self, area: Vec2) {
        self.area = area;
        for cat in &mut self.cats {
            cat.confine(area);
        }
    }

    pub fn snapshots(&self) -> Vec<CatSnapshot> {
        self.cats.iter().map(Cat::snapshot).collect()
    }

    /// Topmost cat whose `sprite`-sized box, anchored at its position,
    /// contains `point`.
    pub fn hit_test(&self, point: Vec2, sprite: Vec2) -> Option<CatId> {
        self.cats
            .iter()
            .rev()
            .find(|cat| {
                let min = cat.pos();
                let max = min + sprite;
                point.x >= min.x && point.x < max.x && point.y >= min.y && point.y < max.y
            })
            .map(Cat::id)
    }

    /// Id of the cat after `current` in creation order, wrapping around.
    pub fn next_after(&self, current: Option<CatId>) -> Option<CatId> {
        let first = self.cats.first().map(Cat::id);
        let Some(current) = current else {
            return first;
        };
        match self.cats.iter().position(|c| c.id() == current) {
            Some(idx) => self.cats.get(idx + 1).map(Cat::id).or(first),
            None => first,
        }
    }
}
