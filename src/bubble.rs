use std::time::Duration;

use crate::cat::CatId;

/// A speech bubble over one cat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub cat: CatId,
    pub text: String,
    pub expires_at: Duration,
}

/// Active bubbles, at most one per cat.
pub struct Bubbles {
    bubbles: Vec<Bubble>,
    lifetime: Duration,
}

impl Bubbles {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            bubbles: Vec::new(),
            lifetime,
        }
    }

    /// Show `text` over `cat` until `now + lifetime`, replacing its old bubble.
    pub fn show(&mut self, cat: CatId, text: String, now: Duration) {
        self.bubbles.retain(|b| b.cat != cat);
        self.bubbles.push(Bubble {
            cat,
            text,
            expires_at: now + self.lifetime,
        });
    }

    /// Drop expired bubbles.
    pub fn update(&mut self, now: Duration) {
        self.bubbles.retain(|b| b.expires_at > now);
    }

    /// Drop the bubble of a cat that no longer exists.
    pub fn forget(&mut self, cat: CatId) {
        self.bubbles.retain(|b| b.cat != cat);
    }

    pub fn get(&self, cat: CatId) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.cat == cat)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bubble> {
        self.bubbles.iter()
    }
}
