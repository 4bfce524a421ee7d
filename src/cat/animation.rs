/// Number of frames in the walk cycle sprite sheet.
pub const FRAME_COUNT: u8 = 12;
/// Updates between frame advances.
pub const TICKS_PER_FRAME: u8 = 10;

/// Sprite animation cursor for a cat.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnimationState {
    frame: u8,
    elapsed: u8,
}

impl AnimationState {
    /// Restore a saved frame index. Out-of-range values wrap into the cycle.
    pub fn at_frame(frame: u32) -> Self {
        Self {
            frame: (frame % FRAME_COUNT as u32) as u8,
            elapsed: 0,
        }
    }

    pub fn frame(&self) -> u8 {
        self.frame
    }

    /// Count one update; every `TICKS_PER_FRAME`th call moves to the next frame.
    pub fn tick(&mut self) {
        self.elapsed += 1;
        if self.elapsed >= TICKS_PER_FRAME {
            self.elapsed = 0;
            self.frame = (self.frame + 1) % FRAME_COUNT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_every_tenth_tick() {
        let mut anim = AnimationState::default();
        for _ in 0..9 {
            anim.tick();
        }
        assert_eq!(anim.frame(), 0);
        anim.tick();
        assert_eq!(anim.frame(), 1);
    }

    #[test]
    fn wraps_around_cycle() {
        let mut anim = AnimationState::at_frame(11);
        for _ in 0..TICKS_PER_FRAME {
            anim.tick();
        }
        assert_eq!(anim.frame(), 0);
    }

    #[test]
    fn restored_frame_is_always_valid() {
        assert_eq!(AnimationState::at_frame(25).frame(), 1);
    }
}
