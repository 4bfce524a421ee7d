use crossterm::style::Color;
use glam::Vec2;

use crate::cat::animation::FRAME_COUNT;
use crate::cat::motion::Gait;
use crate::cat::needs::UNHAPPY_THRESHOLD;
use crate::cat::CatSnapshot;

/// Width of every sprite frame, in terminal cells.
pub const SPRITE_COLS: u16 = 7;

/// Right-facing walk cycle. Left-facing frames are mirrored on the fly.
const WALK: [&str; FRAME_COUNT as usize] = [
    "~(=^.^)", "-(=^.^)", "_(=^.^)", "-(=^.^)", "~(=^o^)", "-(=^.^)",
    "_(=-.-)", "-(=^.^)", "~(=^.^)", "-(=^w^)", "_(=^.^)", "-(=^.^)",
];
/// Sitting frames, used while paused.
const SIT: [&str; 2] = ["_(=^.^)", "_(=-.-)"];

/// Maps world coordinates onto the terminal cells used for the play area.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub area: Vec2,
}

impl Viewport {
    pub fn to_cell(&self, pos: Vec2) -> (u16, u16) {
        let cols = self.cols.max(1) as f32;
        let rows = self.rows.max(1) as f32;
        let x = (pos.x / self.area.x * cols).clamp(0.0, cols - 1.0);
        let y = (pos.y / self.area.y * rows).clamp(0.0, rows - 1.0);
        (x as u16, y as u16)
    }

    fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.area.x / self.cols.max(1) as f32,
            self.area.y / self.rows.max(1) as f32,
        )
    }

    /// World point for a click on a cell: just inside its far corner, so
    /// any cat drawn starting in that cell contains it.
    pub fn click_point(&self, col: u16, row: u16) -> Vec2 {
        let cell = self.cell_size();
        Vec2::new(col as f32 + 1.0, row as f32 + 1.0) * cell - cell * 0.001
    }

    /// World-space box covered by one drawn sprite.
    pub fn sprite_size(&self) -> Vec2 {
        self.cell_size() * Vec2::new(SPRITE_COLS as f32, 1.0)
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        col < self.cols && row < self.rows
    }
}

/// One cat, laid out for the terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub col: u16,
    pub row: u16,
    pub glyph: String,
    pub color: Color,
    pub label: String,
    /// Label is dimmed when the cat is unhappy.
    pub unhappy: bool,
}

impl Sprite {
    pub fn from_snapshot(snap: &CatSnapshot, vp: &Viewport) -> Self {
        let (col, row) = vp.to_cell(snap.pos);
        let frame = match snap.gait {
            Gait::Walking => WALK[snap.frame as usize % WALK.len()],
            Gait::Paused => SIT[(snap.frame as usize / 6) % SIT.len()],
        };
        let glyph = if snap.facing_left {
            mirror(frame)
        } else {
            frame.to_string()
        };
        let [r, g, b] = snap.tint.to_rgb();
        Self {
            col,
            row,
            glyph,
            color: Color::Rgb { r, g, b },
            label: snap.name.clone(),
            unhappy: snap.happiness < UNHAPPY_THRESHOLD,
        }
    }
}

fn mirror(frame: &str) -> String {
    frame
        .chars()
        .rev()
        .map(|c| match c {
            '(' => ')',
            ')' => '(',
            other => other,
        })
        .collect()
}
