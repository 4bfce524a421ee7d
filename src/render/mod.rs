pub mod sprite;

use std::io::{self, Stdout, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};

use crate::bubble::Bubbles;
use crate::cat::{CatId, CatSnapshot};

use self::sprite::{Sprite, Viewport, SPRITE_COLS};

/// Rows reserved under the play area for the status panel.
pub const PANEL_ROWS: u16 = 5;
/// Width of a need bar in cells.
const BAR_WIDTH: usize = 10;

/// Text shown in the bottom panel besides the selected cat.
pub struct Footer<'a> {
    /// Open text prompt, e.g. "Name: Tom_".
    pub prompt: Option<&'a str>,
    pub notice: &'a str,
}

/// Raw-mode alternate screen. Restored on drop.
pub struct Terminal {
    out: Stdout,
    pub cols: u16,
    pub rows: u16,
    active: bool,
}

impl Terminal {
    pub fn begin() -> Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            active: true,
        })
    }

    pub fn end(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.out,
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Cells available to the play area. One row above is kept for
    /// bubbles and one below for name labels.
    pub fn viewport(&self, area: glam::Vec2) -> Viewport {
        Viewport {
            cols: self.cols.saturating_sub(SPRITE_COLS).max(1),
            rows: self.rows.saturating_sub(PANEL_ROWS + 2).max(1),
            area,
        }
    }

    /// Draw one full frame.
    pub fn draw(
        &mut self,
        vp: &Viewport,
        cats: &[CatSnapshot],
        bubbles: &Bubbles,
        selected: Option<CatId>,
        footer: &Footer,
    ) -> Result<()> {
        queue!(self.out, BeginSynchronizedUpdate, Clear(ClearType::All))?;

        for snap in cats {
            let sprite = Sprite::from_snapshot(snap, vp);
            // Sprites sit one row down so bubbles fit above them.
            let row = sprite.row + 1;
            let is_selected = selected == Some(snap.id);

            queue!(
                self.out,
                cursor::MoveTo(sprite.col, row),
                SetForegroundColor(sprite.color),
                Print(&sprite.glyph),
            )?;

            let label = self.clip(sprite.col, &sprite.label);
            if row + 1 < self.rows {
                queue!(self.out, cursor::MoveTo(sprite.col, row + 1))?;
                if sprite.unhappy {
                    queue!(self.out, SetForegroundColor(Color::DarkGrey))?;
                } else {
                    queue!(self.out, SetForegroundColor(Color::White))?;
                }
                if is_selected {
                    queue!(self.out, SetAttribute(Attribute::Reverse))?;
                }
                queue!(self.out, Print(label), SetAttribute(Attribute::Reset))?;
            }

            if let Some(bubble) = bubbles.get(snap.id) {
                let text = format!("\"{}\"", bubble.text);
                let text = self.clip(sprite.col, &text);
                queue!(
                    self.out,
                    cursor::MoveTo(sprite.col, row.saturating_sub(1)),
                    SetForegroundColor(Color::Yellow),
                    Print(text),
                )?;
            }
        }

        self.draw_panel(cats, selected, footer)?;

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        Ok(())
    }

    fn draw_panel(
        &mut self,
        cats: &[CatSnapshot],
        selected: Option<CatId>,
        footer: &Footer,
    ) -> Result<()> {
        let top = self.rows.saturating_sub(PANEL_ROWS);
        let rule = "─".repeat(self.cols as usize);
        queue!(
            self.out,
            cursor::MoveTo(0, top),
            SetForegroundColor(Color::DarkGrey),
            Print(rule),
            SetForegroundColor(Color::White),
        )?;

        let status = match selected.and_then(|id| cats.iter().find(|c| c.id == id)) {
            Some(cat) => format!(
                "{}  happiness {:>3.0}   hunger {}  thirst {}  affection {}",
                cat.name,
                cat.happiness,
                bar(cat.needs.hunger),
                bar(cat.needs.thirst),
                bar(cat.needs.affection),
            ),
            None if cats.is_empty() => "No cats yet. Press 'a' to adopt one.".to_string(),
            None => format!("{} cats. Click one or press Tab to select.", cats.len()),
        };
        let lines = [
            status,
            "a adopt  f feed  s snack  w water  p pet  t play  r rename  x remove".to_string(),
            "F/W/P/A feed, water, pet, play with everyone  Tab next  q quit".to_string(),
            footer
                .prompt
                .map(str::to_string)
                .unwrap_or_else(|| footer.notice.to_string()),
        ];
        for (i, line) in lines.iter().enumerate() {
            let clipped = self.clip(0, line);
            queue!(self.out, cursor::MoveTo(0, top + 1 + i as u16), Print(clipped))?;
        }
        Ok(())
    }

    fn clip<'s>(&self, col: u16, text: &'s str) -> &'s str {
        let room = self.cols.saturating_sub(col) as usize;
        match text.char_indices().nth(room) {
            Some((idx, _)) => &text[..idx],
            None => text,
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.end();
    }
}

fn bar(level: f32) -> String {
    let filled = ((level / 100.0) * BAR_WIDTH as f32).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}
