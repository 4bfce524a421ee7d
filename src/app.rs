use std::time::Duration;

use anyhow::Result;
use instant::Instant;

use crate::cat::CatId;
use crate::config::{self, Paths, Settings};
use crate::controller::Controller;
use crate::input::{self, Action, NAME_MAX};
use crate::render::{Footer, Terminal};
use crate::schedule::{Clock, SystemClock};
use crate::storage::FileStore;

/// How often to log frame stats (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    frame_count: u64,
    last_log_time: Instant,
    frame_time_sum: f64,
    frame_time_max: f64,
    frames_since_log: u32,
    ticks_since_log: usize,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_log_time: Instant::now(),
            frame_time_sum: 0.0,
            frame_time_max: 0.0,
            frames_since_log: 0,
            ticks_since_log: 0,
        }
    }

    fn record_frame(&mut self, dt: f64, ticks: usize) {
        self.frame_count += 1;
        self.frames_since_log += 1;
        self.ticks_since_log += ticks;
        self.frame_time_sum += dt;
        self.frame_time_max = self.frame_time_max.max(dt);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= FPS_LOG_INTERVAL {
            let avg_ms = (self.frame_time_sum / self.frames_since_log as f64) * 1000.0;
            let fps = self.frames_since_log as f64 / elapsed;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | max: {:.2}ms | cat ticks: {} | total frames: {}",
                fps,
                avg_ms,
                self.frame_time_max * 1000.0,
                self.ticks_since_log,
                self.frame_count,
            );
            self.last_log_time = Instant::now();
            self.frame_time_sum = 0.0;
            self.frame_time_max = 0.0;
            self.frames_since_log = 0;
            self.ticks_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Text prompt open at the bottom of the screen.
enum Prompt {
    Adopt(String),
    Rename(CatId, String),
}

impl Prompt {
    fn text_mut(&mut self) -> &mut String {
        match self {
            Prompt::Adopt(s) | Prompt::Rename(_, s) => s,
        }
    }

    fn render(&self) -> String {
        match self {
            Prompt::Adopt(s) => format!("New cat's name (blank for default): {s}_"),
            Prompt::Rename(_, s) => format!("Rename to: {s}_   (Enter save, Esc cancel)"),
        }
    }
}

/// Top-level application state.
struct App {
    settings: Settings,
    paths: Paths,
    ctl: Controller<FileStore>,
    clock: SystemClock,
    term: Terminal,
    selected: Option<CatId>,
    prompt: Option<Prompt>,
    notice: String,
    should_quit: bool,
    frame_stats: FrameStats,
}

impl App {
    fn init(paths: Paths) -> Result<Self> {
        let settings = config::load_settings(&paths.settings_path);
        let clock = SystemClock::new();
        let store = FileStore::new(&paths.data_dir);
        let ctl = Controller::new(&settings, store, clock.now());
        let selected = ctl.colony().next_after(None);
        let term = Terminal::begin()?;
        log::info!(
            "Terminal {}x{}, play area {}x{}",
            term.cols,
            term.rows,
            settings.area_width,
            settings.area_height
        );

        Ok(Self {
            settings,
            paths,
            ctl,
            clock,
            term,
            selected,
            prompt: None,
            notice: String::new(),
            should_quit: false,
            frame_stats: FrameStats::new(),
        })
    }

    fn run(&mut self) -> Result<()> {
        let fps = self.settings.fps_cap.clamp(10, 240);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);
        let mut last_frame: Option<Instant> = None;

        while !self.should_quit {
            let frame_start = Instant::now();

            for ev in input::collect_events(frame_dt)? {
                if let Some(action) = input::map_event(ev, self.prompt.is_some()) {
                    self.handle(action);
                }
            }

            let ticks = self.ctl.poll(self.clock.now());
            if self.selected.is_some() && self.selected_cat().is_none() {
                self.selected = self.ctl.colony().next_after(None);
            }

            self.render()?;

            if let Some(last) = last_frame {
                let dt = frame_start.duration_since(last).as_secs_f64();
                self.frame_stats.record_frame(dt, ticks);
            }
            last_frame = Some(frame_start);

            if let Some(left) = frame_dt.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(left);
            }
        }

        self.ctl.save();
        self.term.end()?;
        if let Err(e) = config::save_settings(&self.paths.settings_path, &self.settings) {
            log::warn!("Could not write settings: {e:#}");
        }
        log::info!("Bye");
        Ok(())
    }

    fn handle(&mut self, action: Action) {
        let now = self.clock.now();
        match action {
            Action::Quit => self.should_quit = true,
            Action::Adopt => self.prompt = Some(Prompt::Adopt(String::new())),
            Action::RenameOpen => match self.selected_cat() {
                Some(id) => self.prompt = Some(Prompt::Rename(id, String::new())),
                None => self.notice = "Select a cat first.".to_string(),
            },
            Action::Interact(interaction) => match self.selected_cat() {
                Some(id) => {
                    self.ctl.interact(id, interaction, now);
                }
                None => self.notice = "Select a cat first.".to_string(),
            },
            Action::InteractAll(interaction) => {
                if self.ctl.interact_all(interaction, now) == 0 {
                    self.notice = "No cats to look after.".to_string();
                }
            }
            Action::Remove => {
                if let Some(id) = self.selected_cat() {
                    let next = self.ctl.colony().next_after(Some(id));
                    self.ctl.remove(id);
                    self.selected = next.filter(|n| *n != id);
                }
            }
            Action::SelectNext => self.selected = self.ctl.colony().next_after(self.selected),
            Action::Click { col, row } => {
                let vp = self.term.viewport(self.ctl.colony().area());
                // Sprites are drawn one row below their cell.
                if let Some(row) = row.checked_sub(1).filter(|r| vp.contains(col, *r)) {
                    let point = vp.click_point(col, row);
                    if let Some(id) = self.ctl.hit_test(point, vp.sprite_size()) {
                        self.selected = Some(id);
                    }
                }
            }
            Action::PromptChar(ch) => {
                if let Some(prompt) = &mut self.prompt {
                    let text = prompt.text_mut();
                    if text.chars().count() < NAME_MAX {
                        text.push(ch);
                    }
                }
            }
            Action::PromptBackspace => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.text_mut().pop();
                }
            }
            Action::PromptCancel => self.prompt = None,
            Action::PromptCommit => match self.prompt.take() {
                Some(Prompt::Adopt(name)) => {
                    let id = self.ctl.add_cat(Some(&name), now);
                    self.selected = Some(id);
                    self.notice.clear();
                }
                Some(Prompt::Rename(id, name)) => {
                    if !self.ctl.rename(id, &name, now) {
                        self.notice = "Name unchanged.".to_string();
                    }
                }
                None => {}
            },
            Action::Resize { cols, rows } => self.term.resize(cols, rows),
        }
    }

    fn selected_cat(&self) -> Option<CatId> {
        self.selected
            .filter(|id| self.ctl.colony().get(*id).is_some())
    }

    fn render(&mut self) -> Result<()> {
        let vp = self.term.viewport(self.ctl.colony().area());
        let cats = self.ctl.snapshots();
        let prompt = self.prompt.as_ref().map(Prompt::render);
        let footer = Footer {
            prompt: prompt.as_deref(),
            notice: &self.notice,
        };
        self.term
            .draw(&vp, &cats, self.ctl.bubbles(), self.selected, &footer)
    }
}

/// Entry point: load everything, run until the user quits.
pub fn run(paths: Paths) -> Result<()> {
    let mut app = App::init(paths)?;
    app.run()
}
