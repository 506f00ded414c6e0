use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::celebration::Celebration;
use crate::config::{nudge_countdown, Config, ConfigStore};
use crate::cue::CueSink;
use crate::dice::Dice;
use crate::game::{AchievementActivation, Game};
use crate::runtime::SecondPulse;
use crate::session::Phase;
use crate::store::ScoreStore;

/// The game as the front end drives it: every collaborator boxed.
pub type BoxedGame = Game<Box<dyn ScoreStore>, Box<dyn CueSink>, Box<dyn Dice>>;

/// Panel drawn over the current screen. Only one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    None,
    Settings { draft: u32 },
    Achievements(AchievementActivation),
    QuitPrompt,
}

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub game: BoxedGame,
    pub overlay: Overlay,
    pub celebration: Celebration,
    pulse: SecondPulse,
    config: Config,
    config_store: Box<dyn ConfigStore>,
    viewport: (u16, u16),
}

impl App {
    pub fn new(game: BoxedGame, config: Config, config_store: Box<dyn ConfigStore>) -> Self {
        Self {
            game,
            overlay: Overlay::None,
            celebration: Celebration::new(),
            pulse: SecondPulse::default(),
            config,
            config_store,
            viewport: (80, 24),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    /// Advance animations; every tenth frame is one countdown second.
    pub fn on_frame(&mut self) {
        self.celebration.step();
        if !self.pulse.on_frame() {
            return;
        }
        let was_running = self.game.session().is_running();
        self.game.on_tick();
        if was_running && self.game.session().is_over() {
            self.on_game_over();
        }
    }

    fn on_game_over(&mut self) {
        self.overlay = Overlay::None;
        if self.game.session().is_new_record() {
            let (width, height) = self.viewport;
            self.celebration
                .start(width, height, &mut rand::thread_rng());
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match std::mem::replace(&mut self.overlay, Overlay::None) {
            Overlay::None => {}
            Overlay::Settings { draft } => {
                self.on_settings_key(key, draft);
                return Flow::Continue;
            }
            Overlay::Achievements(_) => return Flow::Continue,
            Overlay::QuitPrompt => {
                self.on_quit_prompt_key(key);
                return Flow::Continue;
            }
        }

        match self.game.session().phase() {
            Phase::Idle => self.on_menu_key(key),
            Phase::Running => {
                self.on_typing_key(key);
                Flow::Continue
            }
            Phase::Over => self.on_game_over_key(key),
        }
    }

    fn on_menu_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.start(),
            KeyCode::Char('o') => {
                self.overlay = Overlay::Settings {
                    draft: self.game.countdown_setting(),
                };
            }
            KeyCode::Char('a') => {
                self.overlay = Overlay::Achievements(self.game.open_achievements());
            }
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            _ => {}
        }
        Flow::Continue
    }

    fn on_typing_key(&mut self, key: KeyEvent) {
        let session = self.game.session();
        match key.code {
            KeyCode::Esc => {
                self.game.request_quit();
                self.overlay = Overlay::QuitPrompt;
            }
            KeyCode::Backspace => {
                let mut input = session.input().to_string();
                if input.pop().is_some() {
                    self.game.on_input_changed(&input);
                }
            }
            KeyCode::Char(c) => {
                let mut input = session.input().to_string();
                input.push(c);
                self.game.on_input_changed(&input);
            }
            _ => {}
        }
    }

    fn on_game_over_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => {
                self.celebration.stop();
                self.game.replay_game();
            }
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            _ => {}
        }
        Flow::Continue
    }

    fn on_settings_key(&mut self, key: KeyEvent, draft: u32) {
        let step = |delta| Overlay::Settings {
            draft: nudge_countdown(draft, delta),
        };
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.overlay = step(-1),
            KeyCode::Right | KeyCode::Char('l') => self.overlay = step(1),
            KeyCode::Down | KeyCode::Char('j') => self.overlay = step(-10),
            KeyCode::Up | KeyCode::Char('k') => self.overlay = step(10),
            KeyCode::Enter => self.apply_countdown(draft),
            KeyCode::Esc => {}
            _ => self.overlay = Overlay::Settings { draft },
        }
    }

    fn on_quit_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => self.game.confirm_quit(),
            KeyCode::Char('n') | KeyCode::Esc => self.game.cancel_quit(),
            _ => self.overlay = Overlay::QuitPrompt,
        }
    }

    fn start(&mut self) {
        self.pulse.reset();
        self.celebration.stop();
        self.game.start_game();
    }

    /// Apply a countdown to the next session and remember it.
    pub fn apply_countdown(&mut self, secs: u32) {
        let secs = self.game.set_countdown(secs);
        self.config.countdown_secs = secs;
        if let Err(err) = self.config_store.save(&self.config) {
            tracing::warn!(%err, "failed to save config");
        }
    }

    /// Leave cleanly: a finished session still gets its record folded in.
    pub fn shutdown(&mut self) {
        if self.game.session().is_over() {
            self.game.replay_game();
        }
    }
}
