//! Application state: one game, one input handler, and the colon-command
//! interpreter that ties them together.

use std::fs;

use crossterm::event::KeyEvent;

use crate::game::Game;
use crate::input::{Action, Handler};
use crate::score::{count_score, ScoringMethod};
use crate::settings::{self, Settings};
use crate::sgf;

/// What the caller's event loop should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    Quit,
}

/// One interactive session: a game, the modal input handler driving it,
/// and transient view state. The presentation layer reads this struct
/// and never mutates it.
pub struct App {
    pub game: Game,
    pub handler: Handler,
    pub settings: Settings,
    pub error: Option<String>,
    pub score_text: Option<String>,
    pub show_help: bool,
}

impl App {
    pub fn new(size: i32, settings: Settings) -> Self {
        Self {
            game: Game::new(size),
            handler: Handler::new(size),
            settings,
            error: None,
            score_text: None,
            show_help: false,
        }
    }

    /// Feed one key event through the modal handler and apply the
    /// resulting intent, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Signal {
        match self.handler.handle_key(key) {
            Some(action) => self.apply(action),
            None => Signal::Continue,
        }
    }

    fn apply(&mut self, action: Action) -> Signal {
        match action {
            Action::PlaceStone => {
                self.error = self
                    .game
                    .play(self.handler.cursor_x, self.handler.cursor_y)
                    .err()
                    .map(|e| e.to_string());
                Signal::Continue
            }
            Action::Undo { count } => {
                self.error = None;
                for _ in 0..count {
                    if let Err(e) = self.game.undo() {
                        self.error = Some(e.to_string());
                        break;
                    }
                }
                Signal::Continue
            }
            Action::Command(cmd) => self.run_command(&cmd),
            Action::CursorMoved | Action::ModeChanged(_) => Signal::Continue,
        }
    }

    /// Execute a colon command.
    pub fn run_command(&mut self, cmd: &str) -> Signal {
        self.error = None;
        let parts: Vec<&str> = cmd.split_whitespace().collect();
        let Some(&name) = parts.first() else {
            return Signal::Continue;
        };

        match name {
            "q" | "quit" => {
                if self.show_help {
                    self.show_help = false;
                    Signal::Continue
                } else {
                    Signal::Quit
                }
            }
            "w" | "write" => {
                let filename = parts.get(1).copied().unwrap_or("game.sgf");
                if let Err(e) = self.save_sgf(filename) {
                    self.error = Some(e.to_string());
                }
                Signal::Continue
            }
            "e" | "edit" => {
                let filename = parts.get(1).copied().unwrap_or("game.sgf");
                if let Err(e) = self.load_sgf(filename) {
                    self.error = Some(e);
                }
                Signal::Continue
            }
            "undo" => {
                if let Err(e) = self.game.undo() {
                    self.error = Some(e.to_string());
                }
                Signal::Continue
            }
            "pass" => {
                // Passing is a command-layer decision; the engine has no
                // pass state. Record it and hand the turn over.
                let player = self.game.current_player;
                self.game.moves.push(sgf::encode_move(player, None));
                self.game.current_player = player.opposite();
                Signal::Continue
            }
            "c" | "coords" | "coordinates" => {
                self.settings.show_coords = !self.settings.show_coords;
                settings::save(&self.settings).ok();
                Signal::Continue
            }
            "score" => {
                let method = parts
                    .get(1)
                    .map(|raw| ScoringMethod::parse(raw))
                    .unwrap_or(self.settings.scoring_method);
                let score = count_score(
                    &self.game.board,
                    method,
                    self.game.black_captures,
                    self.game.white_captures,
                    self.settings.komi,
                );
                self.score_text =
                    Some(format!("[W {:.1} B {:.1}]", score.white, score.black));
                Signal::Continue
            }
            "komi" => {
                match parts.get(1).and_then(|v| v.parse::<f64>().ok()) {
                    Some(komi) => {
                        self.settings.komi = komi;
                        settings::save(&self.settings).ok();
                    }
                    None => self.error = Some("usage: komi <value>".to_string()),
                }
                Signal::Continue
            }
            "method" => {
                match parts.get(1) {
                    Some(raw) => {
                        self.settings.scoring_method = ScoringMethod::parse(raw);
                        settings::save(&self.settings).ok();
                    }
                    None => {
                        self.error = Some("usage: method <chinese|japanese>".to_string())
                    }
                }
                Signal::Continue
            }
            "?" | "help" => {
                self.show_help = true;
                Signal::Continue
            }
            other => {
                self.error = Some(format!("unknown command: {}", other));
                Signal::Continue
            }
        }
    }

    fn save_sgf(&self, filename: &str) -> std::io::Result<()> {
        let content = sgf::write_sgf(self.game.board.size(), &self.game.moves);
        fs::write(filename, content)
    }

    /// Load and replay a transcript. On success the current game is
    /// replaced wholesale and the cursor resets to the loaded size; on
    /// failure the running game is left as it was.
    fn load_sgf(&mut self, filename: &str) -> Result<(), String> {
        let content = fs::read_to_string(filename).map_err(|e| e.to_string())?;
        let (size, moves) = sgf::parse_sgf(&content);
        let game = sgf::replay(size, &moves).map_err(|e| e.to_string())?;
        self.handler.reset(game.board.size());
        self.game = game;
        Ok(())
    }
}
