//! Modal (vim-style) input: translates keystrokes into board intents.
//!
//! The handler owns cursor position, mode, a pending repeat count, and
//! the command-line buffer. It never touches the game engine.

use crossterm::event::{KeyCode, KeyEvent};

/// Input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
        }
    }
}

/// Intent derived from a keypress: the fixed set the application layer
/// understands. No keyboard concepts leak past this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CursorMoved,
    PlaceStone,
    Undo { count: i32 },
    ModeChanged(Mode),
    Command(String),
}

/// Keystroke state machine.
#[derive(Debug, Clone)]
pub struct Handler {
    pub mode: Mode,
    pub cursor_x: i32,
    pub cursor_y: i32,
    pub command_buffer: String,
    board_size: i32,
    pending_count: String,
}

impl Handler {
    pub fn new(board_size: i32) -> Self {
        Self {
            mode: Mode::Normal,
            cursor_x: board_size / 2,
            cursor_y: board_size / 2,
            command_buffer: String::new(),
            board_size,
            pending_count: String::new(),
        }
    }

    /// Replace all handler state, re-centering on a (possibly new)
    /// board size. Used after a transcript load.
    pub fn reset(&mut self, board_size: i32) {
        *self = Handler::new(board_size);
    }

    /// Feed one key event; returns the resulting intent, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        match self.mode {
            Mode::Normal => self.handle_normal(key.code),
            Mode::Insert => self.handle_insert(key.code),
            Mode::Command => self.handle_command(key.code),
        }
    }

    fn handle_normal(&mut self, code: KeyCode) -> Option<Action> {
        // Digits accumulate a vim-style repeat count.
        if let KeyCode::Char(c) = code {
            if c.is_ascii_digit() {
                self.pending_count.push(c);
                return None;
            }
        }

        let count = self.take_count();
        match code {
            KeyCode::Char('h') | KeyCode::Left => {
                self.cursor_x = (self.cursor_x - count).max(0);
                Some(Action::CursorMoved)
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.cursor_x = (self.cursor_x + count).min(self.board_size - 1);
                Some(Action::CursorMoved)
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.cursor_y = (self.cursor_y + count).min(self.board_size - 1);
                Some(Action::CursorMoved)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor_y = (self.cursor_y - count).max(0);
                Some(Action::CursorMoved)
            }
            KeyCode::Char('x') => Some(Action::PlaceStone),
            KeyCode::Char('u') => Some(Action::Undo { count }),
            KeyCode::Char('i') => {
                self.mode = Mode::Insert;
                Some(Action::ModeChanged(Mode::Insert))
            }
            KeyCode::Char(':') => {
                self.mode = Mode::Command;
                self.command_buffer.clear();
                Some(Action::ModeChanged(Mode::Command))
            }
            _ => None,
        }
    }

    fn handle_insert(&mut self, code: KeyCode) -> Option<Action> {
        // Insert mode exists for the modal feel; only escape does anything.
        if code == KeyCode::Esc {
            self.mode = Mode::Normal;
            return Some(Action::ModeChanged(Mode::Normal));
        }
        None
    }

    fn handle_command(&mut self, code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Enter => {
                let cmd = std::mem::take(&mut self.command_buffer);
                self.mode = Mode::Normal;
                Some(Action::Command(cmd))
            }
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.command_buffer.clear();
                Some(Action::ModeChanged(Mode::Normal))
            }
            KeyCode::Backspace => {
                self.command_buffer.pop();
                None
            }
            KeyCode::Char(c) => {
                self.command_buffer.push(c);
                None
            }
            _ => None,
        }
    }

    fn take_count(&mut self) -> i32 {
        let count = self.pending_count.parse::<i32>().unwrap_or(1);
        self.pending_count.clear();
        count.clamp(1, 999)
    }
}
