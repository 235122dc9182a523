//! Goban - a terminal Go board with vim keybindings.
//!
//! The game engine (board, rules, scoring, game state) lives in the
//! leaf modules and performs no I/O; the application, presentation,
//! and bridge layers sit on top of it.

pub mod app;
pub mod board;
pub mod build_info;
pub mod game;
pub mod input;
pub mod rules;
pub mod score;
pub mod settings;
pub mod sgf;
pub mod ui;
pub mod web;
