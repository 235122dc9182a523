//! Terminal presentation layer.
//!
//! Reads application state and renders it; never mutates the engine.

pub mod board_scene;
pub mod help_scene;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::game::coord_label;
use crate::input::Mode;

/// Draw the whole screen: title, board (or help overlay), status bar,
/// command line.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let title = Paragraph::new(Line::from(Span::styled(
        "goban",
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    if app.show_help {
        help_scene::render_help(frame, chunks[1]);
    } else {
        board_scene::render_board(frame, chunks[1], app);
    }

    render_status_bar(frame, chunks[2], app);
    render_command_line(frame, chunks[3], app);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let game = &app.game;
    let cursor = coord_label(
        game.board.size(),
        app.handler.cursor_x,
        app.handler.cursor_y,
    );

    let mut text = format!(
        " {} | {} to move | caps B:{} W:{} | {} | moves {}",
        app.handler.mode.name(),
        game.current_player,
        game.black_captures,
        game.white_captures,
        cursor,
        game.moves.len(),
    );
    if let Some(score) = &app.score_text {
        text.push_str(" | ");
        text.push_str(score);
    }

    let bar = Paragraph::new(text).style(
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray),
    );
    frame.render_widget(bar, area);
}

fn render_command_line(frame: &mut Frame, area: Rect, app: &App) {
    let line = if app.handler.mode == Mode::Command {
        Line::from(vec![
            Span::raw(":"),
            Span::raw(app.handler.command_buffer.clone()),
            Span::styled("█", Style::default().fg(Color::Gray)),
        ])
    } else if let Some(error) = &app.error {
        Line::from(Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(Span::styled(
            "x place  u undo  hjkl move  :help",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}
