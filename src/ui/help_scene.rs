//! Help overlay listing keybindings and colon commands.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_help(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("  hjkl / arrows   move cursor"),
        Line::from("  1-9 prefix      repeat a motion"),
        Line::from("  x               place stone"),
        Line::from("  u               undo"),
        Line::from("  i / esc         enter / leave insert mode"),
        Line::from("  :w [file]       write SGF (default game.sgf)"),
        Line::from("  :e [file]       load SGF"),
        Line::from("  :pass           pass the turn"),
        Line::from("  :score [m]      score (chinese | japanese)"),
        Line::from("  :komi <v>       set komi"),
        Line::from("  :method <m>     set default scoring method"),
        Line::from("  :c              toggle coordinates"),
        Line::from("  :q              quit / close help"),
    ];

    let width = 44u16.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" help ")
        .border_style(Style::default().fg(Color::Blue));
    frame.render_widget(
        Paragraph::new(lines).block(block),
        Rect::new(x, y, width, height),
    );
}
