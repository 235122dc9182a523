//! Goban rendering: grid, star points, stones, cursor, coordinates.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::board::{Color as Cell, Point};

/// Render the board centered in `area`.
pub fn render_board(frame: &mut Frame, area: Rect, app: &App) {
    let game = &app.game;
    let size = game.board.size();
    let show_coords = app.settings.show_coords;

    let left_margin: u16 = if show_coords { 3 } else { 0 };
    let top_margin: u16 = if show_coords { 1 } else { 0 };
    let board_width = (size * 3 - 2) as u16 + left_margin;
    let board_height = size as u16 + top_margin;

    if area.width < board_width || area.height < board_height {
        let msg = Paragraph::new(format!(
            "Terminal too small: need {}x{}",
            board_width, board_height
        ))
        .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    let x_offset = area.x + (area.width - board_width) / 2;
    let y_offset = area.y + (area.height - board_height) / 2;

    let grid_style = Style::default().fg(Color::DarkGray);
    let star_style = Style::default().fg(Color::Yellow);
    let coord_style = Style::default().fg(Color::DarkGray);

    if show_coords {
        let mut spans = vec![Span::raw(" ".repeat(left_margin as usize))];
        for x in 0..size {
            spans.push(Span::styled(column_letter(x).to_string(), coord_style));
            if x < size - 1 {
                spans.push(Span::raw("  "));
            }
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x_offset, y_offset, board_width, 1),
        );
    }

    for y in 0..size {
        let mut spans = Vec::new();
        if show_coords {
            spans.push(Span::styled(format!("{:>2} ", size - y), coord_style));
        }
        for x in 0..size {
            let is_cursor = app.handler.cursor_x == x && app.handler.cursor_y == y;
            let is_last = game.last_move == Some(Point::new(x, y));

            let (symbol, style) = match game.board.at(x, y) {
                Cell::Black => (
                    "●",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Cell::White => (
                    "○",
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::BOLD),
                ),
                Cell::Empty => {
                    if is_star_point(size, x, y) {
                        ("╋", star_style)
                    } else {
                        (intersection_char(size, x, y), grid_style)
                    }
                }
            };

            let style = if is_cursor {
                style.bg(Color::Magenta)
            } else if is_last && game.board.at(x, y) != Cell::Empty {
                style.fg(Color::Green)
            } else {
                style
            };
            spans.push(Span::styled(symbol, style));

            if x < size - 1 {
                spans.push(Span::styled("──", grid_style));
            }
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(
                x_offset,
                y_offset + top_margin + y as u16,
                board_width,
                1,
            ),
        );
    }
}

fn column_letter(x: i32) -> char {
    let mut c = b'A' + x as u8;
    if x >= 8 {
        c += 1; // skip I
    }
    c as char
}

fn intersection_char(size: i32, x: i32, y: i32) -> &'static str {
    let top = y == 0;
    let bottom = y == size - 1;
    let left = x == 0;
    let right = x == size - 1;
    match (top, bottom, left, right) {
        (true, _, true, _) => "┌",
        (true, _, _, true) => "┐",
        (_, true, true, _) => "└",
        (_, true, _, true) => "┘",
        (true, ..) => "┬",
        (_, true, ..) => "┴",
        (_, _, true, _) => "├",
        (_, _, _, true) => "┤",
        _ => "┼",
    }
}

/// Hoshi positions for the conventional board sizes.
fn is_star_point(size: i32, x: i32, y: i32) -> bool {
    let marks: &[i32] = match size {
        19 => &[3, 9, 15],
        13 => &[3, 6, 9],
        9 => {
            return ((x == 2 || x == 6) && (y == 2 || y == 6)) || (x == 4 && y == 4);
        }
        _ => return false,
    };
    marks.contains(&x) && marks.contains(&y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters_skip_i() {
        assert_eq!(column_letter(0), 'A');
        assert_eq!(column_letter(7), 'H');
        assert_eq!(column_letter(8), 'J');
        assert_eq!(column_letter(18), 'T');
    }

    #[test]
    fn test_star_points() {
        assert!(is_star_point(19, 3, 3));
        assert!(is_star_point(19, 9, 9));
        assert!(!is_star_point(19, 4, 4));
        assert!(is_star_point(13, 6, 6));
        assert!(is_star_point(9, 4, 4));
        assert!(is_star_point(9, 2, 6));
        assert!(!is_star_point(9, 4, 2));
        assert!(!is_star_point(11, 3, 3));
    }

    #[test]
    fn test_intersection_chars() {
        assert_eq!(intersection_char(9, 0, 0), "┌");
        assert_eq!(intersection_char(9, 8, 0), "┐");
        assert_eq!(intersection_char(9, 0, 8), "└");
        assert_eq!(intersection_char(9, 8, 8), "┘");
        assert_eq!(intersection_char(9, 4, 0), "┬");
        assert_eq!(intersection_char(9, 4, 8), "┴");
        assert_eq!(intersection_char(9, 0, 4), "├");
        assert_eq!(intersection_char(9, 8, 4), "┤");
        assert_eq!(intersection_char(9, 4, 4), "┼");
    }
}
