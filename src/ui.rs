//! Drawing: the arena with the falling piece on top, centred in a bordered block.

use crate::game::GameState;
use crate::piece::{Cell, EMPTY};
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Terminal columns per board cell, so blocks look roughly square.
const CELL_WIDTH: u16 = 2;
const BLOCK: &str = "██";
const BLANK: &str = "  ";

/// Board size in terminal cells including the border.
fn board_size(state: &GameState) -> (u16, u16) {
    let w = state.arena.width() as u16 * CELL_WIDTH + 2;
    let h = state.arena.height() as u16 + 2;
    (w, h)
}

/// Cells to show: the arena with the active piece overlaid. Piece cells
/// outside the board are skipped.
pub fn composite(state: &GameState) -> Vec<Vec<Cell>> {
    let mut grid: Vec<Vec<Cell>> = state.arena.rows().map(<[Cell]>::to_vec).collect();
    let pos = state.player.pos;
    for (x, y, value) in state.player.matrix.occupied() {
        let (gx, gy) = (pos.x + x as i32, pos.y + y as i32);
        let (Ok(gx), Ok(gy)) = (usize::try_from(gx), usize::try_from(gy)) else {
            continue;
        };
        if let Some(slot) = grid.get_mut(gy).and_then(|row| row.get_mut(gx)) {
            *slot = value;
        }
    }
    grid
}

/// Board rect centred in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);
    vert[1]
}

pub fn draw(frame: &mut Frame, state: &GameState, theme: &Theme) {
    let (w, h) = board_size(state);
    let area = centered(frame.area(), w, h);

    let lines: Vec<Line> = composite(state)
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|cell| {
                        if cell == EMPTY {
                            Span::styled(BLANK, Style::default().bg(theme.bg))
                        } else {
                            Span::styled(BLOCK, Style::default().fg(theme.piece_color(cell)).bg(theme.bg))
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(" Blockfall ", Style::default().fg(theme.title)))
        .title_bottom(
            Line::from(Span::styled(" ←→ ↓ q/w ", Style::default().fg(theme.main_fg)))
                .alignment(Alignment::Center),
        );
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
