//! Stateless rendering for the game screens.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strictly_2048::Position;
use strictly_minesweeper::{Cell, Coord};

use super::app::{Game2048App, MinesweeperApp};
use crate::notifications::{Notification, NotificationKind};

const TILE_WIDTH: u16 = 7;

/// Renders the 2048 board, score line and banners.
pub fn draw_2048(frame: &mut Frame, app: &Game2048App) {
    let game = app.game();
    let chunks = screen_layout(frame.area(), app.notifications().active().len());

    let title = format!(
        "2048  score {}  best {}  moves {}  {}",
        game.score(),
        game.best_score(),
        game.move_count(),
        app.clock().display()
    );
    draw_title(frame, chunks[0], &title);

    let grid = game.grid();
    let lines: Vec<Line> = (0..grid.rows())
        .map(|y| {
            let spans: Vec<Span> = (0..grid.cols())
                .map(|x| match grid.get(Position::new(x, y)) {
                    Some(tile) => Span::styled(
                        format!("{:^width$}", tile.value(), width = TILE_WIDTH as usize),
                        tile_style(tile.value()),
                    ),
                    None => Span::styled(
                        format!("{:^width$}", ".", width = TILE_WIDTH as usize),
                        Style::default().fg(Color::DarkGray),
                    ),
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    let width = framed_extent(grid.cols(), TILE_WIDTH);
    let height = framed_extent(grid.rows(), 1);
    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(board, center_rect(chunks[1], width, height));

    draw_notifications(frame, chunks[2], app.notifications().active());
    draw_status(frame, chunks[3], app.status_message());
}

/// Renders the minefield with the cursor highlighted.
pub fn draw_minesweeper(frame: &mut Frame, app: &MinesweeperApp) {
    let field = app.field();
    let chunks = screen_layout(frame.area(), 0);

    let title = format!(
        "Minesweeper ({})  mines {}  flags {}  {}",
        field.level(),
        field.mine_count(),
        field.flag_count(),
        app.clock().display()
    );
    draw_title(frame, chunks[0], &title);

    let show_mines = field.is_over() || field.is_won();
    let lines: Vec<Line> = (0..field.rows())
        .map(|y| {
            let spans: Vec<Span> = (0..field.cols())
                .filter_map(|x| {
                    let coord = Coord::new(x, y);
                    let cell = field.cell(coord)?;
                    let (symbol, style) = cell_symbol(cell, show_mines);
                    let style = if coord == app.cursor() {
                        style.bg(Color::White).fg(Color::Black)
                    } else {
                        style
                    };
                    Some(Span::styled(format!(" {} ", symbol), style))
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    let width = framed_extent(field.cols(), 3);
    let height = framed_extent(field.rows(), 1);
    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(board, center_rect(chunks[1], width, height));

    draw_status(frame, chunks[3], app.status_message());
}

/// Cells needed for `count` items of `cell` width plus a border on each side.
fn framed_extent(count: usize, cell: u16) -> u16 {
    clamp_u16(count).saturating_mul(cell).saturating_add(2)
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn screen_layout(area: Rect, banners: usize) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(6),    // Board
            Constraint::Length(clamp_u16(banners).saturating_mul(3)), // Banners
            Constraint::Length(3), // Status
        ])
        .split(area)
}

fn draw_title(frame: &mut Frame, area: Rect, title: &str) {
    let title = Paragraph::new(title.to_string())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn draw_status(frame: &mut Frame, area: Rect, status: &str) {
    let status_text = Paragraph::new(status.to_string())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, area);
}

fn draw_notifications(frame: &mut Frame, area: Rect, notifications: &[Notification]) {
    if notifications.is_empty() {
        return;
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(notifications.iter().map(|_| Constraint::Length(3)))
        .split(area);
    for (notification, row) in notifications.iter().zip(rows.iter()) {
        let notice = notification.notice();
        let color = match notice.kind() {
            NotificationKind::Info => Color::Blue,
            NotificationKind::Success => Color::Green,
            NotificationKind::Error => Color::Red,
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        if let Some(title) = notice.title() {
            block = block.title(title.clone());
        }
        let banner = Paragraph::new(notice.message().clone())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(banner, *row);
    }
}

fn cell_symbol(cell: &Cell, show_mines: bool) -> (String, Style) {
    if *cell.flagged() {
        return ("F".to_string(), Style::default().fg(Color::Red));
    }
    if *cell.has_mine() && (*cell.revealed() || show_mines) {
        return (
            "*".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        );
    }
    if !*cell.revealed() {
        return ("#".to_string(), Style::default().fg(Color::DarkGray));
    }
    match *cell.adjacent_mines() {
        0 => (" ".to_string(), Style::default()),
        n => (n.to_string(), Style::default().fg(Color::Cyan)),
    }
}

fn tile_style(value: u32) -> Style {
    let color = match value {
        2 | 4 => Color::White,
        8 | 16 => Color::Yellow,
        32 | 64 => Color::LightRed,
        128 | 256 | 512 => Color::Magenta,
        _ => Color::Green,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
