use crate::coordinator::MoveCoordinator;
use crate::engine::Engine;
use crate::game::{Player, Position, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render<E: Engine>(frame: &mut Frame, game: &MoveCoordinator<E>, selected_column: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Board
            Constraint::Length(4), // Evaluation
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, game, chunks[0]);
    render_board(
        frame,
        game.position(),
        selected_column,
        game.highlight(),
        chunks[1],
    );
    render_evaluation(frame, game, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

fn render_header<E: Engine>(frame: &mut Frame, game: &MoveCoordinator<E>, area: Rect) {
    let position = game.position();
    let to_move = position.side_to_move();
    let mode = game.mode().label();

    let status = if position.is_game_over() {
        format!("Game Over  |  {mode}")
    } else {
        format!("Current Player: {}  |  {mode}", to_move.name())
    };

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(player_color(to_move))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four Analyzer"),
        );

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    position: &Position,
    selected_column: usize,
    highlight: Option<usize>,
    area: Rect,
) {
    let mut lines = Vec::new();
    let best = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);

    // Column numbers, selection underlined, recommendation in green
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        let label = format!(" {} ", col + 1);
        let style = if col == selected_column {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if Some(col) == highlight {
            best
        } else {
            Style::default()
        };
        col_line.push(Span::styled(label, style));
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    // Preview of the stone about to drop
    let to_move = position.side_to_move();
    let mut preview = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column && !position.is_game_over() && position.is_move_valid(col) {
            preview.push(Span::styled(
                " ○ ",
                Style::default().fg(player_color(to_move)),
            ));
        } else {
            preview.push(Span::raw("   "));
        }
    }
    preview.push(Span::raw("  "));
    lines.push(Line::from(preview));

    lines.push(Line::from("  ╔═════════════════════╗"));

    // Top row first
    for row in (0..ROWS).rev() {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..COLS {
            let span = match position.player_at(row, col) {
                Some(player) => Span::styled(" ● ", Style::default().fg(player_color(player))),
                None if Some(col) == highlight => Span::styled(" · ", best),
                None => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
            };
            row_spans.push(span);
        }
        row_spans.push(Span::raw("║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚═════════════════════╝"));

    // Recommended column
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if Some(col) == highlight {
            indicator_line.push(Span::styled(" ▲ ", best));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_evaluation<E: Engine>(frame: &mut Frame, game: &MoveCoordinator<E>, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            game.evaluation().to_string(),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(format!("Move {}.", game.position().move_count())),
    ];

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Evaluation"));

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from(
        "←/→: Select  |  Enter/1-7: Drop  |  U: Undo  |  R: Reset  |  M: Mode  |  Q: Quit",
    );

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
