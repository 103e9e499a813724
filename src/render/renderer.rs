use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Cell, PlaySession, SessionState};

/// Pure view layer: turns immutable session snapshots into widgets
///
/// Never touches simulation state and retains nothing across frames.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// The title screen shown before a session starts
    pub fn render_menu(&self, frame: &mut Frame, highscore: u32) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "S N A K E",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Highscore: ", Style::default().fg(Color::Green)),
                Span::styled(
                    highscore.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to start.",
                Style::default().fg(Color::Green),
            )),
            Line::from(Span::styled(
                "Press ESC to quit.",
                Style::default().fg(Color::Green),
            )),
        ];

        let menu = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
        );
        frame.render_widget(menu, frame.area());
    }

    /// One frame of play: score header, board, footer, overlays
    pub fn render_play(&self, frame: &mut Frame, session: &PlaySession) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Score line
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Controls
            ])
            .split(frame.area());

        frame.render_widget(self.score_line(session), chunks[0]);
        frame.render_widget(self.board(session), chunks[1]);
        frame.render_widget(self.controls(), chunks[2]);

        match session.state() {
            SessionState::Paused => self.overlay(frame, chunks[1], self.paused_panel()),
            SessionState::GameOver => {
                self.overlay(frame, chunks[1], self.game_over_panel(session))
            }
            SessionState::Won => self.overlay(frame, chunks[1], self.won_panel(session)),
            SessionState::Active => {}
        }
    }

    fn board(&self, session: &PlaySession) -> Paragraph<'_> {
        let grid = session.grid();
        let snake = session.snake();
        let apple = session.apple();

        let mut lines = Vec::with_capacity(grid.height() as usize);
        for y in 0..grid.height() {
            let mut spans = Vec::with_capacity(grid.width() as usize);
            for x in 0..grid.width() {
                let cell = Cell::new(x, y);

                let span = if cell == snake.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snake.contains(cell) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if apple == Some(cell) {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };
                spans.push(span);
            }
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .title(" Snake "),
            )
    }

    fn score_line(&self, session: &PlaySession) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Green)),
            Span::styled(
                session.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Highscore: ", Style::default().fg(Color::Green)),
            Span::styled(
                session.highscore().to_string(),
                Style::default().fg(Color::White),
            ),
        ];
        if session.godmode() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled("GOD", Style::default().fg(Color::Yellow)));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn controls(&self) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("ESC", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn paused_panel(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press P to resume.",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn game_over_panel<'a>(&self, session: &PlaySession) -> Paragraph<'a> {
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Game over!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("You scored ", Style::default().fg(Color::Gray)),
                Span::styled(
                    session.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];
        if session.is_new_highscore() {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(
                "New highscore!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "Press Enter to start a new game.",
            Style::default().fg(Color::Gray),
        )));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn won_panel<'a>(&self, session: &PlaySession) -> Paragraph<'a> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "You win!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("The board is full. You scored ", Style::default().fg(Color::Gray)),
                Span::styled(
                    session.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to start a new game.",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    /// Draw a panel centered over the board without clearing the rest
    fn overlay(&self, frame: &mut Frame, area: Rect, panel: Paragraph<'_>) {
        let width = area.width.min(40);
        let height = area.height.min(9);
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };
        frame.render_widget(Clear, popup);
        frame.render_widget(panel, popup);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
