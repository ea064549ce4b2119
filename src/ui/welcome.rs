use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let overall = app.overall();
    let stored = if overall.total == 0 {
        "Noch kein gespeicherter Fortschritt".to_string()
    } else {
        format!(
            "Bisher: {}/{} richtig ({}%)",
            overall.correct, overall.total, overall.percent
        )
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "WÄRMELEHRE-QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(
            format!("{} Themen · Zufallsfragen pro Thema", app.sessions().len())
                .fg(Color::DarkGray),
        ),
        Line::from(stored.fg(Color::DarkGray)),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
