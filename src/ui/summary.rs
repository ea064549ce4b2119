use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let overall = app.overall();
    let grade_color = get_grade_color(overall.percent);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], app, grade_color);
    render_topic_breakdown(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn get_grade_color(percent: u8) -> Color {
    match percent {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, app: &App, grade_color: Color) {
    let overall = app.overall();
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "ALLE THEMEN FERTIG",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({}%)",
                overall.correct, overall.total, overall.percent
            ),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_topic_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .sessions()
        .iter()
        .map(|session| {
            let (session_correct, session_answered) = session.tally();
            let record = app.record_for(session.topic_id());

            Line::from(vec![
                Span::styled(
                    format!(" {:<24}", session.title()),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("Runde {}/{}", session_correct, session_answered),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("   gesamt {}/{}", record.correct, record.answered),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("n new round · r reset · q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
