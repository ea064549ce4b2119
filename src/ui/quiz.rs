use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph, Tabs, Wrap},
};

use crate::app::{App, InputState, Tone};
use crate::models::Question;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_topic_tabs(frame, chunks[0], app);
    render_overall_gauge(frame, chunks[1], app);
    render_position(frame, chunks[2], app);

    let session = app.active_session();
    match session.current_question() {
        Some(question) => {
            render_question_text(frame, chunks[3], question.text());
            render_answer_area(frame, chunks[4], question, app);
        }
        None => {
            let notice = Paragraph::new("Thema abgeschlossen – ENTER für das nächste offene Thema.")
                .fg(Color::DarkGray);
            frame.render_widget(notice, chunks[3]);
        }
    }

    render_feedback(frame, chunks[5], app);
    render_controls(frame, chunks[6]);
}

fn render_topic_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<String> = app
        .sessions()
        .iter()
        .map(|s| {
            if s.is_finished() {
                format!("{} ✓", s.title())
            } else {
                s.title().to_string()
            }
        })
        .collect();

    let widget = Tabs::new(titles)
        .select(app.active_index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(widget, area);
}

fn render_overall_gauge(frame: &mut Frame, area: Rect, app: &App) {
    let overall = app.overall();
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(f64::from(overall.percent) / 100.0)
        .label(format!(
            "{}/{} richtig · {}%",
            overall.correct, overall.total, overall.percent
        ));
    frame.render_widget(widget, area);
}

fn render_position(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.active_session();
    let (index, total) = session.position();
    let record = app.record_for(session.topic_id());

    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let position = Paragraph::new(format!("Frage {}/{}", index, total)).fg(Color::DarkGray);
    frame.render_widget(position, halves[0]);

    let topic_total = Paragraph::new(format!(
        "Thema gesamt: {}/{}",
        record.correct, record.answered
    ))
    .alignment(Alignment::Right)
    .fg(Color::DarkGray);
    frame.render_widget(topic_total, halves[1]);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_answer_area(frame: &mut Frame, area: Rect, question: &Question, app: &App) {
    match question {
        Question::MultipleChoice {
            options, correct, ..
        } => render_options(frame, area, options, *correct, app),
        Question::Numeric { unit, .. } => render_numeric_input(frame, area, unit.as_deref(), app),
    }
}

fn render_options(frame: &mut Frame, area: Rect, options: &[String], correct: usize, app: &App) {
    let selected = match app.input() {
        InputState::Choice(selected) => *selected,
        InputState::Value(_) => None,
    };
    let graded = app.active_session().is_locked();

    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);
    for (index, option) in options.iter().enumerate() {
        let is_selected = selected == Some(index);

        let style = if graded {
            if index == correct {
                Style::default().fg(Color::Green).bold()
            } else if is_selected {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        } else if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        let label = (b'A' + index as u8) as char;

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_numeric_input(frame: &mut Frame, area: Rect, unit: Option<&str>, app: &App) {
    let buffer = match app.input() {
        InputState::Value(buffer) => buffer.as_str(),
        InputState::Choice(_) => "",
    };
    let locked = app.active_session().is_locked();

    let label = match unit {
        Some(unit) => format!(" Antwort ({}): ", unit),
        None => " Antwort: ".to_string(),
    };
    let mut input_line = vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::styled(buffer, Style::default().fg(Color::White).bold()),
    ];
    if !locked {
        input_line.push(Span::styled("_", Style::default().fg(Color::DarkGray)));
    }

    let lines = vec![
        Line::from(input_line),
        Line::from(""),
        Line::from(
            " Tipp: Nutze die Formeln und runde erst ganz am Ende.".fg(Color::DarkGray),
        ),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_feedback(frame: &mut Frame, area: Rect, app: &App) {
    let Some(feedback) = app.feedback() else {
        return;
    };
    let color = match feedback.tone {
        Tone::Good => Color::Green,
        Tone::Bad => Color::Red,
        Tone::Info => Color::Yellow,
    };

    let widget = Paragraph::new(feedback.text.as_str())
        .wrap(Wrap { trim: true })
        .fg(color);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget =
        Paragraph::new("j/k select · type numbers · enter check/next · tab topic · r reset · q quit")
            .alignment(Alignment::Center)
            .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
