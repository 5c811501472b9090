//! Terminal UI rendering for the web build
//!
//! This module mirrors faq-cli's UI but uses ratzilla's rendering.

use ratzilla::ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use faq_core::{App, Field, Focus, InputTarget, Mode, OutputView, Preview, PreviewLine};

// Catppuccin Mocha colors
const SURFACE0: Color = Color::Rgb(49, 50, 68);
const SURFACE1: Color = Color::Rgb(69, 71, 90);
const TEXT: Color = Color::Rgb(205, 214, 244);
const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
const OVERLAY0: Color = Color::Rgb(108, 112, 134);
const RED: Color = Color::Rgb(243, 139, 168);
const GREEN: Color = Color::Rgb(166, 227, 161);
const BLUE: Color = Color::Rgb(137, 180, 250);
const MAUVE: Color = Color::Rgb(203, 166, 247);
const PEACH: Color = Color::Rgb(250, 179, 135);

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0]);
    draw_main_area(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    // Draw popups/overlays
    match app.mode {
        Mode::Input => draw_input_dialog(frame, app),
        Mode::Help => draw_help(frame),
        Mode::Normal => {}
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title_text = format!(" FAQ Builder (Web) - {}", app.title());
    let title_bar = Paragraph::new(title_text).style(Style::default().fg(TEXT).bg(SURFACE0));
    frame.render_widget(title_bar, area);
}

fn draw_main_area(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_editor(frame, app, chunks[0]);
    match app.output {
        OutputView::Preview => draw_preview(frame, app, chunks[1]),
        OutputView::Html => draw_html(frame, app, chunks[1]),
    }
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(BLUE)
    } else {
        Style::default().fg(SUBTEXT0)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

/// Scroll so that `line` stays inside a viewport of `height` rows
fn scroll_for(line: usize, height: u16) -> u16 {
    let height = height as usize;
    if height > 0 && line >= height {
        u16::try_from(line - height + 1).unwrap_or(u16::MAX)
    } else {
        0
    }
}

fn field_line(marker: &str, value: &str, placeholder: &str, selected: bool) -> Line<'static> {
    let marker_style = Style::default().fg(if selected { PEACH } else { OVERLAY0 });
    let value_span = if value.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(OVERLAY0))
    } else {
        Span::styled(value.to_string(), Style::default().fg(TEXT))
    };

    let mut line = Line::from(vec![Span::styled(marker.to_string(), marker_style), value_span]);
    if selected {
        line = line.style(Style::default().bg(SURFACE1));
    }
    line
}

fn draw_editor(frame: &mut Frame, app: &App, area: Rect) {
    let block = pane_block("Editor", app.focus == Focus::Editor);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.document.is_empty() {
        let empty = Paragraph::new("No subjects yet. Press 'n' to add one.")
            .style(Style::default().fg(SUBTEXT0));
        frame.render_widget(empty, inner);
        return;
    }

    let selected = app.selected_field();
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0;

    for (s_index, subject) in app.document.subjects().iter().enumerate() {
        if s_index > 0 {
            lines.push(Line::from(""));
        }

        let field = Field::SubjectTitle {
            subject_id: subject.id,
        };
        if selected == Some(field) {
            cursor_line = lines.len();
        }
        let title = field_line(
            "# ",
            &subject.title,
            "Enter subject title",
            selected == Some(field),
        );
        let bold = title.style.add_modifier(Modifier::BOLD);
        lines.push(title.style(bold));

        for (q_index, question) in subject.questions.iter().enumerate() {
            let field = Field::QuestionText {
                subject_id: subject.id,
                question_id: question.id,
            };
            if selected == Some(field) {
                cursor_line = lines.len();
            }
            lines.push(field_line(
                &format!("  {}. ", q_index + 1),
                &question.text,
                "Enter question",
                selected == Some(field),
            ));

            let last_one = question.paragraphs.len() == 1;
            for (p_index, paragraph) in question.paragraphs.iter().enumerate() {
                let field = Field::Paragraph {
                    subject_id: subject.id,
                    question_id: question.id,
                    index: p_index,
                };
                let is_selected = selected == Some(field);
                if is_selected {
                    cursor_line = lines.len();
                }

                let mut rows = paragraph.split('\n');
                let first = rows.next().unwrap_or_default();
                let mut line = field_line("      • ", first, "Enter paragraph", is_selected);
                if is_selected && last_one {
                    line.spans
                        .push(Span::styled("  (only paragraph)", Style::default().fg(OVERLAY0)));
                }
                lines.push(line);
                for row in rows {
                    lines.push(field_line("        ", row, "", is_selected));
                }
            }
        }
    }

    let paragraph = Paragraph::new(lines).scroll((scroll_for(cursor_line, inner.height), 0));
    frame.render_widget(paragraph, inner);
}

fn draw_preview(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Output;
    let block = pane_block("Preview", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rendered = match app.preview() {
        Preview::Empty(message) => {
            let empty = Paragraph::new(message).style(Style::default().fg(SUBTEXT0));
            frame.render_widget(empty, inner);
            return;
        }
        Preview::Lines(lines) => lines,
    };

    let selected = app.selected_preview_question();
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0;

    for item in rendered {
        match item {
            PreviewLine::SubjectTitle(title) => lines.push(Line::from(Span::styled(
                title,
                Style::default().fg(MAUVE).add_modifier(Modifier::BOLD),
            ))),
            PreviewLine::QuestionHeader {
                question_id,
                ordinal,
                text,
                expanded,
            } => {
                let chevron = if expanded { "▾ " } else { "▸ " };
                let mut line = Line::from(vec![
                    Span::styled(chevron, Style::default().fg(SUBTEXT0)),
                    Span::styled(
                        format!("{}. {}", ordinal, text),
                        Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
                    ),
                ]);
                if focused && selected == Some(question_id) {
                    cursor_line = lines.len();
                    line = line.style(Style::default().bg(SURFACE1));
                }
                lines.push(line);
            }
            PreviewLine::Paragraph(text) => {
                for (i, row) in text.split('\n').enumerate() {
                    let bullet = if i == 0 { "    • " } else { "      " };
                    lines.push(Line::from(vec![
                        Span::styled(bullet, Style::default().fg(OVERLAY0)),
                        Span::styled(row.to_string(), Style::default().fg(SUBTEXT0)),
                    ]));
                }
            }
            PreviewLine::Gap => lines.push(Line::from("")),
        }
    }

    let paragraph = Paragraph::new(lines)
        .scroll((scroll_for(cursor_line, inner.height), 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

fn draw_html(frame: &mut Frame, app: &App, area: Rect) {
    let block = pane_block("HTML Output", app.focus == Focus::Output);
    let html = app.html_output();
    let code = Paragraph::new(html)
        .block(block)
        .style(Style::default().fg(GREEN))
        .scroll((u16::try_from(app.html_scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(code, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_str = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Input => "INPUT",
        Mode::Help => "HELP",
    };

    let status = app.status_message.as_deref().unwrap_or("");
    let help_hint = "n subject | a question | p paragraph | Enter edit | c html | s save | ? help";

    let status_text = format!(
        " {} | {}",
        mode_str,
        if status.is_empty() { help_hint } else { status },
    );

    let failed = status.contains("failed") || status.starts_with("Error");
    let fg = if failed { RED } else { SUBTEXT0 };
    let status_bar = Paragraph::new(status_text).style(Style::default().fg(fg).bg(SURFACE0));

    frame.render_widget(status_bar, area);
}

fn draw_input_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 8, frame.area());
    frame.render_widget(Clear, area);

    let title = match app.input_target {
        InputTarget::Field(Field::SubjectTitle { .. }) => "Subject title (Enter to save)",
        InputTarget::Field(Field::QuestionText { .. }) => "Question (Enter to save)",
        InputTarget::Field(Field::Paragraph { .. }) => {
            "Paragraph (Alt+Enter new line, Enter to save)"
        }
        InputTarget::UploadPath => "Path of .json file to upload",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GREEN))
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = app.input_buffer.split('\n').count();
    let input = Paragraph::new(format!("{}_", app.input_buffer))
        .style(Style::default().fg(TEXT))
        .wrap(Wrap { trim: false })
        .scroll((scroll_for(rows.saturating_sub(1), inner.height), 0));
    frame.render_widget(input, inner);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(60, 24, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Help (press any key to close)");

    let heading = Style::default().fg(MAUVE).add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Navigation", heading)),
        Line::from("  j/k      Move down/up"),
        Line::from("  Tab      Toggle editor/output"),
        Line::from("  Enter    Expand/collapse question (preview)"),
        Line::from(""),
        Line::from(Span::styled("Editing", heading)),
        Line::from("  n        Add subject"),
        Line::from("  a        Add question to subject"),
        Line::from("  p        Add paragraph to question"),
        Line::from("  Enter/i  Edit selected field"),
        Line::from("  d        Delete selected item"),
        Line::from(""),
        Line::from(Span::styled("Output & Files", heading)),
        Line::from("  c        Toggle preview/HTML"),
        Line::from("  y        Copy HTML to clipboard"),
        Line::from("  s / l    Save to / load from storage"),
        Line::from("  w / o    Download / upload JSON file"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(SUBTEXT0))),
    ];

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
