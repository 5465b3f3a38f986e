use crate::app::{App, EmbedInput, Field};
use crate::render::{self, Preview};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const ACCENT: Color = Color::Cyan;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Min(10),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(frame.area());

    let columns =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(chunks[0]);

    draw_form(frame, app, columns[0]);
    draw_output(frame, app, columns[1]);
    draw_status(frame, app, chunks[1]);
    draw_hints(frame, app, chunks[2]);
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let draft = app.form.draft();
    let mut lines = Vec::new();

    push_field(
        &mut lines,
        "Webhook URL",
        app.form.webhook_url(),
        app.focus == Field::WebhookUrl,
    );
    push_field(
        &mut lines,
        "Message Content",
        &draft.content,
        app.focus == Field::Content,
    );
    push_field(
        &mut lines,
        "Username Override",
        &draft.username,
        app.focus == Field::Username,
    );
    push_field(
        &mut lines,
        "Avatar URL",
        &draft.avatar_url,
        app.focus == Field::AvatarUrl,
    );

    for (index, embed) in draft.embeds.iter().enumerate() {
        let (r, g, b) = render::color_rgb(embed.color);
        lines.push(Line::from(Span::styled(
            format!("Embed {}", index + 1),
            Style::default()
                .fg(Color::Rgb(r, g, b))
                .add_modifier(Modifier::BOLD),
        )));

        push_field(
            &mut lines,
            "Title",
            &embed.title,
            app.focus == Field::Embed(index, EmbedInput::Title),
        );
        push_field(
            &mut lines,
            "Description",
            &embed.description,
            app.focus == Field::Embed(index, EmbedInput::Description),
        );
        push_field(
            &mut lines,
            "Color (hex)",
            app.color_input(index),
            app.focus == Field::Embed(index, EmbedInput::Color),
        );
    }

    let form = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(" Webhook Configuration "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(form, area);
}

fn push_field(lines: &mut Vec<Line<'_>>, label: &'static str, value: &str, focused: bool) {
    let label_style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(Span::styled(format!("{label}:"), label_style)));

    let rows: Vec<&str> = value.split('\n').collect();
    let last = rows.len() - 1;
    for (i, row) in rows.into_iter().enumerate() {
        let mut spans = vec![Span::raw(format!("  {row}"))];
        if focused && i == last {
            spans.push(Span::styled("█", Style::default().fg(ACCENT)));
        }
        lines.push(Line::from(spans));
    }
}

fn draw_output(frame: &mut Frame, app: &App, area: Rect) {
    let chunks =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    draw_preview(frame, app, chunks[0]);
    draw_raw_json(frame, app, chunks[1]);
}

fn draw_preview(frame: &mut Frame, app: &App, area: Rect) {
    let preview = Preview::of(app.form.draft());
    let mut lines = vec![Line::from(Span::styled(
        preview.display_name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    if let Some(avatar_url) = &preview.avatar_url {
        lines.push(Line::from(Span::styled(
            format!("avatar: {avatar_url}"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    if let Some(content) = &preview.content {
        lines.push(Line::raw(""));
        for row in content.split('\n') {
            lines.push(Line::raw(row.to_string()));
        }
    }

    for embed in &preview.embeds {
        let (r, g, b) = render::color_rgb(embed.accent);
        let bar = Span::styled("▌ ", Style::default().fg(Color::Rgb(r, g, b)));

        lines.push(Line::raw(""));
        if let Some(title) = &embed.title {
            lines.push(Line::from(vec![
                bar.clone(),
                Span::styled(title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]));
        }
        if let Some(description) = &embed.description {
            for row in description.split('\n') {
                lines.push(Line::from(vec![bar.clone(), Span::raw(row.to_string())]));
            }
        }
        if embed.title.is_none() && embed.description.is_none() {
            lines.push(Line::from(bar.clone()));
        }
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Preview "))
        .wrap(Wrap { trim: false });

    frame.render_widget(widget, area);
}

fn draw_raw_json(frame: &mut Frame, app: &App, area: Rect) {
    let widget = Paragraph::new(render::raw_json(app.form.draft()))
        .block(Block::default().borders(Borders::ALL).title(" Raw JSON "))
        .wrap(Wrap { trim: false });

    frame.render_widget(widget, area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(error) = app.form.last_error() {
        Line::from(Span::styled(
            format!(" ✗ {error}"),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(flash) = &app.flash {
        Line::from(Span::styled(
            format!(" ✓ {}", flash.text),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::raw("")
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn draw_hints(frame: &mut Frame, app: &App, area: Rect) {
    let send_style = if app.form.can_submit() {
        Style::default().fg(Color::Yellow)
    } else {
        // Submit is gated on a non-empty URL; grey the hint out to match.
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled(" Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" next field  "),
        Span::styled("Ctrl-N", Style::default().fg(Color::Yellow)),
        Span::raw(" add embed  "),
        Span::styled("Ctrl-D", Style::default().fg(Color::Yellow)),
        Span::raw(" remove embed  "),
        Span::styled("Ctrl-S", send_style),
        Span::raw(" send  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
