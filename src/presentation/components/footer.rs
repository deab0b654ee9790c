use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::engine::Validity;

use super::super::view::UiContext;

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let actions = ctx.help.unwrap_or(" ");
    let actions_widget = Paragraph::new(format!("Keys: {actions}"))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(actions_widget, rows[0]);

    let mut spans = vec![Span::raw(ctx.status_message.to_string())];
    if let Some(focused) = ctx.form_state.focused_field() {
        let field = &focused.field;
        let value = field
            .canonical()
            .map(|value| value.to_wire())
            .unwrap_or_else(|| "—".to_string());
        let label = ctx.focus_label.unwrap_or_else(|| focused.label());
        spans.push(Span::raw(format!(" • {label} → {value} ")));
        spans.push(validity_badge(field.validity()));
    }
    if ctx.dirty {
        spans.push(Span::raw(" • unsaved"));
    }
    if let Some(extra) = ctx.global_errors.first() {
        spans.push(Span::styled(
            format!(" • {extra}"),
            Style::default().fg(Color::Red),
        ));
    }
    spans.push(Span::raw(" "));
    spans.push(if ctx.error_count > 0 {
        Span::styled(
            format!("[! {}]", ctx.error_count),
            Style::default().fg(Color::Red).bg(Color::Black),
        )
    } else {
        Span::styled("[ok]", Style::default().fg(Color::Green))
    });

    let status_widget = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true });
    frame.render_widget(status_widget, rows[1]);
}

fn validity_badge(validity: Validity) -> Span<'static> {
    let color = match validity {
        Validity::Empty => Color::DarkGray,
        Validity::Partial => Color::Gray,
        Validity::Valid => Color::Green,
        Validity::Invalid => Color::Red,
    };
    Span::styled(format!("({})", validity.label()), Style::default().fg(color))
}
