use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::{
    engine::Validity,
    form::{FormField, FormState},
};

pub fn render_fields(frame: &mut Frame<'_>, area: Rect, form_state: &FormState, enable_cursor: bool) {
    let selected_index = form_state.field_index;
    let content_width = area.width.saturating_sub(4);
    let mut items = Vec::with_capacity(form_state.fields.len());
    let mut cursor_hint: Option<CursorHint> = None;
    let mut line_offset = 0usize;

    for (idx, entry) in form_state.fields.iter().enumerate() {
        let render = build_field_render(entry, idx == selected_index, content_width);
        if cursor_hint.is_none()
            && let Some(mut hint) = render.cursor_hint
        {
            hint.line_offset += line_offset;
            cursor_hint = Some(hint);
        }
        line_offset += render.lines.len();
        items.push(ListItem::new(render.lines));
    }

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    let list = List::new(items)
        .block(
            Block::default()
                .title(form_state.title.clone())
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);

    if enable_cursor && let Some(cursor) = cursor_hint {
        let inner_y = area.y.saturating_add(1);
        let inner_x = area.x.saturating_add(1);
        let line = cursor
            .line_offset
            .min(area.height.saturating_sub(2) as usize) as u16;
        let cursor_y = inner_y.saturating_add(line);
        let cursor_x = inner_x
            .saturating_add(2)
            .saturating_add(cursor.column_offset)
            .saturating_add(cursor.caret_width);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

struct FieldRender {
    lines: Vec<Line<'static>>,
    cursor_hint: Option<CursorHint>,
}

struct CursorHint {
    line_offset: usize,
    column_offset: u16,
    /// Display width of the text left of the caret.
    caret_width: u16,
}

fn build_field_render(entry: &FormField, is_selected: bool, max_width: u16) -> FieldRender {
    let mut lines = Vec::new();
    let mut label = entry.label().to_string();
    if entry.spec.required {
        label.push_str(" *");
    }

    let label_style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(label, label_style)));

    if let Some(description) = &entry.spec.description {
        lines.push(Line::from(Span::styled(
            format!("  {description}"),
            Style::default().fg(Color::Gray),
        )));
    }

    let (value_panel, cursor_hint) = value_panel_lines(entry, is_selected);
    lines.extend(value_panel);
    lines.push(meta_line(entry));

    if let Some(error) = error_lines(entry, max_width) {
        lines.extend(error);
    }

    FieldRender { lines, cursor_hint }
}

fn value_style(entry: &FormField) -> Style {
    if entry.field.is_disabled() {
        return Style::default().fg(Color::DarkGray);
    }
    match entry.field.validity() {
        Validity::Invalid => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        Validity::Valid => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        Validity::Partial | Validity::Empty => Style::default().fg(Color::White),
    }
}

fn value_panel_lines(entry: &FormField, is_selected: bool) -> (Vec<Line<'static>>, Option<CursorHint>) {
    let field = &entry.field;
    let display = field.display();
    let (text, style) = if display.is_empty() {
        (
            field.placeholder().to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        (display.to_string(), value_style(entry))
    };
    let inner_width = UnicodeWidthStr::width(text.as_str());
    let mut lines = Vec::new();

    if !is_selected {
        lines.push(Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(text, style),
        ]));
        return (lines, None);
    }

    let border_color = if field.validity().is_error() {
        Color::Red
    } else {
        Color::Yellow
    };
    let border_style = Style::default().fg(border_color);
    let border_line = "─".repeat(inner_width.saturating_add(2));
    lines.push(Line::from(Span::styled(
        format!("┌{border_line}┐"),
        border_style,
    )));
    let value_line_index = lines.len();
    lines.push(Line::from(vec![
        Span::styled("│ ", border_style),
        Span::styled(text, style),
        Span::styled(" │", border_style),
    ]));
    lines.push(Line::from(Span::styled(
        format!("└{border_line}┘"),
        border_style,
    )));

    let before_caret: String = display.chars().take(field.caret()).collect();
    let cursor_hint = Some(CursorHint {
        line_offset: value_line_index,
        column_offset: 2,
        caret_width: UnicodeWidthStr::width(before_caret.as_str()) as u16,
    });
    (lines, cursor_hint)
}

fn meta_line(entry: &FormField) -> Line<'static> {
    let field = &entry.field;
    let mut meta = vec![Span::styled(
        format!("  {}", field.kind()),
        Style::default().fg(Color::DarkGray),
    )];
    let validity = field.validity();
    let (label, style) = match validity {
        Validity::Invalid => (
            "  • invalid",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Validity::Valid => ("  • valid", Style::default().fg(Color::Green)),
        Validity::Partial => ("  • partial", Style::default().fg(Color::Gray)),
        Validity::Empty => ("", Style::default()),
    };
    if !label.is_empty() {
        meta.push(Span::styled(label, style));
    }
    if field.is_disabled() {
        meta.push(Span::styled("  • disabled", Style::default().fg(Color::DarkGray)));
    } else if entry.dirty {
        meta.push(Span::styled("  • dirty", Style::default().fg(Color::Yellow)));
    }
    Line::from(meta)
}

fn error_lines(entry: &FormField, max_width: u16) -> Option<Vec<Line<'static>>> {
    entry.error.as_ref().map(|message| {
        let mut lines = Vec::new();
        lines.push(Line::from(Span::styled(
            "  Error:",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )));
        for line in wrap(message, max_width.max(8) as usize) {
            lines.push(Line::from(Span::styled(
                format!("    {}", line.into_owned()),
                Style::default().fg(Color::Red),
            )));
        }
        lines
    })
}
