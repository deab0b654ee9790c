use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

use crate::field::PickerColumn;

use super::{
    super::view::PickerRender,
    layout::{columns, popup_rect},
};

const PICKER_WIDTH: u16 = 24;
const PICKER_HEIGHT: u16 = 12;

/// List positions that survive between frames while the picker is open.
#[derive(Debug, Default)]
pub struct PickerViewState {
    pub hours: ListState,
    pub minutes: ListState,
}

pub fn render_picker(frame: &mut Frame<'_>, picker: &PickerRender, view: &mut PickerViewState) {
    let width = PICKER_WIDTH.min(frame.area().width.saturating_sub(2).max(1));
    let height = PICKER_HEIGHT.min(frame.area().height.max(3));
    let area = popup_rect(frame.area(), width, height);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(picker.title.clone())
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = columns(inner, 2);
    let window = inner.height as usize;
    if let Some((hour_row, minute_row)) = picker.scroll_to {
        *view.hours.offset_mut() = centered_offset(hour_row, window);
        *view.minutes.offset_mut() = centered_offset(minute_row, window);
    }

    view.hours.select(Some(picker.hour_cursor));
    view.minutes.select(Some(picker.minute_cursor));
    render_column(
        frame,
        halves[0],
        &picker.hours,
        picker.selected_hour,
        picker.column == PickerColumn::Hours,
        &mut view.hours,
    );
    render_column(
        frame,
        halves[1],
        &picker.minutes,
        picker.selected_minute,
        picker.column == PickerColumn::Minutes,
        &mut view.minutes,
    );
}

fn render_column(
    frame: &mut Frame<'_>,
    area: Rect,
    labels: &[String],
    selected: Option<usize>,
    focused: bool,
    state: &mut ListState,
) {
    let items: Vec<ListItem<'static>> = labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let style = if Some(index) == selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(label.clone()).style(style)
        })
        .collect();
    let highlight = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let list = List::new(items)
        .highlight_style(highlight)
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, state);
}

fn centered_offset(row: usize, window: usize) -> usize {
    row.saturating_sub(window / 2)
}
