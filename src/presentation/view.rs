use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{field::PickerColumn, form::FormState};

use super::components::{PickerViewState, render_body, render_footer, render_picker};

pub struct UiContext<'a> {
    pub form_state: &'a FormState,
    pub status_message: &'a str,
    pub dirty: bool,
    pub error_count: usize,
    pub help: Option<&'a str>,
    pub global_errors: &'a [String],
    pub focus_label: Option<&'a str>,
    pub picker: Option<PickerRender>,
}

/// Snapshot of an open time picker.
pub struct PickerRender {
    pub title: String,
    pub hours: Vec<String>,
    pub minutes: Vec<String>,
    pub column: PickerColumn,
    pub hour_cursor: usize,
    pub minute_cursor: usize,
    pub selected_hour: Option<usize>,
    pub selected_minute: Option<usize>,
    /// Present on the first frame after opening.
    pub scroll_to: Option<(usize, usize)>,
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>, picker_view: &mut PickerViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(4)])
        .split(frame.area());

    let cursor_enabled = ctx.picker.is_none();
    render_body(frame, chunks[0], ctx.form_state, cursor_enabled);
    render_footer(frame, chunks[1], &ctx);

    if let Some(picker) = &ctx.picker {
        render_picker(frame, picker, picker_view);
    }
}
