use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
};

use crate::form::FormState;

use super::fields::render_fields;

pub fn render_body(frame: &mut Frame<'_>, area: Rect, form_state: &FormState, enable_cursor: bool) {
    if form_state.is_empty() {
        let placeholder = Paragraph::new("This form has no fields")
            .block(Block::default().title(form_state.title.clone()).borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    }
    render_fields(frame, area, form_state, enable_cursor);
}
