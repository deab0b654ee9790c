mod body;
mod fields;
mod footer;
mod layout;
mod picker;

pub use body::render_body;
pub use footer::render_footer;
pub use picker::{PickerViewState, render_picker};
