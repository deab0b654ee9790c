mod components;
mod view;

pub use components::PickerViewState;
pub use view::{PickerRender, UiContext, draw};
