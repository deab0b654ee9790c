use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{field::EditOp, form::FormCommand};

use super::keymap::{KeymapContext, KeymapStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Save,
    Quit,
    ResetStatus,
    OpenPicker,
    ClearField,
    ResetForm,
    FieldStep(i32),
    PickerMove(i32),
    PickerSwitch,
    PickerConfirm,
    PickerClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AppCommand {
    Save,
    Quit,
    ResetStatus,
    OpenPicker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PickerCommand {
    Move(i32),
    SwitchColumn,
    Confirm,
    Close,
}

#[derive(Debug, Clone)]
pub(crate) enum CommandDispatch {
    Form(FormCommand),
    App(AppCommand),
    Picker(PickerCommand),
    None,
}

/// Turns key events into commands for whichever surface has focus.
#[derive(Debug, Clone)]
pub(crate) struct InputRouter {
    keymap: Arc<KeymapStore>,
}

impl InputRouter {
    pub(crate) fn new(keymap: Arc<KeymapStore>) -> Self {
        Self { keymap }
    }

    pub(crate) fn classify(&self, key: &KeyEvent, context: KeymapContext) -> CommandDispatch {
        if let Some(action) = self.keymap.classify(key, context) {
            return dispatch_action(action);
        }
        match context {
            KeymapContext::Default => edit_op_for(key)
                .map(|op| CommandDispatch::Form(FormCommand::Edit(op)))
                .unwrap_or(CommandDispatch::None),
            KeymapContext::Picker => CommandDispatch::None,
        }
    }
}

fn dispatch_action(action: KeyAction) -> CommandDispatch {
    match action {
        KeyAction::Save => CommandDispatch::App(AppCommand::Save),
        KeyAction::Quit => CommandDispatch::App(AppCommand::Quit),
        KeyAction::ResetStatus => CommandDispatch::App(AppCommand::ResetStatus),
        KeyAction::OpenPicker => CommandDispatch::App(AppCommand::OpenPicker),
        KeyAction::ClearField => CommandDispatch::Form(FormCommand::Edit(EditOp::Clear)),
        KeyAction::ResetForm => CommandDispatch::Form(FormCommand::Reset),
        KeyAction::FieldStep(delta) if delta < 0 => {
            CommandDispatch::Form(FormCommand::FocusPrevField)
        }
        KeyAction::FieldStep(_) => CommandDispatch::Form(FormCommand::FocusNextField),
        KeyAction::PickerMove(delta) => CommandDispatch::Picker(PickerCommand::Move(delta)),
        KeyAction::PickerSwitch => CommandDispatch::Picker(PickerCommand::SwitchColumn),
        KeyAction::PickerConfirm => CommandDispatch::Picker(PickerCommand::Confirm),
        KeyAction::PickerClose => CommandDispatch::Picker(PickerCommand::Close),
    }
}

/// Keystrokes that edit the focused field directly.
pub(crate) fn edit_op_for(key: &KeyEvent) -> Option<EditOp> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    let op = match key.code {
        KeyCode::Char(ch) => EditOp::Insert(ch.to_string()),
        KeyCode::Backspace => EditOp::Backspace,
        KeyCode::Delete => EditOp::Delete,
        KeyCode::Left => EditOp::Left,
        KeyCode::Right => EditOp::Right,
        KeyCode::Home => EditOp::Home,
        KeyCode::End => EditOp::End,
        _ => return None,
    };
    Some(op)
}
