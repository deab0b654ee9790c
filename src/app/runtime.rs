use std::sync::Arc;

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use jsonschema::Validator;
use ratatui::layout::Rect;
use serde_json::Value;
use tracing::debug;

use crate::{
    domain::FieldKind,
    field::{EditOp, PickerColumn, TimePicker},
    form::{FormCommand, FormEngine, FormState, apply_command},
    presentation::{self, PickerRender, PickerViewState, UiContext},
};

use super::{
    input::{AppCommand, CommandDispatch, InputRouter, PickerCommand},
    keymap::{KeymapContext, KeymapStore},
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
    validation::{ValidationOutcome, validate_form},
};

pub(crate) struct App {
    form_state: FormState,
    validator: Validator,
    options: UiOptions,
    status: StatusLine,
    global_errors: Vec<String>,
    validation_errors: usize,
    exit_armed: bool,
    should_quit: bool,
    result: Option<Value>,
    picker: Option<TimePicker>,
    picker_view: PickerViewState,
    input_router: InputRouter,
    keymap_store: Arc<KeymapStore>,
}

impl App {
    pub fn new(form_state: FormState, validator: Validator, options: UiOptions) -> Self {
        let keymap_store = options.keymap_store.clone();
        Self {
            form_state,
            validator,
            options,
            status: StatusLine::new(),
            global_errors: Vec::new(),
            validation_errors: 0,
            exit_armed: false,
            should_quit: false,
            result: None,
            picker: None,
            picker_view: PickerViewState::default(),
            input_router: InputRouter::new(keymap_store.clone()),
            keymap_store,
        }
    }

    pub fn run(&mut self) -> Result<Value> {
        let mut terminal = TerminalGuard::new()?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Paste(text) => self.handle_paste(text),
                Event::Resize(width, height) => {
                    terminal.resize(Rect::new(0, 0, width, height))?;
                }
                Event::Mouse(_) | Event::FocusGained | Event::FocusLost => {}
            }
        }

        self.result
            .take()
            .ok_or_else(|| anyhow!("user exited without saving"))
    }

    fn context(&self) -> KeymapContext {
        if self.picker.is_some() {
            KeymapContext::Picker
        } else {
            KeymapContext::Default
        }
    }

    fn current_help_text(&self) -> Option<String> {
        if !self.options.show_help {
            return None;
        }
        self.keymap_store.help_text(self.context())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let help = self.current_help_text();
        let picker = self.picker.as_mut().map(|picker| {
            let scroll_to = picker
                .take_scroll_request()
                .map(|request| (request.hour_row, request.minute_row));
            PickerRender {
                title: "Time".to_string(),
                hours: picker.hour_labels(),
                minutes: picker.minute_labels(),
                column: picker.column(),
                hour_cursor: picker.cursor_row(PickerColumn::Hours),
                minute_cursor: picker.cursor_row(PickerColumn::Minutes),
                selected_hour: picker.selected_hour_row(),
                selected_minute: picker.selected_minute_row(),
                scroll_to,
            }
        });

        presentation::draw(
            frame,
            UiContext {
                form_state: &self.form_state,
                status_message: self.status.message(),
                dirty: self.form_state.is_dirty(),
                error_count: self.validation_errors,
                help: help.as_deref(),
                global_errors: &self.global_errors,
                focus_label: None,
                picker,
            },
            &mut self.picker_view,
        );
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.input_router.classify(&key, self.context()) {
            CommandDispatch::Form(command) => {
                self.exit_armed = false;
                self.dispatch_form_command(command);
            }
            CommandDispatch::App(command) => self.handle_app_command(command),
            CommandDispatch::Picker(command) => self.handle_picker_command(command),
            CommandDispatch::None => {}
        }
    }

    fn handle_paste(&mut self, text: String) {
        if self.picker.is_some() {
            return;
        }
        self.exit_armed = false;
        self.dispatch_form_command(FormCommand::Edit(EditOp::Insert(text)));
    }

    fn dispatch_form_command(&mut self, command: FormCommand) {
        let edits = matches!(command, FormCommand::Edit(_) | FormCommand::Pick(_));
        let resets = matches!(command, FormCommand::Reset);
        let change = if self.options.auto_validate {
            FormEngine::new(&mut self.form_state, &self.validator).dispatch(command)
        } else {
            apply_command(&mut self.form_state, command)
        };

        let label = self
            .form_state
            .focused_field()
            .map(|entry| entry.label().to_string())
            .unwrap_or_default();
        if let Some(change) = change {
            self.status.value_updated(&label, &change.wire());
        } else if resets {
            self.global_errors.clear();
            self.status.form_reset();
        } else if edits {
            self.status.editing(&label);
        }
        self.validation_errors = self.form_state.error_count();
    }

    fn handle_app_command(&mut self, command: AppCommand) {
        match command {
            AppCommand::Save => {
                self.exit_armed = false;
                self.on_save();
            }
            AppCommand::Quit => self.on_exit(),
            AppCommand::ResetStatus => {
                self.exit_armed = false;
                self.status.ready();
            }
            AppCommand::OpenPicker => self.open_picker(),
        }
    }

    fn open_picker(&mut self) {
        let Some(entry) = self.form_state.focused_field() else {
            return;
        };
        if entry.spec.kind != FieldKind::Time || entry.field.is_disabled() {
            self.form_state.focus_next_field();
            return;
        }
        let wire = entry
            .field
            .canonical()
            .map(|value| value.to_wire())
            .unwrap_or_default();
        let mut picker = TimePicker::from_value(&wire, self.options.minute_step);
        picker.open();
        self.picker = Some(picker);
        self.status.picking();
    }

    fn handle_picker_command(&mut self, command: PickerCommand) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        match command {
            PickerCommand::Move(delta) => picker.move_cursor(delta),
            PickerCommand::SwitchColumn => picker.switch_column(),
            PickerCommand::Confirm => {
                let finished = picker.column() == PickerColumn::Minutes;
                let chosen = picker.confirm();
                if !finished {
                    picker.switch_column();
                }
                if let Some(time) = chosen {
                    debug!(time = %time, "picker selection");
                    self.dispatch_form_command(FormCommand::Pick(time.to_string()));
                }
                if finished {
                    self.close_picker();
                }
            }
            PickerCommand::Close => {
                self.close_picker();
                self.status.ready();
            }
        }
    }

    fn close_picker(&mut self) {
        if let Some(mut picker) = self.picker.take() {
            picker.close();
        }
        self.picker_view = PickerViewState::default();
    }

    fn on_save(&mut self) {
        if let Some(value) = self.run_validation() {
            self.status
                .set_raw("Record saved. Press Ctrl+Q to exit.");
            self.result = Some(value);
            self.form_state.mark_clean();
            self.exit_armed = false;
        }
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.form_state.is_dirty() && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
    }

    fn run_validation(&mut self) -> Option<Value> {
        match validate_form(&mut self.form_state, &self.validator) {
            ValidationOutcome::Valid(value) => {
                self.global_errors.clear();
                self.validation_errors = 0;
                self.status.validation_passed();
                Some(value)
            }
            ValidationOutcome::Invalid {
                issues,
                global_errors,
            } => {
                self.global_errors = global_errors;
                self.validation_errors = issues;
                self.status.issues_remaining(issues);
                None
            }
            ValidationOutcome::BuildError { message } => {
                self.global_errors = vec![message.clone()];
                self.validation_errors = self.form_state.error_count().max(1);
                self.status.set_raw(message);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use jsonschema::validator_for;
    use serde_json::json;

    use super::*;
    use crate::form::payment_form;

    fn payment_app() -> App {
        let layout = payment_form();
        let validator = validator_for(&layout.record_schema()).unwrap();
        App::new(FormState::from_layout(&layout), validator, UiOptions::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn typing_fills_the_focused_field() {
        let mut app = payment_app();
        type_text(&mut app, "901234567");
        let phone = app.form_state.focused_field().unwrap();
        assert_eq!(phone.field.display(), "+998 90 123 45 67");
        assert_eq!(app.status.message(), "Phone = 901234567");
    }

    #[test]
    fn enter_on_time_field_opens_picker_and_commits() {
        let mut app = payment_app();
        app.form_state.field_index = 3;
        press(&mut app, KeyCode::Enter);
        assert!(app.picker.is_some());
        assert_eq!(app.context(), KeymapContext::Picker);

        // hour 02, then minute 10
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form_state.focused_field().unwrap().field.display(), "02:00");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(app.picker.is_none());
        assert_eq!(app.form_state.values()["time"].to_wire(), "02:10");
    }

    #[test]
    fn enter_elsewhere_moves_focus() {
        let mut app = payment_app();
        press(&mut app, KeyCode::Enter);
        assert!(app.picker.is_none());
        assert_eq!(app.form_state.field_index, 1);
    }

    #[test]
    fn save_requires_complete_record() {
        let mut app = payment_app();
        app.on_save();
        assert!(app.result.is_none());
        assert!(app.validation_errors > 0);

        type_text(&mut app, "901234567");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "12032024");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "1500");
        app.on_save();
        assert_eq!(
            app.result,
            Some(json!({ "phone": "901234567", "date": "2024-03-12", "amount": 1500.0 }))
        );
        assert!(!app.form_state.is_dirty());
        app.on_exit();
        assert!(app.should_quit);
    }

    #[test]
    fn dirty_exit_needs_confirmation() {
        let mut app = payment_app();
        type_text(&mut app, "9");
        app.on_exit();
        assert!(!app.should_quit);
        app.on_exit();
        assert!(app.should_quit);
        assert!(app.result.is_none());
    }

    #[test]
    fn paste_lands_as_one_edit() {
        let mut app = payment_app();
        app.handle_paste("+998 (90) 123-45-67".to_string());
        assert_eq!(
            app.form_state.focused_field().unwrap().field.display(),
            "+998 90 123 45 67"
        );
    }
}

#[cfg(test)]
impl App {
    pub(crate) fn form_state_for_test(&self) -> &FormState {
        &self.form_state
    }
}
