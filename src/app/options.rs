use std::{sync::Arc, time::Duration};

use anyhow::Result;

use crate::field::DEFAULT_MINUTE_STEP;

use super::keymap::{self, KeymapStore};

#[derive(Debug, Clone)]
pub struct UiOptions {
    pub tick_rate: Duration,
    pub auto_validate: bool,
    pub confirm_exit: bool,
    pub show_help: bool,
    /// Minute granularity offered by the time picker.
    pub minute_step: u8,
    pub(crate) keymap_store: Arc<KeymapStore>,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            auto_validate: true,
            confirm_exit: true,
            show_help: true,
            minute_step: DEFAULT_MINUTE_STEP,
            keymap_store: keymap::default_store(),
        }
    }
}

impl UiOptions {
    pub fn with_auto_validate(mut self, enabled: bool) -> Self {
        self.auto_validate = enabled;
        self
    }

    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn with_confirm_exit(mut self, confirm: bool) -> Self {
        self.confirm_exit = confirm;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_minute_step(mut self, step: u8) -> Self {
        self.minute_step = step.clamp(1, 59);
        self
    }

    /// Replace the built-in bindings with a keymap in the same JSON layout.
    pub fn with_keymap_json(mut self, source: &str) -> Result<Self> {
        self.keymap_store = Arc::new(KeymapStore::from_json(source)?);
        Ok(self)
    }
}
