use crate::{
    domain::FieldKind,
    engine::{CanonicalValue, ClockTime},
};

pub const DEFAULT_MINUTE_STEP: u8 = 5;
const HOURS: u8 = 24;
const MINUTES: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerColumn {
    Hours,
    Minutes,
}

/// Rows the host should bring into view once the picker has been laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub hour_row: usize,
    pub minute_row: usize,
}

/// Two-column hour/minute chooser backing time fields.
///
/// Choices come from fixed lists, so a picked value is always complete.
#[derive(Debug, Clone)]
pub struct TimePicker {
    minute_step: u8,
    hour: Option<u8>,
    minute: Option<u8>,
    column: PickerColumn,
    hour_cursor: usize,
    minute_cursor: usize,
    open: bool,
    pending_scroll: Option<ScrollRequest>,
}

impl Default for TimePicker {
    fn default() -> Self {
        Self::new(DEFAULT_MINUTE_STEP)
    }
}

impl TimePicker {
    pub fn new(minute_step: u8) -> Self {
        Self {
            minute_step: minute_step.clamp(1, MINUTES - 1),
            hour: None,
            minute: None,
            column: PickerColumn::Hours,
            hour_cursor: 0,
            minute_cursor: 0,
            open: false,
            pending_scroll: None,
        }
    }

    /// Seed from a canonical `HH:MM`; unreadable values leave nothing selected.
    pub fn from_value(wire: &str, minute_step: u8) -> Self {
        let mut picker = Self::new(minute_step);
        if let Some(CanonicalValue::Time(time)) = FieldKind::Time.codec().parse_wire(wire) {
            picker.hour = Some(time.hour());
            picker.minute = Some(time.minute());
        }
        picker
    }

    pub fn minute_step(&self) -> u8 {
        self.minute_step
    }

    pub fn hour_labels(&self) -> Vec<String> {
        (0..HOURS).map(|hour| format!("{hour:02}")).collect()
    }

    pub fn minute_labels(&self) -> Vec<String> {
        (0..MINUTES)
            .step_by(self.minute_step as usize)
            .map(|minute| format!("{minute:02}"))
            .collect()
    }

    pub fn selected_hour_row(&self) -> Option<usize> {
        self.hour.map(usize::from)
    }

    /// `None` when nothing is chosen or the minute is off the step grid.
    pub fn selected_minute_row(&self) -> Option<usize> {
        self.minute
            .filter(|minute| minute % self.minute_step == 0)
            .map(|minute| usize::from(minute / self.minute_step))
    }

    pub fn value(&self) -> Option<ClockTime> {
        ClockTime::new(self.hour?, self.minute.unwrap_or(0))
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn column(&self) -> PickerColumn {
        self.column
    }

    pub fn cursor_row(&self, column: PickerColumn) -> usize {
        match column {
            PickerColumn::Hours => self.hour_cursor,
            PickerColumn::Minutes => self.minute_cursor,
        }
    }

    /// Open the picker and schedule a one-shot scroll to the current selection.
    pub fn open(&mut self) {
        self.open = true;
        self.column = PickerColumn::Hours;
        self.hour_cursor = self.selected_hour_row().unwrap_or(0);
        self.minute_cursor = self.selected_minute_row().unwrap_or(0);
        self.pending_scroll = Some(ScrollRequest {
            hour_row: self.hour_cursor,
            minute_row: self.minute_cursor,
        });
    }

    /// Close the picker, cancelling a scroll that has not run yet.
    pub fn close(&mut self) {
        self.open = false;
        self.pending_scroll = None;
    }

    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.pending_scroll.take()
    }

    pub fn switch_column(&mut self) {
        self.column = match self.column {
            PickerColumn::Hours => PickerColumn::Minutes,
            PickerColumn::Minutes => PickerColumn::Hours,
        };
    }

    pub fn move_cursor(&mut self, delta: i32) {
        let (cursor, len) = match self.column {
            PickerColumn::Hours => (&mut self.hour_cursor, usize::from(HOURS)),
            PickerColumn::Minutes => {
                let len = self.minute_labels().len();
                (&mut self.minute_cursor, len)
            }
        };
        let len = len as i32;
        let next = (*cursor as i32 + delta).rem_euclid(len);
        *cursor = next as usize;
    }

    pub fn select_hour(&mut self, hour: u8) -> Option<ClockTime> {
        if hour >= HOURS {
            return None;
        }
        self.hour = Some(hour);
        self.minute.get_or_insert(0);
        self.value()
    }

    pub fn select_minute(&mut self, minute: u8) -> Option<ClockTime> {
        if minute >= MINUTES {
            return None;
        }
        self.minute = Some(minute);
        self.hour.get_or_insert(0);
        self.value()
    }

    /// Select the highlighted row of the focused column.
    pub fn confirm(&mut self) -> Option<ClockTime> {
        match self.column {
            PickerColumn::Hours => self.select_hour(self.hour_cursor as u8),
            PickerColumn::Minutes => {
                let minute = self.minute_cursor as u8 * self.minute_step;
                self.select_minute(minute)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_cover_the_day_in_steps() {
        let picker = TimePicker::default();
        assert_eq!(picker.hour_labels().len(), 24);
        let minutes = picker.minute_labels();
        assert_eq!(minutes.len(), 12);
        assert_eq!(minutes.first().map(String::as_str), Some("00"));
        assert_eq!(minutes.last().map(String::as_str), Some("55"));
    }

    #[test]
    fn selecting_hour_defaults_minute_to_zero() {
        let mut picker = TimePicker::default();
        let time = picker.select_hour(9).unwrap();
        assert_eq!(time.to_string(), "09:00");
        let time = picker.select_minute(35).unwrap();
        assert_eq!(time.to_string(), "09:35");
    }

    #[test]
    fn off_grid_minute_has_no_row() {
        let picker = TimePicker::from_value("10:07", 5);
        assert_eq!(picker.selected_hour_row(), Some(10));
        assert_eq!(picker.selected_minute_row(), None);
        assert_eq!(picker.value().unwrap().to_string(), "10:07");
    }

    #[test]
    fn open_schedules_one_shot_scroll() {
        let mut picker = TimePicker::from_value("14:45", 5);
        picker.open();
        assert_eq!(
            picker.take_scroll_request(),
            Some(ScrollRequest {
                hour_row: 14,
                minute_row: 9
            })
        );
        assert_eq!(picker.take_scroll_request(), None);
    }

    #[test]
    fn close_cancels_pending_scroll() {
        let mut picker = TimePicker::default();
        picker.open();
        picker.close();
        assert!(!picker.is_open());
        assert_eq!(picker.take_scroll_request(), None);
    }

    #[test]
    fn cursor_wraps_and_confirms_focused_column() {
        let mut picker = TimePicker::default();
        picker.open();
        picker.move_cursor(-1);
        assert_eq!(picker.confirm().unwrap().to_string(), "23:00");
        picker.switch_column();
        picker.move_cursor(3);
        assert_eq!(picker.confirm().unwrap().to_string(), "23:15");
    }
}
