/// Keystroke-level operations a host feeds into a field.
///
/// Positions are char indices into the display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Typed character or pasted text, inserted at the caret.
    Insert(String),
    Backspace,
    Delete,
    Clear,
    /// The host already applied the edit and reports the raw text and caret.
    Input { raw: String, caret: usize },
    Left,
    Right,
    Home,
    End,
    SetCaret(usize),
}

impl EditOp {
    pub fn insert(text: impl Into<String>) -> Self {
        EditOp::Insert(text.into())
    }

    pub fn input(raw: impl Into<String>, caret: usize) -> Self {
        EditOp::Input {
            raw: raw.into(),
            caret,
        }
    }

    pub fn changes_text(&self) -> bool {
        matches!(
            self,
            EditOp::Insert(_) | EditOp::Backspace | EditOp::Delete | EditOp::Clear | EditOp::Input { .. }
        )
    }
}

/// What an op does to the display before the pipeline reshapes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Applied {
    Text { raw: String, caret: usize },
    Caret(usize),
    Noop,
}

/// Apply `op` to `display`. `floor` is the first editable position; carets
/// left of it are pulled forward so a literal prefix is never edited.
pub(crate) fn apply(op: &EditOp, display: &str, caret: usize, floor: usize) -> Applied {
    let chars: Vec<char> = display.chars().collect();
    let len = chars.len();
    let floor = floor.min(len);
    let caret = caret.clamp(floor, len);

    match op {
        EditOp::Insert(text) => {
            if text.is_empty() {
                return Applied::Noop;
            }
            let mut raw: String = chars[..caret].iter().collect();
            raw.push_str(text);
            raw.extend(&chars[caret..]);
            Applied::Text {
                raw,
                caret: caret + text.chars().count(),
            }
        }
        EditOp::Backspace => {
            if caret <= floor {
                return Applied::Noop;
            }
            let raw: String = chars[..caret - 1].iter().chain(&chars[caret..]).collect();
            Applied::Text {
                raw,
                caret: caret - 1,
            }
        }
        EditOp::Delete => {
            if caret >= len {
                return Applied::Noop;
            }
            let raw: String = chars[..caret].iter().chain(&chars[caret + 1..]).collect();
            Applied::Text { raw, caret }
        }
        EditOp::Clear => Applied::Text {
            raw: String::new(),
            caret: 0,
        },
        EditOp::Input { raw, caret } => Applied::Text {
            raw: raw.clone(),
            caret: (*caret).min(raw.chars().count()),
        },
        EditOp::Left => Applied::Caret(caret.saturating_sub(1).max(floor)),
        EditOp::Right => Applied::Caret((caret + 1).min(len)),
        EditOp::Home => Applied::Caret(floor),
        EditOp::End => Applied::Caret(len),
        EditOp::SetCaret(target) => Applied::Caret((*target).clamp(floor, len)),
    }
}
