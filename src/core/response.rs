//! Transport-neutral replies and keyboards
//!
//! Handlers return a [`Reply`]; the Discord adapter decides how to render it.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 2.0.0: Reply/Keyboard model replaces direct serenity builders in handlers
//! - 1.0.0: Message length helpers

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// Action code carried by inert cells (grid padding, headers)
pub const IGNORE_ACTION: &str = "ignore";

/// One tappable (or inert) cell of a keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    /// `None` for inert cells
    pub action: Option<String>,
}

impl Button {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: Some(action.into()),
        }
    }

    pub fn inert(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: None,
        }
    }

    pub fn is_inert(&self) -> bool {
        self.action.is_none()
    }
}

/// Rows of buttons, rendered top to bottom
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row; empty rows are dropped
    pub fn row(mut self, row: Vec<Button>) -> Self {
        if !row.is_empty() {
            self.rows.push(row);
        }
        self
    }

    /// Keyboard with one button per row
    pub fn column(buttons: impl IntoIterator<Item = Button>) -> Self {
        buttons
            .into_iter()
            .fold(Self::new(), |kb, button| kb.row(vec![button]))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every action code reachable from this keyboard
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .flatten()
            .filter_map(|button| button.action.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub keyboard: Keyboard,
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Keyboard::default(),
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }
}

/// What the transport should do in response to an inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Post a new message
    Send(OutgoingMessage),
    /// Replace the message the interaction came from
    Edit(OutgoingMessage),
    /// Short notice shown only to the acting user; the source message is left as is
    Alert(String),
    /// Acknowledge the interaction without any visible change
    Ack,
}

impl Reply {
    pub fn send(text: impl Into<String>) -> Self {
        Reply::Send(OutgoingMessage::text(text))
    }

    pub fn edit(text: impl Into<String>) -> Self {
        Reply::Edit(OutgoingMessage::text(text))
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Reply::Alert(text.into())
    }

    pub fn text(&self) -> &str {
        match self {
            Reply::Send(msg) | Reply::Edit(msg) => &msg.text,
            Reply::Alert(text) => text,
            Reply::Ack => "",
        }
    }

    pub fn keyboard(&self) -> Option<&Keyboard> {
        match self {
            Reply::Send(msg) | Reply::Edit(msg) => Some(&msg.keyboard),
            Reply::Alert(_) | Reply::Ack => None,
        }
    }
}

/// Truncate text to fit message limit, adding ellipsis if needed
pub fn truncate_for_message(text: &str) -> String {
    if text.len() <= MESSAGE_LIMIT {
        text.to_string()
    } else {
        let mut end = MESSAGE_LIMIT - 3;
        while !text.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}
