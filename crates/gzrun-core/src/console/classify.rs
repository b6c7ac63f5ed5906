use std::fmt;

/// Category of an output chunk, decided by its leading text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Pickup,
    Item,
    Save,
    PowerUp,
    Map,
    Plain,
}

/// Visual treatment of a console row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MessageStyle {
    /// `0xRRGGBB`, or `None` for the default text color.
    pub color: Option<u32>,
    /// Multiplier on the default font size.
    pub font_scale: f32,
}

impl MessageStyle {
    pub const DEFAULT: MessageStyle = MessageStyle {
        color: None,
        font_scale: 1.0,
    };
}

/// Ordered prefix table. The first matching prefix wins.
pub const PREFIX_RULES: &[(&str, MessageKind)] = &[
    ("Picked up", MessageKind::Pickup),
    ("You got", MessageKind::Item),
    ("game saved", MessageKind::Save),
    ("Berserk!", MessageKind::PowerUp),
    ("A chainsaw", MessageKind::PowerUp),
    ("map", MessageKind::Map),
];

/// Classify a chunk by literal, case-sensitive prefix.
pub fn classify(text: &str) -> MessageKind {
    PREFIX_RULES
        .iter()
        .find(|(prefix, _)| text.starts_with(prefix))
        .map(|(_, kind)| *kind)
        .unwrap_or(MessageKind::Plain)
}

impl MessageKind {
    pub fn style(self) -> MessageStyle {
        match self {
            MessageKind::Pickup => MessageStyle {
                color: Some(0x3193ff),
                font_scale: 1.0,
            },
            MessageKind::Item => MessageStyle {
                color: Some(0x22cc22),
                font_scale: 1.0,
            },
            MessageKind::Save => MessageStyle {
                color: Some(0xffff00),
                font_scale: 1.0,
            },
            MessageKind::PowerUp => MessageStyle {
                color: Some(0xff9700),
                font_scale: 1.0,
            },
            MessageKind::Map => MessageStyle {
                color: Some(0xcd46ff),
                font_scale: 1.33,
            },
            MessageKind::Plain => MessageStyle::DEFAULT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Pickup => "pickup",
            MessageKind::Item => "item",
            MessageKind::Save => "save",
            MessageKind::PowerUp => "power_up",
            MessageKind::Map => "map",
            MessageKind::Plain => "plain",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
