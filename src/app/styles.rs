//! Style roles for session output, mapping logical names to `colored::Color`

use colored::{Color, Colorize};

// Macro defines the enum variants and their associated colour Option.
macro_rules! style {
    ( $( $variant:ident => $color:expr ),+ $(,)? ) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum StyleRole { $( $variant ),+ }

        impl StyleRole {
            pub fn color(self) -> Option<Color> {
                match self { $( StyleRole::$variant => $color ),+ }
            }
        }
    };
}

style! {
    Ready => Some(Color::Cyan),
    Released => Some(Color::Green),
    Status => Some(Color::Yellow),
    Abandoned => Some(Color::Red),
    QueueName => Some(Color::BrightWhite),
}

impl StyleRole {
    /// Apply the role's colour when `enabled`, otherwise return `text` unchanged
    pub fn paint(self, text: &str, enabled: bool) -> String {
        match (enabled, self.color()) {
            (true, Some(color)) => text.color(color).to_string(),
            _ => text.to_string(),
        }
    }
}
