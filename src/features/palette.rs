use crate::foundation::core::Color;

/// A palette entry with a display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NamedColor {
    /// Display name reported to the host.
    pub name: &'static str,
    /// The colour itself.
    pub color: Color,
}

/// Background choices, in draw-index order.
pub const BACKGROUNDS: [NamedColor; 4] = [
    NamedColor {
        name: "Serena",
        color: Color::hex("#f9f9fb"),
    },
    NamedColor {
        name: "Lavender",
        color: Color::hex("#e5dfea"),
    },
    NamedColor {
        name: "Seashell",
        color: Color::hex("#EDD8DF"),
    },
    NamedColor {
        name: "Arizona sky",
        color: Color::hex("#eef8fe"),
    },
];

/// Line colours, in draw-index order. Lines may repeat a colour.
pub const FOREGROUNDS: [Color; 8] = [
    Color::hex("#f5a04e"),
    Color::hex("#931a1e"),
    Color::hex("#fad2db"),
    Color::hex("#f2e73d"),
    Color::hex("#14b9dc"),
    Color::hex("#d65a9c"),
    Color::hex("#f2f8ef"),
    Color::hex("#395370"),
];
