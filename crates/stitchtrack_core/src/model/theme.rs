//! Selectable UI theme identifiers.
//!
//! Membership is a closed enumeration; color values and styling derived from
//! a theme are presentation concerns and live outside this crate.

/// Closed set of selectable themes, persisted by raw identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppTheme {
    #[default]
    SeaCottage,
    RetroSummer,
    DustyRose,
}

impl AppTheme {
    pub const ALL: [AppTheme; 3] = [
        AppTheme::SeaCottage,
        AppTheme::RetroSummer,
        AppTheme::DustyRose,
    ];

    /// Identifier stored in settings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SeaCottage => "sea_cottage",
            Self::RetroSummer => "retro_summer",
            Self::DustyRose => "dusty_rose",
        }
    }

    /// Maps a stored identifier back to a theme.
    ///
    /// The retired `purple` identifier maps to `DustyRose`, its renamed
    /// successor; anything else falls back to the default theme.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "sea_cottage" => Self::SeaCottage,
            "retro_summer" => Self::RetroSummer,
            "dusty_rose" | "purple" => Self::DustyRose,
            _ => Self::default(),
        }
    }
}
