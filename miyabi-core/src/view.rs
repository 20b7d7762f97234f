use serde::{Deserialize, Serialize};

/// Screen currently shown. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum View {
    #[default]
    Intro,
    StampBook,
    Locations,
    Prizes,
    Scanner,
}

impl View {
    pub const ALL: [Self; 5] = [
        Self::Intro,
        Self::StampBook,
        Self::Locations,
        Self::Prizes,
        Self::Scanner,
    ];

    /// Whether the bottom navigation bar is shown on this screen.
    #[must_use]
    pub const fn shows_nav_bar(self) -> bool {
        !matches!(self, Self::Intro | Self::Scanner)
    }
}

/// Screens reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavTarget {
    Locations,
    StampBook,
    Prizes,
}

impl NavTarget {
    /// Navigation bar order.
    pub const ALL: [Self; 3] = [Self::Locations, Self::StampBook, Self::Prizes];

    /// i18n key of the tab label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Locations => "nav.locations",
            Self::StampBook => "nav.stamp_book",
            Self::Prizes => "nav.prizes",
        }
    }
}

impl From<NavTarget> for View {
    fn from(target: NavTarget) -> Self {
        match target {
            NavTarget::Locations => Self::Locations,
            NavTarget::StampBook => Self::StampBook,
            NavTarget::Prizes => Self::Prizes,
        }
    }
}
