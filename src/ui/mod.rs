//! Screens
//!
//! - `home`: static welcome content and the external link
//! - `relax`: the interactive orb screen

pub mod home;
pub mod relax;

pub use home::HomeScreen;
pub use relax::RelaxScreen;

/// Top-level screens, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Relax,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::Home, Screen::Relax];

    /// Tab label
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Relax => "Relax",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_start_matches('#').to_lowercase().as_str() {
            "home" | "" => Some(Screen::Home),
            "relax" | "game" => Some(Screen::Relax),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_parse() {
        assert_eq!(Screen::from_str("#relax"), Some(Screen::Relax));
        assert_eq!(Screen::from_str("Game"), Some(Screen::Relax));
        assert_eq!(Screen::from_str(""), Some(Screen::Home));
        assert_eq!(Screen::from_str("settings"), None);
        for s in Screen::ALL {
            assert_eq!(Screen::from_str(s.as_str()), Some(s));
        }
    }
}
