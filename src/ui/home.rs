//! Home screen: welcome copy and the "Begin Your Journey" link

use crate::platform::{PlatformError, UrlOpener};

pub const TITLE: &str = "Find Your Inner Peace";

pub const MESSAGES: [&str; 3] = [
    "Welcome to your personal sanctuary of tranquility. In today's fast-paced world, \
     finding moments of peace can feel impossible. That's why we created this space - just for you.",
    "Our interactive relaxation tools are designed to help you disconnect from daily stress \
     and find your center. Whether you have 5 minutes or an hour, these simple yet effective \
     exercises can help calm your mind and restore your energy.",
    "Try our mesmerizing particle game in the Relax tab - where each touch creates a \
     beautiful display of floating orbs. Watch as they dance across your screen, \
     their gentle movements helping to wash away the tension of your day.",
];

pub const HIGHLIGHT: &str = "Remember: Taking time for yourself isn't selfish - it's essential. \
     Your peace of mind matters, and we're here to help you find it.";

pub const BUTTON_LABEL: &str = "Begin Your Journey";

pub const JOURNEY_URL: &str = "https://as1.ftcdn.net/v2/jpg/04/83/03/58/1000_F_483035899_9mafUWsv7OOIeXEXlFtJeP7kR6yju9g4.jpg";

/// A paragraph of body text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paragraph {
    pub text: &'static str,
    /// Rendered emphasized (italic, slightly larger)
    pub highlight: bool,
}

/// Static content of the home screen
#[derive(Debug, Clone)]
pub struct HomeScreen {
    pub title: &'static str,
    pub paragraphs: Vec<Paragraph>,
    pub button_label: &'static str,
    pub journey_url: &'static str,
}

impl Default for HomeScreen {
    fn default() -> Self {
        let mut paragraphs: Vec<Paragraph> = MESSAGES
            .iter()
            .map(|&text| Paragraph {
                text,
                highlight: false,
            })
            .collect();
        paragraphs.push(Paragraph {
            text: HIGHLIGHT,
            highlight: true,
        });
        Self {
            title: TITLE,
            paragraphs,
            button_label: BUTTON_LABEL,
            journey_url: JOURNEY_URL,
        }
    }
}

impl HomeScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Button action: open the journey link on the host
    pub fn begin_journey(&self, opener: &mut impl UrlOpener) -> Result<(), PlatformError> {
        log::info!("begin journey");
        opener.open_url(self.journey_url)
    }
}
