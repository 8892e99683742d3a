//! Record kinds edited by the back office

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::TimeWindow;

/// One course line item inside a campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub original_price: u32,
    pub discounted_price: u32,
}

impl Course {
    /// Rounded discount percentage for the card badge.
    pub fn discount_percent(&self) -> u32 {
        if self.original_price == 0 {
            return 0;
        }
        let saved = self.original_price.saturating_sub(self.discounted_price) as f64;
        (saved / self.original_price as f64 * 100.0).round() as u32
    }
}

/// A time-boxed promotional period with its course line items. The title may
/// carry HTML from the rich-text admin editor; strip it before display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Missing start means the campaign is already running.
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
    pub is_active: bool,
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Campaign {
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

/// A promotional gift item shown in the marquee and the popup overlays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftItem {
    pub id: String,
    pub name: String,
    pub emoji: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub is_visible: bool,
    pub show_in_popups: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Numbering script for the countdown digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerLanguage {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "bn")]
    Bn,
}

/// Presentation settings for the kiosk screen. Exactly one theme is active
/// at a time; when none is, the display falls back to `Default`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeSettings {
    pub id: String,
    pub name: String,
    pub header_text_1: String,
    pub header_text_2: String,
    pub background_style: String,
    pub timer_language: TimerLanguage,
    pub show_gift_marquee: bool,
    pub show_gift_popups: bool,
    /// Course card rotation interval, seconds.
    pub card_rotation_interval: u64,
    /// Kiosk hard-refresh interval, minutes.
    pub auto_reload_interval: u64,
    pub is_active: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: "Default Theme".to_string(),
            header_text_1: "Ramadan Special".to_string(),
            header_text_2: "150 Hours".to_string(),
            background_style: "default".to_string(),
            timer_language: TimerLanguage::Bn,
            show_gift_marquee: true,
            show_gift_popups: true,
            card_rotation_interval: 6,
            auto_reload_interval: 20,
            is_active: true,
        }
    }
}

/// An uploaded background image; at most one is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundImage {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// Creation/update payloads. Records are created inactive; activation is a
// separate operation so the single-active invariant has one owner.

#[derive(Debug, Clone, Deserialize)]
pub struct NewCampaign {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub courses: Vec<NewCourse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCourse {
    pub title: String,
    pub original_price: u32,
    pub discounted_price: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGiftItem {
    pub name: String,
    pub emoji: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub is_visible: bool,
    pub show_in_popups: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTheme {
    pub name: String,
    pub header_text_1: String,
    pub header_text_2: String,
    pub background_style: String,
    pub timer_language: TimerLanguage,
    pub show_gift_marquee: bool,
    pub show_gift_popups: bool,
    pub card_rotation_interval: u64,
    pub auto_reload_interval: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBackground {
    pub name: String,
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_percent() {
        let course = Course {
            id: "course-1".to_string(),
            title: "Full Stack Web Development".to_string(),
            original_price: 500,
            discounted_price: 199,
        };
        assert_eq!(course.discount_percent(), 60);
    }

    #[test]
    fn test_discount_percent_zero_price() {
        let course = Course {
            id: "course-1".to_string(),
            title: "Free".to_string(),
            original_price: 0,
            discounted_price: 0,
        };
        assert_eq!(course.discount_percent(), 0);
    }

    #[test]
    fn test_default_theme_matches_fallback() {
        let theme = ThemeSettings::default();
        assert_eq!(theme.card_rotation_interval, 6);
        assert_eq!(theme.auto_reload_interval, 20);
        assert_eq!(theme.timer_language, TimerLanguage::Bn);
        assert!(theme.show_gift_marquee && theme.show_gift_popups);
    }
}
