//! Per-screen display state
//!
//! The composition the kiosk renders: active campaign, theme, gift lists and
//! the timing engines. Created when the display loads, rebuilt wholesale on
//! every reload; nothing in here outlives a reload.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::engine::{
    countdown::{to_bengali_digits, CountdownEngine, CountdownStatus, RemainderFields},
    CyclePresenter, PopupPhase, PopupSequencer, PopupTimings,
};
use crate::store::{
    BackgroundImage, Campaign, Course, GiftItem, RecordStore, ThemeSettings, TimerLanguage,
};
use crate::utils::strip_html;

/// One overlay as the renderer sees it.
#[derive(Debug, Clone, Serialize)]
pub struct PopupView {
    pub phase: PopupPhase,
    pub gift: Option<GiftItem>,
}

impl PopupView {
    fn hidden() -> Self {
        Self {
            phase: PopupPhase::Hidden,
            gift: None,
        }
    }
}

/// Everything a thin rendering surface needs for one frame. Recomputed every
/// tick and published over the snapshot channel; renderers poll `GET /screen`.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenSnapshot {
    pub generated_at: DateTime<Utc>,
    pub status: CountdownStatus,
    pub ending_soon: bool,
    pub remainder: RemainderFields,
    /// Same fields with digits in the theme's numbering script.
    pub remainder_display: RemainderFields,
    pub campaign_title: Option<String>,
    pub campaign_start: Option<DateTime<Utc>>,
    pub campaign_end: Option<DateTime<Utc>>,
    pub course: Option<Course>,
    pub course_index: usize,
    pub course_count: usize,
    pub marquee: Vec<GiftItem>,
    pub scratch_card: PopupView,
    pub gift_banner: PopupView,
    pub background: Option<BackgroundImage>,
    pub theme: ThemeSettings,
}

impl ScreenSnapshot {
    /// Idle placeholder published before the first screen load completes.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            generated_at: now,
            status: CountdownStatus::Idle,
            ending_soon: false,
            remainder: zero_fields(),
            remainder_display: zero_fields(),
            campaign_title: None,
            campaign_start: None,
            campaign_end: None,
            course: None,
            course_index: 0,
            course_count: 0,
            marquee: Vec::new(),
            scratch_card: PopupView::hidden(),
            gift_banner: PopupView::hidden(),
            background: None,
            theme: ThemeSettings::default(),
        }
    }
}

fn zero_fields() -> RemainderFields {
    RemainderFields {
        hours: "00".to_string(),
        minutes: "00".to_string(),
        seconds: "00".to_string(),
        milliseconds: None,
        ended: false,
    }
}

pub struct ScreenState {
    campaign: Option<Campaign>,
    visible_gifts: Vec<GiftItem>,
    popup_gifts: Vec<GiftItem>,
    background: Option<BackgroundImage>,
    theme: ThemeSettings,
    countdown: CountdownEngine,
    cards: CyclePresenter,
    scratch_card: PopupSequencer,
    gift_banner: PopupSequencer,
}

impl ScreenState {
    /// Fetch everything the screen needs and arm the engines. A failed
    /// fetch degrades to empty/default data; the screen never refuses to
    /// come up. `track_millis` enables sub-second countdown fields for
    /// fast-tick deployments.
    pub fn load(store: &RecordStore, now: DateTime<Utc>, track_millis: bool) -> Self {
        let campaign = store.active_campaign().unwrap_or_else(|e| {
            error!("Failed to fetch active campaign: {}", e);
            None
        });
        let theme = store.active_theme_or_default().unwrap_or_else(|e| {
            error!("Failed to fetch active theme: {}", e);
            ThemeSettings::default()
        });
        let visible_gifts = store.visible_gifts().unwrap_or_else(|e| {
            error!("Failed to fetch gift items: {}", e);
            Vec::new()
        });
        let popup_gifts = store.popup_gifts().unwrap_or_else(|e| {
            error!("Failed to fetch popup gift items: {}", e);
            Vec::new()
        });
        let background = store.active_background().unwrap_or_else(|e| {
            error!("Failed to fetch active background: {}", e);
            None
        });

        let mut countdown = CountdownEngine::new(track_millis);
        countdown.set_window(campaign.as_ref().map(|c| c.window()));

        let mut cards = CyclePresenter::new(theme.card_rotation_interval);
        let course_count = campaign.as_ref().map(|c| c.courses.len()).unwrap_or(0);
        cards.set_items(course_count, now);

        // The scratch card cycles all visible gifts, the corner banner only
        // the popup-flagged ones; both stay disarmed when the theme hides
        // popups.
        let mut scratch_card = PopupSequencer::new(PopupTimings::scratch_card());
        let mut gift_banner = PopupSequencer::new(PopupTimings::corner_banner());
        if theme.show_gift_popups {
            scratch_card.set_items(visible_gifts.len(), now);
            gift_banner.set_items(popup_gifts.len(), now);
        }

        info!(
            "Screen loaded: campaign={:?}, theme={}, courses={}, gifts={}",
            campaign.as_ref().map(|c| c.id.as_str()),
            theme.name,
            course_count,
            visible_gifts.len()
        );

        Self {
            campaign,
            visible_gifts,
            popup_gifts,
            background,
            theme,
            countdown,
            cards,
            scratch_card,
            gift_banner,
        }
    }

    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    /// Step every engine and assemble the frame.
    pub fn tick(&mut self, now: DateTime<Utc>) -> ScreenSnapshot {
        let countdown = self.countdown.tick(now);
        self.cards.tick(now);
        self.scratch_card.step(now);
        self.gift_banner.step(now);

        let remainder_display = match self.theme.timer_language {
            TimerLanguage::Bn => transliterate(&countdown.fields),
            TimerLanguage::En => countdown.fields.clone(),
        };

        let course = self
            .campaign
            .as_ref()
            .and_then(|c| c.courses.get(self.cards.index()))
            .cloned();

        let marquee = if self.theme.show_gift_marquee {
            self.visible_gifts.clone()
        } else {
            Vec::new()
        };

        ScreenSnapshot {
            generated_at: now,
            status: countdown.status,
            ending_soon: countdown.ending_soon,
            remainder: countdown.fields,
            remainder_display,
            campaign_title: self.campaign.as_ref().map(|c| strip_html(&c.title)),
            campaign_start: self.campaign.as_ref().and_then(|c| c.start_time),
            campaign_end: self.campaign.as_ref().map(|c| c.end_time),
            course,
            course_index: self.cards.index(),
            course_count: self.cards.len(),
            marquee,
            scratch_card: popup_view(&self.scratch_card, &self.visible_gifts),
            gift_banner: popup_view(&self.gift_banner, &self.popup_gifts),
            background: self.background.clone(),
            theme: self.theme.clone(),
        }
    }
}

fn popup_view(seq: &PopupSequencer, items: &[GiftItem]) -> PopupView {
    PopupView {
        phase: seq.phase(),
        gift: seq.current().and_then(|i| items.get(i)).cloned(),
    }
}

fn transliterate(fields: &RemainderFields) -> RemainderFields {
    RemainderFields {
        hours: to_bengali_digits(&fields.hours),
        minutes: to_bengali_digits(&fields.minutes),
        seconds: to_bengali_digits(&fields.seconds),
        milliseconds: fields.milliseconds.as_deref().map(to_bengali_digits),
        ended: fields.ended,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{NewCampaign, NewCourse, NewGiftItem, NewTheme};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn seeded_store() -> RecordStore {
        let store = RecordStore::new();
        let campaign = store
            .create_campaign(NewCampaign {
                title: "<b>Jackpot</b> Offer".to_string(),
                description: None,
                start_time: Some(t0()),
                end_time: t0() + Duration::hours(2),
                courses: vec![
                    NewCourse {
                        title: "Web Development".to_string(),
                        original_price: 500,
                        discounted_price: 199,
                    },
                    NewCourse {
                        title: "Data Science".to_string(),
                        original_price: 600,
                        discounted_price: 249,
                    },
                ],
            })
            .unwrap();
        store.activate_campaign(&campaign.id).unwrap();
        store
            .create_gift(NewGiftItem {
                name: "Smartwatch".to_string(),
                emoji: "⌚".to_string(),
                image_url: None,
                is_visible: true,
                show_in_popups: true,
                sort_order: 1,
            })
            .unwrap();
        store
    }

    #[test]
    fn test_empty_store_loads_idle_default_screen() {
        let store = RecordStore::new();
        let mut screen = ScreenState::load(&store, t0(), false);
        let snap = screen.tick(t0());
        assert_eq!(snap.status, CountdownStatus::Idle);
        assert_eq!(snap.theme.name, "Default Theme");
        assert!(snap.course.is_none());
        assert!(snap.marquee.is_empty());
    }

    #[test]
    fn test_active_campaign_drives_countdown_and_cards() {
        let store = seeded_store();
        let mut screen = ScreenState::load(&store, t0(), false);

        let snap = screen.tick(t0() + Duration::seconds(1));
        assert_eq!(snap.status, CountdownStatus::Active);
        assert_eq!(snap.campaign_title.as_deref(), Some("Jackpot Offer"));
        assert_eq!(snap.course_count, 2);
        assert_eq!(snap.course_index, 0);
        assert_eq!(snap.remainder.hours, "01");
        assert_eq!(snap.remainder.minutes, "59");
        // Default theme is Bengali; display digits are transliterated
        assert_eq!(snap.remainder_display.hours, "০১");

        // Card rotation after the 6s theme interval
        let snap = screen.tick(t0() + Duration::seconds(6));
        assert_eq!(snap.course_index, 1);
        assert_eq!(snap.course.unwrap().title, "Data Science");
    }

    #[test]
    fn test_popups_disabled_by_theme() {
        let store = seeded_store();
        let theme = store
            .create_theme(NewTheme {
                name: "Quiet".to_string(),
                header_text_1: "Ramadan Special".to_string(),
                header_text_2: "150 Hours".to_string(),
                background_style: "default".to_string(),
                timer_language: crate::store::TimerLanguage::En,
                show_gift_marquee: false,
                show_gift_popups: false,
                card_rotation_interval: 6,
                auto_reload_interval: 20,
            })
            .unwrap();
        store.activate_theme(&theme.id).unwrap();

        let mut screen = ScreenState::load(&store, t0(), false);
        // Well past every popup delay; still hidden because the theme says so
        let snap = screen.tick(t0() + Duration::minutes(5));
        assert_eq!(snap.scratch_card.phase, PopupPhase::Hidden);
        assert_eq!(snap.gift_banner.phase, PopupPhase::Hidden);
        assert!(snap.marquee.is_empty());
        assert_eq!(snap.remainder_display.hours, snap.remainder.hours);
    }

    #[test]
    fn test_banner_appears_after_initial_delay() {
        let store = seeded_store();
        let mut screen = ScreenState::load(&store, t0(), false);

        let mut snap = screen.tick(t0() + Duration::seconds(1));
        assert_eq!(snap.gift_banner.phase, PopupPhase::Hidden);
        for s in 2..=5 {
            snap = screen.tick(t0() + Duration::seconds(s));
        }
        assert_eq!(snap.gift_banner.phase, PopupPhase::Revealed);
        assert_eq!(snap.gift_banner.gift.unwrap().name, "Smartwatch");
    }
}
