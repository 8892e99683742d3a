//! In-memory record store
//!
//! All tables sit behind one mutex so the activate operations can
//! deactivate-all and activate-one as a single step; "exactly one active
//! record" holds for campaigns, themes and backgrounds under any
//! interleaving of admin calls.

use std::sync::Mutex;

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use super::records::*;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("store lock poisoned")]
    Poisoned,
}

#[derive(Default)]
struct Tables {
    next_id: u64,
    campaigns: Vec<Campaign>,
    themes: Vec<ThemeSettings>,
    gifts: Vec<GiftItem>,
    backgrounds: Vec<BackgroundImage>,
}

impl Tables {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

#[derive(Default)]
pub struct RecordStore {
    inner: Mutex<Tables>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Tables>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }

    // Campaigns

    pub fn campaigns(&self) -> Result<Vec<Campaign>, StoreError> {
        Ok(self.lock()?.campaigns.clone())
    }

    pub fn active_campaign(&self) -> Result<Option<Campaign>, StoreError> {
        Ok(self.lock()?.campaigns.iter().find(|c| c.is_active).cloned())
    }

    pub fn create_campaign(&self, new: NewCampaign) -> Result<Campaign, StoreError> {
        let mut tables = self.lock()?;
        let courses = new
            .courses
            .into_iter()
            .map(|c| {
                let id = tables.next_id("course");
                Course {
                    id,
                    title: c.title,
                    original_price: c.original_price,
                    discounted_price: c.discounted_price,
                }
            })
            .collect();
        let campaign = Campaign {
            id: tables.next_id("campaign"),
            title: new.title,
            description: new.description,
            start_time: new.start_time,
            end_time: new.end_time,
            is_active: false,
            courses,
        };
        tables.campaigns.push(campaign.clone());
        info!("Created campaign {}", campaign.id);
        Ok(campaign)
    }

    pub fn update_campaign(&self, id: &str, new: NewCampaign) -> Result<Campaign, StoreError> {
        let mut tables = self.lock()?;
        let courses: Vec<Course> = new
            .courses
            .into_iter()
            .map(|c| {
                let id = tables.next_id("course");
                Course {
                    id,
                    title: c.title,
                    original_price: c.original_price,
                    discounted_price: c.discounted_price,
                }
            })
            .collect();
        let campaign = tables
            .campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        campaign.title = new.title;
        campaign.description = new.description;
        campaign.start_time = new.start_time;
        campaign.end_time = new.end_time;
        campaign.courses = courses;
        Ok(campaign.clone())
    }

    pub fn delete_campaign(&self, id: &str) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        let before = tables.campaigns.len();
        tables.campaigns.retain(|c| c.id != id);
        if tables.campaigns.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Activate one campaign, deactivating every other, in a single step.
    pub fn activate_campaign(&self, id: &str) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if !tables.campaigns.iter().any(|c| c.id == id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        for campaign in &mut tables.campaigns {
            campaign.is_active = campaign.id == id;
        }
        info!("Campaign {} is now active", id);
        Ok(())
    }

    // Themes

    pub fn themes(&self) -> Result<Vec<ThemeSettings>, StoreError> {
        Ok(self.lock()?.themes.clone())
    }

    /// The active theme, or the built-in default when none is active.
    pub fn active_theme_or_default(&self) -> Result<ThemeSettings, StoreError> {
        Ok(self
            .lock()?
            .themes
            .iter()
            .find(|t| t.is_active)
            .cloned()
            .unwrap_or_default())
    }

    pub fn create_theme(&self, new: NewTheme) -> Result<ThemeSettings, StoreError> {
        let mut tables = self.lock()?;
        let theme = ThemeSettings {
            id: tables.next_id("theme"),
            name: new.name,
            header_text_1: new.header_text_1,
            header_text_2: new.header_text_2,
            background_style: new.background_style,
            timer_language: new.timer_language,
            show_gift_marquee: new.show_gift_marquee,
            show_gift_popups: new.show_gift_popups,
            card_rotation_interval: new.card_rotation_interval,
            auto_reload_interval: new.auto_reload_interval,
            is_active: false,
        };
        tables.themes.push(theme.clone());
        info!("Created theme {}", theme.id);
        Ok(theme)
    }

    pub fn update_theme(&self, id: &str, new: NewTheme) -> Result<ThemeSettings, StoreError> {
        let mut tables = self.lock()?;
        let theme = tables
            .themes
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        theme.name = new.name;
        theme.header_text_1 = new.header_text_1;
        theme.header_text_2 = new.header_text_2;
        theme.background_style = new.background_style;
        theme.timer_language = new.timer_language;
        theme.show_gift_marquee = new.show_gift_marquee;
        theme.show_gift_popups = new.show_gift_popups;
        theme.card_rotation_interval = new.card_rotation_interval;
        theme.auto_reload_interval = new.auto_reload_interval;
        Ok(theme.clone())
    }

    pub fn delete_theme(&self, id: &str) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        let before = tables.themes.len();
        tables.themes.retain(|t| t.id != id);
        if tables.themes.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn activate_theme(&self, id: &str) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if !tables.themes.iter().any(|t| t.id == id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        for theme in &mut tables.themes {
            theme.is_active = theme.id == id;
        }
        info!("Theme {} is now active", id);
        Ok(())
    }

    // Gift items

    pub fn gifts(&self) -> Result<Vec<GiftItem>, StoreError> {
        let mut gifts = self.lock()?.gifts.clone();
        gifts.sort_by_key(|g| g.sort_order);
        Ok(gifts)
    }

    /// Gifts for the marquee, ordered by sort_order.
    pub fn visible_gifts(&self) -> Result<Vec<GiftItem>, StoreError> {
        Ok(self.gifts()?.into_iter().filter(|g| g.is_visible).collect())
    }

    /// Gifts eligible for the popup overlays, ordered by sort_order.
    pub fn popup_gifts(&self) -> Result<Vec<GiftItem>, StoreError> {
        Ok(self
            .gifts()?
            .into_iter()
            .filter(|g| g.is_visible && g.show_in_popups)
            .collect())
    }

    pub fn create_gift(&self, new: NewGiftItem) -> Result<GiftItem, StoreError> {
        let mut tables = self.lock()?;
        let gift = GiftItem {
            id: tables.next_id("gift"),
            name: new.name,
            emoji: new.emoji,
            image_url: new.image_url,
            is_visible: new.is_visible,
            show_in_popups: new.show_in_popups,
            sort_order: new.sort_order,
            created_at: Utc::now(),
        };
        tables.gifts.push(gift.clone());
        info!("Created gift item {}", gift.id);
        Ok(gift)
    }

    pub fn update_gift(&self, id: &str, new: NewGiftItem) -> Result<GiftItem, StoreError> {
        let mut tables = self.lock()?;
        let gift = tables
            .gifts
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        gift.name = new.name;
        gift.emoji = new.emoji;
        gift.image_url = new.image_url;
        gift.is_visible = new.is_visible;
        gift.show_in_popups = new.show_in_popups;
        gift.sort_order = new.sort_order;
        Ok(gift.clone())
    }

    pub fn delete_gift(&self, id: &str) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        let before = tables.gifts.len();
        tables.gifts.retain(|g| g.id != id);
        if tables.gifts.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    // Backgrounds

    pub fn backgrounds(&self) -> Result<Vec<BackgroundImage>, StoreError> {
        let mut backgrounds = self.lock()?.backgrounds.clone();
        backgrounds.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(backgrounds)
    }

    pub fn active_background(&self) -> Result<Option<BackgroundImage>, StoreError> {
        Ok(self
            .lock()?
            .backgrounds
            .iter()
            .find(|b| b.is_active)
            .cloned())
    }

    pub fn create_background(&self, new: NewBackground) -> Result<BackgroundImage, StoreError> {
        let mut tables = self.lock()?;
        let background = BackgroundImage {
            id: tables.next_id("bg"),
            name: new.name,
            image_url: new.image_url,
            is_active: false,
            created_at: Utc::now(),
        };
        tables.backgrounds.push(background.clone());
        info!("Created background {}", background.id);
        Ok(background)
    }

    pub fn delete_background(&self, id: &str) -> Result<BackgroundImage, StoreError> {
        let mut tables = self.lock()?;
        let pos = tables
            .backgrounds
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(tables.backgrounds.remove(pos))
    }

    pub fn activate_background(&self, id: &str) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if !tables.backgrounds.iter().any(|b| b.id == id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        for background in &mut tables.backgrounds {
            background.is_active = background.id == id;
        }
        info!("Background {} is now active", id);
        Ok(())
    }

    /// Clear the active background entirely (plain-colour display).
    pub fn deactivate_backgrounds(&self) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        for background in &mut tables.backgrounds {
            background.is_active = false;
        }
        Ok(())
    }
}
