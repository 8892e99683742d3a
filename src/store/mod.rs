//! Record and media storage
//!
//! The back office edits five record kinds (campaigns, courses embedded in
//! campaigns, themes, gift items, background images) plus uploaded images.
//! Everything lives in process; the display reads it back through the same
//! store on every reload.

pub mod media;
pub mod memory;
pub mod records;

// Re-export main types
pub use media::MediaStore;
pub use memory::{RecordStore, StoreError};
pub use records::{
    BackgroundImage, Campaign, Course, GiftItem, NewBackground, NewCampaign, NewCourse,
    NewGiftItem, NewTheme, ThemeSettings, TimerLanguage,
};
