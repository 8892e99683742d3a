//! Uploaded image storage
//!
//! Uploads get a store-generated filename and come back as a public
//! `/media/<name>` URL; deletion takes the filename derived from the URL's
//! trailing segment, matching how the admin screens reference images.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct MediaObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Default)]
pub struct MediaStore {
    objects: Mutex<HashMap<String, MediaObject>>,
    counter: AtomicU64,
}

impl MediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a blob and return its public URL. The name hint keeps the
    /// original extension; the counter keeps filenames unique.
    pub fn upload(&self, name_hint: &str, content_type: &str, bytes: Vec<u8>) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let filename = format!("{}-{}", n, sanitize(name_hint));
        let mut objects = self.objects.lock().unwrap_or_else(|e| e.into_inner());
        objects.insert(
            filename.clone(),
            MediaObject {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        info!("Stored media object {}", filename);
        format!("/media/{}", filename)
    }

    pub fn get(&self, filename: &str) -> Option<MediaObject> {
        let objects = self.objects.lock().unwrap_or_else(|e| e.into_inner());
        objects.get(filename).cloned()
    }

    /// Delete by public URL; the filename is the trailing path segment.
    pub fn delete_by_url(&self, url: &str) -> bool {
        let Some(filename) = url.rsplit('/').next().filter(|f| !f.is_empty()) else {
            warn!("Cannot derive filename from media URL: {}", url);
            return false;
        };
        let mut objects = self.objects.lock().unwrap_or_else(|e| e.into_inner());
        objects.remove(filename).is_some()
    }
}

/// Keep filenames path- and URL-safe.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
