//! Explicitly owned texture cache with least-recently-used eviction.

use std::collections::{HashMap, VecDeque};

use crate::error::TextureError;

/// Opaque texture reference owned by the host engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Host capability that turns a texture URL into a texture.
pub trait TextureLoader<T> {
    fn load(&mut self, url: &str) -> Result<T, TextureError>;
}

impl<T, F> TextureLoader<T> for F
where
    F: FnMut(&str) -> Result<T, TextureError>,
{
    fn load(&mut self, url: &str) -> Result<T, TextureError> {
        self(url)
    }
}

#[derive(Debug)]
pub struct TextureCache<T> {
    capacity: usize,
    entries: HashMap<String, T>,
    /// Least recently used first
    order: VecDeque<String>,
}

impl<T: Clone> TextureCache<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Returns the cached texture or loads it. Failed loads are not cached.
    pub fn get_or_load<L>(&mut self, url: &str, loader: &mut L) -> Result<T, TextureError>
    where
        L: TextureLoader<T> + ?Sized,
    {
        if let Some(texture) = self.entries.get(url).cloned() {
            self.touch(url);
            return Ok(texture);
        }
        let texture = loader.load(url)?;
        self.insert(url, texture.clone());
        Ok(texture)
    }

    pub fn insert(&mut self, url: &str, texture: T) {
        if self.entries.insert(url.to_string(), texture).is_some() {
            self.touch(url);
            return;
        }
        self.order.push_back(url.to_string());
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            log::debug!("evicted texture '{}'", oldest);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn touch(&mut self, url: &str) {
        if let Some(pos) = self.order.iter().position(|u| u == url) {
            if let Some(key) = self.order.remove(pos) {
                self.order.push_back(key);
            }
        }
    }
}
