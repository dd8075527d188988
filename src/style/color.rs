//! Color allocation
//!
//! Each namespace (a field key) walks the palette independently. Once a
//! namespace has used every palette entry it gets random colors instead;
//! `ColorStore` remembers what each `(namespace, value)` received so a value
//! keeps its color for the lifetime of the formatter.

use crate::constants::PALETTE;
use rand::{rng, Rng};
use std::collections::HashMap;

/// Hands out palette colors per namespace, then random ones
#[derive(Debug, Default)]
pub struct ColorAllocator {
    counters: HashMap<String, usize>,
}

impl ColorAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next color for a namespace
    pub fn allocate(&mut self, namespace: &str) -> String {
        let counter = self.counters.entry(namespace.to_string()).or_insert(0);
        if let Some(color) = PALETTE.get(*counter) {
            *counter += 1;
            return (*color).to_string();
        }
        random_color()
    }

    /// Palette entries already used by a namespace
    pub fn used(&self, namespace: &str) -> usize {
        self.counters.get(namespace).copied().unwrap_or(0)
    }
}

/// Random `#rrggbb` that is not a palette entry
fn random_color() -> String {
    loop {
        let color = format!("#{:06x}", rng().random_range(0..=0xff_ffffu32));
        if !PALETTE.iter().any(|p| p.eq_ignore_ascii_case(&color)) {
            return color;
        }
    }
}

/// Memoized colors per `(namespace, value)`; never evicted
#[derive(Debug, Default)]
pub struct ColorStore {
    allocator: ColorAllocator,
    assigned: HashMap<(String, String), String>,
}

impl ColorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for a value, allocated on first request
    pub fn color_for(&mut self, namespace: &str, value: &str) -> String {
        let key = (namespace.to_string(), value.to_string());
        if let Some(color) = self.assigned.get(&key) {
            return color.clone();
        }
        let color = self.allocator.allocate(namespace);
        self.assigned.insert(key, color.clone());
        color
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_palette_order() {
        let mut allocator = ColorAllocator::new();
        for expected in PALETTE {
            assert_eq!(allocator.allocate("level"), expected);
        }
        assert_eq!(allocator.used("level"), PALETTE.len());
    }

    #[test]
    fn test_allocate_namespaces_independent() {
        let mut allocator = ColorAllocator::new();
        assert_eq!(allocator.allocate("a"), PALETTE[0]);
        assert_eq!(allocator.allocate("a"), PALETTE[1]);
        assert_eq!(allocator.allocate("b"), PALETTE[0]);
    }

    #[test]
    fn test_allocate_after_exhaustion() {
        let mut allocator = ColorAllocator::new();
        for _ in PALETTE {
            allocator.allocate("ns");
        }
        let color = allocator.allocate("ns");
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
        assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!PALETTE.iter().any(|p| p.eq_ignore_ascii_case(&color)));
        assert_eq!(allocator.used("ns"), PALETTE.len());
    }

    #[test]
    fn test_store_memoizes() {
        let mut store = ColorStore::new();
        let first = store.color_for("name", "db");
        let second = store.color_for("name", "web");
        assert_eq!(first, PALETTE[0]);
        assert_eq!(second, PALETTE[1]);
        assert_eq!(store.color_for("name", "db"), first);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_composite_key_no_collision() {
        let mut store = ColorStore::new();
        let a = store.color_for("ab", "c");
        let b = store.color_for("a", "bc");
        // Different namespaces both start at the palette head
        assert_eq!(a, PALETTE[0]);
        assert_eq!(b, PALETTE[0]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_random_color_stable() {
        let mut store = ColorStore::new();
        for i in 0..PALETTE.len() {
            store.color_for("level", &format!("v{}", i));
        }
        let extra = store.color_for("level", "v14");
        assert!(!PALETTE.contains(&extra.as_str()));
        for _ in 0..5 {
            assert_eq!(store.color_for("level", "v14"), extra);
        }
    }
}
