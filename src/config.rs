//! Tree configuration.

/// Knobs a [`Tree`](crate::Tree) is built with.
///
/// ```
/// use grappe::{Config, Tree};
///
/// let tree: Tree<u32, ()> = Tree::with_config(Config::new().search_cache(false));
/// assert!(!tree.config().search_cache);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Serve repeated lookups of the same key from the last node found.
    pub search_cache: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Config { search_cache: true }
    }

    pub const fn search_cache(mut self, enabled: bool) -> Self {
        self.search_cache = enabled;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cache_is_on_by_default() {
        assert!(Config::default().search_cache);
        assert_eq!(Config::new(), Config::default());
        assert!(!Config::new().search_cache(false).search_cache);
    }
}
