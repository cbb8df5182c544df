//! Fake query configuration.

/// Number of records `all()` fabricates unless configured otherwise.
pub const DEFAULT_ALL_COUNT: usize = 10;

/// Configuration for fake query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    /// How many records `all()` fabricates when the query has entities.
    pub all_count: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            all_count: DEFAULT_ALL_COUNT,
        }
    }
}

impl QueryConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `all_count` option (builder pattern).
    #[must_use]
    pub fn all_count(mut self, count: usize) -> Self {
        self.all_count = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fabricates_ten() {
        assert_eq!(QueryConfig::default().all_count, 10);
        assert_eq!(QueryConfig::new().all_count(3).all_count, 3);
    }
}
