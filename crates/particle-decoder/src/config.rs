use std::time::Duration;

/// Default input read size for the splitter task (8 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Default number of chunks each output channel buffers before the
/// splitter waits for its reader.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Tuning for one streaming split.
///
/// ```text
/// ┌──────────────────┬──────────┬──────────────────────────────────────┐
/// │ Field            │ Default  │ Effect                               │
/// ├──────────────────┼──────────┼──────────────────────────────────────┤
/// │ chunk_size       │ 8 KiB    │ bytes requested per input read       │
/// │ channel_capacity │ 16       │ chunks buffered per output stream    │
/// │ read_timeout     │ none     │ limit on each input read             │
/// │ write_timeout    │ none     │ limit on each send to a slow reader  │
/// └──────────────────┴──────────┴──────────────────────────────────────┘
/// ```
///
/// Zero sizes are bumped to one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitConfig {
    pub chunk_size: usize,
    pub channel_capacity: usize,
    pub read_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            read_timeout: None,
            write_timeout: None,
        }
    }
}

impl SplitConfig {
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    #[must_use]
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    #[must_use]
    pub fn with_read_timeout(mut self, limit: Duration) -> Self {
        self.read_timeout = Some(limit);
        self
    }

    #[must_use]
    pub fn with_write_timeout(mut self, limit: Duration) -> Self {
        self.write_timeout = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sizes_are_clamped() {
        let config = SplitConfig::default()
            .with_chunk_size(0)
            .with_channel_capacity(0);
        assert_eq!(config.chunk_size, 1);
        assert_eq!(config.channel_capacity, 1);
    }

    #[test]
    fn timeouts_default_to_none() {
        let config = SplitConfig::default();
        assert!(config.read_timeout.is_none());
        assert!(config.write_timeout.is_none());
        let config = config.with_read_timeout(Duration::from_secs(1));
        assert_eq!(config.read_timeout, Some(Duration::from_secs(1)));
    }
}
