use hsb_core::DEFAULT_ENTRY_URL;

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// URL the surface loads when a search begins.
    pub entry_url: String,
    /// Capacity of the command and effect channels. Zero is treated
    /// as one when the session starts.
    pub channel_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            entry_url: DEFAULT_ENTRY_URL.to_owned(),
            channel_capacity: 64,
        }
    }
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry_url(mut self, url: impl Into<String>) -> Self {
        self.entry_url = url.into();
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }
}
