//! Channel name utilities.

/// Prefixes that mark a target as a channel rather than a nick.
pub const CHANNEL_PREFIXES: [char; 4] = ['#', '!', '$', '&'];

/// Extension trait for checking if a string names a channel.
pub trait ChannelExt {
    /// True iff the string starts with one of [`CHANNEL_PREFIXES`].
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        self.starts_with(CHANNEL_PREFIXES)
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_channels() {
        assert!("#channel".is_channel_name());
        assert!("&local".is_channel_name());
        assert!("$mask".is_channel_name());
        assert!("!safe12345".is_channel_name());
    }

    #[test]
    fn test_invalid_channels() {
        assert!(!"channel".is_channel_name());
        assert!(!"+modeless".is_channel_name());
        assert!(!"".is_channel_name());
        assert!(!String::from("alice").is_channel_name());
    }
}
