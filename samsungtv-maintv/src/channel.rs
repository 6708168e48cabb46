//! Channels, typed values and inbound commands
//!
//! A channel is the externally visible command/notification category
//! (distinct from a TV broadcast channel, which is what
//! [`Channel::ChannelNumber`] reports).

/// Externally visible notification/command channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Title of the currently running program
    ProgramTitle,
    /// Name of the current broadcast channel
    ChannelName,
    /// Name of the active external source (e.g. "HDMI1")
    SourceName,
    /// Current broadcast channel number
    ChannelNumber,
    /// Identifier of the active external source
    SourceId,
    /// URL shown by the TV's browser
    BrowserUrl,
    /// Command-only channel stopping the browser
    StopBrowser,
}

impl Channel {
    /// Stable string identifier used on the service boundary
    pub fn id(self) -> &'static str {
        match self {
            Channel::ProgramTitle => "programTitle",
            Channel::ChannelName => "channelName",
            Channel::SourceName => "sourceName",
            Channel::ChannelNumber => "channel",
            Channel::SourceId => "sourceId",
            Channel::BrowserUrl => "browserUrl",
            Channel::StopBrowser => "stopBrowser",
        }
    }

    /// Resolve a string identifier back to a channel
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "programTitle" => Some(Channel::ProgramTitle),
            "channelName" => Some(Channel::ChannelName),
            "sourceName" => Some(Channel::SourceName),
            "channel" => Some(Channel::ChannelNumber),
            "sourceId" => Some(Channel::SourceId),
            "browserUrl" => Some(Channel::BrowserUrl),
            "stopBrowser" => Some(Channel::StopBrowser),
            _ => None,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Typed value delivered to listeners
///
/// `Undefined` is the explicit "no usable value" marker: the field was
/// absent, or a numeric conversion on it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelValue {
    /// String-valued channel state
    Text(String),
    /// Numeric channel state
    Number(i64),
    /// No usable value
    Undefined,
}

impl std::fmt::Display for ChannelValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelValue::Text(text) => f.write_str(text),
            ChannelValue::Number(n) => write!(f, "{}", n),
            ChannelValue::Undefined => f.write_str("UNDEF"),
        }
    }
}

/// Inbound command, resolved once at the service entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch to the external source with the given human-readable name
    SelectSource(String),
    /// Open the TV browser on the given URL
    SetBrowserUrl(String),
    /// Stop the TV browser
    StopBrowser,
    /// Channel identifier this service does not transmit for
    Unknown(String),
}

impl Command {
    /// Resolve a (channel id, command value) pair into a command
    pub fn from_channel(channel_id: &str, value: &str) -> Self {
        match Channel::from_id(channel_id) {
            Some(Channel::SourceName) => Command::SelectSource(value.to_string()),
            Some(Channel::BrowserUrl) => Command::SetBrowserUrl(value.to_string()),
            Some(Channel::StopBrowser) => Command::StopBrowser,
            _ => Command::Unknown(channel_id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_id_round_trip() {
        for channel in [
            Channel::ProgramTitle,
            Channel::ChannelName,
            Channel::SourceName,
            Channel::ChannelNumber,
            Channel::SourceId,
            Channel::BrowserUrl,
            Channel::StopBrowser,
        ] {
            assert_eq!(Channel::from_id(channel.id()), Some(channel));
        }
        assert_eq!(Channel::from_id("bogus"), None);
    }

    #[test]
    fn test_command_resolution() {
        assert_eq!(
            Command::from_channel("sourceName", "HDMI1"),
            Command::SelectSource("HDMI1".to_string())
        );
        assert_eq!(
            Command::from_channel("browserUrl", "http://example.org"),
            Command::SetBrowserUrl("http://example.org".to_string())
        );
        assert_eq!(Command::from_channel("stopBrowser", ""), Command::StopBrowser);
    }

    #[test]
    fn test_receive_only_channel_is_not_a_command() {
        assert_eq!(
            Command::from_channel("programTitle", "x"),
            Command::Unknown("programTitle".to_string())
        );
        assert_eq!(
            Command::from_channel("bogus", "x"),
            Command::Unknown("bogus".to_string())
        );
    }
}
