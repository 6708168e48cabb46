//! Conversion from raw response fields to typed channel updates
//!
//! The device reports more fields than this service tracks; anything not
//! in the table below is dropped silently.

use samsungtv_parser::{extract_scalar, parse_document};

use crate::channel::{Channel, ChannelValue};

/// Map a raw field observation to a channel update
///
/// Returns `None` for fields this service does not track. Numeric
/// conversion failures yield [`ChannelValue::Undefined`] on the channel
/// rather than dropping the update.
pub(crate) fn convert(field: &str, value: Option<&str>) -> Option<(Channel, ChannelValue)> {
    let update = match field {
        "ProgramTitle" => (Channel::ProgramTitle, text(value)),
        "ChannelName" => (Channel::ChannelName, text(value)),
        "CurrentExternalSource" => (Channel::SourceName, text(value)),
        "CurrentChannel" => (Channel::ChannelNumber, channel_number(value)),
        "ID" => (Channel::SourceId, number(value)),
        "BrowserURL" => (Channel::BrowserUrl, text(value)),
        _ => return None,
    };
    Some(update)
}

fn text(value: Option<&str>) -> ChannelValue {
    match value {
        Some(v) => ChannelValue::Text(v.to_string()),
        None => ChannelValue::Undefined,
    }
}

fn number(value: Option<&str>) -> ChannelValue {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(ChannelValue::Number)
        .unwrap_or(ChannelValue::Undefined)
}

/// The current-channel field embeds an XML descriptor; the broadcast
/// channel number lives in its `MajorCh` element.
fn channel_number(value: Option<&str>) -> ChannelValue {
    let major = value
        .and_then(|xml| parse_document(xml).ok())
        .and_then(|doc| extract_scalar(&doc, "MajorCh"));
    number(major.as_deref())
}
