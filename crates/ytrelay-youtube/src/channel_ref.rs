//! Parsing of user-supplied channel references.
//!
//! Accepts a raw channel id (`UC...`), a handle (`@name` or bare `name`), or
//! a youtube.com URL in `/channel/`, `/@handle`, or `/user/` form.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::YoutubeError;

static CHANNEL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^UC[A-Za-z0-9_-]{22}$").expect("valid channel id regex"));

static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@?([A-Za-z0-9_.\-]{3,30})$").expect("valid handle regex"));

static CHANNEL_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:https?://)?(?:www\.|m\.)?youtube\.com/(?:channel/(?P<id>UC[A-Za-z0-9_-]{22})|@(?P<handle>[A-Za-z0-9_.\-]+)|user/(?P<user>[A-Za-z0-9_.\-]+))/?(?:[/?#].*)?$",
    )
    .expect("valid channel URL regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    Id(String),
    /// Always stored with the leading `@`.
    Handle(String),
    Username(String),
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => f.write_str(id),
            Self::Handle(handle) => f.write_str(handle),
            Self::Username(name) => write!(f, "user/{name}"),
        }
    }
}

/// Parses a channel reference.
///
/// # Errors
///
/// Returns [`YoutubeError::InvalidChannelReference`] for anything that is
/// neither an id, a handle, nor a recognised channel URL.
pub fn parse_channel_ref(input: &str) -> Result<ChannelRef, YoutubeError> {
    let trimmed = input.trim();

    if CHANNEL_ID_RE.is_match(trimmed) {
        return Ok(ChannelRef::Id(trimmed.to_owned()));
    }

    if let Some(caps) = CHANNEL_URL_RE.captures(trimmed) {
        if let Some(id) = caps.name("id") {
            return Ok(ChannelRef::Id(id.as_str().to_owned()));
        }
        if let Some(handle) = caps.name("handle") {
            return Ok(ChannelRef::Handle(format!("@{}", handle.as_str())));
        }
        if let Some(user) = caps.name("user") {
            return Ok(ChannelRef::Username(user.as_str().to_owned()));
        }
    }

    if let Some(caps) = HANDLE_RE.captures(trimmed) {
        return Ok(ChannelRef::Handle(format!("@{}", &caps[1])));
    }

    Err(YoutubeError::InvalidChannelReference {
        reference: input.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_channel_id() {
        assert_eq!(
            parse_channel_ref("UCWFKCr40YwOZQx8FHU_ZqqQ").unwrap(),
            ChannelRef::Id("UCWFKCr40YwOZQx8FHU_ZqqQ".to_string())
        );
    }

    #[test]
    fn handle_with_and_without_at() {
        assert_eq!(
            parse_channel_ref("@JerryRigEverything").unwrap(),
            ChannelRef::Handle("@JerryRigEverything".to_string())
        );
        assert_eq!(
            parse_channel_ref("  mkbhd ").unwrap(),
            ChannelRef::Handle("@mkbhd".to_string())
        );
    }

    #[test]
    fn channel_urls() {
        assert_eq!(
            parse_channel_ref("https://www.youtube.com/channel/UCWFKCr40YwOZQx8FHU_ZqqQ").unwrap(),
            ChannelRef::Id("UCWFKCr40YwOZQx8FHU_ZqqQ".to_string())
        );
        assert_eq!(
            parse_channel_ref("https://youtube.com/@JerryRigEverything/videos").unwrap(),
            ChannelRef::Handle("@JerryRigEverything".to_string())
        );
        assert_eq!(
            parse_channel_ref("youtube.com/user/LinusTechTips").unwrap(),
            ChannelRef::Username("LinusTechTips".to_string())
        );
    }

    #[test]
    fn rejects_unrelated_input() {
        for input in ["", "https://example.com/@someone", "two words", "@x"] {
            assert!(
                matches!(
                    parse_channel_ref(input),
                    Err(YoutubeError::InvalidChannelReference { .. })
                ),
                "expected rejection for {input:?}"
            );
        }
    }
}
