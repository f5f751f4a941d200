//! Channel header written at the top of every output document.

/// `<title>`, `<link>` and `<description>` of an RSS channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub title: String,
    pub link: String,
    pub description: String,
}

impl ChannelInfo {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: description.into(),
        }
    }
}
