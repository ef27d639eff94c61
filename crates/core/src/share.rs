//! Social share link construction.

use url::form_urlencoded::byte_serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    WeChat,
    Weibo,
    Twitter,
    Facebook,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 4] = [
        SharePlatform::WeChat,
        SharePlatform::Weibo,
        SharePlatform::Twitter,
        SharePlatform::Facebook,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SharePlatform::WeChat => "WeChat",
            SharePlatform::Weibo => "Weibo",
            SharePlatform::Twitter => "Twitter",
            SharePlatform::Facebook => "Facebook",
        }
    }
}

/// What the view should do to share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareTarget {
    /// Open this URL in a new browser window.
    OpenUrl(String),
    /// No web intent exists; the user shares by scanning a QR code.
    ScanQrCode { hint: &'static str },
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

#[must_use]
pub fn share_target(platform: SharePlatform, title: &str, url: &str) -> ShareTarget {
    let title = encode(title);
    let url = encode(url);
    match platform {
        SharePlatform::WeChat => ShareTarget::ScanQrCode {
            hint: "Scan with WeChat to share",
        },
        SharePlatform::Weibo => ShareTarget::OpenUrl(format!(
            "https://service.weibo.com/share/share.php?url={url}&title={title}"
        )),
        SharePlatform::Twitter => ShareTarget::OpenUrl(format!(
            "https://twitter.com/intent/tweet?text={title}&url={url}"
        )),
        SharePlatform::Facebook => ShareTarget::OpenUrl(format!(
            "https://www.facebook.com/sharer/sharer.php?u={url}"
        )),
    }
}
