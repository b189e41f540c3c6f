use serde::Serialize;

pub const GUIDE_UNAVAILABLE_MESSAGE: &str =
    "The implementation guide is not available yet. Please check back soon.";

/// Where the "open implementation guide" action leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuideLink {
    Url { url: String },
    Unavailable { message: &'static str },
}

impl GuideLink {
    /// Blank or missing URLs resolve to the fixed unavailable message.
    pub fn resolve(configured: Option<&str>) -> Self {
        match configured.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Self::Url {
                url: url.to_string(),
            },
            None => Self::Unavailable {
                message: GUIDE_UNAVAILABLE_MESSAGE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_url_is_used() {
        assert_eq!(
            GuideLink::resolve(Some(" https://example.org/guide.pdf ")),
            GuideLink::Url {
                url: "https://example.org/guide.pdf".to_string()
            }
        );
    }

    #[test]
    fn missing_or_blank_url_falls_back_to_message() {
        for configured in [None, Some(""), Some("   ")] {
            assert_eq!(
                GuideLink::resolve(configured),
                GuideLink::Unavailable {
                    message: GUIDE_UNAVAILABLE_MESSAGE
                }
            );
        }
    }
}
