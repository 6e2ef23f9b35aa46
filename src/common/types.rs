//! Value types shared across the request layer, strategies and state

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use url::Url;

use super::errors::RequestError;
use super::traits::{FieldMapping, ResponseShape};

/// Trailing day span a ranking covers
///
/// The discriminant is the exact day count used in the URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeWindow {
    OneDay = 1,
    #[default]
    SevenDays = 7,
    ThirtyDays = 30,
}

impl TimeWindow {
    /// All windows in selector order
    pub const ALL: [TimeWindow; 3] = [
        TimeWindow::OneDay,
        TimeWindow::SevenDays,
        TimeWindow::ThirtyDays,
    ];

    /// Number of days covered
    pub fn days(self) -> u32 {
        self as u32
    }

    /// Short display label
    pub fn title(self) -> &'static str {
        match self {
            TimeWindow::OneDay => "1D",
            TimeWindow::SevenDays => "7D",
            TimeWindow::ThirtyDays => "30D",
        }
    }
}

impl TryFrom<u32> for TimeWindow {
    type Error = String;

    fn try_from(days: u32) -> std::result::Result<Self, Self::Error> {
        match days {
            1 => Ok(TimeWindow::OneDay),
            7 => Ok(TimeWindow::SevenDays),
            30 => Ok(TimeWindow::ThirtyDays),
            other => Err(format!("unsupported time window: {} (expected 1, 7 or 30)", other)),
        }
    }
}

impl From<TimeWindow> for u32 {
    fn from(window: TimeWindow) -> Self {
        window.days()
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    /// Accepts "7" as well as the display label "7D"
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_suffix('D')
            .or_else(|| trimmed.strip_suffix('d'))
            .unwrap_or(trimmed);
        let days: u32 = digits
            .parse()
            .map_err(|_| format!("invalid time window: {:?}", s))?;
        TimeWindow::try_from(days)
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.days())
    }
}

/// Social channel the "shared" ranking is broken down by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareChannel {
    #[default]
    Facebook,
}

impl ShareChannel {
    /// Path segment used by the API
    pub fn as_str(self) -> &'static str {
        match self {
            ShareChannel::Facebook => "facebook",
        }
    }
}

impl FromStr for ShareChannel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "facebook" => Ok(ShareChannel::Facebook),
            other => Err(format!("unknown share channel: {:?}", other)),
        }
    }
}

impl std::fmt::Display for ShareChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Popularity ranking to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Viewed,
    Emailed,
    Shared(ShareChannel),
}

impl Category {
    /// Categories in selector order, "shared" with its default channel
    pub const ALL_KINDS: [Category; 3] = [
        Category::Viewed,
        Category::Emailed,
        Category::Shared(ShareChannel::Facebook),
    ];

    /// Display title, also used to match the current selection
    pub fn title(self) -> &'static str {
        match self {
            Category::Viewed => "Most Viewed",
            Category::Emailed => "Most Emailed",
            Category::Shared(_) => "Most Shared",
        }
    }

    /// First path segment after the API base
    pub fn path_segment(self) -> &'static str {
        match self {
            Category::Viewed => "viewed",
            Category::Emailed => "emailed",
            Category::Shared(_) => "shared",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts "viewed", "emailed", "shared" and "shared:<channel>"
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let (kind, channel) = match lowered.split_once(':') {
            Some((kind, channel)) => (kind, Some(channel)),
            None => (lowered.as_str(), None),
        };
        match (kind, channel) {
            ("viewed", None) => Ok(Category::Viewed),
            ("emailed", None) => Ok(Category::Emailed),
            ("shared", None) => Ok(Category::Shared(ShareChannel::default())),
            ("shared", Some(channel)) => Ok(Category::Shared(channel.parse()?)),
            _ => Err(format!("unknown category: {:?}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Shared(channel) => write!(f, "shared:{}", channel),
            other => f.write_str(other.path_segment()),
        }
    }
}

/// One ranked article
///
/// `id` is unique within one response only. `published_date` is kept as
/// the raw wire string and never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub byline: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    pub url: String,
}

impl Article {
    /// Parse the canonical URL for hand-off to a detail viewer
    pub fn link(&self) -> std::result::Result<Url, RequestError> {
        Url::parse(&self.url).map_err(|e| RequestError::InvalidUrl(format!("{}: {}", self.url, e)))
    }
}

impl ResponseShape for Article {
    const FIELDS: &'static [FieldMapping] = &[
        FieldMapping::required("id", "id"),
        FieldMapping::required("title", "title"),
        FieldMapping::optional("byline", "byline"),
        FieldMapping::optional("published_date", "published_date"),
        FieldMapping::required("url", "url"),
    ];
}

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport-level request produced by the executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL with encoded query parameters
    pub url: Url,
    pub headers: BTreeMap<String, String>,
}

/// Raw response handed back by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_raw_values() {
        assert_eq!(TimeWindow::OneDay.days(), 1);
        assert_eq!(TimeWindow::SevenDays.days(), 7);
        assert_eq!(TimeWindow::ThirtyDays.days(), 30);
        assert_eq!(TimeWindow::SevenDays.to_string(), "7");
    }

    #[test]
    fn test_time_window_parsing() {
        assert_eq!("7".parse::<TimeWindow>(), Ok(TimeWindow::SevenDays));
        assert_eq!("30D".parse::<TimeWindow>(), Ok(TimeWindow::ThirtyDays));
        assert_eq!(TimeWindow::try_from(1), Ok(TimeWindow::OneDay));
        assert!(TimeWindow::try_from(14).is_err());
        assert!("07x".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn test_time_window_titles() {
        let titles: Vec<_> = TimeWindow::ALL.iter().map(|w| w.title()).collect();
        assert_eq!(titles, vec!["1D", "7D", "30D"]);
        assert_eq!(TimeWindow::default(), TimeWindow::SevenDays);
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("viewed".parse::<Category>(), Ok(Category::Viewed));
        assert_eq!("EMAILED".parse::<Category>(), Ok(Category::Emailed));
        assert_eq!(
            "shared".parse::<Category>(),
            Ok(Category::Shared(ShareChannel::Facebook))
        );
        assert_eq!(
            "shared:facebook".parse::<Category>(),
            Ok(Category::Shared(ShareChannel::Facebook))
        );
        assert!("shared:twitter".parse::<Category>().is_err());
        assert!("viewed:facebook".parse::<Category>().is_err());
        assert!("popular".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_display_round_trips() {
        for category in Category::ALL_KINDS {
            assert_eq!(category.to_string().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_article_link() {
        let mut article = Article {
            id: 1,
            title: "T".to_string(),
            byline: None,
            published_date: None,
            url: "https://www.nytimes.com/2025/08/27/world/story.html".to_string(),
        };
        assert_eq!(article.link().unwrap().host_str(), Some("www.nytimes.com"));

        article.url = "not a url".to_string();
        assert!(matches!(article.link(), Err(RequestError::InvalidUrl(_))));
    }

    #[test]
    fn test_response_success_range() {
        assert!(HttpResponse::new(200, Vec::new()).is_success());
        assert!(HttpResponse::new(204, Vec::new()).is_success());
        assert!(!HttpResponse::new(301, Vec::new()).is_success());
        assert!(!HttpResponse::new(500, Vec::new()).is_success());
    }
}
