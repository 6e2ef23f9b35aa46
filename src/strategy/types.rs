use tracing::{debug, instrument};

use crate::common::errors::FetchError;
use crate::common::types::{Article, Category, ShareChannel, TimeWindow};
use crate::config::types::ApiCredentials;
use crate::nytimes::client::MostPopularClient;
use crate::nytimes::messages::ArticlesResponse;
use crate::nytimes::request::RequestDescriptor;

/// Query parameter carrying the API key
pub const API_KEY_PARAM: &str = "api-key";

/// One way of fetching a ranked article list
///
/// Equal by value: same variant and same parameters. Different variants
/// are never equal, even with the same window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchStrategy {
    /// Most viewed articles
    Viewed(TimeWindow),
    /// Most emailed articles
    Emailed(TimeWindow),
    /// Most shared articles on a given channel
    Shared(TimeWindow, ShareChannel),
}

impl FetchStrategy {
    /// Build the strategy for a category/window selection
    pub fn new(category: Category, window: TimeWindow) -> Self {
        match category {
            Category::Viewed => FetchStrategy::Viewed(window),
            Category::Emailed => FetchStrategy::Emailed(window),
            Category::Shared(channel) => FetchStrategy::Shared(window, channel),
        }
    }

    pub fn category(&self) -> Category {
        match *self {
            FetchStrategy::Viewed(_) => Category::Viewed,
            FetchStrategy::Emailed(_) => Category::Emailed,
            FetchStrategy::Shared(_, channel) => Category::Shared(channel),
        }
    }

    pub fn window(&self) -> TimeWindow {
        match *self {
            FetchStrategy::Viewed(window)
            | FetchStrategy::Emailed(window)
            | FetchStrategy::Shared(window, _) => window,
        }
    }

    /// Stable display title, used to restore the selector state
    pub fn title(&self) -> &'static str {
        self.category().title()
    }

    /// Same category, different window
    pub fn with_window(&self, window: TimeWindow) -> Self {
        Self::new(self.category(), window)
    }

    /// Endpoint path relative to the API base
    pub fn path(&self) -> String {
        match *self {
            FetchStrategy::Viewed(window) => format!("/viewed/{}.json", window.days()),
            FetchStrategy::Emailed(window) => format!("/emailed/{}.json", window.days()),
            FetchStrategy::Shared(window, channel) => {
                format!("/shared/{}/{}.json", window.days(), channel.as_str())
            }
        }
    }

    /// The single request this strategy issues
    pub fn descriptor(&self, base_url: &str, credentials: &ApiCredentials) -> RequestDescriptor {
        RequestDescriptor::get(base_url, self.path())
            .with_query(API_KEY_PARAM, credentials.api_key.as_str())
    }

    /// Fetch the ranked list for this strategy
    ///
    /// The executor's error classification is forwarded untouched.
    #[instrument(skip(self, client), fields(strategy = %self))]
    pub async fn fetch(&self, client: &MostPopularClient) -> Result<Vec<Article>, FetchError> {
        let descriptor = self.descriptor(client.base_url(), client.credentials());
        let response = client
            .executor()
            .execute::<ArticlesResponse>(&descriptor)
            .await?;
        debug!(count = response.results.len(), "Fetched articles");
        Ok(response.results)
    }
}

impl Default for FetchStrategy {
    fn default() -> Self {
        FetchStrategy::Viewed(TimeWindow::SevenDays)
    }
}

impl std::fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title(), self.window().title())
    }
}
