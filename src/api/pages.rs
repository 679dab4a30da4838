//! Static text pages served by the backend.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticPage {
    PrivacyPolicy,
    TermsOfService,
    Contact,
    Faq,
}

impl StaticPage {
    pub const ALL: [StaticPage; 4] = [
        StaticPage::PrivacyPolicy,
        StaticPage::TermsOfService,
        StaticPage::Contact,
        StaticPage::Faq,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            StaticPage::PrivacyPolicy => "privacy-policy",
            StaticPage::TermsOfService => "terms-of-service",
            StaticPage::Contact => "contact",
            StaticPage::Faq => "faq",
        }
    }
}

impl fmt::Display for StaticPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for StaticPage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StaticPage::ALL
            .into_iter()
            .find(|page| page.slug() == s)
            .ok_or_else(|| format!("unknown page: {}", s))
    }
}

/// GET /static-text/{slug}.
pub async fn get_static_text(client: &ApiClient, page: StaticPage) -> Result<Value, ApiError> {
    client
        .get_json(&format!("/static-text/{}", page.slug()))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for page in StaticPage::ALL {
            assert_eq!(page.slug().parse::<StaticPage>().unwrap(), page);
        }
        assert!("imprint".parse::<StaticPage>().is_err());
    }
}
