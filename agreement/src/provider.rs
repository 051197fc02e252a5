//! Term sources.
//!
//! The reducer only knows the [`TermsProvider`] trait. This module also
//! carries the wire model and two ready-made sources: an in-memory fake
//! with simulated latency and a JSON decoder.

use crate::error::{FetchError, Result};
use crate::item::Item;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Asynchronous source of the initial term list
///
/// This trait abstracts over where terms come from (remote API, bundled
/// file, test fixture).
pub trait TermsProvider: Send + Sync + 'static {
    /// Fetch the current terms
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The source is unreachable
    /// - The payload cannot be decoded
    /// - The source reports a failure
    fn fetch_items(&self) -> impl Future<Output = Result<Vec<Item>>> + Send;
}

/// Wire representation of a term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDto {
    /// Term identifier
    #[serde(rename = "termId")]
    pub term_id: i32,
    /// Term text
    #[serde(rename = "termTitle")]
    pub term_title: String,
    /// Whether agreement is mandatory
    pub mandatory: bool,
}

impl TermDto {
    /// Convert to an unchecked domain item
    #[must_use]
    pub fn into_item(self) -> Item {
        Item::new(self.term_id, self.term_title, self.mandatory)
    }
}

impl From<TermDto> for Item {
    fn from(dto: TermDto) -> Self {
        dto.into_item()
    }
}

/// The three terms every fresh session shows
#[must_use]
pub fn default_terms() -> Vec<TermDto> {
    vec![
        TermDto {
            term_id: 1,
            term_title: "Term 1".to_string(),
            mandatory: true,
        },
        TermDto {
            term_id: 2,
            term_title: "Term 2".to_string(),
            mandatory: true,
        },
        TermDto {
            term_id: 3,
            term_title: "Term 3".to_string(),
            mandatory: false,
        },
    ]
}

/// Default simulated latency of [`FakeTermsApi`]
pub const DEFAULT_FAKE_LATENCY: Duration = Duration::from_millis(800);

/// In-memory terms source
///
/// Answers with a fixed term list after a simulated network delay.
///
/// # Example
///
/// ```
/// use checklist_agreement::FakeTermsApi;
/// use std::time::Duration;
///
/// let api = FakeTermsApi::new().with_latency(Duration::ZERO);
/// assert_eq!(api.terms().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct FakeTermsApi {
    terms: Vec<TermDto>,
    latency: Duration,
    fail_with: Option<FetchError>,
}

impl FakeTermsApi {
    /// Fake serving [`default_terms`] after [`DEFAULT_FAKE_LATENCY`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            terms: default_terms(),
            latency: DEFAULT_FAKE_LATENCY,
            fail_with: None,
        }
    }

    /// Fake that always fails with [`FetchError::Unavailable`]
    #[must_use]
    pub fn failing() -> Self {
        Self::new().with_failure(FetchError::Unavailable("fake terms api offline".to_string()))
    }

    /// Replace the served terms
    #[must_use]
    pub fn with_terms(mut self, terms: Vec<TermDto>) -> Self {
        self.terms = terms;
        self
    }

    /// Set the simulated latency
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail every fetch with `error`
    #[must_use]
    pub fn with_failure(mut self, error: FetchError) -> Self {
        self.fail_with = Some(error);
        self
    }

    /// Terms served on success
    #[must_use]
    pub fn terms(&self) -> &[TermDto] {
        &self.terms
    }
}

impl Default for FakeTermsApi {
    fn default() -> Self {
        Self::new()
    }
}

impl TermsProvider for FakeTermsApi {
    fn fetch_items(&self) -> impl Future<Output = Result<Vec<Item>>> + Send {
        let latency = self.latency;
        let outcome = match &self.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(self.terms.clone()),
        };

        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let terms: Vec<TermDto> = outcome?;
            tracing::debug!(count = terms.len(), "Fake terms api answered");
            Ok::<_, FetchError>(terms.into_iter().map(TermDto::into_item).collect())
        }
    }
}

/// Terms source decoding a JSON array of [`TermDto`]
#[derive(Debug, Clone)]
pub struct JsonTermsProvider {
    payload: String,
}

impl JsonTermsProvider {
    /// Provider decoding `payload` on every fetch
    #[must_use]
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Decode a payload into items
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Decode`] if the payload is not a JSON array of terms.
    pub fn decode(payload: &str) -> Result<Vec<Item>> {
        let terms: Vec<TermDto> = serde_json::from_str(payload)?;
        Ok(terms.into_iter().map(TermDto::into_item).collect())
    }
}

impl TermsProvider for JsonTermsProvider {
    fn fetch_items(&self) -> impl Future<Output = Result<Vec<Item>>> + Send {
        let decoded = Self::decode(&self.payload);
        async move { decoded }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn dto_uses_wire_names() {
        let dto: TermDto =
            serde_json::from_str(r#"{"termId":7,"termTitle":"Privacy","mandatory":true}"#).unwrap();
        assert_eq!(dto.term_id, 7);

        let item = dto.into_item();
        assert_eq!(item, Item::required(7, "Privacy"));
        assert!(!item.checked);
    }

    #[tokio::test]
    async fn fake_serves_default_terms() {
        let api = FakeTermsApi::new().with_latency(Duration::ZERO);
        let items = api.fetch_items().await.unwrap();

        assert_eq!(
            items,
            vec![
                Item::required(1, "Term 1"),
                Item::required(2, "Term 2"),
                Item::optional(3, "Term 3"),
            ]
        );
    }

    #[tokio::test]
    async fn fake_honors_latency() {
        let latency = Duration::from_millis(20);
        let api = FakeTermsApi::new().with_latency(latency);
        let started = tokio::time::Instant::now();
        api.fetch_items().await.unwrap();
        assert!(started.elapsed() >= latency);
    }

    #[test]
    fn default_latency_matches_backend_delay() {
        assert_eq!(FakeTermsApi::default().latency, DEFAULT_FAKE_LATENCY);
    }

    #[tokio::test]
    async fn failing_fake_reports_unavailable() {
        let api = FakeTermsApi::failing().with_latency(Duration::ZERO);
        assert!(matches!(
            api.fetch_items().await,
            Err(FetchError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn json_provider_decodes_array() {
        let provider = JsonTermsProvider::new(
            r#"[{"termId":1,"termTitle":"A","mandatory":true},{"termId":2,"termTitle":"B","mandatory":false}]"#,
        );
        let items = provider.fetch_items().await.unwrap();
        assert_eq!(items, vec![Item::required(1, "A"), Item::optional(2, "B")]);
    }

    #[tokio::test]
    async fn json_provider_rejects_garbage() {
        let provider = JsonTermsProvider::new("{not json");
        assert!(matches!(
            provider.fetch_items().await,
            Err(FetchError::Decode(_))
        ));
    }
}
