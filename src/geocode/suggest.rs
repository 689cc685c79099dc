//! Address suggestions for interactive entry.
//!
//! Wraps a [`Geocoder`] with the rules the address field needs: a minimum
//! query length before any network call, a bounded result count, value
//! de-duplication, and (for the debounced variant) suppression of stale
//! results when the user keeps typing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::{AddressCandidate, GeocodeError, Geocoder};

/// Queries shorter than this return no suggestions and hit no network.
pub const MIN_QUERY_LEN: usize = 3;

/// Upper bound on returned suggestions.
pub const MAX_SUGGESTIONS: usize = 5;

/// Default debounce delay in milliseconds.
pub const DEBOUNCE_MS: u64 = 250;

/// One suggestion: `label` for display, `value` for filling the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    pub value: String,
}

impl Suggestion {
    fn from_candidate(candidate: &AddressCandidate) -> Self {
        let value = match (&candidate.road, &candidate.city) {
            (Some(road), Some(city)) => {
                let street = match &candidate.house_number {
                    Some(number) => format!("{number} {road}"),
                    None => road.clone(),
                };
                match &candidate.postcode {
                    Some(zip) => format!("{street}, {city}, NC {zip}"),
                    None => format!("{street}, {city}, NC"),
                }
            }
            _ => candidate.display_name.clone(),
        };
        Self {
            label: candidate.display_name.clone(),
            value,
        }
    }
}

fn build_suggestions(candidates: Vec<AddressCandidate>) -> Vec<Suggestion> {
    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();
    for candidate in &candidates {
        let suggestion = Suggestion::from_candidate(candidate);
        if seen.insert(suggestion.value.clone()) {
            suggestions.push(suggestion);
        }
        if suggestions.len() == MAX_SUGGESTIONS {
            break;
        }
    }
    suggestions
}

/// Immediate (non-debounced) suggestion lookup.
pub struct Suggester<'a> {
    geocoder: &'a dyn Geocoder,
}

impl<'a> Suggester<'a> {
    pub fn new(geocoder: &'a dyn Geocoder) -> Self {
        Self { geocoder }
    }

    pub async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, GeocodeError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }
        let candidates = self.geocoder.search(query, MAX_SUGGESTIONS).await?;
        Ok(build_suggestions(candidates))
    }
}

/// Suggestion lookup with a typing debounce.
///
/// Every call bumps a generation counter; a call that is no longer the
/// newest when its delay expires (or when its search returns) yields
/// `Ok(None)` so stale results never replace fresher ones.
pub struct DebouncedSuggester {
    geocoder: Arc<dyn Geocoder>,
    delay: Duration,
    generation: AtomicU64,
}

impl DebouncedSuggester {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self::with_delay(geocoder, Duration::from_millis(DEBOUNCE_MS))
    }

    pub fn with_delay(geocoder: Arc<dyn Geocoder>, delay: Duration) -> Self {
        Self {
            geocoder,
            delay,
            generation: AtomicU64::new(0),
        }
    }

    pub async fn suggest(&self, query: &str) -> Result<Option<Vec<Suggestion>>, GeocodeError> {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Some(Vec::new()));
        }

        tokio::time::sleep(self.delay).await;
        if self.generation.load(Ordering::SeqCst) != my_generation {
            return Ok(None);
        }

        let candidates = self.geocoder.search(query, MAX_SUGGESTIONS).await?;
        if self.generation.load(Ordering::SeqCst) != my_generation {
            return Ok(None);
        }
        Ok(Some(build_suggestions(candidates)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;

    use super::*;
    use crate::models::{Address, Coordinates};

    struct StubGeocoder {
        candidates: Vec<AddressCandidate>,
        search_calls: AtomicUsize,
    }

    impl StubGeocoder {
        fn with_candidates(candidates: Vec<AddressCandidate>) -> Self {
            Self {
                candidates,
                search_calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn geocode(&self, _address: &Address) -> Result<Option<Coordinates>, GeocodeError> {
            Ok(None)
        }

        async fn search(
            &self,
            _text: &str,
            limit: usize,
        ) -> Result<Vec<AddressCandidate>, GeocodeError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.candidates.iter().take(limit).cloned().collect())
        }
    }

    fn candidate(number: &str, road: &str) -> AddressCandidate {
        AddressCandidate {
            display_name: format!("{number}, {road}, Durham, North Carolina, United States"),
            coordinates: Coordinates {
                latitude: 35.99,
                longitude: -78.90,
            },
            house_number: Some(number.to_string()),
            road: Some(road.to_string()),
            city: Some("Durham".to_string()),
            state: Some("North Carolina".to_string()),
            postcode: Some("27701".to_string()),
        }
    }

    #[tokio::test]
    async fn test_short_query_skips_network() {
        let geocoder = StubGeocoder::with_candidates(vec![candidate("1", "Main Street")]);
        let suggester = Suggester::new(&geocoder);

        let suggestions = suggester.suggest("ab").await.unwrap();
        assert!(suggestions.is_empty());
        assert_eq!(geocoder.calls(), 0);
    }

    #[tokio::test]
    async fn test_suggestion_value_from_components() {
        let geocoder = StubGeocoder::with_candidates(vec![candidate("100", "West Main Street")]);
        let suggester = Suggester::new(&geocoder);

        let suggestions = suggester.suggest("100 west main").await.unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, "100 West Main Street, Durham, NC 27701");
    }

    #[tokio::test]
    async fn test_duplicate_values_collapse() {
        let geocoder = StubGeocoder::with_candidates(vec![
            candidate("100", "West Main Street"),
            candidate("100", "West Main Street"),
        ]);
        let suggester = Suggester::new(&geocoder);

        let suggestions = suggester.suggest("100 west main").await.unwrap();
        assert_eq!(suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_debounced_short_query_is_immediate() {
        let geocoder = Arc::new(StubGeocoder::with_candidates(Vec::new()));
        let debounced =
            DebouncedSuggester::with_delay(geocoder.clone(), Duration::from_secs(60));

        // A 60s delay would hang the test if the short-circuit ever slept.
        let result = debounced.suggest("ab").await.unwrap();
        assert_eq!(result, Some(Vec::new()));
        assert_eq!(geocoder.calls(), 0);
    }

    #[tokio::test]
    async fn test_superseded_query_yields_none() {
        let geocoder = Arc::new(StubGeocoder::with_candidates(vec![candidate(
            "100",
            "West Main Street",
        )]));
        let debounced = Arc::new(DebouncedSuggester::with_delay(
            geocoder.clone(),
            Duration::from_millis(100),
        ));

        let stale = {
            let debounced = debounced.clone();
            tokio::spawn(async move { debounced.suggest("100 west").await })
        };
        tokio::time::sleep(Duration::from_millis(25)).await;
        let fresh = debounced.suggest("100 west main").await.unwrap();

        assert_eq!(stale.await.unwrap().unwrap(), None);
        assert!(fresh.is_some());
        // Only the surviving query reached the geocoder
        assert_eq!(geocoder.calls(), 1);
    }
}
