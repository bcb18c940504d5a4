use crate::validate::validate_url;
use async_trait::async_trait;
use std::sync::Arc;
use tinyurl_core::{
    Mapping, Repository, ShortCode, Shortened, Shortener, ShortenerError, StorageError,
};
use tinyurl_generator::Deriver;
use tracing::{debug, info, warn};

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Deriver` to handle:
/// - URL validation
/// - de-duplication of already shortened URLs
/// - code derivation and insertion
///
/// Every call goes straight to the repository; nothing is cached between
/// requests.
///
/// Two distinct URLs whose derived codes collide are not reconciled: the
/// second one fails with [`ShortenerError::Collision`]. When the insert loses
/// a race against a concurrent shortening of the *same* URL, the stored row
/// is read back and returned as an existing binding.
#[derive(Debug)]
pub struct ShortenerService<R, D> {
    repository: Arc<R>,
    deriver: Arc<D>,
}

impl<R, D> Clone for ShortenerService<R, D> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            deriver: Arc::clone(&self.deriver),
        }
    }
}

impl<R: Repository, D: Deriver> ShortenerService<R, D> {
    pub fn new(repository: R, deriver: D) -> Self {
        Self::from_shared(Arc::new(repository), deriver)
    }

    /// Builds the service around a repository the caller keeps a handle to,
    /// e.g. to close it on shutdown.
    pub fn from_shared(repository: Arc<R>, deriver: D) -> Self {
        Self {
            repository,
            deriver: Arc::new(deriver),
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Called after `insert` reported that `code` is taken.
    async fn reconcile_conflict(
        &self,
        code: ShortCode,
        full_url: &str,
    ) -> Result<Shortened, ShortenerError> {
        match self.repository.get(&code).await? {
            Some(stored) if stored == full_url => {
                debug!(code = %code, "lost insert race for the same url");
                Ok(Shortened {
                    code,
                    created: false,
                })
            }
            Some(stored) => {
                warn!(
                    code = %code,
                    url = %full_url,
                    existing_url = %stored,
                    "short code collision"
                );
                Err(ShortenerError::Collision {
                    code: code.into_inner(),
                })
            }
            // Rows are never deleted, so a conflicting code must still be there.
            None => Err(ShortenerError::Storage(StorageError::InvalidData(format!(
                "short code {code} reported as taken but not found"
            )))),
        }
    }
}

#[async_trait]
impl<R: Repository, D: Deriver> Shortener for ShortenerService<R, D> {
    async fn shorten(&self, full_url: &str) -> Result<Shortened, ShortenerError> {
        validate_url(full_url)?;

        if let Some(code) = self.repository.find_by_url(full_url).await? {
            debug!(code = %code, url = %full_url, "url already shortened");
            return Ok(Shortened {
                code,
                created: false,
            });
        }

        let code = self.deriver.derive(full_url);

        match self.repository.insert(&code, full_url).await {
            Ok(()) => {
                info!(code = %code, url = %full_url, "created short link");
                Ok(Shortened {
                    code,
                    created: true,
                })
            }
            Err(StorageError::Conflict(_)) => self.reconcile_conflict(code, full_url).await,
            Err(err) => Err(err.into()),
        }
    }

    async fn resolve(&self, code: &ShortCode) -> Result<String, ShortenerError> {
        self.repository
            .get(code)
            .await?
            .ok_or_else(|| ShortenerError::NotFound(code.to_string()))
    }

    async fn list(&self) -> Result<Vec<Mapping>, ShortenerError> {
        let mut mappings: Vec<Mapping> = self
            .repository
            .list()
            .await?
            .into_iter()
            .map(|(full_url, short_code)| Mapping {
                full_url,
                short_code,
            })
            .collect();

        mappings.sort_by(|a, b| a.full_url.cmp(&b.full_url));
        Ok(mappings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyurl_core::ReadRepository;
    use tinyurl_generator::Md5Deriver;
    use tinyurl_storage::InMemoryRepository;

    /// Maps every URL to the same code to force collisions.
    struct FixedDeriver(&'static str);

    impl Deriver for FixedDeriver {
        fn derive(&self, _url: &str) -> ShortCode {
            ShortCode::new_unchecked(self.0)
        }
    }

    fn test_service() -> ShortenerService<InMemoryRepository, Md5Deriver> {
        ShortenerService::new(InMemoryRepository::new(), Md5Deriver::default())
    }

    #[tokio::test]
    async fn shorten_derives_md5_prefix() {
        let service = test_service();

        let shortened = service.shorten("https://example.com").await.unwrap();
        assert_eq!(shortened.code.as_str(), "c984d06a");
        assert!(shortened.created);
    }

    #[tokio::test]
    async fn shorten_is_idempotent() {
        let service = test_service();

        let first = service.shorten("https://example.com").await.unwrap();
        let second = service.shorten("https://example.com").await.unwrap();

        assert_eq!(first.code, second.code);
        assert!(first.created);
        assert!(!second.created);
        assert_eq!(service.repository().len(), 1);
    }

    #[tokio::test]
    async fn shorten_then_resolve_round_trips() {
        let service = test_service();
        let url = "https://example.com/some/very/long/path?with=query";

        let shortened = service.shorten(url).await.unwrap();
        assert_eq!(service.resolve(&shortened.code).await.unwrap(), url);
    }

    #[tokio::test]
    async fn resolve_unknown_code_is_not_found() {
        let service = test_service();

        let err = service
            .resolve(&ShortCode::new("doesnotexist").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::NotFound(ref c) if c == "doesnotexist"));
    }

    #[tokio::test]
    async fn shorten_with_invalid_url_fails_without_touching_storage() {
        let service = test_service();

        let err = service.shorten("not a url").await.unwrap_err();
        assert!(matches!(err, ShortenerError::InvalidUrl(_)));
        assert!(service.repository().is_empty());
    }

    #[tokio::test]
    async fn list_is_sorted_by_full_url() {
        let service = test_service();

        service.shorten("https://b.com").await.unwrap();
        service.shorten("https://a.com").await.unwrap();

        let listed: Vec<(String, String)> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|m| (m.full_url, m.short_code.into_inner()))
            .collect();

        assert_eq!(
            listed,
            vec![
                ("https://a.com".to_string(), "66ccb499".to_string()),
                ("https://b.com".to_string(), "dda34245".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn list_on_empty_store() {
        let service = test_service();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn colliding_codes_are_rejected() {
        let service = ShortenerService::new(InMemoryRepository::new(), FixedDeriver("deadbeef"));

        service.shorten("https://one.example").await.unwrap();
        let err = service.shorten("https://two.example").await.unwrap_err();

        assert!(matches!(err, ShortenerError::Collision { ref code } if code == "deadbeef"));
        // the first binding is untouched
        assert_eq!(
            service
                .resolve(&ShortCode::new_unchecked("deadbeef"))
                .await
                .unwrap(),
            "https://one.example"
        );
        assert_eq!(
            service
                .repository()
                .find_by_url("https://two.example")
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn insert_race_on_same_url_is_reported_as_existing() {
        let service = test_service();
        let code = ShortCode::new_unchecked("c984d06a");

        // Simulate a concurrent request that inserted between our lookup and insert.
        let outcome = {
            service
                .repository()
                .insert(&code, "https://example.com")
                .await
                .unwrap();
            service
                .reconcile_conflict(code.clone(), "https://example.com")
                .await
                .unwrap()
        };

        assert_eq!(
            outcome,
            Shortened {
                code,
                created: false
            }
        );
    }

    #[tokio::test]
    async fn concurrent_shortening_of_same_url_yields_one_row() {
        let service = test_service();
        let mut handles = vec![];

        for _ in 0..32 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.shorten("https://novel.example/path").await
            }));
        }

        let mut created = 0;
        let mut codes = vec![];
        for handle in handles {
            let shortened = handle.await.unwrap().unwrap();
            if shortened.created {
                created += 1;
            }
            codes.push(shortened.code);
        }

        assert_eq!(created, 1);
        assert!(codes.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(service.repository().len(), 1);
    }
}
