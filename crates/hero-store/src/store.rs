use crate::types::{Hero, HeroId, NewHero};

#[derive(Debug, thiserror::Error)]
pub enum HeroStoreError {
    #[error("resource not found: {resource} ({id})")]
    NotFound { resource: &'static str, id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("backend failure: {0}")]
    Backend(String),
}

impl HeroStoreError {
    pub fn hero_not_found(id: HeroId) -> Self {
        Self::NotFound {
            resource: "hero",
            id: id.to_string(),
        }
    }
}

pub type HeroStoreResult<T> = Result<T, HeroStoreError>;

/// One named hero collection, wherever it lives.
///
/// Every method maps to a single call against the backing collection.
#[async_trait::async_trait]
pub trait HeroStore: Send + Sync {
    /// `GET <collection>`
    async fn list_heroes(&self) -> HeroStoreResult<Vec<Hero>>;

    /// `GET <collection>/?id=<id>`, taking the first of zero or one matches.
    async fn find_hero(&self, id: HeroId) -> HeroStoreResult<Option<Hero>>;

    /// `GET <collection>/<id>`; a missing record is `Ok(None)`.
    async fn get_hero(&self, id: HeroId) -> HeroStoreResult<Option<Hero>>;

    /// `GET <collection>/?name=<term>`, case-sensitive substring match.
    async fn search_heroes(&self, term: &str) -> HeroStoreResult<Vec<Hero>>;

    /// `POST <collection>`
    async fn add_hero(&self, hero: NewHero) -> HeroStoreResult<Hero>;

    /// `PUT <collection>`
    async fn update_hero(&self, hero: &Hero) -> HeroStoreResult<()>;

    /// `DELETE <collection>/<id>`
    async fn delete_hero(&self, id: HeroId) -> HeroStoreResult<()>;
}

#[async_trait::async_trait]
impl<T> HeroStore for std::sync::Arc<T>
where
    T: HeroStore + ?Sized,
{
    async fn list_heroes(&self) -> HeroStoreResult<Vec<Hero>> {
        (**self).list_heroes().await
    }

    async fn find_hero(&self, id: HeroId) -> HeroStoreResult<Option<Hero>> {
        (**self).find_hero(id).await
    }

    async fn get_hero(&self, id: HeroId) -> HeroStoreResult<Option<Hero>> {
        (**self).get_hero(id).await
    }

    async fn search_heroes(&self, term: &str) -> HeroStoreResult<Vec<Hero>> {
        (**self).search_heroes(term).await
    }

    async fn add_hero(&self, hero: NewHero) -> HeroStoreResult<Hero> {
        (**self).add_hero(hero).await
    }

    async fn update_hero(&self, hero: &Hero) -> HeroStoreResult<()> {
        (**self).update_hero(hero).await
    }

    async fn delete_hero(&self, id: HeroId) -> HeroStoreResult<()> {
        (**self).delete_hero(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_not_found_expected_metadata() {
        let error = HeroStoreError::hero_not_found(42);

        assert!(matches!(
            error,
            HeroStoreError::NotFound {
                resource: "hero",
                ..
            }
        ));
        assert_eq!(error.to_string(), "resource not found: hero (42)");
    }

    #[test]
    fn transport_error_display_expected_prefixed_message() {
        let error = HeroStoreError::Transport("connection refused".to_string());
        assert_eq!(error.to_string(), "transport failure: connection refused");
    }
}
