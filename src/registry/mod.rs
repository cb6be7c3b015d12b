pub mod codegen;
pub mod store;

use std::fmt;

use log::warn;
use url::Url;

use crate::models::url::ShortLink;
use codegen::CodeGenerator;
use store::{InsertOutcome, LinkStore};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

#[derive(Debug)]
pub enum RegistryError {
    /// The caller supplied something that can never succeed (bad URL).
    InvalidInput(String),
    /// No record matches the requested code.
    NotFound,
    /// Every generated candidate collided; the retry budget is spent.
    ResourceExhausted(u32),
    /// The backing store failed.
    Store(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::InvalidInput(msg) => write!(f, "{}", msg),
            RegistryError::NotFound => write!(f, "This link does not exist"),
            RegistryError::ResourceExhausted(attempts) => write!(
                f,
                "Could not allocate a unique short code after {} attempts",
                attempts
            ),
            RegistryError::Store(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Owns the mapping from short codes to original URLs. Holds no mutable
/// state of its own; all state lives in the injected store, and candidate
/// codes come from the injected generator so the collision policy is
/// testable with a scripted one.
pub struct Registry<S, G> {
    store: S,
    generator: G,
    base_url: String,
    max_attempts: u32,
}

impl<S: LinkStore, G: CodeGenerator> Registry<S, G> {
    pub fn new(store: S, generator: G, base_url: &str, max_attempts: u32) -> Self {
        Self {
            store,
            generator,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_attempts,
        }
    }

    /// Create a new short link for `original_url`.
    ///
    /// Concurrent callers may race on the same candidate code; the store's
    /// uniqueness constraint rejects all but one writer and the losers pick
    /// a fresh candidate, at most `max_attempts` times.
    pub async fn create(
        &self,
        original_url: &str,
        owner_id: Option<String>,
    ) -> Result<ShortLink, RegistryError> {
        let parsed = Url::parse(original_url)
            .map_err(|_| RegistryError::InvalidInput("Invalid URL format".to_string()))?;
        if !parsed.has_host() {
            return Err(RegistryError::InvalidInput(
                "URL must be absolute with a host".to_string(),
            ));
        }

        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate();
            let short_url = format!("{}/{}", self.base_url, code);
            let link = ShortLink::new(
                original_url.to_string(),
                short_url,
                code,
                owner_id.clone(),
            );

            match self.store.insert(&link).await? {
                InsertOutcome::Inserted => return Ok(link),
                InsertOutcome::DuplicateCode => {
                    warn!(
                        "short code collision on attempt {}/{}",
                        attempt, self.max_attempts
                    );
                }
            }
        }

        Err(RegistryError::ResourceExhausted(self.max_attempts))
    }

    /// Resolve a short code to its original URL. Exact, case-sensitive
    /// match; read-only.
    pub async fn resolve(&self, code: &str) -> Result<String, RegistryError> {
        match self.store.find_by_code(code).await? {
            Some(link) => Ok(link.original_url),
            None => Err(RegistryError::NotFound),
        }
    }

    /// All links created by `owner_id`, newest first.
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ShortLink>, RegistryError> {
        self.store.find_by_owner(owner_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::codegen::RandomCodeGenerator;
    use super::*;

    /// In-memory stand-in for MongoDB with the same uniqueness semantics.
    #[derive(Default)]
    struct MemoryLinkStore {
        links: Mutex<Vec<ShortLink>>,
        insert_calls: AtomicU32,
    }

    impl MemoryLinkStore {
        fn seed(&self, link: ShortLink) {
            self.links.lock().unwrap().push(link);
        }
    }

    impl LinkStore for &MemoryLinkStore {
        async fn insert(&self, link: &ShortLink) -> Result<InsertOutcome, RegistryError> {
            self.insert_calls.fetch_add(1, Ordering::SeqCst);
            let mut links = self.links.lock().unwrap();
            if links.iter().any(|l| l.code == link.code) {
                return Ok(InsertOutcome::DuplicateCode);
            }
            links.push(link.clone());
            Ok(InsertOutcome::Inserted)
        }

        async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, RegistryError> {
            let links = self.links.lock().unwrap();
            Ok(links.iter().find(|l| l.code == code).cloned())
        }

        async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<ShortLink>, RegistryError> {
            let links = self.links.lock().unwrap();
            let mut owned: Vec<ShortLink> = links
                .iter()
                .filter(|l| l.owner_id.as_deref() == Some(owner_id))
                .cloned()
                .collect();
            owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(owned)
        }
    }

    /// Generator that replays a fixed script of codes.
    struct ScriptedGenerator {
        codes: Mutex<VecDeque<String>>,
        fallback: String,
    }

    impl ScriptedGenerator {
        fn new(codes: &[&str], fallback: &str) -> Self {
            Self {
                codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
                fallback: fallback.to_string(),
            }
        }
    }

    impl CodeGenerator for ScriptedGenerator {
        fn generate(&self) -> String {
            self.codes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.fallback.clone())
        }
    }

    fn registry<'a, G: CodeGenerator>(
        store: &'a MemoryLinkStore,
        generator: G,
    ) -> Registry<&'a MemoryLinkStore, G> {
        Registry::new(store, generator, "https://lnk.ly", DEFAULT_MAX_ATTEMPTS)
    }

    fn link(code: &str, owner: Option<&str>, created_at: i64) -> ShortLink {
        ShortLink {
            id: None,
            original_url: format!("https://example.com/{}", code),
            short_url: format!("https://lnk.ly/{}", code),
            code: code.to_string(),
            owner_id: owner.map(|o| o.to_string()),
            created_at,
        }
    }

    #[actix_web::test]
    async fn create_then_resolve_round_trips() {
        let store = MemoryLinkStore::default();
        let reg = registry(&store, RandomCodeGenerator::default());

        let created = reg
            .create("https://example.com/a/b/c", Some("owner-1".to_string()))
            .await
            .unwrap();

        assert_eq!(created.short_url, format!("https://lnk.ly/{}", created.code));
        let resolved = reg.resolve(&created.code).await.unwrap();
        assert_eq!(resolved, "https://example.com/a/b/c");
    }

    #[actix_web::test]
    async fn sequential_creates_yield_distinct_codes() {
        let store = MemoryLinkStore::default();
        let reg = registry(&store, RandomCodeGenerator::default());

        let mut codes = Vec::new();
        for i in 0..50 {
            let created = reg
                .create(&format!("https://example.com/page/{}", i), None)
                .await
                .unwrap();
            codes.push(created.code);
        }
        let before = codes.len();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), before);
    }

    #[actix_web::test]
    async fn rejects_a_malformed_url() {
        let store = MemoryLinkStore::default();
        let reg = registry(&store, RandomCodeGenerator::default());

        let err = reg.create("not-a-url", None).await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidInput(_)));
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn rejects_a_url_without_a_host() {
        let store = MemoryLinkStore::default();
        let reg = registry(&store, RandomCodeGenerator::default());

        let err = reg.create("mailto:someone@example.com", None).await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidInput(_)));
    }

    #[actix_web::test]
    async fn resolving_an_unknown_code_is_not_found() {
        let store = MemoryLinkStore::default();
        let reg = registry(&store, RandomCodeGenerator::default());

        let err = reg.resolve("does-not-exist").await.unwrap_err();
        assert!(matches!(err, RegistryError::NotFound));
    }

    #[actix_web::test]
    async fn lookup_is_case_sensitive() {
        let store = MemoryLinkStore::default();
        store.seed(link("aZ3dQ1", None, 1));
        let reg = registry(&store, RandomCodeGenerator::default());

        assert!(reg.resolve("aZ3dQ1").await.is_ok());
        assert!(matches!(
            reg.resolve("AZ3DQ1").await.unwrap_err(),
            RegistryError::NotFound
        ));
    }

    #[actix_web::test]
    async fn collision_on_first_attempt_retries_with_a_fresh_code() {
        let store = MemoryLinkStore::default();
        store.seed(link("taken1", None, 1));
        let generator = ScriptedGenerator::new(&["taken1", "fresh1"], "fresh1");
        let reg = registry(&store, generator);

        let created = reg.create("https://example.com", None).await.unwrap();
        assert_eq!(created.code, "fresh1");
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 2);
    }

    #[actix_web::test]
    async fn exhausting_the_retry_budget_fails() {
        let store = MemoryLinkStore::default();
        store.seed(link("stuck1", None, 1));
        let generator = ScriptedGenerator::new(&[], "stuck1");
        let reg = registry(&store, generator);

        let err = reg.create("https://example.com", None).await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::ResourceExhausted(DEFAULT_MAX_ATTEMPTS)
        ));
        assert_eq!(
            store.insert_calls.load(Ordering::SeqCst),
            DEFAULT_MAX_ATTEMPTS
        );
    }

    #[actix_web::test]
    async fn list_by_owner_filters_and_orders_newest_first() {
        let store = MemoryLinkStore::default();
        store.seed(link("old111", Some("alice"), 100));
        store.seed(link("new111", Some("alice"), 300));
        store.seed(link("mid111", Some("alice"), 200));
        store.seed(link("other1", Some("bob"), 400));
        store.seed(link("anon11", None, 500));
        let reg = registry(&store, RandomCodeGenerator::default());

        let links = reg.list_by_owner("alice").await.unwrap();
        let codes: Vec<&str> = links.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["new111", "mid111", "old111"]);
    }

    #[actix_web::test]
    async fn base_url_trailing_slash_is_normalized() {
        let store = MemoryLinkStore::default();
        let reg = Registry::new(
            &store,
            ScriptedGenerator::new(&["aZ3dQ1"], "aZ3dQ1"),
            "https://lnk.ly/",
            DEFAULT_MAX_ATTEMPTS,
        );

        let created = reg.create("https://example.com/a/b/c", None).await.unwrap();
        assert_eq!(created.short_url, "https://lnk.ly/aZ3dQ1");
    }
}
