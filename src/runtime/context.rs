//! The query queue and its executor.
//!
//! [`ClientContext`] is the shared handle every proxy holds. Entity methods
//! enqueue [`ClientQuery`] values on it; nothing touches the network until
//! [`execute_query`](ClientContext::execute_query) is awaited.
//!
//! # Execution
//!
//! Pending queries run strictly in the order they were enqueued, one HTTP
//! round trip each. A continuation registered by
//! [`ClientObject::ensure_property`] runs right after the read it waits for;
//! queries it enqueues are executed in the same flush. The first failure
//! discards the remaining queue and is returned.
//!
//! # Example
//!
//! ```rust,ignore
//! use sharepoint_api::{ClientConfig, ClientContext, SiteUrl, AccessToken};
//!
//! let config = ClientConfig::builder()
//!     .site_url(SiteUrl::new("https://contoso.sharepoint.com/sites/dev")?)
//!     .access_token(AccessToken::new(token)?)
//!     .build()?;
//! let ctx = ClientContext::new(config)?;
//!
//! let list = ctx.web().lists().get_by_title("Tasks");
//! let items = list.get_items(None);
//! ctx.execute_query().await?;
//!
//! println!("{} items", items.len());
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::clients::{HttpClient, HttpRequest, API_BASE_PATH};
use crate::config::{ClientConfig, SiteUrl};
use crate::runtime::client_object::ClientObject;
use crate::runtime::errors::ClientError;
use crate::runtime::query::ClientQuery;

/// A hook that adjusts the HTTP request of a query before it is sent.
pub type RequestHook = Box<dyn FnOnce(&mut HttpRequest) + Send>;

/// Work to run after a query has been applied.
pub type Continuation = Box<dyn FnOnce() + Send>;

struct PendingQuery {
    query: ClientQuery,
    before: Vec<RequestHook>,
    after: Vec<Continuation>,
}

impl PendingQuery {
    fn new(query: ClientQuery) -> Self {
        Self {
            query,
            before: Vec::new(),
            after: Vec::new(),
        }
    }
}

struct ContextInner {
    config: ClientConfig,
    http_client: HttpClient,
    pending: Mutex<VecDeque<PendingQuery>>,
}

/// Shared query context for one SharePoint site.
///
/// Cloning is cheap; clones share the queue.
///
/// # Thread Safety
///
/// `ClientContext` is `Send + Sync`. The queue lock is never held across
/// an `.await`.
///
/// # Ownership
///
/// Proxies hold their context, and pending queries hold their proxies.
/// Run [`execute_query`](Self::execute_query) or
/// [`clear_pending`](Self::clear_pending) before dropping the last handles;
/// a context dropped with queries still pending is never freed.
#[derive(Clone)]
pub struct ClientContext(Arc<ContextInner>);

// Verify ClientContext is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientContext>();
};

impl ClientContext {
    /// Creates a context for the configured site.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http_client = HttpClient::new(API_BASE_PATH, &config)?;
        Ok(Self(Arc::new(ContextInner {
            config,
            http_client,
            pending: Mutex::new(VecDeque::new()),
        })))
    }

    fn pending(&self) -> MutexGuard<'_, VecDeque<PendingQuery>> {
        self.0.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.0.config
    }

    /// Returns the site URL.
    #[must_use]
    pub fn site_url(&self) -> &SiteUrl {
        self.0.config.site_url()
    }

    /// Returns the root URL of the service (scheme and host).
    ///
    /// Server-relative URLs returned by SharePoint append directly to it.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.0.config.site_url().origin()
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub fn http_client(&self) -> &HttpClient {
        &self.0.http_client
    }

    /// Enqueues a query.
    pub fn add_query(&self, query: ClientQuery) {
        self.push(PendingQuery::new(query));
    }

    /// Enqueues a query followed by a continuation.
    pub(crate) fn add_query_then(&self, query: ClientQuery, continuation: Continuation) {
        let mut pending = PendingQuery::new(query);
        pending.after.push(continuation);
        self.push(pending);
    }

    fn push(&self, pending: PendingQuery) {
        tracing::debug!(
            "Queued {} query for {}",
            pending.query.kind(),
            pending
                .query
                .target()
                .resource_path()
                .map_or_else(|| "<unbound>".to_string(), |path| path.to_url())
        );
        self.pending().push_back(pending);
    }

    /// Registers a hook adjusting the request of the most recently
    /// enqueued query.
    pub fn before_execute<F>(&self, hook: F)
    where
        F: FnOnce(&mut HttpRequest) + Send + 'static,
    {
        let mut pending = self.pending();
        match pending.back_mut() {
            Some(last) => last.before.push(Box::new(hook)),
            None => tracing::warn!("before_execute called with no pending query; hook ignored"),
        }
    }

    /// Enqueues a read of `object`, restricted to `select` when non-empty.
    pub fn load(&self, object: &ClientObject, select: &[&str]) {
        self.add_query(Self::read_query(object, select, &[]));
    }

    /// Enqueues a read of `object` that returns the `expand` navigation
    /// properties inline, so they are hydrated as nested proxies.
    pub fn load_expanded(&self, object: &ClientObject, select: &[&str], expand: &[&str]) {
        self.add_query(Self::read_query(object, select, expand));
    }

    pub(crate) fn load_then(
        &self,
        object: &ClientObject,
        select: &[&str],
        continuation: Continuation,
    ) {
        self.add_query_then(Self::read_query(object, select, &[]), continuation);
    }

    fn read_query(object: &ClientObject, select: &[&str], expand: &[&str]) -> ClientQuery {
        fn owned(names: &[&str]) -> Vec<String> {
            names.iter().map(|name| (*name).to_string()).collect()
        }
        ClientQuery::Read {
            target: object.clone(),
            select: owned(select),
            expand: owned(expand),
        }
    }

    /// Returns copies of the pending queries, in execution order.
    #[must_use]
    pub fn pending_queries(&self) -> Vec<ClientQuery> {
        self.pending()
            .iter()
            .map(|pending| pending.query.clone())
            .collect()
    }

    /// Returns the number of pending queries.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending().len()
    }

    /// Discards all pending queries without executing them.
    ///
    /// This also releases the proxies the queries held.
    pub fn clear_pending(&self) {
        self.pending().clear();
    }

    /// Executes all pending queries in order.
    ///
    /// # Errors
    ///
    /// Returns the first failure. The queries after it are discarded.
    pub async fn execute_query(&self) -> Result<(), ClientError> {
        loop {
            let next = self.pending().pop_front();
            let Some(pending) = next else {
                return Ok(());
            };

            if let Err(error) = self.execute_pending(pending).await {
                let dropped = {
                    let mut queue = self.pending();
                    let dropped = queue.len();
                    queue.clear();
                    dropped
                };
                tracing::warn!(
                    "Query failed, discarding {} pending queries: {}",
                    dropped,
                    error
                );
                return Err(error);
            }
        }
    }

    async fn execute_pending(&self, pending: PendingQuery) -> Result<(), ClientError> {
        let PendingQuery {
            query,
            before,
            after,
        } = pending;

        let mut request = query.to_request()?;
        for hook in before {
            hook(&mut request);
        }

        let path = request.path.clone();
        let response = self
            .0
            .http_client
            .request(request)
            .await
            .map_err(|error| ClientError::from_http(error, &path))?;

        query.apply_response(&response.body)?;

        for continuation in after {
            continuation();
        }
        Ok(())
    }
}

impl fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientContext")
            .field("site_url", self.site_url())
            .field("pending", &self.pending_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::path::ResourcePath;
    use crate::runtime::query::ServiceOperationQuery;
    use crate::clients::HttpMethod;

    fn test_context() -> ClientContext {
        let config = ClientConfig::builder()
            .site_url(SiteUrl::new("https://contoso.sharepoint.com/sites/dev").unwrap())
            .build()
            .unwrap();
        ClientContext::new(config).unwrap()
    }

    #[test]
    fn test_base_url_is_site_origin() {
        let ctx = test_context();
        assert_eq!(ctx.base_url(), "https://contoso.sharepoint.com");
        assert_eq!(ctx.site_url().as_ref(), "https://contoso.sharepoint.com/sites/dev");
    }

    #[test]
    fn test_queries_keep_enqueue_order() {
        let ctx = test_context();
        let web = ClientObject::new(&ctx, Some(ResourcePath::new("Web")));

        ctx.add_query(ClientQuery::ServiceOperation(ServiceOperationQuery::new(&web, "First")));
        ctx.load(&web, &["Title"]);
        ctx.add_query(ClientQuery::DeleteEntity { target: web.clone() });

        let kinds: Vec<_> = ctx.pending_queries().iter().map(ClientQuery::kind).collect();
        assert_eq!(kinds, vec!["service operation", "read", "delete"]);
    }

    #[test]
    fn test_clear_pending() {
        let ctx = test_context();
        let web = ClientObject::new(&ctx, Some(ResourcePath::new("Web")));
        ctx.load(&web, &[]);
        ctx.load(&web, &[]);
        assert_eq!(ctx.pending_count(), 2);

        ctx.clear_pending();
        assert_eq!(ctx.pending_count(), 0);
    }

    #[test]
    fn test_cleared_context_is_freed_with_its_proxies() {
        let ctx = test_context();
        let web = ClientObject::new(&ctx, Some(ResourcePath::new("Web")));
        ctx.load(&web, &[]);
        let inner = Arc::downgrade(&ctx.0);

        ctx.clear_pending();
        drop(web);
        drop(ctx);

        assert!(inner.upgrade().is_none());
    }

    #[test]
    fn test_executed_context_is_freed_with_its_proxies() {
        let ctx = test_context();
        let unbound = ClientObject::new(&ctx, None);
        ctx.load(&unbound, &[]);
        let inner = Arc::downgrade(&ctx.0);

        let result = tokio_test::block_on(ctx.execute_query());
        assert!(result.is_err());
        drop(unbound);
        drop(ctx);

        assert!(inner.upgrade().is_none());
    }

    #[test]
    fn test_before_execute_without_queries_is_ignored() {
        let ctx = test_context();
        ctx.before_execute(|request| request.http_method = HttpMethod::Get);
        assert_eq!(ctx.pending_count(), 0);
    }

    #[test]
    fn test_execute_empty_queue_succeeds() {
        let ctx = test_context();
        let result = tokio_test::block_on(ctx.execute_query());
        assert!(result.is_ok());
    }

    #[test]
    fn test_unbound_query_fails_and_clears_queue() {
        let ctx = test_context();
        let unbound = ClientObject::new(&ctx, None);
        let web = ClientObject::new(&ctx, Some(ResourcePath::new("Web")));
        ctx.load(&unbound, &[]);
        ctx.load(&web, &[]);

        let result = tokio_test::block_on(ctx.execute_query());

        assert!(matches!(result, Err(ClientError::UnresolvedPath { .. })));
        assert_eq!(ctx.pending_count(), 0);
    }
}
