//! Lazy iteration over paginated list endpoints.

use std::collections::VecDeque;

use futures_util::Stream;
use futures_util::future::BoxFuture;
use futures_util::stream;

use crate::error::IcheckError;
use crate::types::{ListParams, RequestValues};

/// A page-fetch function: receives the encoded request values for one page
/// and returns its items.
pub type Query<'a, T> =
    Box<dyn FnMut(RequestValues) -> BoxFuture<'a, Result<Vec<T>, IcheckError>> + Send + 'a>;

/// Steps through the items of a paginated listing, fetching pages as needed.
///
/// The first call to [`next`](Iter::next) fetches the first page. Later pages
/// are requested only once the buffered items run out, with `skip` advanced
/// by the number of items already received. An empty page or an error ends
/// the iteration; the error is returned once and the query is never called
/// again.
///
/// An `Iter` is consumed by one task at a time (`&mut self`) and cannot be
/// restarted.
///
/// # Example
///
/// ```rust,no_run
/// use futures_util::FutureExt;
/// use icheck_api_client::iter::Iter;
/// use icheck_api_client::types::ListParams;
///
/// # async fn run() -> icheck_api_client::Result<()> {
/// let mut iter = Iter::new(Some(ListParams::new().limit(2)), None, |values| {
///     async move { Ok(values.get("skip").iter().map(|s| s.to_string()).collect()) }.boxed()
/// });
/// while let Some(item) = iter.next().await? {
///     println!("{item}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct Iter<'a, T> {
    query: Query<'a, T>,
    qs: RequestValues,
    params: ListParams,
    buffer: VecDeque<T>,
    done: bool,
}

impl<'a, T> Iter<'a, T> {
    /// Create an iterator over `query`, seeded with optional list params and
    /// base request values.
    pub fn new<Q>(params: Option<ListParams>, qs: Option<RequestValues>, query: Q) -> Self
    where
        Q: FnMut(RequestValues) -> BoxFuture<'a, Result<Vec<T>, IcheckError>> + Send + 'a,
    {
        Self {
            query: Box::new(query),
            qs: qs.unwrap_or_default(),
            params: params.unwrap_or_default(),
            buffer: VecDeque::new(),
            done: false,
        }
    }

    /// Fetch the next item, requesting a new page when the buffer is empty.
    ///
    /// Returns `Ok(None)` once the listing is exhausted or after an error.
    pub async fn next(&mut self) -> Result<Option<T>, IcheckError> {
        if let Some(item) = self.buffer.pop_front() {
            return Ok(Some(item));
        }

        if self.done {
            return Ok(None);
        }

        let mut values = self.qs.clone();
        self.params.append_to(&mut values);

        match (self.query)(values).await {
            Ok(items) if items.is_empty() => {
                self.done = true;
                Ok(None)
            }
            Ok(items) => {
                self.params.skip += items.len();
                self.buffer = VecDeque::from(items);
                Ok(self.buffer.pop_front())
            }
            Err(e) => {
                self.done = true;
                Err(e)
            }
        }
    }

    /// Collect all remaining items into a `Vec`.
    pub async fn collect(mut self) -> Result<Vec<T>, IcheckError> {
        let mut all = Vec::new();
        while let Some(item) = self.next().await? {
            all.push(item);
        }
        Ok(all)
    }

    /// Convert into a [`Stream`] of items.
    pub fn into_stream(self) -> impl Stream<Item = Result<T, IcheckError>> + Send + 'a
    where
        T: Send + 'a,
    {
        stream::unfold(self, |mut iter| async move {
            match iter.next().await {
                Ok(Some(item)) => Some((Ok(item), iter)),
                Ok(None) => None,
                Err(e) => Some((Err(e), iter)),
            }
        })
    }
}

impl<T> std::fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iter")
            .field("qs", &self.qs)
            .field("params", &self.params)
            .field("buffered", &self.buffer.len())
            .field("done", &self.done)
            .finish()
    }
}
