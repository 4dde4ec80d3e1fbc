use crate::error::FetchError;

/// Loads pages for the traversal driver.
///
/// Implementations return the rendered document source of `url`, or a
/// [`FetchError`] when the page cannot be checked. Errors are terminal for
/// that URL; the driver never retries.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&mut self, url: &str) -> Result<String, FetchError>;
}
