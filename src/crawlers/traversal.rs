use crate::crawlers::{Frontier, PageFetcher};
use crate::filter::UrlFilter;
use crate::parsers;
use crate::results::AuditResults;
use url::Url;

/// Audits the site breadth-first, one page at a time, starting at the
/// filter's base URL.
///
/// Stops when no URLs are pending or `max_pages` pages have been checked.
/// Pages that fail to load are recorded in [`AuditResults::failed`] and
/// never requested again.
pub async fn traverse<F: PageFetcher>(
    fetcher: &mut F,
    filter: &UrlFilter,
    max_pages: usize,
) -> AuditResults {
    let base_url = filter.base_url().as_str();
    let mut results = AuditResults::new(base_url);
    let mut frontier = Frontier::new();
    frontier.push(base_url);

    while frontier.has_pending() && frontier.checked_count() < max_pages {
        let Some(url) = frontier.pop() else {
            break;
        };
        if frontier.is_checked(&url) {
            continue;
        }

        ::log::info!("Checking: {}", url);
        let source = match fetcher.fetch(&url).await {
            Ok(source) => source,
            Err(e) => {
                ::log::error!("Error checking {}: {}", url, e);
                frontier.mark_failed(&url);
                results.record_failure(&url, e);
                continue;
            }
        };

        let page_url = match Url::parse(&url) {
            Ok(page_url) => page_url,
            Err(e) => {
                ::log::error!("Skipping unparseable URL {}: {}", url, e);
                frontier.mark_failed(&url);
                results.record_failure(&url, e);
                continue;
            }
        };

        let parsed = parsers::parse(&source, &page_url, filter);
        let page = results.record(&url, &parsed.signals);
        ::log::debug!("{} has {} issue(s)", url, page.issue_count());
        frontier.mark_checked(&url);

        for link in &parsed.links {
            if frontier.push(link.as_str()) {
                ::log::debug!("Queuing link for checking: {}", link);
            }
        }

        ::log::info!(
            "Checked: {}, Pending: {}",
            frontier.checked_count(),
            frontier.pending_count()
        );
    }

    results
}
