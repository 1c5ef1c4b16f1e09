//! Paginated log retrieval.
//!
//! Pagination is a sequential awaited loop: each page must arrive (or fail)
//! before the next cursor is requested, which is what keeps the assembled
//! content in exact chronological order. The store signals the end of a
//! stream by returning the token the request just used; that is its designed
//! idle signal, not an error.

use logdock_core::log_store::LogStore;

use crate::error::Result;

/// Fetches every event of the named stream and joins the messages.
///
/// Messages are concatenated with `\n`, preserving page order and
/// within-page order. An empty stream yields the empty string.
///
/// # Errors
///
/// Returns [`logdock_core::Error::StreamNotFound`] unchanged when the
/// stream does not exist, and any other store failure unchanged. No retry
/// is attempted; invocation-level retry belongs to the platform.
pub async fn fetch_log_content(
    store: &dyn LogStore,
    log_group: &str,
    log_stream: &str,
) -> Result<String> {
    let mut messages: Vec<String> = Vec::new();
    let mut token: Option<String> = None;

    loop {
        let page = store
            .get_log_events(log_group, log_stream, true, token.as_deref())
            .await?;

        messages.extend(page.events.into_iter().map(|event| event.message));

        // No forward progress: the store handed back the cursor we sent.
        if page.next_forward_token == token {
            break;
        }
        token = page.next_forward_token;
    }

    Ok(messages.join("\n"))
}
