// ABOUTME: sqldef GitHub release download and archive extraction
// ABOUTME: Follows the latest-release redirect chain to a tar.gz payload

pub mod extract;
pub mod fetch;

pub use extract::extract_entry;
pub use fetch::{release_url, HttpClient, HttpResponse, ReleaseFetcher, ReqwestClient};
