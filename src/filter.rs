//! URL filtering
//!
//! Raw input lines become attemptable URLs only if they parse as
//! well-formed URLs with an `http` or `https` scheme. Everything else is
//! dropped without comment; order is kept and duplicates are not removed.

use std::io::BufRead;
use tracing::{debug, trace, warn};
use url::Url;

/// Check whether a single string is an attemptable URL
///
/// Embedded whitespace and control characters are rejected outright:
/// `Url::parse` would strip tabs and newlines, and the URL attempted must be
/// the one written to the record.
pub fn is_valid_url(candidate: &str) -> bool {
    if candidate.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Filter raw lines into attemptable URLs, preserving input order
///
/// Each surviving entry is the trimmed line itself, not a normalized form,
/// so records carry the URL exactly as it was requested.
pub fn filter_urls<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let candidate = line.as_ref().trim();
            if candidate.is_empty() {
                return None;
            }
            if is_valid_url(candidate) {
                Some(candidate.to_string())
            } else {
                trace!("Dropping invalid URL: {:?}", candidate);
                None
            }
        })
        .collect()
}

/// Read newline-delimited URLs from a stream and filter them
///
/// Reading stops at the first I/O error; lines read up to that point are
/// still filtered and returned.
pub fn read_urls<R: BufRead>(reader: R) -> Vec<String> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        match line {
            Ok(line) => lines.push(line),
            Err(e) => {
                debug!("Stopped reading input: {}", e);
                break;
            }
        }
    }
    let urls = filter_urls(&lines);
    debug!("Accepted {} of {} input lines", urls.len(), lines.len());
    urls
}

/// Pick the URLs for a run
///
/// An explicit URL wins and the stream is never read; it is still filtered,
/// so an invalid one yields nothing. Without one, the stream is read only
/// when it is not interactive.
pub fn select_urls<R: BufRead>(
    single: Option<&str>,
    reader: R,
    interactive: bool,
) -> Vec<String> {
    if let Some(url) = single {
        let urls = filter_urls([url]);
        if urls.is_empty() {
            warn!("Ignoring invalid URL: {}", url);
        }
        return urls;
    }

    if interactive {
        debug!("No URL given and input is a terminal; nothing to do");
        return Vec::new();
    }

    read_urls(reader)
}
