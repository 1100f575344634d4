//! Tender document links
//!
//! Stored file URLs come in several shapes: absolute URLs, paths relative to
//! the backend (`/uploads/...`), and occasionally a path on the uploader's own
//! machine that no browser can reach. [`DocumentLink::resolve`] sorts them out.

const VIEWER_PARAMS: &str = "#toolbar=1&navpanes=0&scrollbar=1";
const DEFAULT_DOWNLOAD_NAME: &str = "document.pdf";
const LOCAL_FILE_PREFIXES: [&str; 3] = ["file:///", "C:", "/Users"];

/// Where a stored document can be fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentLink {
    /// No document attached
    Missing,
    /// Path on the uploader's machine; not reachable from a browser
    LocalFile { path: String },
    /// Fetchable URL, plus the name offered when downloading
    Remote { url: String, file_name: String },
}

impl DocumentLink {
    pub fn resolve(url: &str, asset_origin: &str) -> Self {
        let url = url.trim();
        if url.is_empty() {
            return Self::Missing;
        }
        if LOCAL_FILE_PREFIXES.iter().any(|p| url.starts_with(p)) {
            return Self::LocalFile {
                path: url.to_string(),
            };
        }

        let full = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            join_origin(asset_origin, url)
        };

        Self::Remote {
            url: full,
            file_name: download_name(url),
        }
    }

    /// Direct URL of the document
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Remote { url, .. } => Some(url),
            _ => None,
        }
    }

    /// URL for the embedded PDF viewer
    pub fn viewer_url(&self) -> Option<String> {
        self.url().map(|url| format!("{}{}", url, VIEWER_PARAMS))
    }

    pub fn download_name(&self) -> Option<&str> {
        match self {
            Self::Remote { file_name, .. } => Some(file_name),
            _ => None,
        }
    }

    /// Explanation shown instead of the document when it cannot be opened
    pub fn explanation(&self) -> Option<&'static str> {
        match self {
            Self::Missing => Some("No document is attached."),
            Self::LocalFile { .. } => Some(
                "This file is stored locally and cannot be opened through the browser. \
                 Please upload the file to the server.",
            ),
            Self::Remote { .. } => None,
        }
    }
}

fn download_name(url: &str) -> String {
    url.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(DEFAULT_DOWNLOAD_NAME)
        .to_string()
}

/// Resolve a backend-relative path against the asset origin.
///
/// The path is joined below any path the origin already carries, so
/// `https://eali.bi/backend` + `/uploads/a.pdf` stays under `/backend`.
fn join_origin(origin: &str, path: &str) -> String {
    let base = format!("{}/", origin.trim_end_matches('/'));
    let relative = path.trim_start_matches('/');
    match reqwest::Url::parse(&base).and_then(|base| base.join(relative)) {
        Ok(joined) => joined.to_string(),
        Err(_) => format!("{}{}", base, relative),
    }
}
