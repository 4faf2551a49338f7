//! CV content: the JSON data model, loading, and small display helpers.
//!
//! Content lives in two files under the data directory: `cv-data.json`
//! (shared across languages, with inline per-language maps) and
//! `cv-descriptions-<lang>.json` (prose and section headings for one
//! language).

mod dates;
mod loader;
mod model;

pub use dates::format_period;
pub use loader::load_cv;
pub use model::{CvBundle, CvData, Descriptions, Localized};

use once_cell::sync::Lazy;
use regex::Regex;

static RE_URL_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://(www\.)?").unwrap());

/// Strip the scheme and `www.` prefix for display ("github.com/user").
pub fn display_url(url: &str) -> String {
    RE_URL_SCHEME.replace(url, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::display_url;

    #[test]
    fn strips_scheme_and_www() {
        assert_eq!(
            display_url("https://www.linkedin.com/in/ada"),
            "linkedin.com/in/ada"
        );
        assert_eq!(display_url("http://github.com/ada"), "github.com/ada");
        assert_eq!(display_url("github.com/ada"), "github.com/ada");
    }
}
