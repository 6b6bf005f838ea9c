//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

fn default_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

#[derive(Clone, Debug, Deserialize)]
/// Settings for the command-line tool.
pub struct AppConfig {
    pub database_url: String,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}
