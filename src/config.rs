use config::{Config, ConfigError, Environment, File};
use log::debug;
use serde::Deserialize;

use crate::error::CatalogError;

/// The category set shared by the recipe form and the list filter.
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Breakfast",
    "Appetizers",
    "Main Courses",
    "Soups",
    "Salads",
    "Desserts",
    "Snacks",
    "Beverages",
];

/// Catalog configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Categories offered by the form and the filter menu, in menu order
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    /// Path of the JSON file the CLI keeps recipes in
    #[serde(default = "default_store_path")]
    pub store_path: String,
    /// Longest name the form accepts, in characters
    #[serde(default = "default_name_max_len")]
    pub name_max_len: usize,
    /// File holding the "no image" placeholder blob. When unset, an empty
    /// blob is the placeholder.
    #[serde(default)]
    pub placeholder_image: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            store_path: default_store_path(),
            name_max_len: default_name_max_len(),
            placeholder_image: None,
        }
    }
}

// Default value functions
fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

fn default_store_path() -> String {
    "recipes.json".to_string()
}

fn default_name_max_len() -> usize {
    35
}

impl CatalogConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BOX__ prefix
    /// 2. recipe-box.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_BOX__STORE_PATH
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Category the form starts on when nothing else is selected
    pub fn default_category(&self) -> &str {
        self.categories
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_CATEGORIES[0])
    }

    pub fn is_known_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Read the placeholder blob; empty when none is configured
    pub fn placeholder_bytes(&self) -> Result<Vec<u8>, CatalogError> {
        match &self.placeholder_image {
            Some(path) => Ok(std::fs::read(path)?),
            None => Ok(Vec::new()),
        }
    }
}

/// Load configuration from file and environment variables
///
/// See [`CatalogConfig::load`] for the source priority.
pub fn load_config() -> Result<CatalogConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-box").required(false))
        // Use double underscore for nested keys: RECIPE_BOX__STORE_PATH
        .add_source(
            Environment::with_prefix("RECIPE_BOX")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("categories")
                .try_parsing(true),
        )
        .build()?;

    let config: CatalogConfig = settings.try_deserialize()?;
    debug!(
        "Loaded config: {} categories, store at {}",
        config.categories.len(),
        config.store_path
    );
    Ok(config)
}
