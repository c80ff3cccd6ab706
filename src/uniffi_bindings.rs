//! UniFFI bindings for recipe-box
//!
//! This module provides FFI-compatible types and functions so the iOS and
//! Android apps share one implementation of the share format and the list
//! filters. Everything here is synchronous; no runtime is needed.

use std::fmt;

use crate::{catalog, share, CatalogError, Recipe, RecipeFields, RecipeId, RecipeImage};

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible recipe structure
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    /// Recipe id as a UUID string
    pub id: String,
    pub name: String,
    pub category: String,
    /// Minutes
    pub preptime: u32,
    /// Minutes
    pub cooktime: u32,
    /// Always preptime + cooktime; ignored on the way in
    pub totaltime: u32,
    pub ingredients: String,
    pub method: String,
    pub notes: String,
    /// Image bytes, or None for no image
    pub image: Option<Vec<u8>>,
}

/// Fields decoded from share text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiSharedRecipe {
    pub name: String,
    pub preptime: u32,
    pub cooktime: u32,
    pub totaltime: u32,
    pub ingredients: String,
    pub method: String,
    pub notes: String,
}

impl From<&Recipe> for FfiRecipe {
    fn from(recipe: &Recipe) -> Self {
        FfiRecipe {
            id: recipe.id().to_string(),
            name: recipe.name.clone(),
            category: recipe.category.clone(),
            preptime: recipe.preptime(),
            cooktime: recipe.cooktime(),
            totaltime: recipe.totaltime(),
            ingredients: recipe.ingredients.clone(),
            method: recipe.method.clone(),
            notes: recipe.notes.clone(),
            image: match &recipe.image {
                RecipeImage::Placeholder => None,
                RecipeImage::Photo(bytes) => Some(bytes.clone()),
            },
        }
    }
}

impl TryFrom<FfiRecipe> for Recipe {
    type Error = FfiCatalogError;

    fn try_from(ffi: FfiRecipe) -> Result<Self, Self::Error> {
        let id: RecipeId = ffi.id.parse().map_err(|e| FfiCatalogError::InvalidInput {
            message: format!("invalid recipe id '{}': {}", ffi.id, e),
        })?;
        Ok(Recipe::with_id(
            id,
            RecipeFields {
                name: ffi.name,
                category: ffi.category,
                preptime: ffi.preptime,
                cooktime: ffi.cooktime,
                ingredients: ffi.ingredients,
                method: ffi.method,
                notes: ffi.notes,
                image: ffi.image.map_or(RecipeImage::Placeholder, RecipeImage::Photo),
            },
        ))
    }
}

impl From<share::DecodedRecipe> for FfiSharedRecipe {
    fn from(decoded: share::DecodedRecipe) -> Self {
        FfiSharedRecipe {
            preptime: decoded.preptime(),
            cooktime: decoded.cooktime(),
            totaltime: decoded.totaltime(),
            name: decoded.name,
            ingredients: decoded.ingredients,
            method: decoded.method,
            notes: decoded.notes,
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiCatalogError {
    /// Share text did not match the expected format
    FormatError { message: String },
    /// Nothing to import
    NoData { message: String },
    /// Referenced recipe does not exist
    NotFound { message: String },
    /// Invalid input provided
    InvalidInput { message: String },
    /// Storage or configuration failure
    Internal { message: String },
}

impl fmt::Display for FfiCatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiCatalogError::FormatError { message } => write!(f, "Format error: {}", message),
            FfiCatalogError::NoData { message } => write!(f, "No data: {}", message),
            FfiCatalogError::NotFound { message } => write!(f, "Not found: {}", message),
            FfiCatalogError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            FfiCatalogError::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for FfiCatalogError {}

impl From<CatalogError> for FfiCatalogError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::Format(_) => FfiCatalogError::FormatError { message },
            CatalogError::NoData => FfiCatalogError::NoData { message },
            CatalogError::NotFound(_) => FfiCatalogError::NotFound { message },
            CatalogError::InvalidDraft(_) => FfiCatalogError::InvalidInput { message },
            CatalogError::Io(_) | CatalogError::Json(_) | CatalogError::Config(_) => {
                FfiCatalogError::Internal { message }
            }
        }
    }
}

/// Render a recipe as share text
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn encode_share_text(recipe: FfiRecipe) -> Result<String, FfiCatalogError> {
    let recipe = Recipe::try_from(recipe)?;
    Ok(share::encode(&recipe))
}

/// Parse share text (e.g. pasteboard contents).
///
/// Pass `None` when the pasteboard is empty so the caller gets `NoData`
/// rather than a format error.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn decode_share_text(text: Option<String>) -> Result<FfiSharedRecipe, FfiCatalogError> {
    let mut transport = match text {
        Some(text) => crate::MemoryTransport::with_text(text),
        None => crate::MemoryTransport::new(),
    };
    let decoded = crate::import_from_transport(&mut transport)?;
    Ok(decoded.into())
}

/// Recipes in `category`, or all of them when `category` is None
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn filter_recipes(
    recipes: Vec<FfiRecipe>,
    category: Option<String>,
) -> Result<Vec<FfiRecipe>, FfiCatalogError> {
    let recipes = to_recipes(recipes)?;
    Ok(catalog::filter(&recipes, category.as_deref())
        .into_iter()
        .map(FfiRecipe::from)
        .collect())
}

/// Recipes whose name contains `query`, ignoring case
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn search_recipes(
    recipes: Vec<FfiRecipe>,
    query: String,
) -> Result<Vec<FfiRecipe>, FfiCatalogError> {
    let recipes = to_recipes(recipes)?;
    Ok(catalog::search(&recipes, &query)
        .into_iter()
        .map(FfiRecipe::from)
        .collect())
}

/// The category menu, in display order
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn category_list() -> Vec<String> {
    crate::DEFAULT_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn to_recipes(recipes: Vec<FfiRecipe>) -> Result<Vec<Recipe>, FfiCatalogError> {
    recipes.into_iter().map(Recipe::try_from).collect()
}
