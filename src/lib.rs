pub mod catalog;
pub mod config;
pub mod draft;
pub mod error;
pub mod model;
pub mod share;
pub mod store;
pub mod transport;
pub mod uniffi_bindings;

use log::{info, warn};

pub use catalog::{filter, search, CatalogQuery};
pub use config::{CatalogConfig, DEFAULT_CATEGORIES};
pub use draft::{DraftIssue, RecipeDraft};
pub use error::CatalogError;
pub use model::{Recipe, RecipeFields, RecipeId, RecipeImage};
pub use share::{decode, encode, DecodedRecipe, FIELD_SEPARATOR};
pub use store::{JsonFileStore, MemoryStore, RecordStore};
pub use transport::{import_from_transport, MemoryTransport, StreamTransport, Transport};

/// List the store's recipes matching `query`, in store order
pub fn browse<S: RecordStore + ?Sized>(
    store: &S,
    query: &CatalogQuery,
) -> Result<Vec<Recipe>, CatalogError> {
    let recipes = store.list()?;
    Ok(query.apply(&recipes).into_iter().cloned().collect())
}

/// Encode a stored recipe and place the text on `transport`
pub fn share_recipe<S, T>(store: &S, id: RecipeId, transport: &mut T) -> Result<String, CatalogError>
where
    S: RecordStore + ?Sized,
    T: Transport + ?Sized,
{
    let recipe = store.get(id)?;
    let text = share::encode(&recipe);
    transport.write_text(&text)?;
    info!("Shared recipe '{}'", recipe.name);
    Ok(text)
}

/// Import share text as a new recipe.
///
/// The text is decoded and checked against the form rules before anything
/// is written, so a failure leaves the store untouched. The new recipe goes
/// into `category` (or the first configured category) with no image.
pub fn import_shared_recipe<S: RecordStore + ?Sized>(
    store: &mut S,
    config: &CatalogConfig,
    text: &str,
    category: Option<&str>,
) -> Result<RecipeId, CatalogError> {
    let decoded = share::decode(text)?;
    save_import(store, config, decoded, category)
}

/// Import whatever `transport` holds; see [`import_shared_recipe`]
pub fn import_from<S, T>(
    store: &mut S,
    config: &CatalogConfig,
    transport: &mut T,
    category: Option<&str>,
) -> Result<RecipeId, CatalogError>
where
    S: RecordStore + ?Sized,
    T: Transport + ?Sized,
{
    let decoded = import_from_transport(transport)?;
    save_import(store, config, decoded, category)
}

fn save_import<S: RecordStore + ?Sized>(
    store: &mut S,
    config: &CatalogConfig,
    decoded: DecodedRecipe,
    category: Option<&str>,
) -> Result<RecipeId, CatalogError> {
    if let Some(category) = category {
        if !config.is_known_category(category) {
            warn!("Importing into unknown category '{}'", category);
        }
    }

    let mut draft = RecipeDraft::new(config, category);
    draft.apply_import(decoded);
    let fields = draft.finish()?;
    let name = fields.name.clone();

    let id = store.create(fields)?;
    info!("Imported recipe '{}' as {}", name, id);
    Ok(id)
}
