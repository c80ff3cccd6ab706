//! Recipe persistence.
//!
//! [`RecordStore`] is the CRUD contract the catalog and the share flow rely
//! on. Two implementations ship with the crate: [`MemoryStore`] and
//! [`JsonFileStore`], which rewrites a JSON file on every change.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::model::{Recipe, RecipeFields, RecipeId, RecipeImage};

/// Durable create/read/update/delete of recipes
pub trait RecordStore {
    /// Insert a new record and return its freshly assigned id
    fn create(&mut self, fields: RecipeFields) -> Result<RecipeId, CatalogError>;

    /// Remove a record permanently
    fn delete(&mut self, id: RecipeId) -> Result<(), CatalogError>;

    fn get(&self, id: RecipeId) -> Result<Recipe, CatalogError>;

    /// All records, ascending by name
    fn list(&self) -> Result<Vec<Recipe>, CatalogError>;

    /// Edit a record by deleting it and inserting the new values.
    ///
    /// The edited recipe gets a new id, which is returned; the old id is
    /// gone afterwards.
    fn update(&mut self, id: RecipeId, fields: RecipeFields) -> Result<RecipeId, CatalogError> {
        self.delete(id)?;
        let new_id = self.create(fields)?;
        debug!("Replaced recipe {} with {}", id, new_id);
        Ok(new_id)
    }
}

/// Store that keeps everything in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<Recipe>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: RecipeId) -> Result<usize, CatalogError> {
        self.records
            .iter()
            .position(|recipe| recipe.id() == id)
            .ok_or(CatalogError::NotFound(id))
    }
}

impl RecordStore for MemoryStore {
    fn create(&mut self, fields: RecipeFields) -> Result<RecipeId, CatalogError> {
        let recipe = Recipe::new(fields);
        let id = recipe.id();
        self.records.push(recipe);
        Ok(id)
    }

    fn delete(&mut self, id: RecipeId) -> Result<(), CatalogError> {
        let index = self.position(id)?;
        self.records.remove(index);
        Ok(())
    }

    fn get(&self, id: RecipeId) -> Result<Recipe, CatalogError> {
        let index = self.position(id)?;
        Ok(self.records[index].clone())
    }

    fn list(&self) -> Result<Vec<Recipe>, CatalogError> {
        let mut recipes = self.records.clone();
        sort_by_name(&mut recipes);
        Ok(recipes)
    }
}

/// Ascending by name; ids break ties so the order is stable across loads
pub fn sort_by_name(recipes: &mut [Recipe]) {
    recipes.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id().cmp(&b.id())));
}

/// On-disk shape of one recipe
#[derive(Debug, Serialize, Deserialize)]
struct StoredRecipe {
    id: RecipeId,
    name: String,
    category: String,
    preptime: u32,
    cooktime: u32,
    // Written for readers of the file; recomputed on load
    #[serde(default)]
    totaltime: u32,
    ingredients: String,
    method: String,
    #[serde(default)]
    notes: String,
    /// Base64 image bytes; absent means no image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    recipes: Vec<StoredRecipe>,
}

impl From<&Recipe> for StoredRecipe {
    fn from(recipe: &Recipe) -> Self {
        let image = match &recipe.image {
            RecipeImage::Placeholder => None,
            RecipeImage::Photo(bytes) => Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
        };
        StoredRecipe {
            id: recipe.id(),
            name: recipe.name.clone(),
            category: recipe.category.clone(),
            preptime: recipe.preptime(),
            cooktime: recipe.cooktime(),
            totaltime: recipe.totaltime(),
            ingredients: recipe.ingredients.clone(),
            method: recipe.method.clone(),
            notes: recipe.notes.clone(),
            image,
        }
    }
}

impl StoredRecipe {
    fn into_recipe(self, placeholder: &[u8]) -> Result<Recipe, CatalogError> {
        let image = match self.image {
            None => RecipeImage::Placeholder,
            Some(encoded) => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(encoded.as_bytes())
                    .map_err(|e| {
                        CatalogError::Format(format!("invalid image data for {}: {}", self.id, e))
                    })?;
                RecipeImage::from_bytes(bytes, placeholder)
            }
        };

        let recipe = Recipe::with_id(
            self.id,
            RecipeFields {
                name: self.name,
                category: self.category,
                preptime: self.preptime,
                cooktime: self.cooktime,
                ingredients: self.ingredients,
                method: self.method,
                notes: self.notes,
                image,
            },
        );
        if self.totaltime != recipe.totaltime() {
            warn!(
                "Recipe {} had total time {} on disk; using {}",
                recipe.id(),
                self.totaltime,
                recipe.totaltime()
            );
        }
        Ok(recipe)
    }
}

/// Store backed by a JSON file, rewritten in full after every change
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    ///
    /// Stored images equal to `placeholder` are read back as "no image".
    pub fn open(path: impl AsRef<Path>, placeholder: &[u8]) -> Result<Self, CatalogError> {
        let path = path.as_ref().to_path_buf();
        let file: StoreFile = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                StoreFile::default()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            StoreFile::default()
        };

        let records = file
            .recipes
            .into_iter()
            .map(|stored| stored.into_recipe(placeholder))
            .collect::<Result<Vec<_>, _>>()?;

        info!("Opened {} with {} recipes", path.display(), records.len());
        Ok(JsonFileStore {
            path,
            inner: MemoryStore { records },
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), CatalogError> {
        let file = StoreFile {
            recipes: self.inner.records.iter().map(StoredRecipe::from).collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        // Write beside the target and rename so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Saved {} recipes to {}", file.recipes.len(), self.path.display());
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn create(&mut self, fields: RecipeFields) -> Result<RecipeId, CatalogError> {
        let id = self.inner.create(fields)?;
        if let Err(e) = self.persist() {
            self.inner.delete(id)?;
            return Err(e);
        }
        Ok(id)
    }

    fn delete(&mut self, id: RecipeId) -> Result<(), CatalogError> {
        let index = self.inner.position(id)?;
        let removed = self.inner.records.remove(index);
        if let Err(e) = self.persist() {
            self.inner.records.insert(index, removed);
            return Err(e);
        }
        Ok(())
    }

    fn get(&self, id: RecipeId) -> Result<Recipe, CatalogError> {
        self.inner.get(id)
    }

    fn list(&self) -> Result<Vec<Recipe>, CatalogError> {
        self.inner.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> RecipeFields {
        RecipeFields {
            name: name.to_string(),
            category: "Soups".to_string(),
            preptime: 10,
            cooktime: 20,
            ingredients: "Stock".to_string(),
            method: "Boil".to_string(),
            notes: String::new(),
            image: RecipeImage::Placeholder,
        }
    }

    #[test]
    fn test_memory_store_crud() {
        let mut store = MemoryStore::new();
        let id = store.create(fields("Minestrone")).unwrap();
        assert_eq!(store.len(), 1);

        let recipe = store.get(id).unwrap();
        assert_eq!(recipe.name, "Minestrone");
        assert_eq!(recipe.totaltime(), 30);

        store.delete(id).unwrap();
        assert!(store.is_empty());
        assert!(matches!(store.get(id), Err(CatalogError::NotFound(missing)) if missing == id));
    }

    #[test]
    fn test_list_is_sorted_by_name() {
        let mut store = MemoryStore::new();
        for name in ["Pho", "Borscht", "Gazpacho"] {
            store.create(fields(name)).unwrap();
        }
        let names: Vec<String> = store.list().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Borscht", "Gazpacho", "Pho"]);
    }

    #[test]
    fn test_update_assigns_new_id() {
        let mut store = MemoryStore::new();
        let id = store.create(fields("Pho")).unwrap();

        let mut edited = fields("Pho Bo");
        edited.cooktime = 120;
        let new_id = store.update(id, edited).unwrap();

        assert_ne!(id, new_id);
        assert!(matches!(store.get(id), Err(CatalogError::NotFound(_))));
        let recipe = store.get(new_id).unwrap();
        assert_eq!(recipe.name, "Pho Bo");
        assert_eq!(recipe.totaltime(), 130);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_ids_are_not_found() {
        let mut store = MemoryStore::new();
        store.create(fields("Pho")).unwrap();
        let ghost = RecipeId::new();

        assert!(matches!(store.delete(ghost), Err(CatalogError::NotFound(_))));
        assert!(matches!(
            store.update(ghost, fields("Other")),
            Err(CatalogError::NotFound(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_json_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");

        let mut with_photo = fields("Ramen");
        with_photo.image = RecipeImage::Photo(vec![0xFF, 0xD8, 0xFF]);

        let (kept, photo) = {
            let mut store = JsonFileStore::open(&path, b"").unwrap();
            let kept = store.create(fields("Laksa")).unwrap();
            let photo = store.create(with_photo).unwrap();
            let gone = store.create(fields("Tom Yum")).unwrap();
            store.delete(gone).unwrap();
            (kept, photo)
        };

        let store = JsonFileStore::open(&path, b"").unwrap();
        let recipes = store.list().unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].id(), kept);
        assert!(!recipes[0].has_image());
        assert_eq!(recipes[1].id(), photo);
        assert_eq!(recipes[1].image, RecipeImage::Photo(vec![0xFF, 0xD8, 0xFF]));
    }

    #[test]
    fn test_json_store_recomputes_total_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        let id = RecipeId::new();
        let json = format!(
            r#"{{"recipes":[{{"id":"{}","name":"Dal","category":"Main Courses",
                "preptime":10,"cooktime":25,"totaltime":999,
                "ingredients":"Lentils","method":"Simmer"}}]}}"#,
            id
        );
        fs::write(&path, json).unwrap();

        let store = JsonFileStore::open(&path, b"").unwrap();
        let recipe = store.get(id).unwrap();
        assert_eq!(recipe.totaltime(), 35);
        assert_eq!(recipe.notes, "");
    }

    #[test]
    fn test_json_store_placeholder_image_is_no_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        let placeholder = b"PLACEHOLDER-PNG";
        let id = RecipeId::new();
        let encoded = base64::engine::general_purpose::STANDARD.encode(placeholder);
        let json = format!(
            r#"{{"recipes":[{{"id":"{}","name":"Chai","category":"Beverages",
                "preptime":5,"cooktime":5,"ingredients":"Tea","method":"Brew",
                "image":"{}"}}]}}"#,
            id, encoded
        );
        fs::write(&path, json).unwrap();

        let store = JsonFileStore::open(&path, placeholder).unwrap();
        assert!(!store.get(id).unwrap().has_image());
    }

    #[test]
    fn test_json_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path, b""),
            Err(CatalogError::Json(_))
        ));
    }
}
