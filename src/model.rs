use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notes text the form fills in when the user leaves notes blank.
pub const NO_NOTES_PLACEHOLDER: &str = "No Notes";

/// Opaque, never-reused recipe identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        RecipeId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RecipeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(RecipeId)
    }
}

/// Image attached to a recipe.
///
/// Older records mark "no image" by storing a fixed placeholder blob. That
/// comparison only happens at the byte boundary ([`RecipeImage::from_bytes`]
/// and [`RecipeImage::to_bytes`]); everywhere else the absence is explicit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecipeImage {
    #[default]
    Placeholder,
    Photo(Vec<u8>),
}

impl RecipeImage {
    /// Classify a raw blob, treating the placeholder blob as "no image"
    pub fn from_bytes(bytes: Vec<u8>, placeholder: &[u8]) -> Self {
        if bytes.is_empty() || bytes == placeholder {
            RecipeImage::Placeholder
        } else {
            RecipeImage::Photo(bytes)
        }
    }

    /// Raw blob for stores that expect the placeholder sentinel
    pub fn to_bytes(&self, placeholder: &[u8]) -> Vec<u8> {
        match self {
            RecipeImage::Placeholder => placeholder.to_vec(),
            RecipeImage::Photo(bytes) => bytes.clone(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RecipeImage::Placeholder)
    }
}

/// Everything a recipe holds except its identity and derived total.
///
/// This is what the form produces, what a store creates records from and
/// what an import yields once a category and image are chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeFields {
    pub name: String,
    pub category: String,
    pub preptime: u32,
    pub cooktime: u32,
    pub ingredients: String,
    pub method: String,
    pub notes: String,
    pub image: RecipeImage,
}

/// One saved dish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    id: RecipeId,
    pub name: String,
    pub category: String,
    preptime: u32,
    cooktime: u32,
    totaltime: u32,
    pub ingredients: String,
    pub method: String,
    pub notes: String,
    pub image: RecipeImage,
}

impl Recipe {
    /// Build a new record with a freshly generated id
    pub fn new(fields: RecipeFields) -> Self {
        Self::with_id(RecipeId::new(), fields)
    }

    /// Rebuild a record whose id was assigned earlier (e.g. loaded from disk)
    pub fn with_id(id: RecipeId, fields: RecipeFields) -> Self {
        let mut recipe = Recipe {
            id,
            name: fields.name,
            category: fields.category,
            preptime: 0,
            cooktime: 0,
            totaltime: 0,
            ingredients: fields.ingredients,
            method: fields.method,
            notes: fields.notes,
            image: fields.image,
        };
        recipe.set_times(fields.preptime, fields.cooktime);
        recipe
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn preptime(&self) -> u32 {
        self.preptime
    }

    pub fn cooktime(&self) -> u32 {
        self.cooktime
    }

    pub fn totaltime(&self) -> u32 {
        self.totaltime
    }

    /// Set both time components and recompute the total in one step.
    ///
    /// This is the only way to change any of the three time fields.
    pub fn set_times(&mut self, preptime: u32, cooktime: u32) {
        self.preptime = preptime;
        self.cooktime = cooktime;
        self.totaltime = preptime.saturating_add(cooktime);
    }

    /// False for empty notes and for the "No Notes" placeholder
    pub fn has_notes(&self) -> bool {
        notes_present(&self.notes)
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_placeholder()
    }

    /// Copy out the editable fields, e.g. to pre-fill the edit form
    pub fn to_fields(&self) -> RecipeFields {
        RecipeFields {
            name: self.name.clone(),
            category: self.category.clone(),
            preptime: self.preptime,
            cooktime: self.cooktime,
            ingredients: self.ingredients.clone(),
            method: self.method.clone(),
            notes: self.notes.clone(),
            image: self.image.clone(),
        }
    }
}

pub(crate) fn notes_present(notes: &str) -> bool {
    !notes.is_empty() && notes != NO_NOTES_PLACEHOLDER
}
