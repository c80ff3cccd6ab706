//! Rules the add/edit form applies before a recipe reaches the store.
//!
//! The model accepts any field values; these checks live with the form.

use thiserror::Error;

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::model::{Recipe, RecipeFields, RecipeImage};
use crate::share::DecodedRecipe;

/// Time sliders move in 5 minute steps up to two hours.
pub const TIME_STEP_MINUTES: u32 = 5;
pub const TIME_MAX_MINUTES: u32 = 120;

/// A required-field rule the draft breaks
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftIssue {
    #[error("name is required")]
    MissingName,
    #[error("preparation time is required")]
    MissingPrepTime,
    #[error("cooking time is required")]
    MissingCookTime,
    #[error("ingredients are required")]
    MissingIngredients,
    #[error("method is required")]
    MissingMethod,
}

/// Form state for creating or editing a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    fields: RecipeFields,
    name_max_len: usize,
}

impl RecipeDraft {
    /// Blank form starting on `category`, or the first configured one
    pub fn new(config: &CatalogConfig, category: Option<&str>) -> Self {
        RecipeDraft {
            fields: RecipeFields {
                category: category.unwrap_or(config.default_category()).to_string(),
                image: RecipeImage::Placeholder,
                ..RecipeFields::default()
            },
            name_max_len: config.name_max_len,
        }
    }

    /// Form pre-filled from an existing recipe
    pub fn from_recipe(config: &CatalogConfig, recipe: &Recipe) -> Self {
        RecipeDraft {
            fields: recipe.to_fields(),
            name_max_len: config.name_max_len,
        }
    }

    pub fn fields(&self) -> &RecipeFields {
        &self.fields
    }

    pub fn set_name(&mut self, name: &str) {
        self.fields.name = truncate_name(name, self.name_max_len);
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.fields.category = category.into();
    }

    /// Times snap to the slider grid
    pub fn set_times(&mut self, preptime: u32, cooktime: u32) {
        self.fields.preptime = snap_minutes(preptime);
        self.fields.cooktime = snap_minutes(cooktime);
    }

    pub fn set_ingredients(&mut self, ingredients: impl Into<String>) {
        self.fields.ingredients = ingredients.into();
    }

    pub fn set_method(&mut self, method: impl Into<String>) {
        self.fields.method = method.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.fields.notes = notes.into();
    }

    pub fn set_image(&mut self, image: RecipeImage) {
        self.fields.image = image;
    }

    /// Fill the form from pasted share text. Category and image stay as
    /// they were; the times are taken as shared, without snapping. The name
    /// is still cut to the form's limit.
    pub fn apply_import(&mut self, decoded: DecodedRecipe) {
        let category = std::mem::take(&mut self.fields.category);
        let image = std::mem::take(&mut self.fields.image);
        self.fields = decoded.into_fields(category, image);
        self.fields.name = truncate_name(&self.fields.name, self.name_max_len);
    }

    /// Every rule the current values break, in form order
    pub fn issues(&self) -> Vec<DraftIssue> {
        let f = &self.fields;
        let mut issues = Vec::new();
        if f.name.is_empty() {
            issues.push(DraftIssue::MissingName);
        }
        if f.preptime == 0 {
            issues.push(DraftIssue::MissingPrepTime);
        }
        if f.cooktime == 0 {
            issues.push(DraftIssue::MissingCookTime);
        }
        if f.ingredients.is_empty() {
            issues.push(DraftIssue::MissingIngredients);
        }
        if f.method.is_empty() {
            issues.push(DraftIssue::MissingMethod);
        }
        issues
    }

    /// Whether the Save action is enabled
    pub fn can_save(&self) -> bool {
        self.issues().is_empty()
    }

    /// Validate and hand over the finished fields
    pub fn finish(self) -> Result<RecipeFields, CatalogError> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(self.fields)
        } else {
            Err(CatalogError::InvalidDraft(issues))
        }
    }
}

/// Cut a name to `max_len` characters (not bytes)
pub fn truncate_name(name: &str, max_len: usize) -> String {
    name.chars().take(max_len).collect()
}

/// Round to the nearest slider step and clamp to the slider range
pub fn snap_minutes(minutes: u32) -> u32 {
    let clamped = minutes.min(TIME_MAX_MINUTES);
    let snapped = (clamped + TIME_STEP_MINUTES / 2) / TIME_STEP_MINUTES * TIME_STEP_MINUTES;
    snapped.min(TIME_MAX_MINUTES)
}

/// Human label for a duration: "45 Minutes", "1 Hour", "1 Hour, 15 Minutes"
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    let hour_part = match hours {
        0 => return format!("{} Minutes", rest),
        1 => "1 Hour".to_string(),
        h => format!("{} Hours", h),
    };
    if rest == 0 {
        hour_part
    } else {
        format!("{}, {} Minutes", hour_part, rest)
    }
}

/// Slider header, e.g. "Cooking Time: 1 Hour"
pub fn time_label(label: &str, minutes: u32) -> String {
    format!("{}: {}", label, format_minutes(minutes))
}
