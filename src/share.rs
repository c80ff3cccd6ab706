//! Plain-text share format.
//!
//! A shared recipe is six segments joined by [`FIELD_SEPARATOR`]:
//!
//! ```text
//! {name}ㅤ
//! Preperation Time: {prep} minutesㅤ
//! Cooking Time: {cook} minutes
//! ㅤ
//! Ingredients
//! {ingredients}
//! ㅤ
//! Method
//! {method}
//! ㅤ
//! Notes
//! {notes}
//! ```
//!
//! The line breaks around the separator only make the text readable when it
//! is pasted somewhere else. Decoding strips them by matching the known
//! labels, never by counting characters, and tolerates them being absent.
//! The "Preperation" spelling is part of the format and must not be fixed.

use log::{debug, warn};

use crate::error::CatalogError;
use crate::model::{Recipe, RecipeFields, RecipeImage};

/// U+3164 HANGUL FILLER: renders as blank space and does not show up in
/// ordinary recipe text.
pub const FIELD_SEPARATOR: char = '\u{3164}';

pub const PREP_TIME_LABEL: &str = "Preperation Time:";
pub const COOK_TIME_LABEL: &str = "Cooking Time:";
pub const MINUTES_UNIT: &str = "minutes";
pub const INGREDIENTS_HEADER: &str = "Ingredients\n";
pub const METHOD_HEADER: &str = "Method\n";
pub const NOTES_HEADER: &str = "Notes\n";

const SEGMENT_COUNT: usize = 6;
const LINE_BREAK: char = '\n';
// Index of the number inside "Preperation Time: 5 minutes"
const MINUTES_TOKEN: usize = 2;

/// Field values recovered from share text.
///
/// Category and image are not part of the format; the importer picks them
/// when turning this into [`RecipeFields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecipe {
    pub name: String,
    preptime: u32,
    cooktime: u32,
    totaltime: u32,
    pub ingredients: String,
    pub method: String,
    pub notes: String,
}

impl DecodedRecipe {
    pub fn preptime(&self) -> u32 {
        self.preptime
    }

    pub fn cooktime(&self) -> u32 {
        self.cooktime
    }

    /// Recomputed from the decoded components, never read from the text
    pub fn totaltime(&self) -> u32 {
        self.totaltime
    }

    pub fn into_fields(self, category: impl Into<String>, image: RecipeImage) -> RecipeFields {
        RecipeFields {
            name: self.name,
            category: category.into(),
            preptime: self.preptime,
            cooktime: self.cooktime,
            ingredients: self.ingredients,
            method: self.method,
            notes: self.notes,
            image,
        }
    }
}

/// Render a recipe as share text.
///
/// If any free-text field already contains [`FIELD_SEPARATOR`] the output
/// will not decode; this is logged but not rejected, matching what the
/// share sheet has always produced.
pub fn encode(recipe: &Recipe) -> String {
    if contains_separator(recipe) {
        warn!(
            "Recipe '{}' contains the share separator; the shared text will not import cleanly",
            recipe.name
        );
    }

    let text = format!(
        "{name}{sep}\n\
         {prep_label} {prep} {unit}{sep}\n\
         {cook_label} {cook} {unit}\n\
         {sep}\n\
         {ingredients_header}{ingredients}\n\
         {sep}\n\
         {method_header}{method}\n\
         {sep}\n\
         {notes_header}{notes}",
        sep = FIELD_SEPARATOR,
        name = recipe.name,
        prep_label = PREP_TIME_LABEL,
        prep = recipe.preptime(),
        cook_label = COOK_TIME_LABEL,
        cook = recipe.cooktime(),
        unit = MINUTES_UNIT,
        ingredients_header = INGREDIENTS_HEADER,
        ingredients = recipe.ingredients,
        method_header = METHOD_HEADER,
        method = recipe.method,
        notes_header = NOTES_HEADER,
        notes = recipe.notes,
    );

    debug!("Encoded recipe '{}' ({} bytes)", recipe.name, text.len());
    text
}

/// Parse share text back into field values.
///
/// Anything other than exactly six segments is rejected outright, as is an
/// unparsable time or a section missing its header.
pub fn decode(text: &str) -> Result<DecodedRecipe, CatalogError> {
    let segments: Vec<&str> = text.split(FIELD_SEPARATOR).collect();
    if segments.len() != SEGMENT_COUNT {
        warn!(
            "Rejecting share text with {} segments (expected {})",
            segments.len(),
            SEGMENT_COUNT
        );
        return Err(CatalogError::Format(format!(
            "expected {} segments, found {}",
            SEGMENT_COUNT,
            segments.len()
        )));
    }

    let preptime = parse_minutes(segments[1], "preparation time")?;
    let cooktime = parse_minutes(segments[2], "cooking time")?;

    let decoded = DecodedRecipe {
        name: segments[0].to_string(),
        preptime,
        cooktime,
        totaltime: preptime.saturating_add(cooktime),
        ingredients: section_body(segments[3], INGREDIENTS_HEADER, true)?,
        method: section_body(segments[4], METHOD_HEADER, true)?,
        notes: section_body(segments[5], NOTES_HEADER, false)?,
    };

    debug!("Decoded shared recipe '{}'", decoded.name);
    Ok(decoded)
}

/// Whether any field would collide with the separator when encoded
pub fn contains_separator(recipe: &Recipe) -> bool {
    [
        recipe.name.as_str(),
        recipe.ingredients.as_str(),
        recipe.method.as_str(),
        recipe.notes.as_str(),
    ]
    .iter()
    .any(|field| field.contains(FIELD_SEPARATOR))
}

fn parse_minutes(segment: &str, field: &str) -> Result<u32, CatalogError> {
    let token = segment
        .split_whitespace()
        .nth(MINUTES_TOKEN)
        .ok_or_else(|| CatalogError::Format(format!("missing {}", field)))?;

    token
        .parse::<u32>()
        .map_err(|_| CatalogError::Format(format!("invalid {}: '{}'", field, token)))
}

fn section_body(segment: &str, header: &str, framed_end: bool) -> Result<String, CatalogError> {
    let segment = segment.strip_prefix(LINE_BREAK).unwrap_or(segment);

    let body = segment.strip_prefix(header).ok_or_else(|| {
        CatalogError::Format(format!("missing '{}' header", header.trim_end()))
    })?;

    let body = if framed_end {
        body.strip_suffix(LINE_BREAK).unwrap_or(body)
    } else {
        body
    };

    Ok(body.to_string())
}
