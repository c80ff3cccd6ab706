//! Category filter and name search over the recipe collection.
//!
//! Everything here is read-only: functions borrow the collection and hand
//! back references in the same order the store produced them.

use std::collections::BTreeMap;

use crate::model::Recipe;

/// Keep only recipes in `category` (exact, case-sensitive). `None` keeps all.
pub fn filter<'a, I>(records: I, category: Option<&str>) -> Vec<&'a Recipe>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    records
        .into_iter()
        .filter(|recipe| matches_category(recipe, category))
        .collect()
}

/// Keep recipes whose name contains `query`, ignoring case. An empty query
/// keeps all.
pub fn search<'a, I>(records: I, query: &str) -> Vec<&'a Recipe>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let needle = query.to_lowercase();
    records
        .into_iter()
        .filter(|recipe| matches_name(recipe, &needle))
        .collect()
}

fn matches_category(recipe: &Recipe, category: Option<&str>) -> bool {
    category.map_or(true, |category| recipe.category == category)
}

// `needle` must already be lowercased
fn matches_name(recipe: &Recipe, needle: &str) -> bool {
    needle.is_empty() || recipe.name.to_lowercase().contains(needle)
}

/// The list screen's current category selection and search text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub search: String,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    /// Apply both predicates in a single pass
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a Recipe>
    where
        I: IntoIterator<Item = &'a Recipe>,
    {
        let needle = self.search.to_lowercase();
        records
            .into_iter()
            .filter(|recipe| {
                matches_category(recipe, self.category.as_deref()) && matches_name(recipe, &needle)
            })
            .collect()
    }

    /// True when the list screen should show the "add a recipe" hint instead
    /// of a list: nothing stored, or nothing in the selected category.
    ///
    /// Search text does not count, so an unmatched search shows an empty list.
    pub fn is_empty_state(&self, records: &[Recipe]) -> bool {
        records.is_empty() || filter(records, self.category.as_deref()).is_empty()
    }
}

/// Number of recipes per category, for the filter menu
pub fn category_counts(records: &[Recipe]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for recipe in records {
        *counts.entry(recipe.category.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Categories from `known` that at least one recipe uses, in `known` order
pub fn categories_in_use<'a>(records: &[Recipe], known: &'a [String]) -> Vec<&'a str> {
    let counts = category_counts(records);
    known
        .iter()
        .map(String::as_str)
        .filter(|category| counts.contains_key(category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RecipeFields, RecipeImage};

    fn recipe(name: &str, category: &str) -> Recipe {
        Recipe::new(RecipeFields {
            name: name.to_string(),
            category: category.to_string(),
            preptime: 5,
            cooktime: 10,
            ingredients: "x".to_string(),
            method: "y".to_string(),
            notes: String::new(),
            image: RecipeImage::Placeholder,
        })
    }

    fn sample() -> Vec<Recipe> {
        vec![
            recipe("Apple Pie", "Desserts"),
            recipe("Banana Bread", "Breakfast"),
            recipe("Brownies", "Desserts"),
            recipe("Caesar Salad", "Salads"),
            recipe("Pineapple Punch", "Beverages"),
        ]
    }

    fn names(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_filter_by_category() {
        let records = sample();
        let desserts = filter(&records, Some("Desserts"));
        assert_eq!(names(&desserts), vec!["Apple Pie", "Brownies"]);
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let records = sample();
        assert!(filter(&records, Some("desserts")).is_empty());
    }

    #[test]
    fn test_filter_none_keeps_everything_in_order() {
        let records = sample();
        let all = filter(&records, None);
        assert_eq!(all.len(), records.len());
        assert_eq!(names(&all)[0], "Apple Pie");
        assert_eq!(names(&all)[4], "Pineapple Punch");
    }

    #[test]
    fn test_search_case_insensitive_substring() {
        let records = sample();
        assert_eq!(
            names(&search(&records, "APPLE")),
            vec!["Apple Pie", "Pineapple Punch"]
        );
        assert_eq!(names(&search(&records, "bRoW")), vec!["Brownies"]);
        assert!(search(&records, "lasagne").is_empty());
    }

    #[test]
    fn test_empty_search_is_identity() {
        let records = sample();
        assert_eq!(search(&records, "").len(), records.len());
    }

    #[test]
    fn test_filter_and_search_commute() {
        let records = sample();
        for category in [None, Some("Desserts"), Some("Beverages"), Some("Soups")] {
            for query in ["", "apple", "b", "zzz"] {
                let a = filter(search(&records, query), category);
                let b = search(filter(&records, category), query);
                assert_eq!(names(&a), names(&b));

                let mut q = CatalogQuery::new().search(query);
                if let Some(category) = category {
                    q = q.category(category);
                }
                assert_eq!(names(&q.apply(&records)), names(&a));
            }
        }
    }

    #[test]
    fn test_empty_state() {
        let records = sample();
        assert!(CatalogQuery::new().is_empty_state(&[]));
        assert!(CatalogQuery::new().category("Soups").is_empty_state(&records));
        assert!(!CatalogQuery::new().category("Salads").is_empty_state(&records));
        assert!(!CatalogQuery::new().search("nothing").is_empty_state(&records));
    }

    #[test]
    fn test_category_counts_and_in_use() {
        let records = sample();
        let counts = category_counts(&records);
        assert_eq!(counts.get("Desserts"), Some(&2));
        assert_eq!(counts.get("Soups"), None);

        let known: Vec<String> = crate::config::DEFAULT_CATEGORIES
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(
            categories_in_use(&records, &known),
            vec!["Breakfast", "Salads", "Desserts", "Beverages"]
        );
    }
}
