use std::collections::BTreeSet;

use recipe_box::{
    browse, filter, search, CatalogQuery, MemoryStore, Recipe, RecipeFields, RecipeId,
    RecipeImage, RecordStore,
};

fn fields(name: &str, category: &str) -> RecipeFields {
    RecipeFields {
        name: name.to_string(),
        category: category.to_string(),
        preptime: 10,
        cooktime: 10,
        ingredients: "Something".to_string(),
        method: "Cook it".to_string(),
        notes: String::new(),
        image: RecipeImage::Placeholder,
    }
}

/// Ten recipes, three of them desserts, inserted out of name order
fn stocked_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    for (name, category) in [
        ("Tiramisu", "Desserts"),
        ("Omelette", "Breakfast"),
        ("Brownies", "Desserts"),
        ("Minestrone", "Soups"),
        ("Greek Salad", "Salads"),
        ("Chocolate Mousse", "Desserts"),
        ("Bruschetta", "Appetizers"),
        ("Lasagne", "Main Courses"),
        ("Popcorn", "Snacks"),
        ("Hot Chocolate", "Beverages"),
    ] {
        store.create(fields(name, category)).unwrap();
    }
    store
}

fn names(recipes: &[&Recipe]) -> Vec<String> {
    recipes.iter().map(|r| r.name.clone()).collect()
}

fn ids(recipes: &[&Recipe]) -> BTreeSet<RecipeId> {
    recipes.iter().map(|r| r.id()).collect()
}

#[test]
fn test_desserts_filter_in_name_order() {
    let records = stocked_store().list().unwrap();
    assert_eq!(records.len(), 10);

    let desserts = filter(&records, Some("Desserts"));
    assert_eq!(
        names(&desserts),
        vec!["Brownies", "Chocolate Mousse", "Tiramisu"]
    );
}

#[test]
fn test_search_spans_categories() {
    let records = stocked_store().list().unwrap();
    assert_eq!(
        names(&search(&records, "chocolate")),
        vec!["Chocolate Mousse", "Hot Chocolate"]
    );
}

#[test]
fn test_filter_search_commute_as_sets() {
    let records = stocked_store().list().unwrap();
    let categories = [
        None,
        Some("Desserts"),
        Some("Beverages"),
        Some("Breakfast"),
        Some("Unknown"),
    ];
    let queries = ["", "o", "CHOC", "salad", "x"];

    for category in categories {
        for query in queries {
            let a = filter(search(&records, query), category);
            let b = search(filter(&records, category), query);
            assert_eq!(ids(&a), ids(&b), "category {:?}, query {:?}", category, query);
            assert_eq!(names(&a), names(&b));
        }
    }
}

#[test]
fn test_browse_applies_query_to_store() {
    let store = stocked_store();
    let query = CatalogQuery::new().category("Desserts").search("MOUSSE");
    let found = browse(&store, &query).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Chocolate Mousse");

    let everything = browse(&store, &CatalogQuery::new()).unwrap();
    assert_eq!(everything.len(), 10);
    assert_eq!(everything[0].name, "Brownies");
}
