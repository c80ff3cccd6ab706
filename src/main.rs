use std::error::Error;

use clap::{Args, Parser, Subcommand};
use log::{debug, error};

use recipe_box::catalog::category_counts;
use recipe_box::draft::{time_label, RecipeDraft};
use recipe_box::{
    browse, import_from, share_recipe, CatalogConfig, CatalogError, CatalogQuery, JsonFileStore,
    Recipe, RecipeId, RecordStore, StreamTransport,
};

#[derive(Parser, Debug)]
#[command(name = "recipe-box")]
#[command(about = "Keep, browse and share your recipes")]
struct Cli {
    /// Recipe file (overrides `store_path` from recipe-box.toml)
    #[arg(long, env = "RECIPE_BOX_STORE")]
    store: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List recipes, optionally filtered by category and name
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show one recipe in full
    Show { id: RecipeId },
    /// Add a new recipe
    Add(RecipeArgs),
    /// Edit a recipe (it gets a new id)
    Edit {
        id: RecipeId,
        #[command(flatten)]
        changes: RecipeArgs,
    },
    /// Delete a recipe
    Delete { id: RecipeId },
    /// Print a recipe as share text
    Export { id: RecipeId },
    /// Read share text from stdin and save it as a new recipe
    Import {
        #[arg(long)]
        category: Option<String>,
    },
    /// List the configured categories
    Categories,
}

#[derive(Args, Debug, Default)]
struct RecipeArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// Preparation time in minutes
    #[arg(long)]
    prep: Option<u32>,
    /// Cooking time in minutes
    #[arg(long)]
    cook: Option<u32>,
    #[arg(long)]
    ingredients: Option<String>,
    #[arg(long)]
    method: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl RecipeArgs {
    fn apply(self, draft: &mut RecipeDraft) {
        if let Some(name) = self.name {
            draft.set_name(&name);
        }
        if let Some(category) = self.category {
            draft.set_category(category);
        }
        if self.prep.is_some() || self.cook.is_some() {
            let prep = self.prep.unwrap_or(draft.fields().preptime);
            let cook = self.cook.unwrap_or(draft.fields().cooktime);
            draft.set_times(prep, cook);
        }
        if let Some(ingredients) = self.ingredients {
            draft.set_ingredients(ingredients);
        }
        if let Some(method) = self.method {
            draft.set_method(method);
        }
        if let Some(notes) = self.notes {
            draft.set_notes(notes);
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = CatalogConfig::load()?;
    let store_path = cli.store.clone().unwrap_or_else(|| config.store_path.clone());
    debug!("Using recipe file {}", store_path);

    let placeholder = config.placeholder_bytes()?;
    let mut store = JsonFileStore::open(&store_path, &placeholder)?;

    match cli.command {
        Command::List { category, search } => {
            let query = CatalogQuery { category, search };
            let recipes = browse(&store, &query)?;
            if query.is_empty_state(&store.list()?) {
                println!("No recipes yet. Add one with `recipe-box add`.");
            }
            for recipe in recipes {
                println!(
                    "{}  {}  [{}]  Total Time: {} mins",
                    recipe.id(),
                    recipe.name,
                    recipe.category,
                    recipe.totaltime()
                );
            }
        }
        Command::Show { id } => print_recipe(&store.get(id)?),
        Command::Add(args) => {
            let mut draft = RecipeDraft::new(&config, None);
            args.apply(&mut draft);
            let id = store.create(draft.finish()?)?;
            println!("{}", id);
        }
        Command::Edit { id, changes } => {
            let mut draft = RecipeDraft::from_recipe(&config, &store.get(id)?);
            changes.apply(&mut draft);
            let new_id = store.update(id, draft.finish()?)?;
            println!("{}", new_id);
        }
        Command::Delete { id } => store.delete(id)?,
        Command::Export { id } => {
            let mut transport = StreamTransport::stdio();
            share_recipe(&store, id, &mut transport)?;
        }
        Command::Import { category } => {
            let mut transport = StreamTransport::stdio();
            match import_from(&mut store, &config, &mut transport, category.as_deref()) {
                Ok(id) => println!("{}", id),
                Err(e @ CatalogError::NoData) => {
                    return Err(format!("{} (pipe share text into stdin)", e).into())
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Categories => {
            let recipes = store.list()?;
            let counts = category_counts(&recipes);
            for category in &config.categories {
                let count = counts.get(category.as_str()).copied().unwrap_or(0);
                println!("{} ({})", category, count);
            }
        }
    }

    Ok(())
}

fn print_recipe(recipe: &Recipe) {
    println!("{}", recipe.name);
    println!("Category: {}", recipe.category);
    println!("{}", time_label("Prep", recipe.preptime()));
    println!("{}", time_label("Cook", recipe.cooktime()));
    if recipe.has_image() {
        println!("(has image)");
    }
    println!("\nIngredients\n{}", recipe.ingredients);
    println!("\nMethod\n{}", recipe.method);
    if recipe.has_notes() {
        println!("\nNotes\n{}", recipe.notes);
    }
}
