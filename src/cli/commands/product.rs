//! Product catalog commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::output::{
    action_success, create_spinner, list_table, output, render_list, CommandOutput,
};
use crate::cli::AppContext;
use crate::domain::errors::DomainError;
use crate::domain::models::Product;
use crate::services::catalog;
use crate::services::permissions::{ensure, Action, Feature};
use crate::store::{Collection, LoadOptions};

#[derive(Args, Debug)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List products, optionally filtered
    List {
        /// Every word must match in name or description
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Stock on hand
        #[arg(long)]
        quantity: Option<f64>,
        /// Must be one of the backend's allowed units
        #[arg(long)]
        unit: Option<String>,
        /// Image file to upload and attach
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Update fields of a product
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        quantity: Option<f64>,
        #[arg(long)]
        unit: Option<String>,
        /// Image file to upload and attach
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Delete a product
    Rm {
        #[arg(long)]
        id: i64,
    },
}

pub async fn execute(args: ProductArgs, json: bool) -> Result<()> {
    match args.command {
        ProductCommands::List { search } => list(search.as_deref().unwrap_or(""), json).await,
        ProductCommands::Add {
            name,
            description,
            quantity,
            unit,
            image,
        } => add(name, description, quantity, unit, image, json).await,
        ProductCommands::Update {
            id,
            name,
            description,
            quantity,
            unit,
            image,
        } => update(id, name, description, quantity, unit, image, json).await,
        ProductCommands::Rm { id } => rm(id, json).await,
    }
}

#[derive(Debug, Serialize)]
struct ProductListOutput {
    products: Vec<Product>,
}

impl CommandOutput for ProductListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "name", "description", "qty", "unit", "image"]);
        for p in &self.products {
            table.add_row(vec![
                p.id.map(|id| id.to_string()).unwrap_or_default(),
                p.name.clone(),
                p.description.clone().unwrap_or_default(),
                p.quantity_owned
                    .map(|q| q.to_string())
                    .unwrap_or_default(),
                p.unit.clone().unwrap_or_default(),
                p.picture_url.clone().unwrap_or_default(),
            ]);
        }
        render_list("product", &table, self.products.len())
    }
}

#[derive(Debug, Serialize)]
struct ProductSavedOutput {
    action: &'static str,
    product: Product,
}

impl CommandOutput for ProductSavedOutput {
    fn to_human(&self) -> String {
        action_success(&format!(
            "{} product \"{}\"{}",
            self.action,
            self.product.name,
            self.product
                .id
                .map(|id| format!(" (id {id})"))
                .unwrap_or_default()
        ))
    }
}

async fn load_products(ctx: &AppContext, json: bool) -> Result<Collection<Product>> {
    let spinner = create_spinner("Loading products...", json);
    let result = ctx.store.products.load(LoadOptions::default()).await;
    spinner.finish_and_clear();
    Ok(result?)
}

async fn list(search: &str, json: bool) -> Result<()> {
    let ctx = AppContext::init().await?;
    let user = ctx.require_user().await?;
    ensure(user.role(), Feature::Products, Action::View)?;

    let collection = load_products(&ctx, json).await?;
    let products = catalog::search(&collection.items, search)
        .into_iter()
        .cloned()
        .collect();

    output(&ProductListOutput { products }, json);
    Ok(())
}

/// A unit not in the backend picklist is rejected before the insert.
fn check_unit(collection: &Collection<Product>, unit: &str) -> Result<()> {
    if let Some(allowed) = collection.picklists.get("unit") {
        if !allowed.iter().any(|u| u == unit) {
            return Err(DomainError::Validation(format!(
                "unit \"{unit}\" is not allowed (expected one of: {})",
                allowed.join(", ")
            ))
            .into());
        }
    }
    Ok(())
}

async fn upload_image(
    ctx: &AppContext,
    record_id: i64,
    path: &Path,
) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image.bin".to_string());
    Ok(ctx
        .store
        .upload_image(
            &ctx.config.storage.product_bucket,
            record_id,
            &file_name,
            bytes,
        )
        .await?)
}

async fn add(
    name: String,
    description: Option<String>,
    quantity: Option<f64>,
    unit: Option<String>,
    image: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let ctx = AppContext::init().await?;
    let user = ctx.require_user().await?;
    ensure(user.role(), Feature::Products, Action::Create)?;

    let collection = load_products(&ctx, json).await?;
    if let Some(unit) = &unit {
        check_unit(&collection, unit)?;
    }

    let mut product = Product::new(name);
    product.description = description;
    product.quantity_owned = quantity;
    product.unit = unit;

    if let Some(path) = image {
        // Unsaved records have no id yet; the next collection index stands in
        // for it in the object name.
        let provisional_id = i64::try_from(collection.items.len()).unwrap_or(0) + 1;
        product.picture_url = Some(upload_image(&ctx, provisional_id, &path).await?);
    }

    let created = ctx.store.products.insert(&product).await?;
    output(
        &ProductSavedOutput {
            action: "Created",
            product: created,
        },
        json,
    );
    Ok(())
}

async fn update(
    id: i64,
    name: Option<String>,
    description: Option<String>,
    quantity: Option<f64>,
    unit: Option<String>,
    image: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let ctx = AppContext::init().await?;
    let user = ctx.require_user().await?;
    ensure(user.role(), Feature::Products, Action::Edit)?;

    let collection = load_products(&ctx, json).await?;
    let mut product = catalog::find_by_id(&collection.items, id)
        .cloned()
        .ok_or_else(|| DomainError::NotFound {
            entity: "Product".to_string(),
            id: id.to_string(),
        })?;

    if let Some(unit) = &unit {
        check_unit(&collection, unit)?;
    }

    if let Some(name) = name {
        product.name = name;
    }
    if description.is_some() {
        product.description = description;
    }
    if quantity.is_some() {
        product.quantity_owned = quantity;
    }
    if unit.is_some() {
        product.unit = unit;
    }
    if let Some(path) = image {
        product.picture_url = Some(upload_image(&ctx, id, &path).await?);
    }

    let saved = ctx.store.products.update(&product).await?;
    output(
        &ProductSavedOutput {
            action: "Updated",
            product: saved,
        },
        json,
    );
    Ok(())
}

#[derive(Debug, Serialize)]
struct ProductRemovedOutput {
    id: i64,
    name: String,
}

impl CommandOutput for ProductRemovedOutput {
    fn to_human(&self) -> String {
        action_success(&format!("Deleted product \"{}\"", self.name))
    }
}

async fn rm(id: i64, json: bool) -> Result<()> {
    let ctx = AppContext::init().await?;
    let user = ctx.require_user().await?;
    ensure(user.role(), Feature::Products, Action::Delete)?;

    let collection = load_products(&ctx, json).await?;
    let product = catalog::find_by_id(&collection.items, id)
        .cloned()
        .ok_or_else(|| DomainError::NotFound {
            entity: "Product".to_string(),
            id: id.to_string(),
        })?;

    ctx.store.products.remove(&product).await?;
    output(
        &ProductRemovedOutput {
            id,
            name: product.name,
        },
        json,
    );
    Ok(())
}
