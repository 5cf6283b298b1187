use clap::Args;
use till_app::{
    database::{self, Db},
    domain::catalog::{CatalogService, SqliteCatalogService},
};

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListProductsArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = SqliteCatalogService::new(Db::new(pool));

    let products = service
        .list_products()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    for product in products {
        println!("product_id: {}", product.id);
        println!("product_name: {}", product.name);
        println!("product_price: {}", product.price);
        println!();
    }

    Ok(())
}
