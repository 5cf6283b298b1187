use clap::Args;
use till_app::{
    database::{self, Db},
    domain::catalog::{CatalogService, SqliteCatalogService, data::NewProduct},
};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product display name
    #[arg(long)]
    name: String,

    /// Unit price
    #[arg(long)]
    price: f64,

    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = SqliteCatalogService::new(Db::new(pool));

    let product = service
        .create_product(NewProduct {
            name: args.name,
            price: args.price,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_id: {}", product.id);
    println!("product_name: {}", product.name);
    println!("product_price: {}", product.price);

    Ok(())
}
