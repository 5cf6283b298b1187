use clap::Args;
use till_app::{
    database::{self, Db},
    domain::coupons::{CouponsService, SqliteCouponsService, data::NewCoupon},
};

#[derive(Debug, Args)]
pub(crate) struct CreateCouponArgs {
    /// Coupon code; matched case-insensitively at lookup
    #[arg(long)]
    code: String,

    /// Discount percentage, in (0, 100]
    #[arg(long)]
    percent: f64,

    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateCouponArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = SqliteCouponsService::new(Db::new(pool));

    let coupon = service
        .create_coupon(NewCoupon {
            code: args.code,
            percent: args.percent,
        })
        .await
        .map_err(|error| format!("failed to create coupon: {error}"))?;

    println!("coupon_code: {}", coupon.code);
    println!("coupon_percent: {}", coupon.percent);

    Ok(())
}
