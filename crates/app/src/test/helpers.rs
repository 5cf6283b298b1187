//! Test Helpers

use crate::{
    domain::{
        cart::{CartService, CartServiceError, records::CartSummary},
        catalog::{
            CatalogService, CatalogServiceError,
            data::NewProduct,
            records::{ProductId, ProductRecord},
        },
        coupons::{CouponsService, CouponsServiceError, data::NewCoupon, records::CouponRecord},
    },
    test::TestContext,
};

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: f64,
) -> Result<ProductRecord, CatalogServiceError> {
    ctx.catalog
        .create_product(NewProduct {
            name: name.to_string(),
            price,
        })
        .await
}

pub(crate) async fn create_coupon(
    ctx: &TestContext,
    code: &str,
    percent: f64,
) -> Result<CouponRecord, CouponsServiceError> {
    ctx.coupons
        .create_coupon(NewCoupon {
            code: code.to_string(),
            percent,
        })
        .await
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    product: ProductId,
    qty: i64,
) -> Result<CartSummary, CartServiceError> {
    ctx.cart.add_item(product, qty).await
}
