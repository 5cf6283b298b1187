//! Summary computation over the cart state.

use sqlx::{Sqlite, Transaction};

use crate::domain::{
    cart::{
        records::{CartLine, CartSummary},
        session::CartState,
    },
    catalog::SqliteCatalogRepository,
};

/// Price the given cart state against the current catalog.
///
/// Checkout prices its order items through this exact computation, so the
/// amounts it persists are the ones the cart reported. Lines whose product
/// no longer resolves in the catalog are dropped, not erred.
pub(crate) async fn summarize(
    tx: &mut Transaction<'_, Sqlite>,
    products: &SqliteCatalogRepository,
    state: &CartState,
) -> Result<CartSummary, sqlx::Error> {
    let mut items = Vec::with_capacity(state.lines.len());
    let mut total = 0.0;

    for (&product_id, &qty) in &state.lines {
        let Some(product) = products.get_product(tx, product_id).await? else {
            continue;
        };

        let line_total = product.price * qty as f64;
        total += line_total;

        items.push(CartLine {
            product_id,
            name: product.name,
            unit_price: product.price,
            qty,
            line_total,
        });
    }

    let discount = state
        .coupon
        .as_ref()
        .map_or(0.0, |coupon| total * coupon.percent / 100.0);

    Ok(CartSummary {
        items,
        total,
        coupon: state.coupon.clone(),
        discount,
        total_with_discount: total - discount,
    })
}
