//! Table rendering for terminal output.

use std::ops::Range;

use lapak::{
    cart::Cart,
    pricing::{PricingError, format_rupiah},
    products::Product,
};
use lapak_app::domain::{orders::records::OrderRecord, wishlist::records::WishlistRecord};
use tabled::{
    Table,
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

fn finish(builder: Builder, money_columns: Range<usize>) -> String {
    let mut table: Table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(money_columns), Alignment::right());

    table.to_string()
}

pub(crate) fn products(products: &[Product]) -> Result<String, PricingError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Category", "Price", "Stock", "Delivery"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.to_string(),
            format_rupiah(&product.unit_price()?),
            product.stock.to_string(),
            product.delivery_time.clone().unwrap_or_default(),
        ]);
    }

    Ok(finish(builder, 3..5))
}

pub(crate) fn cart(cart: &Cart) -> Result<String, PricingError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Product", "Qty", "Unit", "Subtotal"]);

    for line in cart.lines() {
        builder.push_record([
            line.product.id.to_string(),
            line.product.name.clone(),
            line.quantity.to_string(),
            format_rupiah(&line.product.unit_price()?),
            format_rupiah(&line.subtotal()?),
        ]);
    }

    builder.push_record([
        String::new(),
        "Total".to_string(),
        cart.count().to_string(),
        String::new(),
        format_rupiah(&cart.total()?),
    ]);

    Ok(finish(builder, 2..5))
}

pub(crate) fn orders(orders: &[OrderRecord]) -> Result<String, PricingError> {
    let mut builder = Builder::default();

    builder.push_record(["Order", "Placed", "Status", "Payment", "Items", "Total"]);

    for order in orders {
        builder.push_record([
            order.order_number.clone(),
            order.created_at.strftime("%Y-%m-%d %H:%M").to_string(),
            order.status.to_string(),
            order.payment_status.to_string(),
            order.order_items.len().to_string(),
            format_rupiah(&order.total()?),
        ]);
    }

    Ok(finish(builder, 4..6))
}

pub(crate) fn wishlist(entries: &[WishlistRecord]) -> Result<String, PricingError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Price", "Added"]);

    for entry in entries {
        let (name, price) = match &entry.product {
            Some(product) => (product.name.clone(), format_rupiah(&product.unit_price()?)),
            None => (String::new(), String::new()),
        };

        builder.push_record([
            entry.product_id.to_string(),
            name,
            price,
            entry.created_at.strftime("%Y-%m-%d").to_string(),
        ]);
    }

    Ok(finish(builder, 2..3))
}

#[cfg(test)]
mod tests {
    use lapak::{cart::Cart, products::ProductCategory};
    use testresult::TestResult;

    use crate::test_helpers::product;

    use super::*;

    #[test]
    fn cart_table_ends_with_the_total() -> TestResult {
        let mut contents = Cart::new();
        contents.add(product("a", 15_000, ProductCategory::Items));
        contents.add(product("a", 15_000, ProductCategory::Items));
        contents.add(product("b", 90_000, ProductCategory::Joki));

        let table = cart(&contents)?;
        let last_row = table.lines().rev().nth(1).ok_or("table too short")?;

        assert!(last_row.contains("Total"), "{table}");
        assert!(last_row.contains("Rp 120.000"), "{table}");

        Ok(())
    }

    #[test]
    fn product_table_lists_every_product() -> TestResult {
        let rows = [
            product("a", 15_000, ProductCategory::Items),
            product("b", 75_000, ProductCategory::RobuxLogin),
        ];

        let table = products(&rows)?;

        assert!(table.contains("robux-login"), "{table}");
        assert!(table.contains("Rp 75.000"), "{table}");

        Ok(())
    }
}
