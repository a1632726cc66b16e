use std::io::Write;

use clap::Args;
use lapak::{
    pricing::format_rupiah,
    products::{ProductCategory, ProductId},
};

use crate::{errors::CliError, render, shop::Shop};

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Only list one category (robux-login, robux-gamepass, items, passes, joki)
    #[arg(long)]
    category: Option<String>,

    /// Only list popular products
    #[arg(long, conflicts_with = "category")]
    popular: bool,
}

#[derive(Debug, Args)]
pub(crate) struct ProductArgs {
    /// Product ID
    id: String,
}

pub(crate) async fn list(
    args: ProductsArgs,
    shop: &Shop,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let products = match (args.category, args.popular) {
        (Some(name), _) => {
            let category =
                ProductCategory::parse(&name).ok_or(CliError::UnknownCategory(name))?;

            shop.catalog.by_category(category).await?
        }
        (None, true) => shop.catalog.popular().await?,
        (None, false) => shop.catalog.list().await?,
    };

    if products.is_empty() {
        writeln!(out, "No products found")?;
        return Ok(());
    }

    writeln!(out, "{}", render::products(&products)?)?;

    Ok(())
}

pub(crate) async fn show(
    args: ProductArgs,
    shop: &Shop,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let product = shop.catalog.get(&ProductId::new(args.id)).await?;

    writeln!(out, "{} ({})", product.name, product.id)?;
    writeln!(out, "category: {}", product.category)?;
    writeln!(out, "price:    {}", format_rupiah(&product.unit_price()?))?;
    writeln!(out, "stock:    {}", product.stock)?;

    if let Some(delivery_time) = &product.delivery_time {
        writeln!(out, "delivery: {delivery_time}")?;
    }

    if !product.description.is_empty() {
        writeln!(out, "\n{}", product.description)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test_helpers::demo_shop;

    use super::*;

    #[tokio::test]
    async fn unknown_category_is_reported() -> TestResult {
        let (_dir, shop) = demo_shop()?;
        let mut out = Vec::new();

        let args = ProductsArgs {
            category: Some("gems".to_string()),
            popular: false,
        };
        let result = list(args, &shop, &mut out).await;

        assert!(
            matches!(result, Err(CliError::UnknownCategory(ref name)) if name == "gems"),
            "expected UnknownCategory, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn category_listing_only_shows_that_category() -> TestResult {
        let (_dir, shop) = demo_shop()?;
        let mut out = Vec::new();

        let args = ProductsArgs {
            category: Some("joki".to_string()),
            popular: false,
        };
        list(args, &shop, &mut out).await?;

        let output = String::from_utf8(out)?;
        assert!(output.contains("joki"), "{output}");
        assert!(!output.contains("robux-login"), "{output}");

        Ok(())
    }
}
