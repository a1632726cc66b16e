use std::io::Write;

use clap::{Args, Subcommand};
use lapak::products::ProductId;

use crate::{commands::announce, errors::CliError, render, shop::Shop};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart and its total
    Show,

    /// Add one unit of a product
    Add {
        /// Product ID
        id: String,
    },

    /// Set the quantity of a line; 0 removes it
    Set {
        /// Product ID
        id: String,

        /// New quantity
        quantity: u32,
    },

    /// Add one more unit, up to the product's stock
    Inc {
        /// Product ID
        id: String,
    },

    /// Take one unit off, keeping at least one
    Dec {
        /// Product ID
        id: String,
    },

    /// Remove a line
    Remove {
        /// Product ID
        id: String,
    },

    /// Empty the cart
    Clear,
}

pub(crate) async fn run(
    command: CartCommand,
    shop: &mut Shop,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command.command {
        CartSubcommand::Show => show(shop, out),
        CartSubcommand::Add { id } => {
            let product = shop.catalog.get(&ProductId::new(id)).await?;
            let quantity = shop.cart.add_to_cart(product);

            announce(&mut shop.cart, out)?;
            writeln!(out, "Quantity: {quantity}")?;

            Ok(())
        }
        CartSubcommand::Set { id, quantity } => {
            let id = ProductId::new(id);

            if !shop.cart.update_quantity(&id, quantity) {
                return Err(CliError::NotInCart(id));
            }

            show(shop, out)
        }
        CartSubcommand::Inc { id } => {
            let id = ProductId::new(id);
            let quantity = shop.cart.increment(&id).ok_or_else(|| CliError::NotInCart(id.clone()))?;

            writeln!(out, "{id}: {quantity}")?;

            Ok(())
        }
        CartSubcommand::Dec { id } => {
            let id = ProductId::new(id);
            let quantity = shop.cart.decrement(&id).ok_or_else(|| CliError::NotInCart(id.clone()))?;

            writeln!(out, "{id}: {quantity}")?;

            Ok(())
        }
        CartSubcommand::Remove { id } => {
            let id = ProductId::new(id);

            if !shop.cart.remove_item(&id) {
                return Err(CliError::NotInCart(id));
            }

            show(shop, out)
        }
        CartSubcommand::Clear => {
            shop.cart.clear_cart();
            writeln!(out, "Cart cleared")?;

            Ok(())
        }
    }
}

fn show(shop: &mut Shop, out: &mut impl Write) -> Result<(), CliError> {
    announce(&mut shop.cart, out)?;

    if shop.cart.cart().is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    writeln!(out, "{}", render::cart(shop.cart.cart())?)?;

    Ok(())
}
