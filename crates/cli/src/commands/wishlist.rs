use std::io::Write;

use clap::{Args, Subcommand};
use lapak::products::ProductId;

use crate::{errors::CliError, render, shop::Shop};

#[derive(Debug, Args)]
pub(crate) struct WishlistCommand {
    #[command(subcommand)]
    command: WishlistSubcommand,
}

#[derive(Debug, Subcommand)]
enum WishlistSubcommand {
    /// List saved products
    List,

    /// Save a product
    Add {
        /// Product ID
        id: String,
    },

    /// Forget a saved product
    Remove {
        /// Product ID
        id: String,
    },
}

pub(crate) async fn run(
    command: WishlistCommand,
    shop: &Shop,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let (app, session) = shop.signed_in()?;
    let user = session.user.id;

    match command.command {
        WishlistSubcommand::List => {
            let entries = app.wishlist.list_wishlist(user).await?;

            if entries.is_empty() {
                writeln!(out, "Your wishlist is empty")?;
            } else {
                writeln!(out, "{}", render::wishlist(&entries)?)?;
            }
        }
        WishlistSubcommand::Add { id } => {
            let id = ProductId::new(id);

            if app.wishlist.is_in_wishlist(user, &id).await? {
                writeln!(out, "{id} is already in your wishlist")?;
            } else {
                app.wishlist.add_to_wishlist(user, &id).await?;
                writeln!(out, "{id} added to wishlist")?;
            }
        }
        WishlistSubcommand::Remove { id } => {
            let id = ProductId::new(id);

            app.wishlist.remove_from_wishlist(user, &id).await?;
            writeln!(out, "{id} removed from wishlist")?;
        }
    }

    Ok(())
}
