use std::io::Write;

use clap::Subcommand;
use lapak::{cart::CartStore, storage::KeyValueStore};

use crate::{errors::CliError, shop::Shop};

mod account;
mod cart;
mod checkout;
mod orders;
mod products;
mod wishlist;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List products
    Products(products::ProductsArgs),

    /// Show one product
    Product(products::ProductArgs),

    /// Show or change the cart
    Cart(cart::CartCommand),

    /// Pay for the cart
    Checkout(checkout::CheckoutArgs),

    /// Create an account
    Register(account::RegisterArgs),

    /// Sign in
    Login(account::LoginArgs),

    /// Sign out
    Logout,

    /// List your orders
    Orders,

    /// Show or change your wishlist
    Wishlist(wishlist::WishlistCommand),
}

pub(crate) async fn run(
    command: Command,
    shop: &mut Shop,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::Products(args) => products::list(args, shop, out).await,
        Command::Product(args) => products::show(args, shop, out).await,
        Command::Cart(command) => cart::run(command, shop, out).await,
        Command::Checkout(args) => checkout::run(args, shop, out).await,
        Command::Register(args) => account::register(args, shop, out).await,
        Command::Login(args) => account::login(args, shop, out).await,
        Command::Logout => account::logout(shop, out).await,
        Command::Orders => orders::list(shop, out).await,
        Command::Wishlist(command) => wishlist::run(command, shop, out).await,
    }
}

/// Print and discard the cart's pending notifications.
fn announce<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    for notification in cart.notifications_mut().drain() {
        writeln!(out, "{}", notification.message)?;
    }

    Ok(())
}
