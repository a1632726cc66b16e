use std::io::Write;

use crate::{errors::CliError, render, shop::Shop};

pub(crate) async fn list(shop: &Shop, out: &mut impl Write) -> Result<(), CliError> {
    let (app, session) = shop.signed_in()?;

    let orders = app.orders.list_user_orders(session.user.id).await?;

    if orders.is_empty() {
        writeln!(out, "No orders yet")?;
        return Ok(());
    }

    writeln!(out, "{}", render::orders(&orders)?)?;

    Ok(())
}
