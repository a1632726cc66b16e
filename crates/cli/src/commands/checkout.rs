use std::{
    io::{self, BufRead, Write},
    thread,
    time::Duration,
};

use clap::Args;
use humanize_duration::{Truncate, prelude::DurationExt};
use jiff::Timestamp;
use lapak::{
    checkout::{CheckoutFlow, Field},
    payment::{OrderId, PaymentSession},
    pricing::format_rupiah,
};
use lapak_app::payment::{
    OperatorHandle, PaymentOutcome, SettlementSignal, SettlementSource, drive_payment,
    operator_channel,
};
use tokio::signal;
use tracing::debug;

use crate::{errors::CliError, shop::Shop};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// In-game nickname of the receiving account
    #[arg(long)]
    nick: String,

    /// WhatsApp number for delivery updates
    #[arg(long)]
    whatsapp: String,

    /// Account password, needed for login and boosting products
    #[arg(long, env = "LAPAK_ACCOUNT_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

pub(crate) async fn run(
    args: CheckoutArgs,
    shop: &mut Shop,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let (operator, mut source) = operator_channel();

    read_operator_input(operator.clone());

    let interrupt = tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            debug!("interrupted, cancelling payment");

            if !operator.send(SettlementSignal::Cancel).await {
                debug!("payment already settled, interrupt ignored");
            }
        }
    });

    let result = pay(args, shop, &mut source, out).await;

    interrupt.abort();

    result
}

/// Relay operator input from stdin on a background thread.
fn read_operator_input(operator: OperatorHandle) {
    thread::spawn(move || relay_operator_input(&operator, io::stdin().lock()));
}

/// Relay `confirm` and `cancel` lines as settlement signals. End of input
/// cancels.
///
/// Returns `false` if the payment stopped listening first.
fn relay_operator_input(operator: &OperatorHandle, input: impl BufRead) -> bool {
    for line in input.lines() {
        let Ok(line) = line else {
            break;
        };

        let signal = match line.trim() {
            "confirm" | "c" => SettlementSignal::Confirm,
            "cancel" | "q" => SettlementSignal::Cancel,
            _ => continue,
        };

        if !operator.blocking_send(signal) {
            debug!(?signal, "payment no longer listening, input ignored");
            return false;
        }
    }

    let listening = operator.blocking_send(SettlementSignal::Cancel);

    if !listening {
        debug!("payment settled before end of input");
    }

    listening
}

/// Validate the buyer's details, show the payment code and wait for the
/// payment to settle.
pub(crate) async fn pay(
    args: CheckoutArgs,
    shop: &mut Shop,
    source: &mut dyn SettlementSource,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let settlement = shop.settlement()?;
    let mut flow = shop.checkout_flow();

    flow.open_form(shop.cart.cart())?;
    flow.edit(Field::Nick, args.nick)?;
    flow.edit(Field::Whatsapp, args.whatsapp)?;

    if let Some(password) = args.password {
        flow.edit(Field::Password, password)?;
    }

    let order_id = OrderId::from_unix_millis(Timestamp::now().as_millisecond());
    let session = flow.submit(shop.cart.cart(), order_id)?;

    write_payment(session, out)?;

    let mut write_error = None;
    let outcome = drive_payment(&mut flow, source, |session| {
        if let Err(error) = write_countdown(session, out) {
            write_error.get_or_insert(error);
        }
    })
    .await?;

    if let Some(error) = write_error {
        return Err(error.into());
    }

    match outcome {
        PaymentOutcome::ConfirmRequested => match settlement {
            Some((checkout, buyer)) => {
                let order = checkout.settle(&mut flow, &mut shop.cart, &buyer).await?;

                writeln!(out, "Payment confirmed. Order {} placed.", order.order_number)?;
            }
            None => {
                let settled = flow.confirm_and_clear(&mut shop.cart)?;

                writeln!(
                    out,
                    "Payment confirmed. Order {} paid ({}).",
                    settled.order_id,
                    format_rupiah(&settled.amount)
                )?;
            }
        },
        PaymentOutcome::Expired => {
            let reason = failure(&flow);

            writeln!(out, "Payment failed: {reason}. Your cart was kept.")?;
            flow.close();
        }
        PaymentOutcome::Cancelled => {
            writeln!(out, "Payment cancelled. Your cart was kept.")?;
        }
    }

    Ok(())
}

fn failure(flow: &CheckoutFlow) -> String {
    flow.payment()
        .and_then(|attempt| attempt.session.failure_reason())
        .map_or_else(|| "unknown".to_string(), |reason| reason.to_string())
}

fn write_payment(session: &PaymentSession, out: &mut impl Write) -> Result<(), CliError> {
    writeln!(out, "Order {}", session.order_id())?;
    writeln!(out, "{}", session.code().label())?;
    writeln!(out, "QRIS: {}", session.code().payload())?;

    match session.code().image_url() {
        Ok(url) => writeln!(out, "QR image: {url}")?,
        Err(error) => debug!(%error, "qr image url unavailable"),
    }

    writeln!(out, "Pay within {}.", session.remaining_display())?;
    writeln!(out, "Type `confirm` once paid or `cancel` to give up.")?;

    Ok(())
}

fn write_countdown(session: &PaymentSession, out: &mut impl Write) -> io::Result<()> {
    let remaining = session.remaining_seconds();

    if remaining % 60 == 0 || remaining <= 10 {
        let left = Duration::from_secs(remaining.into());

        writeln!(
            out,
            "{} left ({})",
            session.remaining_display(),
            left.human(Truncate::Second)
        )?;
    }

    Ok(())
}
