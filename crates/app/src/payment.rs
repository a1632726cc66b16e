//! Payment Countdown
//!
//! Drives a running payment in real time: one countdown tick per second
//! until the window runs out or the operator settles the payment.

use std::time::Duration;

use async_trait::async_trait;
use lapak::{
    checkout::{CheckoutError, CheckoutFlow},
    payment::{PaymentSession, PaymentStatus},
};
use mockall::automock;
use tokio::{
    sync::mpsc,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

/// Interval between countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Operator decision on a running payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementSignal {
    Confirm,
    Cancel,
}

/// Where settlement decisions come from.
#[automock]
#[async_trait]
pub trait SettlementSource: Send {
    /// Wait for the next decision. `None` once the source is gone.
    ///
    /// Must be cancel-safe: the driver drops the future on every tick.
    async fn next_signal(&mut self) -> Option<SettlementSignal>;
}

/// Sending half of an [`OperatorChannel`].
#[derive(Debug, Clone)]
pub struct OperatorHandle {
    tx: mpsc::Sender<SettlementSignal>,
}

impl OperatorHandle {
    /// Queue a decision. Returns `false` if the payment is no longer
    /// listening.
    pub async fn send(&self, signal: SettlementSignal) -> bool {
        self.tx.send(signal).await.is_ok()
    }

    /// Queue a decision from a plain thread, such as a stdin reader.
    ///
    /// Must not be called from async code.
    pub fn blocking_send(&self, signal: SettlementSignal) -> bool {
        self.tx.blocking_send(signal).is_ok()
    }
}

/// Settlement decisions relayed from an operator, e.g. a terminal prompt.
#[derive(Debug)]
pub struct OperatorChannel {
    rx: mpsc::Receiver<SettlementSignal>,
}

/// Create a connected operator handle and settlement source.
#[must_use]
pub fn operator_channel() -> (OperatorHandle, OperatorChannel) {
    let (tx, rx) = mpsc::channel(4);

    (OperatorHandle { tx }, OperatorChannel { rx })
}

#[async_trait]
impl SettlementSource for OperatorChannel {
    async fn next_signal(&mut self) -> Option<SettlementSignal> {
        self.rx.recv().await
    }
}

/// How a driven payment ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The operator confirmed; the flow is still in the payment stage and
    /// ready to be settled.
    ConfirmRequested,

    /// The window ran out; the flow shows the failed payment.
    Expired,

    /// The operator cancelled or went away; the flow is back at the cart.
    Cancelled,
}

/// Run the countdown of `flow`'s payment until it ends.
///
/// `on_tick` observes the session after every tick.
///
/// # Errors
///
/// Returns [`CheckoutError::NoPayment`] if `flow` is not waiting for a
/// payment, or the session's error if a cancellation is rejected.
pub async fn drive_payment<F>(
    flow: &mut CheckoutFlow,
    source: &mut dyn SettlementSource,
    mut on_tick: F,
) -> Result<PaymentOutcome, CheckoutError>
where
    F: FnMut(&PaymentSession),
{
    match flow.payment() {
        Some(attempt) if !attempt.session.is_terminal() => {
            debug!(order_id = %attempt.session.order_id(), "payment countdown started");
        }
        _ => return Err(CheckoutError::NoPayment),
    }

    let mut interval = time::interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        tokio::select! {
            biased;

            signal = source.next_signal() => match signal {
                Some(SettlementSignal::Confirm) => return Ok(PaymentOutcome::ConfirmRequested),
                Some(SettlementSignal::Cancel) => {
                    flow.cancel()?;
                    return Ok(PaymentOutcome::Cancelled);
                }
                None => {
                    info!("settlement source closed, cancelling payment");
                    flow.cancel()?;
                    return Ok(PaymentOutcome::Cancelled);
                }
            },

            _ = interval.tick() => {
                let status = flow.tick();

                if let Some(attempt) = flow.payment() {
                    on_tick(&attempt.session);
                }

                if status != Some(PaymentStatus::Pending) {
                    return Ok(PaymentOutcome::Expired);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use lapak::{
        cart::Cart,
        checkout::{CheckoutStage, Field},
        payment::{FailureReason, OrderId, session::PAYMENT_WINDOW_SECONDS},
        products::ProductCategory,
    };
    use testresult::TestResult;

    use crate::test::helpers::product;

    use super::*;

    fn paying() -> Result<(Cart, CheckoutFlow), CheckoutError> {
        let mut cart = Cart::new();
        cart.add(product("a", 15_000, ProductCategory::Items));

        let mut flow = CheckoutFlow::new();
        flow.open_form(&cart)?;
        flow.edit(Field::Nick, "builder")?;
        flow.edit(Field::Whatsapp, "081234567890")?;
        flow.submit(&cart, OrderId::new("ORD-1"))?;

        Ok((cart, flow))
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_expires_after_the_window() -> TestResult {
        let (_cart, mut flow) = paying()?;
        let (_operator, mut source) = operator_channel();
        let mut ticks = 0_u32;
        let started = Instant::now();

        let outcome = drive_payment(&mut flow, &mut source, |_| ticks += 1).await?;

        assert_eq!(outcome, PaymentOutcome::Expired);
        assert_eq!(ticks, PAYMENT_WINDOW_SECONDS);
        assert_eq!(
            started.elapsed(),
            TICK_INTERVAL * PAYMENT_WINDOW_SECONDS,
            "one tick per second"
        );

        let session = &flow.payment().ok_or("payment view closed")?.session;
        assert_eq!(session.status(), PaymentStatus::Failed);
        assert_eq!(session.failure_reason(), Some(FailureReason::Expired));

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn confirmation_stops_the_countdown_without_settling() -> TestResult {
        let (cart, mut flow) = paying()?;
        let (operator, mut source) = operator_channel();

        let confirm = tokio::spawn(async move {
            time::sleep(Duration::from_millis(61_500)).await;
            operator.send(SettlementSignal::Confirm).await
        });

        let mut last = String::new();
        let outcome =
            drive_payment(&mut flow, &mut source, |session| last = session.remaining_display())
                .await?;

        assert!(confirm.await?, "driver should still be listening");
        assert_eq!(outcome, PaymentOutcome::ConfirmRequested);
        assert_eq!(last, "13:59");

        let settled = flow.confirm(&cart)?;
        assert_eq!(settled.order_id.as_str(), "ORD-1");

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_returns_to_the_cart() -> TestResult {
        let (_cart, mut flow) = paying()?;
        let (operator, mut source) = operator_channel();

        assert!(operator.send(SettlementSignal::Cancel).await, "channel open");

        let outcome = drive_payment(&mut flow, &mut source, |_| {}).await?;

        assert_eq!(outcome, PaymentOutcome::Cancelled);
        assert!(matches!(flow.stage(), CheckoutStage::Cart));

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn closed_source_cancels_the_payment() -> TestResult {
        let (_cart, mut flow) = paying()?;
        let mut source = MockSettlementSource::new();
        source.expect_next_signal().once().return_const(None);

        let outcome = drive_payment(&mut flow, &mut source, |_| {}).await?;

        assert_eq!(outcome, PaymentOutcome::Cancelled);
        assert!(flow.payment().is_none());

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn driving_without_a_payment_is_rejected() {
        let mut flow = CheckoutFlow::new();
        let mut source = MockSettlementSource::new();
        source.expect_next_signal().never();

        let result = drive_payment(&mut flow, &mut source, |_| {}).await;

        assert!(
            matches!(result, Err(CheckoutError::NoPayment)),
            "expected NoPayment, got {result:?}"
        );
    }
}
