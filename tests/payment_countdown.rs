//! Integration tests for the payment countdown

use testresult::TestResult;

use lapak::{
    payment::{
        FailureReason, OrderId, PaymentSession, PaymentSessionError, PaymentStatus,
        session::PAYMENT_WINDOW_SECONDS,
    },
    pricing::rupiah,
};

#[test]
fn unconfirmed_payment_fails_after_the_window() -> TestResult {
    let mut session = PaymentSession::start(rupiah(120_000)?, OrderId::new("ORD-1"));

    let statuses: Vec<PaymentStatus> = (0..PAYMENT_WINDOW_SECONDS)
        .map(|_| session.tick())
        .collect();

    assert!(
        statuses
            .iter()
            .take(statuses.len() - 1)
            .all(|status| *status == PaymentStatus::Pending),
        "every tick before the last should stay pending"
    );
    assert_eq!(statuses.last(), Some(&PaymentStatus::Failed));

    for _ in 0..10 {
        assert_eq!(session.tick(), PaymentStatus::Failed);
    }

    assert_eq!(session.remaining_seconds(), 0);
    assert_eq!(session.failure_reason(), Some(FailureReason::Expired));

    Ok(())
}

#[test]
fn terminal_statuses_do_not_revert() -> TestResult {
    let mut confirmed = PaymentSession::start(rupiah(15_000)?, OrderId::new("ORD-1"));
    confirmed.confirm()?;

    assert_eq!(
        confirmed.confirm(),
        Err(PaymentSessionError::AlreadySettled(PaymentStatus::Success))
    );
    assert!(confirmed.cancel().is_err());
    assert_eq!(confirmed.status(), PaymentStatus::Success);

    let mut cancelled = PaymentSession::start(rupiah(15_000)?, OrderId::new("ORD-2"));
    cancelled.cancel()?;

    assert!(cancelled.confirm().is_err());
    assert_eq!(cancelled.status(), PaymentStatus::Failed);
    assert_eq!(cancelled.failure_reason(), Some(FailureReason::Cancelled));

    Ok(())
}

#[test]
fn countdown_display_is_minutes_and_seconds() -> TestResult {
    let mut session = PaymentSession::start(rupiah(15_000)?, OrderId::new("ORD-1"));

    for _ in 0..61 {
        session.tick();
    }

    assert_eq!(session.remaining_display(), "13:59");

    Ok(())
}
