//! Integration tests for deal status, progress and the join flow over fixture deals.

use jiff::{SignedDuration, Timestamp};
use testresult::TestResult;

use jam3a::prelude::*;

const CATALOG: &str = r"
deals:
  - id: almost-there
    title: Air Fryer
    title_ar: قلاية هوائية
    category: kitchen
    regular_price: 100.00 SAR
    deal_price: 50.00 SAR
    current: 4
    required: 5
    expires_in: 2 days
  - id: full-but-late
    title: Blender
    category: kitchen
    regular_price: 100.00 SAR
    deal_price: 100.00 SAR
    current: 5
    required: 5
    expires_in: -1 hours
";

fn reference() -> TestResult<Timestamp> {
    Ok(Timestamp::from_second(1_790_000_000)?)
}

fn form() -> JoinForm {
    JoinForm {
        name: "Reem".to_string(),
        email: "reem@example.com".to_string(),
        phone: "0501234567".to_string(),
        payment: Some(PaymentMethod::ApplePay),
    }
}

#[test]
fn near_complete_deal_is_open_then_completing_after_join() -> TestResult {
    let now = reference()?;
    let fixture = Fixture::from_yaml(CATALOG, now)?;
    let deal = fixture
        .deals()
        .iter()
        .find(|deal| deal.id == DealId::new("almost-there"))
        .cloned()
        .ok_or("fixture deal missing")?;

    assert_eq!(deal.status(now), DealStatus::Open);
    assert!((deal.progress_ratio() - 0.8).abs() < f64::EPSILON);
    assert_eq!(deal.discount_percentage(), 50);

    let mut flow = JoinFlow::new(deal.id.clone());
    flow.loaded(deal)?;

    if let Some(fields) = flow.form_mut() {
        *fields = form();
    }

    let request = flow.submit(now)?;

    assert_eq!(request.deal_id, DealId::new("almost-there"));
    assert_eq!(flow.submit(now), Err(JoinFlowError::AlreadySubmitting));

    flow.join_succeeded()?;

    let (deal, invitation) = match flow.state() {
        JoinState::Success { deal, invitation } => Ok((deal, invitation)),
        other => Err(format!("expected success, got {}", other.name())),
    }?;

    assert_eq!(deal.participants, Participation::new(5, 5));
    assert_eq!(deal.status(now), DealStatus::Completing);
    assert_eq!(invitation.remaining_after_join, 0);

    Ok(())
}

#[test]
fn full_deal_past_expiry_is_never_expired() -> TestResult {
    let now = reference()?;
    let fixture = Fixture::from_yaml(CATALOG, now)?;
    let deal = fixture
        .deals()
        .iter()
        .find(|deal| deal.id == DealId::new("full-but-late"))
        .ok_or("fixture deal missing")?;

    assert!(deal.window.has_ended(now), "window is in the past");
    assert_eq!(deal.status(now), DealStatus::Completing);
    assert_eq!(deal.discount_percentage(), 0);

    Ok(())
}

#[test]
fn status_moves_to_expired_as_time_passes() -> TestResult {
    let now = reference()?;
    let fixture = Fixture::from_yaml(CATALOG, now)?;
    let deal = fixture.deals().first().ok_or("fixture deal missing")?;
    let later = now.checked_add(SignedDuration::from_hours(49))?;

    assert_eq!(deal.status(now), DealStatus::Open);
    assert_eq!(deal.status(later), DealStatus::Expired);

    let view = DealView::new(deal, later, Language::English);

    assert_eq!(view.time_left, "Ended");
    assert!(!view.joinable);

    Ok(())
}

#[test]
fn views_are_stable_for_the_same_input() -> TestResult {
    let now = reference()?;
    let first = Fixture::from_yaml(CATALOG, now)?;
    let second = Fixture::from_yaml(CATALOG, now)?;

    for (a, b) in first.deals().iter().zip(second.deals()) {
        assert_eq!(
            DealView::new(a, now, Language::Arabic),
            DealView::new(b, now, Language::Arabic)
        );
    }

    Ok(())
}

#[test]
fn join_rejects_deals_that_closed() -> TestResult {
    let now = reference()?;
    let mut deal = Fixture::from_yaml(CATALOG, now)?
        .into_deals()
        .into_iter()
        .next()
        .ok_or("fixture deal missing")?;
    deal.window = DealWindow::Ends(now);

    let mut flow = JoinFlow::new(deal.id.clone());
    flow.loaded(deal)?;

    if let Some(fields) = flow.form_mut() {
        *fields = form();
    }

    assert_eq!(
        flow.submit(now),
        Err(JoinFlowError::NotJoinable(DealStatus::Expired))
    );

    Ok(())
}
