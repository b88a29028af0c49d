//! Engine Integration Tests
//!
//! Full flows against the in-memory store and session provider.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;
use portfolio_engine::repository::{
    DataStore, ImmediateTimer, InMemoryStore, LocalSessionProvider, RecordingNotifier,
    SessionProvider, Timer,
};
use portfolio_engine::{
    round1, AdvisorConfig, Confirmation, DeleteOutcome, DraftField, EngineDeps, EngineError,
    NewProperty, NoticeKind, OwnerId, PortfolioEngine, Property, PropertyId, RecommendationState,
    Screen, StoreError, StoreResult, Tier, Transition,
};

struct Harness {
    engine: PortfolioEngine,
    store: Rc<InMemoryStore>,
    session: Rc<LocalSessionProvider>,
    notifier: Rc<RecordingNotifier>,
}

fn harness_with(
    store: Rc<dyn DataStore>,
    memory: Rc<InMemoryStore>,
    session: Rc<LocalSessionProvider>,
    timer: Rc<dyn Timer>,
) -> Harness {
    let notifier = Rc::new(RecordingNotifier::new());
    let engine = PortfolioEngine::new(EngineDeps {
        store,
        session: session.clone(),
        timer,
        notifier: notifier.clone(),
        advisor: AdvisorConfig::default(),
    });
    Harness { engine, store: memory, session, notifier }
}

fn harness() -> Harness {
    let store = Rc::new(InMemoryStore::new());
    harness_with(
        store.clone(),
        store,
        Rc::new(LocalSessionProvider::signed_in("u1")),
        Rc::new(ImmediateTimer),
    )
}

fn fill_example_draft(engine: &PortfolioEngine) {
    engine.set_draft_field(DraftField::Name, "T2 Gare".into());
    engine.set_draft_field(DraftField::City, "Lyon".into());
    engine.set_draft_field(DraftField::Price, "200000".into());
    engine.set_draft_field(DraftField::Rent, "800".into());
    engine.set_draft_field(DraftField::Charges, "100".into());
    engine.set_draft_field(DraftField::Installment, "600".into());
    engine.update_draft(|d| {
        d.is_rented = true;
        d.has_loan = true;
    });
}

fn seed(store: &InMemoryStore, owner: &str, name: &str) -> Property {
    store.insert_at(
        &NewProperty {
            owner: OwnerId::new(owner),
            name: name.to_string(),
            purchase_price: 100_000.0,
            ..Default::default()
        },
        chrono::Utc::now() - chrono::Duration::days(30),
    )
}

/// Sleeps for real, so a dismissal can land mid-computation
struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Takes its list snapshot immediately but holds the answer until released
struct GatedStore {
    inner: Rc<InMemoryStore>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

#[async_trait(?Send)]
impl DataStore for GatedStore {
    async fn list_by_owner(&self, owner: &OwnerId) -> StoreResult<Vec<Property>> {
        let snapshot = self.inner.list_by_owner(owner).await;
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        snapshot
    }

    async fn insert(&self, property: &NewProperty) -> StoreResult<Property> {
        self.inner.insert(property).await
    }

    async fn delete_by_id(&self, id: &PropertyId) -> StoreResult<()> {
        self.inner.delete_by_id(id).await
    }
}

/// Holds each insert until released
struct GatedInsertStore {
    inner: Rc<InMemoryStore>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

#[async_trait(?Send)]
impl DataStore for GatedInsertStore {
    async fn list_by_owner(&self, owner: &OwnerId) -> StoreResult<Vec<Property>> {
        self.inner.list_by_owner(owner).await
    }

    async fn insert(&self, property: &NewProperty) -> StoreResult<Property> {
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.insert(property).await
    }

    async fn delete_by_id(&self, id: &PropertyId) -> StoreResult<()> {
        self.inner.delete_by_id(id).await
    }
}

// ========================
// Saving
// ========================

#[tokio::test]
async fn test_end_to_end_draft_metrics() {
    let h = harness();
    h.engine.navigate(Transition::Open(Screen::AddForm)).await.unwrap();
    fill_example_draft(&h.engine);
    h.engine.set_draft_field(DraftField::AnnualIncome, "48000".into());

    let created = h.engine.add_property().await.expect("save");

    assert_eq!(round1(portfolio_engine::compute_yield(&created)), 4.8);
    assert_eq!(portfolio_engine::compute_cashflow(&created), 100.0);
    assert_eq!(h.engine.screen(), Screen::Menu);
    assert_eq!(h.engine.draft().name, "");
    assert_eq!(h.engine.draft().annual_income, "48000");
    assert_eq!(h.notifier.last().map(|n| n.kind), Some(NoticeKind::Success));
}

#[tokio::test]
async fn test_added_property_heads_the_list() {
    let h = harness();
    seed(&h.store, "u1", "ancien");
    fill_example_draft(&h.engine);

    let created = h.engine.add_property().await.unwrap();
    assert_eq!(h.engine.properties()[0].id, created.id);

    let loaded = h.engine.load_properties().await;
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].id, created.id);
    assert_eq!(loaded[1].name, "ancien");
}

#[tokio::test]
async fn test_save_failure_surfaces_store_message() {
    let h = harness();
    h.engine.navigate(Transition::Open(Screen::AddForm)).await.unwrap();
    fill_example_draft(&h.engine);
    h.store.fail_next_insert(StoreError::rejected("new row violates row-level security policy"));

    let err = h.engine.add_property().await.unwrap_err();

    assert!(matches!(err, EngineError::Store(_)));
    let notice = h.notifier.last().expect("notification");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "new row violates row-level security policy");
    assert_eq!(h.engine.screen(), Screen::AddForm);
    assert_eq!(h.engine.draft().name, "T2 Gare");
    assert!(h.engine.properties().is_empty());
}

#[tokio::test]
async fn test_save_requires_session() {
    let store = Rc::new(InMemoryStore::new());
    let h = harness_with(
        store.clone(),
        store,
        Rc::new(LocalSessionProvider::new()),
        Rc::new(ImmediateTimer),
    );
    fill_example_draft(&h.engine);

    assert_eq!(h.engine.add_property().await, Err(EngineError::Unauthenticated));
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_save_finishing_after_sign_out_stays_out_of_next_session() {
    let memory = Rc::new(InMemoryStore::new());
    let (release, gate) = oneshot::channel();
    let gated = Rc::new(GatedInsertStore { inner: memory.clone(), gate: RefCell::new(Some(gate)) });
    let h = harness_with(
        gated,
        memory,
        Rc::new(LocalSessionProvider::signed_in("alice")),
        Rc::new(ImmediateTimer),
    );
    h.engine.navigate(Transition::Open(Screen::AddForm)).await.unwrap();
    fill_example_draft(&h.engine);

    let (saved, ()) = futures::join!(h.engine.add_property(), async {
        tokio::task::yield_now().await;
        h.engine.sign_out().await;
        release.send(()).unwrap();
        h.engine.sign_in("bob@x.fr").await.unwrap();
    });

    // The row did reach the store, under the owner that started the save
    let saved = saved.unwrap();
    assert_eq!(saved.owner, OwnerId::new("alice"));
    assert_eq!(h.store.len(), 1);

    assert!(h.engine.properties().is_empty());
    assert_eq!(h.engine.screen(), Screen::Menu);
    assert_eq!(h.engine.draft().name, "");
    assert!(h
        .notifier
        .notifications()
        .iter()
        .all(|n| n.message != "Bien ajouté au patrimoine !"));
    assert!(h.engine.load_properties().await.is_empty());
}

// ========================
// Loading
// ========================

#[tokio::test]
async fn test_load_degrades_to_empty() {
    let h = harness();
    seed(&h.store, "u1", "a");
    h.store.fail_next_list(StoreError::Transport("connection reset".into()));

    assert!(h.engine.load_properties().await.is_empty());
    assert!(h.notifier.notifications().is_empty());
    assert_eq!(h.engine.load_properties().await.len(), 1);

    h.session.sign_out().await;
    assert!(h.engine.load_properties().await.is_empty());
}

#[tokio::test]
async fn test_load_only_sees_own_properties() {
    let h = harness();
    seed(&h.store, "u1", "mine");
    seed(&h.store, "u2", "theirs");

    h.engine.navigate(Transition::Open(Screen::ListView)).await.unwrap();
    let names: Vec<String> = h.engine.properties().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["mine"]);
}

#[tokio::test]
async fn test_stale_fetch_does_not_overwrite_newer_list() {
    let memory = Rc::new(InMemoryStore::new());
    seed(&memory, "u1", "ancien");
    let (release, gate) = oneshot::channel();
    let gated = Rc::new(GatedStore { inner: memory.clone(), gate: RefCell::new(Some(gate)) });
    let h = harness_with(
        gated,
        memory,
        Rc::new(LocalSessionProvider::signed_in("u1")),
        Rc::new(ImmediateTimer),
    );

    let (opened, saved) = futures::join!(
        h.engine.navigate(Transition::Open(Screen::ListView)),
        async {
            tokio::task::yield_now().await;
            h.engine.navigate(Transition::Back).await.unwrap();
            h.engine.navigate(Transition::Open(Screen::AddForm)).await.unwrap();
            fill_example_draft(&h.engine);
            let saved = h.engine.add_property().await.unwrap();
            release.send(()).unwrap();
            saved
        }
    );

    assert_eq!(opened, Ok(Screen::ListView));
    let ids: Vec<PropertyId> = h.engine.properties().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![saved.id]);
    assert_eq!(h.engine.screen(), Screen::Menu);
}

// ========================
// Deleting
// ========================

#[tokio::test]
async fn test_delete_flow() {
    let h = harness();
    let keep = seed(&h.store, "u1", "keep");
    let gone = seed(&h.store, "u1", "gone");
    h.engine.load_properties().await;

    let declined = h.engine.delete_property(&gone.id, Confirmation::Declined).await;
    assert_eq!(declined, Ok(DeleteOutcome::Declined));
    assert_eq!(h.store.len(), 2);

    let deleted = h.engine.delete_property(&gone.id, Confirmation::Confirmed).await;
    assert_eq!(deleted, Ok(DeleteOutcome::Deleted));
    assert_eq!(h.engine.properties(), vec![keep.clone()]);
    assert_eq!(h.notifier.last().map(|n| n.kind), Some(NoticeKind::Success));

    let again = h.engine.delete_property(&gone.id, Confirmation::Confirmed).await;
    assert_eq!(again, Ok(DeleteOutcome::AlreadyGone));
    assert_eq!(h.engine.properties(), vec![keep]);
}

#[tokio::test]
async fn test_delete_failure_keeps_list() {
    let h = harness();
    let target = seed(&h.store, "u1", "target");
    h.engine.load_properties().await;
    h.store.fail_next_delete(StoreError::Transport("timeout".into()));

    let err = h.engine.delete_property(&target.id, Confirmation::Confirmed).await;

    assert!(err.is_err());
    assert_eq!(h.engine.properties().len(), 1);
    assert_eq!(h.notifier.last().map(|n| n.kind), Some(NoticeKind::Error));
}

// ========================
// Advisor
// ========================

#[tokio::test]
async fn test_recommendation_needs_income() {
    let h = harness();

    assert_eq!(h.engine.request_recommendation().await, Err(EngineError::MissingIncome));
    assert_eq!(h.engine.recommendation(), RecommendationState::Idle);
    let notice = h.notifier.last().expect("notification");
    assert!(notice.is_error());
}

#[tokio::test]
async fn test_recommendation_uses_portfolio() {
    let h = harness();
    fill_example_draft(&h.engine);
    h.engine.add_property().await.unwrap();
    h.engine.set_draft_field(DraftField::AnnualIncome, "18000".into());

    assert_eq!(h.engine.debt_ratio(), 40.0);
    let rec = h.engine.request_recommendation().await.expect("recommendation");

    assert_eq!(rec.tier, Tier::Restricted);
    assert_eq!(rec.borrowing_headroom, 0.0);
    assert_eq!(rec.advice, h.engine.advisor_config().standard_advice);
    assert_eq!(h.engine.recommendation(), RecommendationState::Ready(rec));

    h.engine.dismiss_recommendation();
    assert_eq!(h.engine.recommendation(), RecommendationState::Idle);
}

#[tokio::test]
async fn test_dismiss_cancels_pending_recommendation() {
    let store = Rc::new(InMemoryStore::new());
    let h = harness_with(
        store.clone(),
        store,
        Rc::new(LocalSessionProvider::signed_in("u1")),
        Rc::new(TokioTimer),
    );
    h.engine.set_draft_field(DraftField::AnnualIncome, "70000".into());

    let (result, _) = futures::join!(h.engine.request_recommendation(), async {
        tokio::task::yield_now().await;
        assert!(h.engine.recommendation().is_computing());
        h.engine.dismiss_recommendation();
    });

    assert_eq!(result, Err(EngineError::Cancelled));
    assert_eq!(h.engine.recommendation(), RecommendationState::Idle);
}

#[tokio::test]
async fn test_newer_request_supersedes_older() {
    let store = Rc::new(InMemoryStore::new());
    let h = harness_with(
        store.clone(),
        store,
        Rc::new(LocalSessionProvider::signed_in("u1")),
        Rc::new(TokioTimer),
    );
    h.engine.set_draft_field(DraftField::AnnualIncome, "70000".into());

    let (first, second) = futures::join!(h.engine.request_recommendation(), async {
        tokio::task::yield_now().await;
        h.engine.request_recommendation().await
    });

    assert_eq!(first, Err(EngineError::Cancelled));
    let second = second.expect("second run");
    assert_eq!(second.tier, Tier::Premium);
    assert_eq!(h.engine.recommendation(), RecommendationState::Ready(second));
}

#[tokio::test]
async fn test_leaving_advisor_cancels_analysis() {
    let store = Rc::new(InMemoryStore::new());
    let h = harness_with(
        store.clone(),
        store,
        Rc::new(LocalSessionProvider::signed_in("u1")),
        Rc::new(TokioTimer),
    );
    h.engine.navigate(Transition::Open(Screen::AdvisorView)).await.unwrap();
    h.engine.set_draft_field(DraftField::AnnualIncome, "70000".into());

    let (result, _) = futures::join!(h.engine.request_recommendation(), async {
        tokio::task::yield_now().await;
        h.engine.navigate(Transition::Back).await.unwrap();
    });

    assert_eq!(result, Err(EngineError::Cancelled));
    assert_eq!(h.engine.screen(), Screen::Menu);
    assert_eq!(h.engine.recommendation(), RecommendationState::Idle);
}

// ========================
// Navigation, session, observers
// ========================

#[tokio::test]
async fn test_invalid_transition_changes_nothing() {
    let h = harness();
    h.engine.navigate(Transition::Open(Screen::ListView)).await.unwrap();

    let err = h.engine.navigate(Transition::Open(Screen::AddForm)).await;
    assert!(matches!(err, Err(EngineError::InvalidTransition { from: Screen::ListView, .. })));
    assert_eq!(h.engine.screen(), Screen::ListView);
}

#[tokio::test]
async fn test_sign_out_clears_portfolio() {
    let h = harness();
    seed(&h.store, "u1", "a");
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();
    let _watch = h.engine.watch_session(move |s| sink.borrow_mut().push(s.is_some()));

    h.engine.navigate(Transition::Open(Screen::ListView)).await.unwrap();
    assert_eq!(h.engine.properties().len(), 1);

    h.engine.sign_out().await;
    assert!(h.engine.properties().is_empty());
    assert_eq!(h.engine.screen(), Screen::Menu);
    assert_eq!(*changes.borrow(), vec![false]);
    assert!(h.engine.current_session().await.is_none());
}

#[tokio::test]
async fn test_sign_in_notifies() {
    let store = Rc::new(InMemoryStore::new());
    let h = harness_with(
        store.clone(),
        store,
        Rc::new(LocalSessionProvider::new()),
        Rc::new(ImmediateTimer),
    );

    assert!(h.engine.sign_in("broken").await.is_err());
    assert_eq!(h.notifier.last().map(|n| n.kind), Some(NoticeKind::Error));

    h.engine.sign_in("invest@immo.fr").await.expect("sign in");
    assert_eq!(h.notifier.last().map(|n| n.kind), Some(NoticeKind::Success));
    assert!(h.engine.current_session().await.is_some());
}

#[tokio::test]
async fn test_observers_receive_snapshots() {
    let h = harness();
    let screens = Rc::new(RefCell::new(Vec::new()));
    let sink = screens.clone();
    let sub = h.engine.observe(move |state| sink.borrow_mut().push(state.screen));

    h.engine.navigate(Transition::Open(Screen::AddForm)).await.unwrap();
    h.engine.navigate(Transition::Back).await.unwrap();
    sub.unsubscribe();
    h.engine.navigate(Transition::Open(Screen::AddForm)).await.unwrap();

    assert_eq!(*screens.borrow(), vec![Screen::AddForm, Screen::Menu]);
}
