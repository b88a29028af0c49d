//! Portfolio Engine
//!
//! Core of the ImmoGestion client:
//! - domain: properties, draft form, sessions, recommendations
//! - metrics: aggregates, yield, cashflow, debt ratio
//! - advisor: income-based recommendation
//! - navigation: the four-screen state machine
//! - repository: store/session/timer/notifier traits and in-memory versions
//! - engine: state holder that ties them together

pub mod advisor;
pub mod domain;
pub mod engine;
pub mod metrics;
pub mod navigation;
pub mod repository;

pub use advisor::{compute_recommendation, AdvisorConfig};
pub use domain::{
    DraftField, DraftForm, EngineError, EngineResult, Entity, NewProperty, NoticeKind,
    Notification, OwnerId, Property, PropertyId, Recommendation, RecommendationState, Session,
    SessionUser, StoreError, StoreResult, Tier,
};
pub use engine::{Confirmation, DeleteOutcome, EngineDeps, PortfolioEngine, PortfolioState};
pub use metrics::{
    compute_aggregates, compute_cashflow, compute_debt_ratio, compute_yield, round1, Aggregates,
    PortfolioSummary,
};
pub use navigation::{Screen, Transition};
