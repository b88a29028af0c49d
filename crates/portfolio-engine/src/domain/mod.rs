//! Domain Layer
//!
//! Portfolio entities and the value objects derived from them.
//! Nothing here knows about the store, the session provider or the screens.

mod amount;
mod draft;
mod entity;
mod error;
mod notification;
mod property;
mod recommendation;
mod session;

pub use amount::{lenient_amount, parse_amount};
pub use draft::{DraftField, DraftForm};
pub use entity::{Entity, OwnerId, PropertyId};
pub use error::{EngineError, EngineResult, StoreError, StoreResult};
pub use notification::{NoticeKind, Notification};
pub(crate) use notification::{INCOME_REQUIRED, LINK_SENT, PROPERTY_DELETED, PROPERTY_SAVED};
pub use property::{NewProperty, Property};
pub use recommendation::{Recommendation, RecommendationState, Tier};
pub use session::{Session, SessionUser, EXPIRY_MARGIN_SECS};
