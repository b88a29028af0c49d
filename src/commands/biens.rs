//! Property table bindings

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use portfolio_engine::repository::{DataStore, SessionProvider};
use portfolio_engine::{NewProperty, OwnerId, Property, PropertyId, Session, StoreError, StoreResult};
use reqwest::Method;

use super::client::{read_json, send, SupabaseClient};
use crate::models::{BienRow, NewBienRow};

const TABLE: &str = "biens";

/// Owner-scoped listing, newest first
pub(super) fn list_path(owner: &OwnerId) -> String {
    format!(
        "{TABLE}?select=*&user_id=eq.{}&order=created_at.desc",
        utf8_percent_encode(owner.as_str(), NON_ALPHANUMERIC)
    )
}

pub(super) fn delete_path(id: &PropertyId) -> String {
    format!("{TABLE}?id=eq.{}", utf8_percent_encode(id.as_str(), NON_ALPHANUMERIC))
}

impl SupabaseClient {
    async fn require_session(&self) -> StoreResult<Session> {
        self.current_session().await.ok_or(StoreError::Unauthenticated)
    }
}

// ========================
// Commands
// ========================

#[async_trait(?Send)]
impl DataStore for SupabaseClient {
    async fn list_by_owner(&self, owner: &OwnerId) -> StoreResult<Vec<Property>> {
        let session = self.require_session().await?;
        let url = self.rest_url(&list_path(owner));

        let response = send(self.authorized(Method::GET, url, &session)).await?;
        let rows: Vec<BienRow> = read_json(response).await?;
        tracing::debug!(count = rows.len(), "properties fetched");
        Ok(rows.into_iter().map(Property::from).collect())
    }

    async fn insert(&self, property: &NewProperty) -> StoreResult<Property> {
        let session = self.require_session().await?;
        let request = self
            .authorized(Method::POST, self.rest_url(TABLE), &session)
            .header("Prefer", "return=representation")
            .json(&[NewBienRow::from(property)]);

        let rows: Vec<BienRow> = read_json(send(request).await?).await?;
        rows.into_iter()
            .next()
            .map(Property::from)
            .ok_or_else(|| StoreError::Transport("insert returned no row".into()))
    }

    async fn delete_by_id(&self, id: &PropertyId) -> StoreResult<()> {
        let session = self.require_session().await?;
        let url = self.rest_url(&delete_path(id));
        send(self.authorized(Method::DELETE, url, &session)).await?;
        Ok(())
    }
}
