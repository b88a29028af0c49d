//! Property Entity
//!
//! One owned real-estate asset ("bien") with its purchase, rental and
//! financing figures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, OwnerId, PropertyId};

/// A stored property record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Assigned by the data store
    pub id: PropertyId,
    /// Set at creation, never changes
    pub owner: OwnerId,
    pub name: String,
    pub city: String,
    pub surface_m2: f64,
    pub purchase_price: f64,
    /// Gates whether rent and charges are relevant
    pub is_rented: bool,
    pub monthly_rent: f64,
    pub monthly_charges: f64,
    /// Gates whether the loan figures are relevant
    pub has_loan: bool,
    pub loan_principal: f64,
    pub monthly_installment: f64,
    /// Should not exceed `loan_principal`, but input does not enforce it
    pub amount_repaid: f64,
    /// Assigned by the data store
    pub created_at: DateTime<Utc>,
}

impl Property {
    /// Attach store-assigned identity to an insert payload
    pub fn from_new(id: PropertyId, created_at: DateTime<Utc>, new: NewProperty) -> Self {
        Self {
            id,
            owner: new.owner,
            name: new.name,
            city: new.city,
            surface_m2: new.surface_m2,
            purchase_price: new.purchase_price,
            is_rented: new.is_rented,
            monthly_rent: new.monthly_rent,
            monthly_charges: new.monthly_charges,
            has_loan: new.has_loan,
            loan_principal: new.loan_principal,
            monthly_installment: new.monthly_installment,
            amount_repaid: new.amount_repaid,
            created_at,
        }
    }

    /// Principal still owed. Negative when more than the principal was
    /// entered as repaid.
    pub fn remaining_debt(&self) -> f64 {
        self.loan_principal - self.amount_repaid
    }
}

impl Entity for Property {
    type Id = PropertyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Insert payload: a property before the store has assigned `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewProperty {
    pub owner: OwnerId,
    pub name: String,
    pub city: String,
    pub surface_m2: f64,
    pub purchase_price: f64,
    pub is_rented: bool,
    pub monthly_rent: f64,
    pub monthly_charges: f64,
    pub has_loan: bool,
    pub loan_principal: f64,
    pub monthly_installment: f64,
    pub amount_repaid: f64,
}
