//! Backend Row Models
//!
//! Shapes of the hosted `biens` table, mapped to and from engine types.
//! Columns may come back null; numbers are coerced, never rejected.

use chrono::{DateTime, NaiveDateTime, Utc};
use portfolio_engine::domain::lenient_amount;
use portfolio_engine::{NewProperty, OwnerId, Property, PropertyId};
use serde::{Deserialize, Deserializer, Serialize};

/// A `biens` row as returned by the REST API
#[derive(Debug, Clone, Deserialize)]
pub struct BienRow {
    pub id: PropertyId,
    pub user_id: OwnerId,
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub ville: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub surface_m2: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub prix_achat: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub loyer_mensuel: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub charges_mensuelles: f64,
    #[serde(default)]
    pub a_credit: Option<bool>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub montant_emprunt: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub mensualite: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub montant_rembourse: f64,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl From<BienRow> for Property {
    fn from(row: BienRow) -> Self {
        Property {
            id: row.id,
            owner: row.user_id,
            name: row.nom.unwrap_or_default(),
            city: row.ville.unwrap_or_default(),
            surface_m2: row.surface_m2,
            purchase_price: row.prix_achat,
            // The table has no rented flag; rent is only stored when rented
            is_rented: row.loyer_mensuel > 0.0,
            monthly_rent: row.loyer_mensuel,
            monthly_charges: row.charges_mensuelles,
            has_loan: row.a_credit.unwrap_or(false),
            loan_principal: row.montant_emprunt,
            monthly_installment: row.mensualite,
            amount_repaid: row.montant_rembourse,
            created_at: row.created_at,
        }
    }
}

/// Insert payload for the `biens` table
#[derive(Debug, Serialize)]
pub struct NewBienRow<'a> {
    pub user_id: &'a OwnerId,
    pub nom: &'a str,
    pub ville: &'a str,
    pub surface_m2: f64,
    pub prix_achat: f64,
    pub loyer_mensuel: f64,
    pub charges_mensuelles: f64,
    pub a_credit: bool,
    pub montant_emprunt: f64,
    pub mensualite: f64,
    pub montant_rembourse: f64,
}

impl<'a> From<&'a NewProperty> for NewBienRow<'a> {
    fn from(p: &'a NewProperty) -> Self {
        Self {
            user_id: &p.owner,
            nom: &p.name,
            ville: &p.city,
            surface_m2: p.surface_m2,
            prix_achat: p.purchase_price,
            loyer_mensuel: p.monthly_rent,
            charges_mensuelles: p.monthly_charges,
            a_credit: p.has_loan,
            montant_emprunt: p.loan_principal,
            mensualite: p.monthly_installment,
            montant_rembourse: p.amount_repaid,
        }
    }
}

/// `timestamptz` columns carry an offset, plain `timestamp` ones do not
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .or_else(|_| {
                    NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc())
                })
                .ok()
        })
        .unwrap_or_default())
}
