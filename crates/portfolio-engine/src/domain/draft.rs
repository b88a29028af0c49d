//! Draft Form
//!
//! The in-progress entry for one new property, kept as raw text exactly as
//! typed. Coercion to numbers happens once, in `to_new_property`.

use serde::{Deserialize, Serialize};

use super::amount::parse_amount;
use super::entity::OwnerId;
use super::property::NewProperty;

/// Editable staging area for a new property plus the declared income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftForm {
    pub name: String,
    pub city: String,
    pub surface: String,
    pub price: String,
    pub is_rented: bool,
    pub rent: String,
    pub charges: String,
    pub has_loan: bool,
    pub loan_principal: String,
    pub installment: String,
    pub repaid: String,
    /// Annual gross income. Only feeds the advisor, never persisted, and
    /// survives `reset_keeping_income`.
    pub annual_income: String,
}

impl Default for DraftForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            city: String::new(),
            surface: String::new(),
            price: String::new(),
            is_rented: true,
            rent: String::new(),
            charges: String::new(),
            has_loan: false,
            loan_principal: String::new(),
            installment: String::new(),
            repaid: String::new(),
            annual_income: String::new(),
        }
    }
}

/// A single editable field, used by form inputs to route keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    City,
    Surface,
    Price,
    Rent,
    Charges,
    LoanPrincipal,
    Installment,
    Repaid,
    AnnualIncome,
}

impl DraftForm {
    pub fn set(&mut self, field: DraftField, value: String) {
        let slot = match field {
            DraftField::Name => &mut self.name,
            DraftField::City => &mut self.city,
            DraftField::Surface => &mut self.surface,
            DraftField::Price => &mut self.price,
            DraftField::Rent => &mut self.rent,
            DraftField::Charges => &mut self.charges,
            DraftField::LoanPrincipal => &mut self.loan_principal,
            DraftField::Installment => &mut self.installment,
            DraftField::Repaid => &mut self.repaid,
            DraftField::AnnualIncome => &mut self.annual_income,
        };
        *slot = value;
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::City => &self.city,
            DraftField::Surface => &self.surface,
            DraftField::Price => &self.price,
            DraftField::Rent => &self.rent,
            DraftField::Charges => &self.charges,
            DraftField::LoanPrincipal => &self.loan_principal,
            DraftField::Installment => &self.installment,
            DraftField::Repaid => &self.repaid,
            DraftField::AnnualIncome => &self.annual_income,
        }
    }

    /// Declared annual income, coerced
    pub fn annual_income(&self) -> f64 {
        parse_amount(&self.annual_income)
    }

    /// Build the insert payload. Rent is dropped for a property that is not
    /// rented out; loan figures are kept as entered whatever `has_loan` says.
    pub fn to_new_property(&self, owner: OwnerId) -> NewProperty {
        NewProperty {
            owner,
            name: self.name.clone(),
            city: self.city.clone(),
            surface_m2: parse_amount(&self.surface),
            purchase_price: parse_amount(&self.price),
            is_rented: self.is_rented,
            monthly_rent: if self.is_rented { parse_amount(&self.rent) } else { 0.0 },
            monthly_charges: parse_amount(&self.charges),
            has_loan: self.has_loan,
            loan_principal: parse_amount(&self.loan_principal),
            monthly_installment: parse_amount(&self.installment),
            amount_repaid: parse_amount(&self.repaid),
        }
    }

    /// Clear the form after a successful save
    pub fn reset_keeping_income(&mut self) {
        let annual_income = std::mem::take(&mut self.annual_income);
        *self = Self {
            annual_income,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> DraftForm {
        let mut draft = DraftForm::default();
        draft.set(DraftField::Name, "Studio Centre".into());
        draft.set(DraftField::Price, "200000".into());
        draft.set(DraftField::Rent, "800".into());
        draft.set(DraftField::Charges, "100".into());
        draft.set(DraftField::Installment, "600".into());
        draft.set(DraftField::AnnualIncome, "48000".into());
        draft.has_loan = true;
        draft
    }

    #[test]
    fn test_coercion_to_payload() {
        let mut draft = filled();
        draft.set(DraftField::Surface, "n/a".into());
        let new = draft.to_new_property(OwnerId::new("u1"));

        assert_eq!(new.purchase_price, 200000.0);
        assert_eq!(new.monthly_rent, 800.0);
        assert_eq!(new.surface_m2, 0.0);
        assert_eq!(new.loan_principal, 0.0);
        assert!(new.has_loan);
        assert_eq!(new.owner.as_str(), "u1");
    }

    #[test]
    fn test_rent_dropped_when_not_rented() {
        let mut draft = filled();
        draft.is_rented = false;
        let new = draft.to_new_property(OwnerId::new("u1"));

        assert_eq!(new.monthly_rent, 0.0);
        assert_eq!(new.monthly_charges, 100.0);
    }

    #[test]
    fn test_loan_values_kept_when_loan_toggled_off() {
        let mut draft = filled();
        draft.has_loan = false;
        let new = draft.to_new_property(OwnerId::new("u1"));

        assert_eq!(new.monthly_installment, 600.0);
    }

    #[test]
    fn test_reset_keeps_income() {
        let mut draft = filled();
        draft.is_rented = false;
        draft.reset_keeping_income();

        assert_eq!(draft.annual_income, "48000");
        assert_eq!(draft.get(DraftField::Name), "");
        assert!(draft.is_rented);
        assert!(!draft.has_loan);
        assert_eq!(draft.annual_income(), 48000.0);
    }
}
