//! Portfolio Metrics
//!
//! Pure arithmetic over fetched properties. Stored values are used as they
//! are: an installment left on a property whose loan toggle is off still
//! counts, and so does rent on a property marked as not rented.

use serde::{Deserialize, Serialize};

use crate::domain::Property;

/// Debt ratio above which the borrowing capacity is shown as saturated
pub const DISPLAY_RATIO_CEILING: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aggregates {
    pub total_debt: f64,
    pub total_invested: f64,
    pub total_monthly_installments: f64,
    pub total_monthly_rent: f64,
}

pub fn compute_aggregates(properties: &[Property]) -> Aggregates {
    properties.iter().fold(Aggregates::default(), |mut acc, p| {
        acc.total_debt += p.remaining_debt();
        acc.total_invested += p.purchase_price;
        acc.total_monthly_installments += p.monthly_installment;
        acc.total_monthly_rent += p.monthly_rent;
        acc
    })
}

/// Gross yield in percent. 0 for a property without a purchase price.
pub fn compute_yield(property: &Property) -> f64 {
    if property.purchase_price == 0.0 {
        return 0.0;
    }
    property.monthly_rent * 12.0 / property.purchase_price * 100.0
}

pub fn compute_cashflow(property: &Property) -> f64 {
    property.monthly_rent - property.monthly_charges - property.monthly_installment
}

/// Monthly installments as a percentage of monthly income, unrounded
pub fn compute_debt_ratio(total_monthly_installments: f64, annual_income: f64) -> f64 {
    if annual_income <= 0.0 {
        return 0.0;
    }
    total_monthly_installments / (annual_income / 12.0) * 100.0
}

/// One-decimal rounding for display
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Everything the list and advisor screens show about the portfolio
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub aggregates: Aggregates,
    pub net_worth: f64,
    pub net_monthly_cashflow: f64,
    pub debt_ratio: f64,
}

impl PortfolioSummary {
    pub fn from_properties(properties: &[Property], annual_income: f64) -> Self {
        let aggregates = compute_aggregates(properties);
        Self {
            net_worth: aggregates.total_invested - aggregates.total_debt,
            net_monthly_cashflow: aggregates.total_monthly_rent
                - aggregates.total_monthly_installments,
            debt_ratio: compute_debt_ratio(aggregates.total_monthly_installments, annual_income),
            aggregates,
        }
    }

    /// Ratio as displayed (one decimal)
    pub fn debt_ratio_display(&self) -> f64 {
        round1(self.debt_ratio)
    }

    /// Still room for a new loan under the displayed ceiling
    pub fn has_borrowing_margin(&self) -> bool {
        self.debt_ratio < DISPLAY_RATIO_CEILING
    }

    pub fn over_ceiling(&self) -> bool {
        self.debt_ratio > DISPLAY_RATIO_CEILING
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{NewProperty, OwnerId, PropertyId};

    fn property(new: NewProperty) -> Property {
        Property::from_new(PropertyId::new("p"), Utc::now(), new)
    }

    fn rented_with_loan() -> Property {
        property(NewProperty {
            owner: OwnerId::new("u1"),
            purchase_price: 200_000.0,
            is_rented: true,
            monthly_rent: 800.0,
            monthly_charges: 100.0,
            has_loan: true,
            loan_principal: 150_000.0,
            monthly_installment: 600.0,
            amount_repaid: 30_000.0,
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_portfolio_is_all_zero() {
        assert_eq!(compute_aggregates(&[]), Aggregates::default());
        let summary = PortfolioSummary::from_properties(&[], 50_000.0);
        assert_eq!(summary.net_worth, 0.0);
        assert_eq!(summary.debt_ratio, 0.0);
    }

    #[test]
    fn test_aggregates_sum_stored_values() {
        let mut leftover = rented_with_loan();
        leftover.has_loan = false;
        leftover.is_rented = false;
        leftover.amount_repaid = 200_000.0;
        let props = vec![rented_with_loan(), leftover];

        let agg = compute_aggregates(&props);
        assert_eq!(agg.total_invested, 400_000.0);
        assert_eq!(agg.total_debt, 120_000.0 - 50_000.0);
        assert_eq!(agg.total_monthly_installments, 1_200.0);
        assert_eq!(agg.total_monthly_rent, 1_600.0);
    }

    #[test]
    fn test_yield_and_cashflow() {
        let p = rented_with_loan();
        assert!((compute_yield(&p) - 4.8).abs() < 1e-9);
        assert_eq!(round1(compute_yield(&p)), 4.8);
        assert_eq!(compute_cashflow(&p), 100.0);
    }

    #[test]
    fn test_yield_without_price_is_zero() {
        let mut p = rented_with_loan();
        p.purchase_price = 0.0;
        assert_eq!(compute_yield(&p), 0.0);
    }

    #[test]
    fn test_cashflow_can_be_negative() {
        let mut p = rented_with_loan();
        p.monthly_installment = 1_000.0;
        assert_eq!(compute_cashflow(&p), -300.0);
    }

    #[test]
    fn test_debt_ratio() {
        assert_eq!(compute_debt_ratio(1_000.0, 0.0), 0.0);
        assert_eq!(compute_debt_ratio(1_000.0, 120_000.0), 10.0);
        assert_eq!(round1(compute_debt_ratio(500.0, 70_000.0)), 8.6);
    }

    #[test]
    fn test_summary_flags() {
        let props = vec![rented_with_loan()];
        let summary = PortfolioSummary::from_properties(&props, 18_000.0);

        assert_eq!(summary.net_worth, 200_000.0 - 120_000.0);
        assert_eq!(summary.net_monthly_cashflow, 200.0);
        assert_eq!(summary.debt_ratio, 40.0);
        assert!(summary.over_ceiling());
        assert!(!summary.has_borrowing_margin());
    }
}
