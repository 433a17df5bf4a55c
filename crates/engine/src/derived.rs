//! Fields computed from other fields of the same record.
//!
//! Derived values are never edited on their own: a sale's profit figures are
//! recomputed together from the full input set whenever any input changes,
//! and a liability balance only moves through [`apply_payment`].

use serde::{Deserialize, Serialize};

use crate::money::sanitize_amount;

/// Inputs of a sale that drive its profit figures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleInputs {
    pub cost: f64,
    pub selling_price: f64,
    pub expenses: f64,
}

impl SaleInputs {
    #[must_use]
    pub fn new(cost: f64, selling_price: f64, expenses: f64) -> Self {
        Self {
            cost: sanitize_amount(cost),
            selling_price: sanitize_amount(selling_price),
            expenses: sanitize_amount(expenses),
        }
    }

    /// Overlays the supplied inputs on top of `self`.
    ///
    /// Returns `None` when no input is supplied, meaning the stored figures
    /// stay untouched.
    #[must_use]
    pub fn merge(
        self,
        cost: Option<f64>,
        selling_price: Option<f64>,
        expenses: Option<f64>,
    ) -> Option<Self> {
        if cost.is_none() && selling_price.is_none() && expenses.is_none() {
            return None;
        }
        Some(Self::new(
            cost.unwrap_or(self.cost),
            selling_price.unwrap_or(self.selling_price),
            expenses.unwrap_or(self.expenses),
        ))
    }

    #[must_use]
    pub fn figures(self) -> SaleFigures {
        SaleFigures::compute(self)
    }
}

/// Profit figures of a sale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleFigures {
    pub gross_profit: f64,
    /// Percentage of the selling price, 0 when the price is not positive.
    pub gross_profit_margin: f64,
    pub net_profit: f64,
    /// Percentage of the selling price, 0 when the price is not positive.
    pub net_profit_margin: f64,
}

impl SaleFigures {
    #[must_use]
    pub fn compute(inputs: SaleInputs) -> Self {
        let SaleInputs {
            cost,
            selling_price,
            expenses,
        } = inputs;
        let gross_profit = selling_price - cost;
        let net_profit = gross_profit - expenses;
        let margin = |profit: f64| {
            if selling_price > 0.0 {
                profit / selling_price * 100.0
            } else {
                0.0
            }
        };
        Self {
            gross_profit,
            gross_profit_margin: margin(gross_profit),
            net_profit,
            net_profit_margin: margin(net_profit),
        }
    }
}

/// Result of applying a payment to a liability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaymentOutcome {
    pub outstanding_balance: f64,
    /// Part of the payment that exceeded the balance and was discarded.
    pub overpaid: f64,
}

/// Applies `payment` to `outstanding`, clamping the balance at 0.
///
/// Overpayment is not an error and creates no credit; the excess is only
/// reported in [`PaymentOutcome::overpaid`].
#[must_use]
pub fn apply_payment(outstanding: f64, payment: f64) -> PaymentOutcome {
    let outstanding = sanitize_amount(outstanding);
    let payment = sanitize_amount(payment);
    let remaining = outstanding - payment;
    if remaining < 0.0 {
        PaymentOutcome {
            outstanding_balance: 0.0,
            overpaid: -remaining,
        }
    } else {
        PaymentOutcome {
            outstanding_balance: remaining,
            overpaid: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_figures_from_reference_values() {
        let figures = SaleInputs::new(100.0, 200.0, 20.0).figures();
        assert_eq!(figures.gross_profit, 100.0);
        assert_eq!(figures.gross_profit_margin, 50.0);
        assert_eq!(figures.net_profit, 80.0);
        assert_eq!(figures.net_profit_margin, 40.0);
    }

    #[test]
    fn margins_are_zero_without_selling_price() {
        let figures = SaleInputs::new(50.0, 0.0, 10.0).figures();
        assert_eq!(figures.gross_profit, -50.0);
        assert_eq!(figures.gross_profit_margin, 0.0);
        assert_eq!(figures.net_profit, -60.0);
        assert_eq!(figures.net_profit_margin, 0.0);

        let negative = SaleInputs::new(0.0, -5.0, 0.0).figures();
        assert_eq!(negative.gross_profit_margin, 0.0);
    }

    #[test]
    fn net_profit_is_gross_minus_expenses() {
        for (cost, price, expenses) in [(1.0, 3.0, 0.5), (10.0, 7.5, 2.0), (0.0, 99.9, 99.9)] {
            let figures = SaleInputs::new(cost, price, expenses).figures();
            assert_eq!(figures.net_profit, figures.gross_profit - expenses);
            assert_eq!(
                figures.gross_profit_margin,
                (price - cost) / price * 100.0
            );
        }
    }

    #[test]
    fn merge_uses_existing_for_missing_inputs() {
        let stored = SaleInputs::new(100.0, 200.0, 20.0);
        assert_eq!(stored.merge(None, None, None), None);

        let merged = stored.merge(None, Some(400.0), None).unwrap();
        assert_eq!(merged, SaleInputs::new(100.0, 400.0, 20.0));
        let figures = merged.figures();
        assert_eq!(figures.gross_profit, 300.0);
        assert_eq!(figures.net_profit, 280.0);
        assert_eq!(figures.net_profit_margin, 70.0);
    }

    #[test]
    fn nan_inputs_count_as_zero() {
        let figures = SaleInputs::new(f64::NAN, 100.0, f64::INFINITY).figures();
        assert_eq!(figures.gross_profit, 100.0);
        assert_eq!(figures.net_profit, 100.0);
    }

    #[test]
    fn payments_clamp_at_zero() {
        let first = apply_payment(1000.0, 400.0);
        assert_eq!(first.outstanding_balance, 600.0);
        assert_eq!(first.overpaid, 0.0);

        let second = apply_payment(first.outstanding_balance, 700.0);
        assert_eq!(second.outstanding_balance, 0.0);
        assert_eq!(second.overpaid, 100.0);
    }

    #[test]
    fn balance_stays_within_bounds_for_any_sequence() {
        let original = 1000.0;
        let mut outstanding = original;
        for payment in [0.0, 250.0, 1.5, 999.0, 10.0, 0.0] {
            outstanding = apply_payment(outstanding, payment).outstanding_balance;
            assert!((0.0..=original).contains(&outstanding));
        }
        assert_eq!(outstanding, 0.0);
    }
}
