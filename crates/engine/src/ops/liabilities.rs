use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    Currency, EngineError, Liability, ResultEngine,
    commands::{CreateLiabilityCmd, LiabilityPaymentCmd, UpdateLiabilityCmd},
    derived::apply_payment,
    ledger, liabilities,
    money::sanitize_amount,
    summary::{LiabilitySummary, UpcomingLiability, upcoming_liabilities},
    util::{distinct_sorted, non_negative},
};

use super::{Engine, collect, normalize_optional_text};

impl Engine {
    /// All liabilities, earliest due date first.
    pub async fn liabilities(&self) -> ResultEngine<Vec<Liability>> {
        let models = liabilities::Entity::find()
            .order_by_asc(liabilities::Column::DueDate)
            .order_by_asc(liabilities::Column::Id)
            .all(&self.database)
            .await?;
        collect(models)
    }

    pub async fn liability(&self, id: Uuid) -> ResultEngine<Liability> {
        Liability::try_from(self.require::<liabilities::Entity>(id, "liability").await?)
    }

    /// Record a liability (fully outstanding) and the funds it brought in.
    pub async fn create_liability(&self, cmd: CreateLiabilityCmd) -> ResultEngine<Uuid> {
        if cmd.due_date < cmd.start_date {
            return Err(EngineError::InvalidDate(
                "due_date must not be before start_date".to_string(),
            ));
        }
        let original_amount = non_negative(cmd.original_amount, "original_amount")?;
        let now = Utc::now();
        let liability = Liability {
            id: Uuid::new_v4(),
            lender_party: cmd.lender_party,
            liability_type: cmd.liability_type.trim().to_string(),
            start_date: cmd.start_date,
            due_date: cmd.due_date,
            original_amount,
            outstanding_balance: original_amount,
            currency: cmd.currency,
            description: normalize_optional_text(cmd.description),
            created_at: now,
            updated_at: now,
        };
        let model: liabilities::ActiveModel = (&liability).into();
        model.insert(&self.database).await?;
        tracing::debug!(id = %liability.id, "liability created");

        self.publish(liability.id, Some(ledger::liability_funded(&liability)))
            .await?;
        Ok(liability.id)
    }

    /// Patch a liability. The balance invariant is checked on the merged
    /// record.
    pub async fn update_liability(&self, id: Uuid, cmd: UpdateLiabilityCmd) -> ResultEngine<()> {
        let mut liability = self.liability(id).await?;
        if let Some(lender_party) = cmd.lender_party {
            liability.lender_party = lender_party;
        }
        if let Some(liability_type) = cmd.liability_type {
            liability.liability_type = liability_type.trim().to_string();
        }
        if let Some(start_date) = cmd.start_date {
            liability.start_date = start_date;
        }
        if let Some(due_date) = cmd.due_date {
            liability.due_date = due_date;
        }
        if let Some(amount) = cmd.original_amount {
            liability.original_amount = non_negative(amount, "original_amount")?;
        }
        if let Some(balance) = cmd.outstanding_balance {
            liability.outstanding_balance = sanitize_amount(balance);
        }
        if let Some(currency) = cmd.currency {
            liability.currency = currency;
        }
        if cmd.description.is_some() {
            liability.description = normalize_optional_text(cmd.description);
        }
        liability.check_balance()?;
        liability.updated_at = Utc::now();

        let model: liabilities::ActiveModel = (&liability).into();
        model.update(&self.database).await?;
        tracing::debug!(%id, "liability updated");
        Ok(())
    }

    pub async fn delete_liability(&self, id: Uuid) -> ResultEngine<()> {
        self.delete_record::<liabilities::Entity>(id, "liability")
            .await
    }

    /// Pay down a liability. The balance is floored at 0; an overpayment is
    /// logged and the ledger still records the full payment.
    pub async fn make_payment(&self, id: Uuid, cmd: LiabilityPaymentCmd) -> ResultEngine<()> {
        let amount = non_negative(cmd.payment_amount, "payment_amount")?;
        let mut liability = self.liability(id).await?;

        let outcome = apply_payment(liability.outstanding_balance, amount);
        if outcome.overpaid > 0.0 {
            tracing::warn!(
                %id,
                overpaid = outcome.overpaid,
                "payment exceeds outstanding balance, clamping to 0"
            );
        }
        liability.outstanding_balance = outcome.outstanding_balance;
        liability.updated_at = Utc::now();

        let model: liabilities::ActiveModel = (&liability).into();
        model.update(&self.database).await?;
        tracing::debug!(%id, amount, "liability payment recorded");

        self.publish(
            id,
            Some(ledger::liability_paid(&liability, amount, cmd.payment_date)),
        )
        .await
    }

    /// Totals across every liability; overdue is judged against `today`.
    pub async fn liability_summary(
        &self,
        target: Currency,
        today: NaiveDate,
    ) -> ResultEngine<LiabilitySummary> {
        let liabilities = self.liabilities().await?;
        Ok(LiabilitySummary::build(&liabilities, target, today))
    }

    /// Outstanding liabilities due within `days` days, overdue ones included.
    pub async fn upcoming_liabilities(
        &self,
        days: i64,
        today: NaiveDate,
    ) -> ResultEngine<Vec<UpcomingLiability>> {
        let liabilities = self.liabilities().await?;
        Ok(upcoming_liabilities(liabilities, today, days))
    }

    pub async fn liability_types(&self) -> ResultEngine<Vec<String>> {
        let liabilities = self.liabilities().await?;
        Ok(distinct_sorted(
            liabilities.iter().map(|l| l.liability_type.as_str()),
        ))
    }
}
