use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    BankPdc, Currency, DateRange, ResultEngine, bank_pdc,
    commands::{CreateBankPdcCmd, UpdateBankPdcCmd},
    ledger,
    summary::{BankTotal, PdcSummary, UpcomingCheque, pdc_by_bank, upcoming_cheques},
    util::{distinct_sorted, non_negative},
};

use super::{Engine, collect, today, within_dates};

impl Engine {
    /// All cheques, latest date first.
    pub async fn bank_pdcs(&self) -> ResultEngine<Vec<BankPdc>> {
        self.bank_pdcs_in(DateRange::all()).await
    }

    pub(crate) async fn bank_pdcs_in(&self, range: DateRange) -> ResultEngine<Vec<BankPdc>> {
        let models = within_dates(bank_pdc::Entity::find(), bank_pdc::Column::Date, range)
            .order_by_desc(bank_pdc::Column::Date)
            .order_by_desc(bank_pdc::Column::CreatedAt)
            .order_by_asc(bank_pdc::Column::Id)
            .all(&self.database)
            .await?;
        collect(models)
    }

    pub async fn bank_pdc(&self, id: Uuid) -> ResultEngine<BankPdc> {
        BankPdc::try_from(self.require::<bank_pdc::Entity>(id, "cheque").await?)
    }

    /// Record a cheque; one created cleared leaves the account right away.
    pub async fn create_bank_pdc(&self, cmd: CreateBankPdcCmd) -> ResultEngine<Uuid> {
        let now = Utc::now();
        let pdc = BankPdc {
            id: Uuid::new_v4(),
            code: cmd.code,
            date: cmd.date,
            description: cmd.description,
            amount: non_negative(cmd.amount, "amount")?,
            status: cmd.status,
            bank: cmd.bank.trim().to_string(),
            cheque_number: cmd.cheque_number,
            supplier: cmd.supplier.trim().to_string(),
            creation_date: today(),
            currency: cmd.currency,
            created_at: now,
            updated_at: now,
        };
        let model: bank_pdc::ActiveModel = (&pdc).into();
        model.insert(&self.database).await?;
        tracing::debug!(id = %pdc.id, "cheque created");

        self.publish(pdc.id, ledger::cheque_transition(None, &pdc))
            .await?;
        Ok(pdc.id)
    }

    pub async fn update_bank_pdc(&self, id: Uuid, cmd: UpdateBankPdcCmd) -> ResultEngine<()> {
        let before = self.bank_pdc(id).await?;
        let mut pdc = before.clone();
        if let Some(code) = cmd.code {
            pdc.code = code;
        }
        if let Some(date) = cmd.date {
            pdc.date = date;
        }
        if let Some(description) = cmd.description {
            pdc.description = description;
        }
        if let Some(amount) = cmd.amount {
            pdc.amount = non_negative(amount, "amount")?;
        }
        if let Some(status) = cmd.status {
            pdc.status = status;
        }
        if let Some(bank) = cmd.bank {
            pdc.bank = bank.trim().to_string();
        }
        if let Some(cheque_number) = cmd.cheque_number {
            pdc.cheque_number = cheque_number;
        }
        if let Some(supplier) = cmd.supplier {
            pdc.supplier = supplier.trim().to_string();
        }
        if let Some(currency) = cmd.currency {
            pdc.currency = currency;
        }
        pdc.updated_at = Utc::now();

        let model: bank_pdc::ActiveModel = (&pdc).into();
        model.update(&self.database).await?;
        tracing::debug!(%id, "cheque updated");

        self.publish(id, ledger::cheque_transition(Some(&before), &pdc))
            .await
    }

    pub async fn delete_bank_pdc(&self, id: Uuid) -> ResultEngine<()> {
        self.delete_record::<bank_pdc::Entity>(id, "cheque").await
    }

    pub async fn bank_pdc_summary(
        &self,
        range: DateRange,
        target: Currency,
    ) -> ResultEngine<PdcSummary> {
        let cheques = self.bank_pdcs_in(range).await?;
        Ok(PdcSummary::build(&cheques, target))
    }

    pub async fn bank_pdc_by_bank(
        &self,
        range: DateRange,
        target: Currency,
    ) -> ResultEngine<Vec<BankTotal>> {
        let cheques = self.bank_pdcs_in(range).await?;
        Ok(pdc_by_bank(&cheques, target))
    }

    /// Pending cheques dated within `days` days of `today`.
    pub async fn upcoming_cheques(
        &self,
        days: i64,
        today: NaiveDate,
    ) -> ResultEngine<Vec<UpcomingCheque>> {
        let cheques = self.bank_pdcs().await?;
        Ok(upcoming_cheques(cheques, today, days))
    }

    pub async fn banks(&self) -> ResultEngine<Vec<String>> {
        let cheques = self.bank_pdcs().await?;
        Ok(distinct_sorted(cheques.iter().map(|c| c.bank.as_str())))
    }

    pub async fn suppliers(&self) -> ResultEngine<Vec<String>> {
        let cheques = self.bank_pdcs().await?;
        Ok(distinct_sorted(cheques.iter().map(|c| c.supplier.as_str())))
    }
}
