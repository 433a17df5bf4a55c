use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    Currency, FutureNeed, MonthRange, ResultEngine, YearMonth,
    commands::{CreateFutureNeedCmd, UpdateFutureNeedCmd},
    future_needs,
    summary::{FutureNeedSummary, MonthlyNeeds, UpcomingNeed, needs_by_month, upcoming_needs},
    util::non_negative,
};

use super::{Engine, collect, normalize_optional_text, within_months};

impl Engine {
    /// All planned needs, earliest month first.
    pub async fn future_needs(&self) -> ResultEngine<Vec<FutureNeed>> {
        self.future_needs_in(MonthRange::default()).await
    }

    pub(crate) async fn future_needs_in(&self, range: MonthRange) -> ResultEngine<Vec<FutureNeed>> {
        let models = within_months(
            future_needs::Entity::find(),
            future_needs::Column::Month,
            range,
        )
        .order_by_asc(future_needs::Column::Month)
        .order_by_asc(future_needs::Column::CreatedAt)
        .order_by_asc(future_needs::Column::Id)
        .all(&self.database)
        .await?;
        collect(models)
    }

    pub async fn future_need(&self, id: Uuid) -> ResultEngine<FutureNeed> {
        FutureNeed::try_from(
            self.require::<future_needs::Entity>(id, "future need")
                .await?,
        )
    }

    pub async fn create_future_need(&self, cmd: CreateFutureNeedCmd) -> ResultEngine<Uuid> {
        let now = Utc::now();
        let need = FutureNeed {
            id: Uuid::new_v4(),
            month: cmd.month,
            description: cmd.description,
            quantity: non_negative(cmd.quantity, "quantity")?,
            amount: non_negative(cmd.amount, "amount")?,
            status: cmd.status,
            currency: cmd.currency,
            remarks: normalize_optional_text(cmd.remarks),
            created_at: now,
            updated_at: now,
        };
        let model: future_needs::ActiveModel = (&need).into();
        model.insert(&self.database).await?;
        tracing::debug!(id = %need.id, "future need created");
        Ok(need.id)
    }

    pub async fn update_future_need(
        &self,
        id: Uuid,
        cmd: UpdateFutureNeedCmd,
    ) -> ResultEngine<()> {
        let mut need = self.future_need(id).await?;
        if let Some(month) = cmd.month {
            need.month = month;
        }
        if let Some(description) = cmd.description {
            need.description = description;
        }
        if let Some(quantity) = cmd.quantity {
            need.quantity = non_negative(quantity, "quantity")?;
        }
        if let Some(amount) = cmd.amount {
            need.amount = non_negative(amount, "amount")?;
        }
        if let Some(status) = cmd.status {
            need.status = status;
        }
        if let Some(currency) = cmd.currency {
            need.currency = currency;
        }
        if cmd.remarks.is_some() {
            need.remarks = normalize_optional_text(cmd.remarks);
        }
        need.updated_at = Utc::now();

        let model: future_needs::ActiveModel = (&need).into();
        model.update(&self.database).await?;
        tracing::debug!(%id, "future need updated");
        Ok(())
    }

    pub async fn delete_future_need(&self, id: Uuid) -> ResultEngine<()> {
        self.delete_record::<future_needs::Entity>(id, "future need")
            .await
    }

    pub async fn future_needs_summary(
        &self,
        range: MonthRange,
        target: Currency,
    ) -> ResultEngine<FutureNeedSummary> {
        let needs = self.future_needs_in(range).await?;
        Ok(FutureNeedSummary::build(&needs, target))
    }

    pub async fn future_needs_by_month(
        &self,
        range: MonthRange,
        target: Currency,
    ) -> ResultEngine<Vec<MonthlyNeeds>> {
        let needs = self.future_needs_in(range).await?;
        Ok(needs_by_month(&needs, target))
    }

    /// Needs planned from `current` up to `months` months ahead.
    pub async fn upcoming_needs(
        &self,
        months: i32,
        current: YearMonth,
    ) -> ResultEngine<Vec<UpcomingNeed>> {
        let needs = self.future_needs().await?;
        Ok(upcoming_needs(needs, current, months))
    }
}
