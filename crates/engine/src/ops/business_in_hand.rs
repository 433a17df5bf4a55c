use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    BusinessInHand, Currency, ResultEngine, business_in_hand,
    commands::{CreateBusinessInHandCmd, UpdateBusinessInHandCmd},
    ledger,
    summary::{
        DatedPipelineItem, PipelineSummary, PipelineTypeTotal, overdue_pipeline, pipeline_by_type,
        upcoming_pipeline,
    },
    util::non_negative,
};

use super::{Engine, collect, today};

impl Engine {
    /// The whole pipeline, earliest expected date first.
    pub async fn business_in_hand(&self) -> ResultEngine<Vec<BusinessInHand>> {
        let models = business_in_hand::Entity::find()
            .order_by_asc(business_in_hand::Column::ExpectedDate)
            .order_by_asc(business_in_hand::Column::Id)
            .all(&self.database)
            .await?;
        collect(models)
    }

    pub async fn business_in_hand_item(&self, id: Uuid) -> ResultEngine<BusinessInHand> {
        BusinessInHand::try_from(
            self.require::<business_in_hand::Entity>(id, "business in hand")
                .await?,
        )
    }

    /// Record a pipeline item. Items created as received book nothing.
    pub async fn create_business_in_hand(
        &self,
        cmd: CreateBusinessInHandCmd,
    ) -> ResultEngine<Uuid> {
        let now = Utc::now();
        let item = BusinessInHand {
            id: Uuid::new_v4(),
            kind: cmd.kind,
            description: cmd.description,
            amount: non_negative(cmd.amount, "amount")?,
            expected_date: cmd.expected_date,
            status: cmd.status,
            currency: cmd.currency,
            created_at: now,
            updated_at: now,
        };
        let model: business_in_hand::ActiveModel = (&item).into();
        model.insert(&self.database).await?;
        tracing::debug!(id = %item.id, "business in hand created");
        Ok(item.id)
    }

    /// Patch a pipeline item. Moving it to received books the inflow today.
    pub async fn update_business_in_hand(
        &self,
        id: Uuid,
        cmd: UpdateBusinessInHandCmd,
    ) -> ResultEngine<()> {
        let before = self.business_in_hand_item(id).await?;
        let mut item = before.clone();
        if let Some(kind) = cmd.kind {
            item.kind = kind;
        }
        if let Some(description) = cmd.description {
            item.description = description;
        }
        if let Some(amount) = cmd.amount {
            item.amount = non_negative(amount, "amount")?;
        }
        if let Some(expected_date) = cmd.expected_date {
            item.expected_date = expected_date;
        }
        if let Some(status) = cmd.status {
            item.status = status;
        }
        if let Some(currency) = cmd.currency {
            item.currency = currency;
        }
        item.updated_at = Utc::now();

        let model: business_in_hand::ActiveModel = (&item).into();
        model.update(&self.database).await?;
        tracing::debug!(%id, "business in hand updated");

        self.publish(
            id,
            ledger::pipeline_transition(Some(&before), &item, today()),
        )
        .await
    }

    pub async fn delete_business_in_hand(&self, id: Uuid) -> ResultEngine<()> {
        self.delete_record::<business_in_hand::Entity>(id, "business in hand")
            .await
    }

    pub async fn business_in_hand_summary(
        &self,
        target: Currency,
    ) -> ResultEngine<PipelineSummary> {
        let items = self.business_in_hand().await?;
        Ok(PipelineSummary::build(&items, target))
    }

    pub async fn business_in_hand_by_type(
        &self,
        target: Currency,
    ) -> ResultEngine<Vec<PipelineTypeTotal>> {
        let items = self.business_in_hand().await?;
        Ok(pipeline_by_type(&items, target))
    }

    /// Open items expected within `days` days of `today`.
    pub async fn upcoming_business(
        &self,
        days: i64,
        today: NaiveDate,
    ) -> ResultEngine<Vec<DatedPipelineItem>> {
        let items = self.business_in_hand().await?;
        Ok(upcoming_pipeline(items, today, days))
    }

    /// Open items past their expected date, most overdue first.
    pub async fn overdue_business(&self, today: NaiveDate) -> ResultEngine<Vec<DatedPipelineItem>> {
        let items = self.business_in_hand().await?;
        Ok(overdue_pipeline(items, today))
    }
}
