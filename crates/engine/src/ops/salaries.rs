use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    Currency, MonthRange, ResultEngine, Salary, YearMonth,
    commands::{CreateSalaryCmd, UpdateSalaryCmd},
    ledger, salaries,
    summary::{Employee, MonthlySalaries, SalarySummary, employees, salaries_by_month},
    util::non_negative,
};

use super::{Engine, collect, within_months};

impl Engine {
    /// All salaries, latest month first.
    pub async fn salaries(&self) -> ResultEngine<Vec<Salary>> {
        self.salaries_in(MonthRange::default()).await
    }

    pub(crate) async fn salaries_in(&self, range: MonthRange) -> ResultEngine<Vec<Salary>> {
        let models = within_months(salaries::Entity::find(), salaries::Column::Month, range)
            .order_by_desc(salaries::Column::Month)
            .order_by_asc(salaries::Column::EmployeeName)
            .order_by_asc(salaries::Column::Id)
            .all(&self.database)
            .await?;
        collect(models)
    }

    pub async fn salary(&self, id: Uuid) -> ResultEngine<Salary> {
        Salary::try_from(self.require::<salaries::Entity>(id, "salary").await?)
    }

    /// Record a salary. A salary created paid with a payment date is paid
    /// out immediately.
    pub async fn create_salary(&self, cmd: CreateSalaryCmd) -> ResultEngine<Uuid> {
        let now = Utc::now();
        let salary = Salary {
            id: Uuid::new_v4(),
            employee_name: cmd.employee_name.trim().to_string(),
            role: cmd.role,
            net_salary: non_negative(cmd.net_salary, "net_salary")?,
            payment_status: cmd.payment_status,
            payment_date: cmd.payment_date,
            month: cmd.month,
            currency: cmd.currency,
            created_at: now,
            updated_at: now,
        };
        let model: salaries::ActiveModel = (&salary).into();
        model.insert(&self.database).await?;
        tracing::debug!(id = %salary.id, "salary created");

        self.publish(salary.id, ledger::salary_transition(None, &salary))
            .await?;
        Ok(salary.id)
    }

    /// Patch a salary. Only the pending to paid transition reaches the
    /// ledger; saving an already paid salary again does not. Reverting to
    /// pending clears the payment date.
    pub async fn update_salary(&self, id: Uuid, cmd: UpdateSalaryCmd) -> ResultEngine<()> {
        let before = self.salary(id).await?;
        let mut salary = before.clone();
        if let Some(name) = cmd.employee_name {
            salary.employee_name = name.trim().to_string();
        }
        if let Some(role) = cmd.role {
            salary.role = role;
        }
        if let Some(net_salary) = cmd.net_salary {
            salary.net_salary = non_negative(net_salary, "net_salary")?;
        }
        if let Some(status) = cmd.payment_status {
            salary.payment_status = status;
        }
        if let Some(payment_date) = cmd.payment_date {
            salary.payment_date = Some(payment_date);
        }
        // A salary moved back to pending has not been paid on any date.
        if !salary.is_paid() && before.is_paid() {
            salary.payment_date = None;
        }
        if let Some(month) = cmd.month {
            salary.month = month;
        }
        if let Some(currency) = cmd.currency {
            salary.currency = currency;
        }
        salary.updated_at = Utc::now();

        let model: salaries::ActiveModel = (&salary).into();
        model.update(&self.database).await?;
        tracing::debug!(%id, "salary updated");

        self.publish(id, ledger::salary_transition(Some(&before), &salary))
            .await
    }

    pub async fn delete_salary(&self, id: Uuid) -> ResultEngine<()> {
        self.delete_record::<salaries::Entity>(id, "salary").await
    }

    /// Totals for one month, or for every month when `month` is `None`.
    pub async fn salary_summary(
        &self,
        month: Option<YearMonth>,
        target: Currency,
    ) -> ResultEngine<SalarySummary> {
        let range = month.map(MonthRange::single).unwrap_or_default();
        let salaries = self.salaries_in(range).await?;
        Ok(SalarySummary::build(&salaries, target))
    }

    /// One summary per month in `range`, oldest first.
    pub async fn salaries_by_month(
        &self,
        range: MonthRange,
        target: Currency,
    ) -> ResultEngine<Vec<MonthlySalaries>> {
        let salaries = self.salaries_in(range).await?;
        Ok(salaries_by_month(&salaries, target))
    }

    /// Distinct employees with their latest role.
    pub async fn employees(&self) -> ResultEngine<Vec<Employee>> {
        let salaries = self.salaries().await?;
        Ok(employees(&salaries))
    }
}
