use chrono::NaiveDate;

use crate::{
    Currency, ResultEngine,
    export::{self, ExportModule, ExportSheet},
};

use super::Engine;

impl Engine {
    /// Build the export sheet of `module` with every amount in `target`.
    pub async fn export(
        &self,
        module: ExportModule,
        target: Currency,
        today: NaiveDate,
    ) -> ResultEngine<ExportSheet> {
        let sheet = match module {
            ExportModule::Sales => export::sales_sheet(&self.sales().await?, target),
            ExportModule::Expenses => export::expenses_sheet(&self.expenses().await?, target),
            ExportModule::Liabilities => {
                export::liabilities_sheet(&self.liabilities().await?, target, today)
            }
            ExportModule::Salaries => export::salaries_sheet(&self.salaries().await?, target),
            ExportModule::BankPdc => export::bank_pdc_sheet(&self.bank_pdcs().await?, target),
            ExportModule::FutureNeeds => {
                export::future_needs_sheet(&self.future_needs().await?, target)
            }
            ExportModule::BusinessInHand => {
                export::business_in_hand_sheet(&self.business_in_hand().await?, target)
            }
            ExportModule::Cashflow => export::cashflow_sheet(&self.cashflow().await?, target),
        };
        tracing::debug!(module = %module, rows = sheet.rows.len(), "export sheet built");
        Ok(sheet)
    }
}
