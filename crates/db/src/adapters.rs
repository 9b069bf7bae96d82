//! Business-event adapter boundary.
//!
//! Each adapter maps one committed business event onto a journal entry
//! recipe and posts it. Bookkeeping is an observer here: the business
//! record is already committed by the time an adapter runs, so a failed
//! posting is logged at error level and swallowed instead of failing
//! the caller. Manual entries and reversals are user-facing operations
//! and keep their typed errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::error;
use uuid::Uuid;

use vendra_core::ledger::{recipes, CashChannel, LineInput, ReferenceType, SalesChannel};

use crate::repositories::journal::{
    JournalEntryWithLines, JournalError, JournalRepository, PostEntryInput,
};

/// Context shared by every business event.
#[derive(Debug, Clone, Copy)]
pub struct EventContext {
    /// Tenant the event belongs to.
    pub organization_id: Uuid,
    /// Accounting date for the resulting entry.
    pub entry_date: NaiveDate,
    /// Id of the business record that produced the event.
    pub reference_id: Option<Uuid>,
    /// User who triggered the event, if known.
    pub actor_id: Option<Uuid>,
}

/// Adapter surface translating business events into journal entries.
#[derive(Debug, Clone)]
pub struct LedgerEvents {
    journal: JournalRepository,
}

impl LedgerEvents {
    /// Creates the adapter surface over a database connection.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            journal: JournalRepository::new(db),
        }
    }

    /// An order was posted (possibly partially paid, with a known cost).
    pub async fn order_posted(
        &self,
        ctx: EventContext,
        total: Decimal,
        paid: Decimal,
        cost: Decimal,
        paid_into: CashChannel,
    ) -> Option<JournalEntryWithLines> {
        let lines = recipes::sale(total, paid, cost, paid_into, SalesChannel::Orders);
        self.record(ctx, ReferenceType::Order, "Order posted", lines)
            .await
    }

    /// A direct (walk-in) sale was completed.
    pub async fn direct_sale_posted(
        &self,
        ctx: EventContext,
        total: Decimal,
        paid: Decimal,
        cost: Decimal,
        paid_into: CashChannel,
    ) -> Option<JournalEntryWithLines> {
        let lines = recipes::sale(total, paid, cost, paid_into, SalesChannel::Direct);
        self.record(ctx, ReferenceType::Sale, "Direct sale", lines)
            .await
    }

    /// A customer debt collection was recorded.
    pub async fn collection_recorded(
        &self,
        ctx: EventContext,
        amount: Decimal,
        collected_into: CashChannel,
    ) -> Option<JournalEntryWithLines> {
        let lines = recipes::collection(amount, collected_into);
        self.record(ctx, ReferenceType::Collection, "Collection received", lines)
            .await
    }

    /// An operating expense was approved and paid.
    pub async fn expense_approved(
        &self,
        ctx: EventContext,
        amount: Decimal,
    ) -> Option<JournalEntryWithLines> {
        let lines = recipes::expense(amount);
        self.record(ctx, ReferenceType::Expense, "Expense approved", lines)
            .await
    }

    /// A supplier invoice was recorded (payable up).
    pub async fn supplier_invoice_recorded(
        &self,
        ctx: EventContext,
        total: Decimal,
    ) -> Option<JournalEntryWithLines> {
        let lines = recipes::supplier_invoice(total);
        self.record(
            ctx,
            ReferenceType::SupplierInvoice,
            "Supplier invoice",
            lines,
        )
        .await
    }

    /// A supplier payment was made (payable down, cash out).
    pub async fn supplier_payment_recorded(
        &self,
        ctx: EventContext,
        amount: Decimal,
    ) -> Option<JournalEntryWithLines> {
        let lines = recipes::supplier_payment(amount);
        self.record(
            ctx,
            ReferenceType::SupplierPayment,
            "Supplier payment",
            lines,
        )
        .await
    }

    /// A payroll run was processed.
    pub async fn payroll_processed(
        &self,
        ctx: EventContext,
        amount: Decimal,
    ) -> Option<JournalEntryWithLines> {
        let lines = recipes::payroll(amount);
        self.record(ctx, ReferenceType::Payroll, "Payroll processed", lines)
            .await
    }

    /// A production batch was completed (raw material into finished goods).
    pub async fn production_completed(
        &self,
        ctx: EventContext,
        total_cost: Decimal,
    ) -> Option<JournalEntryWithLines> {
        let lines = recipes::production_completed(total_cost);
        self.record(
            ctx,
            ReferenceType::Production,
            "Production completed",
            lines,
        )
        .await
    }

    /// A customer return was processed and refunded.
    pub async fn return_processed(
        &self,
        ctx: EventContext,
        amount: Decimal,
    ) -> Option<JournalEntryWithLines> {
        let lines = recipes::customer_return(amount);
        self.record(ctx, ReferenceType::Return, "Customer return", lines)
            .await
    }

    /// A cash deposit was confirmed into a cash channel.
    pub async fn deposit_confirmed(
        &self,
        ctx: EventContext,
        amount: Decimal,
        target: CashChannel,
    ) -> Option<JournalEntryWithLines> {
        let lines = recipes::deposit(amount, target);
        self.record(ctx, ReferenceType::Deposit, "Deposit confirmed", lines)
            .await
    }

    /// A raw material purchase was recorded (possibly partially paid).
    pub async fn raw_material_purchased(
        &self,
        ctx: EventContext,
        total: Decimal,
        paid: Decimal,
    ) -> Option<JournalEntryWithLines> {
        let lines = recipes::raw_material_purchase(total, paid);
        self.record(
            ctx,
            ReferenceType::RawMaterialPurchase,
            "Raw material purchase",
            lines,
        )
        .await
    }

    /// Posts a manual journal entry.
    ///
    /// Unlike the event adapters this is a user-facing operation, so
    /// composition failures surface to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if composition or the database operation fails.
    pub async fn post_manual_entry(
        &self,
        ctx: EventContext,
        description: String,
        lines: Vec<LineInput>,
    ) -> Result<JournalEntryWithLines, JournalError> {
        self.journal
            .post(PostEntryInput {
                organization_id: ctx.organization_id,
                entry_date: ctx.entry_date,
                description,
                reference_type: ReferenceType::Manual,
                reference_id: ctx.reference_id,
                lines,
                created_by: ctx.actor_id,
            })
            .await
    }

    /// Reverses a posted entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is missing, already reversed, or
    /// the database operation fails.
    pub async fn reverse_entry(
        &self,
        ctx: EventContext,
        entry_id: Uuid,
    ) -> Result<JournalEntryWithLines, JournalError> {
        self.journal
            .reverse(ctx.organization_id, entry_id, ctx.entry_date, ctx.actor_id)
            .await
    }

    /// Posts an event-sourced entry, logging failures instead of
    /// propagating them.
    async fn record(
        &self,
        ctx: EventContext,
        reference_type: ReferenceType,
        description: &str,
        lines: Vec<LineInput>,
    ) -> Option<JournalEntryWithLines> {
        let result = self
            .journal
            .post(PostEntryInput {
                organization_id: ctx.organization_id,
                entry_date: ctx.entry_date,
                description: description.to_string(),
                reference_type,
                reference_id: ctx.reference_id,
                lines,
                created_by: ctx.actor_id,
            })
            .await;

        match result {
            Ok(posted) => Some(posted),
            Err(err) => {
                error!(
                    organization_id = %ctx.organization_id,
                    reference_type = reference_type.as_str(),
                    reference_id = ?ctx.reference_id,
                    error = %err,
                    "Failed to record journal entry for business event"
                );
                None
            }
        }
    }
}
