//! Journal repository: the posting and reversal engines.
//!
//! All writes for one entry happen inside a single database transaction:
//! default-chart bootstrap, account row locks, composition, sequence
//! allocation, entry/line inserts, and balance updates commit or roll
//! back together. Account and sequence rows are read under `FOR UPDATE`
//! so concurrent postings against the same tenant serialize instead of
//! double-spending balances or entry numbers.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use vendra_core::ledger::{
    format_entry_number, AccountSnapshot, ComposedEntry, LedgerError, LedgerService, LineInput,
    ReferenceType,
};

use crate::entities::{
    chart_of_accounts, journal_entries, journal_entry_lines, journal_sequences,
    sea_orm_active_enums,
};

use super::account::ensure_defaults;

/// Error types for journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// The entry failed composition (unbalanced, bad account, etc.).
    #[error(transparent)]
    Rejected(#[from] LedgerError),

    /// No entry with this id in the tenant's journal.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(Uuid),

    /// The entry has already been reversed.
    #[error("Journal entry {0} is already reversed")]
    AlreadyReversed(Uuid),

    /// The tenant's sequence row vanished between insert and locked read.
    #[error("Journal sequence missing for organization {0}")]
    SequenceCorrupted(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for posting a journal entry.
#[derive(Debug, Clone)]
pub struct PostEntryInput {
    /// Tenant to post into.
    pub organization_id: Uuid,
    /// Accounting date of the entry.
    pub entry_date: NaiveDate,
    /// Human-readable description.
    pub description: String,
    /// Which business event produced this entry.
    pub reference_type: ReferenceType,
    /// Id of the producing business record, if any.
    pub reference_id: Option<Uuid>,
    /// Requested lines, addressed by account code.
    pub lines: Vec<LineInput>,
    /// User who triggered the posting, if known.
    pub created_by: Option<Uuid>,
}

/// A posted entry together with its lines.
#[derive(Debug, Clone)]
pub struct JournalEntryWithLines {
    /// The entry header.
    pub entry: journal_entries::Model,
    /// The entry's lines.
    pub lines: Vec<journal_entry_lines::Model>,
}

/// Filter options for listing journal entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Filter by producing event type.
    pub reference_type: Option<ReferenceType>,
    /// Filter by producing business record.
    pub reference_id: Option<Uuid>,
    /// Filter by reversal status.
    pub is_reversed: Option<bool>,
    /// Earliest entry date, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Latest entry date, inclusive.
    pub date_to: Option<NaiveDate>,
}

/// Journal repository for posting, reversing, and reading entries.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts a balanced journal entry and applies its balance deltas.
    ///
    /// Runs the full pipeline in one transaction: seeds the default
    /// chart on the tenant's first posting, locks the referenced account
    /// rows, composes and validates the lines, allocates the next entry
    /// number, inserts the entry and lines, and moves account balances.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Rejected`] when composition fails (the
    /// transaction is rolled back and nothing is written), or a database
    /// error if any statement fails.
    pub async fn post(&self, input: PostEntryInput) -> Result<JournalEntryWithLines, JournalError> {
        let txn = self.db.begin().await.map_err(JournalError::Database)?;

        let posted = match post_in_txn(&txn, input, false).await {
            Ok(posted) => posted,
            Err(err) => {
                txn.rollback().await.map_err(JournalError::Database)?;
                return Err(err);
            }
        };

        txn.commit().await.map_err(JournalError::Database)?;
        Ok(posted)
    }

    /// Reverses a posted entry with a mirror entry.
    ///
    /// The mirror swaps debit and credit on every line of the original,
    /// so posting it returns every touched balance to its prior value.
    /// The original is marked reversed and linked to the mirror in the
    /// same transaction. An entry can be reversed at most once; the
    /// mirror itself is an ordinary entry and can be reversed in turn.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::EntryNotFound`] if the entry is not in
    /// the tenant's journal, [`JournalError::AlreadyReversed`] if it was
    /// reversed before, or a database error.
    pub async fn reverse(
        &self,
        organization_id: Uuid,
        entry_id: Uuid,
        entry_date: NaiveDate,
        created_by: Option<Uuid>,
    ) -> Result<JournalEntryWithLines, JournalError> {
        let txn = self.db.begin().await.map_err(JournalError::Database)?;

        let posted =
            match reverse_in_txn(&txn, organization_id, entry_id, entry_date, created_by).await {
                Ok(posted) => posted,
                Err(err) => {
                    txn.rollback().await.map_err(JournalError::Database)?;
                    return Err(err);
                }
            };

        txn.commit().await.map_err(JournalError::Database)?;
        Ok(posted)
    }

    /// Loads an entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_with_lines(
        &self,
        organization_id: Uuid,
        entry_id: Uuid,
    ) -> Result<Option<JournalEntryWithLines>, JournalError> {
        let entry = journal_entries::Entity::find_by_id(entry_id)
            .filter(journal_entries::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await?;

        let Some(entry) = entry else {
            return Ok(None);
        };

        let lines = journal_entry_lines::Entity::find()
            .filter(journal_entry_lines::Column::EntryId.eq(entry.id))
            .order_by_asc(journal_entry_lines::Column::CreatedAt)
            .order_by_asc(journal_entry_lines::Column::Id)
            .all(&self.db)
            .await?;

        Ok(Some(JournalEntryWithLines { entry, lines }))
    }

    /// Lists a tenant's entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        organization_id: Uuid,
        filter: EntryFilter,
    ) -> Result<Vec<journal_entries::Model>, JournalError> {
        let mut query = journal_entries::Entity::find()
            .filter(journal_entries::Column::OrganizationId.eq(organization_id));

        if let Some(reference_type) = filter.reference_type {
            let reference_type: sea_orm_active_enums::ReferenceType = reference_type.into();
            query = query.filter(journal_entries::Column::ReferenceType.eq(reference_type));
        }
        if let Some(reference_id) = filter.reference_id {
            query = query.filter(journal_entries::Column::ReferenceId.eq(reference_id));
        }
        if let Some(is_reversed) = filter.is_reversed {
            query = query.filter(journal_entries::Column::IsReversed.eq(is_reversed));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(journal_entries::Column::EntryDate.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(journal_entries::Column::EntryDate.lte(date_to));
        }

        // Entry numbers are zero-padded strings and stop sorting numerically
        // past JE-99999, so recency ordering goes by timestamp.
        let entries = query
            .order_by_desc(journal_entries::Column::CreatedAt)
            .order_by_desc(journal_entries::Column::EntryNumber)
            .all(&self.db)
            .await?;
        Ok(entries)
    }
}

/// Posts an entry inside an already-open transaction.
///
/// The reversal engine shares this path so mirrors go through the exact
/// same validation and numbering as any other entry, except that mirrors
/// set `allow_inactive`: an account deactivated after the original posted
/// must not strand that entry as irreversible.
pub(crate) async fn post_in_txn(
    txn: &DatabaseTransaction,
    input: PostEntryInput,
    allow_inactive: bool,
) -> Result<JournalEntryWithLines, JournalError> {
    ensure_defaults(txn, input.organization_id).await?;

    let accounts = lock_accounts(txn, input.organization_id, &input.lines).await?;
    let by_code: HashMap<&str, &chart_of_accounts::Model> = accounts
        .iter()
        .map(|account| (account.code.as_str(), account))
        .collect();

    let composed = LedgerService::compose(&input.lines, |code| {
        by_code
            .get(code)
            .map(|account| snapshot_of(account, allow_inactive))
    })?;

    let entry_number = next_entry_number(txn, input.organization_id).await?;
    let now = Utc::now().into();

    let entry = journal_entries::ActiveModel {
        id: Set(Uuid::new_v4()),
        organization_id: Set(input.organization_id),
        entry_number: Set(entry_number),
        entry_date: Set(input.entry_date),
        description: Set(input.description),
        reference_type: Set(input.reference_type.into()),
        reference_id: Set(input.reference_id),
        total_debit: Set(composed.totals.debit),
        total_credit: Set(composed.totals.credit),
        is_posted: Set(true),
        is_reversed: Set(false),
        reversed_by_id: Set(None),
        created_by: Set(input.created_by),
        created_at: Set(now),
    }
    .insert(txn)
    .await?;

    let mut lines = Vec::with_capacity(composed.lines.len());
    for line in &composed.lines {
        let model = journal_entry_lines::Model {
            id: Uuid::new_v4(),
            entry_id: entry.id,
            account_id: line.account_id,
            debit: line.debit,
            credit: line.credit,
            memo: line.memo.clone(),
            created_at: now,
        };
        lines.push(model);
    }

    journal_entry_lines::Entity::insert_many(lines.iter().map(|line| {
        journal_entry_lines::ActiveModel {
            id: Set(line.id),
            entry_id: Set(line.entry_id),
            account_id: Set(line.account_id),
            debit: Set(line.debit),
            credit: Set(line.credit),
            memo: Set(line.memo.clone()),
            created_at: Set(line.created_at),
        }
    }))
    .exec_without_returning(txn)
    .await?;

    apply_deltas(txn, &accounts, &composed).await?;

    Ok(JournalEntryWithLines { entry, lines })
}

async fn reverse_in_txn(
    txn: &DatabaseTransaction,
    organization_id: Uuid,
    entry_id: Uuid,
    entry_date: NaiveDate,
    created_by: Option<Uuid>,
) -> Result<JournalEntryWithLines, JournalError> {
    let original = journal_entries::Entity::find_by_id(entry_id)
        .filter(journal_entries::Column::OrganizationId.eq(organization_id))
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or(JournalError::EntryNotFound(entry_id))?;

    if original.is_reversed {
        return Err(JournalError::AlreadyReversed(entry_id));
    }

    let original_lines = journal_entry_lines::Entity::find()
        .filter(journal_entry_lines::Column::EntryId.eq(original.id))
        .order_by_asc(journal_entry_lines::Column::Id)
        .all(txn)
        .await?;

    let account_ids: Vec<Uuid> = original_lines.iter().map(|line| line.account_id).collect();
    let codes: HashMap<Uuid, String> = chart_of_accounts::Entity::find()
        .filter(chart_of_accounts::Column::OrganizationId.eq(organization_id))
        .filter(chart_of_accounts::Column::Id.is_in(account_ids))
        .all(txn)
        .await?
        .into_iter()
        .map(|account| (account.id, account.code))
        .collect();

    let mirror_lines = mirror_of(&original_lines, &codes)?;

    let mirror = post_in_txn(
        txn,
        PostEntryInput {
            organization_id,
            entry_date,
            description: format!("Reversal of {}", original.entry_number),
            reference_type: ReferenceType::Reversal,
            reference_id: Some(original.id),
            lines: mirror_lines,
            created_by,
        },
        true,
    )
    .await?;

    journal_entries::ActiveModel {
        id: Set(original.id),
        is_reversed: Set(true),
        reversed_by_id: Set(Some(mirror.entry.id)),
        ..Default::default()
    }
    .update(txn)
    .await?;

    Ok(mirror)
}

/// Builds the composer's view of a locked account row.
///
/// With `allow_inactive` set (the reversal path), a deactivated account
/// still composes: the mirror must go through so balances can unwind.
fn snapshot_of(account: &chart_of_accounts::Model, allow_inactive: bool) -> AccountSnapshot {
    AccountSnapshot {
        id: account.id,
        account_type: account.account_type.into(),
        is_active: account.is_active || allow_inactive,
    }
}

/// Builds the mirror line inputs for a set of persisted lines.
fn mirror_of(
    lines: &[journal_entry_lines::Model],
    codes: &HashMap<Uuid, String>,
) -> Result<Vec<LineInput>, JournalError> {
    let mut source = Vec::with_capacity(lines.len());
    for line in lines {
        let code = codes
            .get(&line.account_id)
            .ok_or_else(|| DbErr::RecordNotFound(format!("account {} for line", line.account_id)))?;
        source.push((code.as_str(), line.debit, line.credit, line.memo.as_deref()));
    }
    Ok(LedgerService::reversal_lines(source))
}

/// Loads the referenced account rows under `FOR UPDATE`.
///
/// Rows are selected in code order so concurrent postings acquire locks
/// in a consistent order.
async fn lock_accounts(
    txn: &DatabaseTransaction,
    organization_id: Uuid,
    lines: &[LineInput],
) -> Result<Vec<chart_of_accounts::Model>, JournalError> {
    let mut codes: Vec<&str> = lines
        .iter()
        .filter(|line| !line.is_noop())
        .map(|line| line.account_code.as_str())
        .collect();
    codes.sort_unstable();
    codes.dedup();

    let accounts = chart_of_accounts::Entity::find()
        .filter(chart_of_accounts::Column::OrganizationId.eq(organization_id))
        .filter(chart_of_accounts::Column::Code.is_in(codes))
        .order_by_asc(chart_of_accounts::Column::Code)
        .lock_exclusive()
        .all(txn)
        .await?;
    Ok(accounts)
}

/// Allocates the tenant's next entry number under `FOR UPDATE`.
///
/// The counter row is created on first use with a conflict-ignoring
/// insert, so concurrent first postings both land on the locked read.
async fn next_entry_number(
    txn: &DatabaseTransaction,
    organization_id: Uuid,
) -> Result<String, JournalError> {
    let now = Utc::now().into();

    journal_sequences::Entity::insert(journal_sequences::ActiveModel {
        organization_id: Set(organization_id),
        next_value: Set(1),
        updated_at: Set(now),
    })
    .on_conflict(
        OnConflict::column(journal_sequences::Column::OrganizationId)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(txn)
    .await?;

    let sequence = journal_sequences::Entity::find_by_id(organization_id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or(JournalError::SequenceCorrupted(organization_id))?;

    let entry_number = format_entry_number(sequence.next_value);

    journal_sequences::ActiveModel {
        organization_id: Set(organization_id),
        next_value: Set(sequence.next_value + 1),
        updated_at: Set(now),
    }
    .update(txn)
    .await?;

    Ok(entry_number)
}

/// Applies the composed per-account balance deltas to the locked rows.
async fn apply_deltas(
    txn: &DatabaseTransaction,
    accounts: &[chart_of_accounts::Model],
    composed: &ComposedEntry,
) -> Result<(), JournalError> {
    let now = Utc::now().into();
    for account in accounts {
        let Some(delta) = composed.deltas.get(&account.id) else {
            continue;
        };
        if delta.is_zero() {
            continue;
        }
        chart_of_accounts::ActiveModel {
            id: Set(account.id),
            balance: Set(account.balance + *delta),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(txn)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(account_id: Uuid, debit: Decimal, credit: Decimal) -> journal_entry_lines::Model {
        journal_entry_lines::Model {
            id: Uuid::new_v4(),
            entry_id: Uuid::new_v4(),
            account_id,
            debit,
            credit,
            memo: Some("Sale".to_string()),
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_mirror_swaps_sides_and_prefixes_memo() {
        let cash = Uuid::new_v4();
        let revenue = Uuid::new_v4();
        let codes: HashMap<Uuid, String> = [
            (cash, "1000".to_string()),
            (revenue, "4000".to_string()),
        ]
        .into();

        let lines = vec![
            line(cash, dec!(100), Decimal::ZERO),
            line(revenue, Decimal::ZERO, dec!(100)),
        ];

        let mirror = mirror_of(&lines, &codes).unwrap();
        assert_eq!(mirror.len(), 2);
        assert_eq!(mirror[0].account_code, "1000");
        assert_eq!(mirror[0].debit, Decimal::ZERO);
        assert_eq!(mirror[0].credit, dec!(100));
        assert_eq!(mirror[1].account_code, "4000");
        assert_eq!(mirror[1].debit, dec!(100));
        assert_eq!(mirror[1].memo.as_deref(), Some("Reverse: Sale"));
    }

    #[test]
    fn test_mirror_fails_on_unknown_account() {
        let lines = vec![line(Uuid::new_v4(), dec!(50), Decimal::ZERO)];
        let result = mirror_of(&lines, &HashMap::new());
        assert!(matches!(result, Err(JournalError::Database(_))));
    }

    fn account(code: &str, account_type: sea_orm_active_enums::AccountType, is_active: bool) -> chart_of_accounts::Model {
        let now = Utc::now().into();
        chart_of_accounts::Model {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            code: code.to_string(),
            name: code.to_string(),
            account_type,
            category: None,
            parent_id: None,
            is_system: false,
            is_active,
            balance: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_mirror_composes_over_deactivated_account() {
        let cash = account("1000", sea_orm_active_enums::AccountType::Asset, true);
        let expense = account("5500", sea_orm_active_enums::AccountType::Expense, false);
        let accounts = vec![cash, expense];

        let mirror = LedgerService::reversal_lines([
            ("5500", dec!(75), Decimal::ZERO, None),
            ("1000", Decimal::ZERO, dec!(75), None),
        ]);

        // A fresh posting against the deactivated account is refused.
        let strict = LedgerService::compose(&mirror, |code| {
            accounts
                .iter()
                .find(|a| a.code == code)
                .map(|a| snapshot_of(a, false))
        });
        assert!(matches!(
            strict,
            Err(LedgerError::AccountInactive(ref code)) if code == "5500"
        ));

        // The reversal gate lets the mirror through so balances unwind.
        let relaxed = LedgerService::compose(&mirror, |code| {
            accounts
                .iter()
                .find(|a| a.code == code)
                .map(|a| snapshot_of(a, true))
        })
        .unwrap();
        assert_eq!(relaxed.totals.debit, dec!(75));
        assert_eq!(relaxed.totals.credit, dec!(75));
    }

    #[test]
    fn test_composition_failure_maps_to_rejected() {
        let err = JournalError::from(LedgerError::EmptyEntry);
        assert!(matches!(err, JournalError::Rejected(LedgerError::EmptyEntry)));
        assert_eq!(err.to_string(), LedgerError::EmptyEntry.to_string());
    }
}
