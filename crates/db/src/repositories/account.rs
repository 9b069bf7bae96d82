//! Account repository for chart of accounts database operations.
//!
//! Covers the tenant bootstrap (default chart seeding), the code-scoped
//! resolver the posting engine uses, account management, and the trial
//! balance read.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use vendra_core::ledger::DEFAULT_CHART;

use crate::entities::{chart_of_accounts, sea_orm_active_enums::AccountType};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account code already exists in the tenant's chart.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// System accounts cannot be deactivated or deleted.
    #[error("Account '{0}' is a system account")]
    SystemAccount(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a tenant-defined account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Tenant owning the account.
    pub organization_id: Uuid,
    /// Account code (unique within the tenant).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Optional category label.
    pub category: Option<String>,
    /// Optional parent for hierarchical charts.
    pub parent_id: Option<Uuid>,
}

/// Filter options for listing accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Filter by account type.
    pub account_type: Option<AccountType>,
    /// Filter by active status.
    pub is_active: Option<bool>,
}

/// One account's position in a trial balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialBalanceRow {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Balance shown in the debit column (debit-normal accounts).
    pub debit: Decimal,
    /// Balance shown in the credit column (credit-normal accounts).
    pub credit: Decimal,
}

/// A trial balance over a tenant's chart.
#[derive(Debug, Clone)]
pub struct TrialBalance {
    /// Per-account rows in code order.
    pub rows: Vec<TrialBalanceRow>,
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
}

impl TrialBalance {
    /// Whether the ledger reconciles (debit column equals credit column).
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }
}

/// Account repository for chart-of-accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Seeds the default chart for a tenant if it owns no accounts yet.
    ///
    /// Safe to call on every posting attempt: a tenant with any accounts
    /// is left untouched, and the per-tenant unique code index backstops
    /// the check-then-create under concurrent first postings.
    ///
    /// Returns the number of accounts inserted (zero on the no-op path).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn ensure_default_accounts(
        &self,
        organization_id: Uuid,
    ) -> Result<u64, AccountError> {
        Ok(ensure_defaults(&self.db, organization_id).await?)
    }

    /// Resolves an account by code within the tenant's chart.
    ///
    /// Pure lookup; never creates.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_code(
        &self,
        organization_id: Uuid,
        code: &str,
    ) -> Result<Option<chart_of_accounts::Model>, AccountError> {
        let account = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::OrganizationId.eq(organization_id))
            .filter(chart_of_accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(account)
    }

    /// Creates a tenant-defined (non-system) account.
    ///
    /// # Errors
    ///
    /// Returns an error if the code already exists in the tenant's chart
    /// or the database operation fails.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<chart_of_accounts::Model, AccountError> {
        let existing = self
            .find_by_code(input.organization_id, &input.code)
            .await?;
        if existing.is_some() {
            return Err(AccountError::DuplicateCode(input.code));
        }

        let now = Utc::now().into();
        let account = chart_of_accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(input.organization_id),
            code: Set(input.code),
            name: Set(input.name),
            account_type: Set(input.account_type),
            category: Set(input.category),
            parent_id: Set(input.parent_id),
            is_system: Set(false),
            is_active: Set(true),
            balance: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(account.insert(&self.db).await?)
    }

    /// Deactivates a tenant-defined account.
    ///
    /// Seeded system accounts cannot be deactivated; tenant accounts stop
    /// accepting postings once inactive (the composer rejects them).
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist, is a system
    /// account, or the database operation fails.
    pub async fn deactivate_account(
        &self,
        organization_id: Uuid,
        code: &str,
    ) -> Result<chart_of_accounts::Model, AccountError> {
        let account = self
            .find_by_code(organization_id, code)
            .await?
            .ok_or_else(|| AccountError::AccountNotFound(code.to_string()))?;
        if account.is_system {
            return Err(AccountError::SystemAccount(account.code));
        }

        let update = chart_of_accounts::ActiveModel {
            id: Set(account.id),
            is_active: Set(false),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        Ok(update.update(&self.db).await?)
    }

    /// Lists a tenant's accounts in code order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(
        &self,
        organization_id: Uuid,
        filter: AccountFilter,
    ) -> Result<Vec<chart_of_accounts::Model>, AccountError> {
        let mut query = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::OrganizationId.eq(organization_id));

        if let Some(account_type) = filter.account_type {
            query = query.filter(chart_of_accounts::Column::AccountType.eq(account_type));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(chart_of_accounts::Column::IsActive.eq(is_active));
        }

        let accounts = query
            .order_by_asc(chart_of_accounts::Column::Code)
            .all(&self.db)
            .await?;
        Ok(accounts)
    }

    /// Builds a trial balance over the tenant's active accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn trial_balance(&self, organization_id: Uuid) -> Result<TrialBalance, AccountError> {
        let accounts = self
            .list_accounts(
                organization_id,
                AccountFilter {
                    is_active: Some(true),
                    ..AccountFilter::default()
                },
            )
            .await?;
        Ok(build_trial_balance(&accounts))
    }
}

/// Seeds the default chart on any connection (used inside the posting
/// transaction as well as by the repository method).
pub(crate) async fn ensure_defaults<C: ConnectionTrait>(
    conn: &C,
    organization_id: Uuid,
) -> Result<u64, DbErr> {
    let existing = chart_of_accounts::Entity::find()
        .filter(chart_of_accounts::Column::OrganizationId.eq(organization_id))
        .count(conn)
        .await?;
    if existing > 0 {
        return Ok(0);
    }

    let now = Utc::now().into();
    let models = DEFAULT_CHART.iter().map(|account| chart_of_accounts::ActiveModel {
        id: Set(Uuid::new_v4()),
        organization_id: Set(organization_id),
        code: Set(account.code.to_string()),
        name: Set(account.name.to_string()),
        account_type: Set(account.account_type.into()),
        category: Set(account.category.map(str::to_string)),
        parent_id: Set(None),
        is_system: Set(true),
        is_active: Set(true),
        balance: Set(Decimal::ZERO),
        created_at: Set(now),
        updated_at: Set(now),
    });

    let inserted = chart_of_accounts::Entity::insert_many(models)
        .on_conflict(
            OnConflict::columns([
                chart_of_accounts::Column::OrganizationId,
                chart_of_accounts::Column::Code,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(inserted)
}

/// Pure trial-balance aggregation over account rows.
///
/// Debit-normal balances land in the debit column, credit-normal in the
/// credit column; a reconciled ledger has equal column totals.
#[must_use]
pub fn build_trial_balance(accounts: &[chart_of_accounts::Model]) -> TrialBalance {
    let mut rows = Vec::with_capacity(accounts.len());
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for account in accounts {
        let core_type: vendra_core::ledger::AccountType = account.account_type.into();
        let (debit, credit) = if core_type.is_debit_normal() {
            (account.balance, Decimal::ZERO)
        } else {
            (Decimal::ZERO, account.balance)
        };
        total_debit += debit;
        total_credit += credit;
        rows.push(TrialBalanceRow {
            code: account.code.clone(),
            name: account.name.clone(),
            account_type: account.account_type,
            debit,
            credit,
        });
    }

    TrialBalance {
        rows,
        total_debit,
        total_credit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn account(code: &str, account_type: AccountType, balance: Decimal) -> chart_of_accounts::Model {
        let now = Utc::now().into();
        chart_of_accounts::Model {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            code: code.to_string(),
            name: code.to_string(),
            account_type,
            category: None,
            parent_id: None,
            is_system: true,
            is_active: true,
            balance,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_trial_balance_columns_follow_normal_side() {
        let accounts = vec![
            account("1000", AccountType::Asset, dec!(60)),
            account("1200", AccountType::Asset, dec!(-40)),
            account("4000", AccountType::Revenue, dec!(100)),
            account("5000", AccountType::Expense, dec!(80)),
        ];

        let tb = build_trial_balance(&accounts);
        assert_eq!(tb.rows[0].debit, dec!(60));
        assert_eq!(tb.rows[0].credit, Decimal::ZERO);
        assert_eq!(tb.rows[2].credit, dec!(100));
        assert_eq!(tb.total_debit, dec!(100));
        assert_eq!(tb.total_credit, dec!(100));
        assert!(tb.is_balanced());
    }

    #[test]
    fn test_trial_balance_detects_drift() {
        let accounts = vec![
            account("1000", AccountType::Asset, dec!(50)),
            account("4000", AccountType::Revenue, dec!(100)),
        ];

        let tb = build_trial_balance(&accounts);
        assert!(!tb.is_balanced());
    }

    #[test]
    fn test_empty_chart_trial_balance() {
        let tb = build_trial_balance(&[]);
        assert!(tb.rows.is_empty());
        assert!(tb.is_balanced());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Every balance lands in exactly one column, so the column totals
        /// always account for the full chart.
        #[test]
        fn prop_each_row_uses_one_column(balances in proptest::collection::vec(0i64..1_000_000i64, 0..20)) {
            let types = [
                AccountType::Asset,
                AccountType::Liability,
                AccountType::Equity,
                AccountType::Revenue,
                AccountType::Expense,
            ];
            let accounts: Vec<_> = balances
                .iter()
                .enumerate()
                .map(|(i, b)| account(&format!("{}", 1000 + i), types[i % types.len()], Decimal::new(*b, 2)))
                .collect();

            let tb = build_trial_balance(&accounts);
            for row in &tb.rows {
                prop_assert!(row.debit.is_zero() || row.credit.is_zero());
            }
            let column_sum: Decimal = tb.rows.iter().map(|r| r.debit + r.credit).sum();
            let balance_sum: Decimal = accounts.iter().map(|a| a.balance).sum();
            prop_assert_eq!(column_sum, balance_sum);
        }
    }
}
