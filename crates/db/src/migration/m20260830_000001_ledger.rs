//! Ledger schema migration.
//!
//! Creates the chart of accounts, journal entries/lines, and the per-tenant
//! entry-number sequence table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(LEDGER_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS journal_entry_lines CASCADE;
             DROP TABLE IF EXISTS journal_entries CASCADE;
             DROP TABLE IF EXISTS journal_sequences CASCADE;
             DROP TABLE IF EXISTS chart_of_accounts CASCADE;
             DROP TYPE IF EXISTS reference_type;
             DROP TYPE IF EXISTS account_type;",
        )
        .await?;
        Ok(())
    }
}

const LEDGER_SQL: &str = r"
-- Account classification (determines balance sign convention)
CREATE TYPE account_type AS ENUM ('asset', 'liability', 'equity', 'revenue', 'expense');

-- Business-event origin of a journal entry
CREATE TYPE reference_type AS ENUM (
    'order', 'sale', 'collection', 'expense', 'supplier_invoice',
    'supplier_payment', 'payroll', 'production', 'return', 'deposit',
    'raw_material_purchase', 'manual', 'reversal'
);

-- Tenant-scoped chart of accounts
CREATE TABLE chart_of_accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    organization_id UUID NOT NULL,
    code VARCHAR(20) NOT NULL,
    name VARCHAR(255) NOT NULL,
    account_type account_type NOT NULL,
    category VARCHAR(50),
    parent_id UUID REFERENCES chart_of_accounts(id),
    is_system BOOLEAN NOT NULL DEFAULT false,
    is_active BOOLEAN NOT NULL DEFAULT true,
    balance NUMERIC(18, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_accounts_org_code UNIQUE (organization_id, code)
);

CREATE INDEX idx_accounts_org ON chart_of_accounts(organization_id);
CREATE INDEX idx_accounts_org_type ON chart_of_accounts(organization_id, account_type);

-- Journal entries (always posted; immutable except the reversal pair)
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    organization_id UUID NOT NULL,
    entry_number VARCHAR(20) NOT NULL,
    entry_date DATE NOT NULL,
    description TEXT NOT NULL,
    reference_type reference_type NOT NULL,
    reference_id UUID,
    total_debit NUMERIC(18, 2) NOT NULL,
    total_credit NUMERIC(18, 2) NOT NULL,
    is_posted BOOLEAN NOT NULL DEFAULT true,
    is_reversed BOOLEAN NOT NULL DEFAULT false,
    reversed_by_id UUID REFERENCES journal_entries(id),
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_entries_org_number UNIQUE (organization_id, entry_number),
    CONSTRAINT chk_entries_balanced CHECK (total_debit = total_credit)
);

CREATE INDEX idx_entries_org_date ON journal_entries(organization_id, entry_date DESC);
CREATE INDEX idx_entries_org_reference ON journal_entries(organization_id, reference_type, reference_id);

-- Journal entry lines
CREATE TABLE journal_entry_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES chart_of_accounts(id),
    debit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    credit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    memo TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_lines_non_negative CHECK (debit >= 0 AND credit >= 0),
    CONSTRAINT chk_lines_one_side CHECK (debit = 0 OR credit = 0)
);

CREATE INDEX idx_lines_entry ON journal_entry_lines(entry_id);
CREATE INDEX idx_lines_account ON journal_entry_lines(account_id);

-- Per-tenant entry-number counter, advanced under FOR UPDATE in the
-- posting transaction
CREATE TABLE journal_sequences (
    organization_id UUID PRIMARY KEY,
    next_value BIGINT NOT NULL DEFAULT 1,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";
