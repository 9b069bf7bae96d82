//! Canonical account roles and the default chart of accounts.
//!
//! Posting recipes never reference raw code strings; they go through
//! [`AccountRole`], a closed registry of every account the engine posts to.
//! The same table drives the per-tenant chart bootstrap.

use serde::{Deserialize, Serialize};

use super::types::AccountType;

/// Canonical roles in the default chart of accounts.
///
/// Each role maps to a fixed code, display name, type, and category.
/// Tenants may add their own accounts on top, but every recipe in this
/// engine posts exclusively against these roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Cash on hand (1000).
    Cash,
    /// Bank account (1010).
    Bank,
    /// Van cash held by drivers (1050).
    VanCash,
    /// Accounts receivable (1100).
    AccountsReceivable,
    /// Finished goods inventory (1200).
    Inventory,
    /// Raw material inventory (1210).
    RawMaterialInventory,
    /// Accounts payable (2000).
    AccountsPayable,
    /// Customer credit balances from returns (2100).
    CustomerCredits,
    /// Tax payable (2200).
    TaxPayable,
    /// Owner's equity (3000).
    OwnersEquity,
    /// Retained earnings (3100).
    RetainedEarnings,
    /// Sales revenue (4000).
    SalesRevenue,
    /// Direct sales revenue (4010).
    DirectSalesRevenue,
    /// Online sales revenue (4020).
    OnlineSalesRevenue,
    /// Other income (4900).
    OtherIncome,
    /// Cost of goods sold (5000).
    CostOfGoodsSold,
    /// Raw material cost (5010).
    RawMaterialCost,
    /// Production cost (5020).
    ProductionCost,
    /// Salaries and commissions expense (5100).
    SalariesExpense,
    /// General operating expense (5200).
    GeneralExpense,
    /// Delivery expense (5300).
    DeliveryExpense,
    /// Returns and refunds (5400).
    ReturnsAndRefunds,
}

impl AccountRole {
    /// Every role, in chart order.
    pub const ALL: [Self; 22] = [
        Self::Cash,
        Self::Bank,
        Self::VanCash,
        Self::AccountsReceivable,
        Self::Inventory,
        Self::RawMaterialInventory,
        Self::AccountsPayable,
        Self::CustomerCredits,
        Self::TaxPayable,
        Self::OwnersEquity,
        Self::RetainedEarnings,
        Self::SalesRevenue,
        Self::DirectSalesRevenue,
        Self::OnlineSalesRevenue,
        Self::OtherIncome,
        Self::CostOfGoodsSold,
        Self::RawMaterialCost,
        Self::ProductionCost,
        Self::SalariesExpense,
        Self::GeneralExpense,
        Self::DeliveryExpense,
        Self::ReturnsAndRefunds,
    ];

    /// The canonical account code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Cash => "1000",
            Self::Bank => "1010",
            Self::VanCash => "1050",
            Self::AccountsReceivable => "1100",
            Self::Inventory => "1200",
            Self::RawMaterialInventory => "1210",
            Self::AccountsPayable => "2000",
            Self::CustomerCredits => "2100",
            Self::TaxPayable => "2200",
            Self::OwnersEquity => "3000",
            Self::RetainedEarnings => "3100",
            Self::SalesRevenue => "4000",
            Self::DirectSalesRevenue => "4010",
            Self::OnlineSalesRevenue => "4020",
            Self::OtherIncome => "4900",
            Self::CostOfGoodsSold => "5000",
            Self::RawMaterialCost => "5010",
            Self::ProductionCost => "5020",
            Self::SalariesExpense => "5100",
            Self::GeneralExpense => "5200",
            Self::DeliveryExpense => "5300",
            Self::ReturnsAndRefunds => "5400",
        }
    }

    /// Display name for the seeded account.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Bank => "Bank",
            Self::VanCash => "Van Cash",
            Self::AccountsReceivable => "Accounts Receivable",
            Self::Inventory => "Inventory",
            Self::RawMaterialInventory => "Raw Material Inventory",
            Self::AccountsPayable => "Accounts Payable",
            Self::CustomerCredits => "Customer Credits",
            Self::TaxPayable => "Tax Payable",
            Self::OwnersEquity => "Owner's Equity",
            Self::RetainedEarnings => "Retained Earnings",
            Self::SalesRevenue => "Sales Revenue",
            Self::DirectSalesRevenue => "Direct Sales Revenue",
            Self::OnlineSalesRevenue => "Online Sales Revenue",
            Self::OtherIncome => "Other Income",
            Self::CostOfGoodsSold => "Cost of Goods Sold",
            Self::RawMaterialCost => "Raw Material Cost",
            Self::ProductionCost => "Production Cost",
            Self::SalariesExpense => "Salaries Expense",
            Self::GeneralExpense => "General Expense",
            Self::DeliveryExpense => "Delivery Expense",
            Self::ReturnsAndRefunds => "Returns and Refunds",
        }
    }

    /// The account type, determining the balance sign convention.
    #[must_use]
    pub const fn account_type(self) -> AccountType {
        match self {
            Self::Cash
            | Self::Bank
            | Self::VanCash
            | Self::AccountsReceivable
            | Self::Inventory
            | Self::RawMaterialInventory => AccountType::Asset,
            Self::AccountsPayable | Self::CustomerCredits | Self::TaxPayable => {
                AccountType::Liability
            }
            Self::OwnersEquity | Self::RetainedEarnings => AccountType::Equity,
            Self::SalesRevenue
            | Self::DirectSalesRevenue
            | Self::OnlineSalesRevenue
            | Self::OtherIncome => AccountType::Revenue,
            Self::CostOfGoodsSold
            | Self::RawMaterialCost
            | Self::ProductionCost
            | Self::SalariesExpense
            | Self::GeneralExpense
            | Self::DeliveryExpense
            | Self::ReturnsAndRefunds => AccountType::Expense,
        }
    }

    /// Optional category label for grouping in reports.
    #[must_use]
    pub const fn category(self) -> Option<&'static str> {
        match self {
            Self::Cash | Self::Bank | Self::VanCash => Some("cash"),
            Self::Inventory | Self::RawMaterialInventory => Some("inventory"),
            Self::SalesRevenue | Self::DirectSalesRevenue | Self::OnlineSalesRevenue => {
                Some("sales")
            }
            _ => None,
        }
    }
}

/// A seeded default account: the row template the bootstrapper persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultAccount {
    /// The canonical role.
    pub role: AccountRole,
    /// Account code (unique per tenant).
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Account type.
    pub account_type: AccountType,
    /// Optional category label.
    pub category: Option<&'static str>,
}

/// The full default chart seeded for every new tenant, all `is_system`.
pub const DEFAULT_CHART: [DefaultAccount; 22] = {
    let mut chart = [DefaultAccount {
        role: AccountRole::Cash,
        code: "",
        name: "",
        account_type: AccountType::Asset,
        category: None,
    }; 22];
    let mut i = 0;
    while i < AccountRole::ALL.len() {
        let role = AccountRole::ALL[i];
        chart[i] = DefaultAccount {
            role,
            code: role.code(),
            name: role.name(),
            account_type: role.account_type(),
            category: role.category(),
        };
        i += 1;
    }
    chart
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_chart_covers_all_roles() {
        assert_eq!(DEFAULT_CHART.len(), AccountRole::ALL.len());
        for (account, role) in DEFAULT_CHART.iter().zip(AccountRole::ALL) {
            assert_eq!(account.role, role);
            assert_eq!(account.code, role.code());
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<&str> = AccountRole::ALL.iter().map(|r| r.code()).collect();
        assert_eq!(codes.len(), AccountRole::ALL.len());
    }

    #[test]
    fn test_chart_spans_all_five_types() {
        let count = |t: AccountType| {
            AccountRole::ALL
                .iter()
                .filter(|r| r.account_type() == t)
                .count()
        };
        assert_eq!(count(AccountType::Asset), 6);
        assert_eq!(count(AccountType::Liability), 3);
        assert_eq!(count(AccountType::Equity), 2);
        assert_eq!(count(AccountType::Revenue), 4);
        assert_eq!(count(AccountType::Expense), 7);
    }

    #[test]
    fn test_code_prefix_matches_type() {
        for role in AccountRole::ALL {
            let prefix = role.code().chars().next().unwrap();
            let expected = match role.account_type() {
                AccountType::Asset => '1',
                AccountType::Liability => '2',
                AccountType::Equity => '3',
                AccountType::Revenue => '4',
                AccountType::Expense => '5',
            };
            assert_eq!(prefix, expected, "code {} for {:?}", role.code(), role);
        }
    }
}
