//! Posting recipes for business events.
//!
//! Each recipe is a pure function from primitive event values to the fixed
//! debit/credit line set for that event, expressed against [`AccountRole`]s.
//! This table is the single source of truth for how business events hit the
//! ledger; the db-side adapter layer only adds persistence and the
//! catch-and-log boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::accounts::AccountRole;
use super::types::LineInput;

/// Where money physically lands or leaves: cash drawer, driver van, or bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashChannel {
    /// Cash on hand at the office/store.
    CashOnHand,
    /// Cash held by a driver in the van.
    VanCash,
    /// Bank account.
    Bank,
}

impl CashChannel {
    /// The account role backing this channel.
    #[must_use]
    pub const fn role(self) -> AccountRole {
        match self {
            Self::CashOnHand => AccountRole::Cash,
            Self::VanCash => AccountRole::VanCash,
            Self::Bank => AccountRole::Bank,
        }
    }
}

/// Which revenue stream a sale credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesChannel {
    /// Regular order sales.
    Orders,
    /// Direct (counter) sales.
    Direct,
    /// Online sales.
    Online,
}

impl SalesChannel {
    /// The revenue account role for this channel.
    #[must_use]
    pub const fn role(self) -> AccountRole {
        match self {
            Self::Orders => AccountRole::SalesRevenue,
            Self::Direct => AccountRole::DirectSalesRevenue,
            Self::Online => AccountRole::OnlineSalesRevenue,
        }
    }
}

fn dr(role: AccountRole, amount: Decimal, memo: &str) -> LineInput {
    LineInput::debit(role.code(), amount, memo)
}

fn cr(role: AccountRole, amount: Decimal, memo: &str) -> LineInput {
    LineInput::credit(role.code(), amount, memo)
}

/// Order or direct sale.
///
/// Debits the paid portion into the cash channel, the unpaid remainder
/// into receivables, credits the sale's revenue stream, and books cost of
/// goods sold against inventory when a cost is known. Zero-amount lines
/// are dropped by the composer, so a fully paid sale simply has no
/// receivable line.
#[must_use]
pub fn sale(
    total: Decimal,
    paid: Decimal,
    cost: Decimal,
    paid_into: CashChannel,
    channel: SalesChannel,
) -> Vec<LineInput> {
    let outstanding = total - paid;
    let mut lines = vec![
        dr(paid_into.role(), paid, "Sale payment received"),
        dr(AccountRole::AccountsReceivable, outstanding, "Sale on credit"),
        cr(channel.role(), total, "Sale revenue"),
    ];
    if cost > Decimal::ZERO {
        lines.push(dr(AccountRole::CostOfGoodsSold, cost, "Cost of goods sold"));
        lines.push(cr(AccountRole::Inventory, cost, "Inventory sold"));
    }
    lines
}

/// Customer debt collection: money in, receivable down.
#[must_use]
pub fn collection(amount: Decimal, collected_into: CashChannel) -> Vec<LineInput> {
    vec![
        dr(collected_into.role(), amount, "Collection received"),
        cr(AccountRole::AccountsReceivable, amount, "Receivable settled"),
    ]
}

/// Approved operating expense paid from cash.
#[must_use]
pub fn expense(amount: Decimal) -> Vec<LineInput> {
    vec![
        dr(AccountRole::GeneralExpense, amount, "Expense"),
        cr(AccountRole::Cash, amount, "Expense paid"),
    ]
}

/// Supplier invoice received: inventory in, payable up.
#[must_use]
pub fn supplier_invoice(total: Decimal) -> Vec<LineInput> {
    vec![
        dr(AccountRole::Inventory, total, "Supplier invoice"),
        cr(AccountRole::AccountsPayable, total, "Payable recorded"),
    ]
}

/// Payment made against a supplier balance.
#[must_use]
pub fn supplier_payment(amount: Decimal) -> Vec<LineInput> {
    vec![
        dr(AccountRole::AccountsPayable, amount, "Payable settled"),
        cr(AccountRole::Cash, amount, "Supplier payment"),
    ]
}

/// Payroll or commission run paid from cash.
#[must_use]
pub fn payroll(amount: Decimal) -> Vec<LineInput> {
    vec![
        dr(AccountRole::SalariesExpense, amount, "Payroll"),
        cr(AccountRole::Cash, amount, "Payroll paid"),
    ]
}

/// Production completion: finished goods in, raw materials consumed.
#[must_use]
pub fn production_completed(total_cost: Decimal) -> Vec<LineInput> {
    vec![
        dr(AccountRole::Inventory, total_cost, "Finished goods produced"),
        cr(
            AccountRole::RawMaterialInventory,
            total_cost,
            "Raw materials consumed",
        ),
    ]
}

/// Customer return credited to the customer's balance.
#[must_use]
pub fn customer_return(amount: Decimal) -> Vec<LineInput> {
    vec![
        dr(AccountRole::ReturnsAndRefunds, amount, "Customer return"),
        cr(AccountRole::CustomerCredits, amount, "Customer credit issued"),
    ]
}

/// Van cash deposited to the safe or bank.
#[must_use]
pub fn deposit(amount: Decimal, target: CashChannel) -> Vec<LineInput> {
    vec![
        dr(target.role(), amount, "Deposit received"),
        cr(AccountRole::VanCash, amount, "Van cash deposited"),
    ]
}

/// Raw material purchase, possibly partially on credit.
///
/// The unpaid remainder lands in accounts payable; when fully paid the
/// payable line is zero and gets dropped by the composer.
#[must_use]
pub fn raw_material_purchase(total: Decimal, paid: Decimal) -> Vec<LineInput> {
    let unpaid = total - paid;
    vec![
        dr(
            AccountRole::RawMaterialInventory,
            total,
            "Raw materials purchased",
        ),
        cr(AccountRole::Cash, paid, "Raw materials paid"),
        cr(AccountRole::AccountsPayable, unpaid, "Raw materials on credit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn totals(lines: &[LineInput]) -> (Decimal, Decimal) {
        lines.iter().fold((Decimal::ZERO, Decimal::ZERO), |(d, c), l| {
            (d + l.debit, c + l.credit)
        })
    }

    /// Effective lines after the composer drops zero/zero ones.
    fn effective(lines: &[LineInput]) -> Vec<&LineInput> {
        lines.iter().filter(|l| !l.is_noop()).collect()
    }

    #[test]
    fn test_sale_recipe_worked_example() {
        // total=100, paid=60, cost=40
        let lines = sale(
            dec!(100),
            dec!(60),
            dec!(40),
            CashChannel::VanCash,
            SalesChannel::Orders,
        );

        let eff = effective(&lines);
        assert_eq!(eff.len(), 5);
        assert_eq!(eff[0].account_code, AccountRole::VanCash.code());
        assert_eq!(eff[0].debit, dec!(60));
        assert_eq!(eff[1].account_code, AccountRole::AccountsReceivable.code());
        assert_eq!(eff[1].debit, dec!(40));
        assert_eq!(eff[2].account_code, AccountRole::SalesRevenue.code());
        assert_eq!(eff[2].credit, dec!(100));
        assert_eq!(eff[3].account_code, AccountRole::CostOfGoodsSold.code());
        assert_eq!(eff[3].debit, dec!(40));
        assert_eq!(eff[4].account_code, AccountRole::Inventory.code());
        assert_eq!(eff[4].credit, dec!(40));

        let (debit, credit) = totals(&lines);
        assert_eq!(debit, dec!(140));
        assert_eq!(credit, dec!(140));
    }

    #[test]
    fn test_fully_paid_sale_has_no_receivable() {
        let lines = sale(
            dec!(100),
            dec!(100),
            dec!(0),
            CashChannel::CashOnHand,
            SalesChannel::Direct,
        );

        let eff = effective(&lines);
        assert_eq!(eff.len(), 2);
        assert!(eff
            .iter()
            .all(|l| l.account_code != AccountRole::AccountsReceivable.code()));
        assert_eq!(eff[1].account_code, AccountRole::DirectSalesRevenue.code());
    }

    #[test]
    fn test_unpaid_sale_is_all_receivable() {
        let lines = sale(
            dec!(250),
            dec!(0),
            dec!(0),
            CashChannel::VanCash,
            SalesChannel::Orders,
        );

        let eff = effective(&lines);
        assert_eq!(eff.len(), 2);
        assert_eq!(eff[0].account_code, AccountRole::AccountsReceivable.code());
        assert_eq!(eff[0].debit, dec!(250));
    }

    #[test]
    fn test_collection_channels() {
        let van = collection(dec!(75), CashChannel::VanCash);
        assert_eq!(van[0].account_code, AccountRole::VanCash.code());

        let bank = collection(dec!(75), CashChannel::Bank);
        assert_eq!(bank[0].account_code, AccountRole::Bank.code());
        assert_eq!(bank[1].account_code, AccountRole::AccountsReceivable.code());
        assert_eq!(bank[1].credit, dec!(75));
    }

    #[test]
    fn test_two_line_recipes_balance() {
        for lines in [
            expense(dec!(30)),
            supplier_invoice(dec!(500)),
            supplier_payment(dec!(200)),
            payroll(dec!(1500)),
            production_completed(dec!(320)),
            customer_return(dec!(45)),
            deposit(dec!(600), CashChannel::Bank),
        ] {
            let (debit, credit) = totals(&lines);
            assert_eq!(debit, credit);
            assert_eq!(effective(&lines).len(), 2);
        }
    }

    #[test]
    fn test_deposit_targets() {
        let to_safe = deposit(dec!(100), CashChannel::CashOnHand);
        assert_eq!(to_safe[0].account_code, AccountRole::Cash.code());
        assert_eq!(to_safe[1].account_code, AccountRole::VanCash.code());
        assert_eq!(to_safe[1].credit, dec!(100));
    }

    #[test]
    fn test_raw_material_purchase_split() {
        let lines = raw_material_purchase(dec!(1000), dec!(400));
        let (debit, credit) = totals(&lines);
        assert_eq!(debit, dec!(1000));
        assert_eq!(credit, dec!(1000));

        let eff = effective(&lines);
        assert_eq!(eff.len(), 3);
        assert_eq!(eff[1].account_code, AccountRole::Cash.code());
        assert_eq!(eff[1].credit, dec!(400));
        assert_eq!(eff[2].account_code, AccountRole::AccountsPayable.code());
        assert_eq!(eff[2].credit, dec!(600));
    }

    #[test]
    fn test_raw_material_purchase_fully_paid_drops_payable() {
        let lines = raw_material_purchase(dec!(1000), dec!(1000));
        let eff = effective(&lines);
        assert_eq!(eff.len(), 2);
        assert!(eff
            .iter()
            .all(|l| l.account_code != AccountRole::AccountsPayable.code()));
    }
}
