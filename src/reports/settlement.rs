//! Monthly settlement between the two parties
//!
//! Spend in shared categories is split evenly. Each party's balance is what
//! they paid toward shared categories minus their half; the party with the
//! lower balance owes the other half the gap. Joint payments count toward
//! the shared total but belong to neither party, so they raise both halves
//! equally and never move the result.

use std::collections::HashSet;
use std::io::Write;

use crate::config::Settings;
use crate::display::report::{double_separator, separator};
use crate::error::DuoResult;
use crate::models::{Buyer, Category, CategoryId, Money, MonthKey, Party, Transaction};

/// Differences at or below this are treated as settled
pub const SETTLEMENT_TOLERANCE: Money = Money::from_cents(100);

/// Who owes whom for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceInfo {
    pub month: MonthKey,
    /// Everything party A paid for this month, shared or not
    pub party_a_spent: Money,
    /// Everything party B paid for this month, shared or not
    pub party_b_spent: Money,
    /// Everything paid jointly this month
    pub joint_spent: Money,
    /// Spend in shared categories, by anyone
    pub shared_expenses: Money,
    /// Half of `shared_expenses`
    pub per_person_share: Money,
    /// Party A's spend in shared categories
    pub party_a_shared_paid: Money,
    /// Party B's spend in shared categories
    pub party_b_shared_paid: Money,
    pub party_a_balance: Money,
    pub party_b_balance: Money,
    /// Absolute gap between the two balances
    pub difference: Money,
    /// The party that should pay, if the gap exceeds the tolerance
    pub who_owes: Option<Party>,
    /// Half the gap, or zero when settled
    pub amount: Money,
}

/// Compute the settlement for `month`
///
/// Transactions outside the month are ignored. Transactions whose category
/// is unknown or not shared count toward the party totals but not toward
/// shared expenses or balances.
pub fn settle(transactions: &[Transaction], categories: &[Category], month: MonthKey) -> BalanceInfo {
    let shared: HashSet<CategoryId> = categories
        .iter()
        .filter(|c| c.shared)
        .map(|c| c.id)
        .collect();

    let mut party_a_spent = Money::zero();
    let mut party_b_spent = Money::zero();
    let mut joint_spent = Money::zero();
    let mut shared_expenses = Money::zero();
    let mut party_a_shared_paid = Money::zero();
    let mut party_b_shared_paid = Money::zero();

    for txn in transactions.iter().filter(|t| t.is_in_month(month)) {
        let is_shared = shared.contains(&txn.category_id);
        if is_shared {
            shared_expenses += txn.amount;
        }

        match txn.buyer {
            Buyer::PartyA => {
                party_a_spent += txn.amount;
                if is_shared {
                    party_a_shared_paid += txn.amount;
                }
            }
            Buyer::PartyB => {
                party_b_spent += txn.amount;
                if is_shared {
                    party_b_shared_paid += txn.amount;
                }
            }
            Buyer::Joint => joint_spent += txn.amount,
        }
    }

    let per_person_share = shared_expenses.halve();
    let party_a_balance = party_a_shared_paid - per_person_share;
    let party_b_balance = party_b_shared_paid - per_person_share;
    let difference = (party_a_balance - party_b_balance).abs();

    let (who_owes, amount) = if difference > SETTLEMENT_TOLERANCE {
        let debtor = if party_a_balance < party_b_balance {
            Party::PartyA
        } else {
            Party::PartyB
        };
        (Some(debtor), difference.halve())
    } else {
        (None, Money::zero())
    };

    BalanceInfo {
        month,
        party_a_spent,
        party_b_spent,
        joint_spent,
        shared_expenses,
        per_person_share,
        party_a_shared_paid,
        party_b_shared_paid,
        party_a_balance,
        party_b_balance,
        difference,
        who_owes,
        amount,
    }
}

impl BalanceInfo {
    /// True when no payment is needed
    pub fn is_settled(&self) -> bool {
        self.who_owes.is_none()
    }

    /// The party that should receive the payment
    pub fn owed_to(&self) -> Option<Party> {
        self.who_owes.map(|p| p.other())
    }

    pub fn spent_by(&self, party: Party) -> Money {
        match party {
            Party::PartyA => self.party_a_spent,
            Party::PartyB => self.party_b_spent,
        }
    }

    pub fn balance_of(&self, party: Party) -> Money {
        match party {
            Party::PartyA => self.party_a_balance,
            Party::PartyB => self.party_b_balance,
        }
    }

    /// One-line verdict, e.g. "Sam owes Alex $100.00"
    pub fn summary(&self, settings: &Settings) -> String {
        match self.who_owes {
            Some(debtor) => format!(
                "{} owes {} {}",
                settings.party_name(debtor),
                settings.party_name(debtor.other()),
                settings.format_money(self.amount)
            ),
            None => "All settled up".to_string(),
        }
    }

    /// Format the settlement for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let money = |m: Money| settings.format_money(m);
        let mut output = String::new();

        output.push_str(&format!("Settlement - {}\n", self.month.label()));
        output.push_str(&double_separator(50));
        output.push('\n');

        for party in [Party::PartyA, Party::PartyB] {
            output.push_str(&format!(
                "{:<24} {:>12} spent, balance {:>12}\n",
                settings.party_name(party),
                money(self.spent_by(party)),
                money(self.balance_of(party))
            ));
        }
        output.push_str(&format!("{:<24} {:>12} spent\n", "Joint", money(self.joint_spent)));

        output.push_str(&separator(50));
        output.push('\n');
        output.push_str(&format!(
            "Shared expenses: {}  (each: {})\n",
            money(self.shared_expenses),
            money(self.per_person_share)
        ));
        output.push_str(&format!("{}\n", self.summary(settings)));

        output
    }

    /// Export the settlement as a single CSV row with a header
    pub fn export_csv<W: Write>(&self, settings: &Settings, writer: W) -> DuoResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let units = |m: Money| format!("{:.2}", m.as_units());

        csv.write_record([
            "Month",
            "Party A",
            "Party B",
            "Party A Spent",
            "Party B Spent",
            "Joint Spent",
            "Shared Expenses",
            "Per Person Share",
            "Party A Balance",
            "Party B Balance",
            "Difference",
            "Who Owes",
            "Amount",
        ])?;
        csv.write_record([
            self.month.to_string(),
            settings.party_a_name.clone(),
            settings.party_b_name.clone(),
            units(self.party_a_spent),
            units(self.party_b_spent),
            units(self.joint_spent),
            units(self.shared_expenses),
            units(self.per_person_share),
            units(self.party_a_balance),
            units(self.party_b_balance),
            units(self.difference),
            self.who_owes
                .map(|p| settings.party_name(p).to_string())
                .unwrap_or_default(),
            units(self.amount),
        ])?;

        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const BILLS: CategoryId = CategoryId::new(1);
    const GROCERIES: CategoryId = CategoryId::new(2);
    const PERSONAL_A: CategoryId = CategoryId::new(5);

    fn march() -> MonthKey {
        MonthKey::new(2024, 3).unwrap()
    }

    fn categories() -> Vec<Category> {
        vec![
            Category::new(BILLS, "Monthly Bills", Money::from_cents(200000), true),
            Category::new(GROCERIES, "Groceries & Pharmacy", Money::from_cents(80000), true),
            Category::new(PERSONAL_A, "Personal (A)", Money::from_cents(50000), false),
        ]
    }

    fn txn(cents: i64, category: CategoryId, buyer: Buyer) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            Money::from_cents(cents),
            category,
            buyer,
        )
    }

    #[test]
    fn test_balanced_month() {
        let transactions = vec![
            txn(10000, GROCERIES, Buyer::PartyA),
            txn(10000, BILLS, Buyer::PartyB),
        ];
        let info = settle(&transactions, &categories(), march());

        assert_eq!(info.shared_expenses.cents(), 20000);
        assert_eq!(info.per_person_share.cents(), 10000);
        assert_eq!(info.party_a_balance, Money::zero());
        assert_eq!(info.party_b_balance, Money::zero());
        assert_eq!(info.who_owes, None);
        assert_eq!(info.amount, Money::zero());
        assert!(info.is_settled());
    }

    #[test]
    fn test_one_party_paid_everything() {
        let transactions = vec![txn(20000, GROCERIES, Buyer::PartyA)];
        let info = settle(&transactions, &categories(), march());

        assert_eq!(info.party_a_balance.cents(), 10000);
        assert_eq!(info.party_b_balance.cents(), -10000);
        assert_eq!(info.difference.cents(), 20000);
        assert_eq!(info.who_owes, Some(Party::PartyB));
        assert_eq!(info.owed_to(), Some(Party::PartyA));
        assert_eq!(info.amount.cents(), 10000);
    }

    #[test]
    fn test_joint_payment_is_neutral() {
        let transactions = vec![txn(20000, GROCERIES, Buyer::Joint)];
        let info = settle(&transactions, &categories(), march());

        assert_eq!(info.joint_spent.cents(), 20000);
        assert_eq!(info.shared_expenses.cents(), 20000);
        assert_eq!(info.party_a_balance.cents(), -10000);
        assert_eq!(info.party_b_balance.cents(), -10000);
        assert_eq!(info.who_owes, None);
        assert_eq!(info.amount, Money::zero());
    }

    #[test]
    fn test_adding_joint_payment_does_not_change_outcome() {
        let base = vec![txn(5000, GROCERIES, Buyer::PartyA), txn(1500, BILLS, Buyer::PartyB)];
        let mut with_joint = base.clone();
        with_joint.push(txn(31415, BILLS, Buyer::Joint));

        let before = settle(&base, &categories(), march());
        let after = settle(&with_joint, &categories(), march());

        assert_eq!(before.who_owes, after.who_owes);
        assert_eq!(before.amount, after.amount);
        assert_eq!(before.difference, after.difference);
    }

    #[test]
    fn test_non_shared_spend_excluded() {
        let base = vec![txn(8000, GROCERIES, Buyer::PartyB)];
        let mut with_personal = base.clone();
        with_personal.push(txn(45000, PERSONAL_A, Buyer::PartyA));

        let before = settle(&base, &categories(), march());
        let after = settle(&with_personal, &categories(), march());

        assert_eq!(after.shared_expenses, before.shared_expenses);
        assert_eq!(after.who_owes, before.who_owes);
        assert_eq!(after.amount, before.amount);
        // still visible in the party's raw total
        assert_eq!(after.party_a_spent.cents(), 45000);
        assert_eq!(after.party_a_shared_paid, Money::zero());
    }

    #[test]
    fn test_unknown_category_treated_as_not_shared() {
        let transactions = vec![txn(9000, CategoryId::new(99), Buyer::PartyA)];
        let info = settle(&transactions, &categories(), march());

        assert_eq!(info.shared_expenses, Money::zero());
        assert_eq!(info.party_a_spent.cents(), 9000);
        assert!(info.is_settled());
    }

    #[test]
    fn test_tolerance_boundary() {
        // difference exactly 1.00 -> settled
        let at = vec![txn(100, GROCERIES, Buyer::PartyA)];
        let info = settle(&at, &categories(), march());
        assert_eq!(info.difference.cents(), 100);
        assert!(info.is_settled());
        assert_eq!(info.amount, Money::zero());

        // difference 1.02 -> B owes 0.51
        let over = vec![txn(102, GROCERIES, Buyer::PartyA)];
        let info = settle(&over, &categories(), march());
        assert_eq!(info.difference.cents(), 102);
        assert_eq!(info.who_owes, Some(Party::PartyB));
        assert_eq!(info.amount.cents(), 51);
    }

    #[test]
    fn test_odd_cent_totals_round_half_away_from_zero() {
        // shared 3.01 -> share 1.51; A: 3.01 - 1.51 = 1.50, B: -1.51
        let transactions = vec![txn(301, BILLS, Buyer::PartyA)];
        let info = settle(&transactions, &categories(), march());

        assert_eq!(info.per_person_share.cents(), 151);
        assert_eq!(info.difference.cents(), 301);
        assert_eq!(info.amount.cents(), 151);
    }

    #[test]
    fn test_symmetry() {
        let transactions = vec![
            txn(12345, GROCERIES, Buyer::PartyA),
            txn(2000, BILLS, Buyer::PartyB),
            txn(700, BILLS, Buyer::Joint),
            txn(999, PERSONAL_A, Buyer::PartyB),
        ];
        let swapped: Vec<Transaction> = transactions
            .iter()
            .cloned()
            .map(|mut t| {
                t.buyer = t.buyer.swapped();
                t
            })
            .collect();

        let original = settle(&transactions, &categories(), march());
        let mirrored = settle(&swapped, &categories(), march());

        assert_eq!(original.amount, mirrored.amount);
        assert_eq!(original.who_owes.map(|p| p.other()), mirrored.who_owes);
        assert_eq!(original.party_a_balance, mirrored.party_b_balance);
    }

    #[test]
    fn test_other_months_ignored() {
        let mut february = txn(50000, GROCERIES, Buyer::PartyA);
        february.date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        let info = settle(&[february], &categories(), march());
        assert_eq!(info.party_a_spent, Money::zero());
        assert!(info.is_settled());
    }

    #[test]
    fn test_format_terminal_uses_party_names() {
        let settings = Settings {
            party_a_name: "Bruno".into(),
            party_b_name: "Isadora".into(),
            ..Settings::default()
        };
        let transactions = vec![txn(20000, GROCERIES, Buyer::PartyA)];
        let info = settle(&transactions, &categories(), march());

        assert_eq!(info.summary(&settings), "Isadora owes Bruno $100.00");
        let text = info.format_terminal(&settings);
        assert!(text.contains("Settlement - March 2024"));
        assert!(text.contains("Bruno"));
        assert!(text.contains("Shared expenses: $200.00"));
    }

    #[test]
    fn test_export_csv() {
        let transactions = vec![txn(20000, GROCERIES, Buyer::PartyA)];
        let info = settle(&transactions, &categories(), march());

        let mut buffer = Vec::new();
        info.export_csv(&Settings::default(), &mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert!(lines[0].starts_with("Month,Party A,Party B,"));
        assert_eq!(
            lines[1],
            "2024-03,Partner A,Partner B,200.00,0.00,0.00,200.00,100.00,100.00,-100.00,200.00,Partner B,100.00"
        );
    }

    #[test]
    fn test_settled_summary() {
        let info = settle(&[], &categories(), march());
        assert_eq!(info.summary(&Settings::default()), "All settled up");
    }
}
