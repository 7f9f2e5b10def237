//! Monthly rollups
//!
//! Groups a month's transactions by category and compares the spend against
//! each category's limit. Everything here is a pure function over borrowed
//! slices; callers load the snapshot and pick the month.

use crate::config::Settings;
use crate::display::report::{double_separator, format_bar, format_percentage, separator};
use crate::error::DuoResult;
use crate::models::{Category, CategoryId, Money, MonthKey, Transaction};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::io::Write;

/// Usage above this percentage of the limit is flagged as a warning
pub const WARNING_THRESHOLD: f64 = 70.0;

/// Usage above this percentage of the limit is flagged as critical
pub const CRITICAL_THRESHOLD: f64 = 90.0;

/// How close a category is to its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Healthy,
    Warning,
    Critical,
}

impl BudgetStatus {
    /// Classify a usage percentage
    pub fn from_percentage(pct: f64) -> Self {
        if pct > CRITICAL_THRESHOLD {
            Self::Critical
        } else if pct > WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Healthy
        }
    }

    /// One-character marker for terminal tables
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Healthy => " ",
            Self::Warning => "!",
            Self::Critical => "*",
        }
    }
}

/// Spend for one category in one month
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRollup {
    pub category: Category,
    /// Sum of the month's transaction amounts in this category
    pub spent: Money,
    pub transaction_count: usize,
}

impl CategoryRollup {
    /// Limit left over (negative when overspent)
    pub fn remaining(&self) -> Money {
        self.category.limit - self.spent
    }

    /// Spend as a percentage of the limit
    ///
    /// A zero limit reads as 0% until something is spent, then 100%.
    pub fn percentage_used(&self) -> f64 {
        if self.category.limit.is_zero() {
            if self.spent.is_positive() {
                100.0
            } else {
                0.0
            }
        } else {
            self.spent.percentage_of(self.category.limit)
        }
    }

    pub fn status(&self) -> BudgetStatus {
        BudgetStatus::from_percentage(self.percentage_used())
    }

    pub fn is_over_limit(&self) -> bool {
        self.spent > self.category.limit
    }
}

/// Per-category spend for `month`, one entry per category in input order
///
/// Transactions outside the month are ignored. Categories with no matching
/// transactions report zero spend. Transactions whose category is not in
/// `categories` contribute to no rollup.
pub fn rollup_for_month(
    transactions: &[Transaction],
    categories: &[Category],
    month: MonthKey,
) -> Vec<CategoryRollup> {
    let mut spending: HashMap<CategoryId, (Money, usize)> = HashMap::new();

    for txn in transactions.iter().filter(|t| t.is_in_month(month)) {
        let entry = spending
            .entry(txn.category_id)
            .or_insert((Money::zero(), 0));
        entry.0 += txn.amount;
        entry.1 += 1;
    }

    categories
        .iter()
        .map(|category| {
            let (spent, transaction_count) =
                spending.get(&category.id).copied().unwrap_or_default();
            CategoryRollup {
                category: category.clone(),
                spent,
                transaction_count,
            }
        })
        .collect()
}

/// Sum of limits minus sum of spend; negative when over budget overall
pub fn available_budget(rollups: &[CategoryRollup]) -> Money {
    let total_limit: Money = rollups.iter().map(|r| r.category.limit).sum();
    let total_spent: Money = rollups.iter().map(|r| r.spent).sum();
    total_limit - total_spent
}

/// Months that have transactions, plus the current month, oldest first
pub fn months_with_activity(transactions: &[Transaction]) -> BTreeSet<MonthKey> {
    months_with_activity_as_of(transactions, MonthKey::current())
}

/// Like [`months_with_activity`] with an explicit current month
pub fn months_with_activity_as_of(
    transactions: &[Transaction],
    current: MonthKey,
) -> BTreeSet<MonthKey> {
    transactions
        .iter()
        .map(Transaction::month)
        .chain(std::iter::once(current))
        .collect()
}

/// Dashboard view of a single month
#[derive(Debug, Clone)]
pub struct MonthlyOverview {
    pub month: MonthKey,
    pub rollups: Vec<CategoryRollup>,
    pub total_limit: Money,
    pub total_spent: Money,
    /// Limits minus spend across all categories
    pub available: Money,
    /// Spend whose category id matches no known category
    pub unassigned_spending: Money,
    pub unassigned_count: usize,
    /// Number of transactions in the month
    pub transaction_count: usize,
}

impl MonthlyOverview {
    /// Build the overview for `month`
    pub fn generate(transactions: &[Transaction], categories: &[Category], month: MonthKey) -> Self {
        let rollups = rollup_for_month(transactions, categories, month);
        let known: HashSet<CategoryId> = categories.iter().map(|c| c.id).collect();

        let mut unassigned_spending = Money::zero();
        let mut unassigned_count = 0;
        let mut transaction_count = 0;
        for txn in transactions.iter().filter(|t| t.is_in_month(month)) {
            transaction_count += 1;
            if !known.contains(&txn.category_id) {
                unassigned_spending += txn.amount;
                unassigned_count += 1;
            }
        }

        Self {
            month,
            total_limit: rollups.iter().map(|r| r.category.limit).sum(),
            total_spent: rollups.iter().map(|r| r.spent).sum(),
            available: available_budget(&rollups),
            rollups,
            unassigned_spending,
            unassigned_count,
            transaction_count,
        }
    }

    /// Share of the overall monthly limit already spent
    pub fn progress_percentage(&self) -> f64 {
        self.total_spent.percentage_of(self.total_limit)
    }

    /// Categories whose spend exceeds their limit
    pub fn over_limit_categories(&self) -> Vec<&CategoryRollup> {
        self.rollups.iter().filter(|r| r.is_over_limit()).collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let money = |m: Money| settings.format_money(m);
        let mut output = String::new();

        output.push_str(&format!("Monthly Overview - {}\n", self.month.label()));
        output.push_str(&double_separator(78));
        output.push('\n');
        output.push_str(&format!("Available to Spend: {}\n", money(self.available)));
        output.push_str(&format!(
            "Monthly Progress:   {} of {} used\n\n",
            format_percentage(self.progress_percentage()),
            money(self.total_limit)
        ));

        output.push_str(&format!(
            "  {:<32} {:>11} {:>11} {:<20} {:>6}\n",
            "Category", "Spent", "Limit", "", "Used"
        ));
        output.push_str(&separator(78));
        output.push('\n');

        for rollup in &self.rollups {
            let pct = rollup.percentage_used();
            output.push_str(&format!(
                "{} {:<32} {:>11} {:>11} {:<20} {:>6}\n",
                rollup.status().marker(),
                rollup.category.display_name(),
                money(rollup.spent),
                money(rollup.category.limit),
                format_bar(pct.min(100.0), 100.0, 20),
                format_percentage(pct)
            ));
        }

        if self.unassigned_count > 0 {
            output.push_str(&format!(
                "\n  {:<32} {:>11} ({} transactions)\n",
                "UNASSIGNED",
                money(self.unassigned_spending),
                self.unassigned_count
            ));
        }

        output.push_str(&separator(78));
        output.push('\n');
        output.push_str(&format!(
            "  {:<32} {:>11} {:>11}\n",
            "TOTAL",
            money(self.total_spent),
            money(self.total_limit)
        ));
        output.push_str("\n! = above 70% of limit, * = above 90% of limit\n");

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> DuoResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record(["Month", "Category", "Shared", "Spent", "Limit", "Remaining", "Percentage"])?;

        for rollup in &self.rollups {
            csv.write_record([
                self.month.to_string(),
                rollup.category.name.clone(),
                rollup.category.shared.to_string(),
                format!("{:.2}", rollup.spent.as_units()),
                format!("{:.2}", rollup.category.limit.as_units()),
                format!("{:.2}", rollup.remaining().as_units()),
                format!("{:.2}", rollup.percentage_used()),
            ])?;
        }

        csv.write_record([
            self.month.to_string(),
            "TOTAL".to_string(),
            String::new(),
            format!("{:.2}", self.total_spent.as_units()),
            format!("{:.2}", self.total_limit.as_units()),
            format!("{:.2}", self.available.as_units()),
            format!("{:.2}", self.progress_percentage()),
        ])?;

        csv.flush()?;
        Ok(())
    }
}
