//! Category display formatting

use crate::config::Settings;
use crate::models::Category;

use super::report::separator;

/// Format categories as a table
pub fn format_category_list(categories: &[Category], settings: &Settings) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'duo init' to create the default categories.\n"
            .to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:>4}  {:34} {:>12}  {}\n", "ID", "Name", "Limit", "Split"));
    output.push_str(&separator(62));
    output.push('\n');

    for category in categories {
        output.push_str(&format!(
            "{:>4}  {:34} {:>12}  {}\n",
            category.id,
            category.display_name(),
            settings.format_money(category.limit),
            if category.shared { "shared" } else { "personal" }
        ));
    }

    let total: crate::models::Money = categories.iter().map(|c| c.limit).sum();
    output.push_str(&separator(62));
    output.push('\n');
    output.push_str(&format!("{:>4}  {:34} {:>12}\n", "", "Total", settings.format_money(total)));

    output
}

/// Format category details
pub fn format_category_details(category: &Category, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.display_name()));
    output.push_str(&format!("  ID:      {}\n", category.id));
    output.push_str(&format!("  Limit:   {} per month\n", settings.format_money(category.limit)));
    output.push_str(&format!(
        "  Split:   {}\n",
        if category.shared {
            "shared 50/50"
        } else {
            "personal (not split)"
        }
    ));
    output.push_str(&format!(
        "  Created: {}\n",
        category.created_at.format("%Y-%m-%d")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money};

    #[test]
    fn test_empty_list_hints_at_init() {
        let output = format_category_list(&[], &Settings::default());
        assert!(output.contains("duo init"));
    }

    #[test]
    fn test_list_shows_totals() {
        let categories = vec![
            Category::with_emoji(CategoryId::new(1), "Monthly Bills", "📆", Money::from_cents(200000), true),
            Category::new(CategoryId::new(5), "Personal", Money::from_cents(50000), false),
        ];
        let output = format_category_list(&categories, &Settings::default());

        assert!(output.contains("📆 Monthly Bills"));
        assert!(output.contains("personal"));
        assert!(output.contains("$2500.00"));
    }

    #[test]
    fn test_details() {
        let category = Category::new(CategoryId::new(3), "Eating Out", Money::from_cents(40000), true);
        let output = format_category_details(&category, &Settings::default());

        assert!(output.contains("Category: Eating Out"));
        assert!(output.contains("$400.00 per month"));
        assert!(output.contains("shared 50/50"));
    }
}
