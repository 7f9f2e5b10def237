//! Setup and configuration commands

use clap::Args;

use crate::audit::EntityType;
use crate::config::Settings;
use crate::error::DuoResult;
use crate::storage::{initialize_storage, Storage};

/// Arguments for `duo init`
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Display name for the first party
    #[arg(long)]
    pub party_a: Option<String>,

    /// Display name for the second party
    #[arg(long)]
    pub party_b: Option<String>,
}

/// Arguments for `duo config`
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Rename the first party
    #[arg(long)]
    pub party_a: Option<String>,

    /// Rename the second party
    #[arg(long)]
    pub party_b: Option<String>,

    /// Currency symbol used when printing amounts
    #[arg(long)]
    pub currency: Option<String>,
}

/// Set up a new household budget
///
/// Saves the settings and seeds the default categories. Running it again
/// keeps existing categories and transactions.
pub fn handle_init_command(
    storage: &Storage,
    settings: &mut Settings,
    args: InitArgs,
) -> DuoResult<()> {
    let paths = storage.paths();
    let already_initialized = storage.is_initialized();

    if let Some(name) = args.party_a {
        settings.party_a_name = name.trim().to_string();
    }
    if let Some(name) = args.party_b {
        settings.party_b_name = name.trim().to_string();
    }
    settings.validate()?;

    println!("Initializing duo-budget at: {}", paths.base_dir().display());

    let seeded = !paths.categories_file().exists();
    initialize_storage(paths, settings)?;
    settings.save(paths)?;
    storage.categories.load()?;

    if !already_initialized {
        storage.log_create(EntityType::Settings, "settings", None, &*settings)?;
    }

    println!(
        "Budget shared by {} and {}.",
        settings.party_a_name, settings.party_b_name
    );
    if seeded {
        println!();
        println!("Default categories have been created:");
        for category in storage.categories.get_all()? {
            println!(
                "  #{:<3} {} ({})",
                category.id,
                category.display_name(),
                settings.format_money(category.limit)
            );
        }
    }
    println!();
    println!("Run 'duo txn add <amount> -c <category> -b <buyer>' to record a purchase.");

    Ok(())
}

/// Show or change configuration
pub fn handle_config_command(
    storage: &Storage,
    settings: &mut Settings,
    args: ConfigArgs,
) -> DuoResult<()> {
    let paths = storage.paths();

    if args.party_a.is_none() && args.party_b.is_none() && args.currency.is_none() {
        println!("duo-budget Configuration");
        println!("========================");
        println!("Base directory: {}", paths.base_dir().display());
        println!("Data directory: {}", paths.data_dir().display());
        println!("Audit log:      {}", paths.audit_log().display());
        println!();
        println!("Settings:");
        println!("  Party A:  {}", settings.party_a_name);
        println!("  Party B:  {}", settings.party_b_name);
        println!("  Currency: {}", settings.currency_symbol);
        if !storage.is_initialized() {
            println!();
            println!("Not initialized yet. Run 'duo init' to get started.");
        }
        return Ok(());
    }

    let before = settings.clone();
    if let Some(name) = args.party_a {
        settings.party_a_name = name.trim().to_string();
    }
    if let Some(name) = args.party_b {
        settings.party_b_name = name.trim().to_string();
    }
    if let Some(symbol) = args.currency {
        settings.currency_symbol = symbol.trim().to_string();
    }
    settings.validate()?;

    settings.save(paths)?;
    storage.log_update(EntityType::Settings, "settings", None, &before, &*settings)?;

    println!("Settings updated.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::DuoPaths;
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DuoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_init_seeds_categories_and_settings() {
        let (_temp_dir, storage) = create_storage();
        let mut settings = Settings::default();

        handle_init_command(
            &storage,
            &mut settings,
            InitArgs {
                party_a: Some("Bruno".into()),
                party_b: Some(" Isadora ".into()),
            },
        )
        .unwrap();

        assert!(storage.is_initialized());
        assert_eq!(settings.party_b_name, "Isadora");
        assert_eq!(storage.categories.count().unwrap(), 6);

        let reloaded = Settings::load_or_create(storage.paths()).unwrap();
        assert_eq!(reloaded.party_a_name, "Bruno");

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_type, EntityType::Settings);
    }

    #[test]
    fn test_init_rejects_matching_names() {
        let (_temp_dir, storage) = create_storage();
        let mut settings = Settings::default();

        let err = handle_init_command(
            &storage,
            &mut settings,
            InitArgs {
                party_a: Some("Sam".into()),
                party_b: Some("sam".into()),
            },
        )
        .unwrap_err();

        assert!(err.is_validation());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_init_twice_keeps_categories() {
        let (_temp_dir, storage) = create_storage();
        let mut settings = Settings::default();

        handle_init_command(&storage, &mut settings, InitArgs::default()).unwrap();
        handle_init_command(&storage, &mut settings, InitArgs::default()).unwrap();

        assert_eq!(storage.categories.count().unwrap(), 6);
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_config_update_is_audited() {
        let (_temp_dir, storage) = create_storage();
        let mut settings = Settings::default();
        handle_init_command(&storage, &mut settings, InitArgs::default()).unwrap();

        handle_config_command(
            &storage,
            &mut settings,
            ConfigArgs {
                currency: Some("€".into()),
                ..ConfigArgs::default()
            },
        )
        .unwrap();

        let reloaded = Settings::load_or_create(storage.paths()).unwrap();
        assert_eq!(reloaded.currency_symbol, "€");

        let entries = storage.audit().read_all().unwrap();
        let last = entries.last().unwrap();
        assert_eq!(last.operation, Operation::Update);
        assert!(last.diff_summary.as_deref().unwrap().contains("currency_symbol"));
    }
}
