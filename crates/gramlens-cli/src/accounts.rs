//! Account roster command handler.

use gramlens_core::AppConfig;

pub(crate) fn run_accounts(config: &AppConfig) -> anyhow::Result<()> {
    let roster = gramlens_core::load_accounts(&config.accounts_path)?;

    println!("{:<25}NOTES", "HANDLE");
    for account in &roster.accounts {
        println!(
            "{:<25}{}",
            account.handle,
            account.notes.as_deref().unwrap_or("")
        );
    }

    println!();
    println!(
        "{} accounts configured in {}",
        roster.accounts.len(),
        config.accounts_path.display()
    );
    Ok(())
}
