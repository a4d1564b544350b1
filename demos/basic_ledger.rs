//! Basic ledger usage example

use bank_ledger::utils::MemoryStorage;
use bank_ledger::{Bank, LedgerConfig, LedgerError};
use bigdecimal::BigDecimal;
use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Brasília time decides which day a movement belongs to
    let config = LedgerConfig::default().with_utc_offset_hours(-3);
    let bank = Bank::builder(MemoryStorage::new()).config(config).build()?;

    // 1. Open accounts
    for (cpf, name) in [("111", "Ana"), ("222", "Bruno")] {
        let customer = bank.create_account(cpf.to_string(), name.to_string()).await?;
        info!(cpf = %customer.cpf, id = %customer.id, name = %customer.name, "account created");
    }

    if let Err(err) = bank
        .create_account("111".to_string(), "Ana again".to_string())
        .await
    {
        warn!(%err, "duplicate registration rejected");
    }

    // 2. Move money
    let ana = bank
        .deposit("111", "salary".to_string(), BigDecimal::from(1000))
        .await?;
    info!(cpf = %ana.cpf, balance = %ana.balance(), "deposit recorded");

    let ana = bank.withdraw("111", BigDecimal::from(300)).await?;
    info!(cpf = %ana.cpf, balance = %ana.balance(), "withdrawal recorded");

    match bank.withdraw("111", BigDecimal::from(800)).await {
        Err(LedgerError::InsufficientFunds { balance, requested }) => {
            warn!(%balance, %requested, "withdrawal refused")
        }
        Err(other) => return Err(other.into()),
        Ok(_) => warn!("withdrawal beyond the balance was accepted"),
    }

    // 3. Statements
    for txn in bank.statement("111").await? {
        info!(
            kind = ?txn.transaction_type,
            amount = %txn.amount,
            description = txn.description.as_deref().unwrap_or("-"),
            at = %txn.created_at,
            "statement entry"
        );
    }

    let today = Utc::now()
        .with_timezone(bank.statements().reference_offset())
        .format(bank_ledger::DATE_FORMAT)
        .to_string();
    // The day can roll over between the movements above and this reading
    match bank.statement_on_date("111", &today).await {
        Ok(todays) => info!(date = %today, entries = todays.len(), "statement for today"),
        Err(LedgerError::NoStatementFound(date)) => info!(%date, "no movements today"),
        Err(other) => return Err(other.into()),
    }

    match bank.statement_on_date("111", "01/01/2000").await {
        Err(LedgerError::NoStatementFound(date)) => info!(%date, "no movements on that day"),
        other => info!(?other, "unexpected statement result"),
    }

    // 4. Housekeeping
    let renamed = bank.rename_account("222", "Bruno Silva".to_string()).await?;
    info!(cpf = %renamed.cpf, name = %renamed.name, "account renamed");

    let remaining = bank.delete_account("222").await?;
    info!(remaining = remaining.len(), "account 222 deleted");

    let report = bank.verify_integrity("111").await?;
    info!(
        valid = report.is_valid,
        entries = report.transaction_count,
        balance = %report.cached_balance,
        "integrity check"
    );

    Ok(())
}
