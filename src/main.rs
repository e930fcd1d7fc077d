//! migrate-secrets CLI
//!
//! Usage:
//!   migrate-secrets [--settings data.json] [--service remotely-save] [--dry-run] [--memory]
//!
//! 설정 JSON 의 평문 시크릿을 OS 키체인으로 옮기고 설정에는 시크릿 이름만 남깁니다.

use secret_migration::config::{load_env, CliAction, MigrationConfig};
use secret_migration::error::ErrorReport;
use secret_migration::{run, RunOutcome};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("migrate-secrets: move plaintext secrets out of the settings file");
    eprintln!("  --settings PATH   Settings JSON (default data.json, env SECRET_MIGRATION_SETTINGS)");
    eprintln!("  --service NAME    Keychain service name (default remotely-save)");
    eprintln!("  --dry-run         List pending migrations without writing anything");
    eprintln!("  --memory          Use an in-memory store (only with --dry-run)");
}

#[tokio::main]
async fn main() -> ExitCode {
    load_env();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let action = MigrationConfig::from_env().apply_args(std::env::args().skip(1));
    let config = match action {
        Ok(CliAction::Run(config)) => config,
        Ok(CliAction::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{}", err);
            print_usage();
            return ExitCode::from(2);
        }
    };

    match run(&config).await {
        Ok(RunOutcome::Pending(pending)) => {
            if pending.is_empty() {
                println!("Nothing to migrate");
            }
            for field in pending {
                println!("{} → {}", field.path, field.secret_name);
            }
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Migrated(report)) => {
            if !report.any() {
                println!("Nothing to migrate");
            }
            for field in &report.migrated {
                println!("✓ {} → {}", field.path, field.secret_name);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            let report = ErrorReport::from(err);
            eprintln!("[{}] {}", report.code, report.message);
            if let Some(details) = report.details {
                eprintln!("{}", details);
            }
            ExitCode::FAILURE
        }
    }
}
