//! Configuration loader.
//!
//! Loads [`AppConfig`] from environment variables, with `.env` support via
//! `dotenvy`. The Notion API key is the only hard requirement: missing
//! database ids degrade the matching data source to empty results, and
//! missing secrets fail their endpoint closed at request time rather than at
//! startup.
//!
//! The gate checklist and budget rules have compiled-in defaults and can be
//! overridden from a TOML file named by `RENOHUB_RULES_PATH`.

use std::path::Path;

use renohub_domain::constants::GEMINI_MODEL;
use renohub_domain::{
    AppConfig, BudgetRules, Databases, GateConfig, MailConfig, RenoHubError, Result,
};
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8787;

/// Load configuration, reading a `.env` file first when one exists.
pub fn load() -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    load_from_env()
}

/// Load configuration from the current process environment.
pub fn load_from_env() -> Result<AppConfig> {
    let notion_api_key = env_var("NOTION_API_KEY")?;

    let databases = Databases {
        budget: opt_env("NOTION_BUDGET_DB_ID"),
        actuals: opt_env("NOTION_ACTUALS_DB_ID"),
        milestones: opt_env("MILESTONES_DB_ID"),
        deliverables: opt_env("DELIVERABLES_DB_ID"),
        vendor_registry: opt_env("VENDOR_REGISTRY_DB_ID"),
        payments: opt_env("PAYMENTS_DB_ID"),
        work_packages: opt_env("NOTION_WORK_PACKAGES_DB_ID"),
        sourcing_master_list: opt_env("SOURCING_MASTER_LIST_DB_ID"),
        activity_log: opt_env("ACTIVITY_LOG_DB_ID"),
    };

    let port = match opt_env("PORT") {
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|e| RenoHubError::Config(format!("Invalid PORT: {e}")))?,
        None => DEFAULT_PORT,
    };

    let mail = load_mail_config()?;
    let (gates, budget_rules) = match opt_env("RENOHUB_RULES_PATH") {
        Some(path) => load_rules_file(Path::new(&path))?,
        None => (GateConfig::default(), BudgetRules::default()),
    };

    Ok(AppConfig {
        notion_api_key,
        databases,
        gemini_api_key: opt_env("GEMINI_API_KEY"),
        gemini_model: opt_env("GEMINI_MODEL").unwrap_or_else(|| GEMINI_MODEL.to_string()),
        update_password: opt_env("UPDATE_PASSWORD"),
        webhook_secret: opt_env("WEBHOOK_SECRET"),
        mail,
        port,
        gates,
        budget_rules,
    })
}

/// Mail settings are all-or-nothing: with none set the notifier is disabled,
/// with a partial set configuration is rejected so a typo cannot silently
/// drop notifications.
fn load_mail_config() -> Result<Option<MailConfig>> {
    let api_url = opt_env("MAIL_API_URL");
    let api_key = opt_env("MAIL_API_KEY");
    let from = opt_env("MAIL_FROM");
    let owner_emails = opt_env("OWNER_EMAILS");

    match (api_url, api_key, from, owner_emails) {
        (None, None, None, None) => Ok(None),
        (Some(api_url), Some(api_key), Some(from), Some(owner_emails)) => {
            let owner_emails: Vec<String> = owner_emails
                .split(',')
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect();
            if owner_emails.is_empty() {
                return Err(RenoHubError::Config("OWNER_EMAILS is empty".into()));
            }
            Ok(Some(MailConfig { api_url, api_key, from, owner_emails }))
        }
        _ => Err(RenoHubError::Config(
            "Partial mail configuration: set all of MAIL_API_URL, MAIL_API_KEY, MAIL_FROM, OWNER_EMAILS or none".into(),
        )),
    }
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    gates: Option<GateConfig>,
    budget_rules: Option<BudgetRules>,
}

/// Read gate checklist and budget rule overrides from a TOML file. Absent
/// sections keep their compiled-in defaults.
pub fn load_rules_file(path: &Path) -> Result<(GateConfig, BudgetRules)> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| RenoHubError::Config(format!("Failed to read rules file: {e}")))?;

    let rules: RulesFile = toml::from_str(&contents)
        .map_err(|e| RenoHubError::Config(format!("Invalid rules file: {e}")))?;

    Ok((
        rules.gates.unwrap_or_default(),
        rules.budget_rules.unwrap_or_default(),
    ))
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| RenoHubError::Config(format!("Missing required environment variable: {key}")))
}

fn opt_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
