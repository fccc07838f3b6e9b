use fairshare::{
    config::{database, settings},
    core::{
        build_splitwise_shares, compute_totals, generate_splitwise_text,
        history::{self, load_bill},
        rounding::format_money,
        validation::{check_completeness, parse_bill_json},
    },
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage:
  fairshare split <bill.json> [title]   compute shares, print export text, save to history
  fairshare history                     list saved splits
  fairshare show <id>                   print the export text of a saved split
  fairshare delete <id>                 delete a saved split
  fairshare new                         print a starter bill from the configured roster";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load settings (missing file means defaults)
    let config_path = env::var("FAIRSHARE_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let app_settings = settings::load_settings_or_default(&config_path)
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;

    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["new"] => {
            let bill = app_settings.seed_bill()?.ok_or_else(|| Error::Config {
                message: format!("No [[people]] configured in {config_path}"),
            })?;
            println!("{}", serde_json::to_string_pretty(&bill)?);
        }
        ["split", path, rest @ ..] => {
            let contents = std::fs::read_to_string(path)?;
            let bill = parse_bill_json(&contents)
                .inspect_err(|e| error!("Rejected bill {}: {}", path, e))?;

            for warning in check_completeness(&bill).warnings {
                warn!("{warning}");
            }

            let totals = compute_totals(&bill);
            for person in &totals.person_totals {
                info!(person = %person.name, total = %format_money(person.total), "Share");
            }
            println!("{}", generate_splitwise_text(&build_splitwise_shares(&bill)));

            let db = open_history().await?;
            let title = rest.first().copied().unwrap_or(*path);
            let saved = history::save_split(&db, title, &bill).await?;
            history::prune_history(&db, app_settings.history.max_saved).await?;
            info!("Saved as split #{}", saved.id);
        }
        ["history"] => {
            let db = open_history().await?;
            for saved in history::list_splits(&db).await? {
                println!(
                    "#{:<4} {}  {:<24} {:>10}  paid by {} ({} people)",
                    saved.id,
                    saved.created_at.format("%Y-%m-%d %H:%M"),
                    saved.title,
                    format_money(saved.grand_total),
                    saved.payer_name,
                    saved.people_count
                );
            }
        }
        ["show", id] => {
            let id = parse_split_id(id)?;
            let db = open_history().await?;
            let saved = history::get_split(&db, id)
                .await?
                .ok_or(Error::SplitNotFound { id })?;
            let bill = load_bill(&saved)?;
            println!("{}", generate_splitwise_text(&build_splitwise_shares(&bill)));
        }
        ["delete", id] => {
            let id = parse_split_id(id)?;
            let db = open_history().await?;
            history::delete_split(&db, id).await?;
            info!("Deleted split #{id}");
        }
        other => {
            eprintln!("{USAGE}");
            return Err(unknown_command(other));
        }
    }

    Ok(())
}

async fn open_history() -> Result<sea_orm::DatabaseConnection> {
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to open history database: {}", e))?;
    database::create_tables(&db).await?;
    Ok(db)
}

fn unknown_command(args: &[&str]) -> Error {
    let command = if args.is_empty() {
        "(none)".to_string()
    } else {
        args.join(" ")
    };
    Error::UnknownCommand { command }
}

fn parse_split_id(raw: &str) -> Result<i64> {
    raw.trim_start_matches('#')
        .parse()
        .map_err(|e| Error::Config {
            message: format!("Invalid split id '{raw}': {e}"),
        })
}
