//! Top-level CLI definition and dispatch.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::control;
use serde::Serialize;

use outreach_desk::cli::{OutputMode, print_footer, print_json, print_table};
use outreach_desk::core::config::Config;
use outreach_desk::core::errors::{OdkError, Result};
use outreach_desk::export::{Exportable, write_csv, write_selected_csv};
use outreach_desk::forms::{CampaignForm, LeadForm, TopUpOrder};
use outreach_desk::logger::jsonl::{EventType, JsonlConfig, JsonlWriter, LogEntry, Severity};
use outreach_desk::records::catalog;
use outreach_desk::records::{Campaign, EmailActivity, Lead};
use outreach_desk::source::{
    JsonFileSink, JsonFileSource, MemorySource, NewRecord, RecordSource, SubmitSink, fixtures,
};
use outreach_desk::view::collection::{Query, Record, SortDirection, apply, page_count, paginate};
use outreach_desk::view::selection::SelectionSet;

/// Outreach Desk — leads, campaigns, and email tracking from the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "odk",
    author,
    version,
    about = "Outreach Desk - sales outreach workbench",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Increase verbosity.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Quiet mode (errors only).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// List leads.
    Leads(ListArgs),
    /// List campaigns.
    Campaigns(ListArgs),
    /// List tracked email activity.
    Emails(ListArgs),
    /// Add a new lead.
    AddLead(AddLeadArgs),
    /// Create a new draft campaign.
    NewCampaign(NewCampaignArgs),
    /// Purchase an email-credit top-up.
    Topup(TopUpArgs),
    /// Show the pricing plan catalog.
    Plans,
    /// View and update configuration state.
    Config(ConfigArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args, Default)]
struct ListArgs {
    /// Free-text search over the collection's searchable fields.
    #[arg(long, value_name = "TERM")]
    search: Option<String>,
    /// Status filter value ("all" lifts the constraint).
    #[arg(long, value_name = "STATUS")]
    status: Option<String>,
    /// Additional equality filters.
    #[arg(long, value_name = "FIELD=VALUE")]
    filter: Vec<String>,
    /// Sort field (defaults to the configured field for the collection).
    #[arg(long, value_name = "FIELD")]
    sort: Option<String>,
    /// Sort descending.
    #[arg(long, conflicts_with = "asc")]
    desc: bool,
    /// Sort ascending.
    #[arg(long, conflicts_with = "desc")]
    asc: bool,
    /// 1-based page to show.
    #[arg(long, default_value_t = 1, value_name = "N")]
    page: usize,
    /// Show every matching row, ignoring pagination.
    #[arg(long)]
    all: bool,
    /// Export the matching rows as CSV to a file.
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,
    /// Restrict an export to these record ids.
    #[arg(long, value_name = "ID,ID,...", value_delimiter = ',', requires = "export")]
    ids: Vec<u64>,
}

#[derive(Debug, Clone, Args)]
struct AddLeadArgs {
    /// First name (required field).
    #[arg(long, value_name = "NAME", default_value = "")]
    first_name: String,
    /// Last name (required field).
    #[arg(long, value_name = "NAME", default_value = "")]
    last_name: String,
    /// Email address (required field).
    #[arg(long, value_name = "EMAIL", default_value = "")]
    email: String,
    /// Company name.
    #[arg(long, value_name = "NAME", default_value = "")]
    company: String,
    /// Phone number.
    #[arg(long, value_name = "PHONE", default_value = "")]
    phone: String,
    /// Lead source label.
    #[arg(long, value_name = "SOURCE", default_value = "")]
    source: String,
}

#[derive(Debug, Clone, Args)]
struct NewCampaignArgs {
    /// Campaign name (required field).
    #[arg(long, value_name = "NAME", default_value = "")]
    name: String,
    /// Subject line (required field).
    #[arg(long, value_name = "SUBJECT", default_value = "")]
    subject: String,
    /// Audience segment label.
    #[arg(long, value_name = "SEGMENT", default_value = "")]
    audience: String,
}

#[derive(Debug, Clone, Args, Default)]
struct TopUpArgs {
    /// Credit package id to purchase.
    #[arg(long, value_name = "PACKAGE")]
    package: Option<String>,
    /// List available packages instead of purchasing.
    #[arg(long)]
    list: bool,
}

#[derive(Debug, Clone, Args, Default)]
struct ConfigArgs {
    /// Print the effective config file path and exit.
    #[arg(long)]
    path: bool,
    /// Write the effective configuration to its config file.
    #[arg(long)]
    init: bool,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    shell: CompletionShell,
}

pub fn run(cli: &Cli) -> Result<()> {
    if cli.no_color {
        control::set_override(false);
    }

    let config = Config::load(cli.config.as_deref())?;
    if cli.verbose {
        eprintln!(
            "odk: config {} (hash {})",
            config.paths.config_file.display(),
            config.stable_hash()?
        );
    }

    let result = dispatch(cli, &config);
    if let Err(e) = &result {
        let mut log = activity_log(&config);
        log.write_entry(&LogEntry::failure(e));
    }
    result
}

fn dispatch(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Command::Leads(args) => {
            let records = load_or_fixtures(
                JsonFileSource::<Lead>::new(&config.paths.leads_file),
                fixtures::sample_leads,
            )?;
            run_list(cli, config, args, "leads", &config.display.lead_sort_field, &records)
        }
        Command::Campaigns(args) => {
            let records = load_or_fixtures(
                JsonFileSource::<Campaign>::new(&config.paths.campaigns_file),
                fixtures::sample_campaigns,
            )?;
            run_list(
                cli,
                config,
                args,
                "campaigns",
                &config.display.campaign_sort_field,
                &records,
            )
        }
        Command::Emails(args) => {
            let records = load_or_fixtures(
                JsonFileSource::<EmailActivity>::new(&config.paths.emails_file),
                fixtures::sample_email_activity,
            )?;
            run_list(
                cli,
                config,
                args,
                "emails",
                &config.display.email_sort_field,
                &records,
            )
        }
        Command::AddLead(args) => run_add_lead(cli, config, args),
        Command::NewCampaign(args) => run_new_campaign(cli, config, args),
        Command::Topup(args) => run_topup(cli, config, args),
        Command::Plans => run_plans(cli),
        Command::Config(args) => run_config(cli, config, args),
        Command::Completions(args) => {
            let mut command = Cli::command();
            let binary_name = command.get_name().to_string();
            generate(args.shell, &mut command, binary_name, &mut io::stdout());
            Ok(())
        }
    }
}

fn output_mode(cli: &Cli) -> OutputMode {
    if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}

fn activity_log(config: &Config) -> JsonlWriter {
    JsonlWriter::open(JsonlConfig::at(&config.paths.jsonl_log))
}

/// Read a collection from its JSON file, falling back to the built-in sample
/// data when no file exists yet.
fn load_or_fixtures<R>(
    source: JsonFileSource<R>,
    fixtures_fn: impl FnOnce() -> Vec<R>,
) -> Result<Vec<R>>
where
    R: serde::de::DeserializeOwned + Clone,
{
    if source.path().exists() {
        source.fetch()
    } else {
        MemorySource::new(fixtures_fn()).fetch()
    }
}

fn build_query(args: &ListArgs, default_sort: &str, default_desc: bool) -> Result<Query> {
    let mut query = Query::new();
    if let Some(search) = &args.search {
        query.search.clone_from(search);
    }
    if let Some(status) = &args.status {
        query.filters.insert("status".to_string(), status.clone());
    }
    for pair in &args.filter {
        let (field, value) = pair.split_once('=').ok_or_else(|| OdkError::InvalidArgument {
            details: format!("--filter expects FIELD=VALUE, got {pair:?}"),
        })?;
        query.filters.insert(field.to_string(), value.to_string());
    }

    let field = args.sort.clone().unwrap_or_else(|| default_sort.to_string());
    let direction = if args.desc {
        SortDirection::Desc
    } else if args.asc {
        SortDirection::Asc
    } else if default_desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    Ok(query.with_sort(field, direction))
}

fn run_list<R>(
    cli: &Cli,
    config: &Config,
    args: &ListArgs,
    collection: &str,
    default_sort: &str,
    records: &[R],
) -> Result<()>
where
    R: Record + Exportable + Serialize,
{
    let query = build_query(args, default_sort, config.display.sort_descending)?;
    let display = apply(records, &query)?;

    let mut log = activity_log(config);
    let mut entry = LogEntry::new(EventType::RecordsFetched, Severity::Info);
    entry.collection = Some(collection.to_string());
    entry.count = Some(display.len());
    log.write_entry(&entry);

    if let Some(path) = &args.export {
        let file = File::create(path).map_err(|source| OdkError::io(path, source))?;
        let mut out = BufWriter::new(file);
        let written = if args.ids.is_empty() {
            write_csv(&display, &mut out)?
        } else {
            let mut selection = SelectionSet::new();
            selection.toggle_all(&args.ids);
            write_selected_csv(&display, &selection, &mut out)?
        };

        let mut entry = LogEntry::new(EventType::ExportCompleted, Severity::Info);
        entry.collection = Some(collection.to_string());
        entry.count = Some(written);
        log.write_entry(&entry);

        if !cli.quiet {
            println!("exported {written} {collection} to {}", path.display());
        }
        return Ok(());
    }

    match output_mode(cli) {
        OutputMode::Json => print_json(&display),
        OutputMode::Text => {
            let total = display.len();
            let pages = page_count(total, config.display.page_size);
            let (page, shown): (usize, Vec<&R>) = if args.all {
                (1, display)
            } else {
                let page = args.page.max(1);
                (page, paginate(&display, page, config.display.page_size).to_vec())
            };

            if shown.is_empty() {
                if total == 0 {
                    println!("no {collection} match the current filters");
                } else {
                    println!("page {page} is out of range ({pages} pages)");
                }
                return Ok(());
            }

            let rows: Vec<Vec<String>> = shown.iter().map(|r| r.row()).collect();
            print_table(R::headers(), &rows);
            if !cli.quiet && !args.all {
                print_footer(shown.len(), total, page, pages);
            }
            Ok(())
        }
    }
}

fn run_add_lead(cli: &Cli, config: &Config, args: &AddLeadArgs) -> Result<()> {
    let form = LeadForm {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        email: args.email.clone(),
        company: args.company.clone(),
        phone: args.phone.clone(),
        source: args.source.clone(),
    };
    let record = form.into_new_record()?;
    submit_record(
        cli,
        config,
        record,
        &config.paths.leads_file,
        "leads",
        EventType::LeadCreated,
        "lead",
    )
}

fn run_new_campaign(cli: &Cli, config: &Config, args: &NewCampaignArgs) -> Result<()> {
    let form = CampaignForm {
        name: args.name.clone(),
        subject: args.subject.clone(),
        audience: args.audience.clone(),
    };
    let record = form.into_new_record()?;
    submit_record(
        cli,
        config,
        record,
        &config.paths.campaigns_file,
        "campaigns",
        EventType::CampaignCreated,
        "campaign",
    )
}

fn submit_record<R>(
    cli: &Cli,
    config: &Config,
    record: NewRecord<R>,
    path: &std::path::Path,
    collection: &str,
    event: EventType,
    noun: &str,
) -> Result<()>
where
    R: Record + Serialize + serde::de::DeserializeOwned,
{
    let mut sink: JsonFileSink<R> = JsonFileSink::new(path);
    let receipt = sink.submit(record)?;

    let mut log = activity_log(config);
    let mut entry = LogEntry::new(event, Severity::Info);
    entry.collection = Some(collection.to_string());
    entry.record_id = Some(receipt.id);
    log.write_entry(&entry);

    match output_mode(cli) {
        OutputMode::Json => print_json(&serde_json::json!({ "id": receipt.id })),
        OutputMode::Text => {
            if !cli.quiet {
                println!("created {noun} #{}", receipt.id);
            }
            Ok(())
        }
    }
}

fn run_topup(cli: &Cli, config: &Config, args: &TopUpArgs) -> Result<()> {
    if args.list || args.package.is_none() {
        return match output_mode(cli) {
            OutputMode::Json => print_json(&catalog::PACKAGES),
            OutputMode::Text => {
                let rows: Vec<Vec<String>> = catalog::PACKAGES
                    .iter()
                    .map(|p| {
                        vec![
                            p.id.to_string(),
                            p.name.to_string(),
                            p.credits.to_string(),
                            format_cents(p.price_cents),
                        ]
                    })
                    .collect();
                print_table(&["id", "name", "credits", "price"], &rows);
                Ok(())
            }
        };
    }

    let order = TopUpOrder {
        package: args.package.clone(),
    };
    let mut updated = config.clone();
    let receipt = order.apply_to(&mut updated.account)?;
    updated.save()?;

    let mut log = activity_log(config);
    let mut entry = LogEntry::new(EventType::TopUpPurchased, Severity::Info);
    entry.credits = Some(receipt.credits_added);
    entry.amount_cents = Some(receipt.amount_cents);
    log.write_entry(&entry);

    match output_mode(cli) {
        OutputMode::Json => print_json(&receipt),
        OutputMode::Text => {
            if !cli.quiet {
                println!(
                    "purchased {} ({} credits, {}); balance is now {}",
                    receipt.package_id,
                    receipt.credits_added,
                    format_cents(receipt.amount_cents),
                    receipt.new_balance
                );
            }
            Ok(())
        }
    }
}

fn run_plans(cli: &Cli) -> Result<()> {
    match output_mode(cli) {
        OutputMode::Json => print_json(&catalog::PLANS),
        OutputMode::Text => {
            let rows: Vec<Vec<String>> = catalog::PLANS
                .iter()
                .map(|p| {
                    vec![
                        p.id.to_string(),
                        p.name.to_string(),
                        format!("${}/mo", p.monthly_usd),
                        p.monthly_credits.to_string(),
                        p.seats.to_string(),
                    ]
                })
                .collect();
            print_table(&["id", "name", "price", "credits/mo", "seats"], &rows);
            Ok(())
        }
    }
}

fn run_config(cli: &Cli, config: &Config, args: &ConfigArgs) -> Result<()> {
    if args.path {
        println!("{}", config.paths.config_file.display());
        return Ok(());
    }
    if args.init {
        config.save()?;
        let mut log = activity_log(config);
        log.write_entry(&LogEntry::new(EventType::ConfigSaved, Severity::Info));
        if !cli.quiet {
            println!("wrote {}", config.paths.config_file.display());
        }
        return Ok(());
    }

    match output_mode(cli) {
        OutputMode::Json => print_json(config),
        OutputMode::Text => {
            let rendered = toml::to_string_pretty(config).map_err(|e| OdkError::Serialization {
                context: "toml",
                details: e.to_string(),
            })?;
            print!("{rendered}");
            Ok(())
        }
    }
}

fn format_cents(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_query_combines_status_and_filters() {
        let args = ListArgs {
            search: Some("ada".to_string()),
            status: Some("New".to_string()),
            filter: vec!["source=Website".to_string()],
            ..ListArgs::default()
        };
        let query = build_query(&args, "created_at", true).unwrap();
        assert_eq!(query.search, "ada");
        assert_eq!(query.filters.get("status").map(String::as_str), Some("New"));
        assert_eq!(
            query.filters.get("source").map(String::as_str),
            Some("Website")
        );
        let sort = query.sort.expect("default sort applied");
        assert_eq!(sort.field, "created_at");
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn build_query_rejects_malformed_filter_pairs() {
        let args = ListArgs {
            filter: vec!["no-equals-sign".to_string()],
            ..ListArgs::default()
        };
        let err = build_query(&args, "created_at", false).unwrap_err();
        assert_eq!(err.code(), "ODK-1101");
    }

    #[test]
    fn explicit_asc_overrides_descending_default() {
        let args = ListArgs {
            asc: true,
            ..ListArgs::default()
        };
        let query = build_query(&args, "created_at", true).unwrap();
        assert_eq!(query.sort.unwrap().direction, SortDirection::Asc);
    }

    #[test]
    fn format_cents_pads_fractions() {
        assert_eq!(format_cents(1_900), "$19.00");
        assert_eq!(format_cents(7), "$0.07");
        assert_eq!(format_cents(24_950), "$249.50");
    }
}
