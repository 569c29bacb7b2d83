mod table;


use clap::{Parser, Subcommand};
use cinedesk::AdminError;
use cinedesk::catalog::ResourceKind;
use cinedesk::config::AdminConfig;
use cinedesk::fields::{FieldKind, options_from_records};
use cinedesk::net::api::ResourceApi;
use cinedesk::record::Record;
use cinedesk::record::model::Resource;
use cinedesk::state::loading::LoadingCoordinator;
use cinedesk::state::navigation::TracingNavigator;
use cinedesk::state::notice::{NoticeLevel, Notices};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Admin(#[from] AdminError),
    #[error("no {resource} with id {id}")]
    NotFound { resource: ResourceKind, id: String },
    #[error("invalid assignment `{0}`; expected key=value")]
    InvalidAssignment(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "cinedesk", about = "Movie catalog admin CLI")]
struct Cli {
    /// Overrides the environment-selected API base URL.
    #[arg(long, env = "CINEDESK_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "CINEDESK_SESSION_TOKEN")]
    session_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a resource table, optionally filtered.
    List {
        resource: ResourceKind,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Print one record as JSON.
    Show { resource: ResourceKind, id: String },
    /// Print the form inputs for a resource.
    Fields { resource: ResourceKind },
    Add {
        resource: ResourceKind,
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },
    Update {
        resource: ResourceKind,
        id: String,
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },
    Delete { resource: ResourceKind, id: String },
}

struct CliContext {
    api: ResourceApi,
    loading: LoadingCoordinator,
    notices: Notices,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = AdminConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_owned();
    }
    if cli.session_token.is_some() {
        config.session_token = cli.session_token;
    }
    tracing::debug!(base_url = %config.base_url, environment = ?config.environment, "config loaded");

    let mut ctx = CliContext {
        api: ResourceApi::from_config(&config)?,
        loading: LoadingCoordinator::new(),
        notices: Notices::default(),
    };

    let result = run(&mut ctx, cli.command).await;
    flush_notices(&mut ctx.notices);
    result
}

async fn run(ctx: &mut CliContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::List { resource, search } => run_list(ctx, resource, &search).await,
        Command::Show { resource, id } => run_show(ctx, resource, &id).await,
        Command::Fields { resource } => run_fields(ctx, resource).await,
        Command::Add { resource, set } => run_add(ctx, resource, &set).await,
        Command::Update { resource, id, set } => run_update(ctx, resource, &id, &set).await,
        Command::Delete { resource, id } => run_delete(ctx, resource, &id).await,
    }
}

async fn fetch_list(ctx: &CliContext, resource: ResourceKind) -> Result<Vec<Record>, AdminError> {
    let message = format!("Loading {}", resource.title().to_lowercase());
    ctx.loading
        .with_loading(resource.segment(), ctx.api.list(resource), Some(message.as_str()))
        .await
}

async fn run_list(ctx: &mut CliContext, resource: ResourceKind, search: &str) -> Result<(), CliError> {
    let records = fetch_list(ctx, resource).await?;
    let view = resource.list_view(records);
    let rows = view.rows(search);
    print!("{}", table::render(&view.headers(), &rows));
    ctx.notices
        .info(format!("{} of {} {}", rows.len(), view.records().len(), resource.segment()));
    Ok(())
}

async fn run_show(ctx: &mut CliContext, resource: ResourceKind, id: &str) -> Result<(), CliError> {
    let record = ctx
        .loading
        .with_loading(resource.singular(), ctx.api.get(resource, id), None)
        .await?;
    let typed = Resource::from_record(resource, &record)?;
    if let Some(label) = typed.label() {
        ctx.notices.info(format!("{resource} {id}: {label}"));
    }
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

async fn run_fields(ctx: &mut CliContext, resource: ResourceKind) -> Result<(), CliError> {
    let mut form = resource.add_form();
    if resource == ResourceKind::Movie {
        for (field, source) in [("country_id", ResourceKind::Country), ("type_id", ResourceKind::Type)] {
            let records = fetch_list(ctx, source).await?;
            form.set_options(field, options_from_records(&records, source.key_field()));
        }
    }

    for field in form.fields() {
        let hint = field.placeholder.as_deref().map(|p| format!(" (e.g. {p})")).unwrap_or_default();
        println!("{:<16} {:<9} {}{hint}", field.name, field.kind.as_str(), field.label);
        if field.kind == FieldKind::Select {
            for option in &field.options {
                println!("{:<16}   {} = {}", "", option.value, option.label);
            }
        }
    }
    Ok(())
}

async fn run_add(ctx: &mut CliContext, resource: ResourceKind, set: &[(String, String)]) -> Result<(), CliError> {
    let mut form = resource.add_form();
    for (name, raw) in set {
        form.set_field(name, raw);
    }

    let result = ctx
        .loading
        .with_loading("add", form.submit_to(&ctx.api), Some("Saving"))
        .await;
    let created = ctx
        .notices
        .record_result(result, &format!("{} added", capitalize(resource.singular())))?;
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}

async fn run_update(
    ctx: &mut CliContext,
    resource: ResourceKind,
    id: &str,
    set: &[(String, String)],
) -> Result<(), CliError> {
    let records = fetch_list(ctx, resource).await?;
    let mut form = resource.update_form(records);
    form.select(id)?;
    for (name, raw) in set {
        form.set_field(name, raw)?;
    }

    let result = ctx
        .loading
        .with_loading("update", form.submit(&ctx.api, &TracingNavigator), Some("Saving"))
        .await;
    if let Err(e) = &result {
        tracing::debug!(error = %e, message = ?form.error(), "update failed");
    }
    let saved = ctx
        .notices
        .record_result(result, &format!("{} updated", capitalize(resource.singular())))?;
    println!("{}", serde_json::to_string_pretty(&saved)?);
    Ok(())
}

async fn run_delete(ctx: &mut CliContext, resource: ResourceKind, id: &str) -> Result<(), CliError> {
    let view = resource.list_view(fetch_list(ctx, resource).await?);
    let Some(record) = view
        .records()
        .iter()
        .find(|record| record.key_text(view.key_field()).as_deref() == Some(id))
    else {
        return Err(CliError::NotFound { resource, id: id.to_owned() });
    };

    let result = ctx
        .loading
        .with_loading("delete", view.delete(&ctx.api, record), Some("Deleting"))
        .await;
    let label = record.label().unwrap_or_else(|| id.to_owned());
    ctx.notices.record_result(result, &format!("Deleted {resource} {label}"))?;
    Ok(())
}

fn flush_notices(notices: &mut Notices) {
    for notice in notices.drain() {
        match notice.level {
            NoticeLevel::Error => eprintln!("{notice}"),
            NoticeLevel::Success | NoticeLevel::Info => println!("{notice}"),
        }
    }
}

fn parse_assignment(raw: &str) -> Result<(String, String), CliError> {
    let (key, value) = raw.split_once('=').ok_or_else(|| CliError::InvalidAssignment(raw.to_owned()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidAssignment(raw.to_owned()));
    }
    Ok((key.to_owned(), value.to_owned()))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
