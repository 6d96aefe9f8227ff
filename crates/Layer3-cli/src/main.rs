//! NameTree CLI - Main entry point

mod render;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use nametree_core::{
    parse_descriptors, parse_name, BatchSummary, Bootstrap, Initializer, LdapDirContextFactory,
    LdapDirContextInitializer, PayloadLoader, PropertiesFilePayload, PropertiesInitializer,
    StringInitializer, StringPayload,
};
use nametree_foundation::{FileDirectory, NameTreeConfig, NamingContext};
use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// NameTree - bootstrap values into a hierarchical naming tree
#[derive(Parser, Debug)]
#[command(name = "nametree")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Directory file (overrides config and NAMETREE_DIRECTORY)
    #[arg(long, global = true)]
    directory: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Keep binding remaining entries after a failure
    #[arg(short, long, global = true)]
    keep_going: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bind string values (NAME=VALUE)
    String {
        #[arg(required = true, value_name = "NAME=VALUE")]
        entries: Vec<String>,
    },
    /// Bind property sets loaded from files (NAME=FILE)
    Properties {
        #[arg(required = true, value_name = "NAME=FILE")]
        entries: Vec<String>,
    },
    /// Bind deferred LDAP connections from property files (NAME=FILE)
    Ldap {
        #[arg(required = true, value_name = "NAME=FILE")]
        entries: Vec<String>,
    },
    /// Look up a name, constructing referenced objects
    Lookup { name: String },
    /// Print the directory tree
    Tree,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// 명령 실행 (실패 항목이 있으면 false)
async fn run(args: Args) -> anyhow::Result<bool> {
    let config = NameTreeConfig::load().context("Failed to load configuration")?;
    let path = match args.directory {
        Some(path) => path,
        None => config.effective_directory()?,
    };
    debug!("Using directory {}", path.display());

    let directory = Arc::new(
        FileDirectory::open(&path)
            .with_context(|| format!("Failed to open directory {}", path.display()))?,
    );
    directory
        .register_factory(Arc::new(LdapDirContextFactory::from_settings(&config.ldap)))
        .await;

    let bootstrap =
        Bootstrap::new().continue_on_error(args.keep_going || config.effective_continue_on_error());

    match args.command {
        Command::String { entries } => {
            let initializer = StringInitializer::new(directory.clone());
            bind_all(&directory, &bootstrap, &initializer, &entries, &StringPayload).await
        }
        Command::Properties { entries } => {
            let initializer = PropertiesInitializer::new(directory.clone());
            bind_all(&directory, &bootstrap, &initializer, &entries, &PropertiesFilePayload).await
        }
        Command::Ldap { entries } => {
            let initializer = LdapDirContextInitializer::new(directory.clone());
            bind_all(&directory, &bootstrap, &initializer, &entries, &PropertiesFilePayload).await
        }
        Command::Lookup { name } => {
            let name = parse_name(directory.name_parser(), &name)?;
            let resolved = directory.lookup_object(&name).await?;
            println!("{} = {}", name, render::render_resolved(resolved));
            Ok(true)
        }
        Command::Tree => {
            print!("{}", render::render_tree(&directory.snapshot().await));
            Ok(true)
        }
    }
}

async fn bind_all<L, I>(
    directory: &FileDirectory,
    bootstrap: &Bootstrap,
    initializer: &I,
    entries: &[String],
    loader: &L,
) -> anyhow::Result<bool>
where
    L: PayloadLoader,
    L::Value: Display + Send + Sync,
    I: Initializer<L::Value>,
{
    let descriptors = parse_descriptors(directory.name_parser(), entries, loader)?;
    let summary = bootstrap.run(initializer, &descriptors).await?;
    report(&summary);
    Ok(summary.is_success())
}

fn report(summary: &BatchSummary) {
    for failure in &summary.failed {
        eprintln!("failed: {}: {}", failure.descriptor, failure.error);
    }
    println!("{}/{} bound", summary.succeeded, summary.total());
}
