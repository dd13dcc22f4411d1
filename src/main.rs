//! IntelliSQL - ask a SQLite database questions in plain English.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use intellisql::cli::Cli;
use intellisql::config::Config;
use intellisql::db::{
    ensure_schema, seed_if_empty, AccessPolicy, QueryExecutor, SchemaDescriptor, SeedOutcome,
    Store,
};
use intellisql::error::Result;
use intellisql::llm::{create_client, LlmProvider, Translator};
use intellisql::pipeline::QueryPipeline;
use intellisql::{render, repl};

#[tokio::main]
async fn main() {
    // Pick up GEMINI_API_KEY and friends from a local .env if present
    dotenvy::dotenv().ok();

    // Initialize logging; quiet by default so the REPL stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;

    // CLI flags take precedence over the config file
    if let Some(path) = &cli.database {
        config.database.path = path.clone();
    }
    if cli.read_only {
        config.database.read_only = true;
    }
    if let Some(provider) = &cli.llm {
        config.llm.provider = provider.clone();
    }
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }

    let store = Store::open(&config.database.path).await?;
    let schema = SchemaDescriptor::customers();
    ensure_schema(store.pool(), &schema).await?;
    let seeded = seed_if_empty(store.pool()).await?;

    if cli.setup {
        print_setup(&store, seeded).await?;
        store.close().await;
        return Ok(());
    }

    let provider: LlmProvider = config.llm.provider.parse()?;
    info!(
        "Using {} (model {}), read_only: {}",
        provider, config.llm.model, config.database.read_only
    );
    let client = create_client(provider, None, Some(config.llm.model.clone()))?;
    let translator = Translator::new(client, schema);

    let policy = if config.database.read_only {
        AccessPolicy::ReadOnly
    } else {
        AccessPolicy::Unrestricted
    };
    let executor = QueryExecutor::new(store.pool().clone()).with_policy(policy);

    let mut pipeline = QueryPipeline::new(translator, executor);

    let outcome = match &cli.question {
        Some(question) => ask_once(&mut pipeline, question).await,
        None => repl::run(&mut pipeline).await,
    };

    store.close().await;
    outcome
}

/// One-shot mode: answer a single question with plain, pipeable output.
async fn ask_once(pipeline: &mut QueryPipeline, question: &str) -> Result<()> {
    let sql = pipeline.translate(question).await?;
    println!("sql> {}", sql);

    let result = pipeline.execute_and_record(question, &sql).await?;
    println!("{}", render::render_table(&result));
    Ok(())
}

/// Setup mode: report the bootstrap outcome and show the demo table.
async fn print_setup(store: &Store, seeded: SeedOutcome) -> Result<()> {
    match seeded {
        SeedOutcome::Inserted => {
            println!("Created table 'customers' and seeded it with demo rows.")
        }
        SeedOutcome::AlreadyPopulated => println!("Table 'customers' is already populated."),
    }

    let executor = QueryExecutor::new(store.pool().clone());
    let result = executor.execute("SELECT * FROM customers").await?;
    println!("{}", render::render_table(&result));
    Ok(())
}
