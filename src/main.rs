use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use ragbridge_core::config::DEFAULT_CONFIG_PATH;
use ragbridge_core::{Config, build_tools, validate_credentials};
use ragbridge_tools::{
    DOCUMENT_INFO_TOOL_ID, PROMPT_TOOL_ID, RETRIEVAL_TOOL_ID, ToolCall, ToolDef, ToolMessage,
};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(name = "ragbridge")]
#[command(about = "Query a RAGFlow retrieval service and format results as prompt knowledge", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the configured service accepts the configured key
    Validate,
    /// Raw retrieval: chunks, document aggregations and total
    Retrieve {
        #[command(flatten)]
        query: QueryArgs,
        /// Candidate chunks considered for vector similarity
        #[arg(long)]
        top_k: Option<u32>,
        /// Enable keyword-based matching
        #[arg(long)]
        keyword: Option<bool>,
    },
    /// Retrieval formatted as knowledge blocks
    Prompt {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Format already retrieved chunks with document metadata
    DocumentInfo {
        /// JSON array of chunk objects
        #[arg(long)]
        chunks: Option<String>,
    },
    /// Print the tool definitions as JSON
    Tools {
        /// Print only the tool with this id
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Args, Debug)]
struct QueryArgs {
    #[arg(short, long, default_value = "")]
    question: String,
    /// Comma-separated dataset ids
    #[arg(short, long)]
    dataset_ids: Option<String>,
    /// Comma-separated document ids
    #[arg(long)]
    document_ids: Option<String>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    page_size: Option<u32>,
    #[arg(long)]
    similarity_threshold: Option<f64>,
    #[arg(long)]
    vector_similarity_weight: Option<f64>,
}

impl QueryArgs {
    fn into_params(self) -> HashMap<String, Value> {
        let mut params = HashMap::new();
        params.insert("question".to_owned(), Value::from(self.question));
        insert_opt(&mut params, "dataset_ids", self.dataset_ids);
        insert_opt(&mut params, "document_ids", self.document_ids);
        insert_opt(&mut params, "page", self.page);
        insert_opt(&mut params, "page_size", self.page_size);
        insert_opt(&mut params, "similarity_threshold", self.similarity_threshold);
        insert_opt(
            &mut params,
            "vector_similarity_weight",
            self.vector_similarity_weight,
        );
        params
    }
}

fn insert_opt<T: Into<Value>>(params: &mut HashMap<String, Value>, key: &str, value: Option<T>) {
    if let Some(v) = value {
        params.insert(key.to_owned(), v.into());
    }
}

fn resolve_config_path(cli: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli {
        return path;
    }
    if let Ok(path) = std::env::var("RAGBRIDGE_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_CONFIG_PATH)
}

fn init_subscriber() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_message(message: &ToolMessage) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(message).context("failed to serialize tool message")?;
    println!("{out}");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();
    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config);
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    let call = match cli.command {
        Command::Validate => {
            validate_credentials(&config.credentials, &config.client).await?;
            println!("Credentials valid");
            return Ok(());
        }
        Command::Tools { name } => {
            let registry = build_tools(&config)?.registry();
            let definitions = match name {
                Some(id) => registry
                    .find(&id)
                    .map(ToolDef::to_json)
                    .with_context(|| format!("unknown tool: {id}"))?,
                None => registry.to_json(),
            };
            let out = serde_json::to_string_pretty(&definitions)
                .context("failed to serialize tool definitions")?;
            println!("{out}");
            return Ok(());
        }
        Command::Retrieve {
            query,
            top_k,
            keyword,
        } => {
            let mut params = query.into_params();
            insert_opt(&mut params, "top_k", top_k);
            insert_opt(&mut params, "keyword", keyword);
            ToolCall::new(RETRIEVAL_TOOL_ID, params)
        }
        Command::Prompt { query } => ToolCall::new(PROMPT_TOOL_ID, query.into_params()),
        Command::DocumentInfo { chunks } => {
            let mut params = HashMap::new();
            insert_opt(&mut params, "chunks", chunks);
            ToolCall::new(DOCUMENT_INFO_TOOL_ID, params)
        }
    };

    let tools = build_tools(&config)?;
    let message = tools.invoke(&call).await;
    print_message(&message)
}
