use clap::{Args, Parser, Subcommand};
use foranki_http::config::{API_URL_ENV, DEFAULT_API_URL};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "foranki", version, about = "forAnki card manager (CLI/TUI)")]
pub struct Cli {
    /// Base URL of the card API
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Card operations
    #[command(subcommand)]
    Cards(CardsCmd),
    /// Ask the AI for a new card
    Generate(GenerateCmd),
    /// Rewrite an existing card with the AI
    Modify(ModifyCmd),
    /// Export cards
    #[command(subcommand)]
    Export(ExportCmd),
    /// Launch Terminal UI
    Tui,
}

#[derive(Debug, Subcommand, Clone)]
pub enum CardsCmd {
    List(ListArgs),
    /// Print every tag in use
    Tags,
    Add(CardAdd),
    Edit(CardEdit),
    Rm { card_id: i64 },
}

#[derive(Debug, Args, Clone, Default)]
pub struct ListArgs {
    /// Only cards carrying all of these tags
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long)]
    pub deck: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct CardAdd {
    #[arg(long)]
    pub front: String,
    #[arg(long)]
    pub back: String,
    #[arg(long, default_value = "")]
    pub deck: String,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct CardEdit {
    pub card_id: i64,
    #[arg(long)]
    pub front: Option<String>,
    #[arg(long)]
    pub back: Option<String>,
    /// Comma separated, replaces the card's tags
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct GenerateCmd {
    pub prompt: String,
    /// Create the generated card right away
    #[arg(long)]
    pub add: bool,
    #[arg(long, default_value = "")]
    pub deck: String,
}

#[derive(Debug, Args, Clone)]
pub struct ModifyCmd {
    pub card_id: i64,
    #[arg(long)]
    pub instruction: String,
    /// Save the modified card
    #[arg(long)]
    pub save: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum ExportCmd {
    Json {
        path: PathBuf,
        #[command(flatten)]
        filter: ListArgs,
    },
    Csv {
        path: PathBuf,
        #[command(flatten)]
        filter: ListArgs,
    },
}
