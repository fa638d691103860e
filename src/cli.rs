// Command-line surface: clap definitions plus the dispatcher that maps each
// subcommand onto a resource client and prints the result.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use crate::api::{ApiConfig, Boards, Cards, Lists, DEFAULT_BASE_URL};
use crate::ui;

#[derive(Parser, Debug)]
#[command(name = "trellokit", version)]
#[command(about = "CLI tool and library to access the Trello API", long_about = None)]
pub struct Cli {
    /// Trello API key
    #[arg(long, env = "TRELLO_API_KEY", hide_env_values = true)]
    pub key: String,

    /// Trello API token
    #[arg(long, env = "TRELLO_API_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Root URL of the Trello REST API
    #[arg(long, env = "TRELLO_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Boards of the authenticated member
    #[command(subcommand)]
    Boards(BoardsCommand),

    /// Lists of a board
    #[command(subcommand)]
    Lists(ListsCommand),

    /// Cards of a list
    #[command(subcommand)]
    Cards(CardsCommand),
}

#[derive(Subcommand, Debug)]
pub enum BoardsCommand {
    /// Print `<id> <name>` for every board
    List,
}

#[derive(Subcommand, Debug)]
pub enum ListsCommand {
    /// Print `<id> <name>` for every list of a board
    List(ListsListArgs),
}

#[derive(Args, Debug)]
pub struct ListsListArgs {
    #[arg(long)]
    pub board_id: String,
}

#[derive(Subcommand, Debug)]
pub enum CardsCommand {
    /// Print the cards of a list, one table per label combination
    List(CardsListArgs),
}

#[derive(Args, Debug)]
pub struct CardsListArgs {
    #[arg(long)]
    pub list_id: String,

    /// Only show cards carrying a label with exactly this name
    #[arg(long)]
    pub label: Option<String>,
}

impl Cli {
    pub fn config(&self) -> ApiConfig {
        ApiConfig::new(&self.key, &self.token).with_base_url(&self.api_url)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let config = cli.config();

    match cli.command {
        Commands::Boards(BoardsCommand::List) => {
            let boards = ui::with_spinner("Fetching boards...", || Boards::new(config).list())
                .context("listing boards")?;
            print!(
                "{}",
                ui::format_entries(boards.iter().map(|b| (b.id.as_str(), b.name.as_str())))
            );
        }
        Commands::Lists(ListsCommand::List(args)) => {
            let lists = ui::with_spinner("Fetching lists...", || {
                Lists::new(config).list_by_board_id(&args.board_id)
            })
            .with_context(|| format!("listing lists of board {}", args.board_id))?;
            print!(
                "{}",
                ui::format_entries(lists.iter().map(|l| (l.id.as_str(), l.name.as_str())))
            );
        }
        Commands::Cards(CardsCommand::List(args)) => {
            let cards = ui::with_spinner("Fetching cards...", || {
                Cards::new(config).list(&args.list_id, args.label.as_deref())
            })
            .with_context(|| format!("listing cards of list {}", args.list_id))?;
            tracing::debug!(count = cards.len(), "rendering cards");

            let groups = ui::group_cards(&cards);
            let out = ui::render_groups(&groups, Utc::now(), ui::terminal_width())
                .context("rendering cards")?;
            print!("{out}");
        }
    }
    Ok(())
}
