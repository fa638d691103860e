// Library root
// -----------
// A thin, read-only client for the Trello REST API plus the pieces the
// `trellokit` binary uses to print boards, lists and cards.
//
// Module responsibilities:
// - `model`: records decoded from API responses (Board, List, Label, Card).
// - `api`: blocking HTTP client and the Boards/Lists/Cards resource clients.
// - `ui`: card grouping and table rendering, `<id> <name>` line output.
// - `cli`: clap command definitions and the dispatcher used by `main.rs`.
// - `error`: the error type shared by all of the above.
pub mod api;
pub mod cli;
pub mod error;
pub mod model;
pub mod ui;

pub use api::{ApiClient, ApiConfig, Boards, Cards, Lists};
pub use error::{Error, Result};
pub use model::{Age, Badges, Board, Card, Label, List};
