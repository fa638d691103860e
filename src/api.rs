// API client module: a small blocking HTTP client for the read-only Trello
// endpoints we need. Every call is one GET with the key/token pair in the
// query string; responses are JSON arrays decoded into `model` records.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::model::{self, Board, Card, List};

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

const BOARDS_ENDPOINT: &str = "/members/me/boards";
const LISTS_ENDPOINT: &str = "/boards/{id}/lists";
const CARDS_ENDPOINT: &str = "/lists/{id}/cards";

/// Credentials plus the API root every endpoint is resolved against.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub key: String,
    pub token: String,
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(key: impl Into<String>, token: impl Into<String>) -> Self {
        ApiConfig {
            key: key.into(),
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another API root (a proxy, or a mock server in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Holds the reqwest blocking client and the configuration shared by the
/// resource clients below.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        ApiClient {
            client: Client::new(),
            config,
        }
    }

    /// GET `path` and decode the JSON array body element by element. The
    /// first element that does not fit `T` fails the whole call.
    pub fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = format!("{}{}", self.config.base_url, path);
        tracing::debug!(path, "GET");

        let res = self
            .client
            .get(&url)
            .query(&[
                ("key", self.config.key.as_str()),
                ("token", self.config.token.as_str()),
            ])
            .send()?;

        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().unwrap_or_default();
            tracing::warn!(path, status = status.as_u16(), "API request rejected");
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = res.text()?;
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&body).map_err(Error::Malformed)?;

        let records = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                serde_json::from_value(entry).map_err(|source| Error::Decode { index, source })
            })
            .collect::<Result<Vec<T>>>()?;

        tracing::debug!(path, count = records.len(), "decoded response");
        Ok(records)
    }
}

fn endpoint(template: &str, id: &str) -> String {
    template.replace("{id}", id)
}

/// Boards the authenticated member belongs to.
pub struct Boards {
    api: ApiClient,
}

impl Boards {
    pub fn new(config: ApiConfig) -> Self {
        Boards {
            api: ApiClient::new(config),
        }
    }

    pub fn list(&self) -> Result<Vec<Board>> {
        self.api.get_list(BOARDS_ENDPOINT)
    }
}

pub struct Lists {
    api: ApiClient,
}

impl Lists {
    pub fn new(config: ApiConfig) -> Self {
        Lists {
            api: ApiClient::new(config),
        }
    }

    pub fn list_by_board_id(&self, board_id: &str) -> Result<Vec<List>> {
        self.api.get_list(&endpoint(LISTS_ENDPOINT, board_id))
    }
}

pub struct Cards {
    api: ApiClient,
}

impl Cards {
    pub fn new(config: ApiConfig) -> Self {
        Cards {
            api: ApiClient::new(config),
        }
    }

    /// Cards of a list, optionally restricted to those carrying a label
    /// named exactly `label`. An empty label does not filter.
    pub fn list(&self, list_id: &str, label: Option<&str>) -> Result<Vec<Card>> {
        let cards: Vec<Card> = self.api.get_list(&endpoint(CARDS_ENDPOINT, list_id))?;
        Ok(match label.filter(|l| !l.is_empty()) {
            Some(label) => model::filter_by_label(cards, label),
            None => cards,
        })
    }
}
