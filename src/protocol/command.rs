//! Command definitions
//!
//! Typed operations parsed from client requests.

use crate::error::KvError;
use super::Request;

/// Action names as they appear on the wire
pub mod action {
    pub const CREATE_DOMAIN: &str = "create_domain";
    pub const SET_STRING: &str = "set_string";
    pub const GET_STRING: &str = "get_string";
    pub const INCREMENT: &str = "increment";
    pub const DECREMENT: &str = "decrement";
    pub const INSERT_SKIPLIST: &str = "insert_skiplist";
    pub const DELETE_SKIPLIST: &str = "delete_skiplist";
    pub const DELETE_RANGE_SKIPLIST: &str = "delete_range_skiplist";
    pub const SEARCH_SKIPLIST: &str = "search_skiplist";
    pub const RANK_SKIPLIST: &str = "rank_skiplist";
}

/// A parsed command
///
/// Index keys stay as strings here; the store validates them so that a bad
/// key is reported the same way whichever transport delivered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateDomain { domain: String },

    SetString { domain: String, key: String, value: String },

    GetString { domain: String, key: String },

    Increment { domain: String, key: String },

    Decrement { domain: String, key: String },

    InsertIndex { domain: String, index: String, key: String, value: String },

    DeleteIndex { domain: String, index: String, key: String },

    /// Inclusive on both ends
    DeleteRangeIndex { domain: String, index: String, min_key: String, max_key: String },

    SearchIndex { domain: String, index: String, key: String },

    RankIndex { domain: String, index: String, key: String },
}

impl Command {
    /// Get the wire action name
    pub fn action(&self) -> &'static str {
        match self {
            Command::CreateDomain { .. } => action::CREATE_DOMAIN,
            Command::SetString { .. } => action::SET_STRING,
            Command::GetString { .. } => action::GET_STRING,
            Command::Increment { .. } => action::INCREMENT,
            Command::Decrement { .. } => action::DECREMENT,
            Command::InsertIndex { .. } => action::INSERT_SKIPLIST,
            Command::DeleteIndex { .. } => action::DELETE_SKIPLIST,
            Command::DeleteRangeIndex { .. } => action::DELETE_RANGE_SKIPLIST,
            Command::SearchIndex { .. } => action::SEARCH_SKIPLIST,
            Command::RankIndex { .. } => action::RANK_SKIPLIST,
        }
    }

    /// Build the wire request for this command
    pub fn into_request(self) -> Request {
        let mut req = Request::new(self.action());
        match self {
            Command::CreateDomain { domain } => {
                req.domain = domain;
            }
            Command::SetString { domain, key, value } => {
                req.domain = domain;
                req.key = key;
                req.value = value;
            }
            Command::GetString { domain, key }
            | Command::Increment { domain, key }
            | Command::Decrement { domain, key } => {
                req.domain = domain;
                req.key = key;
            }
            Command::InsertIndex { domain, index, key, value } => {
                req.domain = domain;
                req.slkey = index;
                req.key = key;
                req.value = value;
            }
            Command::DeleteIndex { domain, index, key }
            | Command::SearchIndex { domain, index, key }
            | Command::RankIndex { domain, index, key } => {
                req.domain = domain;
                req.slkey = index;
                req.key = key;
            }
            Command::DeleteRangeIndex { domain, index, min_key, max_key } => {
                req.domain = domain;
                req.slkey = index;
                req.min_key = min_key;
                req.max_key = max_key;
            }
        }
        req
    }
}

impl TryFrom<Request> for Command {
    type Error = KvError;

    fn try_from(req: Request) -> Result<Self, Self::Error> {
        let Request { action: name, domain, key, slkey: index, value, min_key, max_key } = req;

        let command = match name.as_str() {
            action::CREATE_DOMAIN => Command::CreateDomain { domain },
            action::SET_STRING => Command::SetString { domain, key, value },
            action::GET_STRING => Command::GetString { domain, key },
            action::INCREMENT => Command::Increment { domain, key },
            action::DECREMENT => Command::Decrement { domain, key },
            action::INSERT_SKIPLIST => Command::InsertIndex { domain, index, key, value },
            action::DELETE_SKIPLIST => Command::DeleteIndex { domain, index, key },
            action::DELETE_RANGE_SKIPLIST => {
                Command::DeleteRangeIndex { domain, index, min_key, max_key }
            }
            action::SEARCH_SKIPLIST => Command::SearchIndex { domain, index, key },
            action::RANK_SKIPLIST => Command::RankIndex { domain, index, key },
            _ => return Err(KvError::UnknownAction(name.clone())),
        };
        Ok(command)
    }
}
