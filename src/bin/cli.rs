//! DomainKV CLI Client
//!
//! Command-line interface for interacting with DomainKV.

use clap::{Parser, Subcommand};
use domainkv::network::Client;
use domainkv::protocol::Command;

/// DomainKV CLI
#[derive(Parser, Debug)]
#[command(name = "domainkv-cli")]
#[command(about = "CLI for DomainKV key-value store")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create (or reset) a domain
    CreateDomain { domain: String },

    /// Set a string value
    Set { domain: String, key: String, value: String },

    /// Get a string value
    Get { domain: String, key: String },

    /// Increment an integer value
    Incr { domain: String, key: String },

    /// Decrement an integer value
    Decr { domain: String, key: String },

    /// Insert into a skip list index
    Insert {
        domain: String,
        index: String,
        key: String,
        value: String,
    },

    /// Delete a key from a skip list index
    Delete { domain: String, index: String, key: String },

    /// Delete an inclusive key range from a skip list index
    DeleteRange {
        domain: String,
        index: String,
        min_key: String,
        max_key: String,
    },

    /// Search a skip list index
    Search { domain: String, index: String, key: String },

    /// Count keys below `key` in a skip list index
    Rank { domain: String, index: String, key: String },
}

impl From<Commands> for Command {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::CreateDomain { domain } => Command::CreateDomain { domain },
            Commands::Set { domain, key, value } => Command::SetString { domain, key, value },
            Commands::Get { domain, key } => Command::GetString { domain, key },
            Commands::Incr { domain, key } => Command::Increment { domain, key },
            Commands::Decr { domain, key } => Command::Decrement { domain, key },
            Commands::Insert { domain, index, key, value } => {
                Command::InsertIndex { domain, index, key, value }
            }
            Commands::Delete { domain, index, key } => Command::DeleteIndex { domain, index, key },
            Commands::DeleteRange { domain, index, min_key, max_key } => {
                Command::DeleteRangeIndex { domain, index, min_key, max_key }
            }
            Commands::Search { domain, index, key } => Command::SearchIndex { domain, index, key },
            Commands::Rank { domain, index, key } => Command::RankIndex { domain, index, key },
        }
    }
}

fn main() {
    let args = Args::parse();

    let mut client = match Client::connect(&args.server) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to connect to {}: {}", args.server, e);
            std::process::exit(1);
        }
    };

    match client.execute(args.command.into()) {
        Ok(response) if response.is_success() => match response.value {
            Some(value) => println!("{value}"),
            None => println!("OK"),
        },
        Ok(response) => {
            eprintln!("(error) {}", response.message.unwrap_or_default());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            std::process::exit(1);
        }
    }
}
