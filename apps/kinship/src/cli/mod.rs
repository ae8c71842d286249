//! # Kinship CLI Module
//!
//! This module implements the CLI interface for Kinship.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server over the loaded tree
//! - `generations` - Print the generation layout
//! - `show` - Print one person with resolved relatives
//! - `audit` - Print link issues
//! - `status` - Print family metrics
//! - `sample` - Write the sample family to a file
//! - `add-child` / `add-spouse` / `update` - Edit a tree file in place
//!
//! Without `--tree` (and without `[tree] file` in the config), read commands
//! work on the built-in sample family.

mod commands;

use crate::config::KinshipConfig;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use kinship_core::{Gender, KinshipError, PersonFields, PersonUpdate};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Kinship - Family Tree Server
///
/// Stores people linked by parent/child and spousal relationships and lays
/// them out generation by generation.
#[derive(Parser, Debug)]
#[command(name = "kinship")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the tree file (JSON snapshot)
    #[arg(short = 'T', long, global = true)]
    pub tree: Option<PathBuf>,

    /// Path to the configuration file (default: ./kinship.toml when present)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Person fields given on the command line.
#[derive(Args, Debug, Clone)]
pub struct PersonArgs {
    /// Full name
    #[arg(short, long)]
    pub name: String,

    /// male, female or other
    #[arg(short, long)]
    pub gender: Option<Gender>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub born: Option<NaiveDate>,

    /// Date of death (YYYY-MM-DD); marks the person deceased
    #[arg(long)]
    pub died: Option<NaiveDate>,

    #[arg(long)]
    pub occupation: Option<String>,

    #[arg(long)]
    pub bio: Option<String>,
}

impl From<PersonArgs> for PersonFields {
    fn from(args: PersonArgs) -> Self {
        Self {
            name: args.name,
            profile_picture: None,
            date_of_birth: args.born,
            date_of_death: args.died,
            is_deceased: args.died.is_some(),
            gender: args.gender.unwrap_or_default(),
            occupation: args.occupation,
            bio: args.bio,
        }
    }
}

/// Fields changed by `update`. Unset flags leave the field untouched.
#[derive(Args, Debug, Clone, Default)]
pub struct UpdateArgs {
    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long)]
    pub gender: Option<Gender>,

    #[arg(long)]
    pub born: Option<NaiveDate>,

    #[arg(long)]
    pub died: Option<NaiveDate>,

    /// Set or clear the deceased flag
    #[arg(long)]
    pub deceased: Option<bool>,

    #[arg(long)]
    pub occupation: Option<String>,

    #[arg(long)]
    pub bio: Option<String>,
}

impl From<UpdateArgs> for PersonUpdate {
    fn from(args: UpdateArgs) -> Self {
        Self {
            name: args.name,
            profile_picture: None,
            date_of_birth: args.born.map(Some),
            date_of_death: args.died.map(Some),
            is_deceased: args.deceased.or(args.died.map(|_| true)),
            gender: args.gender,
            occupation: args.occupation.map(Some),
            bio: args.bio.map(Some),
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (default from config, else 127.0.0.1)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (default from config, else 8080)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the generation layout
    Generations,

    /// Print one person with resolved spouse, parents and children
    Show {
        /// Person id
        id: String,
    },

    /// Print link issues
    Audit,

    /// Print family metrics
    Status,

    /// Write the sample family as a JSON snapshot
    Sample {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Add a child to the tree file
    AddChild {
        /// Parent id (repeat for two parents)
        #[arg(long = "parent", conflicts_with = "of")]
        parents: Vec<String>,

        /// Add as a child of this person and their spouse
        #[arg(long)]
        of: Option<String>,

        #[command(flatten)]
        person: PersonArgs,
    },

    /// Add a spouse to a person in the tree file
    AddSpouse {
        /// Person id
        id: String,

        #[command(flatten)]
        person: PersonArgs,
    },

    /// Update a person in the tree file
    Update {
        /// Person id
        id: String,

        #[command(flatten)]
        fields: UpdateArgs,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), KinshipError> {
    let config = KinshipConfig::resolve(cli.config.as_deref())?;
    let tree = cli.tree.or(config.tree.file);
    let tree = tree.as_deref();
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            cmd_server(tree, &host, port).await
        }
        Some(Commands::Generations) => cmd_generations(tree, json_mode),
        Some(Commands::Show { id }) => cmd_show(tree, json_mode, &id),
        Some(Commands::Audit) => cmd_audit(tree, json_mode),
        Some(Commands::Status) | None => cmd_status(tree, json_mode),
        Some(Commands::Sample { output }) => cmd_sample(&output),
        Some(Commands::AddChild {
            parents,
            of,
            person,
        }) => cmd_add_child(tree, json_mode, &parents, of.as_deref(), person.into()),
        Some(Commands::AddSpouse { id, person }) => {
            cmd_add_spouse(tree, json_mode, &id, person.into())
        }
        Some(Commands::Update { id, fields }) => cmd_update(tree, json_mode, &id, &fields.into()),
    }
}
