//! Command-line interface.

pub mod account;
pub mod alias;
pub mod browse;
pub mod categories;
pub mod clipboard;
pub mod completions;
pub mod items;
pub mod output;
pub mod prompt;
pub mod run;
pub mod share;
pub mod users;

use clap::{Parser, Subcommand};

/// pnut - a shared, encrypted stash for the commands you keep forgetting.
#[derive(Parser)]
#[command(
    name = "pnut",
    about = "A shared, end-to-end encrypted stash for command line snippets",
    version,
    after_help = "Stash it, share it, run it. 🥜"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create an account (a verification link is mailed to you)
    Register {
        /// Account email
        email: String,
    },

    /// Log in and cache the session on this machine
    Login {
        /// Account email
        email: String,
    },

    /// Forget the cached session
    Logout,

    /// Change your password
    Reset,

    /// Show, set or reset the server (a firebase.json file, or "default")
    Server {
        /// Path to a server JSON record, or "default" for the local emulator
        source: Option<String>,
    },

    /// Show the logged-in account
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the users you can share with
    Users {
        #[command(subcommand)]
        action: Option<UsersAction>,
    },

    /// Stash text (prompted, or read from stdin, when no words are given)
    Stash {
        /// Text to stash
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
        /// Category label
        #[arg(short, long)]
        category: Option<String>,
        /// Encrypted note shown alongside the text
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List stashed items, newest first (imports shared items first)
    #[command(alias = "ls")]
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long, conflicts_with = "interactive")]
        json: bool,
        /// Browse with a paged menu
        #[arg(short, long)]
        interactive: bool,
    },

    /// Print the newest item
    Pop {
        /// Copy it to the clipboard instead of printing it
        #[arg(long)]
        copy: bool,
    },

    /// Show one item in full
    Show {
        /// Item key
        #[arg(allow_hyphen_values = true)]
        key: String,
    },

    /// Change an item's text, note or category
    Edit {
        /// Item key
        #[arg(allow_hyphen_values = true)]
        key: String,
        /// New text
        #[arg(short, long)]
        text: Option<String>,
        /// New note ("" removes it)
        #[arg(short, long)]
        note: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete an item (and its alias)
    Rm {
        /// Item key
        #[arg(allow_hyphen_values = true)]
        key: String,
    },

    /// Send an item to another user
    Share {
        /// Item key
        #[arg(allow_hyphen_values = true)]
        key: String,
        /// Recipient email (must be in your users)
        recipient: String,
    },

    /// Import items shared with you
    Inbox,

    /// Manage category labels
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Name items and run them with arguments
    Alias {
        #[command(subcommand)]
        action: AliasAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Users subcommands.
#[derive(Subcommand)]
pub enum UsersAction {
    /// Allow sharing with a user
    Add {
        /// User email
        email: String,
    },

    /// Stop sharing with a user
    Rm {
        /// User email
        email: String,
    },

    /// List users
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Categories subcommands.
#[derive(Subcommand)]
pub enum CategoriesAction {
    /// Add a category label
    Add {
        /// Category name
        name: String,
    },

    /// Delete a category label (items keep their category)
    Rm {
        /// Category key
        #[arg(allow_hyphen_values = true)]
        key: String,
    },

    /// List category labels
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Alias subcommands.
#[derive(Subcommand)]
pub enum AliasAction {
    /// Name an item
    Add {
        /// Item key
        #[arg(allow_hyphen_values = true)]
        key: String,
        /// Alias name
        name: String,
    },

    /// Remove an item's alias
    Rm {
        /// Item key
        #[arg(allow_hyphen_values = true)]
        key: String,
    },

    /// List aliases
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fill ${...} placeholders with arguments and run the result
    Run {
        /// Alias name
        name: String,
        /// Values for the placeholders, in order
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
        /// Print the command instead of running it
        #[arg(long)]
        dry_run: bool,
    },
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Register { email } => account::register(&email),
        Login { email } => account::login(&email),
        Logout => account::logout(),
        Reset => account::reset(),
        Server { source } => account::server(source.as_deref()),
        Whoami { json } => account::whoami(json),
        Users { action } => match action.unwrap_or(UsersAction::List { json: false }) {
            UsersAction::Add { email } => users::add(&email),
            UsersAction::Rm { email } => users::rm(&email),
            UsersAction::List { json } => users::list(json),
        },
        Stash {
            text,
            category,
            note,
        } => items::stash(&text, category.as_deref(), note.as_deref()),
        List {
            category,
            json,
            interactive,
        } => items::list(category.as_deref(), json, interactive),
        Pop { copy } => items::pop(copy),
        Show { key } => items::show(&key),
        Edit {
            key,
            text,
            note,
            category,
        } => items::edit(&key, text, note, category),
        Rm { key } => items::rm(&key),
        Share { key, recipient } => share::share(&key, &recipient),
        Inbox => share::inbox(),
        Categories { action } => match action.unwrap_or(CategoriesAction::List { json: false }) {
            CategoriesAction::Add { name } => categories::add(&name),
            CategoriesAction::Rm { key } => categories::rm(&key),
            CategoriesAction::List { json } => categories::list(json),
        },
        Alias { action } => match action {
            AliasAction::Add { key, name } => alias::add(&key, &name),
            AliasAction::Rm { key } => alias::rm(&key),
            AliasAction::List { json } => alias::list(json),
            AliasAction::Run {
                name,
                args,
                dry_run,
            } => run::execute(&name, &args, dry_run),
        },
        Completions { shell } => completions::execute(shell),
    }
}
