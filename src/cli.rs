//! The `bear` command line.

use crate::app::App;
use crate::constants::limits::TAG_LINE_WIDTH;
use crate::errors::BearError;
use crate::managers::bear::{
    AddFileArgs, AddTextArgs, CreateArgs, GrabUrlArgs, OpenNoteArgs, SearchArgs,
};
use crate::services::logger::LogLevel;
use crate::services::response::Reply;
use crate::services::settings::Settings;
use crate::utils::user_paths::app_bundle;
use base64::Engine;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "bear",
    version,
    about = "Drive the Bear notes app through its x-callback-url API"
)]
pub struct Cli {
    /// Path to the xcall helper executable.
    #[arg(long, global = true, value_name = "PATH")]
    pub xcall: Option<PathBuf>,

    /// File holding the application token.
    #[arg(long, global = true, value_name = "PATH")]
    pub token_file: Option<PathBuf>,

    /// Give up on a helper call after this many milliseconds.
    #[arg(long, global = true, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Log every callback to stderr.
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// A note picked by title or id; exactly one is required.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct NoteTarget {
    #[arg(short = 't', long)]
    pub title: Option<String>,

    #[arg(short = 'i', long = "id", value_name = "NOTE_ID")]
    pub id: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clear the quarantine flag so macOS lets xcall run.
    Permit,
    /// Print a sample tags URL carrying the token.
    #[command(alias = "sample_url")]
    SampleUrl,
    /// Print the token.
    Token,
    /// Count tags, listing them with -v.
    Tags {
        #[arg(short = 'v', long)]
        verbose: bool,
    },
    RenameTag {
        old: String,
        new: String,
    },
    DeleteTag {
        name: String,
    },
    OpenTag {
        name: String,
    },
    /// Move a note to the trash; a title is sent as a search term.
    Trash {
        #[command(flatten)]
        target: NoteTarget,
    },
    /// Move a note to the archive; a title is sent as a search term.
    Archive {
        #[command(flatten)]
        target: NoteTarget,
    },
    /// Print a note's text.
    OpenNote {
        #[command(flatten)]
        target: NoteTarget,
    },
    /// Create a note and print its identifier.
    Create {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        text: Option<String>,
        /// Comma separated tag names.
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        pin: bool,
    },
    AddText {
        #[command(flatten)]
        target: NoteTarget,
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        header: Option<String>,
        text: String,
    },
    /// Attach a local file to a note.
    AddFile {
        #[command(flatten)]
        target: NoteTarget,
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        header: Option<String>,
        path: PathBuf,
    },
    Search {
        #[arg(long)]
        term: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },
    Today {
        #[arg(long)]
        search: Option<String>,
    },
    Todo {
        #[arg(long)]
        search: Option<String>,
    },
    Untagged {
        #[arg(long)]
        search: Option<String>,
    },
    GrabUrl {
        url: String,
        #[arg(long)]
        tags: Option<String>,
    },
    ChangeFont {
        font: String,
    },
    ChangeTheme {
        theme: String,
    },
    HasTag {
        id: String,
        tag: String,
    },
    /// Add a tag to a note unless it is already there.
    IdempAdd {
        id: String,
        tag: String,
    },
    /// Send a hand-written bear:// URL.
    RawUrl {
        url: String,
    },
}

/// Tag names laid out in padded columns, wrapping once a line passes the
/// line width.
pub fn tag_columns(names: &[String]) -> Vec<String> {
    let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0) + 1;
    let mut lines = Vec::new();
    let mut line = String::new();
    for name in names {
        line.push_str(&format!("{:width$}", name, width = width));
        if line.chars().count() > TAG_LINE_WIDTH {
            lines.push(std::mem::take(&mut line));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn print_reply(reply: Reply) -> Result<(), BearError> {
    if reply.is_empty() {
        return Ok(());
    }
    let rendered = serde_json::to_string_pretty(&reply.into_value())?;
    println!("{}", rendered);
    Ok(())
}

fn split_target(target: NoteTarget) -> (Option<String>, Option<String>) {
    (target.id, target.title)
}

async fn permit(app: &App) -> Result<(), BearError> {
    let bundle = app_bundle(&app.settings.xcall_path)
        .unwrap_or_else(|| app.settings.xcall_path.clone());
    println!("xattr -dr com.apple.quarantine \"{}\"", bundle.display());
    let status = tokio::process::Command::new("xattr")
        .arg("-dr")
        .arg("com.apple.quarantine")
        .arg(&bundle)
        .status()
        .await
        .map_err(|err| BearError::process(format!("Failed to run xattr: {}", err)))?;
    if !status.success() {
        return Err(BearError::process(format!(
            "xattr exited with status {}",
            status.code().unwrap_or(-1)
        )));
    }
    app.logger.info("quarantine cleared", None);
    Ok(())
}

async fn execute(app: &App, command: Command) -> Result<(), BearError> {
    let client = &app.client;
    match command {
        Command::Permit => permit(app).await,
        Command::SampleUrl => {
            println!("{}", client.sample_url().await?);
            Ok(())
        }
        Command::Token => {
            println!("{}", client.token().await?);
            Ok(())
        }
        Command::Tags { verbose } => {
            let names = client.tags().await?;
            if verbose {
                for line in tag_columns(&names) {
                    println!("{}", line);
                }
            }
            println!("{} tags found", names.len());
            Ok(())
        }
        Command::RenameTag { old, new } => print_reply(client.rename_tag(&old, &new).await?),
        Command::DeleteTag { name } => print_reply(client.delete_tag(&name).await?),
        Command::OpenTag { name } => print_reply(client.open_tag(&name).await?),
        Command::Trash { target } => {
            let (id, title) = split_target(target);
            print_reply(client.trash(id.as_deref(), title.as_deref()).await?)
        }
        Command::Archive { target } => {
            let (id, title) = split_target(target);
            print_reply(client.archive(id.as_deref(), title.as_deref()).await?)
        }
        Command::OpenNote { target } => {
            let (id, title) = split_target(target);
            let reply = client
                .open_note(OpenNoteArgs {
                    id,
                    title,
                    ..OpenNoteArgs::default()
                })
                .await?;
            match reply.note_text() {
                Some(text) => {
                    println!("{}", text);
                    Ok(())
                }
                None => print_reply(reply),
            }
        }
        Command::Create {
            title,
            text,
            tags,
            pin,
        } => {
            let reply = client
                .create(CreateArgs {
                    title,
                    text,
                    tags,
                    pin: pin.then(|| "yes".to_string()),
                    ..CreateArgs::default()
                })
                .await?;
            match reply.field("identifier").and_then(|v| v.as_str()) {
                Some(identifier) => {
                    println!("{}", identifier);
                    Ok(())
                }
                None => print_reply(reply),
            }
        }
        Command::AddText {
            target,
            mode,
            tags,
            header,
            text,
        } => {
            let (id, title) = split_target(target);
            print_reply(
                client
                    .add_text(AddTextArgs {
                        id,
                        title,
                        text: Some(text),
                        header,
                        mode,
                        tags,
                    })
                    .await?,
            )
        }
        Command::AddFile {
            target,
            mode,
            header,
            path,
        } => {
            let bytes = tokio::fs::read(&path).await.map_err(|err| {
                BearError::validation(format!("Cannot read {}: {}", path.display(), err))
            })?;
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
            let (id, title) = split_target(target);
            print_reply(
                client
                    .add_file(AddFileArgs {
                        id,
                        title,
                        content: Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
                        header,
                        filename,
                        mode,
                    })
                    .await?,
            )
        }
        Command::Search { term, tag } => print_reply(
            client
                .search(SearchArgs {
                    term,
                    tag,
                    show_window: None,
                })
                .await?,
        ),
        Command::Today { search } => print_reply(client.today(search.as_deref()).await?),
        Command::Todo { search } => print_reply(client.todo(search.as_deref()).await?),
        Command::Untagged { search } => print_reply(client.untagged(search.as_deref()).await?),
        Command::GrabUrl { url, tags } => print_reply(
            client
                .grab_url(GrabUrlArgs {
                    url,
                    tags,
                    ..GrabUrlArgs::default()
                })
                .await?,
        ),
        Command::ChangeFont { font } => print_reply(client.change_font(&font).await?),
        Command::ChangeTheme { theme } => print_reply(client.change_theme(&theme).await?),
        Command::HasTag { id, tag } => {
            println!("{}", client.has_tag(&id, &tag).await?);
            Ok(())
        }
        Command::IdempAdd { id, tag } => {
            let changed = client.idemp_add(&id, &tag).await?;
            println!("{}", if changed { "added" } else { "already present" });
            Ok(())
        }
        Command::RawUrl { url } => print_reply(client.raw_url(&url).await?),
    }
}

/// `-d` wins, then the environment; otherwise only warnings reach stderr.
fn cli_log_level(debug: bool, env: Option<LogLevel>) -> LogLevel {
    if debug {
        LogLevel::Debug
    } else {
        env.unwrap_or(LogLevel::Warn)
    }
}

pub async fn run() -> Result<(), BearError> {
    let cli = Cli::parse();
    let settings = Settings::from_env().with_overrides(cli.xcall, cli.token_file, cli.timeout_ms);
    let level = cli_log_level(cli.debug, LogLevel::from_env());
    let app = App::initialize(settings, Some(level));
    execute(&app, cli.command).await
}
