use anyhow::Result;
use bitlet::areas::repository::Repository;
use bitlet::artifacts::core::errors::{StateError, UsageError};
use bitlet::artifacts::core::pager::{PagerWriter, should_page};
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bitlet",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A tiny version-control system",
    long_about = "Bitlet snapshots the files of a single flat directory into commits, \
    with branches, checkout, reset and three-way merge. \
    Repository state lives in the .bitlet directory of the working directory.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path, \
        with a single root commit on the master branch."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stages the current content of the given files. \
        A file whose content matches the current commit is unstaged instead."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The files to stage")]
        files: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the staged changes as a new commit on the current branch."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file or stage it for removal",
        long_about = "This command unstages a staged file. If the file is tracked by the current commit, \
        it is also staged for removal and deleted from the working directory."
    )]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(
        name = "log",
        about = "Show the history of the current commit",
        long_about = "This command shows the current commit and its first-parent ancestors, back to the root commit."
    )]
    Log,
    #[command(
        name = "global-log",
        about = "Show every commit ever made",
        long_about = "This command shows every commit in the object store, reachable or not, newest first."
    )]
    GlobalLog,
    #[command(
        name = "find",
        about = "Print the IDs of the commits with the given message"
    )]
    Find {
        #[arg(index = 1, help = "The exact commit message")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show the working tree status",
        long_about = "This command shows the branches, the staged files and removals, \
        the unstaged modifications and the untracked files."
    )]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "Use `checkout -- <file>` to restore a file from the current commit, \
        `checkout <commit> -- <file>` to restore it from any commit, \
        and `checkout <branch>` to switch to another branch."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to, or the commit to restore from")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(
        name = "branch",
        about = "Create a new branch at the current commit"
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch")]
        name: String,
    },
    #[command(
        name = "rm-branch",
        about = "Delete a branch",
        long_about = "This command deletes a branch pointer. Commits made on the branch are kept."
    )]
    RmBranch {
        #[arg(index = 1, help = "The name of the branch")]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Move the current branch to a commit",
        long_about = "This command checks out every file of the given commit, \
        removes the files it does not track and moves the current branch to it."
    )]
    Reset {
        #[arg(index = 1, help = "The commit ID or an unambiguous prefix of it")]
        commit: String,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into the current branch",
        long_about = "This command merges the tip of the given branch into the current branch, \
        fast-forwarding when possible and writing conflict markers when both sides changed a file."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
    #[command(
        name = "mergebase",
        about = "Print the split point of the current branch and another branch"
    )]
    Mergebase {
        #[arg(index = 1, help = "The other branch")]
        branch: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database",
        long_about = "This command hashes a file as a blob and can write it to the object database. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the content of an object in the repository. \
        It requires the ID of the object, or an unambiguous prefix of it, to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object ID to print")]
        sha: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(err),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// User mistakes exit with 1, everything else is reported as fatal
fn report(err: anyhow::Error) -> ExitCode {
    if let Some(usage_error) = err.downcast_ref::<UsageError>() {
        eprintln!("{usage_error}");
        return ExitCode::from(1);
    }

    if let Some(state_error) = err.downcast_ref::<StateError>() {
        eprintln!("{state_error}");
        return ExitCode::from(1);
    }

    eprintln!("fatal: {err:#}");
    ExitCode::from(128)
}

fn open_repository(writer: Box<dyn std::io::Write>) -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    let repository = Repository::new(&pwd.to_string_lossy(), writer)?;

    repository.ensure_initialized()?;

    Ok(repository)
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
                }
            };

            repository.init().await?
        }
        Commands::Add { files } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.add(files).await?
        }
        Commands::Commit { message } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.commit(message.as_str()).await?
        }
        Commands::Rm { file } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.rm(file).await?
        }
        Commands::Log | Commands::GlobalLog => {
            let global = matches!(cli.command, Commands::GlobalLog);

            if should_page() {
                let pager = Pager::new();
                let repository = open_repository(Box::new(PagerWriter::new(pager.clone())))?;

                if global {
                    repository.global_log()?
                } else {
                    repository.log()?
                }
                minus::page_all(pager)?
            } else {
                let repository = open_repository(Box::new(std::io::stdout()))?;

                if global {
                    repository.global_log()?
                } else {
                    repository.log()?
                }
            }
        }
        Commands::Find { message } => {
            let repository = open_repository(Box::new(std::io::stdout()))?;

            repository.find(message)?
        }
        Commands::Status => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.status().await?
        }
        Commands::Checkout { target, file } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            match (target, file) {
                (revision, Some(file)) => {
                    repository.checkout_file(revision.as_deref(), file).await?
                }
                (Some(branch), None) => repository.checkout_branch(branch).await?,
                (None, None) => return Err(UsageError::IncorrectOperands.into()),
            }
        }
        Commands::Branch { name } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.branch(name)?
        }
        Commands::RmBranch { name } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.rm_branch(name)?
        }
        Commands::Reset { commit } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.reset(commit).await?
        }
        Commands::Merge { branch } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.merge(branch).await?;
        }
        Commands::Mergebase { branch } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.mergebase(branch)?
        }
        Commands::HashObject { write, file } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.hash_object(file, *write)?
        }
        Commands::CatFile { sha } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.cat_file(sha)?
        }
    }

    Ok(())
}
