use anyhow::Result;
use clap::{Parser, Subcommand};
use vit::areas::repository::Repository;
use vit::artifacts::core::UserError;

#[derive(Parser)]
#[command(
    name = "vit",
    version = "0.1.0",
    about = "A tiny local version-control system",
    long_about = "vit is a local, single-user version-control engine: \
    it snapshots a working directory's files over time, supports branching \
    and three-way merging, and reports differences between working, staged, \
    and committed state.",
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
    #[command(name = "init", about = "Initialize a new repository")]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(name = "commit", about = "Create a new commit with the specified message")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "rm", about = "Unstage a file, or mark it for removal")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message to search for")]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes, and untracked files")]
    Status,
    #[command(
        name = "checkout",
        about = "Check out a branch, or restore files from a commit",
        long_about = "Three forms are supported: `checkout <branch>` switches \
        branches, `checkout -- <file>` restores a file from the head commit, \
        and `checkout <commit-id> -- <file>` restores a file from an \
        arbitrary commit (abbreviated ids are accepted)."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name or commit id")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "File to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch pointing at the head commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "reset", about = "Move the current branch onto the given commit")]
    Reset {
        #[arg(index = 1, help = "Full or abbreviated commit id")]
        commit_id: String,
    },
    #[command(name = "merge", about = "Merge the given branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge in")]
        branch: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        // user-facing conditions are terminal but non-crashing: report the
        // single message and exit as a success
        match error.downcast_ref::<UserError>() {
            Some(user_error) => println!("{}", user_error),
            None => return Err(error),
        }
    }

    Ok(())
}

fn stdout() -> Box<dyn std::io::Write> {
    Box::new(std::io::stdout())
}

async fn run(cli: Cli) -> Result<()> {
    let pwd = std::env::current_dir()?;
    let pwd = pwd.to_string_lossy();

    match &cli.command {
        Commands::Init => {
            Repository::init(&pwd, stdout()).await?;
        }
        Commands::Add { file } => {
            let mut repository = Repository::load(&pwd, stdout())?;
            repository.add(file).await?;
            repository.save().await?;
        }
        Commands::Commit { message } => {
            let mut repository = Repository::load(&pwd, stdout())?;
            repository.commit(message).await?;
            repository.save().await?;
        }
        Commands::Rm { file } => {
            let mut repository = Repository::load(&pwd, stdout())?;
            repository.rm(file).await?;
            repository.save().await?;
        }
        Commands::Log => {
            Repository::load(&pwd, stdout())?.log()?;
        }
        Commands::GlobalLog => {
            Repository::load(&pwd, stdout())?.global_log()?;
        }
        Commands::Find { message } => {
            Repository::load(&pwd, stdout())?.find(message)?;
        }
        Commands::Status => {
            let mut repository = Repository::load(&pwd, stdout())?;
            repository.status().await?;
        }
        Commands::Checkout { target, file } => {
            let mut repository = Repository::load(&pwd, stdout())?;
            match (target, file) {
                (Some(branch), None) => repository.checkout_branch(branch).await?,
                (None, Some(file)) => repository.checkout_head_file(file)?,
                (Some(commit_id), Some(file)) => {
                    repository.checkout_commit_file(commit_id, file)?
                }
                (None, None) => return Err(UserError::IncorrectOperands.into()),
            }
            repository.save().await?;
        }
        Commands::Branch { name } => {
            let mut repository = Repository::load(&pwd, stdout())?;
            repository.branch(name)?;
            repository.save().await?;
        }
        Commands::RmBranch { name } => {
            let mut repository = Repository::load(&pwd, stdout())?;
            repository.remove_branch(name)?;
            repository.save().await?;
        }
        Commands::Reset { commit_id } => {
            let mut repository = Repository::load(&pwd, stdout())?;
            repository.reset(commit_id).await?;
            repository.save().await?;
        }
        Commands::Merge { branch } => {
            let mut repository = Repository::load(&pwd, stdout())?;
            repository.merge(branch).await?;
            repository.save().await?;
        }
    }

    Ok(())
}
