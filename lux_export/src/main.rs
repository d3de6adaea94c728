//! CLI entry point for lux_export.
//! Usage: lux_export export project.json --quest "Tavern Talk" --out dist --zip

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use lux_data::validate_project;
use lux_export::{
    DEFAULT_WRAP_WIDTH, compile_quest, load_project, select_quest, write_archive, zip_archive,
};

#[derive(Parser)]
#[command(author, version, about = "Export LuxQuest dialogue projects for the LuxDialogues plugin.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile one quest and write its archive as a folder tree or zip.
    Export(ExportArgs),
    /// Report duplicate ids and dangling references in a project file.
    Check(CheckArgs),
    /// List the quests in a project file.
    List {
        /// Path to the editor's project JSON.
        project: PathBuf,
    },
}

#[derive(Args)]
struct ExportArgs {
    /// Path to the editor's project JSON.
    project: PathBuf,
    /// Quest to export, by id or exact title.
    #[arg(long)]
    quest: String,
    /// Output directory for the archive.
    #[arg(long, default_value = "export")]
    out: PathBuf,
    /// Package the archive as `<quest>.zip` instead of a folder tree.
    #[arg(long)]
    zip: bool,
    /// Column budget for wrapped dialogue text (legacy exports used 32).
    #[arg(long, default_value_t = DEFAULT_WRAP_WIDTH)]
    width: usize,
}

#[derive(Args)]
struct CheckArgs {
    /// Path to the editor's project JSON.
    project: PathBuf,
    /// Exit nonzero when any finding is reported.
    #[arg(long)]
    deny_missing: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Export(args) => run_export(args),
        Commands::Check(args) => run_check(args),
        Commands::List { project } => run_list(project),
    }
}

fn run_export(args: ExportArgs) -> Result<()> {
    let project = load_project(&args.project)
        .with_context(|| format!("loading '{}'", args.project.display()))?;
    let quest = select_quest(&project, &args.quest)?;

    info!("compiling quest '{}' at width {}", quest.title, args.width);
    let archive = compile_quest(quest, &project.characters, args.width);

    if args.zip {
        let dest = zip_archive(&archive, &quest.title, &args.out)
            .with_context(|| format!("packaging quest '{}'", quest.title))?;
        println!("wrote {} ({} files)", dest.display(), archive.len());
    } else {
        write_archive(&archive, &args.out)
            .with_context(|| format!("writing archive to '{}'", args.out.display()))?;
        println!("wrote {} files under {}", archive.len(), args.out.display());
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<()> {
    let project = load_project(&args.project)
        .with_context(|| format!("loading '{}'", args.project.display()))?;
    let findings = validate_project(&project);
    for finding in &findings {
        println!("warning: {finding}");
    }
    if findings.is_empty() {
        println!("ok: no findings");
    } else if args.deny_missing {
        process::exit(1);
    }
    Ok(())
}

fn run_list(path: PathBuf) -> Result<()> {
    let project = load_project(&path).with_context(|| format!("loading '{}'", path.display()))?;
    if project.quests.is_empty() {
        println!("no quests");
        return Ok(());
    }
    for quest in &project.quests {
        let lines: usize = quest.conversations.iter().map(|c| c.dialogue.len()).sum();
        println!(
            "{}  {} ({} conversations, {} lines)",
            quest.id,
            quest.title,
            quest.conversations.len(),
            lines
        );
    }
    Ok(())
}
