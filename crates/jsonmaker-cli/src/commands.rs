use anyhow::{bail, Context};
use colored::Colorize;
use jsonmaker_store::{Document, ScalarValue};

use crate::cli::*;
use crate::config::ShellConfig;
use crate::repl::Repl;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        None => cmd_shell(ShellArgs::default()),
        Some(Command::Shell(args)) => cmd_shell(args),
        Some(Command::Add(args)) => cmd_add(args),
        Some(Command::Remove(args)) => cmd_remove(args),
        Some(Command::Show(args)) => cmd_show(args),
    }
}

fn cmd_shell(args: ShellArgs) -> anyhow::Result<()> {
    let config = ShellConfig::from_args(args);
    let mut repl = Repl::new(config)?;
    repl.run()
}

fn cmd_add(args: AddArgs) -> anyhow::Result<()> {
    let mut doc = Document::open_or_default(&args.file)
        .with_context(|| format!("failed to open {}", args.file.display()))?;
    let previous = doc.insert(&args.key, &args.value, args.value_type)?;
    doc.save(&args.file)?;

    let key = args.key.trim();
    match previous {
        Some(old) => println!(
            "{} Updated {} ({})",
            "✓".green().bold(),
            key.yellow(),
            was(&old).dimmed()
        ),
        None => println!("{} Added {}", "✓".green().bold(), key.yellow()),
    }
    println!("{}", doc.render()?);
    Ok(())
}

fn was(old: &ScalarValue) -> String {
    format!("was {} {old}", old.type_name())
}

fn cmd_remove(args: RemoveArgs) -> anyhow::Result<()> {
    let mut doc = Document::open(&args.file)?;
    if doc.remove(&args.key).is_none() {
        bail!("no such key: {}", args.key);
    }
    doc.save(&args.file)?;
    println!("{} Removed {}", "✓".green().bold(), args.key.trim().yellow());
    Ok(())
}

fn cmd_show(args: ShowArgs) -> anyhow::Result<()> {
    let doc = Document::open(&args.file)?;
    println!("{}", doc.render()?);
    Ok(())
}
