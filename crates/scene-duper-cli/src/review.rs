use colored::*;
use scene_duper_core::analysis::SideId;
use scene_duper_core::resolution::{ResolutionAction, ReviewSession};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tokio::task::JoinSet;
use tracing::{error, info};

const HELP: &str = "Commands:
  list                 show sides still awaiting review
  keep <SIDE>...       delete scene and generated files, keep the source file
  purge <SIDE>...      delete scene, generated files and the source file
  help                 show this help
  quit                 leave the review (waits for pending deletes)";

enum Command {
    List,
    Resolve(ResolutionAction, Vec<SideId>),
    Help,
    Quit,
    Empty,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Empty);
    };
    let action = match verb.to_lowercase().as_str() {
        "list" | "ls" => return Ok(Command::List),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        "keep" => ResolutionAction::RemoveSceneKeepFile,
        "purge" => ResolutionAction::RemoveSceneAndFile,
        other => return Err(format!("Unknown command '{}'", other)),
    };

    let sides = words
        .map(|word| word.parse::<SideId>().map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    if sides.is_empty() {
        return Err(format!("'{}' needs at least one side, e.g. F1b", verb));
    }
    Ok(Command::Resolve(action, sides))
}

/// Interactive loop over one review session. Deletes are dispatched in the
/// background so further commands can be entered while they are pending.
pub async fn run_review(session: Arc<ReviewSession>) -> io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: JoinSet<()> = JoinSet::new();

    println!("{}", HELP.dimmed());
    loop {
        // Reap finished deletes.
        while pending.try_join_next().is_some() {}

        prompt("review> ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Ok(Command::Empty) => {}
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::List) => print_remaining(&session),
            Ok(Command::Quit) => break,
            Ok(Command::Resolve(action, sides)) => {
                if action.deletes_source_file() {
                    let names: Vec<String> = sides.iter().map(|s| s.to_string()).collect();
                    let question = format!(
                        "Permanently delete the source files of {}?",
                        names.join(", ")
                    );
                    if !prompt_confirm(&mut lines, &question, Some(false)).await? {
                        println!("Skipped");
                        continue;
                    }
                }
                let session = session.clone();
                pending.spawn(async move { dispatch(&session, action, sides).await });
            }
            Err(message) => println!("{}", message.red()),
        }
    }

    if !pending.is_empty() {
        info!("Waiting for {} pending deletes...", pending.len());
    }
    while pending.join_next().await.is_some() {}
    Ok(())
}

async fn dispatch(session: &ReviewSession, action: ResolutionAction, sides: Vec<SideId>) {
    let actions: Vec<(SideId, ResolutionAction)> =
        sides.into_iter().map(|side| (side, action)).collect();
    for (side, result) in session.resolve_many(&actions).await {
        if let Err(err) = result {
            error!("{}: {}", side, err);
        }
    }
}

fn print_remaining(session: &ReviewSession) {
    let remaining = session.remaining_sides();
    if remaining.is_empty() {
        println!("{}", "All findings resolved.".green());
        return;
    }
    for side in remaining {
        if let Some(scene) = session.findings().scene_for(&side) {
            println!(
                "  [{}] {} (ID: {})",
                side,
                scene.title().unwrap_or("<untitled>"),
                scene.id
            );
        }
    }
}

fn prompt(text: &str) -> io::Result<()> {
    print!("{}", text);
    io::stdout().flush()
}

async fn prompt_confirm<R>(
    lines: &mut Lines<BufReader<R>>,
    question: &str,
    default: Option<bool>,
) -> io::Result<bool>
where
    R: AsyncRead + Unpin,
{
    loop {
        match default {
            Some(true) => prompt(&format!("{} (Y/n): ", question))?,
            Some(false) | None => prompt(&format!("{} (y/N): ", question))?,
        }

        let Some(input) = lines.next_line().await? else {
            return Ok(default.unwrap_or(false));
        };

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}
