//! The `quizport take` command.
//!
//! Input is read line by line from stdin while session snapshots arrive on
//! the watch channel. Both feed one `select!`; every decision about what is
//! allowed happens inside the session actor.
//!
//! Stdin is read on a detached thread; a pending read never blocks exit.

use std::path::PathBuf;

use anyhow::{bail, Result};
use tokio::sync::mpsc;

use quizport_core::session::Navigation;
use quizport_core::{
    spawn_session, SessionError, SessionHandle, SessionLoader, SessionPhase, SessionSnapshot,
    Submitter,
};
use quizport_report::{format_clock, render_summary};

fn help(option_count: usize) -> String {
    let range = match option_count {
        0 | 1 => "1".to_string(),
        n => format!("1-{n}"),
    };
    format!("Commands: {range} select an option, n next, p previous, s submit (last question), q quit")
}

fn help_for(handle: &SessionHandle) -> String {
    help(handle.snapshot().question.options.len())
}

/// True once the countdown is inside its final minute.
fn in_last_minute(remaining_seconds: u32) -> bool {
    remaining_seconds <= 60
}

pub async fn execute(
    subject: String,
    duration: Option<u32>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    if let Some(d) = duration {
        anyhow::ensure!(d >= 1, "duration must be at least 1 second");
    }

    let (config, api) = super::connect(config_path.as_deref())?;
    let credential = super::require_credential(&config)?;
    let duration = duration.unwrap_or(config.quiz.duration_secs);

    eprintln!("Loading {subject} questions...");
    let mut pending = SessionLoader::new(api.clone())
        .with_duration(duration)
        .spawn(&subject);
    let session = tokio::select! {
        loaded = pending.wait() => loaded?,
        _ = tokio::signal::ctrl_c() => {
            pending.abandon();
            println!("Load cancelled.");
            return Ok(());
        }
    };

    let handle = spawn_session(
        session,
        Submitter::new(api, credential),
        config.engine_config(),
    );

    println!("{}", help_for(&handle));
    render_question(&handle.snapshot());

    match drive(&handle).await? {
        Exit::Quit => {
            println!("Quiz abandoned; nothing was submitted.");
            return Ok(());
        }
        Exit::Submitted => {}
    }

    match handle.finished().await? {
        SessionPhase::Succeeded(aggregate) => {
            println!();
            print!("{}", render_summary(&subject, &aggregate));
            Ok(())
        }
        SessionPhase::Failed(message) => bail!("{message}"),
        other => bail!("session ended in unexpected phase '{}'", other.label()),
    }
}

enum Exit {
    Quit,
    Submitted,
}

/// Feed user input to the session until it starts submitting or the user
/// quits. Ctrl-C quits the same way `q` does.
async fn drive(handle: &SessionHandle) -> Result<Exit> {
    let mut lines = stdin_lines();
    let mut snapshots = handle.subscribe();
    let mut input_open = true;
    let mut warned_last_minute = false;
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);
    let mut interrupt_armed = true;

    loop {
        tokio::select! {
            interrupted = &mut interrupt, if interrupt_armed => match interrupted {
                Ok(()) => return Ok(Exit::Quit),
                Err(e) => {
                    tracing::warn!("cannot listen for Ctrl-C: {e}");
                    interrupt_armed = false;
                }
            },

            line = lines.recv(), if input_open => {
                let Some(line) = line else {
                    tracing::debug!("stdin closed, waiting for the countdown");
                    input_open = false;
                    continue;
                };
                if let Some(exit) = apply(handle, line.trim()).await? {
                    return Ok(exit);
                }
            }

            changed = snapshots.changed() => {
                if changed.is_err() {
                    return Ok(Exit::Submitted);
                }
                let snapshot = snapshots.borrow_and_update().clone();
                if snapshot.phase != SessionPhase::Active {
                    // A manual submission always leaves time on the clock.
                    if snapshot.remaining_seconds == 0 {
                        println!("Time is up! Submitting your answers...");
                    }
                    return Ok(Exit::Submitted);
                }
                if in_last_minute(snapshot.remaining_seconds) && !warned_last_minute {
                    warned_last_minute = true;
                    println!("One minute left.");
                }
            }
        }
    }
}

fn stdin_lines() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Apply one line of input. Rejected actions are reported and ignored.
async fn apply(handle: &SessionHandle, input: &str) -> Result<Option<Exit>> {
    let outcome = match input {
        "" => return Ok(None),
        "q" | "quit" => return Ok(Some(Exit::Quit)),
        "h" | "help" | "?" => {
            println!("{}", help_for(handle));
            return Ok(None);
        }
        "n" => handle.next().await.map(|nav| report_navigation(handle, nav)),
        "p" => handle.previous().await.map(|nav| report_navigation(handle, nav)),
        "s" => match handle.submit().await {
            Ok(()) => {
                println!("Submitting your answers...");
                return Ok(Some(Exit::Submitted));
            }
            Err(e) => Err(e),
        },
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 => handle.select_position(n - 1).await.map(|()| {
                if let Some(selected) = handle.snapshot().selected {
                    println!("Selected: {selected}");
                }
            }),
            _ => {
                println!("Unrecognised input '{other}'. {}", help_for(handle));
                return Ok(None);
            }
        },
    };

    match outcome {
        Ok(()) => Ok(None),
        // Expiry beat this command; the snapshot stream reports it.
        Err(SessionError::InputDisabled(_)) => Ok(None),
        Err(SessionError::Closed) => bail!("quiz session stopped unexpectedly"),
        Err(e) => {
            println!("{e}");
            Ok(None)
        }
    }
}

fn report_navigation(handle: &SessionHandle, navigation: Navigation) {
    match navigation {
        Navigation::Moved(_) => render_question(&handle.snapshot()),
        Navigation::Unanswered => println!("Select an option before moving on."),
        Navigation::AtLastQuestion => println!("This is the last question; press s to submit."),
        Navigation::AtFirstQuestion => println!("Already at the first question."),
    }
}

fn render_question(snapshot: &SessionSnapshot) {
    println!();
    println!(
        "Question {}/{}    Time Left: {}",
        snapshot.current_index + 1,
        snapshot.question_count,
        format_clock(snapshot.remaining_seconds)
    );
    println!("{}", snapshot.question.prompt);
    for (position, option) in snapshot.question.options.iter().enumerate() {
        let marker = if snapshot.selected.as_deref() == Some(option.as_str()) {
            '*'
        } else {
            ' '
        };
        println!(" {marker} {}) {option}", position + 1);
    }
    if snapshot.is_last_question() {
        println!("(last question: press s to submit)");
    }
}
