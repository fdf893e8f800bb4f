//! Session actor.
//!
//! One task owns the [`QuizSession`]. User commands arrive over an mpsc
//! channel and countdown ticks come from a [`Countdown`] owned by the same
//! task; a single `select!` loop applies both, so there is never more than
//! one transition in progress. The submission future is polled from the
//! same loop, which keeps input disabled while it is in flight.

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, OptionFuture};
use tokio::sync::{mpsc, oneshot, watch};

use crate::countdown::Countdown;
use crate::error::{SessionError, SubmissionError};
use crate::model::Aggregate;
use crate::session::{
    Navigation, QuizSession, SessionPhase, SessionSnapshot, SubmissionTicket, TickOutcome,
};
use crate::submitter::Submitter;

/// Configuration for a session actor.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Wall-clock length of one countdown second.
    pub tick: Duration,
    /// Capacity of the command channel.
    pub command_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            command_buffer: 32,
        }
    }
}

enum SessionCommand {
    Select {
        option: String,
        responder: oneshot::Sender<Result<(), SessionError>>,
    },
    SelectPosition {
        position: usize,
        responder: oneshot::Sender<Result<(), SessionError>>,
    },
    Next {
        responder: oneshot::Sender<Result<Navigation, SessionError>>,
    },
    Previous {
        responder: oneshot::Sender<Result<Navigation, SessionError>>,
    },
    Submit {
        responder: oneshot::Sender<Result<(), SessionError>>,
    },
}

type InflightSubmission = BoxFuture<'static, Result<Aggregate, SubmissionError>>;

/// Spawn the actor for `session` and return a handle to it.
///
/// Must be called from within a tokio runtime. The countdown starts
/// immediately. Dropping every handle while the session is still active
/// abandons it without submitting.
pub fn spawn_session(session: QuizSession, submitter: Submitter, config: EngineConfig) -> SessionHandle {
    let (sender, receiver) = mpsc::channel(config.command_buffer.max(1));
    let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());

    tracing::info!(
        session = %session.id(),
        subject = session.subject(),
        questions = session.questions().len(),
        remaining_seconds = session.remaining_seconds(),
        "quiz session started"
    );

    let countdown = Countdown::start(config.tick);
    tokio::spawn(run_session_loop(session, submitter, receiver, snapshot_tx, countdown));

    SessionHandle {
        sender,
        snapshots: snapshot_rx,
    }
}

async fn run_session_loop(
    mut session: QuizSession,
    submitter: Submitter,
    mut receiver: mpsc::Receiver<SessionCommand>,
    snapshots: watch::Sender<SessionSnapshot>,
    mut countdown: Countdown,
) {
    let mut inflight: Option<InflightSubmission> = None;
    let mut handles_gone = false;

    loop {
        tokio::select! {
            biased;

            Some(outcome) = OptionFuture::from(inflight.as_mut()), if inflight.is_some() => {
                inflight = None;
                match &outcome {
                    Ok(aggregate) => tracing::info!(
                        session = %session.id(),
                        correct = aggregate.correct_count,
                        wrong = aggregate.wrong_count,
                        "quiz submitted"
                    ),
                    Err(e) => tracing::error!(session = %session.id(), "quiz submission failed: {e}"),
                }
                session.complete(&outcome);
                snapshots.send_replace(session.snapshot());
                if handles_gone {
                    break;
                }
            }

            command = receiver.recv(), if !handles_gone => {
                let Some(command) = command else {
                    if inflight.is_none() {
                        break;
                    }
                    handles_gone = true;
                    continue;
                };
                if let Some(ticket) = handle_command(&mut session, command, &snapshots) {
                    countdown.cancel();
                    inflight = Some(dispatch(&submitter, ticket));
                }
            }

            () = countdown.tick() => {
                match session.tick() {
                    TickOutcome::Running(_) => {}
                    TickOutcome::Expired(ticket) => {
                        countdown.cancel();
                        inflight = Some(dispatch(&submitter, ticket));
                    }
                    TickOutcome::Stopped => countdown.cancel(),
                }
                snapshots.send_replace(session.snapshot());
            }
        }
    }

    if session.phase() == &SessionPhase::Active {
        tracing::info!(session = %session.id(), "quiz session abandoned before submission");
    }
    tracing::debug!(session = %session.id(), "session actor stopped");
}

/// Apply one command. Returns the ticket if it started the submission.
///
/// The new snapshot is published before the caller is answered, so a
/// caller that reads [`SessionHandle::snapshot`] after a reply sees it.
fn handle_command(
    session: &mut QuizSession,
    command: SessionCommand,
    snapshots: &watch::Sender<SessionSnapshot>,
) -> Option<SubmissionTicket> {
    fn reply<T>(
        session: &QuizSession,
        snapshots: &watch::Sender<SessionSnapshot>,
        responder: oneshot::Sender<Result<T, SessionError>>,
        result: Result<T, SessionError>,
    ) {
        snapshots.send_replace(session.snapshot());
        let _ = responder.send(result);
    }

    match command {
        SessionCommand::Select { option, responder } => {
            let result = session.select(&option);
            reply(session, snapshots, responder, result);
            None
        }
        SessionCommand::SelectPosition {
            position,
            responder,
        } => {
            let result = session.select_position(position);
            reply(session, snapshots, responder, result);
            None
        }
        SessionCommand::Next { responder } => {
            let result = session.next();
            reply(session, snapshots, responder, result);
            None
        }
        SessionCommand::Previous { responder } => {
            let result = session.previous();
            reply(session, snapshots, responder, result);
            None
        }
        SessionCommand::Submit { responder } => match session.submit() {
            Ok(ticket) => {
                reply(session, snapshots, responder, Ok(()));
                Some(ticket)
            }
            Err(e) => {
                reply(session, snapshots, responder, Err(e));
                None
            }
        },
    }
}

fn dispatch(submitter: &Submitter, ticket: SubmissionTicket) -> InflightSubmission {
    let submitter = submitter.clone();
    async move { submitter.submit(ticket).await }.boxed()
}

/// Handle for driving a running session.
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, SessionError>>) -> SessionCommand,
    ) -> Result<T, SessionError> {
        let (responder, rx) = oneshot::channel();
        self.sender
            .send(build(responder))
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)?
    }

    /// Select an option on the current question by its text.
    pub async fn select(&self, option: &str) -> Result<(), SessionError> {
        let option = option.to_string();
        self.request(|responder| SessionCommand::Select { option, responder })
            .await
    }

    /// Select an option on the current question by zero-based position.
    pub async fn select_position(&self, position: usize) -> Result<(), SessionError> {
        self.request(|responder| SessionCommand::SelectPosition {
            position,
            responder,
        })
        .await
    }

    pub async fn next(&self) -> Result<Navigation, SessionError> {
        self.request(|responder| SessionCommand::Next { responder })
            .await
    }

    pub async fn previous(&self) -> Result<Navigation, SessionError> {
        self.request(|responder| SessionCommand::Previous { responder })
            .await
    }

    /// Submit from the last question. Returns once the submission has been
    /// dispatched; use [`SessionHandle::finished`] for the outcome.
    pub async fn submit(&self) -> Result<(), SessionError> {
        self.request(|responder| SessionCommand::Submit { responder })
            .await
    }

    /// The most recently published state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified on every transition and tick.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until the session reaches a terminal phase.
    pub async fn finished(&self) -> Result<SessionPhase, SessionError> {
        let mut rx = self.snapshots.clone();
        let snapshot = rx
            .wait_for(|s| s.phase.is_terminal())
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(snapshot.phase.clone())
    }
}
