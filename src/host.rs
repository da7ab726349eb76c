//! Interactive host driving a session from line-oriented input.
//!
//! The host is the session's only owner. It turns input lines into
//! [`SessionEvent`]s, prints the notifications that come back, and supplies
//! the presentation delay: every [`Effect::ScheduleCommit`] spawns a timer
//! task that reports back over a channel, so the session is only ever
//! touched from the loop.

use crate::command::{HELP, HostCommand};
use crate::config::HostConfig;
use anyhow::{Context, Result};
use brainvita_core::{
    Effect, GameStatus, MoveTicket, Notification, Session, SessionEvent, possible_moves,
};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Whether the loop keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Owns a session and the timers of its pending commits.
pub struct Host {
    session: Session,
    config: HostConfig,
    commit_tx: mpsc::UnboundedSender<MoveTicket>,
    commit_rx: mpsc::UnboundedReceiver<MoveTicket>,
    pending_commits: usize,
}

impl Host {
    /// Creates a host with an idle session.
    #[instrument]
    pub fn new(config: HostConfig) -> Self {
        let (commit_tx, commit_rx) = mpsc::unbounded_channel();
        Self {
            session: Session::new(*config.win_rule()),
            config,
            commit_tx,
            commit_rx,
            pending_commits: 0,
        }
    }

    /// Returns the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs until `quit`, or until input ends and every pending commit landed.
    #[instrument(skip_all)]
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        info!("Host ready");
        writeln!(out, "{HELP}")?;
        let mut lines = input.lines();
        let mut input_open = true;

        loop {
            if !input_open && self.pending_commits == 0 {
                debug!("Input closed and no commits pending");
                break;
            }

            tokio::select! {
                line = lines.next_line(), if input_open => {
                    match line.context("Failed to read command")? {
                        Some(line) => {
                            if self.handle_line(&line, out)? == Flow::Quit {
                                info!("Quit requested");
                                break;
                            }
                        }
                        None => {
                            debug!(pending = self.pending_commits, "Input closed");
                            input_open = false;
                        }
                    }
                }
                Some(ticket) = self.commit_rx.recv() => {
                    self.pending_commits = self.pending_commits.saturating_sub(1);
                    let effects = self.session.handle(SessionEvent::DelayElapsed(ticket));
                    self.apply(effects, out)?;
                }
                else => break,
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Parses and executes one input line.
    #[instrument(skip(self, out))]
    fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match line.parse::<HostCommand>() {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "Unparseable command");
                writeln!(out, "{e}. Type `help` for commands.")?;
                return Ok(Flow::Continue);
            }
        };

        let event = match command {
            HostCommand::Start => SessionEvent::Start,
            HostCommand::Stop => SessionEvent::Stop,
            HostCommand::Select(pos) => SessionEvent::SelectCell(pos),
            HostCommand::Moves => {
                self.print_moves(out)?;
                return Ok(Flow::Continue);
            }
            HostCommand::Board => {
                writeln!(out, "{}", self.session.board().display())?;
                return Ok(Flow::Continue);
            }
            HostCommand::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            HostCommand::Quit => return Ok(Flow::Quit),
        };

        let effects = self.session.handle(event);
        if effects.is_empty() {
            debug!(?event, "Event produced no change");
        }
        self.apply(effects, out)?;
        Ok(Flow::Continue)
    }

    /// Carries out the effects of one transition.
    fn apply<W: Write>(&mut self, effects: Vec<Effect>, out: &mut W) -> Result<()> {
        for effect in effects {
            match effect {
                Effect::Notify(notification) => self.emit(&notification, out)?,
                Effect::ScheduleCommit(ticket) => self.schedule_commit(ticket),
            }
        }
        Ok(())
    }

    /// Spawns the timer that feeds `DelayElapsed` back into the loop.
    fn schedule_commit(&mut self, ticket: MoveTicket) {
        let delay = self.config.move_delay();
        let tx = self.commit_tx.clone();
        self.pending_commits += 1;
        debug!(%ticket, ?delay, "Scheduling commit");

        tokio::spawn(async move {
            sleep(delay).await;
            if tx.send(ticket).is_err() {
                debug!(%ticket, "Host gone before commit fired");
            }
        });
    }

    /// Prints one notification.
    fn emit<W: Write>(&self, notification: &Notification, out: &mut W) -> Result<()> {
        if *self.config.json_events() {
            let line = serde_json::to_string(notification)
                .context("Failed to serialize notification")?;
            writeln!(out, "{line}")?;
            return Ok(());
        }

        match notification {
            Notification::BoardChanged(board) => {
                writeln!(out, "{}", board.display())?;
                writeln!(
                    out,
                    "Marbles: {} (removed {})",
                    board.count_marbles(),
                    board.marbles_removed()
                )?;
            }
            Notification::StatusChanged(status) => match status {
                GameStatus::Idle => writeln!(out, "Game stopped. Type `start` to play.")?,
                GameStatus::Playing => writeln!(out, "Status: playing")?,
                GameStatus::Won => writeln!(
                    out,
                    "You won in {} moves! Type `start` to play again.",
                    self.session.moves_made()
                )?,
                GameStatus::Lost => writeln!(
                    out,
                    "No moves left with {} marbles. Type `start` to try again.",
                    self.session.board().count_marbles()
                )?,
            },
            Notification::SelectionChanged(Some(pos)) => {
                let targets = self.session.valid_destinations();
                if targets.is_empty() {
                    writeln!(out, "Selected {pos}, it has no jumps")?;
                } else {
                    let targets: Vec<String> = targets.iter().map(ToString::to_string).collect();
                    writeln!(out, "Selected {pos}, can land on {}", targets.join(" "))?;
                }
            }
            Notification::SelectionChanged(None) => writeln!(out, "Selection cleared")?,
            Notification::MoveStarted(flight) => writeln!(
                out,
                "Jumping {} over {} to {}",
                flight.from, flight.mid, flight.to
            )?,
            Notification::MoveCompleted(flight) => {
                writeln!(out, "Captured {}", flight.mid)?;
            }
            Notification::MoveCancelled(flight) => writeln!(
                out,
                "Jump {} -> {} cancelled, {} stays",
                flight.from, flight.to, flight.mid
            )?,
            Notification::InvalidSelection(pos) => writeln!(out, "Cannot land on {pos}")?,
        }
        Ok(())
    }

    /// Lists every legal jump on the current board.
    fn print_moves<W: Write>(&self, out: &mut W) -> Result<()> {
        let moves = possible_moves(self.session.board());
        if moves.is_empty() {
            writeln!(out, "No legal jumps")?;
        }
        for mov in moves {
            writeln!(out, "{mov}")?;
        }
        Ok(())
    }
}
