//! Interactive player loop
//!
//! Wires a [`PlayerHost`] to line input and prints a status line whenever
//! the session snapshot changes.

use crate::input::{parse_line, Input, HELP};
use crate::render::render_snapshot;
use melody_playback::{PlayerCommand, PlayerHost, SessionSnapshot};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

/// Drive `host` from `input` until `quit` or end of input
///
/// Returns the final session snapshot.
pub async fn run_interactive<R>(host: PlayerHost, input: R) -> SessionSnapshot
where
    R: AsyncBufRead + Unpin,
{
    let (commands, rx) = mpsc::channel(32);
    let (snapshots, mut updates) = watch::channel(host.snapshot());
    let latest = updates.clone();

    println!("{}", render_snapshot(&host.snapshot()));
    let host_task = tokio::spawn(host.run(rx, snapshots));

    let printer = tokio::spawn(async move {
        let mut last = String::new();
        while updates.changed().await.is_ok() {
            let line = render_snapshot(&updates.borrow_and_update());
            if line != last {
                println!("{}", line);
                last = line;
            }
        }
    });

    let mut lines = input.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed to read input");
                break;
            }
        };

        match parse_line(&line) {
            Ok(Input::Command(command)) => {
                let closing = command == PlayerCommand::Close;
                if commands.send(command).await.is_err() {
                    break;
                }
                if closing {
                    break;
                }
            }
            Ok(Input::Help) => println!("{}", HELP),
            Ok(Input::Nothing) => {}
            Err(e) => eprintln!("{} (type `help` for commands)", e),
        }
    }

    // Dropping the sender ends the host loop if `quit` was never sent
    drop(commands);
    let last = match host_task.await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "Player task failed");
            latest.borrow().clone()
        }
    };
    if let Err(e) = printer.await {
        debug!(error = %e, "Printer task ended abnormally");
    }
    last
}
