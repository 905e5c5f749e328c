/*!
 * hunq - Heads-Up Queue Simulator
 *
 * Drives a queue with logging collaborators from line commands on stdin:
 * - post <key> <category|-> [ongoing] [fullscreen]
 * - remove <key>
 * - dismiss <key>
 * - ux on|off
 * - fg <package> <display>
 * - release
 * - stats
 * - quit
 */

use anyhow::{bail, Context};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use hun_queue::sim::{FanoutForegroundSource, LoggingPoster, LoggingRenderer};
use hun_queue::{
    init_tracing, AlertEntry, Clock, ForegroundTask, HeadsUpQueue, QueueConfig, RankingMap,
    SystemClock,
};

enum Command {
    Post(AlertEntry),
    Remove(String),
    Dismiss(String),
    Ux(bool),
    Foreground(ForegroundTask),
    Release,
    Stats,
    Quit,
}

fn parse_command(line: &str, now_ms: u64) -> anyhow::Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb {
        "post" => {
            let key = words.next().context("usage: post <key> <category|-> [ongoing] [fullscreen]")?;
            let category = match words.next() {
                None | Some("-") => None,
                Some(category) => Some(category),
            };
            let mut entry = AlertEntry::new(key, category, now_ms);
            for flag in words {
                match flag {
                    "ongoing" => entry = entry.with_ongoing(true),
                    "fullscreen" => entry = entry.with_full_screen_intent(true),
                    other => bail!("unknown post flag '{}'", other),
                }
            }
            Command::Post(entry)
        }
        "remove" => Command::Remove(words.next().context("usage: remove <key>")?.to_string()),
        "dismiss" => Command::Dismiss(words.next().context("usage: dismiss <key>")?.to_string()),
        "ux" => match words.next() {
            Some("on") => Command::Ux(true),
            Some("off") => Command::Ux(false),
            _ => bail!("usage: ux on|off"),
        },
        "fg" => {
            let package = words.next().context("usage: fg <package> <display>")?;
            let display = words
                .next()
                .context("usage: fg <package> <display>")?
                .parse::<i32>()
                .context("display must be an integer")?;
            Command::Foreground(ForegroundTask::new(package, display))
        }
        "release" => Command::Release,
        "stats" => Command::Stats,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{}'", other),
    };
    Ok(Some(command))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("hunq starting...");
    let config = QueueConfig::from_env().context("Failed to load queue configuration")?;
    info!(
        priority = ?config.category_priority,
        heads_up_delay_ms = config.heads_up_delay_ms,
        "Configuration loaded"
    );

    let (renderer, mut render_events) = LoggingRenderer::new();
    let renderer = Arc::new(renderer);
    let poster = Arc::new(LoggingPoster::new());
    let foreground = Arc::new(FanoutForegroundSource::new());
    let clock = SystemClock;

    let queue = HeadsUpQueue::builder(config, renderer.clone(), poster.clone())
        .with_clock(Arc::new(clock))
        .with_foreground_source(foreground.clone())
        .build()?;

    // Renderer transitions flow back into the queue
    let feedback_queue = queue.clone();
    let feedback = tokio::spawn(async move {
        while let Some((entry, state)) = render_events.recv().await {
            feedback_queue.on_state_change(&entry, state);
        }
    });

    info!("Ready - type commands, Ctrl+C to exit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    info!("End of input");
                    break;
                };

                let command = match parse_command(&line, clock.now_millis()) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        warn!("{:#}", e);
                        continue;
                    }
                };

                match command {
                    Command::Post(entry) => queue.add_to_queue(entry, RankingMap::default()),
                    Command::Remove(key) => {
                        let entry = AlertEntry::new(key.as_str(), None, 0);
                        let was_queued = queue.remove_from_queue(&entry);
                        if renderer.removed_by_sender(&key).is_none() && !was_queued {
                            warn!(key = %key, "Unknown key");
                        }
                    }
                    Command::Dismiss(key) => {
                        if renderer.user_dismiss(&key).is_none() {
                            warn!(key = %key, "No active heads-up with that key");
                        }
                    }
                    Command::Ux(restricted) => queue.set_active_ux_restriction(restricted),
                    Command::Foreground(task) => foreground.publish(&task),
                    Command::Release => queue.release_queue(),
                    Command::Stats => {
                        let stats = serde_json::to_string(&queue.stats())?;
                        info!(
                            queued = queue.len(),
                            active = ?renderer.active_keys(),
                            marker = ?poster.current_marker().map(|m| m.title),
                            "{}",
                            stats
                        );
                    }
                    Command::Quit => break,
                }
            }
        }
    }

    queue.release_queue();
    queue.unregister_listeners();
    feedback.abort();
    info!(stats = ?queue.stats(), "hunq stopped");
    Ok(())
}
