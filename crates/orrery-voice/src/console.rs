use crate::{SpeechEngine, SpeechError, SpeechEvent};
use orrery_input::{Publisher, Subscription};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Handle;
use tokio::sync::broadcast;

/// Speech engine stand-in that treats each line typed on stdin as a
/// recognized transcript.
///
/// One reader task owns stdin; each session taps into it through a
/// broadcast channel. When stdin closes, every session ends. Each session
/// is logged with the configured language tag.
pub struct ConsoleSpeech {
    runtime: Handle,
    lines: broadcast::Receiver<String>,
    language: String,
}

impl ConsoleSpeech {
    /// Start reading stdin on `runtime`.
    pub fn spawn(runtime: Handle, language: &str) -> Self {
        let (tx, rx) = broadcast::channel(32);
        runtime.spawn(read_stdin(tx));
        Self::from_lines(runtime, rx, language)
    }

    /// Build on an existing line feed.
    pub fn from_lines(runtime: Handle, lines: broadcast::Receiver<String>, language: &str) -> Self {
        Self {
            runtime,
            lines,
            language: language.to_string(),
        }
    }

    /// Language tag sessions are opened with.
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl SpeechEngine for ConsoleSpeech {
    fn start(&mut self) -> Result<Subscription<SpeechEvent>, SpeechError> {
        let (publisher, subscription) = Subscription::channel();
        self.runtime.spawn(forward_lines(self.lines.resubscribe(), publisher));
        tracing::info!(language = %self.language, "Console speech session opened");
        Ok(subscription)
    }
}

async fn read_stdin(tx: broadcast::Sender<String>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                // No open session just means nobody is listening.
                let _ = tx.send(line);
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(?e, "stdin read failed, console speech closing");
                break;
            }
        }
    }
}

async fn forward_lines(mut lines: broadcast::Receiver<String>, publisher: Publisher<SpeechEvent>) {
    loop {
        tokio::select! {
            _ = publisher.closed() => return,
            line = lines.recv() => match line {
                Ok(line) => {
                    if !publisher.publish(SpeechEvent::Transcript(line)) {
                        return;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    publisher.publish(SpeechEvent::Fault(format!("{skipped} lines dropped")));
                }
                Err(broadcast::error::RecvError::Closed) => {
                    publisher.publish(SpeechEvent::Ended);
                    return;
                }
            },
        }
    }
}
