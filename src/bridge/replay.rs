//! Frame loop driving the engine from a stream of host messages

use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::output::LineOutput;
use super::protocol::{HostMessage, OutputMessage};
use crate::config::EngineConfig;
use crate::dispatcher::Dispatcher;
use crate::probe::SnapshotProbe;

/// Counters reported when the loop ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    pub messages: u64,
    pub commands: u64,
    pub ticks: u64,
    pub rejected: u64,
}

pub struct Replay {
    dispatcher: Dispatcher,
    probe: Rc<SnapshotProbe>,
    output: LineOutput,
    tick_interval: Duration,
    stats: ReplayStats,
}

impl Replay {
    pub fn new(config: &EngineConfig, output: LineOutput) -> Self {
        let probe = Rc::new(SnapshotProbe::default());
        let dispatcher = Dispatcher::new(
            config,
            probe.clone(),
            Box::new(output.clone()),
            Rc::new(output.clone()),
        );

        Self {
            dispatcher,
            probe,
            output,
            tick_interval: config.tick_interval(),
            stats: ReplayStats::default(),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    /// Run one frame and forward its transitions
    pub fn tick(&mut self) {
        self.stats.ticks += 1;
        for event in self.dispatcher.tick() {
            info!(%event, "tracker event");
            if let Err(e) = self.output.send(&OutputMessage::Event { event }) {
                debug!(?e, "event message dropped");
            }
        }
    }

    /// Apply one input line. Malformed lines are logged and skipped.
    pub fn handle_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        match serde_json::from_str::<HostMessage>(line) {
            Ok(message) => self.apply(message),
            Err(e) => {
                self.stats.rejected += 1;
                warn!(?e, "rejected host message");
            }
        }
    }

    pub fn apply(&mut self, message: HostMessage) {
        self.stats.messages += 1;
        match message {
            HostMessage::Snapshot { state } => {
                self.probe.replace(state);
                self.tick();
            }
            HostMessage::Patch { path, value } => {
                self.probe.set(&path, value);
                self.tick();
            }
            HostMessage::Command { command } => {
                self.stats.commands += 1;
                self.dispatcher.handle(command);
            }
            HostMessage::Tick => self.tick(),
        }
    }

    /// Read host messages until the input closes or `shutdown` resolves,
    /// ticking on the configured interval in between
    pub async fn run<R, S>(&mut self, input: R, shutdown: S) -> Result<ReplayStats>
    where
        R: AsyncRead + Unpin,
        S: Future<Output = ()>,
    {
        let mut lines = BufReader::new(input).lines();
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(tick_ms = self.tick_interval.as_millis() as u64, "replay loop started");

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("shutdown signal received");
                    break;
                }

                line = lines.next_line() => {
                    match line.context("failed to read host input")? {
                        Some(line) => self.handle_line(&line),
                        None => {
                            debug!("host input closed");
                            break;
                        }
                    }
                }

                _ = interval.tick() => self.tick(),
            }
        }

        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::tracker::ModeKind;

    fn create_replay() -> (Replay, Rc<RefCell<Vec<u8>>>) {
        let buffer = Rc::new(RefCell::new(Vec::new()));
        let replay = Replay::new(&EngineConfig::default(), LineOutput::new(buffer.clone()));
        (replay, buffer)
    }

    fn written(buffer: &Rc<RefCell<Vec<u8>>>) -> Vec<OutputMessage> {
        String::from_utf8(buffer.borrow().clone())
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn spoken(buffer: &Rc<RefCell<Vec<u8>>>) -> Vec<String> {
        written(buffer)
            .into_iter()
            .filter_map(|m| match m {
                OutputMessage::Say { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_session_from_mock_input() {
        let input = tokio_test::io::Builder::new()
            .read(b"{\"type\":\"snapshot\",\"state\":{\"exam\":{\"active\":true,\"zoom\":1.0}}}\n")
            .read(b"not json\n")
            .read(b"{\"type\":\"patch\",\"path\":\"exam.zoom\",\"value\":1.06}\n")
            .read(b"{\"type\":\"command\",\"command\":\"announce_state\"}\n")
            .build();

        let (mut replay, buffer) = create_replay();
        let stats = tokio_test::block_on(replay.run(input, std::future::pending())).unwrap();

        assert_eq!(stats.messages, 3);
        assert_eq!(stats.commands, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(replay.dispatcher().active_mode(), Some(ModeKind::HotspotExam));
        assert_eq!(
            spoken(&buffer),
            vec![
                "Examination. 0 hotspots. Zoom 100%",
                "Zoom 106%",
                "Zoom 106%. Cursor not on a hotspot. 0 hotspots",
            ]
        );
    }

    #[test]
    fn test_shutdown_stops_loop() {
        let input = tokio_test::io::Builder::new().wait(Duration::from_secs(3600)).build();
        let (mut replay, _buffer) = create_replay();
        let stats = tokio_test::block_on(replay.run(input, std::future::ready(()))).unwrap();
        assert_eq!(stats, ReplayStats::default());
    }

    #[test]
    fn test_events_written_on_transition() {
        let (mut replay, buffer) = create_replay();
        replay.handle_line(r#"{"type":"snapshot","state":{"dot_puzzle":{"active":true}}}"#);
        replay.handle_line(r#"{"type":"snapshot","state":{}}"#);

        let events: Vec<_> = written(&buffer)
            .into_iter()
            .filter_map(|m| match m {
                OutputMessage::Event { event } => Some(event.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], "MODE_ENTERED (dot_puzzle)");
        assert!(events[1].starts_with("MODE_EXITED (dot_puzzle"));
    }
}
