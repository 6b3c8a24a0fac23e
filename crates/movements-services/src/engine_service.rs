//! Engine service: one worker thread owns the session
//!
//! Button events and sensor samples can come from different threads; they
//! all go through one command channel so the session sees a single writer.

use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use movements_core::{Event, MovementsError, Response, Session};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::MovementsConfig;
use crate::orientation::{Orientation, OrientationNormalizer, SampleThrottle};
use crate::output::{deliver, NoteOutput, VoicingSink};

const COMMAND_QUEUE: usize = 256;

#[derive(Debug, Error)]
pub enum EngineServiceError {
    #[error("Engine service already running")]
    AlreadyRunning,
    #[error("Engine service not running")]
    NotRunning,
    #[error("Engine worker stopped unexpectedly")]
    Disconnected,
    #[error("Invalid engine config: {0}")]
    Config(#[from] MovementsError),
    #[error("Failed to spawn engine worker: {0}")]
    Spawn(#[from] std::io::Error),
}

pub enum EngineCommand {
    Apply(Event),
    /// Report the current voicing without changing anything
    Snapshot,
    Shutdown,
}

/// Published after every applied event and snapshot
#[derive(Debug, Clone)]
pub struct EngineUpdate {
    /// `None` for snapshots
    pub event: Option<Event>,
    pub response: Response,
    pub output: NoteOutput,
}

pub struct EngineService {
    config: MovementsConfig,
    commands: Option<Sender<EngineCommand>>,
    worker: Option<JoinHandle<()>>,
    normalizer: OrientationNormalizer,
    throttle: SampleThrottle,
}

impl EngineService {
    pub fn new(config: MovementsConfig) -> Self {
        Self {
            normalizer: OrientationNormalizer::new(&config.sensor),
            throttle: SampleThrottle::from_config(&config.sensor),
            config,
            commands: None,
            worker: None,
        }
    }

    pub fn config(&self) -> &MovementsConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.commands.is_some()
    }

    /// Spawn the worker. Every voicing goes to `sink`; updates arrive on the
    /// returned receiver.
    pub fn start(&mut self, sink: Box<dyn VoicingSink>) -> Result<Receiver<EngineUpdate>, EngineServiceError> {
        if self.commands.is_some() {
            return Err(EngineServiceError::AlreadyRunning);
        }

        let session = Session::with_config(self.config.key_root, self.config.motion.clone())?;
        let (cmd_tx, cmd_rx) = bounded::<EngineCommand>(COMMAND_QUEUE);
        let (update_tx, update_rx) = unbounded::<EngineUpdate>();
        let transpose = self.config.transpose;
        let bass = self.config.bass;

        let worker = thread::Builder::new()
            .name("movements-engine".into())
            .spawn(move || Self::run_loop(session, cmd_rx, update_tx, sink, transpose, bass))?;

        self.commands = Some(cmd_tx);
        self.worker = Some(worker);
        self.throttle.reset();

        info!(key_root = self.config.key_root, transpose, bass, "Engine service started");
        Ok(update_rx)
    }

    pub fn stop(&mut self) -> Result<(), EngineServiceError> {
        let commands = self.commands.take().ok_or(EngineServiceError::NotRunning)?;
        let _ = commands.send(EngineCommand::Shutdown);
        drop(commands);

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Engine worker panicked");
            }
        }

        info!("Engine service stopped");
        Ok(())
    }

    /// Queue an event. Blocks only while the command queue is full.
    pub fn send(&self, event: Event) -> Result<(), EngineServiceError> {
        self.command(EngineCommand::Apply(event))
    }

    pub fn request_snapshot(&self) -> Result<(), EngineServiceError> {
        self.command(EngineCommand::Snapshot)
    }

    /// Normalize and throttle a raw sensor reading, then queue it as motion.
    /// Returns whether the reading was forwarded.
    pub fn send_orientation(&mut self, reading: Orientation, now: Instant) -> Result<bool, EngineServiceError> {
        if !self.is_running() {
            return Err(EngineServiceError::NotRunning);
        }
        if !self.throttle.accept(now) {
            return Ok(false);
        }
        let sample = self.normalizer.normalize(reading);
        self.send(Event::Motion {
            roll: sample.roll,
            pitch: sample.pitch,
        })?;
        Ok(true)
    }

    fn command(&self, command: EngineCommand) -> Result<(), EngineServiceError> {
        let commands = self.commands.as_ref().ok_or(EngineServiceError::NotRunning)?;
        commands.send(command).map_err(|_| EngineServiceError::Disconnected)
    }

    fn run_loop(
        mut session: Session,
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineUpdate>,
        mut sink: Box<dyn VoicingSink>,
        transpose: i32,
        bass: bool,
    ) {
        while let Ok(command) = rx.recv() {
            let (event, response) = match command {
                EngineCommand::Apply(event) => {
                    let response = session.apply(&event);
                    debug!(event = %event, label = %response.label, "Applied");
                    (Some(event), response)
                }
                EngineCommand::Snapshot => (None, session.current()),
                EngineCommand::Shutdown => break,
            };

            let output = NoteOutput::from_response(&response, transpose, bass);
            deliver(sink.as_mut(), &output);

            // Nobody listening is fine; the sink still heard it
            let _ = tx.send(EngineUpdate {
                event,
                response,
                output,
            });
        }

        sink.silence();
        debug!("Engine worker exiting");
    }
}

impl Drop for EngineService {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
