pub mod console;
pub mod focus;
pub mod names;

pub use console::ConsoleSpeech;
pub use focus::FocusSlot;
pub use names::resolve;

use orrery_config::{FocusConfig, SpeechConfig};
use orrery_input::Subscription;
use orrery_scene::CelestialBody;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Event from a running recognition session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// A final recognition result.
    Transcript(String),
    /// The engine reported an error; an `Ended` usually follows.
    Fault(String),
    /// The session stopped.
    Ended,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpeechError {
    #[error("No speech recognition engine available")]
    Unavailable,
    #[error("Speech session failed to start: {0}")]
    Start(String),
    #[error("Speech session fault: {0}")]
    SessionFault(String),
    #[error("Speech session ended {0} times without a result; giving up")]
    RestartLimit(u32),
}

/// A speech recognition backend.
pub trait SpeechEngine {
    /// Open a continuous recognition session.
    fn start(&mut self) -> Result<Subscription<SpeechEvent>, SpeechError>;
}

/// Turns recognized speech into a focus target.
///
/// Keeps a recognition session open while listening, restarting it when the
/// engine ends it, up to `max_restarts` times in a row without a transcript.
pub struct VoiceCommandResolver {
    engine: Option<Box<dyn SpeechEngine>>,
    session: Option<Subscription<SpeechEvent>>,
    focus: FocusSlot,
    listening: bool,
    restarts: u32,
    max_restarts: u32,
}

impl VoiceCommandResolver {
    /// `engine` is `None` on platforms without speech recognition.
    pub fn new(
        engine: Option<Box<dyn SpeechEngine>>,
        speech: &SpeechConfig,
        focus: &FocusConfig,
    ) -> Self {
        Self {
            engine: if speech.enabled { engine } else { None },
            session: None,
            focus: FocusSlot::from_secs(focus.dwell_secs),
            listening: false,
            restarts: 0,
            max_restarts: speech.max_restarts,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.engine.is_some()
    }

    /// Whether a recognition session is currently open.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn focus(&self) -> Option<CelestialBody> {
        self.focus.current()
    }

    pub fn focus_deadline(&self) -> Option<Instant> {
        self.focus.deadline()
    }

    /// Begin listening. A no-op if a session is already open.
    pub fn start(&mut self) -> Result<(), SpeechError> {
        if self.session.is_some() {
            return Ok(());
        }
        let engine = self.engine.as_mut().ok_or(SpeechError::Unavailable)?;
        let session = engine.start()?;

        self.session = Some(session);
        self.listening = true;
        self.restarts = 0;
        info!("Voice recognition started");
        Ok(())
    }

    /// Stop listening, drop the session and clear any focus.
    pub fn stop(&mut self) {
        self.listening = false;
        if self.session.take().is_some() {
            info!("Voice recognition stopped");
        }
        self.focus.clear();
    }

    /// Apply one transcript. Returns the body it focused, if any; an
    /// unrecognized transcript leaves the current focus alone.
    pub fn handle_transcript(&mut self, transcript: &str, now: Instant) -> Option<CelestialBody> {
        let body = resolve(transcript)?;
        self.focus.set(body, now);
        info!(%body, transcript, "Voice focus");
        Some(body)
    }

    /// Process pending session events. Faults are absorbed and returned for
    /// the caller to record.
    pub fn pump(&mut self, now: Instant) -> Vec<SpeechError> {
        let mut faults = Vec::new();
        let Some(session) = self.session.as_mut() else {
            return faults;
        };

        let events = session.drain();
        let mut ended = session.is_finished();

        for event in events {
            match event {
                SpeechEvent::Transcript(text) => {
                    self.restarts = 0;
                    if self.handle_transcript(&text, now).is_none() {
                        debug!(transcript = %text, "Transcript names no body");
                    }
                }
                SpeechEvent::Fault(message) => {
                    warn!(%message, "Speech session fault");
                    faults.push(SpeechError::SessionFault(message));
                }
                SpeechEvent::Ended => ended = true,
            }
        }

        if ended {
            self.session = None;
            if self.listening {
                self.restart(&mut faults);
            }
        }
        faults
    }

    /// Clear the focus once its dwell has passed.
    pub fn expire(&mut self, now: Instant) -> Option<CelestialBody> {
        let cleared = self.focus.expire(now);
        if let Some(body) = cleared {
            debug!(%body, "Voice focus expired");
        }
        cleared
    }

    fn restart(&mut self, faults: &mut Vec<SpeechError>) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        while self.restarts < self.max_restarts {
            self.restarts += 1;
            match engine.start() {
                Ok(session) => {
                    debug!(attempt = self.restarts, "Speech session restarted");
                    self.session = Some(session);
                    return;
                }
                Err(e) => {
                    warn!(?e, attempt = self.restarts, "Speech session restart failed");
                    faults.push(e);
                }
            }
        }

        warn!(restarts = self.restarts, "Speech restart limit reached, voice disabled");
        self.listening = false;
        faults.push(SpeechError::RestartLimit(self.restarts));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_input::Publisher;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Default)]
    struct EngineLog {
        sessions: Vec<Publisher<SpeechEvent>>,
        starts: u32,
        failing: bool,
    }

    struct FakeEngine(Rc<RefCell<EngineLog>>);

    impl SpeechEngine for FakeEngine {
        fn start(&mut self) -> Result<Subscription<SpeechEvent>, SpeechError> {
            let mut log = self.0.borrow_mut();
            log.starts += 1;
            if log.failing {
                return Err(SpeechError::Start("busy".into()));
            }
            let (publisher, subscription) = Subscription::channel();
            log.sessions.push(publisher);
            Ok(subscription)
        }
    }

    fn resolver(max_restarts: u32) -> (VoiceCommandResolver, Rc<RefCell<EngineLog>>) {
        let log = Rc::new(RefCell::new(EngineLog::default()));
        let speech = SpeechConfig {
            max_restarts,
            ..SpeechConfig::default()
        };
        let resolver = VoiceCommandResolver::new(
            Some(Box::new(FakeEngine(log.clone()))),
            &speech,
            &FocusConfig::default(),
        );
        (resolver, log)
    }

    fn say(log: &Rc<RefCell<EngineLog>>, event: SpeechEvent) {
        let log = log.borrow();
        let current = log.sessions.last().unwrap();
        assert!(current.publish(event));
    }

    #[test]
    fn no_engine_is_unavailable() {
        let mut resolver =
            VoiceCommandResolver::new(None, &SpeechConfig::default(), &FocusConfig::default());
        assert!(!resolver.is_supported());
        assert_eq!(resolver.start(), Err(SpeechError::Unavailable));
        assert!(!resolver.is_active());
    }

    #[test]
    fn disabled_in_config_drops_engine() {
        let log = Rc::new(RefCell::new(EngineLog::default()));
        let speech = SpeechConfig {
            enabled: false,
            ..SpeechConfig::default()
        };
        let resolver = VoiceCommandResolver::new(
            Some(Box::new(FakeEngine(log))),
            &speech,
            &FocusConfig::default(),
        );
        assert!(!resolver.is_supported());
    }

    #[test]
    fn transcripts_set_focus() {
        let (mut resolver, log) = resolver(3);
        let t0 = Instant::now();
        resolver.start().unwrap();
        assert!(resolver.is_active());

        say(&log, SpeechEvent::Transcript("quero ver marte".into()));
        resolver.pump(t0);
        assert_eq!(resolver.focus(), Some(CelestialBody::Mars));

        say(&log, SpeechEvent::Transcript("hmm".into()));
        resolver.pump(t0);
        assert_eq!(resolver.focus(), Some(CelestialBody::Mars));
    }

    #[test]
    fn focus_expires_once_per_dwell() {
        let (mut resolver, _) = resolver(3);
        let t0 = Instant::now();

        resolver.handle_transcript("marte", t0);
        resolver.handle_transcript("plutão", t0 + Duration::from_secs(4));

        assert_eq!(resolver.expire(t0 + Duration::from_secs(5)), None);
        assert_eq!(resolver.focus(), Some(CelestialBody::Pluto));
        assert_eq!(
            resolver.expire(t0 + Duration::from_secs(9)),
            Some(CelestialBody::Pluto)
        );
        assert_eq!(resolver.expire(t0 + Duration::from_secs(20)), None);
    }

    #[test]
    fn infinite_dwell_uses_default_deadline() {
        let config = FocusConfig {
            dwell_secs: f32::INFINITY,
            ..FocusConfig::default()
        };
        let mut resolver = VoiceCommandResolver::new(None, &SpeechConfig::default(), &config);
        let t0 = Instant::now();

        assert_eq!(resolver.focus_deadline(), None);
        resolver.handle_transcript("netuno", t0);
        assert_eq!(resolver.focus_deadline(), Some(t0 + focus::DEFAULT_DWELL));
    }

    #[test]
    fn ended_session_restarts_while_listening() {
        let (mut resolver, log) = resolver(3);
        resolver.start().unwrap();

        say(&log, SpeechEvent::Ended);
        let faults = resolver.pump(Instant::now());
        assert!(faults.is_empty());
        assert!(resolver.is_active());
        assert_eq!(log.borrow().starts, 2);
        assert!(log.borrow().sessions[0].is_closed());
    }

    #[test]
    fn dropped_engine_side_counts_as_ended() {
        let (mut resolver, log) = resolver(3);
        resolver.start().unwrap();

        log.borrow_mut().sessions.clear();
        resolver.pump(Instant::now());
        assert!(resolver.is_active());
        assert_eq!(log.borrow().starts, 2);
    }

    #[test]
    fn restarts_are_capped_without_results() {
        let (mut resolver, log) = resolver(2);
        let now = Instant::now();
        resolver.start().unwrap();

        say(&log, SpeechEvent::Ended);
        resolver.pump(now);
        say(&log, SpeechEvent::Ended);
        resolver.pump(now);
        assert!(resolver.is_active());

        say(&log, SpeechEvent::Ended);
        let faults = resolver.pump(now);
        assert_eq!(faults, vec![SpeechError::RestartLimit(2)]);
        assert!(!resolver.is_active());
        assert_eq!(log.borrow().starts, 3);

        // Nothing left to pump.
        assert!(resolver.pump(now).is_empty());
    }

    #[test]
    fn transcript_resets_restart_budget() {
        let (mut resolver, log) = resolver(1);
        let now = Instant::now();
        resolver.start().unwrap();

        for _ in 0..5 {
            say(&log, SpeechEvent::Transcript("terra".into()));
            say(&log, SpeechEvent::Ended);
            assert!(resolver.pump(now).is_empty());
            assert!(resolver.is_active());
        }
        assert_eq!(resolver.focus(), Some(CelestialBody::Earth));
    }

    #[test]
    fn failing_restarts_are_swallowed() {
        let (mut resolver, log) = resolver(3);
        resolver.start().unwrap();
        log.borrow_mut().failing = true;

        say(&log, SpeechEvent::Fault("network".into()));
        say(&log, SpeechEvent::Ended);
        let faults = resolver.pump(Instant::now());

        assert_eq!(faults.len(), 5);
        assert_eq!(faults[0], SpeechError::SessionFault("network".into()));
        assert_eq!(faults[4], SpeechError::RestartLimit(3));
        assert!(!resolver.is_active());
        assert_eq!(log.borrow().starts, 4);
    }

    #[test]
    fn stop_unsubscribes_and_clears_focus() {
        let (mut resolver, log) = resolver(3);
        resolver.start().unwrap();
        resolver.handle_transcript("saturno", Instant::now());

        resolver.stop();
        assert!(!resolver.is_active());
        assert_eq!(resolver.focus(), None);
        assert!(log.borrow().sessions[0].is_closed());

        // No restart once stopped.
        resolver.pump(Instant::now());
        assert_eq!(log.borrow().starts, 1);
    }
}
