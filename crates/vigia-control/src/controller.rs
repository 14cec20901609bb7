//! The controller: cooperative sampling/key-event loop.
//!
//! One task owns every peripheral plus the gate, policy, and builder, and
//! alternates between two duties:
//!
//! - a polling sampler that fires when wall-elapsed time since the last
//!   sample reaches the configured interval (checked once per loop
//!   iteration, so jitter up to one iteration is expected), and
//! - keypad servicing, consuming at most one key per iteration.
//!
//! The history ring lives behind an async mutex shared with
//! [`QueryEngine`] readers, so an append is one critical section and a
//! reader can never observe a half-written snapshot.

use crate::{
    builder::SnapshotBuilder,
    config::ControllerConfig,
    gate::{AccessGate, GateEvent},
    policy::{AutomationPolicy, CoverCommand},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, info, warn};
use vigia_core::{CoverState, Result, SensorSnapshot, ServoAngle};
use vigia_hardware::{
    Actuator, Clock, Display, KeyEvent, Keypad, RawReading, SensorBank,
};
use vigia_history::{HistoryRing, QueryEngine, SharedHistory};

/// Upper bound on one keypad wait, keeping the loop cooperative.
///
/// Bounds sampler jitter: the timer check can be delayed by at most this
/// long while waiting for a key.
const KEY_POLL: Duration = Duration::from_millis(50);

/// Prompt shown while the gate is accumulating PIN digits.
const MSG_ENTER_PIN: &str = "Enter PIN";

/// Shown once on a successful unlock.
const MSG_WELCOME: &str = "Welcome!";

/// Transient message after a PIN mismatch.
const MSG_RETRY: &str = "Try again";

/// Home-monitoring controller.
///
/// Generic over its peripherals so tests run against the mocks in
/// `vigia-hardware` and the deployed binary supplies real drivers.
///
/// # Examples
///
/// ```no_run
/// use vigia_control::{Controller, ControllerConfig};
/// use vigia_hardware::mock::{
///     MockActuator, MockDisplay, MockKeypad, MockSensorBank, SystemClock,
/// };
///
/// # async fn example() -> vigia_core::Result<()> {
/// let (sensors, _feed) = MockSensorBank::new();
/// let (actuator, _servo) = MockActuator::new();
/// let (display, _screen) = MockDisplay::new();
/// let (keypad, _keys) = MockKeypad::new();
///
/// let mut controller = Controller::new(
///     ControllerConfig::default(),
///     sensors,
///     actuator,
///     display,
///     keypad,
///     SystemClock,
/// )?;
///
/// let queries = controller.query_engine();
/// controller.run().await
/// # }
/// ```
pub struct Controller<S, A, D, K, C> {
    sensors: S,
    actuator: A,
    display: D,
    keypad: K,
    clock: C,

    gate: AccessGate,
    policy: AutomationPolicy,
    builder: SnapshotBuilder,
    history: SharedHistory,
    sample_interval: Duration,

    /// Cover state recorded with the most recent snapshot.
    cover_state: CoverState,

    /// Angle most recently commanded to the servo.
    commanded_angle: ServoAngle,
}

impl<S, A, D, K, C> Controller<S, A, D, K, C>
where
    S: SensorBank,
    A: Actuator,
    D: Display,
    K: Keypad,
    C: Clock,
{
    /// Create a controller from validated configuration and peripherals.
    ///
    /// # Errors
    /// Returns an error if the configuration fails validation.
    pub fn new(
        config: ControllerConfig,
        sensors: S,
        actuator: A,
        display: D,
        keypad: K,
        clock: C,
    ) -> Result<Self> {
        config.validate()?;
        let history = Arc::new(Mutex::new(HistoryRing::new(config.history_capacity)?));
        Ok(Self {
            sensors,
            actuator,
            display,
            keypad,
            clock,
            gate: AccessGate::new(config.pin.clone()),
            policy: AutomationPolicy::new(config.rain_threshold),
            builder: SnapshotBuilder::new(),
            history,
            sample_interval: config.sample_interval(),
            cover_state: CoverState::Exterior,
            commanded_angle: ServoAngle::COVER_CLOSED,
        })
    }

    /// Shared handle to the history ring.
    pub fn history(&self) -> SharedHistory {
        Arc::clone(&self.history)
    }

    /// Read-only query engine over the history ring.
    ///
    /// Safe to hand to concurrent readers; every clone observes appends
    /// made by this controller.
    pub fn query_engine(&self) -> QueryEngine {
        QueryEngine::new(self.history())
    }

    /// Whether the manual override is active.
    pub fn is_unlocked(&self) -> bool {
        self.gate.is_unlocked()
    }

    /// One-time power-on sequence: cover closed, PIN prompt shown.
    pub async fn startup(&mut self) {
        let capacity = self.history.lock().await.capacity();
        info!(
            capacity,
            interval_ms = self.sample_interval.as_millis() as u64,
            threshold = self.policy.rain_threshold(),
            "controller starting"
        );
        self.command_servo(ServoAngle::COVER_CLOSED).await;
        self.show_pin_prompt().await;
    }

    /// Run the cooperative loop forever.
    ///
    /// Never returns under normal operation; the deployed device runs
    /// until power-off.
    pub async fn run(&mut self) -> Result<()> {
        self.startup().await;

        // First sample fires immediately; later ones follow the interval.
        self.sample_now().await;
        let mut last_sample = Instant::now();

        loop {
            if last_sample.elapsed() >= self.sample_interval {
                last_sample = Instant::now();
                self.sample_now().await;
            }

            // At most one key per iteration; the bounded wait keeps the
            // sampler check reachable.
            match timeout(KEY_POLL, self.keypad.read_key()).await {
                Ok(Ok(key)) => self.handle_key(key).await,
                Ok(Err(err)) => {
                    warn!(error = %err, "keypad read failed");
                    sleep(KEY_POLL).await;
                }
                Err(_) => {} // no key this slice
            }
        }
    }

    /// Take one sample now: read, decide, actuate, append.
    ///
    /// Never fails: a quiet sensor bank is sanitized to the previous
    /// cycle's values. Returns the snapshot that was appended.
    pub async fn sample_now(&mut self) -> SensorSnapshot {
        let raw = match self.sensors.read().await {
            Ok(raw) => Some(raw),
            Err(err) => {
                warn!(error = %err, "sensor read failed, substituting previous values");
                None
            }
        };

        let now = self.clock.now();
        let snapshot = match raw {
            Some(raw) => {
                self.apply_policy(&raw).await;
                self.builder.build(&raw, now, self.cover_state)
            }
            None => self.builder.build_from_last(now, self.cover_state),
        };

        debug!(
            temperature = snapshot.temperature,
            humidity = snapshot.humidity,
            gas = snapshot.gas_level,
            moisture = snapshot.moisture_percent,
            motion = snapshot.motion_detected,
            cover = %snapshot.cover_state,
            "sampled"
        );

        self.history.lock().await.append(snapshot.clone());
        snapshot
    }

    /// Latest snapshot, sampling immediately if the ring has never been
    /// written (lazy-fill for the real-time endpoint).
    pub async fn snapshot(&mut self) -> SensorSnapshot {
        let latest = self.history.lock().await.latest().cloned();
        match latest {
            Some(snapshot) => snapshot,
            None => self.sample_now().await,
        }
    }

    /// Feed one key event through the gate and perform its side effects.
    pub async fn handle_key(&mut self, key: KeyEvent) {
        match self.gate.handle_key(key) {
            GateEvent::DigitAccepted { buffered } => {
                // Echo masked digits under the prompt.
                self.show(&[MSG_ENTER_PIN.to_string(), "*".repeat(buffered)])
                    .await;
            }
            GateEvent::BufferCleared => {
                self.show_pin_prompt().await;
            }
            GateEvent::Unlocked => {
                info!("PIN accepted, automation suspended");
                // One-time open command; automation holds from here on.
                self.command_servo(ServoAngle::COVER_OPEN).await;
                self.show(&[MSG_WELCOME.to_string()]).await;
            }
            GateEvent::Denied => {
                debug!("PIN rejected");
                self.show(&[MSG_RETRY.to_string()]).await;
                self.show_pin_prompt().await;
            }
            GateEvent::Ignored => {}
        }
    }

    /// Apply the automation policy for this cycle's moisture reading.
    async fn apply_policy(&mut self, raw: &RawReading) {
        let moisture = SnapshotBuilder::moisture_percent(raw.moisture_raw);
        match self.policy.decide(moisture, self.gate.is_unlocked()) {
            CoverCommand::Move { cover, angle } => {
                if angle != self.commanded_angle {
                    debug!(moisture, cover = %cover, angle = %angle, "cover command");
                }
                self.cover_state = cover;
                self.command_servo(angle).await;
            }
            CoverCommand::Hold => {
                // Override active: last commanded position and last
                // recorded cover state both stand.
            }
        }
    }

    /// Fire-and-forget servo command.
    async fn command_servo(&mut self, angle: ServoAngle) {
        self.commanded_angle = angle;
        if let Err(err) = self.actuator.set_angle(angle).await {
            warn!(error = %err, angle = %angle, "servo command failed");
        }
    }

    /// Best-effort display write.
    async fn show(&mut self, lines: &[String]) {
        if let Err(err) = self.display.show_lines(lines).await {
            debug!(error = %err, "display write failed");
        }
    }

    async fn show_pin_prompt(&mut self) {
        self.show(&[MSG_ENTER_PIN.to_string(), String::new()]).await;
    }
}
