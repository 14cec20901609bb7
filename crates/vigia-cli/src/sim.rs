//! Simulated peripherals for running the controller off-board.
//!
//! The real deployment talks to a sensor board; this module stands in for
//! it so the controller can be exercised from a terminal. Sensor values
//! drift deterministically, servo commands and display screens go to the
//! log, and the keypad is driven from stdin.

use std::collections::VecDeque;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;
use vigia_core::ServoAngle;
use vigia_hardware::{
    Actuator, Display, HardwareError, KeyEvent, Keypad, RawReading, Result, SensorBank,
};

/// Sensor bank producing a slow deterministic weather cycle.
///
/// Each read advances one step: temperature and humidity oscillate gently,
/// the rain channel sweeps between dry and soaked so both sides of the
/// threshold are visited, and motion pulses periodically.
pub struct SimulatedSensorBank {
    step: u64,
}

impl SimulatedSensorBank {
    pub fn new() -> Self {
        Self { step: 0 }
    }
}

impl SensorBank for SimulatedSensorBank {
    async fn read(&mut self) -> Result<RawReading> {
        let step = self.step;
        self.step += 1;

        let phase = (step % 40) as f32 / 40.0;
        let swing = (phase * std::f32::consts::TAU).sin();

        // Rain sweeps full-range over 20 reads, crossing the threshold.
        let moisture_raw = (((step % 20) * 4095) / 19) as u16;

        Ok(RawReading {
            temperature: 21.0 + 4.0 * swing,
            humidity: 55.0 + 10.0 * swing,
            gas_raw: 700 + ((step * 37) % 300) as u16,
            moisture_raw,
            motion: step % 7 == 0,
        })
    }
}

/// Servo stand-in that logs every commanded angle.
pub struct LoggingActuator;

impl Actuator for LoggingActuator {
    async fn set_angle(&mut self, angle: ServoAngle) -> Result<()> {
        info!(angle = %angle, "servo");
        Ok(())
    }
}

/// Display stand-in that logs each screen as one line.
pub struct LoggingDisplay;

impl Display for LoggingDisplay {
    async fn show_lines(&mut self, lines: &[String]) -> Result<()> {
        info!(screen = lines.join(" | "), "display");
        Ok(())
    }
}

/// Keypad fed from stdin.
///
/// Each input line is split into characters: `1`-`9` are PIN digits, `*`
/// clears the buffer, `0` submits. Anything else is dropped, so a whole
/// PIN can be typed as one line ("12450") or key by key.
pub struct StdinKeypad {
    lines: Lines<BufReader<Stdin>>,
    pending: VecDeque<KeyEvent>,
}

impl StdinKeypad {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            pending: VecDeque::new(),
        }
    }

    fn key_for(c: char) -> Option<KeyEvent> {
        match c {
            '1'..='9' => Some(KeyEvent::Digit(c as u8 - b'0')),
            '*' => Some(KeyEvent::Reset),
            '0' => Some(KeyEvent::Submit),
            _ => None,
        }
    }
}

impl Keypad for StdinKeypad {
    async fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Some(key) = self.pending.pop_front() {
                return Ok(key);
            }

            let line = self
                .lines
                .next_line()
                .await
                .map_err(HardwareError::from)?
                .ok_or_else(|| HardwareError::disconnected("stdin keypad"))?;

            self.pending.extend(line.chars().filter_map(Self::key_for));
        }
    }
}
