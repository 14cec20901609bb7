//! Integration tests for the end-to-end controller flow.
//!
//! These drive a [`Controller`] wired to mock peripherals through complete
//! scenarios: startup, automation cycles, manual unlock, sensor dropout,
//! and history queries over the sampled data.

use vigia_control::{Controller, ControllerConfig};
use vigia_core::{CoverState, SampleTimestamp, SensorKind, ServoAngle};
use vigia_hardware::{
    KeyEvent, RawReading,
    mock::{
        ManualClock, MockActuator, MockActuatorHandle, MockDisplay, MockDisplayHandle,
        MockKeypad, MockKeypadHandle, MockSensorBank, MockSensorBankHandle,
    },
};

// ============================================================================
// Harness
// ============================================================================

struct Handles {
    sensors: MockSensorBankHandle,
    servo: MockActuatorHandle,
    screen: MockDisplayHandle,
    #[allow(dead_code)]
    keys: MockKeypadHandle,
    clock: ManualClock,
}

type TestController =
    Controller<MockSensorBank, MockActuator, MockDisplay, MockKeypad, ManualClock>;

fn controller_with(config: ControllerConfig) -> (TestController, Handles) {
    let (sensors, sensors_handle) = MockSensorBank::new();
    let (actuator, servo) = MockActuator::new();
    let (display, screen) = MockDisplay::new();
    let (keypad, keys) = MockKeypad::new();
    let clock = ManualClock::starting_at(
        SampleTimestamp::parse("10/05/2025 08:00:00").unwrap(),
    );

    let controller = Controller::new(config, sensors, actuator, display, keypad, clock.clone())
        .expect("default configuration is valid");

    (
        controller,
        Handles {
            sensors: sensors_handle,
            servo,
            screen,
            keys,
            clock,
        },
    )
}

fn controller() -> (TestController, Handles) {
    controller_with(ControllerConfig::default())
}

/// Raw ADC count producing the given wetness percentage.
fn raw_for_moisture(percent: u8) -> u16 {
    // percent = 100 - raw * 100 / 4095
    ((u32::from(100 - percent) * 4095) / 100) as u16 + 1
}

fn reading(moisture_percent: u8) -> RawReading {
    RawReading {
        temperature: 21.0,
        humidity: 55.0,
        gas_raw: 1000,
        moisture_raw: raw_for_moisture(moisture_percent),
        motion: false,
    }
}

async fn enter_pin(controller: &mut TestController, digits: &[u8]) {
    for &d in digits {
        controller.handle_key(KeyEvent::Digit(d)).await;
    }
    controller.handle_key(KeyEvent::Submit).await;
}

// ============================================================================
// Startup
// ============================================================================

#[tokio::test]
async fn test_startup_closes_cover_once_and_prompts_for_pin() {
    let (mut controller, handles) = controller();

    controller.startup().await;

    assert_eq!(handles.servo.commanded(), vec![ServoAngle::COVER_CLOSED]);
    let screen = handles.screen.last_screen().unwrap();
    assert_eq!(screen[0], "Enter PIN");
}

// ============================================================================
// Automation cycles
// ============================================================================

#[tokio::test]
async fn test_moisture_sequence_drives_cover() {
    let (mut controller, handles) = controller();
    handles
        .sensors
        .push_all([reading(10), reading(60), reading(40)]);

    let mut states = Vec::new();
    for _ in 0..3 {
        states.push(controller.sample_now().await.cover_state);
        handles.clock.advance_secs(5);
    }

    assert_eq!(
        states,
        vec![CoverState::Exterior, CoverState::Covered, CoverState::Exterior]
    );
    assert_eq!(
        handles.servo.commanded(),
        vec![
            ServoAngle::COVER_OPEN,
            ServoAngle::COVER_CLOSED,
            ServoAngle::COVER_OPEN,
        ]
    );
}

#[tokio::test]
async fn test_threshold_boundary_closes_cover() {
    let (mut controller, handles) = controller();
    handles.sensors.push(reading(50));

    let snapshot = controller.sample_now().await;

    assert_eq!(snapshot.cover_state, CoverState::Covered);
    assert_eq!(snapshot.moisture_percent, 50);
    assert_eq!(handles.servo.last(), Some(ServoAngle::COVER_CLOSED));
}

#[tokio::test]
async fn test_snapshots_carry_advancing_timestamps() {
    let (mut controller, handles) = controller();
    handles.sensors.push_all([reading(10), reading(10)]);

    let first = controller.sample_now().await;
    handles.clock.advance_secs(5);
    let second = controller.sample_now().await;

    assert_eq!(first.timestamp.format(), "10/05/2025 08:00:00");
    assert_eq!(second.timestamp.format(), "10/05/2025 08:00:05");
}

// ============================================================================
// Sensor dropout
// ============================================================================

#[tokio::test]
async fn test_sensor_dropout_substitutes_previous_cycle() {
    let (mut controller, handles) = controller();
    handles.sensors.push(RawReading {
        temperature: 23.5,
        humidity: 61.0,
        gas_raw: 2048,
        moisture_raw: raw_for_moisture(60),
        motion: true,
    });

    let good = controller.sample_now().await;
    assert_eq!(good.cover_state, CoverState::Covered);

    // Queue is empty: the next cycle reads nothing but still appends.
    handles.clock.advance_secs(5);
    let substituted = controller.sample_now().await;

    assert_eq!(substituted.temperature, 23.5);
    assert_eq!(substituted.humidity, 61.0);
    assert_eq!(substituted.moisture_percent, 60);
    assert!(substituted.motion_detected);
    assert_eq!(substituted.cover_state, CoverState::Covered);
    assert_eq!(substituted.timestamp.format(), "10/05/2025 08:00:05");

    // No reading means no policy decision: the servo was not re-commanded.
    assert_eq!(handles.servo.commanded().len(), 1);

    let engine = controller.query_engine();
    assert_eq!(engine.len().await, 2);
}

// ============================================================================
// Manual unlock
// ============================================================================

#[tokio::test]
async fn test_correct_pin_opens_cover_and_suspends_automation() {
    let (mut controller, handles) = controller();

    enter_pin(&mut controller, &[1, 2, 4, 5]).await;

    assert!(controller.is_unlocked());
    assert_eq!(handles.servo.last(), Some(ServoAngle::COVER_OPEN));
    assert_eq!(
        handles.screen.last_screen(),
        Some(vec!["Welcome!".to_string()])
    );
    let commands_after_unlock = handles.servo.commanded().len();

    // A soaking reading would normally close the cover; unlocked it holds.
    handles.sensors.push(reading(95));
    let snapshot = controller.sample_now().await;

    assert_eq!(snapshot.moisture_percent, 95);
    assert_eq!(snapshot.cover_state, CoverState::Exterior);
    assert_eq!(handles.servo.commanded().len(), commands_after_unlock);
}

#[tokio::test]
async fn test_wrong_pin_denied_then_retry_succeeds() {
    let (mut controller, handles) = controller();

    enter_pin(&mut controller, &[9, 9, 9, 9]).await;

    assert!(!controller.is_unlocked());
    let screens = handles.screen.screens();
    // Retry message followed by a fresh prompt.
    assert_eq!(screens[screens.len() - 2], vec!["Try again".to_string()]);
    assert_eq!(screens[screens.len() - 1][0], "Enter PIN");
    assert!(handles.servo.commanded().is_empty());

    enter_pin(&mut controller, &[1, 2, 4, 5]).await;
    assert!(controller.is_unlocked());
    assert_eq!(handles.servo.last(), Some(ServoAngle::COVER_OPEN));
}

#[tokio::test]
async fn test_digits_echo_as_mask() {
    let (mut controller, handles) = controller();

    controller.handle_key(KeyEvent::Digit(1)).await;
    controller.handle_key(KeyEvent::Digit(2)).await;

    assert_eq!(
        handles.screen.last_screen(),
        Some(vec!["Enter PIN".to_string(), "**".to_string()])
    );

    controller.handle_key(KeyEvent::Reset).await;
    assert_eq!(
        handles.screen.last_screen(),
        Some(vec!["Enter PIN".to_string(), String::new()])
    );
}

#[tokio::test]
async fn test_unlock_commands_servo_exactly_once() {
    let (mut controller, handles) = controller();

    enter_pin(&mut controller, &[1, 2, 4, 5]).await;
    let after_unlock = handles.servo.commanded().len();
    assert_eq!(after_unlock, 1);

    // Further keys are ignored and never re-command the servo.
    controller.handle_key(KeyEvent::Digit(3)).await;
    controller.handle_key(KeyEvent::Submit).await;
    assert_eq!(handles.servo.commanded().len(), after_unlock);
}

// ============================================================================
// History and queries
// ============================================================================

#[tokio::test]
async fn test_query_engine_sees_sampled_series() {
    let (mut controller, handles) = controller();
    handles
        .sensors
        .push_all([reading(10), reading(60), reading(40)]);

    for _ in 0..3 {
        controller.sample_now().await;
        handles.clock.advance_secs(5);
    }

    let engine = controller.query_engine();
    let series = engine.series(SensorKind::Moisture, None, None).await;

    assert_eq!(series.len(), 3);
    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![10.0, 60.0, 40.0]);
    assert_eq!(series[0].timestamp, "10/05/2025 08:00:00");
    assert_eq!(series[2].timestamp, "10/05/2025 08:00:10");
}

#[tokio::test]
async fn test_snapshot_lazy_fills_empty_history() {
    let (mut controller, handles) = controller();
    handles.sensors.push(reading(10));

    // First call samples because the ring has never been written.
    let first = controller.snapshot().await;
    assert_eq!(first.moisture_percent, 10);
    assert_eq!(handles.sensors.pending(), 0);

    // Second call serves the stored snapshot without another read.
    let second = controller.snapshot().await;
    assert_eq!(second, first);

    let engine = controller.query_engine();
    assert_eq!(engine.len().await, 1);
}

#[tokio::test]
async fn test_ring_capacity_bounds_history() {
    let config = ControllerConfig {
        history_capacity: 3,
        ..ControllerConfig::default()
    };
    let (mut controller, handles) = controller_with(config);
    handles
        .sensors
        .push_all((0..5).map(|_| reading(10)));

    for _ in 0..5 {
        controller.sample_now().await;
        handles.clock.advance_secs(5);
    }

    let engine = controller.query_engine();
    assert_eq!(engine.len().await, 3);

    // Oldest two samples were evicted.
    let series = engine.series(SensorKind::Moisture, None, None).await;
    assert_eq!(series[0].timestamp, "10/05/2025 08:00:10");
}
