use skylink::config::Config;
use skylink::policy::{decide, Command, Movement};
use skylink::telemetry::Telemetry;

fn reading() -> Telemetry {
    // Calm, healthy cruise: matches no safety rule.
    Telemetry {
        x: 11.0,
        y: 50.0,
        battery: 80.0,
        gyroscope: (0.0, 0.0, 0.0),
        wind: 5.0,
        dust: 5.0,
        sensor: "NONE".to_string(),
    }
}

fn cfg() -> Config {
    Config::default()
}

#[test]
fn test_critical_battery_forces_full_forward() {
    let mut t = reading();
    t.battery = 8.0;
    assert_eq!(
        decide(&t, &cfg()),
        Command::new(5, 1, Movement::Forward),
        "critical battery overrides everything"
    );
}

#[test]
fn test_critical_battery_boundary() {
    let mut t = reading();
    t.battery = 10.0;
    assert_eq!(decide(&t, &cfg()).speed, 5, "battery == threshold still fires");

    t.battery = 10.01;
    let command = decide(&t, &cfg());
    assert_eq!(
        command,
        Command::new(2, 2, Movement::Forward),
        "just above threshold falls through to the low-battery speed cap"
    );
}

#[test]
fn test_critical_battery_beats_red_sensor() {
    // Matches rule 1 and rule 3 at once; rule 1 must win.
    let mut t = reading();
    t.battery = 5.0;
    t.sensor = "RED".to_string();
    t.y = 5.0;
    assert_eq!(decide(&t, &cfg()), Command::new(5, 1, Movement::Forward));
}

#[test]
fn test_critical_tilt_stops_and_descends() {
    let mut t = reading();
    t.gyroscope = (1.0, 1.0, 1.0); // norm ~1.73, well past 45 degrees
    t.y = 5.0;
    assert_eq!(decide(&t, &cfg()), Command::new(0, -1, Movement::Forward));
}

#[test]
fn test_critical_tilt_on_the_ground_holds_altitude() {
    let mut t = reading();
    t.gyroscope = (1.0, 1.0, 1.0);
    t.y = 0.5;
    assert_eq!(
        decide(&t, &cfg()),
        Command::new(0, 0, Movement::Forward),
        "no descend request when not airborne"
    );
}

#[test]
fn test_red_sensor_at_unsafe_altitude() {
    let mut t = reading();
    t.sensor = "RED".to_string();
    t.y = 2.8; // boundary: >= fires
    assert_eq!(decide(&t, &cfg()), Command::new(2, -1, Movement::Forward));
}

#[test]
fn test_yellow_sensor_very_high() {
    let mut t = reading();
    t.sensor = "YELLOW".to_string();
    t.y = 150.0;
    assert_eq!(decide(&t, &cfg()), Command::new(3, -2, Movement::Forward));
}

#[test]
fn test_severe_environment_always_hovers() {
    // The reverse arm of this rule needs a wind/dust jump between cycles,
    // but the policy only ever sees the current reading, so it hovers.
    let mut t = reading();
    t.wind = 90.0;
    assert_eq!(decide(&t, &cfg()), Command::new(1, 1, Movement::Forward));

    t.wind = 5.0;
    t.dust = 75.0;
    assert_eq!(decide(&t, &cfg()), Command::new(1, 1, Movement::Forward));
}

#[test]
fn test_moderate_environment_weaves_by_parity() {
    let mut t = reading();
    t.dust = 45.0;
    t.x = 4.0;
    assert_eq!(decide(&t, &cfg()), Command::new(2, 1, Movement::Forward));

    t.x = 7.0;
    assert_eq!(decide(&t, &cfg()), Command::new(2, -1, Movement::Forward));

    // Fractional position counts as odd.
    t.x = 4.5;
    assert_eq!(decide(&t, &cfg()), Command::new(2, -1, Movement::Forward));
}

#[test]
fn test_default_path_full_cruise() {
    let t = reading();
    assert_eq!(decide(&t, &cfg()), Command::new(5, 2, Movement::Forward));
}

#[test]
fn test_green_corridor_cruise() {
    let mut t = reading();
    t.sensor = "GREEN".to_string();
    t.y = 5.0;
    t.wind = 10.0;
    t.dust = 10.0;
    assert_eq!(
        decide(&t, &cfg()),
        Command::new(4, 2, Movement::Forward),
        "green sensor in the safe corridor cruises at 4"
    );
}

#[test]
fn test_green_corridor_needs_every_condition() {
    let mut t = reading();
    t.sensor = "GREEN".to_string();
    t.y = 5.0;
    t.gyroscope = (0.3, 0.0, 0.0); // tilt >= 0.25 breaks the corridor
    assert_eq!(decide(&t, &cfg()), Command::new(5, 2, Movement::Forward));
}

#[test]
fn test_low_battery_caps_speed() {
    let mut t = reading();
    t.battery = 15.0;
    assert_eq!(decide(&t, &cfg()), Command::new(2, 2, Movement::Forward));
}

#[test]
fn test_yellow_sensor_creep_overrides_default_path() {
    let mut t = reading();
    t.sensor = "YELLOW".to_string();
    t.y = 50.0; // below the very-high rule
    t.x = 4.0;
    assert_eq!(decide(&t, &cfg()), Command::new(1, 0, Movement::Forward));

    t.x = 5.0;
    assert_eq!(decide(&t, &cfg()), Command::new(1, 1, Movement::Forward));

    // Even a battery the default path would cap doesn't change the creep.
    t.battery = 15.0;
    t.x = 4.0;
    assert_eq!(decide(&t, &cfg()), Command::new(1, 0, Movement::Forward));
}

#[test]
fn test_course_end_reverses() {
    let mut t = reading();
    t.x = 1000.0;
    assert_eq!(decide(&t, &cfg()), Command::new(0, 0, Movement::Reverse));
}

#[test]
fn test_unknown_sensor_falls_through_to_default() {
    let mut t = reading();
    t.sensor = "PURPLE".to_string();
    t.y = 2.9; // would trip the red rule if the token matched
    assert_eq!(decide(&t, &cfg()), Command::new(5, 2, Movement::Forward));
}

#[test]
fn test_decide_is_pure() {
    let t = reading();
    let config = cfg();
    assert_eq!(
        decide(&t, &config),
        decide(&t, &config),
        "same reading, same command"
    );
}

#[test]
fn test_nan_reading_reaches_default_path() {
    // NaN comparisons are all false, so a NaN-laced reading matches no
    // safety rule and cruises.
    let mut t = reading();
    t.battery = f64::NAN;
    t.wind = f64::NAN;
    t.y = f64::NAN;
    assert_eq!(decide(&t, &cfg()), Command::new(5, 2, Movement::Forward));
}

#[test]
fn test_command_wire_shape() {
    let command = Command::new(4, 2, Movement::Forward);
    assert_eq!(
        serde_json::to_value(command).unwrap(),
        serde_json::json!({"speed": 4, "altitude": 2, "movement": "fwd"})
    );
    assert_eq!(
        serde_json::to_value(Command::new(0, 0, Movement::Reverse)).unwrap(),
        serde_json::json!({"speed": 0, "altitude": 0, "movement": "rev"})
    );
}
