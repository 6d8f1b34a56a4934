//! 단락 과도해석 시계열 회귀 테스트.
use busbar_sizing_toolbox::busbar::{
    simulate, simulate_transient, BusbarInput, SimulationPrerequisites, SimulationRequest,
};
use busbar_sizing_toolbox::error::BusbarError;
use busbar_sizing_toolbox::material_db::MaterialKind;

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn prerequisites() -> SimulationPrerequisites {
    SimulationPrerequisites {
        ambient_temperature: 40.0,
        short_circuit_current: 50.0,
        busbar_length: 1000.0,
        phase_distance: 200.0,
    }
}

#[test]
fn time_axis_spans_the_whole_duration() {
    for (duration, steps) in [(0.5, 100), (0.1, 10), (10.0, 1000), (0.3, 7 + 10)] {
        let s = simulate(&prerequisites(), duration, steps).expect("simulate");
        assert_eq!(s.time_points.len(), steps);
        assert_eq!(s.current_values.len(), steps);
        assert_eq!(s.force_values.len(), steps);
        assert_eq!(s.temperature_values.len(), steps);
        assert_eq!(s.time_points[0], 0.0);
        assert_eq!(*s.time_points.last().unwrap(), duration);
    }
}

#[test]
fn maxima_bound_every_sample() {
    let s = simulate(&prerequisites(), 0.5, 250).expect("simulate");
    assert!(s.current_values.iter().all(|i| i.abs() <= s.max_current));
    assert!(s.force_values.iter().all(|f| *f <= s.max_force));
    assert!(s.temperature_values.iter().all(|t| *t <= s.max_temperature));
    assert!(s.force_values.iter().all(|f| *f >= 0.0));
}

#[test]
fn first_sample_is_the_asymmetric_peak() {
    let s = simulate(&prerequisites(), 0.5, 100).expect("simulate");
    // t=0: i = 50 kA · 2.5, T = 주위 온도
    assert_close("i(0)", s.current_values[0], 125_000.0, 1e-12);
    assert_close("T(0)", s.temperature_values[0], 40.0, 1e-12);
    // F = 2e-7 · i² · 1 m / 0.2 m
    assert_close("F(0)", s.force_values[0], 2e-7 * 125_000f64.powi(2) / 0.2, 1e-12);
}

#[test]
fn sample_matches_closed_form() {
    let s = simulate(&prerequisites(), 0.5, 101).expect("simulate");
    let t = s.time_points[10];
    assert_close("t", t, 0.05, 1e-12);
    let w = 2.0 * std::f64::consts::PI * 50.0;
    let expected = 125_000.0 * (-t / 0.1).exp() * (w * t).cos()
        + 50_000.0 * std::f64::consts::SQRT_2 * (w * t).sin();
    assert_close("i(t)", s.current_values[10], expected, 1e-9);
    let temp = 40.0 + (expected / 1000.0).powi(2) * 0.05 * t * 10.0;
    assert_close("T(t)", s.temperature_values[10], temp, 1e-9);
}

#[test]
fn invalid_parameters_are_rejected() {
    for (duration, steps) in [(0.0, 100), (-1.0, 100), (10.5, 100), (0.5, 9), (0.5, 1001), (f64::NAN, 100)] {
        match simulate(&prerequisites(), duration, steps) {
            Err(BusbarError::InvalidSimulationParameters { time_steps, errors, .. }) => {
                assert_eq!(time_steps, steps.to_string());
                assert!(!errors.is_empty());
            }
            other => panic!("({duration}, {steps}) expected invalid parameters, got {other:?}"),
        }
    }
}

#[test]
fn typed_input_feeds_the_simulation() {
    let input = BusbarInput::new(MaterialKind::Copper, 800.0, 0.4)
        .with_geometry(60.0, 10.0, 1000.0)
        .with_fault(50.0, 200.0)
        .with_ambient(25.0);
    let s = simulate_transient(&input, 0.5, 100).expect("simulate");
    assert_eq!(s.temperature_values[0], 25.0);
}

#[test]
fn request_uses_defaults_and_accepts_sizing_result_shape() {
    let request: SimulationRequest = serde_json::from_str(
        r#"{ "busbarData": {
                "ambientTemperature": "40", "shortCircuitCurrent": 50,
                "busbarLength": 1000, "phaseDistance": 200,
                "requiredCrossSectionArea": 625, "isSizingSufficient": false,
                "recommendedStandardSizes": ["80mm x 10mm"]
            } }"#,
    )
    .expect("request");
    let s = request.run((0.5, 100)).expect("simulate");
    assert_eq!(s.time_points.len(), 100);
    assert_eq!(*s.time_points.last().unwrap(), 0.5);
}

#[test]
fn missing_sizing_data_lists_each_field() {
    let request: SimulationRequest = serde_json::from_str(
        r#"{ "busbarData": { "ambientTemperature": 40, "busbarLength": "abc" }, "duration": 0.2 }"#,
    )
    .expect("request");
    match request.run((0.5, 100)) {
        Err(BusbarError::MissingPrerequisiteData(fields)) => {
            assert_eq!(fields, vec!["shortCircuitCurrent", "busbarLength", "phaseDistance"]);
        }
        other => panic!("expected missing data, got {other:?}"),
    }
}

#[test]
fn parameter_errors_take_precedence_over_missing_data() {
    let request: SimulationRequest =
        serde_json::from_str(r#"{ "duration": "long", "timeSteps": 50 }"#).expect("request");
    assert!(matches!(
        request.run((0.5, 100)),
        Err(BusbarError::InvalidSimulationParameters { .. })
    ));
}

#[test]
fn parameter_errors_report_the_submitted_values() {
    let request: SimulationRequest = serde_json::from_str(
        r#"{ "busbarData": { "ambientTemperature": 40, "shortCircuitCurrent": 50,
                             "busbarLength": 1000, "phaseDistance": 200 },
             "timeSteps": 12.5 }"#,
    )
    .expect("request");
    match request.run((0.5, 100)) {
        Err(BusbarError::InvalidSimulationParameters {
            duration,
            time_steps,
            errors,
        }) => {
            assert_eq!(duration, "0.5");
            assert_eq!(time_steps, "12.5");
            assert_eq!(errors.fields(), vec!["timeSteps"]);
        }
        other => panic!("expected invalid parameters, got {other:?}"),
    }

    let request: SimulationRequest =
        serde_json::from_str(r#"{ "duration": "long", "timeSteps": "abc" }"#).expect("request");
    let err = request.run((0.5, 100)).unwrap_err();
    assert!(err.to_string().contains("duration=long"));
    assert!(err.to_string().contains("timeSteps=abc"));
    assert_eq!(err.details().len(), 2);
}

#[test]
fn ambient_outside_sizing_range_is_rejected() {
    for ambient in ["500", "-60", "true"] {
        let request: SimulationRequest = serde_json::from_str(&format!(
            r#"{{ "busbarData": {{ "ambientTemperature": {ambient}, "shortCircuitCurrent": 50,
                                 "busbarLength": 1000, "phaseDistance": 200 }} }}"#
        ))
        .expect("request");
        match request.run((0.5, 100)) {
            Err(BusbarError::MissingPrerequisiteData(fields)) => {
                assert_eq!(fields, vec!["ambientTemperature"]);
            }
            other => panic!("ambient {ambient}: expected missing data, got {other:?}"),
        }
    }
}
