//! 사이징/과도해석 결과의 성질 기반 테스트.
use busbar_sizing_toolbox::busbar::{
    compute_sizing, simulate, BusbarInput, SimulationPrerequisites, FALLBACK_SIZE_LABEL,
};
use busbar_sizing_toolbox::material_db::MaterialKind;
use proptest::prelude::*;

fn material() -> impl Strategy<Value = MaterialKind> {
    prop_oneof![Just(MaterialKind::Copper), Just(MaterialKind::Aluminum)]
}

prop_compose! {
    fn busbar_input()(
        material in material(),
        current in 10.0_f64..5000.0,
        voltage in 0.2_f64..36.0,
        width in 10.0_f64..250.0,
        thickness in 2.0_f64..20.0,
        length in 100.0_f64..3000.0,
        short_circuit in 1.0_f64..80.0,
        distance in 50.0_f64..600.0,
        advanced in any::<bool>(),
    ) -> BusbarInput {
        BusbarInput::new(material, current, voltage)
            .with_geometry(width, thickness, length)
            .with_fault(short_circuit, distance)
            .with_advanced(advanced)
    }
}

proptest! {
    #[test]
    fn sizing_is_deterministic(input in busbar_input()) {
        let a = compute_sizing(&input).unwrap();
        let b = compute_sizing(&input).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn wider_or_thicker_never_runs_hotter(
        input in busbar_input(),
        extra_width in 0.0_f64..100.0,
        extra_thickness in 0.0_f64..10.0,
    ) {
        let base = compute_sizing(&input).unwrap();
        let wider = input.clone().with_geometry(
            input.busbar_width + extra_width,
            input.busbar_thickness,
            input.busbar_length,
        );
        let thicker = input.clone().with_geometry(
            input.busbar_width,
            input.busbar_thickness + extra_thickness,
            input.busbar_length,
        );
        prop_assert!(compute_sizing(&wider).unwrap().temperature_rise <= base.temperature_rise);
        prop_assert!(compute_sizing(&thicker).unwrap().temperature_rise <= base.temperature_rise);
    }

    #[test]
    fn sufficiency_matches_both_limits(input in busbar_input()) {
        let r = compute_sizing(&input).unwrap();
        let expected = r.temperature_rise <= r.max_allowable_temperature
            && r.mechanical_stress <= r.max_allowable_mechanical_stress;
        prop_assert_eq!(r.is_sizing_sufficient, expected);
    }

    #[test]
    fn recommendations_cover_required_area(input in busbar_input()) {
        let r = compute_sizing(&input).unwrap();
        prop_assert!(!r.recommended_standard_sizes.is_empty());
        prop_assert!(r.recommended_standard_sizes.len() <= 3);
        if r.recommended_standard_sizes != vec![FALLBACK_SIZE_LABEL.to_string()] {
            for label in &r.recommended_standard_sizes {
                let dims: Vec<f64> = label
                    .split(" x ")
                    .map(|d| d.trim_end_matches("mm").parse().unwrap())
                    .collect();
                prop_assert!(dims[0] * dims[1] >= r.required_cross_section_area);
            }
        }
    }

    #[test]
    fn transient_series_is_bounded(
        ambient in -20.0_f64..60.0,
        short_circuit in 1.0_f64..80.0,
        length in 100.0_f64..3000.0,
        distance in 50.0_f64..600.0,
        duration in 0.01_f64..10.0,
        steps in 10_usize..=1000,
    ) {
        let data = SimulationPrerequisites {
            ambient_temperature: ambient,
            short_circuit_current: short_circuit,
            busbar_length: length,
            phase_distance: distance,
        };
        let s = simulate(&data, duration, steps).unwrap();
        prop_assert_eq!(s.time_points.len(), steps);
        prop_assert_eq!(s.time_points[0], 0.0);
        prop_assert_eq!(*s.time_points.last().unwrap(), duration);
        prop_assert!(s.current_values.iter().all(|i| i.abs() <= s.max_current));
        prop_assert!(s.temperature_values.iter().all(|t| *t >= ambient));
    }
}
