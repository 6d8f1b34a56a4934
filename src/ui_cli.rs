use std::io::{self, Write};

use crate::app::AppError;
use crate::busbar::{
    compute_sizing_with, BusbarResult, NumberInput, RawBusbarInput, RawPhaseCurrents,
    RawSimulationData, ShortCircuitTimeSeries, SimulationRequest, SizeCatalog,
};
use crate::config::{Config, DefaultUnits, UnitSystem};
use crate::conversion;
use crate::error::BusbarError;
use crate::i18n::{keys, Translator};
use crate::material_db::{self, BuiltinMaterials};
use crate::quantity::QuantityKind;
use crate::units::*;

/// 과도해석 결과 표에 출력할 최대 행 수.
const TRANSIENT_TABLE_ROWS: usize = 11;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Sizing,
    Transient,
    Materials,
    StandardSizes,
    UnitConversion,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_SIZING,
        keys::MAIN_MENU_TRANSIENT,
        keys::MAIN_MENU_MATERIALS,
        keys::MAIN_MENU_STANDARD_SIZES,
        keys::MAIN_MENU_UNIT_CONVERSION,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Sizing),
            "2" => return Ok(MenuChoice::Transient),
            "3" => return Ok(MenuChoice::Materials),
            "4" => return Ok(MenuChoice::StandardSizes),
            "5" => return Ok(MenuChoice::UnitConversion),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 부스바 사이징 메뉴를 처리한다.
///
/// 길이/온도는 설정된 단위로 입력받아 mm, °C로 환산한 뒤 검증한다.
/// 숫자가 아닌 입력은 그대로 넘겨 검증 단계에서 항목별로 보고한다.
pub fn handle_sizing(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SIZING_HEADING));
    let units = &cfg.default_units;
    let len = units.length.symbol();

    let mut raw = RawBusbarInput {
        material: Some(read_line(&field_prompt(tr.t(keys::PROMPT_MATERIAL), None))?),
        current: Some(text(read_line(&field_prompt(tr.t(keys::PROMPT_CURRENT), None))?)),
        voltage: Some(text(read_line(&field_prompt(tr.t(keys::PROMPT_VOLTAGE), None))?)),
        ..RawBusbarInput::default()
    };
    let ambient = read_line(&field_prompt(
        &format!("{} [{}]", tr.t(keys::PROMPT_AMBIENT), units.temperature.symbol()),
        Some(tr.t(keys::DEFAULT_HINT)),
    ))?;
    raw.ambient_temperature = temperature_to_celsius(ambient, units.temperature);

    let width = read_line(&field_prompt(&format!("{} [{len}]", tr.t(keys::PROMPT_WIDTH)), None))?;
    let thickness =
        read_line(&field_prompt(&format!("{} [{len}]", tr.t(keys::PROMPT_THICKNESS)), None))?;
    let length = read_line(&field_prompt(&format!("{} [{len}]", tr.t(keys::PROMPT_LENGTH)), None))?;
    raw.busbar_width = Some(length_to_mm(width, units.length));
    raw.busbar_thickness = Some(length_to_mm(thickness, units.length));
    raw.busbar_length = Some(length_to_mm(length, units.length));

    raw.short_circuit_current =
        Some(text(read_line(&field_prompt(tr.t(keys::PROMPT_SHORT_CIRCUIT), None))?));
    let distance = read_line(&field_prompt(
        &format!("{} [{len}]", tr.t(keys::PROMPT_PHASE_DISTANCE)),
        None,
    ))?;
    raw.phase_distance = Some(length_to_mm(distance, units.length));

    let bars = read_line(&field_prompt(
        tr.t(keys::PROMPT_BARS_PER_PHASE),
        Some(tr.t(keys::DEFAULT_HINT)),
    ))?;
    raw.number_of_bars_per_phase = optional_text(bars);

    let system = read_line(&field_prompt(
        tr.t(keys::PROMPT_SYSTEM_TYPE),
        Some(tr.t(keys::DEFAULT_HINT)),
    ))?;
    raw.system_type = match system.trim() {
        "" => None,
        "1" => Some("singlePhase".to_string()),
        "3" => Some("threePhase".to_string()),
        other => Some(other.to_string()),
    };

    if raw.system_type.as_deref() != Some("singlePhase") {
        let balanced = read_yes_no(tr.t(keys::PROMPT_BALANCED), true)?;
        raw.is_balanced = Some(balanced.into());
        if !balanced {
            raw.phase_currents = Some(RawPhaseCurrents {
                phase_a: Some(text(read_line(&field_prompt(tr.t(keys::PROMPT_PHASE_A), None))?)),
                phase_b: Some(text(read_line(&field_prompt(tr.t(keys::PROMPT_PHASE_B), None))?)),
                phase_c: Some(text(read_line(&field_prompt(tr.t(keys::PROMPT_PHASE_C), None))?)),
            });
        }
    }
    raw.use_advanced_calculation = Some(read_yes_no(tr.t(keys::PROMPT_ADVANCED), false)?.into());

    let input = match raw.parse() {
        Ok(input) => input,
        Err(err) => return report_rejection(tr, err),
    };
    tracing::info!(
        current = input.current,
        material = %input.material,
        width = input.busbar_width,
        thickness = input.busbar_thickness,
        "sizing requested"
    );
    let catalog = cfg.catalog()?;
    let result = compute_sizing_with(&input, &BuiltinMaterials, &catalog)?;
    tracing::info!(sufficient = result.is_sizing_sufficient, "sizing completed");
    print_sizing_result(tr, units, &result);
    Ok(())
}

/// 단락 과도해석 메뉴를 처리한다.
pub fn handle_transient(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::TRANSIENT_HEADING));
    println!("{}", tr.t(keys::TRANSIENT_NOTE));
    let units = &cfg.default_units;
    let len = units.length.symbol();

    let ambient = read_line(&field_prompt(
        &format!("{} [{}]", tr.t(keys::PROMPT_AMBIENT), units.temperature.symbol()),
        None,
    ))?;
    let short_circuit = read_line(&field_prompt(tr.t(keys::PROMPT_SHORT_CIRCUIT), None))?;
    let length = read_line(&field_prompt(&format!("{} [{len}]", tr.t(keys::PROMPT_LENGTH)), None))?;
    let distance = read_line(&field_prompt(
        &format!("{} [{len}]", tr.t(keys::PROMPT_PHASE_DISTANCE)),
        None,
    ))?;

    let (default_duration, default_steps) = cfg.simulation.as_tuple();
    let duration = read_line(&field_prompt(
        tr.t(keys::PROMPT_DURATION),
        Some(default_duration.to_string().as_str()),
    ))?;
    let steps = read_line(&field_prompt(
        tr.t(keys::PROMPT_TIME_STEPS),
        Some(default_steps.to_string().as_str()),
    ))?;

    let request = SimulationRequest {
        busbar_data: Some(RawSimulationData {
            ambient_temperature: temperature_to_celsius(ambient, units.temperature),
            short_circuit_current: optional_text(short_circuit),
            busbar_length: Some(length_to_mm(length, units.length)),
            phase_distance: Some(length_to_mm(distance, units.length)),
        }),
        duration: optional_text(duration),
        time_steps: optional_text(steps),
    };
    let series = match request.run(cfg.simulation.as_tuple()) {
        Ok(series) => series,
        Err(err) => return report_rejection(tr, err),
    };
    tracing::info!(steps = series.time_points.len(), "transient simulated");
    print_transient_result(tr, units, &series);
    Ok(())
}

/// 재질 물성표를 출력한다.
pub fn print_materials(tr: &Translator) {
    println!("{}", tr.t(keys::MATERIALS_HEADING));
    for m in material_db::materials() {
        println!("[{}] {}", m.kind.code(), m.name);
        println!(
            "  J_max {:.2} A/mm², ρ {:.3e} Ω·m, {:.0} kg/m³",
            m.current_density_limit, m.resistivity, m.density
        );
        println!(
            "  T_max {:.0} °C, σ_max {:.0} MPa",
            m.max_allowable_temperature,
            m.max_allowable_mechanical_stress / 1e6
        );
        if !m.notes.is_empty() {
            println!("  {}", m.notes);
        }
    }
}

/// 사용 중인 표준 규격 카탈로그를 출력한다.
pub fn print_standard_sizes(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::STANDARD_SIZES_HEADING));
    let catalog = cfg.catalog()?;
    let area_unit = cfg.default_units.area;
    for size in catalog.sizes() {
        println!(
            "  {:<16} {:>10.1} {}",
            size.label(),
            convert_area(size.area_mm2(), AreaUnit::SquareMillimeter, area_unit),
            area_unit.symbol()
        );
    }
    Ok(())
}

/// 단위 변환 메뉴를 처리한다.
pub fn handle_unit_conversion(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::UNIT_CONVERSION_HEADING));
    println!("{}", tr.t(keys::UNIT_CONVERSION_OPTIONS));
    let kind = loop {
        let sel = read_line(tr.t(keys::UNIT_CONVERSION_PROMPT_KIND))?;
        if let Some(kind) = sel.trim().parse::<usize>().ok().and_then(QuantityKind::from_menu_index) {
            break kind;
        }
        println!("{}", tr.t(keys::UNIT_CONVERSION_UNSUPPORTED));
    };
    let value = read_f64(tr, tr.t(keys::UNIT_CONVERSION_PROMPT_VALUE))?;
    let from_unit = read_line(tr.t(keys::UNIT_CONVERSION_PROMPT_FROM_UNIT))?;
    let to_unit = read_line(tr.t(keys::UNIT_CONVERSION_PROMPT_TO_UNIT))?;
    let result = conversion::convert(kind, value, from_unit.trim(), to_unit.trim())?;
    println!("{} {result} {}", tr.t(keys::UNIT_CONVERSION_RESULT), to_unit.trim());
    Ok(())
}

/// 설정 메뉴를 처리한다. 저장은 종료 시 한 번 한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {:?}", tr.t(keys::SETTINGS_CURRENT_UNIT_SYSTEM), cfg.unit_system);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "" => {}
        "1" => cfg.set_unit_system(UnitSystem::SI),
        "2" => cfg.set_unit_system(UnitSystem::Imperial),
        _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
    }

    let lang = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
    match lang.trim().to_lowercase().as_str() {
        "" => {}
        code @ ("auto" | "ko" | "en") => cfg.language = code.to_string(),
        _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
    }
    println!(
        "{} {:?}, language={}",
        tr.t(keys::SETTINGS_SAVED),
        cfg.unit_system,
        cfg.language
    );
    Ok(())
}

/// 검증/입력 오류는 항목별로 출력하고 메뉴로 돌아간다. 그 밖의 오류는 호출자에게 넘긴다.
fn report_rejection(tr: &Translator, err: BusbarError) -> Result<(), AppError> {
    if !matches!(
        err,
        BusbarError::Validation(_)
            | BusbarError::MissingPrerequisiteData(_)
            | BusbarError::InvalidSimulationParameters { .. }
    ) {
        return Err(err.into());
    }
    tracing::warn!(kind = err.kind(), fields = err.details().len(), "input rejected");
    println!("{}", tr.t(keys::RESULT_VALIDATION_FAILED));
    for detail in err.details() {
        println!("  - {}: {}", detail.field, detail.message);
    }
    Ok(())
}

fn print_sizing_result(tr: &Translator, units: &DefaultUnits, r: &BusbarResult) {
    let area = |mm2: f64| convert_area(mm2, AreaUnit::SquareMillimeter, units.area);
    let stress = |pa: f64| convert_stress(pa, StressUnit::Pascal, units.stress);
    let force = convert_force(r.short_circuit_force, ForceUnit::Newton, units.force);
    let rise = convert_temperature_diff(
        r.temperature_rise,
        TemperatureDiffUnit::Celsius,
        units.temperature_diff,
    );
    let limit = convert_temperature(
        r.max_allowable_temperature,
        TemperatureUnit::Celsius,
        units.temperature,
    );

    println!(
        "{} {:.2} {}",
        tr.t(keys::RESULT_REQUIRED_AREA),
        area(r.required_cross_section_area),
        units.area.symbol()
    );
    println!(
        "{} {:.2} {}",
        tr.t(keys::RESULT_ACTUAL_AREA),
        area(r.cross_section_area),
        units.area.symbol()
    );
    println!("{} {:.3} A/mm²", tr.t(keys::RESULT_CURRENT_DENSITY), r.current_density);
    println!(
        "{} {:.4e} Ω, {:.2} W",
        tr.t(keys::RESULT_POWER_LOSS),
        r.resistance,
        r.power_loss
    );
    println!(
        "{} {:.2} {} ({:.1} {})",
        tr.t(keys::RESULT_TEMPERATURE_RISE),
        rise,
        units.temperature_diff.symbol(),
        limit,
        units.temperature.symbol()
    );
    println!("{} {:.2} {}", tr.t(keys::RESULT_SC_FORCE), force, units.force.symbol());
    println!(
        "{} {:.2} {} ({:.2} {})",
        tr.t(keys::RESULT_STRESS),
        stress(r.mechanical_stress),
        units.stress.symbol(),
        stress(r.max_allowable_mechanical_stress),
        units.stress.symbol()
    );
    let verdict = if r.is_sizing_sufficient {
        tr.t(keys::YES)
    } else {
        tr.t(keys::NO)
    };
    println!("{} {verdict}", tr.t(keys::RESULT_SUFFICIENT));
    println!(
        "{} {}",
        tr.t(keys::RESULT_RECOMMENDED),
        r.recommended_standard_sizes.join(", ")
    );
    println!(
        "{} {:.4}",
        tr.t(keys::RESULT_VOLTAGE_DROP),
        r.advanced_results.voltage_drop
    );
    println!(
        "{} {:.3e} T",
        tr.t(keys::RESULT_MAGNETIC_FIELD),
        r.advanced_results.magnetic_field_strength
    );
    if let Some(grid) = &r.advanced_results.temperature_distribution {
        for row in grid.chunks(crate::busbar::DISTRIBUTION_GRID_SIZE) {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:6.1}")).collect();
            println!("  {}", cells.join(" "));
        }
    }
    if !r.warnings.is_empty() {
        println!("{}", tr.t(keys::RESULT_WARNINGS));
        for w in &r.warnings {
            println!("  - {w}");
        }
    }
}

fn print_transient_result(tr: &Translator, units: &DefaultUnits, s: &ShortCircuitTimeSeries) {
    let force = |n: f64| convert_force(n, ForceUnit::Newton, units.force);
    let temp = |c: f64| convert_temperature(c, TemperatureUnit::Celsius, units.temperature);

    println!("{} {:.1} A", tr.t(keys::RESULT_MAX_CURRENT), s.max_current);
    println!(
        "{} {:.3} {}",
        tr.t(keys::RESULT_MAX_FORCE),
        force(s.max_force),
        units.force.symbol()
    );
    println!(
        "{} {:.2} {}",
        tr.t(keys::RESULT_MAX_TEMPERATURE),
        temp(s.max_temperature),
        units.temperature.symbol()
    );
    println!("{}", tr.t(keys::TRANSIENT_TABLE_HEADER));
    let n = s.time_points.len();
    let stride = (n.saturating_sub(1) / (TRANSIENT_TABLE_ROWS - 1)).max(1);
    for i in (0..n).step_by(stride) {
        println!(
            "  {:>8.4} {:>12.1} {:>10.3} {:>10.2}",
            s.time_points[i],
            s.current_values[i],
            force(s.force_values[i]),
            temp(s.temperature_values[i])
        );
    }
}

fn text(raw: String) -> NumberInput {
    NumberInput::Text(raw.trim().to_string())
}

fn optional_text(raw: String) -> Option<NumberInput> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(NumberInput::Text(trimmed.to_string()))
    }
}

/// 숫자면 mm로 환산하고, 아니면 문자열 그대로 둔다.
fn length_to_mm(raw: String, unit: LengthUnit) -> NumberInput {
    match raw.trim().parse::<f64>() {
        Ok(v) => NumberInput::Number(convert_length(v, unit, LengthUnit::Millimeter)),
        Err(_) => text(raw),
    }
}

fn temperature_to_celsius(raw: String, unit: TemperatureUnit) -> Option<NumberInput> {
    match raw.trim().parse::<f64>() {
        Ok(v) => Some(NumberInput::Number(convert_temperature(
            v,
            unit,
            TemperatureUnit::Celsius,
        ))),
        Err(_) => optional_text(raw),
    }
}

fn field_prompt(label: &str, hint: Option<&str>) -> String {
    match hint {
        Some(h) => format!("{label} ({h}): "),
        None => format!("{label}: "),
    }
}

fn read_yes_no(prompt: &str, default: bool) -> Result<bool, AppError> {
    let hint = if default { "Y/n" } else { "y/N" };
    let s = read_line(&format!("{prompt} [{hint}]: "))?;
    Ok(match s.trim().to_lowercase().as_str() {
        "y" | "yes" | "예" | "네" => true,
        "n" | "no" | "아니오" => false,
        _ => default,
    })
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
