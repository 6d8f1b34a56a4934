use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const YES: &str = "general.yes";
    pub const NO: &str = "general.no";
    pub const DEFAULT_HINT: &str = "general.default_hint";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SIZING: &str = "main_menu.sizing";
    pub const MAIN_MENU_TRANSIENT: &str = "main_menu.transient";
    pub const MAIN_MENU_MATERIALS: &str = "main_menu.materials";
    pub const MAIN_MENU_STANDARD_SIZES: &str = "main_menu.standard_sizes";
    pub const MAIN_MENU_UNIT_CONVERSION: &str = "main_menu.unit_conversion";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const SIZING_HEADING: &str = "sizing.heading";
    pub const PROMPT_MATERIAL: &str = "prompt.material";
    pub const PROMPT_CURRENT: &str = "prompt.current";
    pub const PROMPT_VOLTAGE: &str = "prompt.voltage";
    pub const PROMPT_AMBIENT: &str = "prompt.ambient";
    pub const PROMPT_WIDTH: &str = "prompt.width";
    pub const PROMPT_THICKNESS: &str = "prompt.thickness";
    pub const PROMPT_LENGTH: &str = "prompt.length";
    pub const PROMPT_SHORT_CIRCUIT: &str = "prompt.short_circuit";
    pub const PROMPT_PHASE_DISTANCE: &str = "prompt.phase_distance";
    pub const PROMPT_BARS_PER_PHASE: &str = "prompt.bars_per_phase";
    pub const PROMPT_SYSTEM_TYPE: &str = "prompt.system_type";
    pub const PROMPT_BALANCED: &str = "prompt.balanced";
    pub const PROMPT_PHASE_A: &str = "prompt.phase_a";
    pub const PROMPT_PHASE_B: &str = "prompt.phase_b";
    pub const PROMPT_PHASE_C: &str = "prompt.phase_c";
    pub const PROMPT_ADVANCED: &str = "prompt.advanced";

    pub const RESULT_REQUIRED_AREA: &str = "result.required_area";
    pub const RESULT_ACTUAL_AREA: &str = "result.actual_area";
    pub const RESULT_CURRENT_DENSITY: &str = "result.current_density";
    pub const RESULT_POWER_LOSS: &str = "result.power_loss";
    pub const RESULT_TEMPERATURE_RISE: &str = "result.temperature_rise";
    pub const RESULT_SC_FORCE: &str = "result.sc_force";
    pub const RESULT_STRESS: &str = "result.stress";
    pub const RESULT_SUFFICIENT: &str = "result.sufficient";
    pub const RESULT_RECOMMENDED: &str = "result.recommended";
    pub const RESULT_VOLTAGE_DROP: &str = "result.voltage_drop";
    pub const RESULT_MAGNETIC_FIELD: &str = "result.magnetic_field";
    pub const RESULT_WARNINGS: &str = "result.warnings";
    pub const RESULT_VALIDATION_FAILED: &str = "result.validation_failed";

    pub const TRANSIENT_HEADING: &str = "transient.heading";
    pub const TRANSIENT_NOTE: &str = "transient.note";
    pub const PROMPT_DURATION: &str = "prompt.duration";
    pub const PROMPT_TIME_STEPS: &str = "prompt.time_steps";
    pub const RESULT_MAX_CURRENT: &str = "result.max_current";
    pub const RESULT_MAX_FORCE: &str = "result.max_force";
    pub const RESULT_MAX_TEMPERATURE: &str = "result.max_temperature";
    pub const TRANSIENT_TABLE_HEADER: &str = "transient.table_header";

    pub const MATERIALS_HEADING: &str = "materials.heading";
    pub const STANDARD_SIZES_HEADING: &str = "standard_sizes.heading";

    pub const UNIT_CONVERSION_HEADING: &str = "unit_conversion.heading";
    pub const UNIT_CONVERSION_OPTIONS: &str = "unit_conversion.options";
    pub const UNIT_CONVERSION_PROMPT_KIND: &str = "unit_conversion.prompt_kind";
    pub const UNIT_CONVERSION_PROMPT_VALUE: &str = "unit_conversion.prompt_value";
    pub const UNIT_CONVERSION_PROMPT_FROM_UNIT: &str = "unit_conversion.prompt_from_unit";
    pub const UNIT_CONVERSION_PROMPT_TO_UNIT: &str = "unit_conversion.prompt_to_unit";
    pub const UNIT_CONVERSION_RESULT: &str = "unit_conversion.result";
    pub const UNIT_CONVERSION_UNSUPPORTED: &str = "unit_conversion.unsupported";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_UNIT_SYSTEM: &str = "settings.current_unit_system";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 영어 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        let builtin = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        builtin.unwrap_or("[missing translation]")
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    get_locale()
        .or_else(|| std::env::var("LC_ALL").ok())
        .or_else(|| std::env::var("LANG").ok())
        .and_then(|loc| {
            let lang = loc.split(['.', '_', '-']).next().unwrap_or_default().to_string();
            normalize_lang(&lang)
        })
}

/// TOML 기반 언어팩을 로드한다. 형식: 섹션/키 구조를 `a.b` 키로 펼친 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        YES => "예",
        NO => "아니오",
        DEFAULT_HINT => "엔터 = 기본값",
        MAIN_MENU_TITLE => "\n=== Busbar Sizing Toolbox ===",
        MAIN_MENU_SIZING => "1) 부스바 사이징",
        MAIN_MENU_TRANSIENT => "2) 단락 과도해석",
        MAIN_MENU_MATERIALS => "3) 재질 물성표",
        MAIN_MENU_STANDARD_SIZES => "4) 표준 규격표",
        MAIN_MENU_UNIT_CONVERSION => "5) 단위 변환기",
        MAIN_MENU_SETTINGS => "6) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        SIZING_HEADING => "\n-- 부스바 사이징 --",
        PROMPT_MATERIAL => "재질 (copper/aluminum)",
        PROMPT_CURRENT => "정격 전류 [A]",
        PROMPT_VOLTAGE => "계통 전압 [kV]",
        PROMPT_AMBIENT => "주위 온도",
        PROMPT_WIDTH => "부스바 폭",
        PROMPT_THICKNESS => "부스바 두께",
        PROMPT_LENGTH => "지지 간격(길이)",
        PROMPT_SHORT_CIRCUIT => "단락 전류 [kA]",
        PROMPT_PHASE_DISTANCE => "상간 거리",
        PROMPT_BARS_PER_PHASE => "상당 도체 수",
        PROMPT_SYSTEM_TYPE => "계통 방식 (1=단상, 3=3상)",
        PROMPT_BALANCED => "평형 부하입니까? (y/n)",
        PROMPT_PHASE_A => "A상 전류 [A]",
        PROMPT_PHASE_B => "B상 전류 [A]",
        PROMPT_PHASE_C => "C상 전류 [A]",
        PROMPT_ADVANCED => "분포 그리드 생성? (y/n)",
        RESULT_REQUIRED_AREA => "필요 단면적:",
        RESULT_ACTUAL_AREA => "실제 단면적:",
        RESULT_CURRENT_DENSITY => "전류밀도:",
        RESULT_POWER_LOSS => "저항/손실:",
        RESULT_TEMPERATURE_RISE => "온도상승 (허용 온도):",
        RESULT_SC_FORCE => "단락 전자력:",
        RESULT_STRESS => "굽힘응력 (허용 응력):",
        RESULT_SUFFICIENT => "사이징 적합:",
        RESULT_RECOMMENDED => "추천 표준 규격:",
        RESULT_VOLTAGE_DROP => "전압강하 지표:",
        RESULT_MAGNETIC_FIELD => "1 m 지점 자속밀도:",
        RESULT_WARNINGS => "경고:",
        RESULT_VALIDATION_FAILED => "입력값을 확인하세요:",
        TRANSIENT_HEADING => "\n-- 단락 과도해석 --",
        TRANSIENT_NOTE => "참고: 직류 감쇠(τ=0.1 s) + 50 Hz 교류 합성, 온도는 비적분 근사식입니다.",
        PROMPT_DURATION => "해석 시간 [s] (0 초과 10 이하)",
        PROMPT_TIME_STEPS => "시간 스텝 수 (10~1000)",
        RESULT_MAX_CURRENT => "최대 전류:",
        RESULT_MAX_FORCE => "최대 전자력:",
        RESULT_MAX_TEMPERATURE => "최고 온도:",
        TRANSIENT_TABLE_HEADER => "    t [s]        i [A]          F          T",
        MATERIALS_HEADING => "\n-- 재질 물성표 --",
        STANDARD_SIZES_HEADING => "\n-- 표준 규격표 (면적 오름차순) --",
        UNIT_CONVERSION_HEADING => "\n-- 단위 변환 --",
        UNIT_CONVERSION_OPTIONS => "1) 온도  2) 온도차  3) 길이  4) 면적  5) 응력  6) 힘",
        UNIT_CONVERSION_PROMPT_KIND => "항목 번호를 입력: ",
        UNIT_CONVERSION_PROMPT_VALUE => "값 입력: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "입력 단위(ex: C, mm, mm2, MPa, kN): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "변환 단위(ex: F, in, kcmil, psi, lbf): ",
        UNIT_CONVERSION_RESULT => "변환 결과:",
        UNIT_CONVERSION_UNSUPPORTED => "지원하지 않는 번호입니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "현재 단위 시스템:",
        SETTINGS_OPTIONS => "1) SI (mm, MPa, kN)  2) Imperial (in, psi, lbf)",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_PROMPT_LANGUAGE => "언어 (auto/ko/en, 유지하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 변경되었습니다:",
        _ => return None,
    };
    Some(s)
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        YES => "yes",
        NO => "no",
        DEFAULT_HINT => "Enter = default",
        MAIN_MENU_TITLE => "\n=== Busbar Sizing Toolbox ===",
        MAIN_MENU_SIZING => "1) Busbar sizing",
        MAIN_MENU_TRANSIENT => "2) Short-circuit transient",
        MAIN_MENU_MATERIALS => "3) Material properties",
        MAIN_MENU_STANDARD_SIZES => "4) Standard sizes",
        MAIN_MENU_UNIT_CONVERSION => "5) Unit converter",
        MAIN_MENU_SETTINGS => "6) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid selection. Try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        SIZING_HEADING => "\n-- Busbar Sizing --",
        PROMPT_MATERIAL => "Material (copper/aluminum)",
        PROMPT_CURRENT => "Rated current [A]",
        PROMPT_VOLTAGE => "System voltage [kV]",
        PROMPT_AMBIENT => "Ambient temperature",
        PROMPT_WIDTH => "Busbar width",
        PROMPT_THICKNESS => "Busbar thickness",
        PROMPT_LENGTH => "Support span (length)",
        PROMPT_SHORT_CIRCUIT => "Short-circuit current [kA]",
        PROMPT_PHASE_DISTANCE => "Phase spacing",
        PROMPT_BARS_PER_PHASE => "Bars per phase",
        PROMPT_SYSTEM_TYPE => "System type (1=single-phase, 3=three-phase)",
        PROMPT_BALANCED => "Balanced load? (y/n)",
        PROMPT_PHASE_A => "Phase A current [A]",
        PROMPT_PHASE_B => "Phase B current [A]",
        PROMPT_PHASE_C => "Phase C current [A]",
        PROMPT_ADVANCED => "Generate distribution grids? (y/n)",
        RESULT_REQUIRED_AREA => "Required cross-section:",
        RESULT_ACTUAL_AREA => "Actual cross-section:",
        RESULT_CURRENT_DENSITY => "Current density:",
        RESULT_POWER_LOSS => "Resistance / loss:",
        RESULT_TEMPERATURE_RISE => "Temperature rise (limit):",
        RESULT_SC_FORCE => "Short-circuit force:",
        RESULT_STRESS => "Bending stress (limit):",
        RESULT_SUFFICIENT => "Sizing sufficient:",
        RESULT_RECOMMENDED => "Recommended standard sizes:",
        RESULT_VOLTAGE_DROP => "Voltage drop index:",
        RESULT_MAGNETIC_FIELD => "Flux density at 1 m:",
        RESULT_WARNINGS => "Warnings:",
        RESULT_VALIDATION_FAILED => "Please check the input:",
        TRANSIENT_HEADING => "\n-- Short-circuit Transient --",
        TRANSIENT_NOTE => "Note: decaying DC offset (tau=0.1 s) + 50 Hz AC; temperature is a non-integrating approximation.",
        PROMPT_DURATION => "Duration [s] (0 < d <= 10)",
        PROMPT_TIME_STEPS => "Time steps (10-1000)",
        RESULT_MAX_CURRENT => "Max current:",
        RESULT_MAX_FORCE => "Max force:",
        RESULT_MAX_TEMPERATURE => "Max temperature:",
        TRANSIENT_TABLE_HEADER => "    t [s]        i [A]          F          T",
        MATERIALS_HEADING => "\n-- Material Properties --",
        STANDARD_SIZES_HEADING => "\n-- Standard Sizes (ascending area) --",
        UNIT_CONVERSION_HEADING => "\n-- Unit Conversion --",
        UNIT_CONVERSION_OPTIONS => "1) Temperature  2) Temp. difference  3) Length  4) Area  5) Stress  6) Force",
        UNIT_CONVERSION_PROMPT_KIND => "Enter quantity number: ",
        UNIT_CONVERSION_PROMPT_VALUE => "Value: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "From unit (ex: C, mm, mm2, MPa, kN): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "To unit (ex: F, in, kcmil, psi, lbf): ",
        UNIT_CONVERSION_RESULT => "Result:",
        UNIT_CONVERSION_UNSUPPORTED => "Unsupported number.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "Current unit system:",
        SETTINGS_OPTIONS => "1) SI (mm, MPa, kN)  2) Imperial (in, psi, lbf)",
        SETTINGS_PROMPT_CHANGE => "Number to change (Enter to cancel): ",
        SETTINGS_PROMPT_LANGUAGE => "Language (auto/ko/en, Enter to keep): ",
        SETTINGS_INVALID => "Invalid input; nothing changed.",
        SETTINGS_SAVED => "Settings updated:",
        _ => return None,
    };
    Some(s)
}
