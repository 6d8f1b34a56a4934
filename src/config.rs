use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::busbar::{StandardSize, TableCatalog};
use crate::units::*;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
/// 설정 파일 경로를 지정하는 환경 변수.
pub const CONFIG_PATH_ENV: &str = "BUSBAR_CONFIG";

/// 사용 가능한 단위 시스템 프리셋을 정의한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    /// mm, mm², °C, MPa, kN
    SI,
    /// in, in², °F, psi, lbf
    Imperial,
}

impl UnitSystem {
    /// 프리셋에 해당하는 기본 단위 세트.
    pub fn default_units(&self) -> DefaultUnits {
        match self {
            UnitSystem::SI => DefaultUnits::default(),
            UnitSystem::Imperial => DefaultUnits {
                temperature: TemperatureUnit::Fahrenheit,
                temperature_diff: TemperatureDiffUnit::Fahrenheit,
                length: LengthUnit::Inch,
                area: AreaUnit::SquareInch,
                stress: StressUnit::Psi,
                force: ForceUnit::PoundForce,
            },
        }
    }
}

/// 각 물리량별 입력/표시 단위를 담는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultUnits {
    pub temperature: TemperatureUnit,
    pub temperature_diff: TemperatureDiffUnit,
    pub length: LengthUnit,
    pub area: AreaUnit,
    pub stress: StressUnit,
    pub force: ForceUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self {
            temperature: TemperatureUnit::Celsius,
            temperature_diff: TemperatureDiffUnit::Kelvin,
            length: LengthUnit::Millimeter,
            area: AreaUnit::SquareMillimeter,
            stress: StressUnit::MegaPascal,
            force: ForceUnit::KiloNewton,
        }
    }
}

/// HTTP 계산 API 바인딩 주소.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `HOST`/`PORT` 환경 변수가 있으면 우선 적용한 바인딩 주소.
    pub fn bind_address(&self) -> String {
        let host = std::env::var("HOST").unwrap_or_else(|_| self.host.clone());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(self.port);
        format!("{host}:{port}")
    }
}

/// 요청에서 생략된 과도해석 조건의 기본값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationDefaults {
    pub duration_s: f64,
    pub time_steps: usize,
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            duration_s: 0.5,
            time_steps: 100,
        }
    }
}

impl SimulationDefaults {
    pub fn as_tuple(&self) -> (f64, usize) {
        (self.duration_s, self.time_steps)
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub unit_system: UnitSystem,
    /// `auto`, `ko`, `en` 등
    pub language: String,
    pub default_units: DefaultUnits,
    pub server: ServerConfig,
    pub simulation: SimulationDefaults,
    /// 지정하면 내장 표준 규격 카탈로그를 대체한다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Vec<StandardSize>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::SI,
            language: "auto".to_string(),
            default_units: DefaultUnits::default(),
            server: ServerConfig::default(),
            simulation: SimulationDefaults::default(),
            catalog: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("규격 카탈로그 설정 오류: {0}")]
    InvalidCatalog(&'static str),
}

/// CLI 인자 → `BUSBAR_CONFIG` 환경 변수 → `config.toml` 순으로 설정 파일 경로를 정한다.
pub fn resolve_path(cli_path: Option<&Path>) -> PathBuf {
    cli_path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg = parse(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        tracing::debug!(path = %path.display(), "created default config");
        Ok(cfg)
    }
}

/// TOML 문자열을 설정으로 변환하고 카탈로그를 검증한다.
pub fn parse(content: &str) -> Result<Config, ConfigError> {
    let cfg: Config = toml::from_str(content)?;
    cfg.catalog()?;
    Ok(cfg)
}

impl Config {
    /// 설정을 지정한 경로에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 단위 시스템을 바꾸고 기본 단위 세트를 프리셋으로 갱신한다.
    pub fn set_unit_system(&mut self, system: UnitSystem) {
        self.unit_system = system;
        self.default_units = system.default_units();
    }

    /// 사용 중인 규격 카탈로그. 설정에 없으면 내장 카탈로그.
    pub fn catalog(&self) -> Result<TableCatalog, ConfigError> {
        match &self.catalog {
            Some(sizes) => TableCatalog::new(sizes.clone()).map_err(ConfigError::InvalidCatalog),
            None => Ok(TableCatalog::builtin()),
        }
    }
}
