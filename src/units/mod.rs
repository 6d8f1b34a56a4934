//! 단위 정의 및 변환 모듈 모음. 계산 코어는 mm·A·kV·kA·°C·N·Pa 기준이며
//! 여기의 단위는 CLI 입력/표시에만 쓰인다.

pub mod area;
pub mod force;
pub mod length;
pub mod stress;
pub mod temperature;

pub use area::{convert_area, AreaUnit};
pub use force::{convert_force, ForceUnit};
pub use length::{convert_length, LengthUnit};
pub use stress::{convert_stress, StressUnit};
pub use temperature::{
    convert_temperature, convert_temperature_diff, TemperatureDiffUnit, TemperatureUnit,
};
