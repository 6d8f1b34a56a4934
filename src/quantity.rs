/// 단위 변환기에서 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Temperature,
    TemperatureDifference,
    Length,
    Area,
    Stress,
    Force,
}

impl QuantityKind {
    pub const ALL: [QuantityKind; 6] = [
        QuantityKind::Temperature,
        QuantityKind::TemperatureDifference,
        QuantityKind::Length,
        QuantityKind::Area,
        QuantityKind::Stress,
        QuantityKind::Force,
    ];

    /// 메뉴 번호(1부터)로 물리량을 찾는다.
    pub fn from_menu_index(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}
