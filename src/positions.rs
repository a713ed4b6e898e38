use phf::phf_map;

/// Position code for defensemen; everything else in the skater tables is a
/// forward subtype.
pub const DEFENSE_CODE: &str = "D";

/// Map position code to the full position name.
static POSITION_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "C" => "Center",
    "L" => "Left Wing",
    "R" => "Right Wing",
    "LW" => "Left Wing",
    "RW" => "Right Wing",
    "D" => "Defense",
};

/// Full name for a position code, falling back to the code itself for
/// anything the table does not know.
pub fn position_name(code: &str) -> &str {
    POSITION_NAMES.get(code).copied().unwrap_or(code)
}

pub fn is_defense(code: &str) -> bool {
    code == DEFENSE_CODE
}

/// Position filter applied to the browse list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PositionFilter {
    #[default]
    AllPlayers,
    Forwards,
    Defense,
}

impl PositionFilter {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AllPlayers => "All Players",
            Self::Forwards => "Forwards",
            Self::Defense => "Defense",
        }
    }

    pub fn all() -> [Self; 3] {
        [Self::AllPlayers, Self::Forwards, Self::Defense]
    }

    /// Next filter in the cycle (All Players → Forwards → Defense → All Players)
    pub fn next(&self) -> Self {
        match self {
            Self::AllPlayers => Self::Forwards,
            Self::Forwards => Self::Defense,
            Self::Defense => Self::AllPlayers,
        }
    }

    /// Previous filter in the cycle
    pub fn prev(&self) -> Self {
        match self {
            Self::AllPlayers => Self::Defense,
            Self::Forwards => Self::AllPlayers,
            Self::Defense => Self::Forwards,
        }
    }

    /// Whether a player with this position code passes the filter
    pub fn matches(&self, position: &str) -> bool {
        match self {
            Self::AllPlayers => true,
            Self::Forwards => !is_defense(position),
            Self::Defense => is_defense(position),
        }
    }
}
