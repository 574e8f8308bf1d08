use serde::{Deserialize, Serialize};

/// What the annotated output frame shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Unmodified input frame.
    #[default]
    Raw = 0,
    /// Binary mask with part, reject and target overlays.
    Thresh = 1,
    /// Input frame with target overlays.
    Targets = 2,
    /// Input frame with target, part and reject overlays.
    TargetsPlus = 3,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown display mode code {0}")]
pub struct UnknownDisplayMode(pub i32);

impl TryFrom<i32> for DisplayMode {
    type Error = UnknownDisplayMode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(DisplayMode::Raw),
            1 => Ok(DisplayMode::Thresh),
            2 => Ok(DisplayMode::Targets),
            3 => Ok(DisplayMode::TargetsPlus),
            other => Err(UnknownDisplayMode(other)),
        }
    }
}
