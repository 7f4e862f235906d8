/// A single `(x, y)` measurement pair.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub x: f32,
    pub y: f32,
}

impl Sample {
    pub fn new(x: f32, y: f32) -> Self {
        Sample { x, y }
    }
}

impl From<(f32, f32)> for Sample {
    fn from((x, y): (f32, f32)) -> Self {
        Sample { x, y }
    }
}
