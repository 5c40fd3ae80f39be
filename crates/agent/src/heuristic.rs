use crate::observation::{Action, ACTION_SIZE};

/// Two independent control axes, each in `[-1, 1]` as the input device
/// reports them.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AxisInput {
    pub horizontal: f32,
    pub vertical: f32,
}

impl AxisInput {
    #[must_use]
    pub const fn new(horizontal: f32, vertical: f32) -> Self {
        Self { horizontal, vertical }
    }
}

/// Manual control: horizontal drives x, vertical drives z, values pass through
/// untouched.
#[must_use]
pub fn heuristic_action(input: AxisInput) -> [f32; ACTION_SIZE] {
    Action::new(input.horizontal, input.vertical).into()
}
