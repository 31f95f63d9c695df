pub mod bridge;
pub mod control_panel;
pub mod gravity;
pub mod hud;
pub mod labels;
pub mod text;

pub use bridge::{action_for_key, UiAction, UiBridge};
pub use control_panel::ControlPanel;
pub use gravity::{change_gravity, gravity_text, Axis};
pub use hud::Hud;
pub use labels::{update_kinematic_labels, Label, LabelBoard};
pub use text::TextRenderer;
