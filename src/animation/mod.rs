pub mod animatable;
pub mod ease;
pub mod registry;
pub mod sequencer;
pub mod task;
pub mod transform_anim;
