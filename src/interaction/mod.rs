//! Tooltip interaction: targets, content, timers and the coordinator that
//! ties them together.

pub mod content;
pub mod coordinator;
pub mod target;
pub mod timer;

pub use content::{resolve_content, ContentOverride, TooltipContent};
pub use coordinator::{ActiveTooltip, InteractionCoordinator, Reaction, ShowContext};
pub use target::TooltipTarget;
pub use timer::SingleShotTimer;
