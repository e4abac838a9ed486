//! # aacascade - Arachidonic Acid Cascade Teaching Model
//!
//! The state and effect model behind an interactive diagram of the
//! arachidonic acid inflammatory cascade. A stimulus triggers the cascade;
//! applying one of nine drug classes inhibits pathway nodes and changes a
//! fixed set of physiological readouts.
//!
//! ## Core Concepts
//!
//! - **Readout**: one observable effect slot (bronchial tone, platelets, ...)
//!   holding a discrete status
//! - **Drug effect spec**: the nodes a drug inhibits and how it overrides readouts
//! - **Cascade machine**: the sole mutator of the simulation state
//! - **Projection**: a pure function from state to every readout and node visual
//! - **Session**: drives a [`Renderer`] from host events, including tooltips
//!
//! ## Usage
//!
//! ```rust
//! use aacascade::{CascadeSession, DrugId, ReadoutKey, RecordingRenderer, SessionConfig, StatusClass};
//!
//! let mut session = CascadeSession::builtin(SessionConfig::default(), RecordingRenderer::new())?;
//! session.on_trigger();
//! session.on_apply_drug(DrugId::Nsaid, 0)?;
//!
//! let platelets = session.readouts().get(ReadoutKey::Platelets);
//! assert_eq!(platelets.status, StatusClass::Reduced);
//! # Ok::<(), aacascade::CascadeError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Static catalogs
pub mod drug;
pub mod effects;
pub mod explanation;
pub mod node;
pub mod readout;
pub mod rich_text;

// State and projection
pub mod projector;
pub mod state;

// Interaction and presentation boundary
pub mod interaction;
pub mod renderer;
pub mod session;

pub mod config;
pub mod error;

// Re-export primary types at crate root for convenience
pub use config::{InputMode, SessionConfig};
pub use drug::{ActiveDrug, DrugId};
pub use effects::{DrugEffectSpec, DrugEffectTable, ReadoutOverride};
pub use error::{
    CascadeError, CascadeResult, LookupKind, LookupMiss, PreconditionError, ValidationError,
    NO_DETAILS,
};
pub use explanation::{ExplanationCatalog, ExplanationSet};
pub use node::{NodeId, NodeKind};
pub use projector::{node_visuals, project, NodeVisual, ProjectedReadout, ReadoutProjection};
pub use readout::{ReadoutKey, ReadoutState, StatusClass};
pub use rich_text::{RichText, Segment, Term};
pub use state::{CascadeMachine, CascadePhase, SimulationState, Transition};

pub use interaction::{
    ContentOverride, InteractionCoordinator, Reaction, TooltipContent, TooltipTarget,
};
pub use renderer::{RecordingRenderer, RenderCommand, Renderer};
pub use session::{CascadeSession, SessionSnapshot};
