//! # Questgrace Core Library
//!
//! Grace-period engine for stay-within quest objectives. When the player
//! leaves a quest's designated area, the objective does not fail on the
//! spot: a countdown starts, the tracker shows the remaining time, and the
//! failure only goes through if the player does not make it back before
//! the timeout.
//!
//! The crate is host-agnostic. The game integration layer implements the
//! accessor traits in [`host`], owns one [`GraceContext`] per tracked
//! quest, and calls its hooks from the objective update tick, the
//! quest-close path, and the tracker's binding queries. Simulation time is
//! always passed in by the caller; the core never samples a clock.
//!
//! ## Key Components
//!
//! - [`GraceEngine`]: the leave/return state machine, pure and tick-driven
//! - [`GraceContext`]: per-quest orchestration of engine, refresh trigger,
//!   and tracker bindings
//! - [`StayWithinArea`]: inner/outer containment geometry
//! - [`Settings`]: the five-value `key=value` configuration surface

pub mod area;
pub mod bindings;
pub mod context;
pub mod error;
pub mod events;
pub mod grace;
pub mod host;
pub mod refresh;
pub mod settings;

pub use area::{Containment, Point, RectBounds, StayWithinArea};
pub use bindings::{
    BINDING_TIME_COLOR, BINDING_TIME_LEFT, BINDING_WARNING, COLOR_NORMAL, COLOR_URGENT,
};
pub use context::{CloseDecision, GraceContext};
pub use error::SettingsError;
pub use events::{ClearReason, Event};
pub use grace::{
    GraceEngine, GraceProfile, GraceState, GraceThresholds, ObjectiveKind, TickOutcome, TickStatus,
};
pub use host::{apply_poi_margin, ObjectiveHandle, ObjectiveState, QuestState, UiRefresher};
pub use refresh::REFRESH_PERIOD;
pub use settings::Settings;
