//! Scripted scenario runner.
//!
//! Drives a `GraceContext` against a synthetic objective the way the game
//! integration would: one tick per step, binding queries after each tick,
//! and a quest that really fails once the grace period ends.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::{Subcommand, ValueEnum};
use questgrace_core::{
    apply_poi_margin, CloseDecision, Containment, GraceContext, ObjectiveHandle, ObjectiveKind,
    ObjectiveState, Point, QuestState, RectBounds, Settings, StayWithinArea, TickStatus,
    UiRefresher, BINDING_TIME_COLOR, BINDING_TIME_LEFT, BINDING_WARNING,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Poi,
    Area,
}

#[derive(Subcommand)]
pub enum SimAction {
    /// Run a leave/return scenario and print the tracker bindings per tick
    Run {
        /// Objective kind driving the threshold pair
        #[arg(long, value_enum, default_value = "poi")]
        kind: KindArg,
        /// Simulation time at which the player walks out
        #[arg(long, default_value_t = 5.0)]
        leave_at: f64,
        /// Simulation time at which the player walks back in
        #[arg(long)]
        return_at: Option<f64>,
        /// Simulation time at which the player dies
        #[arg(long)]
        die_at: Option<f64>,
        /// Seconds between simulation ticks
        #[arg(long, default_value_t = 0.5)]
        tick: f64,
        /// Total simulated duration in seconds
        #[arg(long, default_value_t = 25.0)]
        duration: f64,
        /// Settings file (key=value lines); defaults apply when omitted
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

struct SimObjective {
    kind: ObjectiveKind,
    state: ObjectiveState,
    bounds: StayWithinArea,
    reevaluate_requested: bool,
}

impl SimObjective {
    fn new(kind: ObjectiveKind) -> Self {
        let bounds = match kind {
            ObjectiveKind::Poi => StayWithinArea::Radial {
                center: Point::new(0.0, 0.0),
                radius: 30.0,
                margin: 30.0,
            },
            ObjectiveKind::Area => StayWithinArea::Rect {
                inner: RectBounds::new(Point::new(-30.0, -30.0), Point::new(30.0, 30.0)),
                outer: RectBounds::new(Point::new(-40.0, -40.0), Point::new(40.0, 40.0)),
            },
        };
        Self {
            kind,
            state: ObjectiveState::InProgress,
            bounds,
            reevaluate_requested: false,
        }
    }
}

impl ObjectiveHandle for SimObjective {
    fn kind(&self) -> ObjectiveKind {
        self.kind
    }
    fn state(&self) -> ObjectiveState {
        self.state
    }
    fn set_state(&mut self, state: ObjectiveState) {
        self.state = state;
    }
    fn reevaluate(&mut self) {
        self.reevaluate_requested = true;
    }
    fn bounds(&self) -> StayWithinArea {
        self.bounds
    }
    fn set_bounds(&mut self, bounds: StayWithinArea) {
        self.bounds = bounds;
    }
}

/// Stand-in for the tracker window; the trigger thread lands here.
struct TraceRefresher;

impl UiRefresher for TraceRefresher {
    fn refresh(&mut self) {
        tracing::trace!("tracker refresh");
    }
}

fn player_position(bounds: &StayWithinArea, outside: bool) -> Point {
    match (bounds, outside) {
        (StayWithinArea::Radial { center, .. }, false) => *center,
        (
            StayWithinArea::Radial {
                center,
                radius,
                margin,
            },
            true,
        ) => Point::new(center.x + radius + margin + 50.0, center.y),
        (StayWithinArea::Rect { inner, .. }, false) => Point::new(
            (inner.min.x + inner.max.x) / 2.0,
            (inner.min.y + inner.max.y) / 2.0,
        ),
        (StayWithinArea::Rect { outer, .. }, true) => {
            Point::new(outer.max.x + 50.0, outer.max.y + 50.0)
        }
    }
}

pub fn run(action: SimAction) -> Result<(), Box<dyn std::error::Error>> {
    let SimAction::Run {
        kind,
        leave_at,
        return_at,
        die_at,
        tick,
        duration,
        settings,
    } = action;

    let settings = match settings {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };
    let kind = match kind {
        KindArg::Poi => ObjectiveKind::Poi,
        KindArg::Area => ObjectiveKind::Area,
    };

    let mut sim = SimObjective::new(kind);
    if kind == ObjectiveKind::Poi {
        apply_poi_margin(&mut sim, settings.poi_out_zone_multiplier);
    }
    let objective = Arc::new(Mutex::new(sim));
    let handle: Arc<Mutex<dyn ObjectiveHandle>> = objective.clone();

    let mut ctx = GraceContext::new(&settings, Box::new(TraceRefresher));
    let mut quest = QuestState::InProgress;

    let mut now = 0.0;
    while now <= duration && quest == QuestState::InProgress {
        let alive = die_at.map(|t| now < t).unwrap_or(true);
        let outside = now >= leave_at && return_at.map(|t| now < t).unwrap_or(true);

        run_tick(&mut ctx, &handle, &objective, now, outside, alive, &mut quest)?;

        // The binding provider may have asked the objective to re-run its
        // evaluation when the countdown hit zero.
        let requested = {
            let mut obj = lock(&objective)?;
            std::mem::take(&mut obj.reevaluate_requested)
        };
        if requested && quest == QuestState::InProgress {
            run_tick(&mut ctx, &handle, &objective, now, outside, alive, &mut quest)?;
        }

        now += tick;
    }

    println!("quest: {}", serde_json::to_value(quest)?);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_tick(
    ctx: &mut GraceContext,
    handle: &Arc<Mutex<dyn ObjectiveHandle>>,
    objective: &Arc<Mutex<SimObjective>>,
    now: f64,
    outside: bool,
    alive: bool,
    quest: &mut QuestState,
) -> Result<(), Box<dyn std::error::Error>> {
    let bounds = lock(objective)?.bounds();
    let pos = player_position(&bounds, outside);
    let containment = bounds.classify(pos);

    let status = TickStatus {
        now,
        kind: lock(objective)?.kind(),
        containment,
        quest_in_progress: *quest == QuestState::InProgress,
        player_alive: alive,
    };
    let outcome = ctx.on_objective_tick(handle, status);

    // The objective's own evaluation: out of bounds and no grace cover
    // means it really fails now.
    if containment == Containment::Outside && !outcome.suppresses_failure() {
        if ctx.on_quest_close(QuestState::Failed) == CloseDecision::Proceed {
            lock(objective)?.set_state(ObjectiveState::Failed);
            *quest = QuestState::Failed;
        }
    } else if containment == Containment::Warning {
        lock(objective)?.set_state(ObjectiveState::Warning);
    } else if containment == Containment::Inside {
        lock(objective)?.set_state(ObjectiveState::InProgress);
    }

    let warning = ctx.binding_value(BINDING_WARNING, now).unwrap_or_default();
    let time_left = ctx.binding_value(BINDING_TIME_LEFT, now).unwrap_or_default();
    let color = ctx.binding_value(BINDING_TIME_COLOR, now).unwrap_or_default();
    println!("t={now:6.1}  warning={warning:<5}  time_left={time_left:>5}  color={color}");

    for event in ctx.drain_events() {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}

fn lock<T>(mutex: &Arc<Mutex<T>>) -> Result<std::sync::MutexGuard<'_, T>, Box<dyn std::error::Error>>
{
    mutex
        .lock()
        .map_err(|_| "objective mutex poisoned".into())
}
