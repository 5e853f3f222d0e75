//! The wheel session.
//!
//! A [`Wheel`] owns everything one picker wheel needs: the roster, the
//! exclusion filter, the weights and segments derived from them, and the
//! kinetics engine. Derived data is rebuilt eagerly on every roster or filter
//! change, so `segments()` always matches what the next spin will use.

use tracing::{debug, info, warn};

use sector::{
    build_segments, compute_weights, resolve, target_angle_for, CandidateId, InputError,
    Resolution, RosterState, Segment, SelectionFilter, WeightedCandidate,
};

use crate::clock::Clock;
use crate::config::WheelConfig;
use crate::error::WheelError;
use crate::kinetics::{KineticsEngine, Phase, SpinCommand, SpinState};
use crate::remote::WinnerSource;
use crate::spin::{self, Spin};

/// One picker wheel: roster, derived segments and spin engine.
#[derive(Debug, Clone)]
pub struct Wheel {
    roster: RosterState,
    filter: SelectionFilter,
    config: WheelConfig,
    weights: Vec<WeightedCandidate>,
    segments: Vec<Segment>,
    engine: KineticsEngine,
}

impl Wheel {
    /// Create an idle wheel with nobody excluded.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidConfig`] if `config` fails validation.
    pub fn new(roster: RosterState, config: WheelConfig, seed: u64) -> Result<Self, InputError> {
        config.validate()?;
        let mut wheel = Self {
            roster,
            filter: SelectionFilter::new(),
            config,
            weights: Vec::new(),
            segments: Vec::new(),
            engine: KineticsEngine::new(config.kinetics, seed),
        };
        wheel.rebuild();
        Ok(wheel)
    }

    /// The full roster, excluded candidates included.
    #[must_use]
    pub fn roster(&self) -> &RosterState {
        &self.roster
    }

    /// Current exclusion filter.
    #[must_use]
    pub fn filter(&self) -> &SelectionFilter {
        &self.filter
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Weights of the active candidates, in roster order.
    #[must_use]
    pub fn weights(&self) -> &[WeightedCandidate] {
        &self.weights
    }

    /// Segments the next spin will run on.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The kinetics engine.
    #[must_use]
    pub fn engine(&self) -> &KineticsEngine {
        &self.engine
    }

    /// Current spin state.
    #[must_use]
    pub fn state(&self) -> &SpinState {
        self.engine.state()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    /// Replace the configuration and rebuild the segments.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidConfig`]; the wheel keeps its old
    /// configuration.
    pub fn set_config(&mut self, config: WheelConfig) -> Result<(), InputError> {
        config.validate()?;
        self.config = config;
        self.engine.set_config(config.kinetics);
        self.rebuild();
        Ok(())
    }

    /// Replace the exclusion filter.
    pub fn set_filter(&mut self, filter: SelectionFilter) {
        self.filter = filter;
        self.rebuild();
    }

    /// Exclude or re-include one candidate. Returns true if anything changed.
    pub fn set_excluded(&mut self, id: CandidateId, excluded: bool) -> bool {
        let changed = self.filter.set_excluded(id, excluded);
        if changed {
            self.rebuild();
        }
        changed
    }

    /// Flip one candidate's exclusion. Returns true if it is now excluded.
    pub fn toggle_excluded(&mut self, id: CandidateId) -> bool {
        let excluded = self.filter.toggle(id);
        self.rebuild();
        excluded
    }

    /// Edit the roster in place, then rebuild.
    ///
    /// # Errors
    ///
    /// Whatever `edit` returns. [`RosterState`] methods leave the roster
    /// unchanged when they fail.
    ///
    /// # Example
    ///
    /// ```
    /// use luckywheel_core::{Wheel, WheelConfig};
    /// use sector::{Candidate, RosterState};
    ///
    /// let roster = RosterState::new(vec![Candidate::new("ada", 1.0)]).unwrap();
    /// let mut wheel = Wheel::new(roster, WheelConfig::default(), 0).unwrap();
    /// wheel.edit_roster(|r| r.push(Candidate::new("bob", 2.0))).unwrap();
    /// assert_eq!(wheel.segments().len(), 2);
    /// ```
    pub fn edit_roster<T>(
        &mut self,
        edit: impl FnOnce(&mut RosterState) -> Result<T, InputError>,
    ) -> Result<T, InputError> {
        let result = edit(&mut self.roster);
        self.rebuild();
        result
    }

    /// Swap in a new roster, keeping the filter.
    pub fn replace_roster(&mut self, roster: RosterState) {
        self.roster = roster;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let active = self.roster.active(&self.filter);
        self.weights = compute_weights(&active, &self.config.weights);
        self.segments = build_segments(&self.weights);
        debug!(
            roster = self.roster.len(),
            active = active.len(),
            excluded = self.filter.len(),
            "segments rebuilt"
        );
    }

    /// Start a free spin; the winner is whoever ends up under the pointer.
    ///
    /// Returns `Ok(None)` if a spin is already in progress.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NoCandidates`] if every candidate is excluded,
    /// or [`InputError::InvalidConfig`]. The wheel stays idle.
    pub fn spin<C: Clock>(&mut self, clock: C) -> Result<Option<Spin<'_, C>>, InputError> {
        if self.segments.is_empty() {
            return Err(InputError::NoCandidates);
        }
        spin::spin(&mut self.engine, &self.segments, clock)
    }

    /// Continue driving a spin whose iterator was dropped before it finished.
    ///
    /// Returns `None` when no spin is in progress.
    pub fn resume<C: Clock>(&mut self, clock: C) -> Option<Spin<'_, C>> {
        if self.engine.phase().is_active() {
            Some(Spin::new(&mut self.engine, &self.segments, clock))
        } else {
            None
        }
    }

    /// Ask `source` for the winner, then spin onto it.
    ///
    /// The source is called synchronously before anything moves. Its answer
    /// is validated against the current segments and the spin is steered so
    /// that the named winner's target angle ends under the pointer. Returns
    /// `Ok(None)` if a spin is already in progress; the source is not called.
    ///
    /// # Errors
    ///
    /// [`WheelError::Input`] for an empty wheel or invalid configuration,
    /// [`WheelError::External`] when the source fails or its answer does not
    /// validate. The wheel stays idle either way.
    pub fn spin_with_source<C: Clock, S: WinnerSource + ?Sized>(
        &mut self,
        source: &mut S,
        clock: C,
    ) -> Result<Option<Spin<'_, C>>, WheelError> {
        if self.segments.is_empty() {
            return Err(InputError::NoCandidates.into());
        }
        if self.engine.phase() != Phase::Idle {
            warn!(phase = ?self.engine.phase(), "source spin ignored, wheel is busy");
            return Ok(None);
        }
        self.config.kinetics.validate()?;

        let selection = source
            .select_winner(&self.segments)
            .and_then(|response| response.validate(&self.segments))
            .inspect_err(|e| warn!(error = %e, "winner source rejected"))?;

        let rotation = self.engine.wind_up_rotation(selection.pointer_angle)?;
        info!(winner = %selection.winner, rotation, "winner chosen by source");

        match self.engine.start_towards(rotation)? {
            SpinCommand::Started => Ok(Some(Spin::new(&mut self.engine, &self.segments, clock))),
            SpinCommand::Ignored => Ok(None),
        }
    }

    /// Candidate under the pointer after `rotation`, on the current segments.
    #[must_use]
    pub fn resolve(&self, rotation: f64) -> Resolution {
        resolve(rotation, &self.segments)
    }

    /// Random pointer angle inside `id`'s segment, drawn from the wheel's RNG.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnknownCandidate`] if `id` has no segment.
    pub fn target_angle_for(&mut self, id: &CandidateId) -> Result<f64, InputError> {
        target_angle_for(id, &self.segments, self.engine.rng_mut())
    }
}
