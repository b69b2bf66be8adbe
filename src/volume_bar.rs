use std::time::{SystemTime, UNIX_EPOCH};

/// Upper bound on rendered columns, regardless of available width.
pub const MAX_BAR_COUNT: usize = 100;

const OSCILLATOR_COUNT: usize = 15;
const MIN_PERIOD_MS: u64 = 750;
const MAX_PERIOD_MS: u64 = 2000;

const DIVIDER_TRANSITION_MS: u32 = 1000;
const DIVIDER_ANIMATING: f32 = 1.0;
const DIVIDER_IDLE: f32 = 6.0;

/// Linear interpolation between `start` and `stop`.
pub fn lerp(start: f32, stop: f32, fraction: f32) -> f32 {
  (1.0 - fraction) * start + fraction * stop
}

/// Folds a value in [0, 2] back into [0, 1] by reflecting the overshoot,
/// so a bar bounces off the top instead of flattening against it.
pub fn fold_unit(value: f32) -> f32 {
  if value > 1.0 {
    2.0 - value
  } else {
    value
  }
}

/// How many columns fit in `available_width`, and where the first one starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
  pub count: usize,
  pub start_offset: f32,
}

/// Fits whole bar+gap units into the available width (capped at
/// [`MAX_BAR_COUNT`]) and centers the resulting block.
pub fn layout(available_width: f32, bar_width: f32, gap_width: f32) -> BarLayout {
  let unit = bar_width + gap_width;
  let count = ((available_width / unit) as usize).min(MAX_BAR_COUNT);
  let start_offset = (available_width - count as f32 * unit) / 2.0;
  BarLayout { count, start_offset }
}

/// Triangle wave cycling 0 -> 1 -> 0 with a linear time mapping.
#[derive(Debug, Clone, Copy)]
struct Oscillator {
  period_ms: u64,
}

impl Oscillator {
  fn value_at(&self, clock_ms: u64) -> f32 {
    let phase = (clock_ms % (2 * self.period_ms)) as f32 / self.period_ms as f32;
    if phase > 1.0 {
      2.0 - phase
    } else {
      phase
    }
  }
}

/// Scalar easing linearly toward a target over a fixed duration.
/// Retargeting mid-flight continues from the current value.
#[derive(Debug, Clone, Copy)]
pub struct DividerTransition {
  from: f32,
  target: f32,
  elapsed_ms: u32,
}

impl DividerTransition {
  /// A transition already settled at `target`.
  pub fn settled(target: f32) -> DividerTransition {
    DividerTransition {
      from: target,
      target,
      elapsed_ms: DIVIDER_TRANSITION_MS,
    }
  }

  pub fn retarget(&mut self, target: f32) {
    if target == self.target {
      return;
    }
    self.from = self.value();
    self.target = target;
    self.elapsed_ms = 0;
  }

  pub fn tick(&mut self, elapsed_ms: u32) {
    self.elapsed_ms = self
      .elapsed_ms
      .saturating_add(elapsed_ms)
      .min(DIVIDER_TRANSITION_MS);
  }

  pub fn value(&self) -> f32 {
    let fraction = self.elapsed_ms as f32 / DIVIDER_TRANSITION_MS as f32;
    lerp(self.from, self.target, fraction)
  }
}

/// Animation state for the volume level bar.
///
/// Holds a fixed bank of randomly-timed oscillators, a fixed set of
/// per-column base multipliers, and the height divider transition. All of
/// it advances on a single widget-local clock fed by `on_tick`.
pub struct VolumeBar {
  clock_ms: u64,
  oscillators: Vec<Oscillator>,
  multipliers: Vec<f32>,
  divider: DividerTransition,
  animating: bool,
}

impl VolumeBar {
  /// A bar seeded from the wall clock, so separate runs look different.
  pub fn new(animating: bool) -> VolumeBar {
    VolumeBar::with_rng(&fastrand::Rng::with_seed(clock_seed()), animating)
  }

  pub fn with_rng(rng: &fastrand::Rng, animating: bool) -> VolumeBar {
    let oscillators = (0..OSCILLATOR_COUNT)
      .map(|_| Oscillator {
        period_ms: rng.u64(MIN_PERIOD_MS..MAX_PERIOD_MS),
      })
      .collect();
    let multipliers = (0..MAX_BAR_COUNT).map(|_| rng.f32()).collect();

    VolumeBar {
      clock_ms: 0,
      oscillators,
      multipliers,
      divider: DividerTransition::settled(divider_target(animating)),
      animating,
    }
  }

  /// Advances the shared clock and the divider transition.
  pub fn on_tick(&mut self, elapsed_ms: u32) {
    self.clock_ms += elapsed_ms as u64;
    self.divider.tick(elapsed_ms);
  }

  pub fn is_animating(&self) -> bool {
    self.animating
  }

  pub fn toggle_animating(&mut self) {
    self.set_animating(!self.animating);
  }

  pub fn set_animating(&mut self, animating: bool) {
    self.animating = animating;
    self.divider.retarget(divider_target(animating));
  }

  /// Redraws oscillator periods and base multipliers from a fresh seed,
  /// keeping the clock and the divider where they are.
  pub fn reseed(&mut self) {
    let next = VolumeBar::with_rng(&fastrand::Rng::with_seed(clock_seed()), self.animating);
    self.oscillators = next.oscillators;
    self.multipliers = next.multipliers;
  }

  /// Current height divisor, between 1 (animating) and 6 (idle).
  pub fn divider(&self) -> f32 {
    self.divider.value()
  }

  /// Height fraction in [0, 1] for one column: its fixed base multiplier
  /// plus its oscillator (reused cyclically), folded back below 1.
  pub fn height_fraction(&self, index: usize) -> f32 {
    let oscillator = self.oscillators[index % self.oscillators.len()];
    let base = self.multipliers[index % self.multipliers.len()];
    fold_unit(base + oscillator.value_at(self.clock_ms))
  }
}

fn divider_target(animating: bool) -> f32 {
  if animating {
    DIVIDER_ANIMATING
  } else {
    DIVIDER_IDLE
  }
}

fn clock_seed() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_millis() as u64)
    .unwrap_or_default()
}
