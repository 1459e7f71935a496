//! Simulation constants and tuning parameters.

/// Fixed tick size in milliseconds.
pub const TICK_MS: u64 = 50;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = (1000 / TICK_MS) as u32;

/// Upper bound on ticks for a single fight (~1000 s of fight time).
pub const MAX_FIGHT_TICKS: u64 = 20_000;

// --- Species ratings ---

/// Top of the rating scale used by the species dataset.
pub const RATING_SCALE: f64 = 10.0;

// --- RNG ---

/// Modulus applied to the sum of species id code points when deriving a seed.
pub const SEED_MODULUS: u64 = 9973;

/// LCG multiplier.
pub const LCG_MULTIPLIER: u64 = 1_103_515_245;

/// LCG increment.
pub const LCG_INCREMENT: u64 = 12_345;

/// LCG state mask (31 bits).
pub const LCG_MASK: u64 = 0x7fff_ffff;

/// Resolution of a unit draw; draws are multiples of 1 / RNG_RESOLUTION.
pub const RNG_RESOLUTION: u64 = 10_000;

// --- Initial state ---

/// Fraction of the initial run distance already paid out at hook-up.
pub const INITIAL_LINE_OUT_FACTOR: f64 = 0.2;

/// Stamina floor before the species stamina index is added.
pub const INITIAL_STAMINA_BASE: f64 = 0.6;

/// Weight of the species stamina index in initial stamina.
pub const INITIAL_STAMINA_WEIGHT: f64 = 0.4;

// --- Pulling force ---

/// Share of burst force available regardless of stamina.
pub const BASE_FORCE_FLOOR: f64 = 0.4;

/// Share of burst force that scales with stamina.
pub const BASE_FORCE_STAMINA_WEIGHT: f64 = 0.6;

// --- Events ---

/// Per-tick jump chance per unit of jump probability.
pub const JUMP_CHANCE_FACTOR: f64 = 0.02;

/// Per-tick dive chance per unit of dive probability.
pub const DIVE_CHANCE_FACTOR: f64 = 0.015;

/// Per-tick headshake chance per unit of headshake intensity.
pub const HEADSHAKE_CHANCE_FACTOR: f64 = 0.02;

/// Per-tick circle chance per unit of circle probability.
pub const CIRCLE_CHANCE_FACTOR: f64 = 0.01;

/// Target tension multiplier while jumping (line goes slack).
pub const JUMP_TENSION_FACTOR: f64 = 0.3;

/// Target tension multiplier while diving.
pub const DIVE_TENSION_FACTOR: f64 = 1.2;

/// Target tension multiplier during a headshake.
pub const HEADSHAKE_TENSION_FACTOR: f64 = 1.1;

/// Target tension multiplier while circling.
pub const CIRCLE_TENSION_FACTOR: f64 = 0.9;

/// Stamina spent per jump before the difficulty multiplier.
pub const JUMP_STAMINA_COST: f64 = 0.02;

/// Line stripped by a dive.
pub const DIVE_LINE_SURGE: f64 = 0.03;

// --- Dynamics ---

/// Fraction of the gap to target tension closed each tick.
pub const TENSION_SMOOTHING: f64 = 0.25;

/// Line pushed out per tick at zero stamina, per unit of run distance.
pub const RUN_PUSH_BASE: f64 = 0.008;

/// Additional line pushed out per tick at full stamina, per unit of run distance.
pub const RUN_PUSH_STAMINA_WEIGHT: f64 = 0.01;

/// Line recovered per tick per unit of tension.
pub const LINE_RECOVERY_PER_TENSION: f64 = 0.01;

/// Baseline stamina decay per tick.
pub const STAMINA_DECAY_BASE: f64 = 0.0025;

/// Additional stamina decay per tick per unit of tension.
pub const STAMINA_DECAY_PER_TENSION: f64 = 0.0015;

// --- Termination ---

/// Tension above which the over-tension timer runs.
pub const BREAKOFF_TENSION: f64 = 0.92;

/// Stamina below which the fish can be landed.
pub const LANDED_STAMINA: f64 = 0.05;

/// Line out below which the fish can be landed.
pub const LANDED_LINE_OUT: f64 = 0.05;

// --- Haptics ---

/// Minimum gap between repetitive haptic pulses (run/circle ticks).
pub const HAPTIC_THROTTLE_MS: u64 = 300;

/// Clamp a value to the unit interval.
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}
