//! Property tests over arbitrary valid fight profiles.

use proptest::prelude::*;

use reelfight_core::constants::{MAX_FIGHT_TICKS, TICK_MS};
use reelfight_core::enums::Difficulty;
use reelfight_core::species::{FightProfile, Species};
use reelfight_core::state::FightState;
use reelfight_sim::{FightConfig, FightEngine};

fn rating() -> impl Strategy<Value = f64> {
    0.0..=10.0f64
}

fn profile() -> impl Strategy<Value = FightProfile> {
    (
        (rating(), rating(), rating()),
        (
            prop::option::of(rating()),
            prop::option::of(rating()),
            prop::option::of(rating()),
            prop::option::of(rating()),
        ),
    )
        .prop_map(|((burst, run, stamina), (jump, dive, circle, shake))| {
            FightProfile {
                jump_probability: jump,
                dive_probability: dive,
                circle_under_boat_probability: circle,
                headshake_intensity: shake,
                ..FightProfile::new(burst, run, stamina)
            }
        })
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn in_unit_range(state: &FightState) -> bool {
    [state.tension, state.line_out, state.stamina]
        .iter()
        .all(|v| (0.0..=1.0).contains(v))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_tick_stays_in_range(
        profile in profile(),
        difficulty in difficulty(),
        seed in 1u64..1_000_000,
    ) {
        let species = Species::new("Property Fish", profile);
        let mut engine =
            FightEngine::start(&species, difficulty, FightConfig::with_seed(seed)).unwrap();
        prop_assert!(in_unit_range(engine.state()));

        let mut previous = engine.state().elapsed_ms;
        while !engine.is_finished() {
            let state = engine.advance().unwrap();
            prop_assert!(in_unit_range(state), "out of range: {:?}", state);
            prop_assert_eq!(state.elapsed_ms, previous + TICK_MS);
            previous = state.elapsed_ms;
        }
        prop_assert!(previous <= MAX_FIGHT_TICKS * TICK_MS);
        prop_assert!(engine.summary().is_some());
    }

    #[test]
    fn same_seed_same_fight(
        profile in profile(),
        difficulty in difficulty(),
        seed in 1u64..1_000_000,
    ) {
        let species = Species::new("Property Fish", profile);
        let mut a = FightEngine::start(&species, difficulty, FightConfig::with_seed(seed)).unwrap();
        let mut b = FightEngine::start(&species, difficulty, FightConfig::with_seed(seed)).unwrap();

        for _ in 0..400 {
            prop_assert_eq!(a.tick(), b.tick());
        }
    }

    #[test]
    fn out_of_range_ratings_are_rejected(
        burst in 10.001f64..1000.0,
        difficulty in difficulty(),
    ) {
        let species = Species::new("Too Strong", FightProfile::new(burst, 5.0, 5.0));
        prop_assert!(FightEngine::start(&species, difficulty, FightConfig::default()).is_err());
    }
}
