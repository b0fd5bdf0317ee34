use rosu_fc_pp::{
    model::hit_object::{HitObject, Pos},
    Beatmap, DifficultyError, GameMods, OsuDifficulty,
};

use self::common::*;

mod common;

#[test]
fn object_counts() {
    let attrs = test_map().difficulty().unwrap();

    assert_eq!(attrs.n_circles, 64);
    assert_eq!(attrs.n_sliders, 17);
    assert_eq!(attrs.n_spinners, 1);
    assert_eq!(attrs.n_objects(), N_OBJECTS);
    // 9 sliders with 3 combo each and 8 repeating sliders with 5 combo each
    assert_eq!(attrs.max_combo(), 64 + 9 * 3 + 8 * 5 + 1);
}

#[test]
fn skills_are_positive() {
    let attrs = test_map().difficulty().unwrap();

    assert!(attrs.aim > 0.0, "aim: {}", attrs.aim);
    assert!(attrs.speed > 0.0, "speed: {}", attrs.speed);
    assert!(attrs.flashlight > 0.0, "flashlight: {}", attrs.flashlight);
    assert!(attrs.speed_note_count > 0.0);
    assert!(attrs.speed_note_count <= f64::from(N_OBJECTS));
}

#[test]
fn deterministic() {
    let map = test_map();
    let calc = OsuDifficulty::new().mods(HD | DT);

    let a = calc.calculate(&map).unwrap();
    let b = calc.calculate(&map).unwrap();

    assert_eq!(a, b);
}

#[test]
fn clock_rate_mods() {
    let map = test_map();

    let nm = map.difficulty_with_mods(NM).unwrap();
    let dt = map.difficulty_with_mods(DT).unwrap();
    let ht = map.difficulty_with_mods(HT).unwrap();

    assert!(dt.aim > nm.aim, "{} <= {}", dt.aim, nm.aim);
    assert!(dt.speed > nm.speed);
    assert!(ht.aim < nm.aim, "{} >= {}", ht.aim, nm.aim);
    assert!(ht.speed < nm.speed);

    assert!(dt.ar > nm.ar);
    assert!(dt.od > nm.od);
}

#[test]
fn custom_clock_rate_matches_dt() {
    let map = test_map();

    let dt = map.difficulty_with_mods(DT).unwrap();
    let custom = OsuDifficulty::new().clock_rate(1.5).calculate(&map).unwrap();

    assert_eq_float(dt.aim, custom.aim);
    assert_eq_float(dt.speed, custom.speed);
}

#[test]
fn circle_size_affects_aim() {
    let small = test_map().cs(7.0).difficulty().unwrap();
    let big = test_map().cs(2.0).difficulty().unwrap();

    assert!(small.aim > big.aim, "{} <= {}", small.aim, big.aim);
}

#[test]
fn hard_rock_and_easy() {
    let map = test_map();

    let nm = map.difficulty_with_mods(NM).unwrap();
    let hr = map.difficulty_with_mods(HR).unwrap();
    let ez = map.difficulty_with_mods(EZ).unwrap();

    assert!(hr.aim > nm.aim);
    assert!(ez.aim < nm.aim);
    assert!(hr.od > nm.od && ez.od < nm.od);
}

#[test]
fn flashlight_and_hidden() {
    let map = test_map();

    let fl = map.difficulty_with_mods(FL).unwrap();
    let hdfl = map.difficulty_with_mods(HD | FL).unwrap();

    assert!(hdfl.flashlight > fl.flashlight);
    // Aim does not depend on visibility
    assert_eq_float(hdfl.aim, fl.aim);
}

#[test]
fn passed_objects() {
    let map = test_map();

    let full = OsuDifficulty::new().calculate(&map).unwrap();
    let partial = OsuDifficulty::new().passed_objects(40).calculate(&map).unwrap();

    assert_eq!(partial.n_objects(), 40);
    assert_eq!(partial.n_circles, 40);
    assert_eq!(partial.max_combo, 40);
    assert!(partial.aim > 0.0);
    assert_ne!(partial.aim.to_bits(), full.aim.to_bits());

    let too_many = OsuDifficulty::new().passed_objects(1000).calculate(&map).unwrap();
    assert_eq!(too_many, full);
}

#[test]
fn empty_map() {
    let attrs = Beatmap::default().difficulty().unwrap();

    assert_eq_float(attrs.aim, 0.0);
    assert_eq_float(attrs.speed, 0.0);
    assert_eq_float(attrs.flashlight, 0.0);
    assert_eq!(attrs.n_objects(), 0);
    assert_eq!(attrs.max_combo, 0);
}

#[test]
fn single_object() {
    let map = Beatmap::new(vec![HitObject::circle(Pos::new(256.0, 192.0), 500.0)]);
    let attrs = map.difficulty().unwrap();

    assert_eq_float(attrs.aim, 0.0);
    assert_eq!(attrs.n_circles, 1);
    assert_eq!(attrs.max_combo, 1);
}

#[test]
fn stacked_objects_have_no_aim() {
    let map = Beatmap::new(
        (0..20)
            .map(|i| HitObject::circle(Pos::new(256.0, 192.0), 1000.0 + f64::from(i) * 200.0))
            .collect(),
    );

    let attrs = map.difficulty().unwrap();

    // Without movement only the time within each object contributes
    assert!(attrs.aim < 0.05, "{}", attrs.aim);
}

#[test]
fn unsorted_objects() {
    let map = Beatmap::new(vec![
        HitObject::circle(Pos::new(0.0, 0.0), 1000.0),
        HitObject::circle(Pos::new(100.0, 0.0), 1200.0),
        HitObject::circle(Pos::new(200.0, 0.0), 1100.0),
    ]);

    let err = map.difficulty().unwrap_err();

    assert_eq!(err, DifficultyError::UnsortedObjects { idx: 2 });
}

#[test]
fn mods_from_bits() {
    let map = test_map();

    let bits = OsuDifficulty::new().mods(HD | HR).calculate(&map).unwrap();
    let mods = OsuDifficulty::new()
        .mods(GameMods::from(HD | HR))
        .calculate(&map)
        .unwrap();

    assert_eq!(bits, mods);
}

#[test]
fn touch_device_and_relax_keep_raw_aim() {
    let map = test_map();

    let nm = map.difficulty_with_mods(NM).unwrap();
    let td = map.difficulty_with_mods(TD).unwrap();
    let rx = map.difficulty_with_mods(RX).unwrap();

    assert_eq_float(nm.aim, td.aim);
    assert_eq_float(nm.aim, rx.aim);
}
