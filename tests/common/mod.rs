// False positive
#![allow(unused)]

use rosu_fc_pp::{
    model::hit_object::{HitObject, Pos, Slider},
    Beatmap,
};

pub use self::mods::*;

/// Bit values for mods
mod mods {
    pub const NM: u32 = 0;
    pub const EZ: u32 = 1 << 1;
    pub const TD: u32 = 1 << 2;
    pub const HD: u32 = 1 << 3;
    pub const HR: u32 = 1 << 4;
    pub const DT: u32 = 1 << 6;
    pub const RX: u32 = 1 << 7;
    pub const HT: u32 = 1 << 8;
    pub const FL: u32 = 1 << 10;
}

/// Amount of objects in [`test_map`].
pub const N_OBJECTS: u32 = 82;

/// A map with a bit of everything:
/// - a 16th stream going around a square
/// - back and forth jumps with growing spacing
/// - sliders with repeats and ticks
/// - a spinner to end the map
pub fn test_map() -> Beatmap {
    let mut hit_objects = Vec::with_capacity(N_OBJECTS as usize);
    let mut time = 1000.0;

    // 32 stream notes at 180bpm
    for i in 0..32 {
        let corner = f32::from((i / 8) as u8);
        let step = f32::from((i % 8) as u8) * 20.0;

        let pos = match corner as u8 {
            0 => Pos::new(96.0 + step, 96.0),
            1 => Pos::new(256.0, 96.0 + step),
            2 => Pos::new(256.0 - step, 256.0),
            _ => Pos::new(96.0, 256.0 - step),
        };

        hit_objects.push(HitObject::circle(pos, time));
        time += 83.0;
    }

    time += 500.0;

    // 32 jumps at 1/2
    for i in 0..32 {
        let spacing = 100.0 + f32::from(i as u8) * 8.0;
        let x = if i % 2 == 0 { 256.0 - spacing / 2.0 } else { 256.0 + spacing / 2.0 };
        let y = 192.0 + if i % 4 < 2 { -40.0 } else { 40.0 };

        hit_objects.push(HitObject::circle(Pos::new(x, y), time));
        time += 167.0;
    }

    time += 500.0;

    // 17 sliders
    for i in 0..17 {
        let head = Pos::new(64.0 + f32::from(i as u8) * 24.0, 320.0);

        let slider = Slider {
            end_pos: head + Pos::new(0.0, -120.0),
            duration: 333.0 * f64::from(1 + i % 2),
            repeats: (i % 2) as usize,
            ticks_per_span: 1,
        };

        let duration = slider.duration;
        hit_objects.push(HitObject::slider(head, time, slider));
        time += duration + 167.0;
    }

    time += 500.0;

    hit_objects.push(HitObject::spinner(Pos::new(256.0, 192.0), time, 2000.0));

    Beatmap::new(hit_objects).ar(9.3).cs(4.2).hp(5.5).od(8.5)
}

#[track_caller]
pub fn assert_eq_float(a: f64, b: f64) {
    assert!((a - b).abs() < f64::EPSILON, "{a} != {b}")
}

#[track_caller]
pub fn assert_close(a: f64, b: f64, tolerance: f64) {
    assert!((a - b).abs() < tolerance, "{a} != {b} (tolerance {tolerance})")
}
