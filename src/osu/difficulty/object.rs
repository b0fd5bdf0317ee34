use std::ops::Deref;

use rosu_map::util::Pos;

use crate::osu::object::{OsuObject, OsuObjectKind};

use super::{
    error::DifficultyError, scaling_factor::ScalingFactor, HD_FADE_OUT_DURATION_MULTIPLIER,
};

/// What kind of hit object a [`OsuDifficultyObject`] was created from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ObjectKind {
    #[default]
    Circle,
    Slider {
        repeats: usize,
    },
    Spinner,
}

/// Timing and movement data of a hit object relative to its predecessors.
///
/// All times are in milliseconds and already divided by the clock rate while
/// distances are normalized so that circles have a radius of
/// [`NORMALIZED_RADIUS`](Self::NORMALIZED_RADIUS).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OsuDifficultyObject {
    /// Position within the sequence of difficulty objects.
    pub idx: usize,
    pub kind: ObjectKind,
    pub start_time: f64,
    /// Time since the previous object started.
    pub delta_time: f64,
    /// `delta_time` with a lower bound of [`MIN_DELTA_TIME`](Self::MIN_DELTA_TIME).
    pub strain_time: f64,
    /// Distance from the previous object's lazy end position.
    pub lazy_jump_dist: f64,
    /// Shortest distance the cursor has to travel, considering the previous
    /// slider's follow circle.
    pub min_jump_dist: f64,
    pub min_jump_time: f64,
    /// Distance the cursor travels while following this slider.
    pub travel_dist: f64,
    pub travel_time: f64,
    /// Angle in radians between the previous two jumps, if any.
    pub angle: Option<f64>,
    /// Position of the object's head in osu!pixels.
    pub pos: Pos,
    /// Position of the object's end in osu!pixels.
    pub end_pos: Pos,
}

impl OsuDifficultyObject {
    pub const NORMALIZED_RADIUS: i32 = 50;
    pub const NORMALIZED_DIAMETER: i32 = Self::NORMALIZED_RADIUS * 2;

    pub const MIN_DELTA_TIME: f64 = 25.0;
    pub(crate) const MAX_SLIDER_RADIUS: f32 = Self::NORMALIZED_RADIUS as f32 * 2.4;
    pub(crate) const ASSUMED_SLIDER_RADIUS: f32 = Self::NORMALIZED_RADIUS as f32 * 1.8;

    pub(crate) fn new(
        hit_object: &OsuObject,
        last_object: &OsuObject,
        last_last_object: Option<&OsuObject>,
        clock_rate: f64,
        idx: usize,
        scaling_factor: &ScalingFactor,
    ) -> Self {
        let delta_time = (hit_object.start_time - last_object.start_time) / clock_rate;
        let start_time = hit_object.start_time / clock_rate;

        let strain_time = delta_time.max(Self::MIN_DELTA_TIME);

        let kind = match hit_object.kind {
            OsuObjectKind::Circle => ObjectKind::Circle,
            OsuObjectKind::Slider(ref slider) => ObjectKind::Slider {
                repeats: slider.repeats,
            },
            OsuObjectKind::Spinner { .. } => ObjectKind::Spinner,
        };

        let mut this = Self {
            idx,
            kind,
            start_time,
            delta_time,
            strain_time,
            pos: hit_object.pos,
            end_pos: hit_object.end_pos(),
            ..Self::default()
        };

        this.set_distances(hit_object, last_object, last_last_object, clock_rate, scaling_factor);

        this
    }

    pub const fn is_circle(&self) -> bool {
        matches!(self.kind, ObjectKind::Circle)
    }

    pub const fn is_slider(&self) -> bool {
        matches!(self.kind, ObjectKind::Slider { .. })
    }

    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, ObjectKind::Spinner)
    }

    /// The object `backwards_idx + 1` positions before this one.
    pub fn previous<'a>(
        &self,
        backwards_idx: usize,
        objects: &'a DifficultyObjects,
    ) -> Option<&'a Self> {
        self.idx
            .checked_sub(backwards_idx + 1)
            .and_then(|idx| objects.get(idx))
    }

    /// The object `forwards_idx + 1` positions after this one.
    pub fn next<'a>(&self, forwards_idx: usize, objects: &'a DifficultyObjects) -> Option<&'a Self> {
        objects.get(self.idx + (forwards_idx + 1))
    }

    pub fn opacity_at(&self, time: f64, hidden: bool, time_preempt: f64, time_fade_in: f64) -> f64 {
        if time > self.start_time {
            // * Consider a hitobject as being invisible when its start time is passed.
            // * In reality the hitobject will be visible beyond its start time up until its hittable window has passed,
            // * but this is an approximation and such a case is unlikely to be hit where this function is used.
            return 0.0;
        }

        let fade_in_start_time = self.start_time - time_preempt;
        let fade_in_duration = time_fade_in;

        if hidden {
            let fade_out_start_time = self.start_time - time_preempt + time_fade_in;
            let fade_out_duration = time_preempt * HD_FADE_OUT_DURATION_MULTIPLIER;

            (((time - fade_in_start_time) / fade_in_duration).clamp(0.0, 1.0))
                .min(1.0 - ((time - fade_out_start_time) / fade_out_duration).clamp(0.0, 1.0))
        } else {
            ((time - fade_in_start_time) / fade_in_duration).clamp(0.0, 1.0)
        }
    }

    pub fn get_doubletapness(&self, next: Option<&Self>, hit_window: f64) -> f64 {
        let Some(next) = next else { return 0.0 };

        let hit_window = if self.is_spinner() { 0.0 } else { hit_window };

        let curr_delta_time = self.delta_time.max(1.0);
        let next_delta_time = next.delta_time.max(1.0);
        let delta_diff = (next_delta_time - curr_delta_time).abs();
        let speed_ratio = curr_delta_time / curr_delta_time.max(delta_diff);
        let window_ratio = (curr_delta_time / hit_window).min(1.0).powf(2.0);

        1.0 - speed_ratio.powf(1.0 - window_ratio)
    }

    fn set_distances(
        &mut self,
        hit_object: &OsuObject,
        last_object: &OsuObject,
        last_last_object: Option<&OsuObject>,
        clock_rate: f64,
        scaling_factor: &ScalingFactor,
    ) {
        if let OsuObjectKind::Slider(ref slider) = hit_object.kind {
            self.travel_dist = f64::from(
                slider.lazy_travel_dist
                    * ((1.0 + slider.repeats as f64 / 2.5).powf(1.0 / 2.5)) as f32,
            );

            self.travel_time =
                (hit_object.lazy_travel_time() / clock_rate).max(Self::MIN_DELTA_TIME);
        }

        if hit_object.is_spinner() || last_object.is_spinner() {
            return;
        }

        let scaling_factor = scaling_factor.factor;

        let last_cursor_pos = last_object.end_cursor_pos();

        self.lazy_jump_dist =
            f64::from((hit_object.pos * scaling_factor - last_cursor_pos * scaling_factor).length());
        self.min_jump_time = self.strain_time;
        self.min_jump_dist = self.lazy_jump_dist;

        if last_object.is_slider() {
            let last_travel_time =
                (last_object.lazy_travel_time() / clock_rate).max(Self::MIN_DELTA_TIME);
            self.min_jump_time = (self.strain_time - last_travel_time).max(Self::MIN_DELTA_TIME);

            let tail_jump_dist = (last_object.end_pos() - hit_object.pos).length() * scaling_factor;

            let diff = f64::from(Self::MAX_SLIDER_RADIUS - Self::ASSUMED_SLIDER_RADIUS);
            let min = f64::from(tail_jump_dist - Self::MAX_SLIDER_RADIUS);

            self.min_jump_dist = (self.lazy_jump_dist - diff).min(min).max(0.0);
        }

        if let Some(last_last_object) = last_last_object.filter(|h| !h.is_spinner()) {
            let last_last_cursor_pos = last_last_object.end_cursor_pos();

            let v1 = last_last_cursor_pos - last_object.pos;
            let v2 = hit_object.pos - last_cursor_pos;

            let dot = v1.dot(v2);
            let det = v1.x * v2.y - v1.y * v2.x;

            self.angle = Some(f64::from(det).atan2(f64::from(dot)).abs());
        }
    }
}

/// Sequence of [`OsuDifficultyObject`]s in chronological order.
///
/// Every contained object has a positive finite strain time and its `idx`
/// matches its position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DifficultyObjects {
    objects: Vec<OsuDifficultyObject>,
}

impl DifficultyObjects {
    /// Validate the given objects.
    ///
    /// Each object's `idx` is overwritten with its position.
    pub fn new(mut objects: Vec<OsuDifficultyObject>) -> Result<Self, DifficultyError> {
        for (idx, obj) in objects.iter_mut().enumerate() {
            if !(obj.strain_time.is_finite() && obj.strain_time > 0.0) {
                return Err(DifficultyError::InvalidStrainTime {
                    idx,
                    strain_time: obj.strain_time,
                });
            }

            obj.idx = idx;
        }

        Ok(Self { objects })
    }

    /// Create difficulty objects for all but the first hit object.
    pub(crate) fn from_osu_objects(
        osu_objects: &[OsuObject],
        clock_rate: f64,
        scaling_factor: &ScalingFactor,
    ) -> Result<Self, DifficultyError> {
        let mut last_last = None;
        let mut objects = Vec::with_capacity(osu_objects.len().saturating_sub(1));

        let pairs = osu_objects.iter().zip(osu_objects.iter().skip(1));

        for (idx, (last, curr)) in pairs.enumerate() {
            if curr.start_time < last.start_time {
                return Err(DifficultyError::UnsortedObjects { idx: idx + 1 });
            }

            objects.push(OsuDifficultyObject::new(
                curr,
                last,
                last_last,
                clock_rate,
                idx,
                scaling_factor,
            ));

            last_last = Some(last);
        }

        Self::new(objects)
    }

    pub fn get(&self, idx: usize) -> Option<&OsuDifficultyObject> {
        self.objects.get(idx)
    }
}

impl Deref for DifficultyObjects {
    type Target = [OsuDifficultyObject];

    fn deref(&self) -> &Self::Target {
        &self.objects
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        model::hit_object::{HitObject, Slider},
        osu::object::OsuObject,
    };

    use super::*;

    fn objects(hit_objects: &[HitObject]) -> Result<DifficultyObjects, DifficultyError> {
        let scaling_factor = ScalingFactor::new(4.0);

        let osu_objects: Vec<_> = hit_objects
            .iter()
            .map(|h| {
                let mut h = OsuObject::new(h);
                h.compute_slider_cursor_pos(scaling_factor.radius);

                h
            })
            .collect();

        DifficultyObjects::from_osu_objects(&osu_objects, 1.0, &scaling_factor)
    }

    #[test]
    fn first_object_skipped() {
        let objects = objects(&[
            HitObject::circle(Pos::new(0.0, 0.0), 0.0),
            HitObject::circle(Pos::new(100.0, 0.0), 200.0),
            HitObject::circle(Pos::new(100.0, 100.0), 300.0),
        ])
        .unwrap();

        assert_eq!(objects.len(), 2);
        assert!((objects[0].delta_time - 200.0).abs() < f64::EPSILON);
        assert!(objects[0].angle.is_none());
        assert!(objects[1].angle.is_some());
        assert_eq!(objects[1].previous(0, &objects), objects.get(0));
        assert!(objects[1].next(0, &objects).is_none());
    }

    #[test]
    fn strain_time_lower_bound() {
        let objects = objects(&[
            HitObject::circle(Pos::new(0.0, 0.0), 0.0),
            HitObject::circle(Pos::new(0.0, 0.0), 10.0),
        ])
        .unwrap();

        assert!((objects[0].strain_time - OsuDifficultyObject::MIN_DELTA_TIME).abs() < 1e-12);
        assert!(objects[0].lazy_jump_dist.abs() < f64::EPSILON);
    }

    #[test]
    fn slider_follow_circle_shortens_jump() {
        let objects = objects(&[
            HitObject::slider(
                Pos::new(0.0, 0.0),
                0.0,
                Slider {
                    end_pos: Pos::new(200.0, 0.0),
                    duration: 500.0,
                    repeats: 0,
                    ticks_per_span: 1,
                },
            ),
            HitObject::circle(Pos::new(300.0, 0.0), 800.0),
        ])
        .unwrap();

        let curr = &objects[0];
        assert!(curr.min_jump_dist < curr.lazy_jump_dist);
        assert!(curr.min_jump_time < curr.strain_time);
    }

    #[test]
    fn unsorted() {
        let err = objects(&[
            HitObject::circle(Pos::new(0.0, 0.0), 100.0),
            HitObject::circle(Pos::new(0.0, 0.0), 50.0),
        ])
        .unwrap_err();

        assert_eq!(err, DifficultyError::UnsortedObjects { idx: 1 });
    }

    #[test]
    fn rejects_invalid_strain_time() {
        let objects = vec![
            OsuDifficultyObject {
                strain_time: 100.0,
                ..Default::default()
            },
            OsuDifficultyObject {
                strain_time: 0.0,
                ..Default::default()
            },
        ];

        assert!(matches!(
            DifficultyObjects::new(objects),
            Err(DifficultyError::InvalidStrainTime { idx: 1, .. })
        ));
    }
}
