use rosu_map::util::Pos;

use crate::model::hit_object::{HitObject, HitObjectKind, Slider};

use super::difficulty::object::OsuDifficultyObject;

/// A [`HitObject`] enriched with the slider data that difficulty calculation
/// needs.
#[derive(Clone, Debug, PartialEq)]
pub struct OsuObject {
    pub pos: Pos,
    pub start_time: f64,
    pub kind: OsuObjectKind,
}

impl OsuObject {
    pub const OBJECT_RADIUS: f32 = 64.0;

    pub fn new(h: &HitObject) -> Self {
        let kind = match h.kind {
            HitObjectKind::Circle => OsuObjectKind::Circle,
            HitObjectKind::Slider(ref slider) => {
                OsuObjectKind::Slider(OsuSlider::new(h.pos, h.start_time, slider))
            }
            HitObjectKind::Spinner(spinner) => OsuObjectKind::Spinner {
                end_time: h.start_time + spinner.duration.max(0.0),
            },
        };

        Self {
            pos: h.pos,
            start_time: h.start_time,
            kind,
        }
    }

    pub const fn end_time(&self) -> f64 {
        match self.kind {
            OsuObjectKind::Circle => self.start_time,
            OsuObjectKind::Slider(ref slider) => slider.end_time,
            OsuObjectKind::Spinner { end_time } => end_time,
        }
    }

    pub fn end_pos(&self) -> Pos {
        match self.kind {
            OsuObjectKind::Circle | OsuObjectKind::Spinner { .. } => self.pos,
            OsuObjectKind::Slider(ref slider) => slider.tail().map_or(self.pos, |tail| tail.pos),
        }
    }

    /// Where the cursor rests after the object, assuming it follows sliders
    /// only as far as necessary.
    pub const fn end_cursor_pos(&self) -> Pos {
        match self.kind {
            OsuObjectKind::Slider(ref slider) => slider.lazy_end_pos,
            OsuObjectKind::Circle | OsuObjectKind::Spinner { .. } => self.pos,
        }
    }

    pub fn lazy_travel_time(&self) -> f64 {
        match self.kind {
            OsuObjectKind::Circle | OsuObjectKind::Spinner { .. } => 0.0,
            OsuObjectKind::Slider(ref slider) => slider
                .nested_objects
                // The tail is not necessarily the last nested object
                .last()
                .map_or(0.0, |nested| nested.start_time - self.start_time),
        }
    }

    /// Combo awarded by the object: one for the head plus one per nested
    /// object.
    pub fn max_combo(&self) -> u32 {
        match self.kind {
            OsuObjectKind::Circle | OsuObjectKind::Spinner { .. } => 1,
            OsuObjectKind::Slider(ref slider) => 1 + slider.nested_objects.len() as u32,
        }
    }

    /// Follow the slider's nested objects with a lazy cursor, storing the
    /// travelled distance and the final cursor position.
    pub fn compute_slider_cursor_pos(&mut self, radius: f64) {
        let pos = self.pos;

        let OsuObjectKind::Slider(ref mut slider) = self.kind else {
            return;
        };

        let mut curr_cursor_pos = pos;
        let scaling_factor = f64::from(OsuDifficultyObject::NORMALIZED_RADIUS) / radius;
        let len = slider.nested_objects.len();

        for (curr_movement_obj, i) in slider.nested_objects.iter().zip(1..) {
            let mut curr_movement = curr_movement_obj.pos - curr_cursor_pos;
            let mut curr_movement_len = scaling_factor * f64::from(curr_movement.length());
            let mut required_movement = f64::from(OsuDifficultyObject::ASSUMED_SLIDER_RADIUS);

            if i == len {
                let lazy_movement = slider.lazy_end_pos - curr_cursor_pos;

                if lazy_movement.length() < curr_movement.length() {
                    curr_movement = lazy_movement;
                }

                curr_movement_len = scaling_factor * f64::from(curr_movement.length());
            } else if curr_movement_obj.is_repeat() {
                required_movement = f64::from(OsuDifficultyObject::NORMALIZED_RADIUS);
            }

            if curr_movement_len > required_movement {
                let ratio = (curr_movement_len - required_movement) / curr_movement_len;
                curr_cursor_pos += curr_movement * ratio as f32;
                curr_movement_len *= ratio;
                slider.lazy_travel_dist += curr_movement_len as f32;
            }

            if i == len {
                slider.lazy_end_pos = curr_cursor_pos;
            }
        }
    }

    pub const fn is_circle(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Circle)
    }

    pub const fn is_slider(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Slider(_))
    }

    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Spinner { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum OsuObjectKind {
    Circle,
    Slider(OsuSlider),
    Spinner { end_time: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct OsuSlider {
    pub end_time: f64,
    pub lazy_end_pos: Pos,
    pub lazy_travel_dist: f32,
    pub repeats: usize,
    pub nested_objects: Vec<NestedSliderObject>,
}

impl OsuSlider {
    /// The last tick is moved this many milliseconds before the slider's end.
    pub const LEGACY_LAST_TICK_OFFSET: f64 = 36.0;

    fn new(head: Pos, start_time: f64, slider: &Slider) -> Self {
        let span_count = slider.span_count();
        let duration = slider.duration.max(0.0);
        let end_time = start_time + duration;
        let span_duration = duration / span_count as f64;

        // Direction alternates with each span
        let span_pos = |span: usize, span_progress: f64| {
            let progress = if span % 2 == 1 {
                1.0 - span_progress
            } else {
                span_progress
            };

            slider.position_at(head, progress)
        };

        let mut nested_objects =
            Vec::with_capacity(span_count * (slider.ticks_per_span + 1) + 1);

        for span in 0..span_count {
            let span_start_time = start_time + span as f64 * span_duration;

            for tick in 1..=slider.ticks_per_span {
                let span_progress = tick as f64 / (slider.ticks_per_span + 1) as f64;

                nested_objects.push(NestedSliderObject {
                    pos: span_pos(span, span_progress),
                    start_time: span_start_time + span_progress * span_duration,
                    kind: NestedSliderObjectKind::Tick,
                });
            }

            if span + 1 < span_count {
                nested_objects.push(NestedSliderObject {
                    pos: span_pos(span, 1.0),
                    start_time: span_start_time + span_duration,
                    kind: NestedSliderObjectKind::Repeat,
                });
            }
        }

        let last_tick_time =
            (start_time + duration / 2.0).max(end_time - Self::LEGACY_LAST_TICK_OFFSET);

        nested_objects.push(NestedSliderObject {
            pos: span_pos(span_count - 1, 1.0),
            start_time: last_tick_time,
            kind: NestedSliderObjectKind::Tail,
        });

        nested_objects.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        let lazy_travel_time = nested_objects
            .last()
            .map_or(0.0, |nested| nested.start_time - start_time);

        let mut end_time_min = if span_duration > 0.0 {
            lazy_travel_time / span_duration
        } else {
            0.0
        };

        if end_time_min % 2.0 >= 1.0 {
            end_time_min = 1.0 - end_time_min % 1.0;
        } else {
            end_time_min %= 1.0;
        }

        Self {
            end_time,
            lazy_end_pos: slider.position_at(head, end_time_min),
            lazy_travel_dist: 0.0,
            repeats: slider.repeats,
            nested_objects,
        }
    }

    pub fn tail(&self) -> Option<&NestedSliderObject> {
        self.nested_objects
            .iter()
            // Short sliders may sort the tail before other nested objects
            .rfind(|nested| matches!(nested.kind, NestedSliderObjectKind::Tail))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NestedSliderObject {
    pub pos: Pos,
    pub start_time: f64,
    pub kind: NestedSliderObjectKind,
}

impl NestedSliderObject {
    pub const fn is_repeat(&self) -> bool {
        matches!(self.kind, NestedSliderObjectKind::Repeat)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NestedSliderObjectKind {
    Repeat,
    Tail,
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider(repeats: usize, ticks_per_span: usize) -> OsuObject {
        let h = HitObject::slider(
            Pos::new(100.0, 100.0),
            1000.0,
            Slider {
                end_pos: Pos::new(300.0, 100.0),
                duration: 1000.0,
                repeats,
                ticks_per_span,
            },
        );

        OsuObject::new(&h)
    }

    #[test]
    fn legacy_last_tick() {
        let h = slider(0, 0);

        let OsuObjectKind::Slider(ref slider) = h.kind else {
            panic!("expected slider");
        };

        let tail = slider.tail().unwrap();
        assert!((tail.start_time - 1964.0).abs() < 1e-9);
        assert_eq!(tail.pos, Pos::new(300.0, 100.0));
        assert_eq!(h.max_combo(), 2);
    }

    #[test]
    fn repeats_and_ticks() {
        let h = slider(1, 1);

        let OsuObjectKind::Slider(ref slider) = h.kind else {
            panic!("expected slider");
        };

        let kinds: Vec<_> = slider.nested_objects.iter().map(|n| n.kind).collect();

        assert_eq!(
            kinds,
            [
                NestedSliderObjectKind::Tick,
                NestedSliderObjectKind::Repeat,
                NestedSliderObjectKind::Tick,
                NestedSliderObjectKind::Tail,
            ]
        );

        // Even span count ends back at the head
        assert_eq!(h.end_pos(), Pos::new(100.0, 100.0));
        assert!(slider
            .nested_objects
            .windows(2)
            .all(|w| w[0].start_time <= w[1].start_time));
    }

    #[test]
    fn lazy_cursor_travels() {
        let mut h = slider(0, 0);
        h.compute_slider_cursor_pos(f64::from(OsuObject::OBJECT_RADIUS) / 2.0);

        let OsuObjectKind::Slider(ref slider) = h.kind else {
            panic!("expected slider");
        };

        assert!(slider.lazy_travel_dist > 0.0);
        assert!(slider.lazy_end_pos.x > 100.0 && slider.lazy_end_pos.x < 300.0);
    }

    #[test]
    fn spinner_end_time() {
        let h = OsuObject::new(&HitObject::spinner(Pos::default(), 500.0, 1500.0));

        assert!(h.is_spinner());
        assert!((h.end_time() - 2000.0).abs() < f64::EPSILON);
        assert!(h.lazy_travel_time().abs() < f64::EPSILON);
    }
}
