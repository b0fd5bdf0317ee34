use crate::model::hit_object::HitObject;

use super::{
    attributes::OsuDifficultyAttributes, difficulty::scaling_factor::ScalingFactor,
    object::OsuObject,
};

/// Prepare the first `take` hit objects for difficulty calculation and count
/// them into `attrs`.
pub fn convert_objects(
    hit_objects: &[HitObject],
    scaling_factor: &ScalingFactor,
    take: usize,
    attrs: &mut OsuDifficultyAttributes,
) -> Box<[OsuObject]> {
    hit_objects
        .iter()
        .take(take)
        .map(|h| {
            let mut h = OsuObject::new(h);
            h.compute_slider_cursor_pos(scaling_factor.radius);

            attrs.max_combo += h.max_combo();

            if h.is_circle() {
                attrs.n_circles += 1;
            } else if h.is_slider() {
                attrs.n_sliders += 1;
            } else {
                attrs.n_spinners += 1;
            }

            h
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rosu_map::util::Pos;

    use crate::model::hit_object::Slider;

    use super::*;

    #[test]
    fn counts_and_combo() {
        let hit_objects = [
            HitObject::circle(Pos::new(0.0, 0.0), 0.0),
            HitObject::slider(
                Pos::new(0.0, 0.0),
                500.0,
                Slider {
                    end_pos: Pos::new(100.0, 0.0),
                    duration: 400.0,
                    repeats: 1,
                    ticks_per_span: 1,
                },
            ),
            HitObject::spinner(Pos::new(256.0, 192.0), 1500.0, 1000.0),
            HitObject::circle(Pos::new(0.0, 0.0), 3000.0),
        ];

        let mut attrs = OsuDifficultyAttributes::default();
        let objects = convert_objects(&hit_objects, &ScalingFactor::new(4.0), 3, &mut attrs);

        assert_eq!(objects.len(), 3);
        assert_eq!((attrs.n_circles, attrs.n_sliders, attrs.n_spinners), (1, 1, 1));
        // Circle + slider head, 2 ticks, repeat, tail + spinner
        assert_eq!(attrs.max_combo, 1 + 5 + 1);
    }
}
