use crate::{
    model::mods::GameMods,
    osu::difficulty::{
        error::DifficultyError,
        object::{DifficultyObjects, ObjectKind, OsuDifficultyObject},
    },
};

use super::{
    strain::{strain_decay, StrainSections, StrainSkill},
    Skill,
};

const SKILL_MULTIPLIER: f64 = 0.05512;
const STRAIN_DECAY_BASE: f64 = 0.15;

/// Strain skill for memorizing object placement under a limited view.
#[derive(Clone, Debug)]
pub struct Flashlight {
    curr_strain: f64,
    has_hidden_mod: bool,
    sections: StrainSections,
    evaluator: FlashlightEvaluator,
}

impl Flashlight {
    pub fn new(mods: GameMods, radius: f64, time_preempt: f64, time_fade_in: f64) -> Self {
        let scaling_factor = 52.0 / radius;

        Self {
            curr_strain: 0.0,
            has_hidden_mod: mods.hd(),
            sections: StrainSections::default(),
            evaluator: FlashlightEvaluator {
                scaling_factor,
                time_preempt,
                time_fade_in,
            },
        }
    }
}

impl Skill for Flashlight {
    fn process(
        &mut self,
        curr: &OsuDifficultyObject,
        objects: &DifficultyObjects,
    ) -> Result<(), DifficultyError> {
        self.process_strain(curr, objects);

        Ok(())
    }

    fn difficulty_value(&self) -> f64 {
        self.sections.curr_strain_peaks().iter().sum::<f64>() * 1.06
    }
}

impl StrainSkill for Flashlight {
    fn sections(&self) -> &StrainSections {
        &self.sections
    }

    fn sections_mut(&mut self) -> &mut StrainSections {
        &mut self.sections
    }

    fn strain_value_at(&mut self, curr: &OsuDifficultyObject, objects: &DifficultyObjects) -> f64 {
        self.curr_strain *= strain_decay(curr.delta_time, STRAIN_DECAY_BASE);
        self.curr_strain +=
            self.evaluator.evaluate_diff_of(curr, objects, self.has_hidden_mod) * SKILL_MULTIPLIER;

        self.curr_strain
    }

    fn calculate_initial_strain(
        &self,
        time: f64,
        curr: &OsuDifficultyObject,
        objects: &DifficultyObjects,
    ) -> f64 {
        let prev_start_time = curr.previous(0, objects).map_or(0.0, |prev| prev.start_time);

        self.curr_strain * strain_decay(time - prev_start_time, STRAIN_DECAY_BASE)
    }
}

#[derive(Clone, Debug)]
struct FlashlightEvaluator {
    scaling_factor: f64,
    time_preempt: f64,
    time_fade_in: f64,
}

impl FlashlightEvaluator {
    const MAX_OPACITY_BONUS: f64 = 0.4;
    const HIDDEN_BONUS: f64 = 0.2;

    const MIN_VELOCITY: f64 = 0.5;
    const SLIDER_MULTIPLIER: f64 = 1.3;

    const MIN_ANGLE_MULTIPLIER: f64 = 0.2;

    fn evaluate_diff_of(
        &self,
        curr: &OsuDifficultyObject,
        objects: &DifficultyObjects,
        hidden: bool,
    ) -> f64 {
        if curr.is_spinner() {
            return 0.0;
        }

        let mut small_dist_nerf = 1.0;
        let mut cumulative_strain_time = 0.0;

        let mut result = 0.0;

        let mut last_obj = curr;

        let mut angle_repeat_count = 0.0;

        // * This is iterating backwards in time from the current object.
        for i in 0..curr.idx.min(10) {
            let Some(curr_obj) = curr.previous(i, objects) else {
                break;
            };

            if !curr_obj.is_spinner() {
                let jump_dist = f64::from((curr.pos - curr_obj.end_pos).length());
                cumulative_strain_time += last_obj.strain_time;

                // * We want to nerf objects that can be easily seen within the Flashlight circle radius.
                if i == 0 {
                    small_dist_nerf = (jump_dist / 75.0).min(1.0);
                }

                // * We also want to nerf stacks so that only the first object of the stack is accounted for.
                let stack_nerf = ((curr_obj.lazy_jump_dist / self.scaling_factor) / 25.0).min(1.0);

                // * Bonus based on how visible the object is.
                let opacity = curr.opacity_at(
                    curr_obj.start_time,
                    hidden,
                    self.time_preempt,
                    self.time_fade_in,
                );
                let opacity_bonus = 1.0 + Self::MAX_OPACITY_BONUS * (1.0 - opacity);

                result += stack_nerf * opacity_bonus * self.scaling_factor * jump_dist
                    / cumulative_strain_time;

                if let Some((curr_obj_angle, curr_angle)) = curr_obj.angle.zip(curr.angle) {
                    // * Objects further back in time should count less for the nerf.
                    if (curr_obj_angle - curr_angle).abs() < 0.02 {
                        angle_repeat_count += (1.0 - 0.1 * i as f64).max(0.0);
                    }
                }
            }

            last_obj = curr_obj;
        }

        result = (small_dist_nerf * result).powf(2.0);

        // * Additional bonus for Hidden due to there being no approach circles.
        if hidden {
            result *= 1.0 + Self::HIDDEN_BONUS;
        }

        // * Nerf patterns with repeated angles.
        result *= Self::MIN_ANGLE_MULTIPLIER
            + (1.0 - Self::MIN_ANGLE_MULTIPLIER) / (angle_repeat_count + 1.0);

        let mut slider_bonus = 0.0;

        if let ObjectKind::Slider { repeats } = curr.kind {
            // * Invert the scaling factor to determine the true travel distance independent of circle size.
            let pixel_travel_dist = curr.travel_dist / self.scaling_factor;

            // * Reward sliders based on velocity.
            slider_bonus = (pixel_travel_dist / curr.travel_time - Self::MIN_VELOCITY)
                .max(0.0)
                .powf(0.5);

            // * Longer sliders require more memorisation.
            slider_bonus *= pixel_travel_dist;

            // * Nerf sliders with repeats, as less memorisation is required.
            if repeats > 0 {
                slider_bonus /= (repeats + 1) as f64;
            }
        }

        result + slider_bonus * Self::SLIDER_MULTIPLIER
    }
}

#[cfg(test)]
mod tests {
    use rosu_map::util::Pos;

    use super::*;

    fn jumps(count: u32) -> DifficultyObjects {
        let objects = (1..=count)
            .map(|i| {
                let x = if i % 2 == 0 { 0.0 } else { 300.0 };

                OsuDifficultyObject {
                    start_time: f64::from(i) * 250.0,
                    delta_time: 250.0,
                    strain_time: 250.0,
                    lazy_jump_dist: 300.0,
                    min_jump_dist: 300.0,
                    pos: Pos::new(x, 100.0),
                    end_pos: Pos::new(x, 100.0),
                    ..Default::default()
                }
            })
            .collect();

        DifficultyObjects::new(objects).unwrap()
    }

    fn difficulty(mods: GameMods, objects: &DifficultyObjects) -> f64 {
        let mut flashlight = Flashlight::new(mods, 36.0, 1200.0, 800.0);

        for curr in objects.iter() {
            flashlight.process(curr, objects).unwrap();
        }

        flashlight.difficulty_value()
    }

    #[test]
    fn hidden_is_harder() {
        let objects = jumps(32);

        let nomod = difficulty(GameMods::NONE, &objects);
        let hidden = difficulty(GameMods::from(crate::GameMod::Hidden), &objects);

        assert!(nomod > 0.0);
        assert!(hidden > nomod);
    }

    #[test]
    fn single_object() {
        let objects = jumps(1);

        assert!(difficulty(GameMods::NONE, &objects).abs() < f64::EPSILON);
    }
}
