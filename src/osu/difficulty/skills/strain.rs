use crate::{
    osu::difficulty::object::{DifficultyObjects, OsuDifficultyObject},
    util::float_ext::FloatExt,
};

/// Length of a strain section in milliseconds.
pub const SECTION_LEN: f64 = 400.0;

pub fn strain_decay(ms: f64, strain_decay_base: f64) -> f64 {
    strain_decay_base.powf(ms / 1000.0)
}

/// Peak bookkeeping for strain-based skills.
#[derive(Clone, Debug, Default)]
pub struct StrainSections {
    pub curr_section_peak: f64,
    pub curr_section_end: f64,
    pub strain_peaks: Vec<f64>,
}

impl StrainSections {
    /// All finished section peaks plus the peak of the section in progress.
    pub fn curr_strain_peaks(&self) -> Vec<f64> {
        let mut strain_peaks = Vec::with_capacity(self.strain_peaks.len() + 1);
        strain_peaks.extend_from_slice(&self.strain_peaks);
        strain_peaks.push(self.curr_section_peak);

        strain_peaks
    }
}

pub trait StrainSkill {
    const DECAY_WEIGHT: f64 = 0.9;

    fn sections(&self) -> &StrainSections;
    fn sections_mut(&mut self) -> &mut StrainSections;

    fn strain_value_at(&mut self, curr: &OsuDifficultyObject, objects: &DifficultyObjects) -> f64;

    fn calculate_initial_strain(
        &self,
        time: f64,
        curr: &OsuDifficultyObject,
        objects: &DifficultyObjects,
    ) -> f64;

    fn process_strain(&mut self, curr: &OsuDifficultyObject, objects: &DifficultyObjects) {
        // * The first object doesn't generate a strain, so we begin with an incremented section end
        if curr.idx == 0 {
            self.sections_mut().curr_section_end =
                (curr.start_time / SECTION_LEN).ceil() * SECTION_LEN;
        }

        while curr.start_time > self.sections().curr_section_end {
            let section_end = self.sections().curr_section_end;

            // * The maximum strain of the new section is not zero by default
            // * This means we need to capture the strain level at the beginning of the new section,
            // * and use that as the initial peak level.
            let initial_strain = self.calculate_initial_strain(section_end, curr, objects);

            let sections = self.sections_mut();
            sections.strain_peaks.push(sections.curr_section_peak);
            sections.curr_section_peak = initial_strain;
            sections.curr_section_end += SECTION_LEN;
        }

        let strain = self.strain_value_at(curr, objects);
        let sections = self.sections_mut();
        sections.curr_section_peak = strain.max(sections.curr_section_peak);
    }
}

pub trait OsuStrainSkill: StrainSkill {
    const REDUCED_SECTION_COUNT: usize = 10;
    const REDUCED_STRAIN_BASELINE: f64 = 0.75;
    const DIFFICULTY_MULTIPLIER: f64 = 1.06;

    fn reduced_difficulty_value(&self) -> f64 {
        let mut difficulty = 0.0;
        let mut weight = 1.0;

        // * Sections with 0 strain are excluded to avoid worst-case time complexity of the following sort (e.g. /b/2351871).
        // * These sections will not contribute to the difficulty.
        let mut peaks = self.sections().curr_strain_peaks();
        peaks.retain(|&peak| peak > 0.0);
        peaks.sort_unstable_by(|a, b| b.total_cmp(a));

        // * We are reducing the highest strains first to account for extreme difficulty spikes
        for (i, strain) in peaks.iter_mut().take(Self::REDUCED_SECTION_COUNT).enumerate() {
            let clamped = f64::from((i as f32 / Self::REDUCED_SECTION_COUNT as f32).clamp(0.0, 1.0));
            let scale = FloatExt::lerp(1.0, 10.0, clamped).log10();
            *strain *= FloatExt::lerp(Self::REDUCED_STRAIN_BASELINE, 1.0, scale);
        }

        peaks.sort_unstable_by(|a, b| b.total_cmp(a));

        // * Difficulty is the weighted sum of the highest strains from every section.
        // * We're sorting from highest to lowest strain.
        for strain in peaks {
            difficulty += strain * weight;
            weight *= Self::DECAY_WEIGHT;
        }

        difficulty * Self::DIFFICULTY_MULTIPLIER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant {
        sections: StrainSections,
        strain: f64,
    }

    impl StrainSkill for Constant {
        fn sections(&self) -> &StrainSections {
            &self.sections
        }

        fn sections_mut(&mut self) -> &mut StrainSections {
            &mut self.sections
        }

        fn strain_value_at(&mut self, _: &OsuDifficultyObject, _: &DifficultyObjects) -> f64 {
            self.strain
        }

        fn calculate_initial_strain(
            &self,
            _: f64,
            _: &OsuDifficultyObject,
            _: &DifficultyObjects,
        ) -> f64 {
            0.0
        }
    }

    impl OsuStrainSkill for Constant {}

    #[test]
    fn sections_split_every_400ms() {
        let objects = DifficultyObjects::new(
            (0..5)
                .map(|i| OsuDifficultyObject {
                    start_time: f64::from(i) * 300.0 + 100.0,
                    strain_time: 300.0,
                    ..Default::default()
                })
                .collect(),
        )
        .unwrap();

        let mut skill = Constant {
            sections: StrainSections::default(),
            strain: 2.0,
        };

        for curr in objects.iter() {
            skill.process_strain(curr, &objects);
        }

        // Objects at 100, 400, 700, 1000, 1300
        assert_eq!(skill.sections.curr_strain_peaks(), [2.0, 2.0, 2.0, 2.0]);
        assert!(skill.reduced_difficulty_value() > 0.0);
    }

    #[test]
    fn decay() {
        assert!((strain_decay(0.0, 0.3) - 1.0).abs() < f64::EPSILON);
        assert!((strain_decay(1000.0, 0.15) - 0.15).abs() < 1e-12);
    }
}
