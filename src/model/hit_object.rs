pub use rosu_map::util::Pos;

/// All hitobject related data required for difficulty and performance
/// calculation.
///
/// Positions are expected to already include stacking offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct HitObject {
    pub pos: Pos,
    pub start_time: f64,
    pub kind: HitObjectKind,
}

impl HitObject {
    /// Create a new circle.
    pub const fn circle(pos: Pos, start_time: f64) -> Self {
        Self {
            pos,
            start_time,
            kind: HitObjectKind::Circle,
        }
    }

    /// Create a new slider.
    pub const fn slider(pos: Pos, start_time: f64, slider: Slider) -> Self {
        Self {
            pos,
            start_time,
            kind: HitObjectKind::Slider(slider),
        }
    }

    /// Create a new spinner.
    pub const fn spinner(pos: Pos, start_time: f64, duration: f64) -> Self {
        Self {
            pos,
            start_time,
            kind: HitObjectKind::Spinner(Spinner { duration }),
        }
    }

    /// Whether the hitobject is a circle.
    pub const fn is_circle(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Circle)
    }

    /// Whether the hitobject is a slider.
    pub const fn is_slider(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Slider(_))
    }

    /// Whether the hitobject is a spinner.
    pub const fn is_spinner(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Spinner(_))
    }

    /// The end time of the object.
    pub fn end_time(&self) -> f64 {
        match &self.kind {
            HitObjectKind::Circle => self.start_time,
            HitObjectKind::Slider(Slider { duration, .. })
            | HitObjectKind::Spinner(Spinner { duration }) => self.start_time + *duration,
        }
    }
}

/// Additional data for a [`HitObject`].
#[derive(Clone, Debug, PartialEq)]
pub enum HitObjectKind {
    Circle,
    Slider(Slider),
    Spinner(Spinner),
}

/// A slider whose path was already resolved.
///
/// The path is approximated by the straight segment from the slider head to
/// `end_pos`.
#[derive(Clone, Debug, PartialEq)]
pub struct Slider {
    /// Absolute position at which the path ends.
    pub end_pos: Pos,
    /// Duration of all spans combined in milliseconds.
    pub duration: f64,
    /// The amount of repeats.
    pub repeats: usize,
    /// The amount of ticks within each span.
    pub ticks_per_span: usize,
}

impl Slider {
    /// The amount of spans of the slider.
    pub const fn span_count(&self) -> usize {
        self.repeats + 1
    }

    /// Position along the path for the given progress in `[0, 1]` where `1`
    /// denotes the path's end.
    pub(crate) fn position_at(&self, head: Pos, progress: f64) -> Pos {
        head + (self.end_pos - head) * progress as f32
    }
}

/// A spinner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spinner {
    pub duration: f64,
}
