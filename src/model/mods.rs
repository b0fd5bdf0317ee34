use std::fmt::{Debug, Formatter, Result as FmtResult};

/// A single gamemod that affects difficulty or performance calculation.
///
/// The discriminant is the mod's legacy bit value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum GameMod {
    Easy = 1 << 1,
    TouchDevice = 1 << 2,
    Hidden = 1 << 3,
    HardRock = 1 << 4,
    DoubleTime = 1 << 6,
    Relax = 1 << 7,
    HalfTime = 1 << 8,
    Flashlight = 1 << 10,
}

impl GameMod {
    /// All mods that are considered by this crate.
    pub const ALL: [Self; 8] = [
        Self::Easy,
        Self::TouchDevice,
        Self::Hidden,
        Self::HardRock,
        Self::DoubleTime,
        Self::Relax,
        Self::HalfTime,
        Self::Flashlight,
    ];

    /// The mod's legacy bit value.
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// The mod's acronym.
    pub const fn acronym(self) -> &'static str {
        match self {
            Self::Easy => "EZ",
            Self::TouchDevice => "TD",
            Self::Hidden => "HD",
            Self::HardRock => "HR",
            Self::DoubleTime => "DT",
            Self::Relax => "RX",
            Self::HalfTime => "HT",
            Self::Flashlight => "FL",
        }
    }
}

/// Collection of game mods.
///
/// This type can be created through its `From<T>` implementations where `T`
/// can be
/// - `u32` (legacy bit values; unknown bits are ignored)
/// - [`GameMod`]
///
/// or collected from an iterator of [`GameMod`].
///
/// # Example
///
/// ```
/// use rosu_fc_pp::{GameMod, GameMods};
///
/// let int = GameMods::from(8 + 64);
/// let collected: GameMods = [GameMod::Hidden, GameMod::DoubleTime].into_iter().collect();
///
/// assert_eq!(int, collected);
/// assert!(int.hd() && int.dt() && !int.hr());
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct GameMods {
    bits: u32,
}

impl GameMods {
    /// No mods.
    pub const NONE: Self = Self { bits: 0 };

    /// The legacy bit value of all contained mods.
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Whether the given mod is contained.
    pub const fn contains(self, gamemod: GameMod) -> bool {
        self.bits & gamemod.bits() != 0
    }

    /// Add a mod.
    pub const fn with(mut self, gamemod: GameMod) -> Self {
        self.bits |= gamemod.bits();

        self
    }

    /// Add a mod in place.
    pub fn insert(&mut self, gamemod: GameMod) {
        self.bits |= gamemod.bits();
    }

    /// Iterate over all contained mods.
    pub fn iter(self) -> impl Iterator<Item = GameMod> {
        GameMod::ALL
            .into_iter()
            .filter(move |gamemod| self.contains(*gamemod))
    }

    /// The clock rate w.r.t. speed changing mods.
    pub const fn clock_rate(self) -> f64 {
        if self.dt() {
            1.5
        } else if self.ht() {
            0.75
        } else {
            1.0
        }
    }

    pub(crate) const fn od_ar_hp_multiplier(self) -> f64 {
        if self.hr() {
            1.4
        } else if self.ez() {
            0.5
        } else {
            1.0
        }
    }
}

macro_rules! impl_has_mod {
    ( $( $fn_name:ident: $gamemod:ident [ $s:literal ], )* ) => {
        impl GameMods {
            $(
                #[doc = "Check whether [`GameMods`] contain `"]
                #[doc = $s]
                #[doc = "`."]
                pub const fn $fn_name(self) -> bool {
                    self.contains(GameMod::$gamemod)
                }
            )*
        }
    };
}

impl_has_mod! {
    ez: Easy ["Easy"],
    td: TouchDevice ["TouchDevice"],
    hd: Hidden ["Hidden"],
    hr: HardRock ["HardRock"],
    dt: DoubleTime ["DoubleTime"],
    rx: Relax ["Relax"],
    ht: HalfTime ["HalfTime"],
    fl: Flashlight ["Flashlight"],
}

impl Debug for GameMods {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.bits == 0 {
            return f.write_str("NM");
        }

        for gamemod in self.iter() {
            f.write_str(gamemod.acronym())?;
        }

        Ok(())
    }
}

impl From<u32> for GameMods {
    fn from(bits: u32) -> Self {
        let known = GameMod::ALL
            .into_iter()
            .fold(0, |known, gamemod| known | gamemod.bits());

        Self { bits: bits & known }
    }
}

impl From<GameMod> for GameMods {
    fn from(gamemod: GameMod) -> Self {
        Self::NONE.with(gamemod)
    }
}

impl FromIterator<GameMod> for GameMods {
    fn from_iter<I: IntoIterator<Item = GameMod>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_bits_ignored() {
        // NoFail and SpunOut
        let mods = GameMods::from(1 + 4096 + 8);

        assert_eq!(mods.bits(), 8);
        assert!(mods.hd());
    }

    #[test]
    fn debug_acronyms() {
        let mods = GameMods::from(8 + 16 + 1024);

        assert_eq!(format!("{mods:?}"), "HDHRFL");
        assert_eq!(format!("{:?}", GameMods::NONE), "NM");
    }

    #[test]
    fn clock_rate() {
        assert!((GameMods::from(GameMod::DoubleTime).clock_rate() - 1.5).abs() < f64::EPSILON);
        assert!((GameMods::from(GameMod::HalfTime).clock_rate() - 0.75).abs() < f64::EPSILON);
        assert!((GameMods::NONE.clock_rate() - 1.0).abs() < f64::EPSILON);
    }
}
