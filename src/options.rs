use crate::consts;
use crate::game::Grid;
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Gameplay options: how big the level is and how fast the snake moves.
/// Changing any of these only takes effect when a new game is constructed.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Options {
    pub(crate) difficulty: Difficulty,
    pub(crate) grid_width: GridDim,
    pub(crate) grid_height: GridDim,
}

impl Options {
    pub(crate) fn grid(&self) -> Grid {
        Grid::new(self.grid_width.get(), self.grid_height.get())
    }

    pub(crate) fn get(&self, key: OptKey) -> OptValue {
        match key {
            OptKey::Difficulty => self.difficulty.into(),
            OptKey::GridWidth => self.grid_width.into(),
            OptKey::GridHeight => self.grid_height.into(),
        }
    }

    pub(crate) fn set(&mut self, key: OptKey, value: OptValue) {
        match key {
            OptKey::Difficulty => {
                self.difficulty = value
                    .try_into()
                    .expect("Options::set(Difficulty, value) called with non-Difficulty value");
            }
            OptKey::GridWidth => {
                self.grid_width = value
                    .try_into()
                    .expect("Options::set(GridWidth, value) called with non-GridDim value");
            }
            OptKey::GridHeight => {
                self.grid_height = value
                    .try_into()
                    .expect("Options::set(GridHeight, value) called with non-GridDim value");
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum OptKey {
    Difficulty,
    GridWidth,
    GridHeight,
}

impl OptKey {
    pub(crate) const DISPLAY_WIDTH: u16 = 11;

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OptKey::Difficulty => "Difficulty",
            OptKey::GridWidth => "Grid Width",
            OptKey::GridHeight => "Grid Height",
        }
    }
}

impl fmt::Display for OptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[enum_dispatch]
pub(crate) trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[enum_dispatch(Adjustable)] // This also gives us From and TryInto
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OptValue {
    Difficulty,
    GridDim,
}

impl OptValue {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;
}

// This is needed for EnumMap to be convenient to construct.
impl Default for OptValue {
    fn default() -> OptValue {
        OptValue::Difficulty(Difficulty::default())
    }
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OptValue::Difficulty(d) => {
                write!(
                    f,
                    "{left} {d:6} {right}",
                    left = if d.can_decrease() { '◀' } else { '◁' },
                    right = if d.can_increase() { '▶' } else { '▷' }
                )
            }
            OptValue::GridDim(dim) => {
                write!(
                    f,
                    "{left} {dim:^6} {right}",
                    left = if dim.can_decrease() { '◀' } else { '◁' },
                    right = if dim.can_increase() { '▶' } else { '▷' }
                )
            }
        }
    }
}

/// Movement speed presets.  Each selects a fixed interval between simulation
/// steps; there is no speed-up over the course of a game.
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub(crate) const MINIMUM: Difficulty = Difficulty::Easy;
    pub(crate) const MAXIMUM: Difficulty = Difficulty::Hard;

    /// Time between simulation steps at this difficulty
    pub(crate) fn tick_interval(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(200),
            Difficulty::Medium => Duration::from_millis(150),
            Difficulty::Hard => Duration::from_millis(100),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Difficulty, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("invalid difficulty: {s:?}")),
        }
    }
}

impl Adjustable for Difficulty {
    fn increase(&mut self) {
        match self {
            Difficulty::Easy => *self = Difficulty::Medium,
            Difficulty::Medium => *self = Difficulty::Hard,
            Difficulty::Hard => (),
        }
    }

    fn decrease(&mut self) {
        match self {
            Difficulty::Easy => (),
            Difficulty::Medium => *self = Difficulty::Easy,
            Difficulty::Hard => *self = Difficulty::Medium,
        }
    }

    fn can_increase(&self) -> bool {
        *self != Self::MAXIMUM
    }

    fn can_decrease(&self) -> bool {
        *self != Self::MINIMUM
    }
}

/// One grid dimension, kept within [`consts::GRID_DIM_MIN`] ..=
/// [`consts::GRID_DIM_MAX`].  Out-of-range values from the configuration or
/// the command line are clamped, not rejected.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(from = "u16")]
pub(crate) struct GridDim(u16);

impl GridDim {
    pub(crate) fn new(dim: u16) -> GridDim {
        GridDim(dim.clamp(consts::GRID_DIM_MIN, consts::GRID_DIM_MAX))
    }

    pub(crate) fn get(self) -> u16 {
        self.0
    }
}

impl Default for GridDim {
    fn default() -> GridDim {
        GridDim(20)
    }
}

impl From<u16> for GridDim {
    fn from(dim: u16) -> GridDim {
        GridDim::new(dim)
    }
}

impl fmt::Display for GridDim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.to_string())
    }
}

impl Adjustable for GridDim {
    fn increase(&mut self) {
        if self.can_increase() {
            self.0 += 1;
        }
    }

    fn decrease(&mut self) {
        if self.can_decrease() {
            self.0 -= 1;
        }
    }

    fn can_increase(&self) -> bool {
        self.0 < consts::GRID_DIM_MAX
    }

    fn can_decrease(&self) -> bool {
        self.0 > consts::GRID_DIM_MIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::EnumExt;
    use rstest::rstest;

    mod opt_key {
        use super::*;

        #[test]
        fn display_width() {
            let actual_width = OptKey::iter()
                .map(|key| key.as_str().chars().count())
                .max()
                .unwrap();
            assert_eq!(actual_width, usize::from(OptKey::DISPLAY_WIDTH));
        }

        #[test]
        fn fmt_width() {
            assert_eq!(
                format!(
                    "{:width$}",
                    OptKey::GridWidth,
                    width = usize::from(OptKey::DISPLAY_WIDTH)
                ),
                "Grid Width "
            );
        }
    }

    mod opt_value {
        use super::*;

        #[test]
        fn display_width() {
            let actual_width = [
                OptValue::Difficulty(Difficulty::Easy),
                OptValue::Difficulty(Difficulty::Medium),
                OptValue::Difficulty(Difficulty::Hard),
                OptValue::GridDim(GridDim::new(consts::GRID_DIM_MIN)),
                OptValue::GridDim(GridDim::new(consts::GRID_DIM_MAX)),
            ]
            .iter()
            .map(|value| value.to_string().chars().count())
            .max()
            .unwrap();
            assert_eq!(actual_width, usize::from(OptValue::DISPLAY_WIDTH));
        }
    }

    mod difficulty {
        use super::*;

        #[rstest]
        #[case(Difficulty::Easy, Duration::from_millis(200))]
        #[case(Difficulty::Medium, Duration::from_millis(150))]
        #[case(Difficulty::Hard, Duration::from_millis(100))]
        fn tick_interval(#[case] difficulty: Difficulty, #[case] interval: Duration) {
            assert_eq!(difficulty.tick_interval(), interval);
        }

        #[rstest]
        #[case("easy", Difficulty::Easy)]
        #[case("MEDIUM", Difficulty::Medium)]
        #[case("Hard", Difficulty::Hard)]
        fn from_str(#[case] s: &str, #[case] difficulty: Difficulty) {
            assert_eq!(s.parse::<Difficulty>().unwrap(), difficulty);
        }

        #[test]
        fn from_str_invalid() {
            assert!("impossible".parse::<Difficulty>().is_err());
        }

        #[test]
        fn adjust() {
            let mut d = Difficulty::Easy;
            assert!(!d.can_decrease());
            d.increase();
            assert_eq!(d, Difficulty::Medium);
            d.increase();
            assert_eq!(d, Difficulty::Hard);
            assert!(!d.can_increase());
            d.increase();
            assert_eq!(d, Difficulty::Hard);
        }
    }

    mod grid_dim {
        use super::*;

        #[rstest]
        #[case(0, 10)]
        #[case(9, 10)]
        #[case(10, 10)]
        #[case(35, 35)]
        #[case(50, 50)]
        #[case(51, 50)]
        #[case(u16::MAX, 50)]
        fn clamped(#[case] raw: u16, #[case] expected: u16) {
            assert_eq!(GridDim::new(raw).get(), expected);
        }

        #[test]
        fn adjust_at_bounds() {
            let mut dim = GridDim::new(consts::GRID_DIM_MAX);
            assert!(!dim.can_increase());
            dim.increase();
            assert_eq!(dim.get(), consts::GRID_DIM_MAX);
            dim.decrease();
            assert_eq!(dim.get(), consts::GRID_DIM_MAX - 1);
        }
    }

    #[test]
    fn deserialize_with_clamping() {
        let opts = toml::from_str::<Options>(concat!(
            "difficulty = \"hard\"\n",
            "grid-width = 12\n",
            "grid-height = 99\n",
        ))
        .unwrap();
        assert_eq!(opts.difficulty, Difficulty::Hard);
        assert_eq!(opts.grid_width.get(), 12);
        assert_eq!(opts.grid_height.get(), 50);
    }

    #[test]
    fn get_set_round_trip() {
        let mut opts = Options::default();
        for key in OptKey::iter() {
            let mut value = opts.get(key);
            value.increase();
            opts.set(key, value);
            assert_eq!(opts.get(key), value);
        }
        assert_eq!(opts.difficulty, Difficulty::Medium);
        assert_eq!(opts.grid_width.get(), 21);
        assert_eq!(opts.grid_height.get(), 21);
    }
}
