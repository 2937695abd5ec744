//! Difficulty profiles: labels mapped onto the `(width, height, mines)` triple a [`Board`] is built from.
//!
//! Tables are read from JSON in the shape the desktop game ships as `board_config.json`:
//!
//! ```json
//! { "EASY": { "SIZE": [9, 9], "BOMBS": 10 } }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sweeper_core::{Board, CellCount, Coord2, GameConfig, GameError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Malformed difficulty table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Could not read difficulty table: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown difficulty {0:?}")]
    UnknownDifficulty(String),
    #[error("Difficulty {label:?} is not playable: {source}")]
    InvalidProfile {
        label: String,
        #[source]
        source: GameError,
    },
    #[error(transparent)]
    Game(#[from] GameError),
}

pub type Result<T> = core::result::Result<T, ProfileError>;

/// The difficulties offered by the setup menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Impossible,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Impossible];

    pub const fn label(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "EASY",
            Medium => "MEDIUM",
            Hard => "HARD",
            Impossible => "IMPOSSIBLE",
        }
    }

    pub const fn default_config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Easy => GameConfig::new_unchecked((9, 9), 10),
            Medium => GameConfig::new_unchecked((16, 16), 40),
            Hard => GameConfig::new_unchecked((30, 16), 99),
            Impossible => GameConfig::new_unchecked((30, 24), 225),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ProfileError::UnknownDifficulty(s.to_owned()))
    }
}

/// On-disk form of a single profile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct ProfileEntry {
    #[serde(rename = "SIZE")]
    size: Coord2,
    #[serde(rename = "BOMBS")]
    bombs: CellCount,
}

impl From<GameConfig> for ProfileEntry {
    fn from(config: GameConfig) -> Self {
        Self {
            size: config.size,
            bombs: config.mines,
        }
    }
}

/// Label to board parameters, every entry already validated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DifficultyTable {
    profiles: BTreeMap<String, GameConfig>,
}

impl DifficultyTable {
    /// The four menu difficulties with their stock sizes.
    pub fn builtin() -> Self {
        let profiles = Difficulty::ALL
            .into_iter()
            .map(|difficulty| (difficulty.label().to_owned(), difficulty.default_config()))
            .collect();
        Self { profiles }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_entries(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_entries(serde_json::from_reader(reader)?)
    }

    fn from_entries(entries: BTreeMap<String, ProfileEntry>) -> Result<Self> {
        let mut table = Self::default();
        for (label, entry) in entries {
            table.insert(label, GameConfig::new_unchecked(entry.size, entry.bombs))?;
        }
        log::debug!("Loaded {} difficulty profiles", table.profiles.len());
        Ok(table)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let entries: BTreeMap<&str, ProfileEntry> = self
            .profiles
            .iter()
            .map(|(label, &config)| (label.as_str(), config.into()))
            .collect();
        Ok(serde_json::to_string_pretty(&entries)?)
    }

    /// Adds or replaces a profile, rejecting configs no board could be built from.
    pub fn insert(&mut self, label: impl Into<String>, config: GameConfig) -> Result<()> {
        let label = label.into();
        if let Err(source) = config.validate() {
            log::warn!("Rejecting difficulty {:?}: {}", label, source);
            return Err(ProfileError::InvalidProfile { label, source });
        }
        self.profiles.insert(label, config);
        Ok(())
    }

    pub fn get(&self, label: &str) -> Result<GameConfig> {
        self.profiles
            .get(label)
            .copied()
            .ok_or_else(|| ProfileError::UnknownDifficulty(label.to_owned()))
    }

    pub fn get_difficulty(&self, difficulty: Difficulty) -> Result<GameConfig> {
        self.get(difficulty.label())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Starts a round at the given difficulty.
    pub fn new_board(&self, label: &str, seed: Option<u64>) -> Result<Board> {
        Ok(Board::generate(self.get(label)?, seed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{BoardState, RevealOutcome};

    const CONFIG_JSON: &str = r#"{
        "EASY": { "SIZE": [8, 8], "BOMBS": 8 },
        "MEDIUM": { "SIZE": [12, 12], "BOMBS": 25 },
        "HARD": { "SIZE": [16, 16], "BOMBS": 50 },
        "IMPOSSIBLE": { "SIZE": [20, 20], "BOMBS": 120 }
    }"#;

    #[test]
    fn parses_board_config_file() {
        let table = DifficultyTable::from_json_str(CONFIG_JSON).unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(
            table.get("MEDIUM").unwrap(),
            GameConfig::new((12, 12), 25).unwrap()
        );
        assert_eq!(
            table.labels().collect::<Vec<_>>(),
            vec!["EASY", "HARD", "IMPOSSIBLE", "MEDIUM"]
        );
    }

    #[test]
    fn reads_from_any_reader() {
        let table = DifficultyTable::from_reader(CONFIG_JSON.as_bytes()).unwrap();

        assert_eq!(
            table.get_difficulty(Difficulty::Hard).unwrap(),
            GameConfig::new((16, 16), 50).unwrap()
        );
    }

    #[test]
    fn rejects_unplayable_profile() {
        let json = r#"{ "FULL": { "SIZE": [2, 2], "BOMBS": 4 } }"#;

        match DifficultyTable::from_json_str(json) {
            Err(ProfileError::InvalidProfile { label, source }) => {
                assert_eq!(label, "FULL");
                assert_eq!(source, GameError::TooManyMines);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_json() {
        let json = r#"{ "EASY": { "SIZE": [9], "BOMBS": 10 } }"#;

        assert!(matches!(
            DifficultyTable::from_json_str(json),
            Err(ProfileError::Parse(_))
        ));
    }

    #[test]
    fn unknown_label_is_an_error() {
        let table = DifficultyTable::builtin();

        assert!(matches!(
            table.get("NIGHTMARE"),
            Err(ProfileError::UnknownDifficulty(label)) if label == "NIGHTMARE"
        ));
    }

    #[test]
    fn builtin_table_covers_every_difficulty() {
        let table = DifficultyTable::builtin();

        for difficulty in Difficulty::ALL {
            let config = table.get_difficulty(difficulty).unwrap();
            assert_eq!(config.validate(), Ok(()));
        }
        assert_eq!(
            table.get("EASY").unwrap(),
            GameConfig::new((9, 9), 10).unwrap()
        );
    }

    #[test]
    fn json_output_reloads_to_same_table() {
        let table = DifficultyTable::builtin();

        let json = table.to_json_string().unwrap();

        assert!(json.contains("\"BOMBS\": 99"));
        assert_eq!(DifficultyTable::from_json_str(&json).unwrap(), table);
    }

    #[test]
    fn difficulty_labels_parse_case_insensitively() {
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(Difficulty::Impossible.to_string(), "IMPOSSIBLE");
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!(
            serde_json::to_string(&Difficulty::Medium).unwrap(),
            "\"MEDIUM\""
        );
    }

    #[test]
    fn new_board_uses_profile_dimensions() {
        let table = DifficultyTable::from_json_str(CONFIG_JSON).unwrap();

        let mut board = table.new_board("EASY", Some(99)).unwrap();

        assert_eq!(board.size(), (8, 8));
        assert_eq!(board.mine_count(), 8);
        assert_eq!(board.remaining_mine_estimate(), 8);
        assert_eq!(board.state(), BoardState::InProgress);
        assert_ne!(board.reveal((0, 0)).unwrap(), RevealOutcome::Unchanged);
    }

    #[test]
    fn insert_replaces_existing_profile() {
        let mut table = DifficultyTable::builtin();

        table
            .insert("EASY", GameConfig::new((5, 5), 3).unwrap())
            .unwrap();

        assert_eq!(table.get("EASY").unwrap().mines, 3);
        assert!(matches!(
            table.insert("EMPTY", GameConfig::new_unchecked((0, 4), 0)),
            Err(ProfileError::InvalidProfile { .. })
        ));
        assert_eq!(table.len(), 4);
    }
}
