/// Fixed defaults for a conversion run.
/// Any of these can be overridden per checkout through `converter.toml`.

// Files
pub const DEFAULT_INPUT_PATH: &str = "korean_words.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "db-init/words.sql";
pub const CONFIG_PATH: &str = "converter.toml";

// Target table (must match the entity used by the game server)
pub const DEFAULT_TABLE_NAME: &str = "dictionary";
pub const DEFAULT_COLUMN_NAME: &str = "name";

/// Part-of-speech tag for nouns in the source dictionary
pub const DEFAULT_TARGET_POS: &str = "명";

pub const DEFAULT_BATCH_SIZE: usize = 1000;
pub const DEFAULT_MAX_WORD_LENGTH: usize = 100;

/// Log a running count every N accepted words
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10_000;

// Positional columns in the source CSV: {id, word, part of speech, ...}
pub const WORD_COLUMN: usize = 1;
pub const POS_COLUMN: usize = 2;
pub const MIN_COLUMNS: usize = 3;
