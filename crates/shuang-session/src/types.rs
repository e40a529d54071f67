pub use shuang_core::settings::PracticeMode;

pub(crate) const DEFAULT_SLOWEST_LIMIT: usize = 10;

/// Lifecycle of a practice session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Running,
    Paused,
    Completed,
}

/// Where sentence practice draws its text from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TextSource {
    #[default]
    Builtin,
    /// Sentences from an uploaded file, already split into lines.
    Upload(Vec<String>),
}

/// Resolved preferences the session generates text with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: PracticeMode,
    pub source: TextSource,
    pub skip_non_chinese: bool,
    /// How many entries the slowest-characters report keeps.
    pub slowest_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: PracticeMode::Sentence,
            source: TextSource::Builtin,
            skip_non_chinese: false,
            slowest_limit: DEFAULT_SLOWEST_LIMIT,
        }
    }
}

/// One position of the practice sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterUnit {
    pub ch: char,
    pub syllable: Option<String>,
    /// Keys to type; `None` means the unit is passed over automatically.
    pub keys: Option<String>,
}

impl CharacterUnit {
    pub fn requires_input(&self) -> bool {
        self.keys.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// How a unit should be presented relative to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitStatus {
    /// Typed (or passed over) already.
    Done,
    /// Under the cursor.
    Current,
    /// Still to be typed.
    Pending,
    /// Needs no input and is not yet behind the cursor.
    Passive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitView<'a> {
    pub unit: &'a CharacterUnit,
    pub status: UnitStatus,
}

/// Result of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The session is not running or already at the end; nothing happened.
    Ignored,
    /// Fewer characters than the required keys; keep typing.
    Waiting,
    /// Wrong keys (or too many); recorded and cleared.
    Error { too_long: bool },
    /// Current unit done, cursor moved on.
    Correct { word_mode: bool },
    /// The cursor sat on a unit needing no input and moved past it.
    Skipped,
    /// Last unit done.
    Completed,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no text to practice")]
    NoText,
}
