//! 赌场核心逻辑模块（状态、规则引擎、存档等）。

pub mod items;
pub mod persistence;
pub mod random;
pub mod rules;
pub mod state;

pub use items::StatusItem;
pub use persistence::{
    export_json,
    export_state,
    import_json,
    import_state,
    load_game,
    parse_snapshot,
    save_game,
    BrowserStorage,
    MemorySlot,
    SaveSlot,
};
pub use random::{RandomSource, SmallRngSource};
pub use rules::{InputField, RuleEngine, RuleError, RuleResolution, SpendAction};
pub use state::{GameEvent, GameState, StatusRange};
