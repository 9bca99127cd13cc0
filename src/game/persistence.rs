use log::{info, warn};
use web_sys::Storage;

use super::{
    rules::RuleError,
    state::{GameEvent, GameState},
};

/// 唯一的存档槽位。
pub trait SaveSlot {
    fn read(&self) -> Result<Option<String>, RuleError>;
    fn write(&mut self, document: &str) -> Result<(), RuleError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    document: Option<String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
        }
    }
}

impl SaveSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, RuleError> {
        Ok(self.document.clone())
    }

    fn write(&mut self, document: &str) -> Result<(), RuleError> {
        self.document = Some(document.to_string());
        Ok(())
    }
}

/// 基于浏览器 `localStorage` 的存档槽位。
pub struct BrowserStorage {
    storage: Storage,
    key: String,
}

impl BrowserStorage {
    pub fn open(key: impl Into<String>) -> Result<Self, RuleError> {
        let unavailable = |reason: &str| RuleError::StorageUnavailable {
            reason: reason.to_string(),
        };
        let window = web_sys::window().ok_or_else(|| unavailable("no window"))?;
        let storage = window
            .local_storage()
            .map_err(|_| unavailable("localStorage access denied"))?
            .ok_or_else(|| unavailable("localStorage missing"))?;
        Ok(Self {
            storage,
            key: key.into(),
        })
    }
}

impl SaveSlot for BrowserStorage {
    fn read(&self) -> Result<Option<String>, RuleError> {
        self.storage
            .get_item(&self.key)
            .map_err(|_| RuleError::StorageUnavailable {
                reason: "localStorage read failed".into(),
            })
    }

    fn write(&mut self, document: &str) -> Result<(), RuleError> {
        self.storage
            .set_item(&self.key, document)
            .map_err(|_| RuleError::StorageUnavailable {
                reason: "localStorage write failed".into(),
            })
    }
}

pub fn export_state(state: &GameState) -> GameState {
    state.clone()
}

pub fn export_json(state: &GameState) -> Result<String, RuleError> {
    serde_json::to_string(state).map_err(|error| RuleError::MalformedSnapshot {
        reason: error.to_string(),
    })
}

/// 用快照整体覆盖当前状态，没有快照时不做任何修改。
pub fn import_state(
    state: &mut GameState,
    snapshot: Option<GameState>,
) -> Result<GameEvent, RuleError> {
    let snapshot = snapshot.ok_or(RuleError::PersistenceMiss)?;
    *state = snapshot;
    info!("state restored, balance {}", state.balance);
    Ok(GameEvent::GameLoaded)
}

pub fn parse_snapshot(document: &str) -> Result<GameState, RuleError> {
    serde_json::from_str(document).map_err(|error| RuleError::MalformedSnapshot {
        reason: error.to_string(),
    })
}

/// 无法解析的存档与缺失的存档同样视为 `PersistenceMiss`，状态保持不变。
pub fn import_json(state: &mut GameState, document: Option<&str>) -> Result<GameEvent, RuleError> {
    let snapshot = match document.map(parse_snapshot) {
        Some(Ok(snapshot)) => Some(snapshot),
        Some(Err(error)) => {
            warn!("snapshot rejected: {error}");
            None
        }
        None => None,
    };
    import_state(state, snapshot)
}

pub fn save_game(state: &GameState, slot: &mut impl SaveSlot) -> Result<GameEvent, RuleError> {
    let document = export_json(state)?;
    slot.write(&document)?;
    info!("game saved");
    Ok(GameEvent::GameSaved)
}

pub fn load_game(state: &mut GameState, slot: &impl SaveSlot) -> Result<GameEvent, RuleError> {
    let document = slot.read()?;
    import_json(state, document.as_deref())
}
