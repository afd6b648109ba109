//! History codec over the embedded store
//!
//! The full history lives as one JSON blob under the fixed key
//! `utm_history`. Saves overwrite the whole blob; loads fail soft, so a
//! malformed blob degrades to an empty history instead of an error.

use redb::{Database, ReadableDatabase, ReadableTable};
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::database::TABLE_HISTORY;
use crate::model::UtmResult;

/// The single storage key holding the serialized history.
pub const HISTORY_KEY: &str = "utm_history";

/// Storage-level failure while reading or writing the history blob.
///
/// Codec failures on load are not represented here: a blob that does not
/// deserialize is treated as absent history, not as an error.
#[derive(Debug)]
pub enum HistoryError {
    Storage(String),
}

impl Display for HistoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::Storage(msg) => write!(f, "history storage error: {}", msg),
        }
    }
}

impl Error for HistoryError {}

fn storage_err(err: impl Display) -> HistoryError {
    HistoryError::Storage(err.to_string())
}

/// Serialize the full ordered list and overwrite the stored blob.
pub fn save_history(db: &Database, history: &[UtmResult]) -> Result<(), HistoryError> {
    let blob = serde_json::to_string(history).map_err(storage_err)?;

    let write_txn = db.begin_write().map_err(storage_err)?;
    {
        let mut table = write_txn.open_table(TABLE_HISTORY).map_err(storage_err)?;
        table
            .insert(HISTORY_KEY, blob.as_str())
            .map_err(storage_err)?;
    }
    write_txn.commit().map_err(storage_err)?;

    Ok(())
}

/// Load the stored history, newest first.
///
/// An absent key yields an empty list. A blob that fails to deserialize
/// also yields an empty list, with a warning log; the next save will
/// overwrite it.
pub fn load_history(db: &Database) -> Result<Vec<UtmResult>, HistoryError> {
    let read_txn = db.begin_read().map_err(storage_err)?;
    let table = read_txn.open_table(TABLE_HISTORY).map_err(storage_err)?;

    let Some(guard) = table.get(HISTORY_KEY).map_err(storage_err)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<UtmResult>>(guard.value()) {
        Ok(history) => Ok(history),
        Err(err) => {
            tracing::warn!(error = %err, "discarding malformed history blob");
            Ok(Vec::new())
        }
    }
}

/// Prepend a freshly generated result and persist the new list.
///
/// Returns the updated history so callers can respond without a second
/// read.
pub fn push_result(db: &Database, result: UtmResult) -> Result<Vec<UtmResult>, HistoryError> {
    let mut history = load_history(db)?;
    history.insert(0, result);
    save_history(db, &history)?;
    Ok(history)
}

/// Empty the stored history.
pub fn clear_history(db: &Database) -> Result<(), HistoryError> {
    save_history(db, &[])
}
