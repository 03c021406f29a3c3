//! Local, single-user draft persistence.
//!
//! Scheduling assignments and UI preferences are drafts that live next to
//! the client rather than in the database. A [`KeyValueStore`] holds string
//! values under fixed keys; callers load on start-up and save after every
//! change.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::types::DbId;

/// Milestone-to-date assignments, JSON `{isoDate: milestoneId[]}`.
pub const SCHEDULE_KEY: &str = "atelier.schedule.assignments";
/// Design pattern / theme preference.
pub const THEME_KEY: &str = "atelier.design.pattern";
/// Selected year filter.
pub const YEAR_FILTER_KEY: &str = "atelier.filters.year";

/// String key-value persistence with explicit load/save.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}

/// Volatile store, mainly for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file. Every save rewrites the file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable file is an empty store.
    fn read_all(&self) -> BTreeMap<String, String> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), CoreError> {
        let text = serde_json::to_string_pretty(entries)
            .map_err(|e| CoreError::Internal(format!("Failed to encode drafts: {e}")))?;
        fs::write(&self.path, text).map_err(|e| {
            CoreError::Internal(format!(
                "Failed to write drafts to {}: {e}",
                self.path.display()
            ))
        })
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.read_all().remove(key))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut entries = self.read_all();
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        let mut entries = self.read_all();
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Schedule draft
// ---------------------------------------------------------------------------

/// Milestones assigned to calendar days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleDraft {
    assignments: BTreeMap<NaiveDate, Vec<DbId>>,
}

impl ScheduleDraft {
    /// Load from the store. Missing or corrupt data yields an empty draft;
    /// keys that are not ISO dates are skipped.
    pub fn load(store: &impl KeyValueStore) -> Result<Self, CoreError> {
        let Some(raw) = store.load(SCHEDULE_KEY)? else {
            return Ok(Self::default());
        };
        let parsed: BTreeMap<String, Vec<DbId>> = serde_json::from_str(&raw).unwrap_or_default();
        let assignments = parsed
            .into_iter()
            .filter_map(|(date, ids)| {
                NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .ok()
                    .map(|d| (d, ids))
            })
            .filter(|(_, ids)| !ids.is_empty())
            .collect();
        Ok(Self { assignments })
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), CoreError> {
        let encoded: BTreeMap<String, &Vec<DbId>> = self
            .assignments
            .iter()
            .map(|(date, ids)| (date.format("%Y-%m-%d").to_string(), ids))
            .collect();
        let text = serde_json::to_string(&encoded)
            .map_err(|e| CoreError::Internal(format!("Failed to encode schedule: {e}")))?;
        store.save(SCHEDULE_KEY, &text)
    }

    /// Assign a milestone to a day. Assigning twice is a no-op.
    pub fn assign(&mut self, date: NaiveDate, milestone_id: DbId) {
        let ids = self.assignments.entry(date).or_default();
        if !ids.contains(&milestone_id) {
            ids.push(milestone_id);
        }
    }

    /// Remove a milestone from a day; empty days are dropped.
    pub fn unassign(&mut self, date: NaiveDate, milestone_id: DbId) {
        if let Some(ids) = self.assignments.get_mut(&date) {
            ids.retain(|id| *id != milestone_id);
            if ids.is_empty() {
                self.assignments.remove(&date);
            }
        }
    }

    /// Move a milestone between days.
    pub fn reschedule(&mut self, from: NaiveDate, to: NaiveDate, milestone_id: DbId) {
        self.unassign(from, milestone_id);
        self.assign(to, milestone_id);
    }

    pub fn milestones_on(&self, date: NaiveDate) -> &[DbId] {
        self.assignments.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days in chronological order.
    pub fn days(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<DbId>)> {
        self.assignments.iter()
    }
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Theme / design-pattern preference, if one was saved.
pub fn load_theme(store: &impl KeyValueStore) -> Result<Option<String>, CoreError> {
    store.load(THEME_KEY)
}

pub fn save_theme(store: &mut impl KeyValueStore, theme: &str) -> Result<(), CoreError> {
    store.save(THEME_KEY, theme)
}

/// Selected year filter; a non-numeric saved value reads as unset.
pub fn load_year_filter(store: &impl KeyValueStore) -> Result<Option<i32>, CoreError> {
    Ok(store
        .load(YEAR_FILTER_KEY)?
        .and_then(|v| v.trim().parse().ok()))
}

pub fn save_year_filter(store: &mut impl KeyValueStore, year: i32) -> Result<(), CoreError> {
    store.save(YEAR_FILTER_KEY, &year.to_string())
}
