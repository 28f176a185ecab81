//! Goal repository for CSV storage
//!
//! Manages one user's goals.csv with a unique (month, category) index.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendlogError;
use crate::models::{Category, Goal, GoalId, Month};

use super::csv_io::{read_records, write_records_atomic};

/// Repository for goal persistence, indexed by (month, category)
pub struct GoalRepository {
    path: PathBuf,
    data: RwLock<HashMap<GoalId, Goal>>,
    /// Index: (month, category) -> goal_id. At most one goal per slot.
    by_slot: RwLock<HashMap<(Month, Category), GoalId>>,
}

impl GoalRepository {
    /// Create a new goal repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_slot: RwLock::new(HashMap::new()),
        }
    }

    /// Load goals from disk and build the slot index
    ///
    /// If a hand-edited file contains two goals for the same slot, the later
    /// row wins the index entry; the earlier one is dropped on the next save.
    pub fn load(&self) -> Result<(), SpendlogError> {
        let records: Vec<Goal> = read_records(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_slot = self
            .by_slot
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_slot.clear();

        for goal in records {
            if let Some(prev_id) = by_slot.insert(goal.slot(), goal.id) {
                data.remove(&prev_id);
            }
            data.insert(goal.id, goal);
        }

        Ok(())
    }

    /// Save goals to disk, sorted by month then category
    pub fn save(&self) -> Result<(), SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut goals: Vec<_> = data.values().cloned().collect();
        goals.sort_by(|a, b| a.month.cmp(&b.month).then_with(|| a.category.cmp(&b.category)));

        write_records_atomic(&self.path, &goals)
    }

    /// Get a goal by ID
    pub fn get(&self, id: GoalId) -> Result<Option<Goal>, SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get the goal occupying a (month, category) slot
    pub fn get_by_slot(
        &self,
        month: Month,
        category: &Category,
    ) -> Result<Option<Goal>, SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_slot = self
            .by_slot
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(by_slot
            .get(&(month, category.clone()))
            .and_then(|id| data.get(id).cloned()))
    }

    /// Get all goals, sorted by month then category
    pub fn get_all(&self) -> Result<Vec<Goal>, SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut goals: Vec<_> = data.values().cloned().collect();
        goals.sort_by(|a, b| a.month.cmp(&b.month).then_with(|| a.category.cmp(&b.category)));
        Ok(goals)
    }

    /// Get all goals for a month, sorted by category
    pub fn get_by_month(&self, month: Month) -> Result<Vec<Goal>, SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut goals: Vec<_> = data
            .values()
            .filter(|g| g.month == month)
            .cloned()
            .collect();
        goals.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(goals)
    }

    /// Insert or update a goal
    ///
    /// The caller is responsible for slot uniqueness; this replaces any goal
    /// already holding the slot only when it is the same record.
    pub fn upsert(&self, goal: Goal) -> Result<(), SpendlogError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_slot = self
            .by_slot
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        // Remove the old slot mapping if the goal moved
        if let Some(old) = data.get(&goal.id) {
            if old.slot() != goal.slot() {
                by_slot.remove(&old.slot());
            }
        }

        by_slot.insert(goal.slot(), goal.id);
        data.insert(goal.id, goal);
        Ok(())
    }

    /// Delete a goal, returning whether it existed
    pub fn delete(&self, id: GoalId) -> Result<bool, SpendlogError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_slot = self
            .by_slot
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(goal) = data.remove(&id) {
            by_slot.remove(&goal.slot());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Count goals
    pub fn count(&self) -> Result<usize, SpendlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
