//! Goal service
//!
//! Manages monthly budget goals. A goal occupies a (month, category) slot
//! and each slot holds at most one goal; `set` replaces whatever holds the
//! slot, while `update` refuses to move a goal onto an occupied slot.

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{Category, Goal, GoalId, Money, Month};
use crate::storage::UserStore;

/// Fields that can change on an existing goal
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub month: Option<Month>,
    pub category: Option<Category>,
    pub target: Option<Money>,
}

impl GoalUpdate {
    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.category.is_none() && self.target.is_none()
    }
}

/// Result of setting a goal: the stored goal plus whether it replaced one
#[derive(Debug, Clone)]
pub struct SetGoalOutcome {
    pub goal: Goal,
    pub replaced: bool,
}

/// Service for goal management, scoped to one user's store
pub struct GoalService<'a> {
    store: &'a UserStore,
}

impl<'a> GoalService<'a> {
    /// Create a new goal service
    pub fn new(store: &'a UserStore) -> Self {
        Self { store }
    }

    /// Set the goal for a (month, category) slot
    ///
    /// If a goal already occupies the slot its target is overwritten in
    /// place, keeping the original ID.
    pub fn set(
        &self,
        month: Month,
        category: Category,
        target: Money,
    ) -> SpendlogResult<SetGoalOutcome> {
        target
            .validate_amount()
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;

        let (goal, replaced) = match self.store.goals.get_by_slot(month, &category)? {
            Some(mut existing) => {
                existing.target = target;
                existing.touch();
                (existing, true)
            }
            None => (
                Goal::new(self.store.user_id(), month, category, target),
                false,
            ),
        };

        self.store.goals.upsert(goal.clone())?;
        self.store.goals.save()?;

        Ok(SetGoalOutcome { goal, replaced })
    }

    /// Get a goal by ID
    pub fn get(&self, id: GoalId) -> SpendlogResult<Goal> {
        self.store
            .goals
            .get(id)?
            .ok_or_else(|| SpendlogError::goal_not_found(id.to_string()))
    }

    /// Get the goal occupying a (month, category) slot, if any
    pub fn get_by_slot(&self, month: Month, category: &Category) -> SpendlogResult<Option<Goal>> {
        self.store.goals.get_by_slot(month, category)
    }

    /// List all goals, sorted by month then category
    pub fn list(&self) -> SpendlogResult<Vec<Goal>> {
        self.store.goals.get_all()
    }

    /// List goals for one month, sorted by category
    pub fn list_for_month(&self, month: Month) -> SpendlogResult<Vec<Goal>> {
        self.store.goals.get_by_month(month)
    }

    /// Update fields on an existing goal
    ///
    /// Moving a goal to a slot already held by a different goal fails with
    /// `Duplicate` rather than silently replacing it.
    pub fn update(&self, id: GoalId, update: GoalUpdate) -> SpendlogResult<Goal> {
        let mut goal = self.get(id)?;

        if let Some(month) = update.month {
            goal.month = month;
        }
        if let Some(category) = update.category {
            goal.category = category;
        }
        if let Some(target) = update.target {
            goal.target = target;
        }

        goal.validate()
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;

        if let Some(occupant) = self.store.goals.get_by_slot(goal.month, &goal.category)? {
            if occupant.id != goal.id {
                return Err(SpendlogError::goal_exists(format!(
                    "{} / {}",
                    goal.month, goal.category
                )));
            }
        }

        goal.touch();
        self.store.goals.upsert(goal.clone())?;
        self.store.goals.save()?;

        Ok(goal)
    }

    /// Delete a goal
    pub fn delete(&self, id: GoalId) -> SpendlogResult<()> {
        if !self.store.goals.delete(id)? {
            return Err(SpendlogError::goal_not_found(id.to_string()));
        }
        self.store.goals.save()
    }

    /// Count goals
    pub fn count(&self) -> SpendlogResult<usize> {
        self.store.goals.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendlogPaths;
    use crate::models::UserId;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, UserStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let store = storage.open_user(UserId::new()).unwrap();
        (temp_dir, store)
    }

    fn month(y: i32, m: u32) -> Month {
        Month::new(y, m).unwrap()
    }

    fn cat(name: &str) -> Category {
        Category::parse(name).unwrap()
    }

    #[test]
    fn test_set_creates_then_replaces() {
        let (_temp_dir, store) = create_test_store();
        let service = GoalService::new(&store);

        let first = service
            .set(month(2025, 1), cat("Groceries"), Money::from_cents(40000))
            .unwrap();
        assert!(!first.replaced);

        let second = service
            .set(month(2025, 1), cat("Groceries"), Money::from_cents(45000))
            .unwrap();
        assert!(second.replaced);
        assert_eq!(second.goal.id, first.goal.id);
        assert_eq!(second.goal.target.cents(), 45000);
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_set_rejects_invalid_target() {
        let (_temp_dir, store) = create_test_store();
        let service = GoalService::new(&store);

        let result = service.set(month(2025, 1), cat("Groceries"), Money::from_cents(-1));
        assert!(matches!(result, Err(SpendlogError::Validation(_))));
    }

    #[test]
    fn test_update_target() {
        let (_temp_dir, store) = create_test_store();
        let service = GoalService::new(&store);

        let outcome = service
            .set(month(2025, 1), cat("Groceries"), Money::from_cents(40000))
            .unwrap();

        let updated = service
            .update(
                outcome.goal.id,
                GoalUpdate {
                    target: Some(Money::from_cents(50000)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.target.cents(), 50000);
        assert_eq!(updated.month, month(2025, 1));
    }

    #[test]
    fn test_update_refuses_occupied_slot() {
        let (_temp_dir, store) = create_test_store();
        let service = GoalService::new(&store);

        service
            .set(month(2025, 1), cat("Groceries"), Money::from_cents(40000))
            .unwrap();
        let dining = service
            .set(month(2025, 1), cat("Dining"), Money::from_cents(20000))
            .unwrap();

        let result = service.update(
            dining.goal.id,
            GoalUpdate {
                category: Some(cat("Groceries")),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(SpendlogError::Duplicate { .. })));
    }

    #[test]
    fn test_update_can_move_to_free_slot() {
        let (_temp_dir, store) = create_test_store();
        let service = GoalService::new(&store);

        let outcome = service
            .set(month(2025, 1), cat("Groceries"), Money::from_cents(40000))
            .unwrap();

        let moved = service
            .update(
                outcome.goal.id,
                GoalUpdate {
                    month: Some(month(2025, 2)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(moved.month, month(2025, 2));
        assert!(service
            .get_by_slot(month(2025, 1), &cat("Groceries"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_list_for_month() {
        let (_temp_dir, store) = create_test_store();
        let service = GoalService::new(&store);

        service
            .set(month(2025, 1), cat("Rent"), Money::from_cents(100000))
            .unwrap();
        service
            .set(month(2025, 1), cat("Dining"), Money::from_cents(20000))
            .unwrap();
        service
            .set(month(2025, 2), cat("Dining"), Money::from_cents(25000))
            .unwrap();

        let jan = service.list_for_month(month(2025, 1)).unwrap();
        assert_eq!(jan.len(), 2);
        assert_eq!(jan[0].category.as_str(), "Dining");
        assert_eq!(service.list().unwrap().len(), 3);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, store) = create_test_store();
        let service = GoalService::new(&store);

        let outcome = service
            .set(month(2025, 1), cat("Groceries"), Money::from_cents(40000))
            .unwrap();

        service.delete(outcome.goal.id).unwrap();
        assert_eq!(service.count().unwrap(), 0);
        assert!(matches!(
            service.delete(outcome.goal.id),
            Err(SpendlogError::NotFound { .. })
        ));
    }
}
