//! Board state (task board and issue tracker).
//!
//! The item set is fixed when the board is built; only `status` changes.
//! The detail-view selection is kept beside the collection as an id and is
//! never part of an item.

pub mod model;

use model::{demo_issues, demo_tasks, BoardItem, BoardStatus, Issue, Task};
use tracing::debug;

/// Task board with its demo cards.
pub type TaskBoard = BoardState<Task>;

/// Issue tracker with its demo issues.
pub type IssueBoard = BoardState<Issue>;

/// One display column: a status and its items in board order.
#[derive(Debug)]
pub struct Column<'a, T: BoardItem> {
    pub status: T::Status,
    pub items: Vec<&'a T>,
}

#[derive(Debug, Clone)]
pub struct BoardState<T: BoardItem> {
    items: Vec<T>,
    selected: Option<String>,
}

impl<T: BoardItem> BoardState<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            selected: None,
        }
    }

    /// Change one item's status, leaving every other field and item as is.
    ///
    /// Returns `false` when no item has this id; that is a no-op.
    pub fn set_status(&mut self, item_id: &str, status: T::Status) -> bool {
        match self.items.iter_mut().find(|item| item.id() == item_id) {
            Some(item) => {
                debug!(item = %item_id, from = ?item.status(), to = ?status, "Board item moved");
                item.set_status(status);
                true
            }
            None => {
                debug!(item = %item_id, "set_status ignored: unknown item");
                false
            }
        }
    }

    /// Set or clear the detail-view selection.
    ///
    /// Selecting an unknown id is a no-op returning `false`; clearing always
    /// succeeds.
    pub fn select(&mut self, item_id: Option<&str>) -> bool {
        match item_id {
            None => {
                self.selected = None;
                true
            }
            Some(id) if self.get(id).is_some() => {
                self.selected = Some(id.to_string());
                true
            }
            Some(id) => {
                debug!(item = %id, "select ignored: unknown item");
                false
            }
        }
    }

    /// The selected item, as it currently is on the board.
    pub fn selected(&self) -> Option<&T> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn get(&self, item_id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == item_id)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Partition items into the three status columns, in pipeline order.
    /// Items keep their board order inside each column.
    pub fn columns(&self) -> [Column<'_, T>; 3] {
        T::Status::ALL.map(|status| Column {
            status,
            items: self
                .items
                .iter()
                .filter(|item| item.status() == status)
                .collect(),
        })
    }
}

impl BoardState<Task> {
    /// The task board seeded with its demo cards.
    pub fn demo() -> Self {
        Self::new(demo_tasks())
    }
}

impl BoardState<Issue> {
    /// The issue tracker seeded with its demo issues.
    pub fn demo() -> Self {
        Self::new(demo_issues())
    }
}
