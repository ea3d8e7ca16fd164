use crate::error::AppError;
use crate::model::Filter;
use crate::storage::Storage;
use crate::store::Store;
use crate::view::View;

/// User input, already decoded from whatever surface produced it.
///
/// Row-targeted events carry the row number the user saw, not a task id; the
/// controller resolves it against the last rendered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Submit(String),
    Toggle(usize),
    Delete(usize),
    SelectFilter(Filter),
    ClearCompleted,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A task was created; the input should be cleared and refocused.
    Added(u64),
    /// Blank text; the input keeps focus and nothing changed.
    Rejected,
    Toggled(u64),
    Deleted(u64),
    Cleared(usize),
    FilterChanged(Filter),
    /// The event pointed at no row.
    Ignored,
    Rendered,
}

/// Owns all state of a session: the store, the transient filter and the
/// view currently on screen.
#[derive(Debug)]
pub struct Controller<S> {
    store: Store<S>,
    filter: Filter,
    view: View,
}

impl<S: Storage> Controller<S> {
    pub fn new(store: Store<S>, filter: Filter) -> Self {
        let view = View::build(store.list(), filter);
        Self {
            store,
            filter,
            view,
        }
    }

    /// Handles one event to completion: mutate, persist, re-render.
    pub fn handle(&mut self, event: Event) -> Result<Outcome, AppError> {
        let outcome = match event {
            Event::Submit(text) => match self.store.add(&text)? {
                Some(id) => Outcome::Added(id),
                None => Outcome::Rejected,
            },
            Event::Toggle(row) => match self.view.task_id_at(row) {
                Some(id) if self.store.toggle(id)? => Outcome::Toggled(id),
                _ => Outcome::Ignored,
            },
            Event::Delete(row) => match self.view.task_id_at(row) {
                Some(id) if self.store.remove(id)? => Outcome::Deleted(id),
                _ => Outcome::Ignored,
            },
            Event::SelectFilter(filter) => {
                self.filter = filter;
                Outcome::FilterChanged(filter)
            }
            Event::ClearCompleted => Outcome::Cleared(self.store.clear_completed()?),
            Event::Refresh => Outcome::Rendered,
        };

        if outcome == Outcome::Ignored {
            tracing::debug!("event did not resolve to a row");
        }
        self.render();
        Ok(outcome)
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    fn render(&mut self) {
        self.view = View::build(self.store.list(), self.filter);
    }
}
