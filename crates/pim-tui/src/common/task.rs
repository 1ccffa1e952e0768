//! Async task lifecycle bookkeeping.
//!
//! Each API call runs as a spawned task. The reducer tracks one active task
//! per kind; a completion whose id no longer matches the active id is stale
//! (a newer task of the same kind superseded it) and is dropped, so the
//! newest refresh always determines the final visible state.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Login,
    Register,
    Refresh,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by the reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub login: TaskState,
    pub register: TaskState,
    pub refresh: TaskState,
    pub create: TaskState,
    pub update: TaskState,
    pub delete: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Login => &self.login,
            TaskKind::Register => &self.register,
            TaskKind::Refresh => &self.refresh,
            TaskKind::Create => &self.create,
            TaskKind::Update => &self.update,
            TaskKind::Delete => &self.delete,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Login => &mut self.login,
            TaskKind::Register => &mut self.register,
            TaskKind::Refresh => &mut self.refresh,
            TaskKind::Create => &mut self.create,
            TaskKind::Update => &mut self.update,
            TaskKind::Delete => &mut self.delete,
        }
    }

    /// Drops every active task id. Completions of tasks spawned before the
    /// clear no longer pass the `finish_if_active` gate, so results from a
    /// previous session cannot reach the next one.
    pub fn clear_all(&mut self) {
        self.login.clear();
        self.register.clear();
        self.refresh.clear();
        self.create.clear();
        self.update.clear();
        self.delete.clear();
    }

    pub fn is_any_running(&self) -> bool {
        self.login.is_running()
            || self.register.is_running()
            || self.refresh.is_running()
            || self.create.is_running()
            || self.update.is_running()
            || self.delete.is_running()
    }
}
