//! View-state behaviour against an in-process fake service.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use todos_client::{ClientError, TodoApi, TodoState};
use todos_shared::{NewTask, Task, TaskId};

#[derive(Default)]
struct Fake {
    tasks: Vec<Task>,
    next_id: u8,
    failing: bool,
    calls: Vec<&'static str>,
}

#[derive(Clone, Default)]
struct FakeApi(Arc<Mutex<Fake>>);

impl FakeApi {
    fn seeded(titles: &[&str]) -> Self {
        let api = Self::default();
        {
            let mut fake = api.0.lock().unwrap();
            for title in titles {
                let id = fake.allocate();
                fake.tasks.push(NewTask::new(*title).with_id(id));
            }
        }
        api
    }

    fn set_failing(&self, failing: bool) {
        self.0.lock().unwrap().failing = failing;
    }

    fn calls(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().calls.clone()
    }

    fn stored(&self) -> Vec<Task> {
        self.0.lock().unwrap().tasks.clone()
    }
}

impl Fake {
    fn allocate(&mut self) -> TaskId {
        self.next_id += 1;
        let mut bytes = [0u8; 12];
        bytes[11] = self.next_id;
        TaskId::from_bytes(bytes)
    }

    fn record(&mut self, call: &'static str) -> Result<(), ClientError> {
        self.calls.push(call);
        if self.failing {
            return Err(ClientError::Status {
                status: 500,
                message: "boom".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TodoApi for FakeApi {
    async fn list(&self) -> Result<Vec<Task>, ClientError> {
        let mut fake = self.0.lock().unwrap();
        fake.record("list")?;
        Ok(fake.tasks.clone())
    }

    async fn create(&self, title: &str) -> Result<Task, ClientError> {
        let mut fake = self.0.lock().unwrap();
        fake.record("create")?;
        let id = fake.allocate();
        let task = NewTask::new(title).with_id(id);
        fake.tasks.push(task.clone());
        Ok(task)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), ClientError> {
        let mut fake = self.0.lock().unwrap();
        fake.record("delete")?;
        let before = fake.tasks.len();
        fake.tasks.retain(|t| t.id != *id);
        if fake.tasks.len() == before {
            return Err(ClientError::Status {
                status: 404,
                message: "Todo not found".into(),
            });
        }
        Ok(())
    }
}

fn titles<A: TodoApi>(state: &TodoState<A>) -> Vec<String> {
    state
        .items()
        .iter()
        .map(|item| item.task.title.clone())
        .collect()
}

#[tokio::test]
async fn load_replaces_local_list() {
    let api = FakeApi::seeded(&["a", "b"]);
    let mut state = TodoState::new(api.clone());

    state.load().await;

    assert_eq!(titles(&state), ["a", "b"]);
}

#[tokio::test]
async fn failed_load_leaves_list_empty() {
    let api = FakeApi::seeded(&["a"]);
    let mut state = TodoState::new(api.clone());
    state.load().await;

    api.set_failing(true);
    state.load().await;

    assert!(state.items().is_empty());
}

#[tokio::test]
async fn submit_appends_server_task_and_clears_input() {
    let api = FakeApi::default();
    let mut state = TodoState::new(api.clone());

    state.set_pending_title("Buy milk");
    state.submit().await;

    assert_eq!(state.pending_title(), "");
    assert_eq!(state.items().len(), 1);
    assert_eq!(state.items()[0].task, api.stored()[0]);
}

#[tokio::test]
async fn submit_with_empty_title_makes_no_call() {
    let api = FakeApi::seeded(&["a"]);
    let mut state = TodoState::new(api.clone());
    state.load().await;

    state.set_pending_title("");
    state.submit().await;
    state.set_pending_title("   ");
    state.submit().await;

    assert_eq!(api.calls(), ["list"]);
    assert_eq!(titles(&state), ["a"]);
}

#[tokio::test]
async fn failed_submit_keeps_state() {
    let api = FakeApi::default();
    let mut state = TodoState::new(api.clone());
    api.set_failing(true);

    state.set_pending_title("Buy milk");
    state.submit().await;

    assert!(state.items().is_empty());
    assert_eq!(state.pending_title(), "Buy milk");
}

#[tokio::test]
async fn double_submit_creates_twice() {
    let api = FakeApi::default();
    let mut state = TodoState::new(api.clone());

    state.set_pending_title("same");
    state.submit().await;
    state.set_pending_title("same");
    state.submit().await;

    assert_eq!(titles(&state), ["same", "same"]);
    assert_ne!(state.items()[0].task.id, state.items()[1].task.id);
}

#[tokio::test]
async fn remove_drops_entry_after_success() {
    let api = FakeApi::seeded(&["a", "b"]);
    let mut state = TodoState::new(api.clone());
    state.load().await;
    let id = state.items()[0].task.id;

    state.remove(&id).await;

    assert_eq!(titles(&state), ["b"]);
}

#[tokio::test]
async fn failed_remove_keeps_entry() {
    let api = FakeApi::seeded(&["a"]);
    let mut state = TodoState::new(api.clone());
    state.load().await;
    let id = state.items()[0].task.id;

    api.set_failing(true);
    state.remove(&id).await;

    assert_eq!(titles(&state), ["a"]);
}

#[tokio::test]
async fn toggle_is_local_only() {
    let api = FakeApi::seeded(&["a"]);
    let mut state = TodoState::new(api.clone());
    state.load().await;
    let id = state.items()[0].task.id;

    assert!(state.toggle(&id));
    assert!(state.items()[0].completed);
    assert_eq!(api.calls(), ["list"]);

    state.load().await;
    assert!(!state.items()[0].completed);
}

#[tokio::test]
async fn toggle_unknown_id_changes_nothing() {
    let mut state = TodoState::new(FakeApi::default());
    assert!(!state.toggle(&TaskId::from_bytes([9; 12])));
}

#[tokio::test]
async fn renders_heading_and_entries() {
    let api = FakeApi::seeded(&["Buy milk"]);
    let mut state = TodoState::new(api.clone());

    assert_eq!(state.to_string(), "Todo List\n  (no tasks)\n");

    state.load().await;
    let id = state.items()[0].task.id;
    state.toggle(&id);

    assert_eq!(
        state.to_string(),
        format!("Todo List\n  [x] Buy milk  ({id})\n")
    );
}

#[tokio::test]
async fn split_submit_matches_submit() {
    let api = FakeApi::default();
    let mut state = TodoState::new(api.clone());

    state.set_pending_title("  ");
    assert_eq!(state.pending_submit(), None);

    state.set_pending_title("Buy milk");
    let title = state.pending_submit().unwrap();
    let result = state.api().create(&title).await;
    state.apply_created(result);

    assert_eq!(state.pending_title(), "");
    assert_eq!(state.items()[0].task, api.stored()[0]);
}

#[tokio::test]
async fn applied_failures_follow_the_same_rules() {
    let api = FakeApi::seeded(&["a"]);
    let mut state = TodoState::new(api.clone());
    let listed = state.api().list().await;
    state.apply_loaded(listed);
    let id = state.items()[0].task.id;

    let boom = || ClientError::Status {
        status: 500,
        message: "boom".into(),
    };
    state.set_pending_title("b");
    state.apply_created(Err(boom()));
    state.apply_removed(&id, Err(boom()));

    assert_eq!(titles(&state), ["a"]);
    assert_eq!(state.pending_title(), "b");

    state.apply_loaded(Err(boom()));
    assert!(state.items().is_empty());
}

#[test]
fn applied_remove_drops_only_that_entry() {
    let mut state = TodoState::new(FakeApi::default());
    let a = NewTask::new("a").with_id(TaskId::from_bytes([1; 12]));
    let b = NewTask::new("b").with_id(TaskId::from_bytes([2; 12]));
    state.apply_loaded(Ok(vec![a.clone(), b]));

    state.apply_removed(&a.id, Ok(()));

    assert_eq!(titles(&state), ["b"]);
}
