// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Async CRUD, driven by tokio and by a plain executor.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering}
};

use tuple_derive::{
    AsyncTransport, Error, IteratorType, MemoryError, MemoryStore, Row, Space, Tuple, UpdateOp,
    Value, async_trait
};

#[derive(Debug, Clone, PartialEq, Tuple)]
#[tuple(
    space = "tasks",
    index(name = "primary", primary),
    index(name = "by_owner_title", unique)
)]
struct Task {
    #[index(name = "primary")]
    id: u64,

    #[field(position = 2)]
    #[index(name = "by_owner_title", part = 1)]
    owner: String,

    #[field(position = 3)]
    #[index(name = "by_owner_title", part = 2)]
    title: String,

    #[field(position = 4)]
    done: bool
}

impl Task {
    fn new(id: u64, owner: &str, title: &str) -> Self {
        Self {
            id,
            owner: owner.to_owned(),
            title: title.to_owned(),
            done: false
        }
    }
}

fn tasks(store: Arc<MemoryStore>) -> Space<Task, Arc<MemoryStore>> {
    store.register::<Task>().unwrap();
    Space::new(store).unwrap()
}

#[tokio::test]
async fn round_trip_over_arc_client() {
    let tasks = tasks(Arc::new(MemoryStore::new()));
    let task = Task::new(1, "ada", "write notes");

    assert_eq!(tasks.insert(&task).run_async().await.unwrap(), Some(task.clone()));
    assert_eq!(
        tasks.get_by_owner_title("ada".into(), "write notes".into())
            .run_async()
            .await
            .unwrap(),
        Some(task.clone())
    );

    let finished = Task {
        done: true,
        ..task.clone()
    };
    assert_eq!(tasks.update(&finished).run_async().await.unwrap(), Some(finished.clone()));
    assert_eq!(tasks.delete(&finished).run_async().await.unwrap(), Some(finished));
    assert_eq!(tasks.get_by_primary(1).run_async().await.unwrap(), None);
}

#[tokio::test]
async fn upsert_then_select() {
    let tasks = tasks(Arc::new(MemoryStore::new()));
    let default = Task::new(2, "bob", "plan");
    let updated = Task {
        done: true,
        ..default.clone()
    };

    assert_eq!(tasks.upsert(&default, &updated).run_async().await.unwrap(), None);
    assert_eq!(
        tasks.get_by_primary(2).run_async().await.unwrap(),
        Some(default.clone())
    );

    assert_eq!(tasks.upsert(&default, &updated).run_async().await.unwrap(), None);
    assert_eq!(tasks.get_by_primary(2).run_async().await.unwrap(), Some(updated));
}

#[test]
fn prefix_select_on_plain_executor() {
    let tasks = tasks(Arc::new(MemoryStore::new()));
    futures::executor::block_on(async {
        for (id, owner, title) in [(1, "ada", "b"), (2, "bob", "a"), (3, "ada", "a")] {
            tasks.insert(&Task::new(id, owner, title)).run_async().await.unwrap();
        }

        let ada = tasks
            .select("by_owner_title", vec![Value::from("ada")])
            .run_async()
            .await
            .unwrap();
        let ids: Vec<_> = ada.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![3, 1]);

        let reversed = tasks
            .select("by_owner_title", vec![])
            .iterator(IteratorType::Req)
            .run_async()
            .await
            .unwrap();
        let ids: Vec<_> = reversed.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    });
}

#[test]
fn unique_secondary_rejects_duplicates() {
    let tasks = tasks(Arc::new(MemoryStore::new()));
    futures::executor::block_on(async {
        tasks.insert(&Task::new(1, "ada", "same")).run_async().await.unwrap();
        let err = tasks
            .insert(&Task::new(2, "ada", "same"))
            .run_async()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Transport(MemoryError::DuplicateKey { ref index, .. }) if index == "by_owner_title"
        ));
    });
}

/// Client that fails every call and counts attempts.
#[derive(Default)]
struct Offline {
    calls: AtomicUsize
}

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("store unreachable")]
struct Unreachable;

impl Offline {
    fn fail(&self) -> Result<Vec<Row>, Unreachable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Unreachable)
    }
}

#[async_trait]
impl AsyncTransport for Offline {
    type Error = Unreachable;

    async fn insert(&self, _: &str, _: Row) -> Result<Vec<Row>, Unreachable> {
        self.fail()
    }

    async fn replace(&self, _: &str, _: Row) -> Result<Vec<Row>, Unreachable> {
        self.fail()
    }

    async fn delete(&self, _: &str, _: Row) -> Result<Vec<Row>, Unreachable> {
        self.fail()
    }

    async fn update(&self, _: &str, _: Row, _: Vec<UpdateOp>) -> Result<Vec<Row>, Unreachable> {
        self.fail()
    }

    async fn upsert(
        &self,
        _: &str,
        _: Row,
        _: Row,
        _: Vec<UpdateOp>
    ) -> Result<Vec<Row>, Unreachable> {
        self.fail()
    }

    async fn select(
        &self,
        _: &str,
        _: &str,
        _: Row,
        _: u32,
        _: u32,
        _: IteratorType
    ) -> Result<Vec<Row>, Unreachable> {
        self.fail()
    }
}

#[tokio::test]
async fn transport_error_is_returned_unchanged() {
    let tasks: Space<Task, Offline> = Space::new(Offline::default()).unwrap();

    let err = tasks.insert(&Task::new(1, "ada", "x")).run_async().await.unwrap_err();
    assert_eq!(err.into_transport(), Some(Unreachable));

    let err = tasks.select("by_nothing", vec![]).run_async().await.unwrap_err();
    assert!(matches!(err, Error::UnknownIndex(_)));
    assert_eq!(tasks.client().calls.load(Ordering::SeqCst), 1);
}
