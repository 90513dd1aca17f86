use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Error: std::error::Error + Clone + Send + Sync + 'static;

    /// Construct the full Entity from the ID and creation params
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> { Ok(()) }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Errors surfaced by the generic actor layer.
///
/// `Entity` wraps whatever the entity's own hooks rejected with; the other
/// variants belong to the framework itself.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E: std::error::Error + 'static> {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Entity(E),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id, T::Error>,
    },
    /// Returns the entity stored under `id`, creating it from `params` first if absent.
    Ensure {
        id: T::Id,
        params: T::CreateParams,
        respond_to: Response<T, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    /// Applies every action in order against staged copies and commits them
    /// only if all succeed. Results come back in input order.
    Transact {
        actions: Vec<(T::Id, T::Action)>,
        respond_to: Response<Vec<T::ActionResult>, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    pub async fn run(mut self) {
        debug!(entity = std::any::type_name::<T>(), "Resource actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.create(params));
                }
                ResourceRequest::Ensure { id, params, respond_to } => {
                    let _ = respond_to.send(self.ensure(id, params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.list()));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.delete(id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => item.handle_action(action).map_err(FrameworkError::Entity),
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Transact { actions, respond_to } => {
                    let _ = respond_to.send(self.transact(actions));
                }
            }
        }
        debug!(entity = std::any::type_name::<T>(), "Resource actor stopped");
    }

    /// Snapshot of every stored entity, ordered by id.
    fn list(&self) -> Vec<T> {
        let mut entries: Vec<(&T::Id, &T)> = self.store.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, item)| item.clone()).collect()
    }

    fn create(&mut self, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Entity)?;
        item.on_create().map_err(FrameworkError::Entity)?;
        self.store.insert(id.clone(), item);
        Ok(id)
    }

    fn ensure(&mut self, id: T::Id, params: T::CreateParams) -> Result<T, FrameworkError<T::Error>> {
        match self.store.entry(id) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let mut item = T::from_create_params(entry.key().clone(), params)
                    .map_err(FrameworkError::Entity)?;
                item.on_create().map_err(FrameworkError::Entity)?;
                Ok(entry.insert(item).clone())
            }
        }
    }

    fn update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        let item = self
            .store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        // Patch a copy so a rejected update leaves the stored entity untouched.
        let mut patched = item.clone();
        patched.on_update(patch).map_err(FrameworkError::Entity)?;
        *item = patched;
        Ok(item.clone())
    }

    fn delete(&mut self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        let item = self
            .store
            .get(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete().map_err(FrameworkError::Entity)?;
        self.store.remove(&id);
        Ok(())
    }

    fn transact(
        &mut self,
        actions: Vec<(T::Id, T::Action)>,
    ) -> Result<Vec<T::ActionResult>, FrameworkError<T::Error>> {
        let mut staged: HashMap<T::Id, T> = HashMap::new();
        let mut results = Vec::with_capacity(actions.len());

        for (id, action) in actions {
            let item = match staged.entry(id) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let current = self
                        .store
                        .get(entry.key())
                        .cloned()
                        .ok_or_else(|| FrameworkError::NotFound(entry.key().to_string()))?;
                    entry.insert(current)
                }
            };
            results.push(item.handle_action(action).map_err(FrameworkError::Entity)?);
        }

        self.store.extend(staged);
        Ok(results)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn ensure(&self, id: T::Id, params: T::CreateParams) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Ensure { id, params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }

    pub async fn transact(&self, actions: Vec<(T::Id, T::Action)>) -> Result<Vec<T::ActionResult>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Transact { actions, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        label: String,
        value: u32,
    }

    #[derive(Debug)]
    struct CounterCreate {
        label: String,
        value: u32,
    }

    #[derive(Debug)]
    enum CounterAction {
        Take(u32),
        Put(u32),
    }

    #[derive(Debug, Clone, Error, PartialEq)]
    enum CounterError {
        #[error("{label} has only {value}")]
        Exhausted { label: String, value: u32 },
        #[error("label must not be empty")]
        EmptyLabel,
    }

    impl Entity for Counter {
        type Id = u64;
        type CreateParams = CounterCreate;
        type Patch = String;
        type Action = CounterAction;
        type ActionResult = u32;
        type Error = CounterError;

        fn from_create_params(_id: u64, params: CounterCreate) -> Result<Self, CounterError> {
            Ok(Self { label: params.label, value: params.value })
        }

        fn on_update(&mut self, label: String) -> Result<(), CounterError> {
            if label.is_empty() {
                return Err(CounterError::EmptyLabel);
            }
            self.label = label;
            Ok(())
        }

        fn handle_action(&mut self, action: CounterAction) -> Result<u32, CounterError> {
            match action {
                CounterAction::Take(n) if n > self.value => Err(CounterError::Exhausted {
                    label: self.label.clone(),
                    value: self.value,
                }),
                CounterAction::Take(n) => {
                    self.value -= n;
                    Ok(self.value)
                }
                CounterAction::Put(n) => {
                    self.value += n;
                    Ok(self.value)
                }
            }
        }
    }

    fn spawn_counters() -> ResourceClient<Counter> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || counter.fetch_add(1, Ordering::SeqCst);
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    async fn create(client: &ResourceClient<Counter>, label: &str, value: u32) -> u64 {
        client
            .create(CounterCreate { label: label.into(), value })
            .await
            .unwrap()
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = spawn_counters();
        let id = create(&client, "apples", 3).await;

        let left = client.perform_action(id, CounterAction::Take(2)).await.unwrap();
        assert_eq!(left, 1);

        let err = client.perform_action(id, CounterAction::Take(2)).await.unwrap_err();
        assert_eq!(err, FrameworkError::Entity(CounterError::Exhausted { label: "apples".into(), value: 1 }));

        let missing = client.perform_action(99, CounterAction::Put(1)).await.unwrap_err();
        assert_eq!(missing, FrameworkError::NotFound("99".into()));
    }

    #[tokio::test]
    async fn test_transact_commits_all_or_nothing() {
        let client = spawn_counters();
        let a = create(&client, "a", 5).await;
        let b = create(&client, "b", 1).await;

        let err = client
            .transact(vec![(a, CounterAction::Take(4)), (b, CounterAction::Take(2))])
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::Entity(CounterError::Exhausted { .. })));
        assert_eq!(client.get(a).await.unwrap().unwrap().value, 5);
        assert_eq!(client.get(b).await.unwrap().unwrap().value, 1);

        let results = client
            .transact(vec![(a, CounterAction::Take(4)), (b, CounterAction::Take(1))])
            .await
            .unwrap();
        assert_eq!(results, vec![1, 0]);
        assert_eq!(client.get(a).await.unwrap().unwrap().value, 1);
    }

    #[tokio::test]
    async fn test_transact_sees_earlier_actions_on_same_id() {
        let client = spawn_counters();
        let a = create(&client, "a", 3).await;

        let err = client
            .transact(vec![(a, CounterAction::Take(2)), (a, CounterAction::Take(2))])
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::Entity(_)));
        assert_eq!(client.get(a).await.unwrap().unwrap().value, 3);
    }

    #[tokio::test]
    async fn test_transact_unknown_id_rolls_back() {
        let client = spawn_counters();
        let a = create(&client, "a", 3).await;

        let err = client
            .transact(vec![(a, CounterAction::Take(1)), (42, CounterAction::Take(1))])
            .await
            .unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("42".into()));
        assert_eq!(client.get(a).await.unwrap().unwrap().value, 3);
    }

    #[tokio::test]
    async fn test_rejected_update_keeps_entity() {
        let client = spawn_counters();
        let a = create(&client, "a", 3).await;

        let err = client.update(a, String::new()).await.unwrap_err();
        assert_eq!(err, FrameworkError::Entity(CounterError::EmptyLabel));
        assert_eq!(client.get(a).await.unwrap().unwrap().label, "a");

        let renamed = client.update(a, "b".into()).await.unwrap();
        assert_eq!(renamed.label, "b");
    }

    #[tokio::test]
    async fn test_ensure_creates_once_and_list_is_ordered() {
        let client = spawn_counters();
        let first = client.ensure(7, CounterCreate { label: "seven".into(), value: 1 }).await.unwrap();
        let second = client.ensure(7, CounterCreate { label: "other".into(), value: 9 }).await.unwrap();
        assert_eq!(first, second);

        create(&client, "one", 0).await;
        let labels: Vec<String> = client.list().await.unwrap().into_iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["one".to_string(), "seven".to_string()]);

        client.delete(7).await.unwrap();
        assert!(client.get(7).await.unwrap().is_none());
    }
}
