use std::collections::BTreeSet;

use crate::{ApiClient, Resource, StoreError, item_path};

/// Monotonic tag for one in-flight operation. Completions carry the id back
/// so a stale failure cannot clobber the error slot of a newer call.
pub type RequestId = u64;

/// Client-side state for one REST collection: the fetched list, an optional
/// selection, a single flattened error message and a loading flag derived
/// from the set of outstanding requests.
///
/// Each operation is split in two: the async half talks to the backend, the
/// `apply_*` reducers perform the state transition. The reducers are public
/// so the transitions stay testable without a network. For list data, last
/// completion wins, same as the original UI.
#[derive(Debug)]
pub struct ResourceStore<T: Resource> {
    client: ApiClient,
    user_id: i64,
    items: Vec<T>,
    selected: Option<T>,
    error: Option<(RequestId, String)>,
    next_request: RequestId,
    pending: BTreeSet<RequestId>,
}

impl<T: Resource> ResourceStore<T> {
    pub fn new(client: ApiClient, user_id: i64) -> Self {
        Self {
            client,
            user_id,
            items: Vec::new(),
            selected: None,
            error: None,
            next_request: 0,
            pending: BTreeSet::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    pub fn loading(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(|(_, message)| message.as_str())
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Record a local validation failure in the banner slot without touching
    /// the network.
    pub fn reject(&mut self, message: impl Into<String>) {
        let request = self.begin();
        self.apply_failure(request, StoreError::Validation(message.into()));
    }

    /// Allocate a request id and mark it outstanding.
    pub fn begin(&mut self) -> RequestId {
        let request = self.next_request;
        self.next_request += 1;
        self.pending.insert(request);
        request
    }

    pub async fn fetch_all(&mut self) {
        let request = self.begin();
        let result = self
            .client
            .get_json::<Vec<T>>(&T::list_path(self.user_id))
            .await;
        self.apply_fetch_all(request, result);
    }

    pub async fn fetch_by_id(&mut self, id: i64) {
        let request = self.begin();
        let result = self.client.get_json::<T>(&item_path::<T>(id)).await;
        self.apply_fetch_by_id(request, result);
    }

    /// POST the payload, then refresh the whole list on success.
    pub async fn create(&mut self, payload: &T::Payload) {
        let request = self.begin();
        let created = self
            .client
            .post_json::<T, _>(&T::create_path(self.user_id), payload)
            .await;

        match created {
            Ok(item) => {
                tracing::debug!(collection = T::COLLECTION, id = item.id(), "created");
                let list = self
                    .client
                    .get_json::<Vec<T>>(&T::list_path(self.user_id))
                    .await;
                self.apply_fetch_all(request, list);
            }
            Err(err) => self.apply_failure(request, err),
        }
    }

    pub async fn update(&mut self, id: i64, payload: &T::Payload) {
        let request = self.begin();
        let result = self
            .client
            .put_json::<T, _>(&item_path::<T>(id), payload)
            .await;
        self.apply_update(request, id, result);
    }

    pub async fn delete(&mut self, id: i64) {
        let request = self.begin();
        let result = self.client.delete(&item_path::<T>(id)).await;
        self.apply_delete(request, id, result);
    }

    pub fn apply_fetch_all(&mut self, request: RequestId, result: Result<Vec<T>, StoreError>) {
        match result {
            Ok(items) => {
                tracing::debug!(
                    collection = T::COLLECTION,
                    count = items.len(),
                    "fetched list"
                );
                self.items = items;
                self.settle(request, Ok(()));
            }
            Err(err) => self.apply_failure(request, err),
        }
    }

    pub fn apply_fetch_by_id(&mut self, request: RequestId, result: Result<T, StoreError>) {
        match result {
            Ok(item) => {
                self.selected = Some(item);
                self.settle(request, Ok(()));
            }
            Err(err) => self.apply_failure(request, err),
        }
    }

    /// Patch the updated item into the list in place; the selection follows
    /// only when it pointed at the updated id.
    pub fn apply_update(&mut self, request: RequestId, id: i64, result: Result<T, StoreError>) {
        match result {
            Ok(item) => {
                for existing in &mut self.items {
                    if existing.id() == id {
                        *existing = item.clone();
                    }
                }
                if self.selected.as_ref().is_some_and(|s| s.id() == id) {
                    self.selected = Some(item);
                }
                self.settle(request, Ok(()));
            }
            Err(err) => self.apply_failure(request, err),
        }
    }

    /// Remove the item from the list; clear the selection only when the
    /// deleted id was selected.
    pub fn apply_delete(&mut self, request: RequestId, id: i64, result: Result<(), StoreError>) {
        match result {
            Ok(()) => {
                self.items.retain(|item| item.id() != id);
                if self.selected.as_ref().is_some_and(|s| s.id() == id) {
                    self.selected = None;
                }
                self.settle(request, Ok(()));
            }
            Err(err) => self.apply_failure(request, err),
        }
    }

    pub fn apply_failure(&mut self, request: RequestId, err: StoreError) {
        tracing::warn!(collection = T::COLLECTION, error = %err, "operation failed");
        self.settle(request, Err(err));
    }

    fn settle(&mut self, request: RequestId, result: Result<(), StoreError>) {
        self.pending.remove(&request);

        match result {
            Ok(()) => {
                // A success does not erase an error reported by an
                // interleaved call; only the user dismisses the banner.
            }
            Err(err) => {
                let newer_exists = self
                    .error
                    .as_ref()
                    .is_some_and(|(reported, _)| *reported > request);
                if !newer_exists {
                    self.error = Some((request, err.to_string()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealboard_types::Ingredient;
    use std::time::Duration;

    fn store() -> ResourceStore<Ingredient> {
        let client = ApiClient::new("http://localhost:8000", Duration::from_secs(5)).unwrap();
        ResourceStore::new(client, 1)
    }

    fn ingredient(id: i64, name: &str) -> Ingredient {
        Ingredient {
            id,
            name: name.to_owned(),
            category: None,
            calories_per_100g: None,
            protein_per_100g: None,
            carbs_per_100g: None,
            fat_per_100g: None,
            fiber_per_100g: None,
            sugar_per_100g: None,
            sodium_per_100g: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn fetch_all_replaces_items_and_clears_loading() {
        let mut store = store();
        let request = store.begin();
        assert!(store.loading());

        store.apply_fetch_all(request, Ok(vec![ingredient(1, "Salt"), ingredient(2, "Egg")]));
        assert!(!store.loading());
        assert_eq!(store.items().len(), 2);
        assert!(store.error().is_none());
    }

    #[test]
    fn delete_clears_selection_only_for_the_deleted_id() {
        let mut store = store();
        let request = store.begin();
        store.apply_fetch_all(request, Ok(vec![ingredient(1, "Salt"), ingredient(2, "Egg")]));

        let request = store.begin();
        store.apply_fetch_by_id(request, Ok(ingredient(1, "Salt")));
        assert_eq!(store.selected().unwrap().id, 1);

        // deleting a non-selected resource leaves the selection untouched
        let request = store.begin();
        store.apply_delete(request, 2, Ok(()));
        assert_eq!(store.selected().unwrap().id, 1);
        assert_eq!(store.items().len(), 1);

        // deleting the selected resource clears it
        let request = store.begin();
        store.apply_delete(request, 1, Ok(()));
        assert!(store.selected().is_none());
        assert!(store.items().is_empty());
    }

    #[test]
    fn update_patches_list_and_selection() {
        let mut store = store();
        let request = store.begin();
        store.apply_fetch_all(request, Ok(vec![ingredient(1, "Salt"), ingredient(2, "Egg")]));
        let request = store.begin();
        store.apply_fetch_by_id(request, Ok(ingredient(2, "Egg")));

        let request = store.begin();
        store.apply_update(request, 2, Ok(ingredient(2, "Free-range egg")));
        assert_eq!(store.items()[1].name, "Free-range egg");
        assert_eq!(store.selected().unwrap().name, "Free-range egg");

        // updating a non-selected item leaves the selection alone
        let request = store.begin();
        store.apply_update(request, 1, Ok(ingredient(1, "Sea salt")));
        assert_eq!(store.items()[0].name, "Sea salt");
        assert_eq!(store.selected().unwrap().id, 2);
    }

    #[test]
    fn stale_failure_does_not_clobber_newer_error() {
        let mut store = store();
        let old = store.begin();
        let new = store.begin();

        store.apply_failure(new, StoreError::Api("newer failure".to_owned()));
        store.apply_failure(old, StoreError::Api("stale failure".to_owned()));

        assert_eq!(store.error(), Some("newer failure"));
        assert!(!store.loading());
    }

    #[test]
    fn error_overwritten_by_newer_failure_and_dismissable() {
        let mut store = store();
        let first = store.begin();
        store.apply_failure(first, StoreError::Api("first".to_owned()));
        assert_eq!(store.error(), Some("first"));

        let second = store.begin();
        store.apply_failure(second, StoreError::Api("second".to_owned()));
        assert_eq!(store.error(), Some("second"));

        store.clear_error();
        assert!(store.error().is_none());
    }

    #[test]
    fn loading_stays_on_while_any_request_is_outstanding() {
        let mut store = store();
        let a = store.begin();
        let b = store.begin();
        assert!(store.loading());

        store.apply_fetch_all(a, Ok(Vec::new()));
        assert!(store.loading());

        store.apply_fetch_all(b, Ok(Vec::new()));
        assert!(!store.loading());
    }
}
