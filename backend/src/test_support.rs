//! In-memory repositories shared by unit tests (in `src/`) and integration
//! tests (in `tests/`).
//!
//! Both keep their rows behind a `Mutex` and count every port call so tests
//! can assert that a rejected request never reached storage.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::ports::{
    CityPersistenceError, CityRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{City, CityId, NewCity, User, Username};

/// User repository backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
    calls: AtomicUsize,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of port calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored user with the given name.
    pub fn get(&self, username: &str) -> Option<User> {
        self.lock().get(username).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, User>> {
        self.users
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.lock();
        let key = user.username().as_ref().to_owned();
        if users.contains_key(&key) {
            return Err(UserPersistenceError::conflict(key));
        }
        users.insert(key, user.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.get(username.as_ref()))
    }
}

/// City repository backed by a `Vec` with sequential ids.
#[derive(Default)]
pub struct InMemoryCityRepository {
    rows: Mutex<Vec<City>>,
    calls: AtomicUsize,
}

impl InMemoryCityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of port calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored rows.
    pub fn rows(&self) -> Vec<City> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<City>> {
        self.rows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl CityRepository for InMemoryCityRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<City>, CityPersistenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.lock().iter().find(|city| city.name == name).cloned())
    }

    async fn insert(&self, city: &NewCity) -> Result<CityId, CityPersistenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.lock();
        let id = CityId::try_from(rows.len() + 1)
            .map_err(|err| CityPersistenceError::query(format!("id space exhausted: {err}")))?;
        rows.push(city.clone().with_id(id));
        Ok(id)
    }

    async fn update_population(
        &self,
        id: CityId,
        population: i32,
    ) -> Result<u64, CityPersistenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut affected = 0;
        for city in self.lock().iter_mut().filter(|city| city.id == id) {
            city.population = population;
            affected += 1;
        }
        Ok(affected)
    }
}
