//! In-process test doubles for the HTTP adapter.
//!
//! [`TestHarness`] wires the handlers to in-memory repositories backed by
//! shared vectors, so tests can seed rows and inspect audit output without a
//! database.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::web;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{
    BinnacleRepository, BinnacleRepositoryError, CategoryRepository, CategoryRepositoryError,
    RecordRepository, RecordRepositoryError, ScreenshotStore, ScreenshotStoreError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    BinnacleActor, BinnacleEntry, BinnacleEntryWithUser, Category, NewBinnacleEntry, NewCategory,
    NewRecord, Record, RecordCategory, RecordUser, RecordWithRelations, User,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

type Shared<T> = Arc<Mutex<Vec<T>>>;

/// Cookie-session middleware with an ephemeral key for tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .build()
}

/// Shared in-memory backing stores plus the wired [`HttpState`].
pub struct TestHarness {
    state: web::Data<HttpState>,
    users: Shared<User>,
    categories: Shared<Category>,
    binnacle: Shared<BinnacleEntry>,
    screenshots: Arc<RecordingScreenshotStore>,
}

impl TestHarness {
    /// Harness with working repositories.
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Harness whose binnacle repository refuses every append.
    pub fn with_failing_binnacle() -> Self {
        Self::build(true)
    }

    fn build(fail_binnacle: bool) -> Self {
        let users: Shared<User> = Arc::default();
        let categories: Shared<Category> = Arc::default();
        let records: Shared<Record> = Arc::default();
        let binnacle: Shared<BinnacleEntry> = Arc::default();
        let screenshots = Arc::new(RecordingScreenshotStore::default());

        let state = HttpState::new(HttpStatePorts {
            categories: Arc::new(InMemoryCategories {
                rows: Arc::clone(&categories),
            }),
            records: Arc::new(InMemoryRecords {
                rows: records,
                users: Arc::clone(&users),
                categories: Arc::clone(&categories),
            }),
            users: Arc::new(InMemoryUsers {
                rows: Arc::clone(&users),
            }),
            binnacle: Arc::new(InMemoryBinnacle {
                rows: Arc::clone(&binnacle),
                users: Arc::clone(&users),
                fail: fail_binnacle,
            }),
            screenshots: screenshots.clone() as Arc<dyn ScreenshotStore>,
        });

        Self {
            state: web::Data::new(state),
            users,
            categories,
            binnacle,
            screenshots,
        }
    }

    /// Application state for `App::app_data`.
    pub fn state(&self) -> web::Data<HttpState> {
        self.state.clone()
    }

    /// Snapshot of every appended audit entry.
    pub fn binnacle_entries(&self) -> Vec<BinnacleEntry> {
        self.binnacle.lock().expect("binnacle lock").clone()
    }

    /// Extension and byte length of every stored screenshot, in order.
    pub fn stored_screenshots(&self) -> Vec<(String, usize)> {
        self.screenshots.stored.lock().expect("screenshot lock").clone()
    }

    /// Insert a user row directly and return its id.
    pub fn seed_user(&self, name: &str, email: &str) -> Uuid {
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            email: email.to_owned(),
        };
        let id = user.id;
        self.users.lock().expect("user lock").push(user);
        id
    }

    /// Insert a category row directly and return its id.
    pub fn seed_category(&self, name: &str, description: &str) -> Uuid {
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            description: description.to_owned(),
        };
        let id = category.id;
        self.categories.lock().expect("category lock").push(category);
        id
    }
}

struct InMemoryCategories {
    rows: Shared<Category>,
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        Ok(self.rows.lock().expect("lock").clone())
    }

    async fn create(&self, category: NewCategory) -> Result<Category, CategoryRepositoryError> {
        let row = Category {
            id: Uuid::new_v4(),
            name: category.name,
            description: category.description,
        };
        self.rows.lock().expect("lock").push(row.clone());
        Ok(row)
    }

    async fn update_name(&self, id: Uuid, name: &str) -> Result<Category, CategoryRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(CategoryRepositoryError::NotFound)?;
        row.name = name.to_owned();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), CategoryRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(CategoryRepositoryError::NotFound);
        }
        Ok(())
    }

    async fn names_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, String)>, CategoryRepositoryError> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .filter(|row| ids.contains(&row.id))
            .map(|row| (row.id, row.name.clone()))
            .collect())
    }
}

struct InMemoryRecords {
    rows: Shared<Record>,
    users: Shared<User>,
    categories: Shared<Category>,
}

impl InMemoryRecords {
    fn with_relations(&self, record: Record) -> RecordWithRelations {
        let user = self
            .users
            .lock()
            .expect("lock")
            .iter()
            .find(|user| user.id == record.user_id)
            .map(|user| RecordUser {
                name: user.name.clone(),
                email: user.email.clone(),
            });
        let category = self
            .categories
            .lock()
            .expect("lock")
            .iter()
            .find(|category| category.id == record.category_id)
            .map(|category| RecordCategory {
                name: category.name.clone(),
            });
        RecordWithRelations {
            record,
            user,
            category,
        }
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecords {
    async fn list(&self) -> Result<Vec<RecordWithRelations>, RecordRepositoryError> {
        let rows = self.rows.lock().expect("lock").clone();
        Ok(rows
            .into_iter()
            .map(|record| self.with_relations(record))
            .collect())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<RecordWithRelations>, RecordRepositoryError> {
        let row = self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .find(|row| row.id == id)
            .cloned();
        Ok(row.map(|record| self.with_relations(record)))
    }

    async fn create(&self, record: NewRecord) -> Result<Record, RecordRepositoryError> {
        let row = Record {
            id: Uuid::new_v4(),
            user_id: record.user_id,
            category_id: record.category_id,
            date_record: record.date_record,
            comments: record.comments,
            image: record.image,
            code: record.code,
            created_at: Utc::now(),
        };
        self.rows.lock().expect("lock").push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, record: NewRecord) -> Result<Record, RecordRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(RecordRepositoryError::NotFound)?;
        row.user_id = record.user_id;
        row.category_id = record.category_id;
        row.date_record = record.date_record;
        row.comments = record.comments;
        row.image = record.image;
        row.code = record.code;
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RecordRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(RecordRepositoryError::NotFound);
        }
        Ok(())
    }

    async fn count_by_category(&self) -> Result<Vec<(Uuid, i64)>, RecordRepositoryError> {
        let mut counts: Vec<(Uuid, i64)> = Vec::new();
        for row in self.rows.lock().expect("lock").iter() {
            match counts.iter_mut().find(|(id, _)| *id == row.category_id) {
                Some((_, count)) => *count += 1,
                None => counts.push((row.category_id, 1)),
            }
        }
        Ok(counts)
    }
}

struct InMemoryUsers {
    rows: Shared<User>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.rows.lock().expect("lock").clone())
    }

    async fn delete(&self, id: Uuid) -> Result<User, UserRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        let position = rows
            .iter()
            .position(|row| row.id == id)
            .ok_or_else(|| UserRepositoryError::query("no row deleted"))?;
        Ok(rows.remove(position))
    }
}

struct InMemoryBinnacle {
    rows: Shared<BinnacleEntry>,
    users: Shared<User>,
    fail: bool,
}

#[async_trait]
impl BinnacleRepository for InMemoryBinnacle {
    async fn append(
        &self,
        entry: NewBinnacleEntry,
    ) -> Result<BinnacleEntry, BinnacleRepositoryError> {
        if self.fail {
            return Err(BinnacleRepositoryError::query("append refused"));
        }
        let row = BinnacleEntry {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            action: entry.action,
            details: entry.details,
            created_at: Utc::now(),
        };
        self.rows.lock().expect("lock").push(row.clone());
        Ok(row)
    }

    async fn list_with_user(&self) -> Result<Vec<BinnacleEntryWithUser>, BinnacleRepositoryError> {
        let users = self.users.lock().expect("lock").clone();
        let mut rows = self.rows.lock().expect("lock").clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows
            .into_iter()
            .map(|entry| {
                let user = entry.user_id.and_then(|id| {
                    users.iter().find(|user| user.id == id).map(|user| BinnacleActor {
                        name: user.name.clone(),
                        email: user.email.clone(),
                    })
                });
                BinnacleEntryWithUser { entry, user }
            })
            .collect())
    }
}

#[derive(Default)]
struct RecordingScreenshotStore {
    stored: Mutex<Vec<(String, usize)>>,
    counter: AtomicU64,
}

#[async_trait]
impl ScreenshotStore for RecordingScreenshotStore {
    async fn store(&self, extension: &str, bytes: &[u8]) -> Result<String, ScreenshotStoreError> {
        self.stored
            .lock()
            .expect("lock")
            .push((extension.to_owned(), bytes.len()));
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        Ok(format!("/screenshots/{n}.{extension}"))
    }
}
