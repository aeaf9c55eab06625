use async_trait::async_trait;

use super::domain::Person;
use crate::errors::ServiceError;
use crate::storage::JsonListStore;

/// Repository abstraction for the people list: whole-list load and save.
#[async_trait]
pub trait PeopleRepository: Send + Sync {
    async fn load(&self) -> Result<Vec<Person>, ServiceError>;
    async fn save(&self, people: &[Person]) -> Result<(), ServiceError>;

    /// Append one record, returning the new list length.
    async fn append(&self, person: Person) -> Result<usize, ServiceError> {
        let mut people = self.load().await?;
        people.push(person);
        self.save(&people).await?;
        Ok(people.len())
    }
}

/// JSON file-backed repository.
pub type JsonFilePeopleRepository = JsonListStore<Person>;

#[async_trait]
impl PeopleRepository for JsonListStore<Person> {
    async fn load(&self) -> Result<Vec<Person>, ServiceError> {
        JsonListStore::load(self).await
    }

    async fn save(&self, people: &[Person]) -> Result<(), ServiceError> {
        JsonListStore::save(self, people).await
    }

    async fn append(&self, person: Person) -> Result<usize, ServiceError> {
        self.update(|people| {
            people.push(person);
            people.len()
        })
        .await
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockPeopleRepository {
        people: Mutex<Vec<Person>>,
        fail_load: bool,
    }

    impl MockPeopleRepository {
        /// A repository whose `load` always fails with a parse error.
        pub fn corrupt() -> Self {
            Self { people: Mutex::new(Vec::new()), fail_load: true }
        }

        pub fn snapshot(&self) -> Vec<Person> {
            self.people.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PeopleRepository for MockPeopleRepository {
        async fn load(&self) -> Result<Vec<Person>, ServiceError> {
            if self.fail_load {
                return Err(ServiceError::Parse("mock corrupt store".into()));
            }
            Ok(self.people.lock().unwrap().clone())
        }

        async fn save(&self, people: &[Person]) -> Result<(), ServiceError> {
            *self.people.lock().unwrap() = people.to_vec();
            Ok(())
        }
    }
}
