use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{Person, PersonInput};
use super::repository::PeopleRepository;
use crate::errors::ServiceError;

/// People business service independent of web framework
pub struct PeopleService<R: PeopleRepository> {
    repo: Arc<R>,
}

impl<R: PeopleRepository> Clone for PeopleService<R> {
    fn clone(&self) -> Self {
        Self { repo: Arc::clone(&self.repo) }
    }
}

impl<R: PeopleRepository> PeopleService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Append a person to the stored list and return the stored record.
    ///
    /// The list is loaded, extended and written back without any lock; two
    /// concurrent calls may both read the same list and the later write wins.
    ///
    /// # Examples
    /// ```
    /// use service::people::{service::PeopleService, repository::mock::MockPeopleRepository};
    /// use service::people::domain::PersonInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockPeopleRepository::default());
    /// let svc = PeopleService::new(repo);
    /// let input = PersonInput { name: Some("Ada".into()), ..Default::default() };
    /// let person = tokio_test::block_on(svc.add_person(input)).unwrap();
    /// assert_eq!(person.get("name"), Some(&serde_json::json!("Ada")));
    /// assert_eq!(person.get("email"), Some(&serde_json::Value::Null));
    /// ```
    #[instrument(skip(self, input))]
    pub async fn add_person(&self, input: PersonInput) -> Result<Person, ServiceError> {
        let person = Person::from(input);
        let count = self.repo.append(person.clone()).await?;
        info!(count, "person_added");
        Ok(person)
    }

    /// Every stored record, in insertion order and exactly as stored.
    #[instrument(skip(self))]
    pub async fn export_people(&self) -> Result<Vec<Person>, ServiceError> {
        let people = self.repo.load().await?;
        info!(count = people.len(), "people_exported");
        Ok(people)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::people::repository::mock::MockPeopleRepository;
    use crate::people::repository::JsonFilePeopleRepository;

    fn full_input(i: usize) -> PersonInput {
        PersonInput {
            name: Some(format!("Person {i}").into()),
            email: Some(format!("p{i}@example.com").into()),
            affiliation: Some("NYU".into()),
            role: Some("author".into()),
        }
    }

    #[tokio::test]
    async fn add_returns_record_and_persists() -> Result<(), anyhow::Error> {
        let repo = Arc::new(MockPeopleRepository::default());
        let svc = PeopleService::new(Arc::clone(&repo));

        let added = svc.add_person(full_input(1)).await?;
        assert_eq!(added, Person::from(full_input(1)));
        assert_eq!(repo.snapshot(), vec![added]);
        Ok(())
    }

    #[tokio::test]
    async fn export_keeps_insertion_order() -> Result<(), anyhow::Error> {
        let svc = PeopleService::new(Arc::new(MockPeopleRepository::default()));
        assert!(svc.export_people().await?.is_empty());

        for i in 0..5 {
            svc.add_person(full_input(i)).await?;
        }
        let people = svc.export_people().await?;
        assert_eq!(people.len(), 5);
        for (i, p) in people.iter().enumerate() {
            assert_eq!(p.get("name"), Some(&serde_json::json!(format!("Person {i}"))));
        }
        Ok(())
    }

    #[tokio::test]
    async fn load_failure_propagates_and_nothing_saved() {
        let repo = Arc::new(MockPeopleRepository::corrupt());
        let svc = PeopleService::new(Arc::clone(&repo));

        assert!(matches!(svc.add_person(full_input(0)).await, Err(ServiceError::Parse(_))));
        assert!(matches!(svc.export_people().await, Err(ServiceError::Parse(_))));
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn file_backed_round_trip_preserves_nulls() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("people_svc_{}.json", uuid::Uuid::new_v4()));
        let svc = PeopleService::new(Arc::new(JsonFilePeopleRepository::new(&tmp)));

        let partial = PersonInput { email: Some("only@example.com".into()), ..Default::default() };
        svc.add_person(full_input(1)).await?;
        svc.add_person(partial.clone()).await?;

        // a fresh repository on the same path sees what the first one wrote
        let again = PeopleService::new(Arc::new(JsonFilePeopleRepository::new(&tmp)));
        let people = again.export_people().await?;
        assert_eq!(people, vec![Person::from(full_input(1)), Person::from(partial)]);

        let raw: serde_json::Value = serde_json::from_slice(&tokio::fs::read(&tmp).await?)?;
        assert_eq!(raw[1]["name"], serde_json::Value::Null);
        assert_eq!(raw[1]["email"], "only@example.com");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn existing_records_survive_an_add_unchanged() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("people_svc_legacy_{}.json", uuid::Uuid::new_v4()));
        let legacy = r#"[
    {
        "role": "Editor",
        "name": "Legacy",
        "roles": [
            "Editor"
        ],
        "email": 42
    }
]"#;
        tokio::fs::write(&tmp, legacy).await?;
        let svc = PeopleService::new(Arc::new(JsonFilePeopleRepository::new(&tmp)));

        let exported = svc.export_people().await?;
        assert_eq!(exported[0].get("email"), Some(&serde_json::json!(42)));
        assert_eq!(exported[0].get("roles"), Some(&serde_json::json!(["Editor"])));

        let input = PersonInput { name: Some(7.into()), ..Default::default() };
        svc.add_person(input).await?;

        // first record is written back byte for byte
        let raw = tokio::fs::read_to_string(&tmp).await?;
        assert!(raw.starts_with(&legacy[..legacy.len() - 2]));
        let people = svc.export_people().await?;
        assert_eq!(people.len(), 2);
        assert_eq!(people[0], exported[0]);
        assert_eq!(people[1].get("name"), Some(&serde_json::json!(7)));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
