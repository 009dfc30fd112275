use std::{path::PathBuf, sync::Arc};

use models::{CreateEmployeePayload, Employee};
use tracing::info;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::repository::EmployeeRepository;
use crate::storage::json_list_store::JsonListStore;

/// Employee collection persisted as a pretty-printed JSON array.
pub struct EmployeeStore {
    store: JsonListStore<Employee>,
}

impl EmployeeStore {
    /// Bind to a backing file. The file is created lazily on first access.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { store: JsonListStore::new(path) })
    }

    pub async fn list_all(&self) -> Result<Vec<Employee>, ServiceError> {
        self.store.list().await
    }

    /// Append a new employee under a freshly generated id.
    pub async fn create(&self, payload: CreateEmployeePayload) -> Result<Employee, ServiceError> {
        let employee = Employee::from_payload(Uuid::new_v4().to_string(), payload);
        let created = employee.clone();
        self.store
            .update_list(move |list| {
                list.push(employee);
                Ok(())
            })
            .await?;
        info!(id = %created.id, "employee created");
        Ok(created)
    }

    /// Replace every field of the employee with `id`, keeping its position.
    pub async fn update(&self, id: &str, payload: CreateEmployeePayload) -> Result<Employee, ServiceError> {
        let updated = self
            .store
            .update_list(|list| {
                let existing = list
                    .iter_mut()
                    .find(|e| e.id == id)
                    .ok_or_else(|| ServiceError::not_found("Employee"))?;
                existing.apply(payload);
                Ok(existing.clone())
            })
            .await?;
        info!(id = %updated.id, "employee updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.store
            .update_list(|list| {
                let before = list.len();
                list.retain(|e| e.id != id);
                if list.len() == before {
                    return Err(ServiceError::not_found("Employee"));
                }
                Ok(())
            })
            .await?;
        info!(%id, "employee deleted");
        Ok(())
    }
}

#[async_trait::async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn list_all(&self) -> Result<Vec<Employee>, ServiceError> { self.list_all().await }
    async fn create(&self, payload: CreateEmployeePayload) -> Result<Employee, ServiceError> { self.create(payload).await }
    async fn update(&self, id: &str, payload: CreateEmployeePayload) -> Result<Employee, ServiceError> { self.update(id, payload).await }
    async fn delete(&self, id: &str) -> Result<(), ServiceError> { self.delete(id).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    struct TempStore {
        dir: PathBuf,
        path: PathBuf,
        store: Arc<EmployeeStore>,
    }

    impl TempStore {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("employee_store_{}", Uuid::new_v4()));
            let path = dir.join("data/employees.json");
            let store = EmployeeStore::new(&path);
            Self { dir, path, store }
        }
    }

    impl Drop for TempStore {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.dir);
        }
    }

    fn payload(name: &str) -> CreateEmployeePayload {
        CreateEmployeePayload {
            name: name.into(),
            title: "Engineer".into(),
            department: "R&D".into(),
            location: "Remote".into(),
            salary: 120000,
            hire_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    #[tokio::test]
    async fn first_list_creates_backing_file() -> Result<(), anyhow::Error> {
        let t = TempStore::new();
        assert!(!t.path.exists());
        assert!(t.store.list_all().await?.is_empty());
        assert!(t.path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn create_assigns_unique_ids_and_appends() -> Result<(), anyhow::Error> {
        let t = TempStore::new();
        let mut ids = HashSet::new();
        for name in ["Ada", "Grace", "Linus"] {
            let created = t.store.create(payload(name)).await?;
            assert!(!created.id.is_empty());
            assert_eq!(created.name, name);
            assert_eq!(created.hire_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
            assert!(ids.insert(created.id));
        }

        let names: Vec<_> = t.store.list_all().await?.into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["Ada", "Grace", "Linus"]);
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_exactly_one_entry() -> Result<(), anyhow::Error> {
        let t = TempStore::new();
        let a = t.store.create(payload("Ada")).await?;
        let b = t.store.create(payload("Grace")).await?;

        let mut next = payload("Ada Lovelace");
        next.salary = 1;
        let updated = t.store.update(&a.id, next).await?;
        assert_eq!(updated.id, a.id);
        assert_eq!(updated.name, "Ada Lovelace");

        let list = t.store.list_all().await?;
        assert_eq!(list, vec![updated, b]);
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_and_unmodified() -> Result<(), anyhow::Error> {
        let t = TempStore::new();
        t.store.create(payload("Ada")).await?;
        let before = std::fs::read(&t.path)?;

        let res = t.store.update("missing", payload("Nobody")).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert_eq!(std::fs::read(&t.path)?, before);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_entry() -> Result<(), anyhow::Error> {
        let t = TempStore::new();
        let a = t.store.create(payload("Ada")).await?;
        let b = t.store.create(payload("Grace")).await?;

        t.store.delete(&a.id).await?;
        assert_eq!(t.store.list_all().await?, vec![b]);

        let res = t.store.delete(&a.id).await;
        assert!(matches!(res, Err(ServiceError::NotFound(msg)) if msg == "Employee not found"));
        assert_eq!(t.store.list_all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_creates_are_not_lost() -> Result<(), anyhow::Error> {
        let t = TempStore::new();
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&t.store);
            handles.push(tokio::spawn(async move { store.create(payload(&format!("e{i}"))).await }));
        }
        for h in handles {
            h.await??;
        }
        assert_eq!(t.store.list_all().await?.len(), 16);
        Ok(())
    }

    #[tokio::test]
    async fn works_through_the_repository_trait() -> Result<(), anyhow::Error> {
        let t = TempStore::new();
        let repo: Arc<dyn EmployeeRepository> = t.store.clone();
        let created = repo.create(payload("Ada")).await?;
        assert_eq!(repo.list_all().await?, vec![created.clone()]);
        repo.delete(&created.id).await?;
        assert!(repo.list_all().await?.is_empty());
        Ok(())
    }
}
