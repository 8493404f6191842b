//! User management service: application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{DomainError, DomainResult, NewUser, RepositoryProvider, User, UserPatch};

fn check_name(name: &str) -> DomainResult<()> {
    if name.is_empty() {
        return Err(DomainError::Validation("name must not be blank".into()));
    }
    Ok(())
}

fn check_email(email: &str) -> DomainResult<()> {
    if !email.contains('@') {
        return Err(DomainError::Validation("Invalid email address".into()));
    }
    Ok(())
}

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Register a new user; emails are unique.
    pub async fn create_user(&self, name: &str, email: &str) -> DomainResult<User> {
        let name = name.trim();
        let email = email.trim();
        check_name(name)?;
        check_email(email)?;

        // the store claims the email atomically
        let user = self
            .repos
            .users()
            .create(NewUser {
                name: name.to_string(),
                email: email.to_string(),
            })
            .await?;

        info!(user_id = user.id, "New user registered");
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }

    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.repos.users().find_all().await
    }

    /// Change name and/or email; a new email must not belong to anyone else.
    pub async fn update_user(&self, id: i64, patch: UserPatch) -> DomainResult<User> {
        let patch = UserPatch {
            name: patch.name.map(|n| n.trim().to_string()),
            email: patch.email.map(|e| e.trim().to_string()),
        };
        if let Some(name) = &patch.name {
            check_name(name)?;
        }
        if let Some(email) = &patch.email {
            check_email(email)?;
        }

        let mut user = self.get_user(id).await?;
        patch.apply(&mut user);
        let user = self.repos.users().update(user).await?;

        info!(user_id = id, "User updated");
        Ok(user)
    }

    /// Remove a user along with their items, reservations and comments.
    pub async fn delete_user(&self, id: i64) -> DomainResult<()> {
        if !self.repos.users().delete(id).await? {
            return Err(DomainError::UserNotFound(id));
        }
        warn!(user_id = id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryStorage;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryStorage::new()))
    }

    #[tokio::test]
    async fn registers_and_resolves() {
        let svc = service();
        let user = svc.create_user("Alice", "alice@example.com").await.unwrap();
        assert_eq!(svc.get_user(user.id).await.unwrap(), user);

        let err = svc.get_user(user.id + 1).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn email_must_be_unique() {
        let svc = service();
        svc.create_user("Alice", "alice@example.com").await.unwrap();

        let err = svc
            .create_user("Alicia", "alice@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyExists(e) if e == "alice@example.com"));
    }

    #[tokio::test]
    async fn rejects_malformed_input() {
        let svc = service();
        assert!(matches!(
            svc.create_user("", "a@b.c").await.unwrap_err(),
            DomainError::Validation(_)
        ));
        assert!(matches!(
            svc.create_user("Bob", "not-an-email").await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_signups_with_one_email_yield_one_user() {
        let svc = Arc::new(service());
        let mut tasks = Vec::new();
        for n in 0..8 {
            let svc = svc.clone();
            tasks.push(tokio::spawn(async move {
                svc.create_user(&format!("User {n}"), "shared@example.com").await
            }));
        }

        let mut winners = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
        assert_eq!(svc.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn patch_updates_given_fields_only() {
        let svc = service();
        let alice = svc.create_user("Alice", "alice@example.com").await.unwrap();

        let updated = svc
            .update_user(
                alice.id,
                UserPatch {
                    name: Some("Alicia".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.email, "alice@example.com");

        // keeping one's own email is not a conflict
        svc.update_user(
            alice.id,
            UserPatch {
                email: Some("alice@example.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn patch_rejects_taken_email_and_unknown_user() {
        let svc = service();
        let alice = svc.create_user("Alice", "alice@example.com").await.unwrap();
        svc.create_user("Bob", "bob@example.com").await.unwrap();

        let err = svc
            .update_user(
                alice.id,
                UserPatch {
                    email: Some("bob@example.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyExists(_)));

        let err = svc
            .update_user(
                alice.id,
                UserPatch {
                    email: Some("nope".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = svc
            .update_user(404, UserPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound(404)));
    }

    #[tokio::test]
    async fn listing_and_deleting() {
        let svc = service();
        let alice = svc.create_user("Alice", "alice@example.com").await.unwrap();
        let bob = svc.create_user("Bob", "bob@example.com").await.unwrap();
        assert_eq!(svc.list_users().await.unwrap(), vec![alice.clone(), bob.clone()]);

        svc.delete_user(alice.id).await.unwrap();
        assert_eq!(svc.list_users().await.unwrap(), vec![bob]);
        assert!(matches!(
            svc.delete_user(alice.id).await.unwrap_err(),
            DomainError::UserNotFound(_)
        ));

        // the address is free again
        svc.create_user("Alice", "alice@example.com").await.unwrap();
    }
}
