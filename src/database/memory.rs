use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repositories::{PetRepository, UserRepository};
use crate::error::AppError;
use crate::models::{CreatePetRequest, Pet, UpdatePetRequest, User};

/// 内存用户存储，测试和演示模式使用
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail);
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }
}

#[derive(Default)]
pub struct MemoryPetRepository {
    pets: RwLock<HashMap<Uuid, Pet>>,
}

#[async_trait]
impl PetRepository for MemoryPetRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Pet>, AppError> {
        let pets = self.pets.read().await;
        let mut owned: Vec<Pet> = pets
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn create(&self, owner_id: Uuid, req: CreatePetRequest) -> Result<Pet, AppError> {
        let pet = Pet::new(owner_id, req, Utc::now());
        self.pets.write().await.insert(pet.id, pet.clone());
        Ok(pet)
    }

    async fn find_owned(&self, pet_id: Uuid, owner_id: Uuid) -> Result<Option<Pet>, AppError> {
        let pets = self.pets.read().await;
        Ok(pets
            .get(&pet_id)
            .filter(|p| p.owner_id == owner_id)
            .cloned())
    }

    async fn apply_partial_update(
        &self,
        pet_id: Uuid,
        owner_id: Uuid,
        changes: UpdatePetRequest,
    ) -> Result<Pet, AppError> {
        let mut pets = self.pets.write().await;
        let pet = pets
            .get_mut(&pet_id)
            .filter(|p| p.owner_id == owner_id)
            .ok_or(AppError::NotFound)?;

        for field in changes.into_fields() {
            pet.apply(field);
        }
        pet.updated_at = Utc::now();

        Ok(pet.clone())
    }

    async fn delete_owned(&self, pet_id: Uuid, owner_id: Uuid) -> Result<(), AppError> {
        let mut pets = self.pets.write().await;
        match pets.get(&pet_id) {
            Some(pet) if pet.owner_id == owner_id => {
                pets.remove(&pet_id);
                Ok(())
            }
            _ => Err(AppError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buddy() -> CreatePetRequest {
        CreatePetRequest {
            name: "Buddy".into(),
            species: "dog".into(),
            breed: "beagle".into(),
            age: 3,
            weight: 11.5,
            color: "tricolor".into(),
            notes: "likes baths".into(),
            photo_url: "https://img/buddy.png".into(),
        }
    }

    #[tokio::test]
    async fn partial_update_changes_only_supplied_fields() {
        let repo = MemoryPetRepository::default();
        let owner = Uuid::new_v4();
        let before = repo.create(owner, buddy()).await.unwrap();

        let changes = UpdatePetRequest {
            name: Some("Rex".into()),
            ..Default::default()
        };
        let after = repo
            .apply_partial_update(before.id, owner, changes)
            .await
            .unwrap();

        assert_eq!(after.name, "Rex");
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(
            Pet {
                name: before.name.clone(),
                updated_at: before.updated_at,
                ..after.clone()
            },
            before
        );
        assert_eq!(after.weight.to_bits(), before.weight.to_bits());
    }

    #[tokio::test]
    async fn empty_update_refreshes_timestamp_only() {
        let repo = MemoryPetRepository::default();
        let owner = Uuid::new_v4();
        let before = repo.create(owner, buddy()).await.unwrap();

        let after = repo
            .apply_partial_update(before.id, owner, UpdatePetRequest::default())
            .await
            .unwrap();

        assert!(after.updated_at >= before.updated_at);
        assert_eq!(
            Pet {
                updated_at: before.updated_at,
                ..after
            },
            before
        );
    }

    #[tokio::test]
    async fn foreign_pet_looks_like_missing_pet() {
        let repo = MemoryPetRepository::default();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let pet = repo.create(owner, buddy()).await.unwrap();

        let foreign = repo
            .apply_partial_update(pet.id, intruder, UpdatePetRequest::default())
            .await
            .unwrap_err();
        let missing = repo
            .apply_partial_update(Uuid::new_v4(), owner, UpdatePetRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(foreign, AppError::NotFound));
        assert!(matches!(missing, AppError::NotFound));
        assert!(repo.find_owned(pet.id, intruder).await.unwrap().is_none());
        assert!(matches!(
            repo.delete_owned(pet.id, intruder).await,
            Err(AppError::NotFound)
        ));
        assert_eq!(repo.find_owned(pet.id, owner).await.unwrap().unwrap().name, "Buddy");
    }

    #[tokio::test]
    async fn list_is_scoped_and_newest_first() {
        let repo = MemoryPetRepository::default();
        let owner = Uuid::new_v4();
        let first = repo.create(owner, buddy()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = repo.create(owner, buddy()).await.unwrap();
        repo.create(Uuid::new_v4(), buddy()).await.unwrap();

        let ids: Vec<Uuid> = repo
            .list_by_owner(owner)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn duplicate_email_is_reported_distinctly() {
        let repo = MemoryUserRepository::default();
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: "alice@example.com".into(),
            password_hash: "$2b$04$hash".into(),
            first_name: "Alice".into(),
            last_name: "Liddell".into(),
            phone: String::new(),
            address: String::new(),
            role: crate::models::UserRole::Owner,
            created_at: now,
            updated_at: now,
        };
        repo.insert(&user).await.unwrap();

        let again = User {
            id: Uuid::new_v4(),
            ..user.clone()
        };
        assert!(matches!(
            repo.insert(&again).await,
            Err(AppError::DuplicateEmail)
        ));
        assert_eq!(
            repo.find_by_email("alice@example.com").await.unwrap().unwrap().id,
            user.id
        );
    }
}
