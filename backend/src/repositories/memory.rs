//! In-memory user directory for unit and router tests

use super::user::{NewUser, ProfileChanges, UserDirectory, UserRecord};
use ambridge_shared::Role;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    next_id: i64,
    users: Vec<UserRecord>,
}

/// User directory held in a mutex-guarded vector
#[derive(Default)]
pub struct InMemoryUserDirectory {
    inner: Mutex<Inner>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change a stored role, as an operator would with SQL
    pub fn set_role(&self, id: i64, role: Role) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == id) {
            user.role = role.as_str().to_string();
        }
    }

    /// Stored refresh token of a user
    pub fn refresh_token_of(&self, id: i64) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .users
            .iter()
            .find(|u| u.id == id)
            .and_then(|u| u.refresh_token.clone())
    }

    pub fn user_count(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }
}

/// A fully populated record for tests that need one without a directory
pub fn sample_record(id: i64, email: &str) -> UserRecord {
    let now = Utc::now();
    UserRecord {
        id,
        name: "Test".to_string(),
        surname: "User".to_string(),
        email: email.to_string(),
        password_hash: String::new(),
        profile_image: Some("/default-avatar.png".to_string()),
        company_name: None,
        company_email: None,
        company_address: None,
        company_phone: None,
        position: None,
        referral_source: None,
        role: Role::User.as_str().to_string(),
        refresh_token: None,
        resume_file: None,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<Option<UserRecord>> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.email == user.email) {
            return Ok(None);
        }

        inner.next_id += 1;
        let mut record = sample_record(inner.next_id, &user.email);
        record.name = user.name;
        record.surname = user.surname;
        record.password_hash = user.password_hash;
        record.profile_image = Some(user.profile_image);
        record.company_name = user.company_name;
        record.position = user.position;
        record.referral_source = user.referral_source;
        record.role = user.role.as_str().to_string();

        inner.users.push(record.clone());
        Ok(Some(record))
    }

    async fn set_refresh_token(&self, id: i64, token: Option<&str>) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == id) {
            user.refresh_token = token.map(str::to_string);
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn rotate_refresh_token(&self, old: &str, new: &str) -> Result<Option<UserRecord>> {
        let mut inner = self.inner.lock().unwrap();
        let Some(user) = inner
            .users
            .iter_mut()
            .find(|u| u.refresh_token.as_deref() == Some(old))
        else {
            return Ok(None);
        };

        user.refresh_token = Some(new.to_string());
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
    ) -> Result<Option<UserRecord>> {
        let mut inner = self.inner.lock().unwrap();
        let Some(user) = inner.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        fn apply(target: &mut String, value: &Option<String>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }
        fn apply_opt(target: &mut Option<String>, value: &Option<String>) {
            if value.is_some() {
                *target = value.clone();
            }
        }

        apply(&mut user.name, &changes.name);
        apply(&mut user.surname, &changes.surname);
        apply_opt(&mut user.profile_image, &changes.profile_image);
        apply_opt(&mut user.company_name, &changes.company_name);
        apply_opt(&mut user.company_email, &changes.company_email);
        apply_opt(&mut user.company_address, &changes.company_address);
        apply_opt(&mut user.company_phone, &changes.company_phone);
        apply_opt(&mut user.position, &changes.position);
        apply_opt(&mut user.referral_source, &changes.referral_source);
        apply_opt(&mut user.resume_file, &changes.resume_file);
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }
}
