use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::Mutex;

use stagehand_core::{ActorIdentity, AppResult};
use stagehand_domain::{
    AuditLogEntry, EmailAddress, RecordId, RecordName, Role, RoleDraft, User,
};

use crate::{
    AuditLogRepository, AuditRecorder, Clock, MutationGate, RoleRepository, RoleService,
    UserRepository, UserService,
};

#[derive(Default)]
pub(crate) struct FakeRecordStore {
    pub users: Mutex<Vec<User>>,
    pub roles: Mutex<Vec<Role>>,
    pub audit_entries: Mutex<Vec<AuditLogEntry>>,
    counters: Mutex<[u64; 3]>,
}

impl FakeRecordStore {
    async fn next(&self, slot: usize) -> RecordId {
        let mut counters = self.counters.lock().await;
        counters[slot] += 1;
        RecordId::from_sequence(counters[slot])
    }
}

#[async_trait]
impl UserRepository for FakeRecordStore {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.users.lock().await.clone())
    }

    async fn find_user(&self, user_id: &RecordId) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.id() == user_id)
            .cloned())
    }

    async fn insert_user(&self, user: User) -> AppResult<()> {
        self.users.lock().await.push(user);
        Ok(())
    }

    async fn replace_user(&self, user: User) -> AppResult<()> {
        let mut users = self.users.lock().await;
        if let Some(slot) = users.iter_mut().find(|stored| stored.id() == user.id()) {
            *slot = user;
        }
        Ok(())
    }

    async fn remove_user(&self, user_id: &RecordId) -> AppResult<Option<User>> {
        let mut users = self.users.lock().await;
        let index = users.iter().position(|user| user.id() == user_id);
        Ok(index.map(|index| users.remove(index)))
    }

    async fn next_user_id(&self) -> AppResult<RecordId> {
        Ok(self.next(0).await)
    }
}

#[async_trait]
impl RoleRepository for FakeRecordStore {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.lock().await.clone())
    }

    async fn find_role(&self, role_id: &RecordId) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|role| role.id() == role_id)
            .cloned())
    }

    async fn insert_role(&self, role: Role) -> AppResult<()> {
        self.roles.lock().await.push(role);
        Ok(())
    }

    async fn replace_role(&self, role: Role) -> AppResult<()> {
        let mut roles = self.roles.lock().await;
        if let Some(slot) = roles.iter_mut().find(|stored| stored.id() == role.id()) {
            *slot = role;
        }
        Ok(())
    }

    async fn remove_role(&self, role_id: &RecordId) -> AppResult<Option<Role>> {
        let mut roles = self.roles.lock().await;
        let index = roles.iter().position(|role| role.id() == role_id);
        Ok(index.map(|index| roles.remove(index)))
    }

    async fn next_role_id(&self) -> AppResult<RecordId> {
        Ok(self.next(1).await)
    }
}

#[async_trait]
impl AuditLogRepository for FakeRecordStore {
    async fn list_entries(&self) -> AppResult<Vec<AuditLogEntry>> {
        Ok(self.audit_entries.lock().await.clone())
    }

    async fn append_entry(&self, entry: AuditLogEntry) -> AppResult<()> {
        self.audit_entries.lock().await.push(entry);
        Ok(())
    }

    async fn latest_timestamp(&self) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self
            .audit_entries
            .lock()
            .await
            .last()
            .map(|entry| entry.timestamp))
    }

    async fn next_audit_log_id(&self) -> AppResult<RecordId> {
        Ok(self.next(2).await)
    }
}

/// Clock that advances one second per reading, or stays put when frozen.
pub(crate) struct SteppingClock {
    current: StdMutex<DateTime<Utc>>,
    step: Duration,
}

impl SteppingClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            current: StdMutex::new(start),
            step: Duration::seconds(1),
        }
    }

    pub fn frozen(at: DateTime<Utc>) -> Self {
        Self {
            current: StdMutex::new(at),
            step: Duration::zero(),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let now = *current;
        *current = now + self.step;
        now
    }
}

pub(crate) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

pub(crate) fn actor() -> ActorIdentity {
    ActorIdentity::default()
}

pub(crate) struct Harness {
    pub store: Arc<FakeRecordStore>,
    pub user_service: UserService,
    pub role_service: RoleService,
}

pub(crate) fn harness_with_clock(clock: Arc<dyn Clock>) -> Harness {
    let store = Arc::new(FakeRecordStore::default());
    let recorder = AuditRecorder::new(store.clone(), clock.clone());
    let gate = MutationGate::new();

    Harness {
        user_service: UserService::new(
            store.clone(),
            store.clone(),
            recorder.clone(),
            clock.clone(),
            gate.clone(),
        ),
        role_service: RoleService::new(store.clone(), store.clone(), recorder, clock, gate),
        store,
    }
}

pub(crate) fn harness() -> Harness {
    harness_with_clock(Arc::new(SteppingClock::starting_at(base_time())))
}

pub(crate) fn role_draft(name: &str, permissions: &[&str]) -> RoleDraft {
    RoleDraft::new(
        name,
        None,
        permissions.iter().map(|value| (*value).to_owned()).collect(),
    )
    .unwrap_or_else(|error| panic!("invalid role draft: {error}"))
}

pub(crate) fn name(value: &str) -> RecordName {
    RecordName::new(value, "name").unwrap_or_else(|error| panic!("invalid name: {error}"))
}

pub(crate) fn email(value: &str) -> EmailAddress {
    EmailAddress::new(value).unwrap_or_else(|error| panic!("invalid email: {error}"))
}
