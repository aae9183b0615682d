// ==========================================
// 值班排班系统 - 排班表仓储
// ==========================================
// 职责: 排班表与岗位的读取/写回
// 红线: 同一月份/年份只能有一张排班表
// ==========================================

use crate::domain::slot::{ScheduleInstance, Slot};
use crate::domain::types::ScheduleStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

// ==========================================
// ScheduleRepository Trait
// ==========================================
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<ScheduleInstance>>;

    async fn find_by_month(&self, month: u32, year: i32) -> RepositoryResult<Option<ScheduleInstance>>;

    /// 新增排班表（同月份重复时返回 UniqueConstraintViolation）
    async fn insert(&self, schedule: ScheduleInstance) -> RepositoryResult<()>;

    async fn load_slots(&self, schedule_id: Uuid) -> RepositoryResult<Vec<Slot>>;

    /// 整体写回岗位（排班表不存在时返回 NotFound）
    async fn save_slots(&self, schedule_id: Uuid, slots: Vec<Slot>) -> RepositoryResult<()>;

    async fn update_status(&self, schedule_id: Uuid, status: ScheduleStatus) -> RepositoryResult<()>;
}

// ==========================================
// InMemoryScheduleRepository - 内存排班表
// ==========================================
#[derive(Debug, Default)]
struct ScheduleTables {
    schedules: HashMap<Uuid, ScheduleInstance>,
    slots: HashMap<Uuid, Vec<Slot>>,
}

#[derive(Debug, Default)]
pub struct InMemoryScheduleRepository {
    tables: RwLock<ScheduleTables>,
}

impl InMemoryScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: Uuid) -> RepositoryError {
    RepositoryError::NotFound {
        entity: "ScheduleInstance".to_string(),
        id: id.to_string(),
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepository {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<ScheduleInstance>> {
        Ok(self.tables.read().await.schedules.get(&id).cloned())
    }

    async fn find_by_month(&self, month: u32, year: i32) -> RepositoryResult<Option<ScheduleInstance>> {
        let tables = self.tables.read().await;
        Ok(tables
            .schedules
            .values()
            .find(|s| s.month == month && s.year == year)
            .cloned())
    }

    async fn insert(&self, schedule: ScheduleInstance) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        if tables
            .schedules
            .values()
            .any(|s| s.month == schedule.month && s.year == schedule.year)
        {
            return Err(RepositoryError::UniqueConstraintViolation(format!(
                "schedule month={} year={}",
                schedule.month, schedule.year
            )));
        }
        tables.slots.insert(schedule.id, Vec::new());
        tables.schedules.insert(schedule.id, schedule);
        Ok(())
    }

    async fn load_slots(&self, schedule_id: Uuid) -> RepositoryResult<Vec<Slot>> {
        let tables = self.tables.read().await;
        tables
            .slots
            .get(&schedule_id)
            .cloned()
            .ok_or_else(|| not_found(schedule_id))
    }

    async fn save_slots(&self, schedule_id: Uuid, slots: Vec<Slot>) -> RepositoryResult<()> {
        if let Some(foreign) = slots.iter().find(|s| s.schedule_id != schedule_id) {
            return Err(RepositoryError::InternalError(format!(
                "岗位 {} {} 属于排班表 {}，不能写入 {}",
                foreign.date, foreign.role, foreign.schedule_id, schedule_id
            )));
        }

        let mut tables = self.tables.write().await;
        match tables.slots.get_mut(&schedule_id) {
            Some(stored) => {
                *stored = slots;
                Ok(())
            }
            None => Err(not_found(schedule_id)),
        }
    }

    async fn update_status(&self, schedule_id: Uuid, status: ScheduleStatus) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        let schedule = tables
            .schedules
            .get_mut(&schedule_id)
            .ok_or_else(|| not_found(schedule_id))?;
        schedule.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_rejects_duplicate_month() {
        let repo = InMemoryScheduleRepository::new();
        repo.insert(ScheduleInstance::new(1, 2026)).await.unwrap();

        let err = repo.insert(ScheduleInstance::new(1, 2026)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
        assert!(repo.find_by_month(1, 2026).await.unwrap().is_some());
        assert!(repo.find_by_month(2, 2026).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_slots_unknown_schedule() {
        let repo = InMemoryScheduleRepository::new();
        let err = repo.save_slots(Uuid::new_v4(), Vec::new()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_save_slots_rejects_slots_of_another_schedule() {
        let repo = InMemoryScheduleRepository::new();
        let schedule = ScheduleInstance::new(1, 2026);
        let id = schedule.id;
        repo.insert(schedule).await.unwrap();

        let date = crate::domain::types::DayMonth::new(4, 1).unwrap();
        let foreign = Slot::new(Uuid::new_v4(), date, "Sunday", "attendant");
        let err = repo.save_slots(id, vec![foreign]).await.unwrap_err();

        assert!(matches!(err, RepositoryError::InternalError(_)));
        assert!(repo.load_slots(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_status() {
        let repo = InMemoryScheduleRepository::new();
        let schedule = ScheduleInstance::new(1, 2026);
        let id = schedule.id;
        repo.insert(schedule).await.unwrap();

        repo.update_status(id, ScheduleStatus::Published).await.unwrap();
        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, ScheduleStatus::Published);

        let err = repo
            .update_status(Uuid::new_v4(), ScheduleStatus::Archived)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }
}
