// ==========================================
// 值班排班系统 - 排班表 API
// ==========================================
// 职责: 创建月度排班表、自动指派、重新生成、统计
// 红线: 同一排班表不允许并发生成（两次运行会争写同一组岗位）
// ==========================================

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::config::EngineConfig;
use crate::domain::slot::{ScheduleInstance, Slot};
use crate::domain::types::ScheduleStatus;
use crate::engine::{AssignmentEngine, AssignmentReport, AssignmentStatistics, SlotTemplateGenerator};
use crate::repository::{RepositoryError, RosterRepository, ScheduleRepository};

// ==========================================
// ScheduleOutcome - 操作结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub schedule: ScheduleInstance,
    pub slots: Vec<Slot>,
    /// 未执行自动指派时为 None
    pub report: Option<AssignmentReport>,
}

// ==========================================
// ScheduleApi - 排班表 API
// ==========================================
pub struct ScheduleApi<R, S>
where
    R: RosterRepository,
    S: ScheduleRepository,
{
    roster_repo: Arc<R>,
    schedule_repo: Arc<S>,
    engine: AssignmentEngine,
    running: Mutex<HashSet<Uuid>>,
}

/// 生成占用标记，离开作用域自动释放
struct RunGuard<'a> {
    running: &'a Mutex<HashSet<Uuid>>,
    schedule_id: Uuid,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut running) = self.running.lock() {
            running.remove(&self.schedule_id);
        }
    }
}

impl<R, S> ScheduleApi<R, S>
where
    R: RosterRepository,
    S: ScheduleRepository,
{
    /// 创建新的 ScheduleApi 实例
    pub fn new(roster_repo: Arc<R>, schedule_repo: Arc<S>, config: EngineConfig) -> Self {
        Self {
            roster_repo,
            schedule_repo,
            engine: AssignmentEngine::new(config),
            running: Mutex::new(HashSet::new()),
        }
    }

    /// 创建月度排班表
    ///
    /// # 参数
    /// - `month`/`year`: 排班月份
    /// - `auto_fill`: 是否立即自动指派
    #[instrument(skip(self))]
    pub async fn create_schedule(&self, month: u32, year: i32, auto_fill: bool) -> ApiResult<ScheduleOutcome> {
        if !(1..=12).contains(&month) {
            return Err(ApiError::InvalidInput(format!("月份必须在 1..=12 之间: {}", month)));
        }

        if self.schedule_repo.find_by_month(month, year).await?.is_some() {
            return Err(ApiError::ScheduleExists { month, year });
        }

        let schedule = ScheduleInstance::new(month, year);
        let config = self.engine.config();
        let mut slots = SlotTemplateGenerator::new(&config.roles, &config.meeting_days)
            .generate(schedule.id, month, year)?;

        self.schedule_repo
            .insert(schedule.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::UniqueConstraintViolation(_) => ApiError::ScheduleExists { month, year },
                other => ApiError::Repository(other),
            })?;

        // 先落空模板，自动指派失败时仍可 regenerate
        self.schedule_repo.save_slots(schedule.id, slots.clone()).await?;

        let report = if auto_fill {
            let _guard = self.acquire(schedule.id)?;
            let report = self.fill(&mut slots).await?;
            self.schedule_repo.save_slots(schedule.id, slots.clone()).await?;
            Some(report)
        } else {
            None
        };

        info!(
            schedule_id = %schedule.id,
            title = %schedule.title,
            slots_count = slots.len(),
            auto_fill,
            "排班表创建完成"
        );

        Ok(ScheduleOutcome {
            schedule,
            slots,
            report,
        })
    }

    /// 清空席位并重新自动指派
    #[instrument(skip(self))]
    pub async fn regenerate(&self, schedule_id: Uuid) -> ApiResult<ScheduleOutcome> {
        let schedule = self.find_schedule(schedule_id).await?;
        if !schedule.status.is_editable() {
            return Err(ApiError::NotEditable(schedule.status));
        }
        let _guard = self.acquire(schedule_id)?;

        let mut slots = self.schedule_repo.load_slots(schedule_id).await?;
        if slots.is_empty() {
            warn!(%schedule_id, "排班表没有岗位，跳过自动指派");
            return Ok(ScheduleOutcome {
                schedule,
                slots,
                report: None,
            });
        }

        slots.iter_mut().for_each(Slot::clear);
        let report = self.fill(&mut slots).await?;
        self.schedule_repo.save_slots(schedule_id, slots.clone()).await?;

        Ok(ScheduleOutcome {
            schedule,
            slots,
            report: Some(report),
        })
    }

    /// 发布排班表（发布后不再重新生成）
    pub async fn publish(&self, schedule_id: Uuid) -> ApiResult<ScheduleInstance> {
        self.transition(schedule_id, ScheduleStatus::Published).await
    }

    pub async fn archive(&self, schedule_id: Uuid) -> ApiResult<ScheduleInstance> {
        self.transition(schedule_id, ScheduleStatus::Archived).await
    }

    #[instrument(skip(self))]
    async fn transition(&self, schedule_id: Uuid, next: ScheduleStatus) -> ApiResult<ScheduleInstance> {
        let mut schedule = self.find_schedule(schedule_id).await?;
        if !schedule.status.can_transition_to(next) {
            return Err(ApiError::InvalidStatus {
                from: schedule.status,
                to: next,
            });
        }

        self.schedule_repo.update_status(schedule_id, next).await?;
        info!(%schedule_id, from = %schedule.status, to = %next, "排班表状态变更");
        schedule.status = next;
        Ok(schedule)
    }

    /// 排班表统计
    pub async fn statistics(&self, schedule_id: Uuid) -> ApiResult<AssignmentStatistics> {
        self.find_schedule(schedule_id).await?;
        let slots = self.schedule_repo.load_slots(schedule_id).await?;
        let roster = self.roster_repo.list_active_volunteers().await?;
        Ok(AssignmentStatistics::from_slots(&slots, &roster))
    }

    async fn find_schedule(&self, schedule_id: Uuid) -> ApiResult<ScheduleInstance> {
        self.schedule_repo
            .find_by_id(schedule_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("schedule {}", schedule_id)))
    }

    /// 使用最新名册副本运行引擎
    async fn fill(&self, slots: &mut [Slot]) -> ApiResult<AssignmentReport> {
        let roster = self.roster_repo.list_active_volunteers().await?;
        let report = self.engine.generate_assignments(slots, &roster);

        if !report.is_complete() {
            warn!(
                unfilled_slots = report.unfilled_slot_count(),
                unfilled_seats = report.unfilled.len(),
                "部分岗位未能填满"
            );
        }
        Ok(report)
    }

    fn acquire(&self, schedule_id: Uuid) -> ApiResult<RunGuard<'_>> {
        let mut running = self
            .running
            .lock()
            .map_err(|e| ApiError::Internal(format!("锁获取失败: {}", e)))?;
        if !running.insert(schedule_id) {
            return Err(ApiError::ScheduleBusy(schedule_id));
        }
        Ok(RunGuard {
            running: &self.running,
            schedule_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::volunteer::Volunteer;
    use crate::repository::{InMemoryRosterRepository, InMemoryScheduleRepository};

    fn api() -> ScheduleApi<InMemoryRosterRepository, InMemoryScheduleRepository> {
        let roster = vec![
            Volunteer::new("A").with_role("attendant"),
            Volunteer::new("B").with_role("attendant"),
        ];
        ScheduleApi::new(
            Arc::new(InMemoryRosterRepository::new(roster)),
            Arc::new(InMemoryScheduleRepository::new()),
            EngineConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_month() {
        let err = api().create_schedule(0, 2026, true).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn test_acquire_rejects_second_run() {
        let api = api();
        let id = Uuid::new_v4();
        let guard = api.acquire(id).unwrap();
        assert!(matches!(api.acquire(id), Err(ApiError::ScheduleBusy(_))));
        drop(guard);
        assert!(api.acquire(id).is_ok());
    }

    #[tokio::test]
    async fn test_regenerate_unknown_schedule() {
        let err = api().regenerate(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
