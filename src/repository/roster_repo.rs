// ==========================================
// 值班排班系统 - 名册仓储
// ==========================================
// 职责: 提供在岗志愿者名册（引擎只读）
// 说明: 每次读取返回独立副本，运行之间互不共享
// ==========================================

use crate::domain::volunteer::Volunteer;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use tokio::sync::RwLock;

// ==========================================
// RosterRepository Trait
// ==========================================
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// 在岗志愿者（保持名册顺序）
    async fn list_active_volunteers(&self) -> RepositoryResult<Vec<Volunteer>>;
}

// ==========================================
// InMemoryRosterRepository - 内存名册
// ==========================================
#[derive(Debug, Default)]
pub struct InMemoryRosterRepository {
    volunteers: RwLock<Vec<Volunteer>>,
}

impl InMemoryRosterRepository {
    pub fn new(volunteers: Vec<Volunteer>) -> Self {
        Self {
            volunteers: RwLock::new(volunteers),
        }
    }

    /// 新增或替换（按姓名）
    pub async fn upsert(&self, volunteer: Volunteer) {
        let mut volunteers = self.volunteers.write().await;
        match volunteers.iter_mut().find(|v| v.name == volunteer.name) {
            Some(existing) => *existing = volunteer,
            None => volunteers.push(volunteer),
        }
    }
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn list_active_volunteers(&self) -> RepositoryResult<Vec<Volunteer>> {
        let volunteers = self.volunteers.read().await;
        Ok(volunteers.iter().filter(|v| v.active).cloned().collect())
    }
}
