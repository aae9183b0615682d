// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use duty_roster::domain::{DayMonth, SkillTier, Slot, Volunteer};
use uuid::Uuid;

pub const ROVING_MIC: &str = "roving_mic";
pub const ATTENDANT: &str = "attendant";
pub const AUDIO_VIDEO: &str = "audio_video";

/// 构造日期
pub fn dm(day: u32, month: u32) -> DayMonth {
    DayMonth::new(day, month).unwrap()
}

// ==========================================
// Volunteer 构建器
// ==========================================

pub struct VolunteerBuilder {
    volunteer: Volunteer,
}

impl VolunteerBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            volunteer: Volunteer::new(name),
        }
    }

    pub fn role(mut self, role: &str) -> Self {
        self.volunteer.roles.insert(role.to_string());
        self
    }

    pub fn tier(mut self, role: &str, tier: SkillTier) -> Self {
        self.volunteer.skill_tiers.insert(role.to_string(), tier);
        self
    }

    pub fn unavailable(mut self, day: u32, month: u32) -> Self {
        self.volunteer.unavailable_dates.insert(dm(day, month));
        self
    }

    pub fn inactive(mut self) -> Self {
        self.volunteer.active = false;
        self
    }

    pub fn build(self) -> Volunteer {
        self.volunteer
    }
}

/// 某岗位的简单名册（姓名即资格）
pub fn role_roster(role: &str, names: &[&str]) -> Vec<Volunteer> {
    names
        .iter()
        .map(|name| VolunteerBuilder::new(name).role(role).build())
        .collect()
}

// ==========================================
// Slot 构建器
// ==========================================

/// 同一岗位的多个日期（星期标签一并给出）
pub fn role_slots(role: &str, dates: &[(u32, u32, &str)]) -> Vec<Slot> {
    dates
        .iter()
        .map(|(day, month, weekday)| Slot::new(Uuid::nil(), dm(*day, *month), *weekday, role))
        .collect()
}

/// 一月份的聚会日（周日 + 周四，2026 年）
pub fn january_meeting_days() -> Vec<(u32, u32, &'static str)> {
    vec![
        (1, 1, "Thursday"),
        (4, 1, "Sunday"),
        (8, 1, "Thursday"),
        (11, 1, "Sunday"),
        (15, 1, "Thursday"),
        (18, 1, "Sunday"),
        (22, 1, "Thursday"),
        (25, 1, "Sunday"),
        (29, 1, "Thursday"),
    ]
}

/// 较完整的名册（三个岗位，含技能等级与不可用日期）
pub fn congregation_roster() -> Vec<Volunteer> {
    vec![
        VolunteerBuilder::new("Benjamin").role(ROVING_MIC).build(),
        VolunteerBuilder::new("Claudio").role(ROVING_MIC).unavailable(4, 1).build(),
        VolunteerBuilder::new("Miguel").role(ROVING_MIC).role(ATTENDANT).build(),
        VolunteerBuilder::new("Kaua").role(ROVING_MIC).build(),
        VolunteerBuilder::new("Ivo").role(ROVING_MIC).unavailable(15, 1).build(),
        VolunteerBuilder::new("Lazaro").role(ROVING_MIC).build(),
        VolunteerBuilder::new("Edgar").role(ATTENDANT).unavailable(11, 1).build(),
        VolunteerBuilder::new("Ruda").role(ATTENDANT).build(),
        VolunteerBuilder::new("Aloisio").role(ATTENDANT).build(),
        VolunteerBuilder::new("Jose").role(ATTENDANT).unavailable(8, 1).unavailable(22, 1).build(),
        VolunteerBuilder::new("Francisco").role(ATTENDANT).build(),
        VolunteerBuilder::new("Cristian").role(ATTENDANT).inactive().build(),
        VolunteerBuilder::new("Ricardo").tier(AUDIO_VIDEO, SkillTier::Experienced).build(),
        VolunteerBuilder::new("Henzel")
            .role(ATTENDANT)
            .tier(AUDIO_VIDEO, SkillTier::Experienced)
            .build(),
        VolunteerBuilder::new("Everton").tier(AUDIO_VIDEO, SkillTier::Training).unavailable(1, 1).build(),
        VolunteerBuilder::new("Joao").tier(AUDIO_VIDEO, SkillTier::Training).build(),
        VolunteerBuilder::new("Matheus").tier(AUDIO_VIDEO, SkillTier::Training).build(),
        VolunteerBuilder::new("Erick").role(AUDIO_VIDEO).build(),
    ]
}
