// ==========================================
// 周课表排课系统 - 课表 API
// ==========================================
// 职责:
// - generate: 读名册 -> 读配置 -> 排课 -> 保存课表快照 -> 写回并保存名册节数
// - export: 读课表快照 -> 取单个班级 -> 按扩展名渲染到文件
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::EngineConfigReader;
use crate::domain::grid::{GridModel, Group};
use crate::domain::schedule::GroupTimetable;
use crate::engine::{AllocationOutcome, TimetableAllocator};
use crate::report::{renderer_for_path, ReportTemplate};
use crate::repository::{Roster, ScheduleStore, StoredSchedule};
use chrono::Local;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct TimetableApi {
    roster: Arc<dyn Roster>,
    schedules: Arc<dyn ScheduleStore>,
    config: Arc<dyn EngineConfigReader>,
    grid: GridModel,
}

impl TimetableApi {
    pub fn new(
        roster: Arc<dyn Roster>,
        schedules: Arc<dyn ScheduleStore>,
        config: Arc<dyn EngineConfigReader>,
        grid: GridModel,
    ) -> Self {
        Self {
            roster,
            schedules,
            config,
            grid,
        }
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// 生成一次完整周课表
    ///
    /// 失败时 (空名册 / 配置错误) 名册与已有课表快照均不变
    #[instrument(skip(self))]
    pub fn generate(&self) -> ApiResult<AllocationOutcome> {
        let mut roster = self.roster.load()?;
        let config = self
            .config
            .load_engine_config()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;

        let allocator = TimetableAllocator::with_config(self.grid.clone(), config);
        let outcome = allocator.run(&roster)?;

        // 快照先落盘: 快照保存失败时名册节数不变
        self.schedules.save_latest(&StoredSchedule {
            run_id: outcome.run_id.clone(),
            generated_at: outcome.generated_at,
            grid: outcome.grid.clone(),
        })?;
        outcome.apply_to_roster(&mut roster);
        self.roster.save(&roster)?;

        info!(run_id = %outcome.run_id, filled = outcome.stats.filled, "课表已生成并保存");
        Ok(outcome)
    }

    /// 最近一次课表中单个班级的数据
    pub fn group_timetable(&self, group: &str) -> ApiResult<GroupTimetable> {
        let group: Group = group
            .parse()
            .map_err(|e| ApiError::InvalidInput(format!("{}", e)))?;
        if !self.grid.contains_group(&group) {
            return Err(ApiError::NotFound(format!("班级 {} 不在网格中", group)));
        }

        let stored = self
            .schedules
            .load_latest()?
            .ok_or_else(|| ApiError::NotFound("尚未生成课表".to_string()))?;

        stored
            .grid
            .group_timetable(&self.grid, &group)
            .ok_or_else(|| ApiError::NotFound(format!("班级 {} 不在课表中", group)))
    }

    /// 导出单个班级 (.csv / .txt)
    pub fn export(&self, group: &str, out_path: &Path) -> ApiResult<()> {
        let renderer = renderer_for_path(out_path)?;
        let timetable = self.group_timetable(group)?;
        let template = ReportTemplate::school_default(Local::now().date_naive());

        renderer.render_to_file(&timetable, &template, out_path)?;
        info!(group = %timetable.group, path = %out_path.display(), "课表已导出");
        Ok(())
    }
}
