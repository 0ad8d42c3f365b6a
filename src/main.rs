// ==========================================
// 周课表排课系统 - 命令行入口
// ==========================================
// 用法:
//   timetable-allocator <db|-> import <file.csv|file.xlsx>
//   timetable-allocator <db|-> list
//   timetable-allocator <db|-> remove <id>
//   timetable-allocator <db|-> clear
//   timetable-allocator <db|-> generate
//   timetable-allocator <db|-> export <group> <out.csv|out.txt>
//   timetable-allocator <db|-> config [<key> <value>]
//
// db 为 "-" 时使用默认路径 (TIMETABLE_ALLOCATOR_DB_PATH 或用户数据目录)
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use std::path::Path;
use timetable_allocator::app::{get_default_db_path, AppState};
use timetable_allocator::domain::StaffMember;
use timetable_allocator::logging;

const USAGE: &str = "用法: timetable-allocator <db|-> <import FILE | list | remove ID | clear | generate | export GROUP OUT | config [KEY VALUE]>";

fn main() -> Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let db_arg = args.next().ok_or_else(|| anyhow!(USAGE))?;
    let command = args.next().ok_or_else(|| anyhow!(USAGE))?;
    let rest: Vec<String> = args.collect();

    let db_path = if db_arg == "-" {
        get_default_db_path()
    } else {
        db_arg
    };

    tracing::info!("{} v{}", timetable_allocator::APP_NAME, timetable_allocator::VERSION);
    tracing::info!("使用数据库: {}", db_path);

    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;

    match (command.as_str(), rest.as_slice()) {
        ("import", [file]) => {
            let summary = state.roster_api.import_file(file)?;
            println!(
                "导入 {} 行: 新增 {}, 合并 {}, 名册共 {} 人",
                summary.rows, summary.added, summary.merged, summary.roster_size
            );
        }
        ("list", []) => {
            for member in state.roster_api.list()? {
                println!("{}", describe_member(&member));
            }
        }
        ("remove", [id]) => {
            let id: i64 = id
                .parse()
                .with_context(|| format!("无效的教师 id: {}", id))?;
            let removed = state.roster_api.remove(id)?;
            println!("已删除 {} (id={})", removed.name, removed.id);
        }
        ("clear", []) => {
            state.roster_api.clear()?;
            println!("名册已清空");
        }
        ("generate", []) => {
            let outcome = state.timetable_api.generate()?;
            println!(
                "run {}: 已分配 {} / 未分配 {} (镜像写入 {}), 目标 {} 节/人",
                outcome.run_id,
                outcome.stats.filled,
                outcome.stats.unfilled,
                outcome.stats.mirrored_writes,
                outcome.target_periods_per_teacher
            );
            for load in &outcome.loads {
                println!("  {:>4}  {:<24} {}", load.staff_id, load.name, load.periods_assigned);
            }
        }
        ("export", [group, out]) => {
            state.timetable_api.export(group, Path::new(out))?;
            println!("{} 已导出到 {}", group, out);
        }
        ("config", []) => {
            let config = state.config_api.get_engine_config()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            for item in state.config_api.list_overrides()? {
                println!("override {} = {}", item.key, item.value);
            }
        }
        ("config", [key, value]) => {
            state.config_api.set_value(key, value)?;
            println!("{} = {}", key, value);
        }
        _ => bail!(USAGE),
    }

    Ok(())
}

fn describe_member(member: &StaffMember) -> String {
    let subjects: Vec<String> = member
        .subjects
        .iter()
        .map(|o| {
            let levels: Vec<String> = o.levels.iter().map(|l| l.to_string()).collect();
            let streams: Vec<String> = o.streams.iter().map(|s| s.to_string()).collect();
            if streams.is_empty() {
                format!("{} [{}]", o.subject, levels.join(","))
            } else {
                format!("{} [{}; {}]", o.subject, levels.join(","), streams.join(","))
            }
        })
        .collect();
    let days: Vec<String> = member.available_days.iter().map(|d| d.to_string()).collect();

    format!(
        "{:>4}  {:<24} {:>3}  {}  ({})",
        member.id,
        member.name,
        member.periods_assigned,
        subjects.join(" | "),
        days.join(",")
    )
}
