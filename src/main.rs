// ==========================================
// 值班排班系统 - 命令行入口
// ==========================================
// 用法:
//   duty-roster generate <month> <year> <roster.csv> [-o out.json]
//   duty-roster assign <slots.json> <roster.csv> [-o out.json]
// 配置: DUTY_ROSTER_CONFIG=<config.json>（缺省使用默认配置）
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use duty_roster::engine::{AssignmentEngine, AssignmentStatistics};
use duty_roster::importer::{RosterCsvImporter, SlotJsonLoader};
use duty_roster::repository::{InMemoryRosterRepository, InMemoryScheduleRepository};
use duty_roster::{logging, ConfigManager, ScheduleApi};

#[derive(Parser, Debug)]
#[command(name = "duty-roster")]
#[command(version)]
#[command(about = "值班排班系统 - 月度自动指派")]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// 生成整月模板并自动指派
    Generate {
        /// 月份（1-12）
        month: u32,

        /// 年份
        year: i32,

        /// 名册 CSV
        roster: PathBuf,

        /// 输出 JSON（缺省打印到 stdout）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 为已有岗位文件自动指派
    Assign {
        /// 岗位 JSON
        slots: PathBuf,

        /// 名册 CSV
        roster: PathBuf,

        /// 输出 JSON（缺省打印到 stdout）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志系统
    logging::init();

    tracing::info!("{} v{}", duty_roster::APP_NAME, duty_roster::VERSION);

    let manager = ConfigManager::from_env().context("加载配置失败")?;
    if let Some(path) = manager.source() {
        tracing::info!("使用配置文件: {}", path.display());
    }
    let config = manager.into_config();

    match args.command {
        Commands::Generate {
            month,
            year,
            roster,
            output,
        } => {
            let roster = RosterCsvImporter::import(&roster)?;

            let api = ScheduleApi::new(
                Arc::new(InMemoryRosterRepository::new(roster)),
                Arc::new(InMemoryScheduleRepository::new()),
                config,
            );
            let outcome = api.create_schedule(month, year, true).await?;
            let stats = api.statistics(outcome.schedule.id).await?;

            write_output(output.as_deref(), &outcome.slots)?;
            print_summary(&stats);
        }
        Commands::Assign {
            slots,
            roster,
            output,
        } => {
            let mut slots = SlotJsonLoader::load(&slots)?;
            let roster = RosterCsvImporter::import(&roster)?;

            let engine = AssignmentEngine::new(config);
            engine.generate_assignments(&mut slots, &roster);
            let stats = AssignmentStatistics::from_slots(&slots, &roster);

            write_output(output.as_deref(), &slots)?;
            print_summary(&stats);
        }
    }

    Ok(())
}

fn write_output(out: Option<&Path>, slots: &[duty_roster::Slot]) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            SlotJsonLoader::save(path, slots)?;
            tracing::info!("排班结果已写入: {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(slots)?),
    }
    Ok(())
}

fn print_summary(stats: &AssignmentStatistics) {
    tracing::info!(
        unfilled_slots = stats.unfilled_slots,
        unfilled_seats = stats.unfilled_seats,
        "指派统计"
    );
    for (role, names) in &stats.uncovered_by_role {
        if !names.is_empty() {
            tracing::info!(role = %role, volunteers = ?names, "本月未指派");
        }
    }
}
