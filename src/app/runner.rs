// ==========================================
// IPO 同步触发工具 - 运行编排
// ==========================================
// 顺序: 建立连接 → 解析工作卡号 → 执行引擎
// 连接在返回时（含错误路径）随 drop 关闭
// ==========================================

use crate::app::error::AppError;
use crate::config::ConnectionConfig;
use crate::db;
use crate::domain::SyncReport;
use crate::engine::SyncTriggerEngine;
use crate::input::{AkNumberSource, DialoguerPrompt, EnvOrPrompt};
use uuid::Uuid;

/// 使用给定配置与工作卡号来源执行一次完整运行
pub fn run<S: AkNumberSource>(
    config: &ConnectionConfig,
    source: &mut S,
) -> Result<SyncReport, AppError> {
    let mut conn = db::connect(config)?;
    tracing::info!(database = %config.connection_string(), "数据库连接成功");

    let ak_num = source.resolve()?;

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("ipo_sync", %run_id, ak_num = %ak_num);
    let engine = SyncTriggerEngine::with_span(run_id, span);
    engine.span().in_scope(|| tracing::info!("开始更新计数"));

    Ok(engine.run(&mut conn, &ak_num)?)
}

/// 从进程环境读取全部输入（工作卡号缺省时在终端提示）
pub fn run_from_env() -> Result<SyncReport, AppError> {
    let config = ConnectionConfig::from_env()?;
    let mut source = EnvOrPrompt::from_env(DialoguerPrompt);
    run(&config, &mut source)
}
