// ==========================================
// IPO 同步触发工具 - 命令行入口
// ==========================================
// 无参数：一次调用完成全部流程
// 退出码: 0 成功 / 1 任一阶段失败
// ==========================================

use ipo_sync_trigger::config;
use ipo_sync_trigger::logging::{self, LogFormat};
use std::process::ExitCode;

fn main() -> ExitCode {
    // .env 需在日志初始化前加载（日志格式可能来自 .env）
    let dotenv = config::load_dotenv();

    logging::init(LogFormat::from_env());
    dotenv.log();

    tracing::info!(
        app = ipo_sync_trigger::APP_NAME,
        version = ipo_sync_trigger::VERSION,
        "启动"
    );

    match ipo_sync_trigger::app::run_from_env() {
        Ok(report) => {
            tracing::info!(
                run_id = %report.run_id,
                ak_num = %report.ak_num,
                workpiece_id = %report.workpiece_id,
                "Update process completed successfully."
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(stage = e.stage(), error = %e, "更新失败");
            ExitCode::FAILURE
        }
    }
}
