// ==========================================
// IPO 同步触发工具 - 应用层
// ==========================================
// 职责: 配置 → 连接 → 工作卡号 → 引擎，串联一次完整运行
// ==========================================

pub mod error;
pub mod runner;

// 重导出
pub use error::AppError;
pub use runner::{run, run_from_env};
