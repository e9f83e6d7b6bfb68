// ==========================================
// IPO 同步触发工具 - 核心库
// ==========================================
// 职责: 按工作卡号 (Arbeitskartennummer) 查找工件,
//       递增三张关联表的 MekoRPUpdateCount,触发下游 IPO 同步
// 技术栈: Rust + SQLite (rusqlite)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 工作卡/工件类型
pub mod domain;

// 数据仓储层 - 参数化 SQL
pub mod repository;

// 引擎层 - 查找并传播计数
pub mod engine;

// 配置层 - 环境变量
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 工作卡号输入（环境变量或交互式提示）
pub mod input;

// 日志系统
pub mod logging;

// 应用层 - 流程编排
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use app::{run, AppError};
pub use config::{ConfigError, ConnectionConfig};
pub use domain::{AkNumber, SyncReport, SyncStage, WorkpieceId};
pub use engine::{SyncTriggerEngine, WorkflowError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "trigger-ipo-sync";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
