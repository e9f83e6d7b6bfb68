// ==========================================
// IPO 同步触发工具 - 应用层错误类型
// ==========================================
// 职责: 汇总各层错误；进程据此输出一条致命日志并退出
// ==========================================

use crate::config::ConfigError;
use crate::db::ConnectionError;
use crate::engine::WorkflowError;
use crate::input::InputError;
use thiserror::Error;

/// 应用层错误类型
#[derive(Error, Debug)]
pub enum AppError {
    #[error("读取环境变量失败: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("更新流程失败: {0}")]
    Workflow(#[from] WorkflowError),
}

impl AppError {
    /// 失败阶段名称（日志字段）
    pub fn stage(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Connection(_) => "connection",
            AppError::Input(_) => "input",
            AppError::Workflow(e) => e.stage().as_str(),
        }
    }
}
