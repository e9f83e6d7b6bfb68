// ==========================================
// IPO 同步触发工具 - 引擎层错误类型
// ==========================================
// 所有错误均为致命错误：不重试、不局部恢复
// 每个错误必须携带失败阶段
// ==========================================

use crate::domain::SyncStage;
use crate::repository::RepositoryError;
use thiserror::Error;

/// 更新流程错误
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("[{stage}] 记录未找到: key={key}")]
    NotFound { stage: SyncStage, key: String },

    #[error("[{stage}] 数据库查询失败: {source}")]
    Query {
        stage: SyncStage,
        #[source]
        source: rusqlite::Error,
    },

    #[error("[{stage}] 结果解析失败: {source}")]
    Scan {
        stage: SyncStage,
        #[source]
        source: rusqlite::Error,
    },
}

impl WorkflowError {
    /// 失败阶段
    pub fn stage(&self) -> SyncStage {
        match self {
            WorkflowError::NotFound { stage, .. }
            | WorkflowError::Query { stage, .. }
            | WorkflowError::Scan { stage, .. } => *stage,
        }
    }

    /// 为仓储错误附加阶段
    pub fn from_repository(stage: SyncStage, err: RepositoryError) -> Self {
        match err {
            RepositoryError::Query(source) => WorkflowError::Query { stage, source },
            RepositoryError::Scan(source) => WorkflowError::Scan { stage, source },
        }
    }

    pub fn not_found(stage: SyncStage, key: impl ToString) -> Self {
        WorkflowError::NotFound {
            stage,
            key: key.to_string(),
        }
    }
}
