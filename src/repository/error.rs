// ==========================================
// IPO 同步触发工具 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 查询执行失败 / 结果解析失败
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("数据库查询失败: {0}")]
    Query(#[source] rusqlite::Error),

    #[error("结果解析失败: {0}")]
    Scan(#[source] rusqlite::Error),
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::IntegralValueOutOfRange(..) => RepositoryError::Scan(err),
            _ => RepositoryError::Query(err),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
