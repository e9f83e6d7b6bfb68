// ==========================================
// IPO 同步触发工具 - 引擎层
// ==========================================
// 职责: 查找工件并将计数传播到三张关联表
// 红线: Engine 不拼 SQL，数据访问全部经由 Repository
// ==========================================

pub mod error;
pub mod sync_trigger;

// 重导出核心引擎
pub use error::WorkflowError;
pub use sync_trigger::SyncTriggerEngine;
