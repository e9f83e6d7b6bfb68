// ==========================================
// IPO 同步触发工具 - 领域模型层
// ==========================================
// 职责: 工作卡号、工件ID、流程阶段、运行报告
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod work_card;

// 重导出核心类型
pub use work_card::{AkNumber, InvalidAkNumber, SyncReport, SyncStage, WorkpieceId};
