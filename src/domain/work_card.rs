// ==========================================
// IPO 同步触发工具 - 工作卡领域类型
// ==========================================
// Arbeitskarte (工作卡) → Werkstück (工件) → Produktionsdaten (生产数据)
// ==========================================

use std::fmt;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

// ==========================================
// AkNumber - 工作卡号
// ==========================================

/// 工作卡号为空
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("工作卡号不能为空")]
pub struct InvalidAkNumber;

/// 工作卡号 (Arbeitskartennummer)
///
/// 仅做非空校验（去除首尾空白后）；只作为绑定参数进入 SQL。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AkNumber(String);

impl AkNumber {
    pub fn parse(raw: &str) -> Result<Self, InvalidAkNumber> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidAkNumber);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AkNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ==========================================
// WorkpieceId - 工件ID
// ==========================================

/// 工件ID，由工作卡的 WERKSTÜCK_ID 解析得到，不持久化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkpieceId(pub i64);

impl fmt::Display for WorkpieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==========================================
// SyncStage - 流程阶段
// ==========================================

/// 更新流程阶段，用于错误与日志定位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    /// 开启/提交事务
    Transaction,
    /// 1. 查询工作卡，解析工件ID
    ResolveWorkpiece,
    /// 2. 递增工件计数
    UpdateWorkpiece,
    /// 3. 递增工作卡计数
    UpdateWorkCard,
    /// 4. 递增生产数据计数
    UpdateProductionData,
}

impl SyncStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStage::Transaction => "transaction",
            SyncStage::ResolveWorkpiece => "resolve_workpiece",
            SyncStage::UpdateWorkpiece => "update_workpiece",
            SyncStage::UpdateWorkCard => "update_work_card",
            SyncStage::UpdateProductionData => "update_production_data",
        }
    }

    /// 阶段涉及的表
    pub fn table(&self) -> Option<&'static str> {
        match self {
            SyncStage::Transaction => None,
            SyncStage::ResolveWorkpiece | SyncStage::UpdateWorkCard => Some("Arbeitskarte"),
            SyncStage::UpdateWorkpiece => Some("Werkstück"),
            SyncStage::UpdateProductionData => Some("Produktionsdaten"),
        }
    }
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.table() {
            Some(table) => write!(f, "{} ({})", self.as_str(), table),
            None => f.write_str(self.as_str()),
        }
    }
}

// ==========================================
// SyncReport - 运行报告
// ==========================================

/// 一次成功运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub run_id: Uuid,
    pub ak_num: AkNumber,
    pub workpiece_id: WorkpieceId,
    pub elapsed: Duration,
}
