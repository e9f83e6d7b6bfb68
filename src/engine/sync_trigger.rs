// ==========================================
// IPO 同步触发工具 - 查找并传播计数引擎
// ==========================================
// 流程（严格顺序，任一步失败即终止）:
//   1. 按工作卡号查询 WERKSTÜCK_ID
//   2. Werkstück.MekoRPUpdateCount + 1
//   3. Arbeitskarte.MekoRPUpdateCount + 1
//   4. Produktionsdaten.MekoRPUpdateCount + 1
// 事务: 1-4 在同一事务中执行，失败时整体回滚
// ==========================================

use crate::domain::{AkNumber, SyncReport, SyncStage};
use crate::engine::error::WorkflowError;
use crate::repository::{RepositoryResult, WorkCardRepository};
use rusqlite::Connection;
use std::time::Instant;
use tracing::{debug, info, Span};
use uuid::Uuid;

// ==========================================
// SyncTriggerEngine - 计数传播引擎
// ==========================================
/// 计数传播引擎
///
/// 持有本次运行的日志 span（run_id），所有日志都在该 span 内输出。
/// 不是幂等的：对同一工作卡运行两次，每个计数各 +2。
pub struct SyncTriggerEngine {
    run_id: Uuid,
    span: Span,
}

impl SyncTriggerEngine {
    /// 创建引擎，生成新的 run_id
    pub fn new() -> Self {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("ipo_sync", %run_id);
        Self { run_id, span }
    }

    /// 使用调用方构造的 span
    pub fn with_span(run_id: Uuid, span: Span) -> Self {
        Self { run_id, span }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// 执行完整的四步流程
    ///
    /// # 参数
    /// - conn: 数据库连接（流程期间独占）
    /// - ak_num: 工作卡号
    ///
    /// # 返回
    /// - Ok(SyncReport): 三个计数均已 +1 并提交
    /// - Err(WorkflowError): 失败阶段与原因；事务已回滚
    pub fn run(
        &self,
        conn: &mut Connection,
        ak_num: &AkNumber,
    ) -> Result<SyncReport, WorkflowError> {
        let _guard = self.span.enter();
        let started = Instant::now();

        let tx = conn.transaction().map_err(|source| WorkflowError::Query {
            stage: SyncStage::Transaction,
            source,
        })?;

        let workpiece_id = {
            let repo = WorkCardRepository::new(&tx);

            // 1. 查询工件ID
            let workpiece_id = repo
                .find_workpiece_id(ak_num)
                .map_err(|e| WorkflowError::from_repository(SyncStage::ResolveWorkpiece, e))?
                .ok_or_else(|| WorkflowError::not_found(SyncStage::ResolveWorkpiece, ak_num))?;
            debug!(ak_num = %ak_num, workpiece_id = %workpiece_id, "工作卡已找到");

            // 2. 工件
            ensure_updated(
                SyncStage::UpdateWorkpiece,
                workpiece_id,
                repo.increment_workpiece_counter(workpiece_id),
            )?;

            // 3. 工作卡
            ensure_updated(
                SyncStage::UpdateWorkCard,
                ak_num,
                repo.increment_work_card_counter(ak_num),
            )?;

            // 4. 生产数据
            ensure_updated(
                SyncStage::UpdateProductionData,
                ak_num,
                repo.increment_production_data_counter(ak_num),
            )?;

            workpiece_id
        };

        tx.commit().map_err(|source| WorkflowError::Query {
            stage: SyncStage::Transaction,
            source,
        })?;

        let report = SyncReport {
            run_id: self.run_id,
            ak_num: ak_num.clone(),
            workpiece_id,
            elapsed: started.elapsed(),
        };
        info!(
            ak_num = %report.ak_num,
            workpiece_id = %report.workpiece_id,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "计数更新完成"
        );
        Ok(report)
    }
}

impl Default for SyncTriggerEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 受影响行数为 0 视为目标记录不存在
fn ensure_updated(
    stage: SyncStage,
    key: impl ToString,
    result: RepositoryResult<usize>,
) -> Result<(), WorkflowError> {
    let affected = result.map_err(|e| WorkflowError::from_repository(stage, e))?;
    if affected == 0 {
        return Err(WorkflowError::not_found(stage, key));
    }
    debug!(stage = stage.as_str(), affected, "计数已递增");
    Ok(())
}
