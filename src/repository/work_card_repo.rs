// ==========================================
// IPO 同步触发工具 - 工作卡数据仓储
// ==========================================
// 表: Arbeitskarte / Werkstück / Produktionsdaten
// 红线: Repository 不含业务逻辑（不判断“未找到”是否致命）
// ==========================================

use crate::domain::{AkNumber, WorkpieceId};
use crate::repository::error::RepositoryResult;
use rusqlite::{params, Connection, OptionalExtension};

const SELECT_WORKPIECE_ID: &str =
    r#"SELECT "WERKSTÜCK_ID" FROM "Arbeitskarte" WHERE "Nummer" = ?1 LIMIT 1"#;

const UPDATE_WORKPIECE_COUNT: &str =
    r#"UPDATE "Werkstück" SET "MekoRPUpdateCount" = "MekoRPUpdateCount" + 1 WHERE id = ?1"#;

const UPDATE_WORK_CARD_COUNT: &str =
    r#"UPDATE "Arbeitskarte" SET "MekoRPUpdateCount" = "MekoRPUpdateCount" + 1 WHERE "Nummer" = ?1"#;

const UPDATE_PRODUCTION_DATA_COUNT: &str =
    r#"UPDATE "Produktionsdaten" SET "MekoRPUpdateCount" = "MekoRPUpdateCount" + 1 WHERE "Nummer" = ?1"#;

// ==========================================
// WorkCardRepository - 工作卡仓储
// ==========================================
/// 工作卡仓储
/// 职责: 工件ID 查询与三张表的计数递增
///
/// 借用连接而不持有：调用方可传入 `Transaction`（解引用为 `Connection`）。
pub struct WorkCardRepository<'c> {
    conn: &'c Connection,
}

impl<'c> WorkCardRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// 按工作卡号查询工件ID
    ///
    /// # 返回
    /// - Ok(Some(WorkpieceId)): 找到工作卡
    /// - Ok(None): 工作卡不存在
    /// - Err(Scan): WERKSTÜCK_ID 为空或不是整数
    /// - Err(Query): 数据库错误
    pub fn find_workpiece_id(&self, ak_num: &AkNumber) -> RepositoryResult<Option<WorkpieceId>> {
        let id = self
            .conn
            .query_row(SELECT_WORKPIECE_ID, params![ak_num.as_str()], |row| {
                row.get::<_, i64>(0)
            })
            .optional()?;
        Ok(id.map(WorkpieceId))
    }

    /// 工件计数 +1，返回受影响行数
    pub fn increment_workpiece_counter(
        &self,
        workpiece_id: WorkpieceId,
    ) -> RepositoryResult<usize> {
        Ok(self.conn.execute(UPDATE_WORKPIECE_COUNT, params![workpiece_id.0])?)
    }

    /// 工作卡计数 +1，返回受影响行数
    pub fn increment_work_card_counter(&self, ak_num: &AkNumber) -> RepositoryResult<usize> {
        Ok(self.conn.execute(UPDATE_WORK_CARD_COUNT, params![ak_num.as_str()])?)
    }

    /// 生产数据计数 +1，返回受影响行数
    pub fn increment_production_data_counter(&self, ak_num: &AkNumber) -> RepositoryResult<usize> {
        Ok(self
            .conn
            .execute(UPDATE_PRODUCTION_DATA_COUNT, params![ak_num.as_str()])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_schema::{counters, seed, setup_test_db};
    use crate::repository::RepositoryError;

    fn ak(raw: &str) -> AkNumber {
        AkNumber::parse(raw).unwrap()
    }

    #[test]
    fn test_find_workpiece_id() {
        let conn = setup_test_db();
        seed(&conn, "AK-1001", 42, 5);
        let repo = WorkCardRepository::new(&conn);

        assert_eq!(
            repo.find_workpiece_id(&ak("AK-1001")).unwrap(),
            Some(WorkpieceId(42))
        );
        assert_eq!(repo.find_workpiece_id(&ak("AK-9999")).unwrap(), None);
    }

    #[test]
    fn test_find_workpiece_id_null_is_scan_error() {
        let conn = setup_test_db();
        conn.execute(
            r#"INSERT INTO "Arbeitskarte" ("Nummer", "WERKSTÜCK_ID") VALUES ('AK-0', NULL)"#,
            [],
        )
        .unwrap();
        let repo = WorkCardRepository::new(&conn);

        let err = repo.find_workpiece_id(&ak("AK-0")).unwrap_err();
        assert!(matches!(err, RepositoryError::Scan(_)));
    }

    #[test]
    fn test_increments_touch_only_target_rows() {
        let conn = setup_test_db();
        seed(&conn, "AK-1001", 42, 5);
        seed(&conn, "AK-1002", 43, 7);
        let repo = WorkCardRepository::new(&conn);

        assert_eq!(repo.increment_workpiece_counter(WorkpieceId(42)).unwrap(), 1);
        assert_eq!(repo.increment_work_card_counter(&ak("AK-1001")).unwrap(), 1);
        assert_eq!(
            repo.increment_production_data_counter(&ak("AK-1001")).unwrap(),
            1
        );

        assert_eq!(counters(&conn, "AK-1001", 42), (6, 6, 6));
        assert_eq!(counters(&conn, "AK-1002", 43), (7, 7, 7));
    }

    #[test]
    fn test_increment_missing_row_affects_nothing() {
        let conn = setup_test_db();
        let repo = WorkCardRepository::new(&conn);

        assert_eq!(repo.increment_workpiece_counter(WorkpieceId(1)).unwrap(), 0);
        assert_eq!(repo.increment_work_card_counter(&ak("AK-1")).unwrap(), 0);
        assert_eq!(repo.increment_production_data_counter(&ak("AK-1")).unwrap(), 0);
    }

    #[test]
    fn test_quote_in_ak_number_is_plain_data() {
        let conn = setup_test_db();
        seed(&conn, "AK-1001", 42, 5);
        let repo = WorkCardRepository::new(&conn);

        let hostile = ak("x' OR '1'='1");
        assert_eq!(repo.find_workpiece_id(&hostile).unwrap(), None);
        assert_eq!(repo.increment_work_card_counter(&hostile).unwrap(), 0);
        assert_eq!(counters(&conn, "AK-1001", 42), (5, 5, 5));
    }

    #[test]
    fn test_missing_table_is_query_error() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let repo = WorkCardRepository::new(&conn);

        let err = repo.find_workpiece_id(&ak("AK-1001")).unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));
    }
}
