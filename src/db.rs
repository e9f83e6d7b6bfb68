// ==========================================
// IPO 同步触发工具 - SQLite 连接初始化
// ==========================================
// 目标:
// - 由 ConnectionConfig 定位数据库文件并打开唯一连接
// - 统一 PRAGMA 与 busy_timeout
// - 不创建数据库文件：目标库必须已存在
// - 登录校验: (port, user) 必须在 ipo_sync_login 中登记，且密码摘要一致
// ==========================================

use crate::config::ConnectionConfig;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 数据库文件扩展名
pub const DB_FILE_EXTENSION: &str = "db";

const CREATE_LOGIN_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS ipo_sync_login (
        port TEXT NOT NULL,
        user_name TEXT NOT NULL,
        password_sha256 TEXT NOT NULL,
        PRIMARY KEY (port, user_name)
    )
"#;

const SELECT_LOGIN: &str =
    "SELECT password_sha256 FROM ipo_sync_login WHERE port = ?1 AND user_name = ?2";

const UPSERT_LOGIN: &str = r#"
    INSERT INTO ipo_sync_login (port, user_name, password_sha256) VALUES (?1, ?2, ?3)
    ON CONFLICT (port, user_name) DO UPDATE SET password_sha256 = excluded.password_sha256
"#;

/// 数据库连接错误
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("数据库连接失败 (path={path}): {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("数据库不可用 (path={path}): {source}")]
    Unreachable {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("登录被拒绝: user={user}, port={port}")]
    Rejected { user: String, port: String },
}

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 由连接参数解析数据库文件路径: `<host>/<database_name>.db`
pub fn resolve_db_path(config: &ConnectionConfig) -> PathBuf {
    Path::new(&config.host).join(format!("{}.{}", config.database_name, DB_FILE_EXTENSION))
}

/// 打开已存在的 SQLite 数据库并应用统一配置
pub fn open_sqlite_connection(db_path: &Path) -> rusqlite::Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(db_path, flags)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 密码摘要（SHA-256，十六进制小写）
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// 登记（或更新）一组登录凭据
pub fn register_login(
    conn: &Connection,
    port: &str,
    user: &str,
    password: &str,
) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_LOGIN_TABLE)?;
    conn.execute(UPSERT_LOGIN, params![port, user, hash_password(password)])?;
    Ok(())
}

/// 校验 port/user/password
///
/// # 返回
/// - Ok(()): 凭据已登记且密码一致
/// - Err(Rejected): 未登记或密码不一致
/// - Err(Unreachable): 登录表缺失或查询失败
fn authenticate(
    conn: &Connection,
    config: &ConnectionConfig,
    path: &str,
) -> Result<(), ConnectionError> {
    let stored: Option<String> = conn
        .query_row(SELECT_LOGIN, params![config.port, config.user], |row| row.get(0))
        .optional()
        .map_err(|source| ConnectionError::Unreachable {
            path: path.to_string(),
            source,
        })?;

    match stored {
        Some(digest) if digest == hash_password(&config.password) => Ok(()),
        _ => Err(ConnectionError::Rejected {
            user: config.user.clone(),
            port: config.port.clone(),
        }),
    }
}

/// 按配置建立连接，确认数据库可读并校验登录凭据
///
/// # 返回
/// - Ok(Connection): 已打开的连接，drop 时关闭
/// - Err(ConnectionError): 文件不存在/不可打开/不是数据库/登录被拒绝
pub fn connect(config: &ConnectionConfig) -> Result<Connection, ConnectionError> {
    let db_path = resolve_db_path(config);
    let path = db_path.display().to_string();

    tracing::debug!(
        connection = %config.connection_string(),
        path = %path,
        "正在打开数据库连接"
    );

    let conn = open_sqlite_connection(&db_path).map_err(|source| ConnectionError::Open {
        path: path.clone(),
        source,
    })?;

    // 读取文件头，非数据库文件在此失败
    conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
        .map_err(|source| ConnectionError::Unreachable {
            path: path.clone(),
            source,
        })?;

    authenticate(&conn, config, &path)?;

    Ok(conn)
}
