// ==========================================
// IPO 同步触发工具 - 环境变量配置
// ==========================================
// 变量前缀: TRIGGER_IPO_SYNC_
// 校验顺序: DB_PORT → DB_USER → DB_PASS → DB_HOST → DB_NAME
// ==========================================

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// 环境变量名
pub mod env_keys {
    pub const DB_PORT: &str = "TRIGGER_IPO_SYNC_DB_PORT";
    pub const DB_USER: &str = "TRIGGER_IPO_SYNC_DB_USER";
    pub const DB_PASS: &str = "TRIGGER_IPO_SYNC_DB_PASS";
    pub const DB_HOST: &str = "TRIGGER_IPO_SYNC_DB_HOST";
    pub const DB_NAME: &str = "TRIGGER_IPO_SYNC_DB_NAME";

    /// 工作卡号（可选，缺省时交互式输入）
    pub const AK_NUM: &str = "TRIGGER_IPO_SYNC_AK_NUM";

    /// 日志格式（可选: json | pretty）
    pub const LOG_FORMAT: &str = "TRIGGER_IPO_SYNC_LOG_FORMAT";
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("环境变量未设置: {0}")]
    Missing(&'static str),
}

// ==========================================
// ConnectionConfig - 数据库连接参数
// ==========================================
/// 数据库连接参数
///
/// 启动时构造一次，之后只读。空白值视为未设置。
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub database_name: String,
}

impl ConnectionConfig {
    /// 从进程环境读取
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取
    ///
    /// # 参数
    /// - lookup: 按变量名返回值，None 表示未设置
    ///
    /// # 返回
    /// - Err(ConfigError::Missing): 第一个缺失的变量名
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        // 顺序即报错优先级
        let port = require(env_keys::DB_PORT)?;
        let user = require(env_keys::DB_USER)?;
        let password = require(env_keys::DB_PASS)?;
        let host = require(env_keys::DB_HOST)?;
        let database_name = require(env_keys::DB_NAME)?;

        Ok(Self {
            host,
            port,
            user,
            password,
            database_name,
        })
    }

    /// 连接串（密码已脱敏），仅用于日志
    pub fn connection_string(&self) -> String {
        format!(
            "server={};user id={};password=***;port={};database={};",
            self.host, self.user, self.port, self.database_name
        )
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database_name", &self.database_name)
            .finish()
    }
}

// ==========================================
// .env 文件加载
// ==========================================

/// .env 加载结果
///
/// 加载发生在日志系统初始化之前，结果暂存后再记录。
#[derive(Debug)]
pub enum DotenvOutcome {
    Loaded(PathBuf),
    NotFound,
    Failed(String),
}

impl DotenvOutcome {
    pub fn log(&self) {
        match self {
            DotenvOutcome::Loaded(path) => {
                tracing::debug!(path = %path.display(), "已加载 .env 文件")
            }
            DotenvOutcome::NotFound => {
                tracing::debug!("未找到 .env 文件，使用进程环境变量")
            }
            DotenvOutcome::Failed(err) => {
                tracing::warn!(error = %err, "加载 .env 文件失败")
            }
        }
    }
}

/// 加载当前目录（或上级目录）中的 .env 文件；已存在的环境变量不会被覆盖
pub fn load_dotenv() -> DotenvOutcome {
    match dotenvy::dotenv() {
        Ok(path) => DotenvOutcome::Loaded(path),
        Err(e) if e.not_found() => DotenvOutcome::NotFound,
        Err(e) => DotenvOutcome::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, String> {
        let mut env = HashMap::new();
        env.insert(env_keys::DB_PORT, "1433".to_string());
        env.insert(env_keys::DB_USER, "meko".to_string());
        env.insert(env_keys::DB_PASS, "geheim".to_string());
        env.insert(env_keys::DB_HOST, "/srv/meko".to_string());
        env.insert(env_keys::DB_NAME, "produktion".to_string());
        env
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<ConnectionConfig, ConfigError> {
        ConnectionConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_all_present() {
        let config = load(&full_env()).unwrap();
        assert_eq!(config.port, "1433");
        assert_eq!(config.user, "meko");
        assert_eq!(config.password, "geheim");
        assert_eq!(config.host, "/srv/meko");
        assert_eq!(config.database_name, "produktion");
    }

    #[test]
    fn test_missing_reported_in_fixed_order() {
        let order = [
            env_keys::DB_PORT,
            env_keys::DB_USER,
            env_keys::DB_PASS,
            env_keys::DB_HOST,
            env_keys::DB_NAME,
        ];

        // 逐个移除：每次报告的都是当前仍缺失的第一个
        let mut env = full_env();
        for key in order.iter().rev() {
            env.remove(key);
            assert_eq!(load(&env), Err(ConfigError::Missing(*key)));
        }
    }

    #[test]
    fn test_nothing_set_reports_port_first() {
        let err = ConnectionConfig::from_lookup(|_| None).unwrap_err();
        assert_eq!(err, ConfigError::Missing(env_keys::DB_PORT));
        assert_eq!(
            err.to_string(),
            "环境变量未设置: TRIGGER_IPO_SYNC_DB_PORT"
        );
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut env = full_env();
        env.insert(env_keys::DB_PASS, "   ".to_string());
        assert_eq!(load(&env), Err(ConfigError::Missing(env_keys::DB_PASS)));
    }

    #[test]
    fn test_password_is_redacted() {
        let config = load(&full_env()).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("geheim"));
        assert!(!config.connection_string().contains("geheim"));
        assert!(config.connection_string().contains("server=/srv/meko;"));
    }
}
