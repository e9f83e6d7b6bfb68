// ==========================================
// IPO 同步触发工具 - 配置层
// ==========================================
// 职责: 从进程环境（及可选 .env 文件）读取数据库连接参数
// 约束: 五个连接参数全部必填，按固定顺序校验
// ==========================================

pub mod env_config;

// 重导出核心配置类型
pub use env_config::{env_keys, load_dotenv, ConfigError, ConnectionConfig, DotenvOutcome};
