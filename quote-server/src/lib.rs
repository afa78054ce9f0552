//! Quote Server - 报价计算与运费查询服务
//!
//! # 架构概述
//!
//! - **行定价** (`pricing`): 标准 / 客户折扣两种模式、等效折扣求解、订单合计与增值税
//! - **运费** (`tariff`): 省份分组解析、区间查价、整托与拼车计算、保险附加
//! - **价目表** (`catalog`): 已解析 CSV 行 → 价目条目
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! quote-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── pricing/       # 行定价引擎和报价会话
//! ├── tariff/        # 运费数据集和计算
//! ├── catalog.rs     # 价目表导入
//! ├── money.rs       # 金额运算和输入转换
//! └── utils/         # 日志、错误
//! ```

pub mod api;
pub mod catalog;
pub mod core;
pub mod money;
pub mod pricing;
pub mod tariff;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use pricing::QuoteSession;
pub use tariff::{TariffStore, load_tariffs};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境：加载 .env，初始化日志
///
/// 日志级别和目录取自 [`Config::from_env`] (`LOG_LEVEL` / `LOG_DIR`)。
pub fn setup_environment() -> anyhow::Result<()> {
    // .env 可选
    if let Err(e) = dotenv::dotenv()
        && !e.not_found()
    {
        anyhow::bail!("failed to load .env: {e}");
    }

    let config = Config::from_env();
    init_logger_with_file(Some(config.log_level.as_str()), config.log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ____              __
  / __ \__  ______  / /____
 / / / / / / / __ \/ __/ _ \
/ /_/ / /_/ / /_/ / /_/  __/
\___\_\__,_/\____/\__/\___/
    "#
    );
}
