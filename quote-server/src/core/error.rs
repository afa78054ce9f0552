use thiserror::Error;

use crate::tariff::TariffLoadError;

/// 服务器启动/运行错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("运费数据加载失败: {0}")]
    TariffLoad(#[from] TariffLoadError),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
