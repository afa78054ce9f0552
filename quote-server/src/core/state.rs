use std::sync::Arc;

use parking_lot::RwLock;
use shared::error::{AppError, ErrorCode};
use shared::models::Catalog;

use crate::core::{Config, Result};
use crate::pricing::QuoteSession;
use crate::tariff::{TariffStore, load_tariffs};

/// 服务器状态 - 持有所有共享数据的引用
///
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// # 组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | tariffs | Option<Arc<TariffStore>> | 运费数据集 (加载后只读) |
/// | catalog | Arc<RwLock<Catalog>> | 当前价目表 |
/// | session | Arc<RwLock<QuoteSession>> | 当前报价会话 (单写者) |
///
/// # 使用示例
///
/// ```ignore
/// let store = state.tariffs()?;
/// let quote = store.groupage_quote("MI", &measures, false)?;
///
/// let mut session = state.session.write();
/// session.apply_freight(&line_id, quote.cost)?;
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 运费数据集 (加载失败时为 None，运费接口返回 503)
    tariffs: Option<Arc<TariffStore>>,
    /// 价目表
    pub catalog: Arc<RwLock<Catalog>>,
    /// 报价会话
    pub session: Arc<RwLock<QuoteSession>>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 方法代替
    pub fn new(config: Config, tariffs: Option<Arc<TariffStore>>) -> Self {
        let session = QuoteSession::new(config.quote_settings());
        Self {
            config,
            tariffs,
            catalog: Arc::new(RwLock::new(Catalog::default())),
            session: Arc::new(RwLock::new(session)),
        }
    }

    /// 初始化服务器状态
    ///
    /// 从 `tariff_data_dir` 并发加载四个运费数据集。
    /// 生产环境下加载失败直接返回错误；其他环境降级运行
    /// (报价功能可用，运费接口返回 DatasetLoadFailed)。
    pub async fn initialize(config: &Config) -> Result<Self> {
        let tariffs = match load_tariffs(&config.tariff_data_dir).await {
            Ok(store) => Some(Arc::new(store)),
            Err(e) if config.is_production() => return Err(e.into()),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    dir = %config.tariff_data_dir,
                    "Tariff datasets unavailable, freight calculation disabled"
                );
                None
            }
        };

        Ok(Self::new(config.clone(), tariffs))
    }

    /// 获取运费数据集
    pub fn tariffs(&self) -> std::result::Result<Arc<TariffStore>, AppError> {
        self.tariffs.clone().ok_or_else(|| {
            AppError::with_message(
                ErrorCode::DatasetLoadFailed,
                format!(
                    "Tariff datasets were not loaded from {}",
                    self.config.tariff_data_dir
                ),
            )
        })
    }

    /// 运费数据集是否可用
    pub fn has_tariffs(&self) -> bool {
        self.tariffs.is_some()
    }
}
