use shared::models::{DEFAULT_VAT_RATE, QuoteSettings};

use crate::money::{clamp_percent, parse_decimal};

/// 服务器配置 - 报价服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | TARIFF_DATA_DIR | ./data | 运费数据集目录 |
/// | VAT_RATE | 22 | 新报价的默认增值税率 (0-100) |
/// | AUTO_SERVICES | true | 是否自动填充运输/安装费用 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志文件目录 |
///
/// # 示例
///
/// ```ignore
/// TARIFF_DATA_DIR=/srv/trasporti/data HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运费数据集目录 (articles / geo / pallet / groupage 四个 JSON 文件)
    pub tariff_data_dir: String,
    /// 默认增值税率 (%)
    pub vat_rate: f64,
    /// 默认是否自动填充服务费用
    pub auto_services: bool,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// 日志目录 (存在时写入按天滚动的日志文件)
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            tariff_data_dir: std::env::var("TARIFF_DATA_DIR").unwrap_or_else(|_| "./data".into()),
            vat_rate: std::env::var("VAT_RATE")
                .ok()
                .and_then(|v| parse_vat_rate(&v))
                .unwrap_or(DEFAULT_VAT_RATE),
            auto_services: std::env::var("AUTO_SERVICES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(tariff_data_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.tariff_data_dir = tariff_data_dir.into();
        config.http_port = http_port;
        config
    }

    /// 新报价会话的默认设置
    pub fn quote_settings(&self) -> QuoteSettings {
        QuoteSettings {
            auto_services: self.auto_services,
            vat_rate: self.vat_rate,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// 解析增值税率, 与报价输入相同的宽松格式 ("22,5" = 22.5)
///
/// 不含数字时返回 None (使用默认值)
fn parse_vat_rate(raw: &str) -> Option<f64> {
    if !raw.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(clamp_percent(parse_decimal(raw)))
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
