//! 统一错误处理
//!
//! 错误类型统一来自 `shared::error`：
//! - [`AppError`] - 带错误码的应用错误
//! - [`ApiResponse`] - API 响应结构
//!
//! # 错误码规范
//!
//! | 范围 | 分类 | 示例 |
//! |------|------|------|
//! | 0xxx | 通用错误 | 2 验证失败 |
//! | 4xxx | 报价错误 | 4001 报价行不存在 |
//! | 5xxx | 运费错误 | 5001 省份无运费 |
//! | 9xxx | 系统错误 | 9101 数据集加载失败 |
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::new(ErrorCode::TariffNotFound).with_detail("province", "ZZ"))
//!
//! // 返回成功响应
//! Ok(Json(snapshot))
//! ```

pub use shared::error::{ApiResponse, AppError, ErrorCategory, ErrorCode};
