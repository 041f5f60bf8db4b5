//! 答题卡批阅系统后端服务
//!
//! 基于 Actix Web 构建，提供答题卡导入评分、成绩管理、批量重命名与外部文件存储。
//!
//! # 架构
//! - `cache`: 读缓存层（Moka）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 纯函数工具（归一化、自然排序、重命名规则、表格解析）

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
