//! Leaders Academy - 学校管理系统后端服务
//!
//! 基于 Actix Web 与 SeaORM 构建，面向管理员、校长、教师、学生与家长。
//!
//! # 架构
//! - `access`: 调用者、数据范围与写权限
//! - `cache`: 对象缓存（Moka）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `resources`: 各实体的通用 CRUD 定义
//! - `routes`: API 与页面路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod access;
pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod resources;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
