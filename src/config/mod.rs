//! 配置管理
//!
//! 静态配置在启动时加载一次；核心逻辑通过参数接收所需的配置片段。

#[path = "impl.rs"]
mod loader;
mod structs;

pub use structs::*;
