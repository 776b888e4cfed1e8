//! 服务自动注册的集中集成测试工程
//!
//! 测试代码位于 `tests/` 目录，本 crate 不导出任何内容。
