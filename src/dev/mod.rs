//! Device drivers

pub mod pcf8575;
pub mod pcf8575_async;
