#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod bits;
mod bus;
mod common;
mod device;
pub mod dev;
mod error;
mod pin;


pub use bus::I2cBus;
pub use bus::AsyncI2cBus;
pub use bus::I2cConn;
pub use common::mode;
pub use common::PortDriver;
pub use device::Device;
pub use error::Error;
pub use error::Operation;
pub use pin::Pin;
pub use pin::PinError;

pub use dev::pcf8575::Pcf8575;
pub use dev::pcf8575::SharedPcf8575;
pub use dev::pcf8575::DEFAULT_ADDRESS;
pub use dev::pcf8575_async::Pcf8575Async;
