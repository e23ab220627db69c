mod agent;
mod agent_config;
mod dataset;
mod error;
mod frame;
mod frame_buffer;
mod handler;
mod input;
mod model_store;
mod ocr;
mod pacing;
mod sprite;

#[cfg(test)]
mod agent_config_test;
#[cfg(test)]
mod frame_buffer_test;
#[cfg(test)]
mod frame_test;

pub use crate::agent::*;
pub use crate::agent_config::*;
pub use crate::dataset::*;
pub use crate::error::*;
pub use crate::frame::*;
pub use crate::frame_buffer::*;
pub use crate::handler::*;
pub use crate::input::*;
pub use crate::model_store::*;
pub use crate::ocr::*;
pub use crate::pacing::*;
pub use crate::sprite::*;

#[macro_use]
extern crate derive_new;
