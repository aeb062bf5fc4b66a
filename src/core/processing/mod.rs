pub mod pipeline;
pub mod resize;
pub mod select;
