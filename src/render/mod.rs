//! Frame rendering: fixed field layout drawn onto a monochrome canvas.

pub mod frame;
pub mod layout;
