pub use self::parameter::*;
pub use self::request::*;

mod parameter;
mod request;
