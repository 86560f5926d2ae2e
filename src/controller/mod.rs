mod format;
mod health_check;
mod home;
mod login;
mod logout;

pub use format::*;
pub use health_check::*;
pub use home::*;
pub use login::*;
pub use logout::*;
