mod login;
mod login_page;
mod operator;
mod prefill_login;

pub use login::{LoginForm, LoginQuery};
pub use login_page::LoginPage;
pub use operator::{AuthenticatedOperator, OperatorRecord};
pub use prefill_login::PrefillLogin;
