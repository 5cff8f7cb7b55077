//! Authentication
//!
//! Every request carries `Authorization: Bearer <token>` once a token is
//! known. Tokens come from one of three places:
//!
//! - set directly on the client ([`crate::SwapiClient::set_token`]),
//! - a login call ([`crate::api::AuthResource::login`]),
//! - a [`TokenProvider`] configured on the builder, consulted whenever the
//!   client holds no token and again after a 401.

mod login;
mod token;

pub use login::AuthFlow;
pub use login::AutoLoginTokenProvider;
pub use login::Credentials;
pub use login::LoginFlow;
pub(crate) use login::LOGIN_PATH;
pub(crate) use login::token_from_login_response;
pub use token::AccessToken;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
