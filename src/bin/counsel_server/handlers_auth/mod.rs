use super::*;

mod blocking;
mod login;
mod profile;
mod register;
mod users;

pub(crate) use self::login::login;
pub(crate) use self::profile::me;
pub(crate) use self::register::register;
pub(crate) use self::users::{activate_user, deactivate_user, list_users};
