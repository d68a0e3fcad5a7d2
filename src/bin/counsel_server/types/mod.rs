use super::*;

mod app_state;

pub(crate) use self::app_state::AppState;
