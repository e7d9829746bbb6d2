use types::{Module, UserData};

use crate::config::Config;

pub fn is_admin(user: &UserData, config: &Config) -> bool {
    user.is_in_group(&config.admin_group)
}

/// Raw module grant. Admins are not special-cased here; the dashboard
/// applies the admin override itself.
pub fn has_module_access(user: &UserData, module: Module, config: &Config) -> bool {
    user.is_in_any_group(config.module_groups(module))
}
