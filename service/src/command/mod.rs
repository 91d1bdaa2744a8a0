//! [`Command`] definition.

pub mod change_user_password;
pub mod create_resource;
pub mod create_user_session;
pub mod delete_image;
pub mod delete_resource;
pub mod set_base_currency;
pub mod toggle_resource_active;
pub mod update_resource;
pub mod upload_image;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    change_user_password::ChangeUserPassword,
    create_resource::{CreateResource, ExecutionError},
    create_user_session::CreateUserSession,
    delete_image::DeleteImage,
    delete_resource::DeleteResource,
    set_base_currency::SetBaseCurrency,
    toggle_resource_active::ToggleResourceActive,
    update_resource::UpdateResource,
    upload_image::UploadImage,
};
