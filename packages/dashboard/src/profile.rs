use api::{AdminBackend, AdminInfo, PasswordChange, ProfileUpdate};

use crate::ActionError;

pub const EMAIL_CHANGED: &str = "Email updated successfully. Please log in again with your new email.";

/// What the session should do after a successful profile update.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileOutcome {
    /// Same email: replace the session's admin record.
    Updated(AdminInfo),
    /// The token was issued for the old email; sign out.
    EmailChanged,
}

/// The two forms on the settings page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileController {
    pub profile: ProfileUpdate,
    pub password: PasswordChange,
    pub saving_profile: bool,
    pub saving_password: bool,
}

impl ProfileController {
    pub fn for_admin(admin: &AdminInfo) -> Self {
        Self {
            profile: ProfileUpdate {
                name: admin.name.clone(),
                email: admin.email.clone(),
            },
            ..Default::default()
        }
    }

    pub async fn update_profile<B: AdminBackend>(
        backend: &B,
        current: &AdminInfo,
        form: &ProfileUpdate,
    ) -> Result<ProfileOutcome, ActionError> {
        let updated = backend
            .update_me(form)
            .await
            .map_err(|e| ActionError::failed(e, "Failed to update profile"))?;
        if updated.email != current.email {
            tracing::info!(from = %current.email, to = %updated.email, "admin email changed");
            Ok(ProfileOutcome::EmailChanged)
        } else {
            Ok(ProfileOutcome::Updated(updated))
        }
    }

    pub fn validate_password(form: &PasswordChange) -> Result<(), ActionError> {
        if form.new_password != form.confirm_password {
            return Err(ActionError::invalid("New passwords don't match"));
        }
        Ok(())
    }

    pub async fn change_password<B: AdminBackend>(backend: &B, form: &PasswordChange) -> Result<String, ActionError> {
        Self::validate_password(form)?;
        backend
            .change_password(form)
            .await
            .map_err(|e| ActionError::failed(e, "Failed to change password"))?;
        tracing::info!("admin password changed");
        Ok("Password changed successfully".to_string())
    }

    pub fn clear_password(&mut self) {
        self.password = PasswordChange::default();
    }
}
